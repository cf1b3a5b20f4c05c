//! Display order and paging for the record table.
//!
//! The synchronized list has no meaningful order; `TableView` derives the
//! rows a user actually sees from it without mutating it.

use std::cmp::Ordering;

use crate::types::Record;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 25, 50];

/// Sortable table columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Species,
    Period,
    Diet,
    Length,
    Weight,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Name,
        Column::Species,
        Column::Period,
        Column::Diet,
        Column::Length,
        Column::Weight,
    ];

    fn compare(self, a: &Record, b: &Record) -> Ordering {
        match self {
            Column::Name => cmp_text(&a.name, &b.name),
            Column::Species => cmp_text(&a.species, &b.species),
            Column::Period => cmp_text(&a.period, &b.period),
            Column::Diet => a.diet.as_str().cmp(b.diet.as_str()),
            Column::Length => a.length.total_cmp(&b.length),
            Column::Weight => a.weight.total_cmp(&b.weight),
        }
    }
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: Column,
    pub direction: Direction,
}

/// One page of rows plus enough context to render a paginator.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub rows: Vec<&'a Record>,
    pub page_index: usize,
    pub page_size: usize,
    pub total: usize,
}

impl Page<'_> {
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub sort: Option<SortSpec>,
    pub page_index: usize,
    page_size: usize,
}

impl Default for TableView {
    fn default() -> Self {
        Self {
            sort: None,
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TableView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Change the page size. Sizes outside `PAGE_SIZE_OPTIONS` are ignored.
    /// Returns to the first page, as a paginator does.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if !PAGE_SIZE_OPTIONS.contains(&size) {
            return false;
        }
        self.page_size = size;
        self.page_index = 0;
        true
    }

    /// Cycle a column header: ascending, then descending, then unsorted.
    pub fn toggle_sort(&mut self, column: Column) {
        self.sort = match self.sort {
            Some(SortSpec {
                column: current,
                direction: Direction::Ascending,
            }) if current == column => Some(SortSpec {
                column,
                direction: Direction::Descending,
            }),
            Some(SortSpec { column: current, .. }) if current == column => None,
            _ => Some(SortSpec {
                column,
                direction: Direction::Ascending,
            }),
        };
    }

    /// All records in display order.
    pub fn sorted<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        let mut rows: Vec<&Record> = records.iter().collect();
        if let Some(spec) = self.sort {
            // Stable, so ties keep list order.
            rows.sort_by(|a, b| {
                let ord = spec.column.compare(a, b);
                match spec.direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            });
        }
        rows
    }

    /// The visible page. An index past the end shows the last page.
    pub fn page<'a>(&self, records: &'a [Record]) -> Page<'a> {
        let total = records.len();
        let last = total.saturating_sub(1) / self.page_size;
        let page_index = self.page_index.min(last);
        let rows = self
            .sorted(records)
            .into_iter()
            .skip(page_index * self.page_size)
            .take(self.page_size)
            .collect();
        Page {
            rows,
            page_index,
            page_size: self.page_size,
            total,
        }
    }
}
