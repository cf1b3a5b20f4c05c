//! Keeps the local record list in step with confirmed remote state.
//!
//! # Design
//! `ListSynchronizer` owns the `RecordList` a user sees. Each action first
//! awaits the remote call and only then touches the list, so a failed call
//! leaves the list exactly as it was (confirm-then-apply, no rollback).
//!
//! Actions take `&self`: several may be in flight at once on a single thread
//! (`tokio::join!`, a `LocalSet`). Interior mutability is a `RefCell` whose
//! borrows never cross an `.await`. Completions for the same id race and the
//! last one to arrive wins.
//!
//! Loads are counted rather than flagged: `is_loading` stays true until every
//! overlapping `load` has finished or been dropped. Each load still replaces
//! the list with its own response, so the last one to arrive wins there too.

use std::cell::{Cell, Ref, RefCell};

use crate::error::ApiError;
use crate::list::RecordList;
use crate::notify::{Notification, Notifier};
use crate::service::RecordService;
use crate::transport::Transport;
use crate::types::{FieldError, Record, RecordDraft};

pub const MSG_CREATED: &str = "Record added successfully";
pub const MSG_UPDATED: &str = "Record updated successfully";
pub const MSG_DELETED: &str = "Record deleted successfully";

/// What the record editor dialog hands back when it closes.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorResult {
    Cancelled,
    Submitted(RecordDraft),
}

impl EditorResult {
    /// Submit a form, or report why it cannot be submitted yet.
    pub fn from_form(draft: RecordDraft) -> Result<Self, Vec<FieldError>> {
        let errors = draft.validate();
        if errors.is_empty() {
            Ok(EditorResult::Submitted(draft.normalized()))
        } else {
            Err(errors)
        }
    }
}

impl From<Option<RecordDraft>> for EditorResult {
    fn from(value: Option<RecordDraft>) -> Self {
        value.map_or(EditorResult::Cancelled, EditorResult::Submitted)
    }
}

/// How a single user action ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// Nothing was sent (dialog cancelled, or the target was never saved).
    Skipped,
    /// The remote call succeeded and the list reflects it.
    Applied,
    /// The remote call failed; the list is unchanged.
    Failed(ApiError),
}

impl ActionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ActionOutcome::Applied)
    }
}

pub struct ListSynchronizer<T, N> {
    service: RecordService<T>,
    notifier: N,
    records: RefCell<RecordList>,
    loads_in_flight: Cell<usize>,
}

impl<T: Transport, N: Notifier> ListSynchronizer<T, N> {
    pub fn new(service: RecordService<T>, notifier: N) -> Self {
        Self::with_records(service, notifier, RecordList::new())
    }

    /// Start from an existing list instead of an empty one.
    pub fn with_records(service: RecordService<T>, notifier: N, records: RecordList) -> Self {
        Self {
            service,
            notifier,
            records: RefCell::new(records),
            loads_in_flight: Cell::new(0),
        }
    }

    pub fn service(&self) -> &RecordService<T> {
        &self.service
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Borrow the current list. Drop the guard before awaiting an action.
    pub fn records(&self) -> Ref<'_, RecordList> {
        self.records.borrow()
    }

    /// Clone of the current entries.
    pub fn snapshot(&self) -> Vec<Record> {
        self.records.borrow().as_slice().to_vec()
    }

    /// True while at least one `load` is awaiting the server.
    pub fn is_loading(&self) -> bool {
        self.loads_in_flight.get() > 0
    }

    /// Fetch the whole collection. On failure the previous list is kept.
    pub async fn load(&self) -> ActionOutcome {
        let result = {
            let _in_flight = LoadGuard::enter(&self.loads_in_flight);
            self.service.list().await
        };

        match result {
            Ok(records) => {
                tracing::info!(count = records.len(), "records loaded");
                self.records.borrow_mut().replace_all(records);
                ActionOutcome::Applied
            }
            Err(e) => self.fail(e),
        }
    }

    /// Handle the editor closing in create mode.
    pub async fn create(&self, result: EditorResult) -> ActionOutcome {
        let EditorResult::Submitted(draft) = result else {
            return ActionOutcome::Skipped;
        };

        match self.service.create(&draft).await {
            Ok(record) => {
                tracing::info!(id = ?record.id, "record created");
                self.records.borrow_mut().append(record);
                self.succeed(MSG_CREATED)
            }
            Err(e) => self.fail(e),
        }
    }

    /// Handle the editor closing in edit mode for `target`.
    ///
    /// If `target` has vanished from the list by the time the server
    /// answers, the response is dropped rather than re-inserted.
    pub async fn edit(&self, target: &Record, result: EditorResult) -> ActionOutcome {
        let (EditorResult::Submitted(draft), Some(id)) = (result, target.id) else {
            return ActionOutcome::Skipped;
        };

        match self.service.update(id, &draft).await {
            Ok(record) => {
                let replaced = self.records.borrow_mut().replace(id, record);
                tracing::info!(id, replaced, "record updated");
                self.succeed(MSG_UPDATED)
            }
            Err(e) => self.fail(e),
        }
    }

    /// Handle the delete confirmation dialog closing for `target`.
    pub async fn delete(&self, target: &Record, confirmed: bool) -> ActionOutcome {
        let Some(id) = target.id.filter(|_| confirmed) else {
            return ActionOutcome::Skipped;
        };

        match self.service.remove(id).await {
            Ok(()) => {
                let removed = self.records.borrow_mut().remove(id);
                tracing::info!(id, removed, "record deleted");
                self.succeed(MSG_DELETED)
            }
            Err(e) => self.fail(e),
        }
    }

    fn succeed(&self, message: &str) -> ActionOutcome {
        self.notifier.notify(Notification::success(message));
        ActionOutcome::Applied
    }

    fn fail(&self, e: ApiError) -> ActionOutcome {
        self.notifier.notify(Notification::error(e.message()));
        ActionOutcome::Failed(e)
    }
}

/// Counts one pending load; released on completion or when the load
/// future is dropped.
struct LoadGuard<'a>(&'a Cell<usize>);

impl<'a> LoadGuard<'a> {
    fn enter(count: &'a Cell<usize>) -> Self {
        count.set(count.get() + 1);
        Self(count)
    }
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Diet;

    fn draft(name: &str) -> RecordDraft {
        RecordDraft {
            name: name.to_string(),
            species: "sp.".to_string(),
            period: "Triassic".to_string(),
            diet: Diet::Carnivore,
            length: 3.0,
            weight: 0.5,
            description: Some(String::new()),
            image_url: None,
        }
    }

    #[test]
    fn from_form_normalizes_valid_drafts() {
        let result = EditorResult::from_form(draft("Coelophysis")).unwrap();
        let EditorResult::Submitted(d) = result else {
            panic!("expected a submission");
        };
        assert!(d.description.is_none());
    }

    #[test]
    fn from_form_rejects_invalid_drafts() {
        let errors = EditorResult::from_form(draft("C")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn none_means_cancelled() {
        assert_eq!(EditorResult::from(None), EditorResult::Cancelled);
        assert!(matches!(
            EditorResult::from(Some(draft("Herrerasaurus"))),
            EditorResult::Submitted(_)
        ));
    }
}
