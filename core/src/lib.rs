//! Client core for the record catalog service.
//!
//! # Overview
//! Talks to a JSON collection at `{base}/records` and keeps a local list of
//! records consistent with what the server has confirmed.
//!
//! # Design
//! - `RecordClient` is stateless: it builds `HttpRequest` values and parses
//!   `HttpResponse` values without touching the network.
//! - A `Transport` performs the round-trip; `UreqTransport` is the real one.
//! - `RecordService` combines the two into async CRUD calls whose only error
//!   type is the normalized `ApiError`.
//! - `ListSynchronizer` owns the on-screen `RecordList`, mutates it only
//!   after a call succeeds, and reports outcomes through a `Notifier`.
//! - `TableView` sorts and pages the list for display.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod list;
pub mod notify;
pub mod service;
pub mod sync;
pub mod transport;
pub mod types;
pub mod view;

pub use client::RecordClient;
pub use config::{Config, ConfigError};
pub use error::{ApiError, ErrorKind, Failure};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use list::RecordList;
pub use notify::{Level, Notification, NotificationLog, Notifier, TracingNotifier};
pub use service::RecordService;
pub use sync::{ActionOutcome, EditorResult, ListSynchronizer};
pub use transport::{Transport, TransportError, UreqTransport};
pub use types::{Diet, FieldError, Record, RecordDraft, RecordId};
pub use view::{Column, Direction, Page, SortSpec, TableView};
