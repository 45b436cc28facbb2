//! Intake controller core for an anonymous file/URL sharing page.
//!
//! # Overview
//! Collects uploads from the file chooser, drag-and-drop and clipboard
//! paste, turns each into one HTTP request against `/upload` or `/url`, and
//! reflects progress and outcome on the page. The core never performs I/O:
//! a host supplies a `Transport` that executes plain-data requests and a
//! `Page` that applies effects (host-does-IO pattern).
//!
//! # Design
//! - `input` maps page events to at most one `RawInput` per event.
//! - `request` turns a `RawInput` into an `HttpRequest`.
//! - `transport::IntakeController` runs a request, tracking busy state with
//!   an in-flight count so overlapping uploads share the indicator correctly.
//! - `interpret` classifies the response into a `ResponseOutcome`.

pub mod busy;
pub mod config;
pub mod error;
pub mod http;
pub mod input;
pub mod interpret;
pub mod page;
pub mod request;
pub mod transport;
pub mod types;

pub use busy::{BusyTracker, TransportState};
pub use config::{ElementIds, IntakeConfig};
pub use error::{ApiError, ConfigError, TransportError};
pub use http::{FilePart, HttpMethod, HttpRequest, HttpResponse, Multipart, RequestBody};
pub use input::{InputEvent, Reaction};
pub use page::{MemoryPage, Page};
pub use request::{IntakeClient, UploadPayload, UploadRequest};
pub use transport::{IntakeController, Transport};
pub use types::{
    ClipboardData, ClipboardItem, FileBlob, RawInput, ResponseOutcome, UploadKind, UploadResult,
    UrlUpload,
};
