//! Domain values passed between the intake stages.
//!
//! # Design
//! `RawInput` is produced by the input adapter and moved into the request
//! builder; nothing holds on to it after the request exists. `ResponseOutcome`
//! is derived from a response and consumed once to drive a page effect.

use serde::{Deserialize, Serialize};

const DEFAULT_MIME: &str = "application/octet-stream";

/// A user-supplied file: name, MIME type and contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBlob {
    pub name: String,
    pub mime: String,
    pub data: Vec<u8>,
}

impl FileBlob {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            data,
        }
    }

    /// The declared MIME type, or `application/octet-stream` when the source left it blank.
    pub fn mime_or_default(&self) -> &str {
        if self.mime.trim().is_empty() {
            DEFAULT_MIME
        } else {
            &self.mime
        }
    }
}

/// One input extracted from a user gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    SingleFile(FileBlob),
    /// Two or more files from one gesture, in the order the source listed them.
    FileBatch(Vec<FileBlob>),
    UrlText(String),
}

/// Which endpoint family a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    FileUpload,
    UrlUpload,
}

/// One entry of a clipboard's item list.
///
/// `file` is present when the platform can materialize the item as a file
/// (images usually can, plain strings usually cannot).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardItem {
    pub mime: String,
    pub file: Option<FileBlob>,
}

/// Snapshot of the clipboard taken from a paste event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardData {
    pub items: Vec<ClipboardItem>,
    pub text: String,
}

/// Classified result of one completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// The host followed a redirect; navigate to where it ended.
    Redirect(String),
    /// A 2xx JSON body named the result location.
    JsonResult(String),
    /// Text to show in the error display, without the warning prefix.
    ErrorMessage(String),
}

impl ResponseOutcome {
    /// The location to navigate to, if this outcome navigates.
    pub fn location(&self) -> Option<&str> {
        match self {
            ResponseOutcome::Redirect(location) | ResponseOutcome::JsonResult(location) => {
                Some(location)
            }
            ResponseOutcome::ErrorMessage(_) => None,
        }
    }
}

/// Success body returned by both upload endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadResult {
    pub url: String,
}

/// Request body for URL uploads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UrlUpload {
    pub url: String,
}
