//! Input channel adapter: page events in, at most one `RawInput` out.
//!
//! # Design
//! The adapter is a pure function of the event. It reports what the host
//! must do synchronously (cancel the browser default, toggle the drop-zone
//! indicator, open the file chooser) in a `Reaction`, alongside the extracted
//! input. Nothing is queued: a trigger while a request is in flight simply
//! yields another input.

use crate::types::{ClipboardData, FileBlob, RawInput};

/// A page event the controller listens for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A click on the element with this id. Only configured browse triggers
    /// open the chooser; the controller drops clicks on anything else.
    BrowseClick(String),
    /// The hidden file input's selection changed.
    FilesSelected(Vec<FileBlob>),
    DragOver,
    DragLeave,
    Drop(Vec<FileBlob>),
    /// A document-level paste.
    Paste(ClipboardData),
}

/// Effects the host applies for one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reaction {
    /// Cancel the browser's default handling (required for drag-over and drop).
    pub prevent_default: bool,
    /// New drop-zone indicator state, if it changes.
    pub drop_zone_active: Option<bool>,
    pub open_file_chooser: bool,
    pub input: Option<RawInput>,
}

pub fn react(event: InputEvent) -> Reaction {
    match event {
        InputEvent::BrowseClick(_) => Reaction {
            open_file_chooser: true,
            ..Default::default()
        },
        InputEvent::FilesSelected(files) => Reaction {
            input: from_files(files),
            ..Default::default()
        },
        InputEvent::DragOver => Reaction {
            prevent_default: true,
            drop_zone_active: Some(true),
            ..Default::default()
        },
        InputEvent::DragLeave => Reaction {
            drop_zone_active: Some(false),
            ..Default::default()
        },
        InputEvent::Drop(files) => Reaction {
            prevent_default: true,
            drop_zone_active: Some(false),
            input: from_files(files),
            ..Default::default()
        },
        InputEvent::Paste(clipboard) => Reaction {
            input: from_clipboard(clipboard),
            ..Default::default()
        },
    }
}

/// One file takes the single path, more take the batch path, none is a no-op.
pub fn from_files(mut files: Vec<FileBlob>) -> Option<RawInput> {
    match files.len() {
        0 => None,
        1 => files.pop().map(RawInput::SingleFile),
        _ => Some(RawInput::FileBatch(files)),
    }
}

/// Pick at most one input from a paste.
///
/// The first item whose MIME type mentions "image" wins. Only when no image
/// is present is the text considered, and only if it starts with an
/// `http://` or `https://` scheme.
pub fn from_clipboard(clipboard: ClipboardData) -> Option<RawInput> {
    let ClipboardData { items, text } = clipboard;

    if let Some(item) = items.into_iter().find(|item| item.mime.contains("image")) {
        match item.file {
            Some(file) => return Some(RawInput::SingleFile(file)),
            None => tracing::debug!(mime = %item.mime, "clipboard image item has no file data"),
        }
    }

    if text.starts_with("http://") || text.starts_with("https://") {
        return Some(RawInput::UrlText(text));
    }
    None
}
