//! Upload request builder.
//!
//! # Design
//! `UploadRequest::from_raw` turns a `RawInput` into a payload;
//! `IntakeClient::build_request` binds it to an endpoint and headers. Neither
//! validates size, type or URL shape: the backend owns those checks, so
//! malformed inputs are forwarded as-is and construction cannot fail.

use crate::config::IntakeConfig;
use crate::http::{HttpMethod, HttpRequest, Multipart, RequestBody};
use crate::types::{RawInput, UploadKind, UrlUpload};

const FILE_FIELD: &str = "file";
const JSON: &str = "application/json";

/// Payload of an `UploadRequest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPayload {
    Multipart(Multipart),
    Json(UrlUpload),
}

/// A transport-ready upload. Consumed once by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    kind: UploadKind,
    payload: UploadPayload,
}

impl UploadRequest {
    pub fn from_raw(input: RawInput) -> Self {
        match input {
            RawInput::SingleFile(file) => {
                let mut form = Multipart::new();
                form.push(FILE_FIELD, file);
                Self::files(form)
            }
            RawInput::FileBatch(files) => {
                let mut form = Multipart::new();
                for file in files {
                    form.push(FILE_FIELD, file);
                }
                Self::files(form)
            }
            RawInput::UrlText(url) => Self {
                kind: UploadKind::UrlUpload,
                payload: UploadPayload::Json(UrlUpload { url }),
            },
        }
    }

    fn files(form: Multipart) -> Self {
        Self {
            kind: UploadKind::FileUpload,
            payload: UploadPayload::Multipart(form),
        }
    }

    pub fn kind(&self) -> UploadKind {
        self.kind
    }

    pub fn payload(&self) -> &UploadPayload {
        &self.payload
    }
}

/// Stateless builder binding uploads to the configured endpoints.
#[derive(Debug, Clone)]
pub struct IntakeClient {
    upload_endpoint: String,
    url_endpoint: String,
}

impl IntakeClient {
    pub fn new(config: &IntakeConfig) -> Self {
        Self {
            upload_endpoint: config.upload_endpoint(),
            url_endpoint: config.url_endpoint(),
        }
    }

    /// Build the HTTP request for `request`.
    ///
    /// Multipart requests deliberately omit `Content-Type` so the host can
    /// attach its own boundary.
    pub fn build_request(&self, request: UploadRequest) -> HttpRequest {
        let mut headers = vec![("accept".to_string(), JSON.to_string())];
        let (path, body) = match request.payload {
            UploadPayload::Multipart(form) => {
                (self.upload_endpoint.clone(), RequestBody::Multipart(form))
            }
            UploadPayload::Json(upload) => {
                headers.push(("content-type".to_string(), JSON.to_string()));
                let body = serde_json::json!({ "url": upload.url }).to_string();
                (self.url_endpoint.clone(), RequestBody::Json(body))
            }
        };
        HttpRequest {
            method: HttpMethod::Post,
            path,
            headers,
            body,
        }
    }

    pub fn build(&self, input: RawInput) -> HttpRequest {
        self.build_request(UploadRequest::from_raw(input))
    }
}
