//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. The core builds `HttpRequest`
//! values and classifies `HttpResponse` values without ever touching the
//! network; the host (a browser `fetch`, a native HTTP client, a test
//! harness) executes the round-trip.
//!
//! Multipart bodies are kept as a list of parts rather than encoded bytes so
//! that a host with a native form-data type can pick its own boundary. Hosts
//! without one call [`Multipart::encode`].

use uuid::Uuid;

use crate::types::FileBlob;

/// HTTP method for a request. Both upload endpoints only accept POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
        }
    }
}

/// One named part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file: FileBlob,
}

/// Ordered multipart form body. Part order is wire order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Multipart {
    parts: Vec<FilePart>,
}

impl Multipart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, file: FileBlob) {
        self.parts.push(FilePart {
            field: field.to_string(),
            file,
        });
    }

    pub fn parts(&self) -> &[FilePart] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// A fresh boundary that will not collide with typical payloads.
    pub fn new_boundary() -> String {
        format!("----intake-{}", Uuid::new_v4().simple())
    }

    /// `Content-Type` header value for a body encoded with `boundary`.
    pub fn content_type(boundary: &str) -> String {
        format!("multipart/form-data; boundary={boundary}")
    }

    /// Encode as `multipart/form-data` wire bytes.
    pub fn encode(&self, boundary: &str) -> Vec<u8> {
        let mut out = Vec::new();
        for part in &self.parts {
            out.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
            out.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    escape_quoted(&part.field),
                    escape_quoted(&part.file.name)
                )
                .as_bytes(),
            );
            out.extend_from_slice(
                format!("Content-Type: {}\r\n\r\n", part.file.mime_or_default()).as_bytes(),
            );
            out.extend_from_slice(&part.file.data);
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
        out
    }
}

fn escape_quoted(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace(['\r', '\n'], " ")
}

/// Request payload, left unencoded where the host should choose framing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Multipart(Multipart),
    Json(String),
}

/// An HTTP request described as plain data.
///
/// Built by `IntakeClient::build_request`. Multipart requests carry no
/// `Content-Type` header; the host sets it together with the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// `url` is the final location after any redirects the host followed, and
/// `redirected` records whether it followed one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub url: String,
    pub redirected: bool,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(name: &str, data: &str) -> FileBlob {
        FileBlob::new(name, "text/plain", data.as_bytes().to_vec())
    }

    #[test]
    fn encode_keeps_part_order_and_terminates() {
        let mut form = Multipart::new();
        form.push("file", blob("a.txt", "alpha"));
        form.push("file", blob("b.txt", "beta"));
        let wire = String::from_utf8(form.encode("XYZ")).unwrap();

        let a = wire.find("filename=\"a.txt\"").unwrap();
        let b = wire.find("filename=\"b.txt\"").unwrap();
        assert!(a < b);
        assert_eq!(wire.matches("--XYZ\r\n").count(), 2);
        assert!(wire.ends_with("--XYZ--\r\n"));
        assert!(wire.contains("Content-Type: text/plain\r\n\r\nalpha\r\n"));
    }

    #[test]
    fn encode_escapes_quotes_in_filenames() {
        let mut form = Multipart::new();
        form.push("file", blob("we\"ird.txt", "x"));
        let wire = String::from_utf8(form.encode("B")).unwrap();
        assert!(wire.contains("filename=\"we\\\"ird.txt\""));
    }

    #[test]
    fn boundaries_are_unique() {
        assert_ne!(Multipart::new_boundary(), Multipart::new_boundary());
        assert_eq!(
            Multipart::content_type("abc"),
            "multipart/form-data; boundary=abc"
        );
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let req = HttpRequest {
            method: HttpMethod::Post,
            path: "/url".to_string(),
            headers: vec![("accept".to_string(), "application/json".to_string())],
            body: RequestBody::Json("{}".to_string()),
        };
        assert_eq!(req.header("Accept"), Some("application/json"));
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn success_range_is_2xx() {
        let mut response = HttpResponse {
            status: 204,
            ..Default::default()
        };
        assert!(response.is_success());
        response.status = 301;
        assert!(!response.is_success());
        response.status = 199;
        assert!(!response.is_success());
    }
}
