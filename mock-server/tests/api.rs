use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Settings, UploadResult};
use tower::ServiceExt;

const BOUNDARY: &str = "test-boundary";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

async fn body_text(response: axum::response::Response) -> String {
    String::from_utf8(body_bytes(response).await.to_vec()).unwrap()
}

/// `(field, filename, content)` triples as a multipart body.
fn multipart_body(parts: &[(&str, &str, &str)]) -> String {
    let mut body = String::new();
    for (field, filename, content) in parts {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: text/plain\r\n\r\n{content}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    body
}

fn upload_request(parts: &[(&str, &str, &str)], accept: Option<&str>) -> Request<String> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(http::header::HOST, "localhost:3000")
        .header(
            http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(accept) = accept {
        builder = builder.header(http::header::ACCEPT, accept);
    }
    builder.body(multipart_body(parts)).unwrap()
}

fn url_request(body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri("/url")
        .header(http::header::HOST, "localhost:3000")
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::ACCEPT, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(http::header::HOST, "localhost:3000")
        .body(String::new())
        .unwrap()
}

// --- upload ---

#[tokio::test]
async fn upload_single_file_returns_json_location() {
    let resp = app()
        .oneshot(upload_request(
            &[("file", "a.txt", "hello")],
            Some("application/json"),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let result: UploadResult = body_json(resp).await;
    assert!(result.url.starts_with("http://localhost:3000/i/"));
}

#[tokio::test]
async fn upload_without_json_accept_returns_plain_text() {
    let resp = app()
        .oneshot(upload_request(&[("file", "a.txt", "hello")], None))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let text = body_text(resp).await;
    assert!(text.starts_with("http://localhost:3000/i/"));
    assert!(text.ends_with('\n'));
}

#[tokio::test]
async fn upload_without_file_field_returns_400() {
    let resp = app()
        .oneshot(upload_request(
            &[("other", "a.txt", "hello")],
            Some("application/json"),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(resp).await, "Error retrieving the file\n");
}

#[tokio::test]
async fn upload_without_multipart_body_returns_400() {
    let cases = [
        Some("application/json"),
        Some("multipart/form-data"),
        None,
    ];
    for content_type in cases {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/upload")
            .header(http::header::HOST, "localhost:3000");
        if let Some(content_type) = content_type {
            builder = builder.header(http::header::CONTENT_TYPE, content_type);
        }
        let resp = app()
            .oneshot(builder.body(r#"{"url":"https://example.com"}"#.to_string()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{content_type:?}");
        assert_eq!(
            body_text(resp).await,
            "Error retrieving the file\n",
            "{content_type:?}"
        );
    }
}

#[tokio::test]
async fn oversized_file_returns_413() {
    let settings = Settings {
        max_upload_bytes: 4,
        ..Default::default()
    };
    let resp = app_with(settings)
        .oneshot(upload_request(
            &[("file", "big.txt", "way more than four bytes")],
            Some("application/json"),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body_text(resp).await, "File too large\n");
}

#[tokio::test]
async fn redirect_mode_answers_303() {
    let settings = Settings {
        redirect: true,
        ..Default::default()
    };
    let resp = app_with(settings)
        .oneshot(upload_request(
            &[("file", "a.txt", "hello")],
            Some("application/json"),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp.headers()[http::header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("http://localhost:3000/i/"));
}

// --- url ---

#[tokio::test]
async fn url_upload_returns_json_location() {
    let resp = app()
        .oneshot(url_request(r#"{"url":"https://example.com/a.png"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let result: UploadResult = body_json(resp).await;
    assert!(result.url.starts_with("http://localhost:3000/i/"));
}

#[tokio::test]
async fn url_upload_rejections() {
    let cases = [
        ("not json", "Invalid JSON request body\n"),
        (r#"{"url":""}"#, "URL is required\n"),
        (r#"{}"#, "URL is required\n"),
        (
            r#"{"url":"ftp://example.com/a"}"#,
            "Only HTTP and HTTPS URLs are allowed\n",
        ),
    ];
    for (body, expected) in cases {
        let resp = app().oneshot(url_request(body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(body_text(resp).await, expected, "{body}");
    }
}

// --- serving ---

#[tokio::test]
async fn unknown_upload_returns_404() {
    let resp = app()
        .oneshot(get("/i/00000000-0000-0000-0000-000000000000"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_endpoints_answer_ok() {
    for uri in ["/livez", "/readyz"] {
        let resp = app().oneshot(get(uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_text(resp).await, "ok");
    }
}

// --- full upload lifecycle ---

#[tokio::test]
async fn upload_then_serve_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // single file
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(upload_request(
            &[("file", "note.txt", "remember the milk")],
            Some("application/json"),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let single: UploadResult = body_json(resp).await;
    let path = single.url.trim_start_matches("http://localhost:3000");

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(path))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[http::header::CONTENT_TYPE], "text/plain");
    assert_eq!(body_bytes(resp).await.as_ref(), b"remember the milk");

    // batch of three in one request
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(upload_request(
            &[("file", "1.txt", "one"), ("file", "2.txt", "two"), ("file", "3.txt", "three")],
            Some("application/json"),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let batch: UploadResult = body_json(resp).await;
    assert!(batch.url.starts_with("http://localhost:3000/g/"));

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(batch.url.trim_start_matches("http://localhost:3000")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let members: Vec<String> = body_json(resp).await;
    assert_eq!(members.len(), 3);

    // members keep upload order
    let mut contents = Vec::new();
    for member in &members {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(get(member.trim_start_matches("http://localhost:3000")))
            .await
            .unwrap();
        contents.push(body_text(resp).await);
    }
    assert_eq!(contents, ["one", "two", "three"]);
}
