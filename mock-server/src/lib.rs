use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 << 20;

/// Backend behavior knobs. Read from `MOCK_*` environment variables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Largest accepted single file; bigger parts get 413.
    pub max_upload_bytes: usize,
    /// Answer successful uploads with a 303 to the result instead of a body.
    pub redirect: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            redirect: false,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Env::prefixed("MOCK_"))
            .extract()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stored {
    File {
        name: String,
        mime: String,
        data: Bytes,
    },
    Link(String),
    /// Several files uploaded in one request.
    Group(Vec<Uuid>),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UploadResult {
    pub url: String,
}

#[derive(Deserialize)]
struct UrlUpload {
    #[serde(default)]
    url: String,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Stored>>>;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub settings: Settings,
}

pub fn app() -> Router {
    app_with(Settings::default())
}

pub fn app_with(settings: Settings) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(HashMap::new())),
        settings,
    };
    Router::new()
        .route("/upload", post(upload))
        .route("/url", post(url_upload))
        .route("/i/{id}", get(serve_upload))
        .route("/g/{id}", get(serve_group))
        .route("/livez", get(health))
        .route("/readyz", get(health))
        // Part size is enforced per file in `upload`.
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Settings::default()).await
}

pub async fn run_with(listener: TcpListener, settings: Settings) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(settings)).await
}

/// Plain-text failure, newline-terminated like the production backend.
fn failure(status: StatusCode, message: &str) -> Response {
    (status, format!("{message}\n")).into_response()
}

fn location(headers: &HeaderMap, prefix: &str, id: Uuid) -> String {
    match headers.get(header::HOST).and_then(|h| h.to_str().ok()) {
        Some(host) => format!("http://{host}{prefix}{id}"),
        None => format!("{prefix}{id}"),
    }
}

/// Reply with the result location in the shape the client asked for.
fn respond(headers: &HeaderMap, settings: &Settings, url: String) -> Response {
    if settings.redirect {
        return Redirect::to(&url).into_response();
    }
    let wants_json = headers
        .get(header::ACCEPT)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|accept| accept == "application/json");
    if wants_json {
        Json(UploadResult { url }).into_response()
    } else {
        (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("{url}\n"),
        )
            .into_response()
    }
}

async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "not a multipart body");
            return failure(StatusCode::BAD_REQUEST, "Error retrieving the file");
        }
    };
    let mut files = Vec::new();
    loop {
        let mut field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                tracing::debug!(error = %err, "malformed multipart body");
                return failure(StatusCode::BAD_REQUEST, "Error retrieving the file");
            }
        };
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or("upload").to_string();
        let mime = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let mut data = Vec::new();
        loop {
            match field.chunk().await {
                Ok(Some(chunk)) => {
                    if data.len() + chunk.len() > state.settings.max_upload_bytes {
                        tracing::info!(
                            %name,
                            limit = state.settings.max_upload_bytes,
                            "rejecting oversized file"
                        );
                        return failure(StatusCode::PAYLOAD_TOO_LARGE, "File too large");
                    }
                    data.extend_from_slice(&chunk);
                }
                Ok(None) => break,
                Err(err) => {
                    tracing::debug!(error = %err, "failed reading file part");
                    return failure(StatusCode::BAD_REQUEST, "Error retrieving the file");
                }
            }
        }
        files.push(Stored::File {
            name,
            mime,
            data: Bytes::from(data),
        });
    }

    if files.is_empty() {
        return failure(StatusCode::BAD_REQUEST, "Error retrieving the file");
    }

    let mut db = state.db.write().await;
    let url = if files.len() == 1 {
        let id = Uuid::new_v4();
        db.insert(id, files.remove(0));
        location(&headers, "/i/", id)
    } else {
        let ids: Vec<Uuid> = files
            .into_iter()
            .map(|file| {
                let id = Uuid::new_v4();
                db.insert(id, file);
                id
            })
            .collect();
        let group = Uuid::new_v4();
        tracing::info!(%group, files = ids.len(), "stored upload batch");
        db.insert(group, Stored::Group(ids));
        location(&headers, "/g/", group)
    };
    drop(db);

    respond(&headers, &state.settings, url)
}

async fn url_upload(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let Ok(input) = serde_json::from_slice::<UrlUpload>(&body) else {
        return failure(StatusCode::BAD_REQUEST, "Invalid JSON request body");
    };
    if input.url.is_empty() {
        return failure(StatusCode::BAD_REQUEST, "URL is required");
    }
    if !(input.url.starts_with("http://") || input.url.starts_with("https://")) {
        return failure(StatusCode::BAD_REQUEST, "Only HTTP and HTTPS URLs are allowed");
    }

    let id = Uuid::new_v4();
    tracing::info!(%id, url = %input.url, "stored link");
    state.db.write().await.insert(id, Stored::Link(input.url));
    respond(&headers, &state.settings, location(&headers, "/i/", id))
}

async fn serve_upload(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.db.read().await.get(&id) {
        Some(Stored::File { mime, data, .. }) => {
            ([(header::CONTENT_TYPE, mime.clone())], data.clone()).into_response()
        }
        Some(Stored::Link(url)) => format!("{url}\n").into_response(),
        Some(Stored::Group(_)) | None => failure(StatusCode::NOT_FOUND, "Not Found"),
    }
}

async fn serve_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    match state.db.read().await.get(&id) {
        Some(Stored::Group(ids)) => {
            let urls: Vec<String> = ids.iter().map(|id| location(&headers, "/i/", *id)).collect();
            Json(urls).into_response()
        }
        _ => failure(StatusCode::NOT_FOUND, "Not Found"),
    }
}

async fn health() -> &'static str {
    "ok"
}
