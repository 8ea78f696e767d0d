// src/api/handlers.rs

use crate::api::{auth, types::*, ApiState};
use crate::assets::AssetName;
use crate::infra::errors::LucenceError;
use axum::body::Body;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Query, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tokio_util::io::ReaderStream;

/// Multipart field carrying the uploaded script.
pub const UPLOAD_FIELD: &str = "pluginFilePart";

fn query_failure<T>(rejection: QueryRejection) -> ApiResponse<T> {
    ApiResponse::fail(rejection.body_text())
}

/// GET /plugin/get?pluginName=<name> — Stream `<name>.js` back to the client.
pub async fn get_plugin(
    State(state): State<ApiState>,
    query: Result<Query<PluginQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return query_failure::<()>(rejection).into_response(),
    };

    let path = match state.assets.fetch_script_path(&query.plugin_name) {
        Ok(path) => path,
        Err(e) => return ApiResponse::<()>::from_error(&e).into_response(),
    };

    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let err = LucenceError::NotFound {
                name: query.plugin_name,
            };
            return ApiResponse::<()>::from_error(&err).into_response();
        }
        Err(e) => {
            tracing::warn!("Could not open {}: {}", path.display(), e);
            return ApiResponse::<()>::from_error(&LucenceError::Io(e)).into_response();
        }
    };

    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        Body::from_stream(ReaderStream::new(file)),
    )
        .into_response()
}

/// POST /plugin/upload — Store the script in the `pluginFilePart` field.
pub async fn upload_plugin(
    State(state): State<ApiState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> ApiResponse<()> {
    if let Err(denied) = auth::check_auth(&state, &headers) {
        return denied;
    }

    loop {
        let mut field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return ApiResponse::fail(format!("Malformed multipart body: {}", e.body_text()));
            }
        };
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let Some(filename) = field.file_name().map(str::to_string) else {
            return ApiResponse::fail("Uploaded part has no file name");
        };
        let name = match AssetName::from_filename(&filename) {
            Ok(name) => name,
            Err(e) => return ApiResponse::from_error(&e),
        };

        // Chunks go straight to the staged temp file; returning early drops it.
        let mut upload = match state.assets.begin_upload(name.as_str()).await {
            Ok(upload) => upload,
            Err(denied) => return denied,
        };
        loop {
            match field.chunk().await {
                Ok(Some(chunk)) => {
                    if let Err(e) = upload.write_chunk(&chunk).await {
                        tracing::warn!("Writing upload {} failed: {}", filename, e);
                        return ApiResponse::from_error(&e);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    return ApiResponse::fail(format!("Failed to read upload: {}", e.body_text()));
                }
            }
        }

        tracing::debug!("Received {} ({} bytes)", filename, upload.received());
        return upload.finish().await;
    }

    ApiResponse::fail(format!("Missing multipart field '{UPLOAD_FIELD}'"))
}

/// POST|DELETE /plugin/delete?pluginName=<name> — Remove a script if present.
pub async fn delete_plugin(
    State(state): State<ApiState>,
    headers: HeaderMap,
    query: Result<Query<PluginQuery>, QueryRejection>,
) -> ApiResponse<()> {
    if let Err(denied) = auth::check_auth(&state, &headers) {
        return denied;
    }
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return query_failure(rejection),
    };

    state.assets.delete_script(&query.plugin_name).await
}

/// GET /plugin/list — Names of all stored scripts.
pub async fn list_plugins(State(state): State<ApiState>) -> ApiResponse<Vec<AssetName>> {
    match state.assets.list_scripts().await {
        Ok(names) => ApiResponse::success_with("SUCCESS", names),
        Err(e) => {
            tracing::warn!("Listing plugins failed: {}", e);
            ApiResponse::from_error(&e)
        }
    }
}

/// GET /head?context=<ctx> — Markup to add to the head of a document
/// rendered under `ctx`.
pub async fn head_fragments(
    State(state): State<ApiState>,
    query: Result<Query<HeadQuery>, QueryRejection>,
) -> ApiResponse<HeadInjection> {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return query_failure(rejection),
    };

    let selected = state.head.decide(&query.context);
    let injection = HeadInjection {
        fragments: selected.iter().map(|f| f.name.clone()).collect(),
        markup: selected.iter().map(|f| f.markup.as_str()).collect(),
        context: query.context,
    };
    ApiResponse::success_with("SUCCESS", injection)
}

/// GET /health — Simple health check.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
