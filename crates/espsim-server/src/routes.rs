//! Request routing: `/heap`, websocket upgrades, then static assets.
//!
//! The routing table is explicit and ordered: the heap probe is matched
//! first, everything else falls through to a dispatcher that turns upgrade
//! requests into echo channels and serves the rest from the content root.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    extract::{ConnectInfo, FromRequestParts, Request, State, WebSocketUpgrade},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use espsim_assets::{Asset, AssetStore};
use espsim_channel::run_channel;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::heap;

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Static asset resolver.
    pub assets: Arc<AssetStore>,
}

/// Build the routing table.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/heap", get(heap_handler))
        .fallback(dispatch)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Human-readable free-memory probe, mirroring the device's heap report.
async fn heap_handler() -> String {
    let free = heap::available_memory();
    tracing::info!("/heap => {free} bytes free");
    heap::human_size(free)
}

/// Default route: websocket upgrades become echo channels, anything else
/// is served from the content root.
async fn dispatch(
    State(state): State<AppState>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    request: Request,
) -> Response {
    let path = request.uri().path().to_owned();
    tracing::info!("{path}");

    if wants_upgrade(request.headers()) {
        let (mut parts, _body) = request.into_parts();
        return match WebSocketUpgrade::from_request_parts(&mut parts, &state).await {
            Ok(upgrade) => upgrade
                .on_upgrade(move |socket| run_channel(socket, remote))
                .into_response(),
            Err(rejection) => rejection.into_response(),
        };
    }

    serve_asset(&state.assets, &path).await
}

/// An upgrade request carries `Upgrade: websocket`, on any path.
fn wants_upgrade(headers: &HeaderMap) -> bool {
    headers
        .get(header::UPGRADE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.eq_ignore_ascii_case("websocket"))
}

/// Serve one static asset, mapping the store's outcomes onto HTTP.
///
/// A missing file already resolved to the fallback body upstream and is
/// still a 200 here; only a failed read becomes a 500.
async fn serve_asset(assets: &AssetStore, path: &str) -> Response {
    match assets.fetch(path).await {
        Ok(Asset {
            media_type,
            encoding,
            bytes,
            ..
        }) => {
            let mut response = bytes.into_response();
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(media_type));
            if let Some(encoding) = encoding {
                response
                    .headers_mut()
                    .insert(header::CONTENT_ENCODING, HeaderValue::from_static(encoding));
            }
            response
        }
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!(
                "Sorry, check with the site admin for error: {} ..\n",
                err.source.kind()
            ),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use axum::{
        body::Body,
        extract::connect_info::MockConnectInfo,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    fn test_app(root: &Path) -> Router {
        let state = AppState {
            assets: Arc::new(AssetStore::new(root, "index.htm", "404.html")),
        };
        router(state).layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4321))))
    }

    async fn get_response(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_bytes(resp: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(resp.into_body(), 64 * 1024)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn root_serves_default_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.htm"), b"<html>home</html>").unwrap();

        let resp = get_response(test_app(dir.path()), "/").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        assert_eq!(body_bytes(resp).await, b"<html>home</html>");
    }

    #[tokio::test]
    async fn root_and_named_default_document_are_identical() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.htm"), b"<html>same</html>").unwrap();

        let app = test_app(dir.path());
        let by_root = body_bytes(get_response(app.clone(), "/").await).await;
        let by_name = body_bytes(get_response(app, "/index.htm").await).await;
        assert_eq!(by_root, by_name);
    }

    #[tokio::test]
    async fn missing_file_is_200_with_fallback_body() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("404.html"), b"<html>gone</html>").unwrap();

        let resp = get_response(test_app(dir.path()), "/missing.htm").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_bytes(resp).await, b"<html>gone</html>");
    }

    #[tokio::test]
    async fn extension_drives_content_type() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("style.css"), b"body{}").unwrap();

        let resp = get_response(test_app(dir.path()), "/style.css").await;
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            "text/css; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn gz_sibling_carries_encoding_header() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.js.gz"), b"compressed").unwrap();

        let resp = get_response(test_app(dir.path()), "/app.js").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_ENCODING], "gzip");
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            "text/javascript; charset=utf-8"
        );
        assert_eq!(body_bytes(resp).await, b"compressed");
    }

    #[tokio::test]
    async fn unreadable_path_is_500_with_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        // Reading a directory fails with something other than NotFound.
        std::fs::create_dir(dir.path().join("data")).unwrap();

        let resp = get_response(test_app(dir.path()), "/data").await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = String::from_utf8(body_bytes(resp).await).unwrap();
        assert!(body.starts_with("Sorry, check with the site admin for error:"));
    }

    #[tokio::test]
    async fn heap_reports_scaled_size() {
        let dir = tempfile::tempdir().unwrap();

        let resp = get_response(test_app(dir.path()), "/heap").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = String::from_utf8(body_bytes(resp).await).unwrap();

        let (number, unit) = body.rsplit_once(' ').expect("number and unit");
        assert!(["B", "kB", "MB", "GB", "TB"].contains(&unit), "unit {unit}");
        number.parse::<f64>().expect("numeric prefix");
        if unit == "B" {
            assert!(!number.contains('.'));
        } else {
            assert_eq!(number.split('.').nth(1).map(str::len), Some(1));
        }
    }

    #[tokio::test]
    async fn malformed_upgrade_is_rejected() {
        let dir = tempfile::tempdir().unwrap();

        // Upgrade header without the rest of the websocket handshake: the
        // dispatcher must route it to the channel and reject it there, not
        // serve a file.
        let req = Request::builder()
            .uri("/any/path")
            .header(header::UPGRADE, "websocket")
            .header(header::CONNECTION, "upgrade")
            .body(Body::empty())
            .unwrap();
        let resp = test_app(dir.path()).oneshot(req).await.unwrap();
        assert!(resp.status().is_client_error());
    }
}
