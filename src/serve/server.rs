// src/serve/server.rs

use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use futures_util::{SinkExt, StreamExt};
use tracing::{debug, info};

use crate::serve::reload::{ReloadHub, ReloadMessage};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,

    /// Port to bind to.
    pub port: u16,

    /// Directory served as the site root (the build output root).
    pub root: PathBuf,
}

/// Server state shared across handlers.
#[derive(Clone)]
struct ServeState {
    hub: ReloadHub,
    root: PathBuf,
}

/// Serve the output directory with live reload until the process exits.
pub async fn serve(config: ServerConfig, hub: ReloadHub) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", config.host, config.port))?;

    let state = ServeState {
        hub,
        root: config.root.clone(),
    };

    let app = Router::new()
        .route("/__reload", get(reload_websocket_handler))
        .route("/__reload.js", get(reload_client_js))
        .fallback(static_handler)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding dev server to {addr}"))?;

    info!("dev server running on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}

/// WebSocket handler for the reload channel.
async fn reload_websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<ServeState>,
) -> Response {
    ws.on_upgrade(|socket| reload_websocket(socket, state))
}

/// Handle one reload WebSocket connection.
async fn reload_websocket(socket: WebSocket, state: ServeState) {
    info!("live-reload client connected");

    let (mut sender, mut receiver) = socket.split();
    let mut rx = state.hub.subscribe();

    if let Ok(json) = serde_json::to_string(&ReloadMessage::Connected) {
        let _ = sender.send(Message::Text(json.into())).await;
    }

    // Forward broadcast messages to this client.
    let send_task = tokio::spawn(async move {
        while let Ok(msg) = rx.recv().await {
            let Ok(json) = serde_json::to_string(&msg) else {
                continue;
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    // Handle incoming messages from the client (close, ping/pong).
    let recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if matches!(msg, Message::Close(_)) {
                break;
            }
        }
    });

    tokio::select! {
        _ = send_task => {},
        _ = recv_task => {},
    }

    info!("live-reload client disconnected");
}

/// Serve the small reload client script.
async fn reload_client_js() -> Response {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        RELOAD_CLIENT_JS,
    )
        .into_response()
}

/// Static file handler over the output root.
///
/// HTML responses get the reload client injected so every served page
/// connects to the reload channel.
async fn static_handler(State(state): State<ServeState>, uri: Uri) -> Response {
    let requested = uri.path().trim_start_matches('/');
    let requested = if requested.is_empty() {
        "index.html"
    } else {
        requested
    };
    debug!(path = %requested, "serving");

    let Some(mut file_path) = sanitize(&state.root, requested) else {
        return (StatusCode::BAD_REQUEST, "invalid path").into_response();
    };

    if file_path.is_dir() {
        file_path = file_path.join("index.html");
    }

    match tokio::fs::read(&file_path).await {
        Ok(content) => {
            let content_type = guess_content_type(&file_path);
            if content_type.starts_with("text/html") {
                let html = inject_reload_client(&String::from_utf8_lossy(&content));
                ([(header::CONTENT_TYPE, content_type)], html).into_response()
            } else {
                ([(header::CONTENT_TYPE, content_type)], content).into_response()
            }
        }
        Err(_) => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}

/// Resolve a request path under `root`, rejecting anything that is not a
/// plain sequence of normal components (no `..`, no absolute paths).
fn sanitize(root: &Path, rel: &str) -> Option<PathBuf> {
    let rel_path = Path::new(rel);
    for comp in rel_path.components() {
        match comp {
            Component::Normal(_) => {}
            _ => return None,
        }
    }
    Some(root.join(rel_path))
}

/// Insert the reload client script tag, before `</body>` when present.
fn inject_reload_client(html: &str) -> String {
    const TAG: &str = "<script src=\"/__reload.js\"></script>";

    match html.rfind("</body>") {
        Some(idx) => {
            let mut out = String::with_capacity(html.len() + TAG.len());
            out.push_str(&html[..idx]);
            out.push_str(TAG);
            out.push_str(&html[idx..]);
            out
        }
        None => format!("{html}{TAG}"),
    }
}

/// Guess content type from file extension.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") | Some("mjs") => "application/javascript; charset=utf-8",
        Some("json") | Some("map") => "application/json; charset=utf-8",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        _ => "application/octet-stream",
    }
}

const RELOAD_CLIENT_JS: &str = r#"// sitebake live-reload client
(function() {
  if (typeof window === 'undefined') return;

  var protocol = window.location.protocol === 'https:' ? 'wss:' : 'ws:';
  var ws = new WebSocket(protocol + '//' + window.location.host + '/__reload');

  ws.onmessage = function(event) {
    var message = JSON.parse(event.data);
    if (message.type === 'reload') {
      console.log('[sitebake] ' + message.category + ' rebuilt, reloading');
      window.location.reload();
    }
  };

  ws.onclose = function() {
    console.log('[sitebake] reload channel closed, retrying in 1s');
    setTimeout(function() { window.location.reload(); }, 1000);
  };
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_rejects_traversal() {
        let root = Path::new("/srv/out");
        assert!(sanitize(root, "../etc/passwd").is_none());
        assert!(sanitize(root, "a/../../b").is_none());
        assert_eq!(
            sanitize(root, "css/style.min.css"),
            Some(PathBuf::from("/srv/out/css/style.min.css"))
        );
    }

    #[test]
    fn reload_client_is_injected_before_body_close() {
        let html = "<html><body><p>x</p></body></html>";
        let out = inject_reload_client(html);
        assert!(out.contains("<script src=\"/__reload.js\"></script></body>"));
    }
}
