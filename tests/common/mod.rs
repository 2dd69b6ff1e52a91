//! In-process stand-ins for the info APIs

#![allow(dead_code)]

use axum::{routing::post, Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Backend answering every `/info` call with the same document.
pub async fn fixed_backend(body: Value) -> String {
    let app = Router::new().route(
        "/info",
        post(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    );
    serve(app).await
}

/// Backend answering every `/info` call with the request body it received.
pub async fn echo_backend() -> String {
    let app = Router::new().route(
        "/info",
        post(|Json(payload): Json<Value>| async move { Json(payload) }),
    );
    serve(app).await
}

/// Backend answering with a plain-text body.
pub async fn text_backend(body: &'static str) -> String {
    let app = Router::new().route("/info", post(move || async move { body }));
    serve(app).await
}
