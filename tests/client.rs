mod common;

use serde_json::json;
use shapediff::client::InfoClient;
use shapediff::payload::InfoRequest;
use shapediff::Error;

#[tokio::test]
async fn posts_payload_as_json() {
    let url = common::echo_backend().await;
    let client = InfoClient::new("echo", &url).unwrap();

    let payload = InfoRequest::new("fundingHistory")
        .coin("BTC")
        .start_time(1758460545000);
    let body = client.info(&payload).await.unwrap();

    assert_eq!(
        body,
        json!({"type": "fundingHistory", "coin": "BTC", "startTime": 1758460545000i64})
    );
}

#[tokio::test]
async fn trims_trailing_slash() {
    let url = common::fixed_backend(json!({"BTC": "1"})).await;
    let client = InfoClient::new("fixed", &format!("{url}/")).unwrap();
    assert_eq!(client.base_url(), url);

    let body = client.info(&InfoRequest::new("allMids")).await.unwrap();
    assert_eq!(body, json!({"BTC": "1"}));
}

#[tokio::test]
async fn non_json_body_is_a_decode_error() {
    let url = common::text_backend("internal error").await;
    let client = InfoClient::new("Ambient", &url).unwrap();

    let err = client.info(&InfoRequest::new("meta")).await.unwrap_err();
    match err {
        Error::Decode { backend, .. } => assert_eq!(backend, "Ambient"),
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = InfoClient::new("gone", &format!("http://{addr}")).unwrap();
    let err = client.info(&InfoRequest::new("meta")).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "{err:?}");
}
