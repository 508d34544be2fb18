//! End-to-end push/scrape through the axum router.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use tower::ServiceExt; // for `oneshot`

use pushgate_core::{BufferManager, MAX_RETRY};
use pushgate_gateway::{app_state::AppState, config, router};

fn app_with(yaml: &str) -> (Router, Arc<BufferManager>) {
    let cfg = config::load_from_str(yaml).unwrap();
    let buffer = Arc::new(BufferManager::new());
    let state = AppState::with_buffer(cfg, Arc::clone(&buffer));
    (router::build_router(state), buffer)
}

fn app() -> (Router, Arc<BufferManager>) {
    app_with("version: 1\n")
}

async fn push(app: &Router, body: impl Into<Body>) -> Response {
    let req = Request::builder()
        .method("POST")
        .uri("/push")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(body.into())
        .unwrap();
    app.clone().oneshot(req).await.unwrap()
}

async fn scrape(app: &Router) -> (StatusCode, Option<String>, Vec<u8>) {
    let req = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let ctype = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, ctype, body.to_vec())
}

#[tokio::test]
async fn end_to_end_push_scrape_scrape_empty() {
    let (app, _) = app();
    let sample = "my_metric{label=\"test\"} 1\n";

    let resp = push(&app, sample).await;
    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    let body = body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert!(body.is_empty());

    let (status, ctype, body) = scrape(&app).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ctype.as_deref(), Some("text/plain; version=0.0.4"));
    assert_eq!(body, sample.as_bytes());

    let (status, _, body) = scrape(&app).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[tokio::test]
async fn pushes_accumulate_until_scraped() {
    let (app, _) = app();
    push(&app, "a 1\n").await;
    push(&app, "# TYPE b counter\nb_total 2\n").await;

    let (_, _, body) = scrape(&app).await;
    assert_eq!(body, b"a 1\n# TYPE b counter\nb_total 2\n");
}

#[tokio::test]
async fn push_rejects_invalid_exposition() {
    let (app, buffer) = app();
    push(&app, "ok 1\n").await;

    for bad in ["metric 1 123456\n", "9bad 1\n"] {
        let resp = push(&app, bad).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["error"], "BAD_REQUEST");
    }

    assert_eq!(buffer.len(), 5);
    assert_eq!(buffer.failures(), 0);
}

#[tokio::test]
async fn push_requires_post() {
    let (app, buffer) = app();
    let req = Request::builder().uri("/push").body(Body::from("a 1\n")).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(buffer.is_empty());
}

#[tokio::test]
async fn push_over_body_limit_is_rejected() {
    let (app, buffer) = app_with(
        r#"
version: 1
gateway:
  max_push_bytes: 1024
"#,
    );
    let big = "m 1\n".repeat(512);
    let resp = push(&app, big).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(buffer.is_empty());
}

#[tokio::test]
async fn oversized_buffer_is_discarded_after_max_retry_scrapes() {
    let (app, buffer) = app_with(
        r#"
version: 1
gateway:
  max_push_bytes: 1024
  max_scrape_bytes: 1024
"#,
    );
    let chunk = "m 1\n".repeat(150);
    for _ in 0..3 {
        assert_eq!(push(&app, chunk.clone()).await.status(), StatusCode::ACCEPTED);
    }
    assert_eq!(buffer.len(), 1800);

    for attempt in 1..=MAX_RETRY {
        let (status, _, body) = scrape(&app).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.is_empty());
        if attempt < MAX_RETRY {
            assert_eq!(buffer.len(), 1800);
            assert_eq!(buffer.failures(), attempt);
        }
    }
    assert_eq!(buffer.len(), 0);
    assert_eq!(buffer.failures(), 0);

    let (status, _, body) = scrape(&app).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[tokio::test]
async fn healthz_is_ok() {
    let (app, _) = app();
    let req = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_pushes_all_arrive_intact() {
    let (app, _) = app();

    let tasks: Vec<_> = (0..32)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                let payload = format!("# job {i}\njob_{i}_up 1\njob_{i}_seen {i}\n");
                assert_eq!(push(&app, payload).await.status(), StatusCode::ACCEPTED);
            })
        })
        .collect();

    let mut collected = Vec::new();
    for t in tasks {
        let (_, _, body) = scrape(&app).await;
        collected.extend_from_slice(&body);
        t.await.unwrap();
    }
    let (_, _, rest) = scrape(&app).await;
    collected.extend_from_slice(&rest);

    let text = String::from_utf8(collected).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 32 * 3);
    for triple in lines.chunks(3) {
        let i = triple[0].strip_prefix("# job ").unwrap();
        assert_eq!(triple[1], format!("job_{i}_up 1"));
        assert_eq!(triple[2], format!("job_{i}_seen {i}"));
    }
}
