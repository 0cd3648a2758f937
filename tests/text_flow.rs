mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use translator_backend::app::create_app;

use common::{
    FailingProvider, TaggingProvider, get_request, json_request, send, test_state,
};

#[tokio::test]
async fn session_translate_and_history_round_trip() {
    let (state, _storage) = test_state(Arc::new(TaggingProvider), Arc::new(TaggingProvider));
    let app = create_app(state).await;

    let (status, body) = send(
        app.clone(),
        json_request("POST", "/api/text/sessions", json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let session_id = body["data"]["sessionId"].as_str().unwrap().to_string();

    for text in ["hola", "adios"] {
        let (status, body) = send(
            app.clone(),
            json_request(
                "POST",
                "/api/text/translate",
                json!({
                    "sessionId": session_id,
                    "text": text,
                    "sourceLang": "es",
                    "targetLang": "en",
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"]["translatedText"].as_str().unwrap(),
            format!("[en] {text}")
        );
    }

    let uri = format!("/api/text/sessions/{session_id}/history");
    let (status, body) = send(app.clone(), get_request(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body["data"]["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    // Newest first.
    assert_eq!(entries[0]["sourceText"], "adios");
    assert_eq!(entries[1]["sourceText"], "hola");

    let (status, _) = send(
        app.clone(),
        json_request("DELETE", &uri, json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(app, get_request(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["entries"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let (state, _storage) = test_state(Arc::new(TaggingProvider), Arc::new(TaggingProvider));
    let app = create_app(state).await;

    let (status, _) = send(
        app.clone(),
        json_request(
            "POST",
            "/api/text/translate",
            json!({
                "sessionId": Uuid::new_v4(),
                "text": "hola",
                "sourceLang": "es",
                "targetLang": "en",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let uri = format!("/api/text/sessions/{}/history", Uuid::new_v4());
    let (status, _) = send(app, get_request(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn overlong_text_is_rejected() {
    let (state, _storage) = test_state(Arc::new(TaggingProvider), Arc::new(TaggingProvider));
    let app = create_app(state).await;

    let (_, body) = send(
        app.clone(),
        json_request("POST", "/api/text/sessions", json!({})),
    )
    .await;
    let session_id = body["data"]["sessionId"].as_str().unwrap().to_string();

    let (status, _) = send(
        app,
        json_request(
            "POST",
            "/api/text/translate",
            json!({
                "sessionId": session_id,
                "text": "x".repeat(5001),
                "sourceLang": "es",
                "targetLang": "en",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn provider_failure_maps_to_bad_gateway() {
    let (state, _storage) = test_state(Arc::new(TaggingProvider), Arc::new(FailingProvider));
    let app = create_app(state).await;

    let (_, body) = send(
        app.clone(),
        json_request("POST", "/api/text/sessions", json!({})),
    )
    .await;
    let session_id = body["data"]["sessionId"].as_str().unwrap().to_string();

    let (status, _) = send(
        app.clone(),
        json_request(
            "POST",
            "/api/text/translate",
            json!({
                "sessionId": session_id,
                "text": "hola",
                "sourceLang": "es",
                "targetLang": "en",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    // The failed attempt left no history entry.
    let uri = format!("/api/text/sessions/{session_id}/history");
    let (_, body) = send(app, get_request(&uri)).await;
    assert_eq!(body["data"]["entries"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn health_reports_capabilities() {
    let (state, _storage) = test_state(Arc::new(TaggingProvider), Arc::new(TaggingProvider));
    let app = create_app(state).await;

    let (status, body) = send(app, get_request("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["max_upload_mb"], 1);
    assert!(
        body["supported_formats"]
            .as_array()
            .unwrap()
            .iter()
            .any(|f| f == "docx")
    );
}
