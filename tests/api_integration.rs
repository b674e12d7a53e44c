mod helpers;

use axum::http::{StatusCode, header};
use serde_json::json;

use vitae::resume::Resume;

#[tokio::test]
async fn test_health_check() {
    let response = helpers::get(helpers::test_app(), "/healthz").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = helpers::body_json(response).await;
    assert_eq!(body["status"], "OK");
}

#[tokio::test]
async fn test_description_suggestions() {
    let response = helpers::post_json(
        helpers::test_app(),
        "/api/ai-suggestions",
        json!({ "type": "description", "jobTitle": "UX Designer" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = helpers::body_json(response).await;
    let suggestions = body["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 2);
    assert!(
        suggestions[0]
            .as_str()
            .unwrap()
            .starts_with("• Conducted user research")
    );

    let markup = body["markup"][0].as_str().unwrap();
    assert!(markup.starts_with("<ul><li>Conducted user research"));
    assert_eq!(markup.matches("<li>").count(), 5);
}

#[tokio::test]
async fn test_skill_suggestions_are_sets() {
    let response = helpers::post_json(
        helpers::test_app(),
        "/api/ai-suggestions",
        json!({ "type": "skills", "jobTitle": "Astronaut" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = helpers::body_json(response).await;
    assert_eq!(body["suggestions"][0][0], "JavaScript");
    assert_eq!(body["suggestions"][0].as_array().unwrap().len(), 12);
    assert!(
        body["markup"][0]
            .as_str()
            .unwrap()
            .starts_with("JavaScript, TypeScript, React")
    );
}

#[tokio::test]
async fn test_invalid_suggestion_type() {
    let response = helpers::post_json(
        helpers::test_app(),
        "/api/ai-suggestions",
        json!({ "type": "cover-letter" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = helpers::body_json(response).await;
    assert_eq!(body["error"], "Invalid suggestion type");
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let app = helpers::test_app();
    let response = tower::ServiceExt::oneshot(
        app,
        axum::http::Request::builder()
            .method("POST")
            .uri("/api/ai-suggestions")
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap(),
    )
    .await
    .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_canonicalize_endpoint() {
    let response = helpers::post_json(
        helpers::test_app(),
        "/api/richtext/canonicalize",
        json!({ "html": "<ul>loose</ul><script>x()</script>" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = helpers::body_json(response).await;
    assert_eq!(body["html"], "<ul><li>loose</li></ul>");
    assert_eq!(body["isEmpty"], false);
}

#[tokio::test]
async fn test_editor_config_uses_state() {
    let response = helpers::get(helpers::test_app(), "/api/editor/config").await;
    let body = helpers::body_json(response).await;
    assert_eq!(body["characterLimit"], 450);
    assert_eq!(body["commands"][0], "bold");
}

#[tokio::test]
async fn test_export_blocks_endpoint() {
    let response = helpers::post_json(
        helpers::test_app(),
        "/api/export/blocks",
        json!({ "resume": Resume::sample(), "format": "docx" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = helpers::body_json(response).await;
    assert_eq!(body["filename"], "John_Doe_Resume.docx");
    assert_eq!(body["blocks"][0]["type"], "heading");
    assert_eq!(body["blocks"][0]["text"], "John Doe");
    assert_eq!(body["blocks"][0]["level"], 1);
}

#[tokio::test]
async fn test_export_text_attachment() {
    let response = helpers::post_json(
        helpers::test_app(),
        "/api/export/text",
        json!({ "resume": Resume::sample() }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("filename=\"John_Doe_Resume.txt\""));

    let text = helpers::body_text(response).await;
    assert!(text.starts_with("JOHN DOE\n"));
}

#[tokio::test]
async fn test_export_text_empty_resume() {
    let response = helpers::post_json(
        helpers::test_app(),
        "/api/export/text",
        json!({ "resume": { "personalInfo": {} } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_keyword_match_endpoint() {
    let response = helpers::post_json(
        helpers::test_app(),
        "/api/keyword-match",
        json!({
            "resume": Resume::sample(),
            "jobDescription": "Microservices engineer. Kubernetes experience with microservices."
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = helpers::body_json(response).await;
    assert_eq!(body["matchedKeywords"][0], "microservices");
    assert!(
        body["missingKeywords"]
            .as_array()
            .unwrap()
            .contains(&json!("kubernetes"))
    );
    assert!(body["score"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_keyword_match_requires_description() {
    let response = helpers::post_json(
        helpers::test_app(),
        "/api/keyword-match",
        json!({ "resume": Resume::sample(), "jobDescription": " " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_openapi_document() {
    let response = helpers::get(helpers::test_app(), "/api-docs/openapi.json").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = helpers::body_json(response).await;
    assert!(body["paths"]["/api/ai-suggestions"]["post"].is_object());
    assert!(body["paths"]["/healthz"]["get"].is_object());
    assert!(body["components"]["schemas"]["ExportBlock"].is_object());
}
