use super::*;

fn test_client(base_url: &str) -> GeminiClient {
    GeminiClient::with_base_url(Some("test-key".to_string()), "gemini-2.5-flash", 30, base_url)
        .expect("client construction should not fail")
}

#[test]
fn endpoint_includes_model_and_method() {
    let client = test_client("https://generativelanguage.googleapis.com");
    assert_eq!(
        client.endpoint().as_str(),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
    );
}

#[test]
fn endpoint_keeps_base_path_prefix() {
    let client = test_client("http://localhost:8080/proxy/");
    assert_eq!(
        client.endpoint().as_str(),
        "http://localhost:8080/proxy/v1beta/models/gemini-2.5-flash:generateContent"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = GeminiClient::with_base_url(None, "gemini-2.5-flash", 30, "not a url");
    assert!(matches!(result, Err(SearchError::InvalidBaseUrl { .. })));
}

#[test]
fn api_error_prefers_envelope_message() {
    let body = r#"{"error":{"code":403,"message":"API key not valid","status":"PERMISSION_DENIED"}}"#;
    let err = GeminiClient::api_error(StatusCode::FORBIDDEN, body);
    match err {
        SearchError::Api { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "PERMISSION_DENIED: API key not valid");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn api_error_falls_back_to_status_reason() {
    let err = GeminiClient::api_error(StatusCode::BAD_GATEWAY, "<html>upstream</html>");
    assert!(
        matches!(err, SearchError::Api { status: 502, ref message } if message == "Bad Gateway"),
        "unexpected error: {err:?}"
    );
}
