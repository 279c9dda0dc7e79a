use std::time::Duration;

use assistant_api::{
    AssistantApiClient, AssistantApiConfig, AssistantApiError, BotEndpoint, ChatRequest,
};

#[test]
fn http_chat_request_posts_json_to_chat_endpoint() {
    let client = AssistantApiClient::new(AssistantApiConfig::new("http://localhost:8000"))
        .expect("client");
    let request = client
        .build_chat_request(&ChatRequest::new("help").with_identity("u", "s"))
        .expect("build request")
        .build()
        .expect("request");

    assert_eq!(request.method(), "POST");
    assert_eq!(
        request.url().as_str(),
        "http://localhost:8000/api/v1/bot/chat"
    );
    assert_eq!(
        request
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("application/json")
    );

    let body = request
        .body()
        .and_then(|body| body.as_bytes())
        .expect("buffered body");
    let value: serde_json::Value = serde_json::from_slice(body).expect("json body");
    assert_eq!(value["message"], "help");
    assert_eq!(value["session_id"], "s");
}

#[test]
fn http_probe_request_uses_get() {
    let client = AssistantApiClient::new(AssistantApiConfig::new("http://bots.local/api/v1"))
        .expect("client");
    let request = client
        .build_probe_request(BotEndpoint::Stats)
        .expect("build request")
        .build()
        .expect("request");

    assert_eq!(request.method(), "GET");
    assert_eq!(request.url().as_str(), "http://bots.local/api/v1/bot/stats");
}

#[test]
fn http_extra_headers_and_user_agent_are_applied() {
    let config = AssistantApiConfig::new("http://localhost:8000")
        .with_user_agent("cyber-chat/0.1")
        .insert_header("x-trace", "abc");
    let client = AssistantApiClient::new(config).expect("client");
    let headers = client.build_headers().expect("headers");

    assert_eq!(headers.get("user-agent").map(|v| v.as_bytes()), Some(&b"cyber-chat/0.1"[..]));
    assert_eq!(headers.get("x-trace").map(|v| v.as_bytes()), Some(&b"abc"[..]));
}

#[test]
fn http_invalid_header_is_rejected() {
    let config = AssistantApiConfig::new("http://localhost:8000").insert_header("bad key", "v");
    let client = AssistantApiClient::new(config).expect("client");

    assert!(matches!(
        client.build_headers(),
        Err(AssistantApiError::InvalidHeader(_))
    ));
}

#[test]
fn http_non_http_base_url_is_rejected() {
    let result = AssistantApiClient::new(AssistantApiConfig::new("ftp://localhost"));
    assert!(matches!(result, Err(AssistantApiError::InvalidBaseUrl(_))));
}

#[test]
fn http_config_defaults_to_thirty_second_timeout() {
    let config = AssistantApiConfig::default();
    assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    assert_eq!(config.base_url, "http://localhost:8000");
    assert_eq!(config.clone().without_timeout().timeout, None);
}
