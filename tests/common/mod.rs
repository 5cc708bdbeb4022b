#![allow(dead_code)]
use tiny_dpo_pay::config::{DpoConfig, Endpoints};
use tiny_dpo_pay::dpo::DpoClient;
use wiremock::matchers::{header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn test_config() -> DpoConfig {
    DpoConfig {
        redirect_url: "https://shop.example/done".into(),
        back_url: "https://shop.example/cart".into(),
        company_token: "9F416C11-127B-4DE2-AC7F-D5710E4C5E0A".into(),
        service_id: "3854".into(),
        currency: None,
        country: None,
    }
}

pub fn test_client(mock_server: &MockServer, config: DpoConfig) -> DpoClient {
    DpoClient::with_endpoints(
        config,
        Endpoints {
            api_url: format!("{}/API/v6/", mock_server.uri()),
            payment_url: "https://secure.3gdirectpay.com/".into(),
        },
    )
}

pub fn api3g(result: &str, explanation: &str, extra: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?><API3G><Result>{result}</Result><ResultExplanation>{explanation}</ResultExplanation>{extra}</API3G>"#
    )
}

/// Mounts a gateway that answers every XML POST with `body`.
pub async fn mount_gateway(mock_server: &MockServer, status: u16, body: String) {
    Mock::given(method("POST"))
        .and(header("content-type", "application/xml"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(mock_server)
        .await;
}

/// Body of the single request the mock gateway received.
pub async fn sent_document(mock_server: &MockServer) -> String {
    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1, "expected exactly one gateway request");
    String::from_utf8(requests[0].body.clone()).unwrap()
}
