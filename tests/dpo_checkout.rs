// tests/dpo_checkout.rs
mod common;
use common::{api3g, mount_gateway, test_client, test_config};

use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};
use tiny_dpo_pay::dpo::dpo_checkout;
use wiremock::MockServer;

macro_rules! init_app {
    ($mock_server:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(test_client($mock_server, test_config())))
                .configure(dpo_checkout::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn create_token_returns_token_and_payment_url() {
    let mock_server = MockServer::start().await;
    mount_gateway(&mock_server, 200, api3g("000", "ok", "<TransToken>abc123</TransToken>")).await;
    let app = init_app!(&mock_server);

    let req = test::TestRequest::post()
        .uri("/api/dpo/create-token")
        .set_json(json!({ "amount": 120.0, "description": "Two tickets" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["token"], "abc123");
    assert_eq!(body["payment_url"], "https://secure.3gdirectpay.com/?ID=abc123");
}

#[actix_web::test]
async fn create_token_rejection_is_payment_required() {
    let mock_server = MockServer::start().await;
    mount_gateway(&mock_server, 200, api3g("001", "Declined", "")).await;
    let app = init_app!(&mock_server);

    let req = test::TestRequest::post()
        .uri("/api/dpo/create-token")
        .set_json(json!({ "amount": 120.0, "description": "Two tickets" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::PAYMENT_REQUIRED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Declined");
}

#[actix_web::test]
async fn create_token_rejects_non_positive_amount() {
    let mock_server = MockServer::start().await;
    let app = init_app!(&mock_server);

    let req = test::TestRequest::post()
        .uri("/api/dpo/create-token")
        .set_json(json!({ "amount": 0.0, "description": "free" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(mock_server.received_requests().await.unwrap_or_default().is_empty());
}

#[actix_web::test]
async fn verify_token_declined_is_ok_false() {
    let mock_server = MockServer::start().await;
    mount_gateway(&mock_server, 200, api3g("904", "Transaction cancelled", "")).await;
    let app = init_app!(&mock_server);

    let req = test::TestRequest::get()
        .uri("/api/dpo/verify-token?token=abc123")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "token": "abc123", "verified": false }));
}

#[actix_web::test]
async fn malformed_gateway_reply_is_bad_gateway() {
    let mock_server = MockServer::start().await;
    mount_gateway(&mock_server, 200, "not xml at all".to_string()).await;
    let app = init_app!(&mock_server);

    let req = test::TestRequest::get()
        .uri("/api/dpo/verify-token?token=abc123")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}

#[actix_web::test]
async fn mobile_money_accepts_optional_operator_fields() {
    let mock_server = MockServer::start().await;
    mount_gateway(&mock_server, 200, api3g("000", "Request sent", "")).await;
    let app = init_app!(&mock_server);

    let req = test::TestRequest::post()
        .uri("/api/dpo/mobile-money")
        .set_json(json!({
            "token": "abc123",
            "phone_number": "260961234567",
            "amount": 30.0,
            "mno": "mtn"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Payment prompt successful.");

    let requests = mock_server.received_requests().await.unwrap_or_default();
    let doc = String::from_utf8(requests[0].body.clone()).unwrap();
    assert!(doc.contains("<MNO>mtn</MNO>"));
    assert!(doc.contains("<MNOcountry>Zambia</MNOcountry>"));
}

#[actix_web::test]
async fn payment_url_needs_no_gateway_call() {
    let mock_server = MockServer::start().await;
    let app = init_app!(&mock_server);

    let req = test::TestRequest::get()
        .uri("/api/dpo/payment-url?token=tok1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["payment_url"], "https://secure.3gdirectpay.com/?ID=tok1");
    assert!(mock_server.received_requests().await.unwrap_or_default().is_empty());
}

#[actix_web::test]
async fn create_token_without_token_is_bad_gateway() {
    let mock_server = MockServer::start().await;
    mount_gateway(&mock_server, 200, api3g("000", "Transaction created", "")).await;
    let app = init_app!(&mock_server);

    let req = test::TestRequest::post()
        .uri("/api/dpo/create-token")
        .set_json(json!({ "amount": 120.0, "description": "Two tickets" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}

#[actix_web::test]
async fn mobile_money_blank_operator_uses_default() {
    let mock_server = MockServer::start().await;
    mount_gateway(&mock_server, 200, api3g("000", "Request sent", "")).await;
    let app = init_app!(&mock_server);

    let req = test::TestRequest::post()
        .uri("/api/dpo/mobile-money")
        .set_json(json!({
            "token": "abc123",
            "phone_number": "260961234567",
            "amount": 30.0,
            "mno": "",
            "mno_country": ""
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let requests = mock_server.received_requests().await.unwrap_or_default();
    let doc = String::from_utf8(requests[0].body.clone()).unwrap();
    assert!(doc.contains("<MNO>airtel</MNO>"));
    assert!(doc.contains("<MNOcountry>Zambia</MNOcountry>"));
}
