//! Order gateway behavior against a mocked PayPal API.

use pay_core::{Cart, OrderGateway, PaymentError};
use pay_paypal::{PayPalConfig, PayPalOrderGateway};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{basic_auth, bearer_token, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway_for(server: &MockServer) -> PayPalOrderGateway {
    let config = PayPalConfig::new("client-id", "client-secret").with_api_base_url(server.uri());
    PayPalOrderGateway::from_config(config).unwrap()
}

async fn mount_token(server: &MockServer, token: &str, times: u64) {
    Mock::given(method("POST"))
        .and(path("/v1/oauth2/token"))
        .and(basic_auth("client-id", "client-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": token,
            "token_type": "Bearer",
            "expires_in": 32400
        })))
        .expect(times)
        .mount(server)
        .await;
}

fn expected_order_payload() -> Value {
    json!({
        "intent": "CAPTURE",
        "purchase_units": [
            { "amount": { "currency_code": "USD", "value": "100.00" } }
        ]
    })
}

#[tokio::test]
async fn test_create_order_relays_provider_response() {
    let server = MockServer::start().await;
    mount_token(&server, "T1", 1).await;
    Mock::given(method("POST"))
        .and(path("/v2/checkout/orders"))
        .and(bearer_token("T1"))
        .and(body_json(expected_order_payload()))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": "O1", "status": "CREATED" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let result = gateway
        .create_order(&Cart(json!([{ "id": "sku-1", "quantity": 1 }])))
        .await
        .unwrap();

    assert_eq!(result.status_code, 201);
    assert_eq!(result.body, json!({ "id": "O1", "status": "CREATED" }));
}

#[tokio::test]
async fn test_capture_order_relays_provider_response() {
    let server = MockServer::start().await;
    mount_token(&server, "T1", 1).await;
    Mock::given(method("POST"))
        .and(path("/v2/checkout/orders/O1/capture"))
        .and(bearer_token("T1"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": "O1", "status": "COMPLETED" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = gateway_for(&server).capture_order("O1").await.unwrap();

    assert_eq!(result.status_code, 201);
    assert_eq!(result.body, json!({ "id": "O1", "status": "COMPLETED" }));
}

#[tokio::test]
async fn test_provider_error_status_is_relayed() {
    let server = MockServer::start().await;
    mount_token(&server, "T1", 1).await;
    let error_body = json!({
        "name": "UNPROCESSABLE_ENTITY",
        "details": [{ "issue": "ORDER_NOT_APPROVED" }],
        "debug_id": "f1d7a3b2c9e01"
    });
    Mock::given(method("POST"))
        .and(path("/v2/checkout/orders/O1/capture"))
        .respond_with(ResponseTemplate::new(422).set_body_json(error_body.clone()))
        .mount(&server)
        .await;

    let result = gateway_for(&server).capture_order("O1").await.unwrap();

    assert_eq!(result.status_code, 422);
    assert_eq!(result.body, error_body);
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let server = MockServer::start().await;
    mount_token(&server, "T1", 1).await;
    Mock::given(method("POST"))
        .and(path("/v2/checkout/orders"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let err = gateway_for(&server)
        .create_order(&Cart::default())
        .await
        .unwrap_err();

    match err {
        PaymentError::MalformedResponse(text) => assert_eq!(text, "upstream exploded"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_credentials_make_no_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let config = PayPalConfig::new("", "").with_api_base_url(server.uri());
    let gateway = PayPalOrderGateway::from_config(config).unwrap();

    let err = gateway.create_order(&Cart::default()).await.unwrap_err();
    assert!(matches!(err, PaymentError::Configuration(_)));

    let err = gateway.capture_order("O1").await.unwrap_err();
    assert!(matches!(err, PaymentError::Configuration(_)));
}

#[tokio::test]
async fn test_token_rejection_fails_both_operations() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/oauth2/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "invalid_client" })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/checkout/orders"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "O1" })))
        .expect(0)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);

    let err = gateway.create_order(&Cart::default()).await.unwrap_err();
    assert!(matches!(err, PaymentError::ProviderHttp { status: 401, .. }));

    let err = gateway.capture_order("O1").await.unwrap_err();
    assert!(matches!(err, PaymentError::ProviderHttp { status: 401, .. }));
}

#[tokio::test]
async fn test_double_capture_issues_two_calls() {
    let server = MockServer::start().await;
    mount_token(&server, "T1", 1).await;
    Mock::given(method("POST"))
        .and(path("/v2/checkout/orders/O1/capture"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": "O1", "status": "COMPLETED" })),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/checkout/orders/O1/capture"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "name": "UNPROCESSABLE_ENTITY",
            "details": [{ "issue": "ORDER_ALREADY_CAPTURED" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let first = gateway.capture_order("O1").await.unwrap();
    let second = gateway.capture_order("O1").await.unwrap();

    assert_eq!(first.status_code, 201);
    assert_eq!(second.status_code, 422);
    assert_eq!(second.body["details"][0]["issue"], "ORDER_ALREADY_CAPTURED");
}

#[tokio::test]
async fn test_malformed_order_id_is_rejected_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);

    for order_id in ["", "   ", ".", "..", "O1 ", " O1", "O1\n"] {
        let err = gateway.capture_order(order_id).await.unwrap_err();
        assert!(matches!(err, PaymentError::InvalidRequest(_)));
    }
}

#[tokio::test]
async fn test_order_id_is_a_single_path_segment() {
    let server = MockServer::start().await;
    mount_token(&server, "T1", 1).await;
    Mock::given(method("POST"))
        .and(path("/v2/checkout/orders/a%2Fb/capture"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "name": "RESOURCE_NOT_FOUND" })))
        .expect(1)
        .mount(&server)
        .await;

    let result = gateway_for(&server).capture_order("a/b").await.unwrap();
    assert_eq!(result.status_code, 404);
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let server = MockServer::start().await;
    mount_token(&server, "T1", 1).await;
    Mock::given(method("POST"))
        .and(path("/v2/checkout/orders"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "id": "O1" }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = PayPalConfig::new("client-id", "client-secret")
        .with_api_base_url(server.uri())
        .with_timeout(Duration::from_millis(300));
    let gateway = PayPalOrderGateway::from_config(config).unwrap();

    let err = gateway.create_order(&Cart::default()).await.unwrap_err();
    assert!(matches!(err, PaymentError::Network(_)));
}

#[tokio::test]
async fn test_rejected_token_is_evicted() {
    let server = MockServer::start().await;
    mount_token(&server, "T1", 2).await;
    Mock::given(method("POST"))
        .and(path("/v2/checkout/orders"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "name": "AUTHENTICATION_FAILURE",
            "message": "Authentication failed due to invalid authentication credentials or a missing Authorization header."
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/checkout/orders"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "O2", "status": "CREATED" })))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let first = gateway.create_order(&Cart::default()).await.unwrap();
    assert_eq!(first.status_code, 401);

    let second = gateway.create_order(&Cart::default()).await.unwrap();
    assert_eq!(second.status_code, 201);
}

#[tokio::test]
async fn test_token_is_shared_between_create_and_capture() {
    let server = MockServer::start().await;
    mount_token(&server, "T1", 1).await;
    Mock::given(method("POST"))
        .and(path("/v2/checkout/orders"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "O1", "status": "CREATED" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/checkout/orders/O1/capture"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "O1", "status": "COMPLETED" })))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let created = gateway.create_order(&Cart::default()).await.unwrap();
    let order_id = created.resource_id().unwrap().to_string();
    let captured = gateway.capture_order(&order_id).await.unwrap();

    assert_eq!(captured.resource_status(), Some("COMPLETED"));
}
