use pify_wallet_client::http::{Amount, FailureKind, HistoryQuery, Period, UNKNOWN_API_ERROR, WalletApiClient};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> WalletApiClient {
    let mut client = WalletApiClient::new("test-token").unwrap();
    client.set_base_url(&server.uri()).set_timeout(5);
    client
}

async fn mount_json(server: &MockServer, verb: &str, endpoint: &str, status: u16, body: &str) {
    Mock::given(method(verb))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn transfer_returns_payload_and_sends_float_amount() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/transfer"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Content-Type", "application/json"))
        .and(header("User-Agent", "Pify-WalletApiClient/1.0"))
        .and(body_json(json!({
            "from_wallet_id": 1,
            "to_identifier": "w2",
            "amount": 10.5,
            "comment": "note"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":true,"transaction_id":42}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let amount: Amount = "10.5".parse().unwrap();
    let payload = client.transfer(1, "w2", amount, Some("note")).await.unwrap();

    assert_eq!(payload, json!({ "success": true, "transaction_id": 42 }));
    assert!(client.last_error().await.is_none());

    let requests = mock_server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(sent["amount"].is_f64());
}

#[tokio::test]
async fn transfer_without_comment_sends_empty_comment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/transfer"))
        .and(body_json(json!({
            "from_wallet_id": 5,
            "to_identifier": "user@example.com",
            "amount": 3.0,
            "comment": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":true}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.transfer(5, "user@example.com", 3, None).await.unwrap();
}

#[tokio::test]
async fn transfer_external_posts_address() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/transfer-external"))
        .and(body_json(json!({
            "from_wallet_id": 2,
            "to_address": "TQn9Y2khEsLJW1ChVWFMSMeRDow5KcbLSE",
            "amount": 0.25,
            "comment": "payout"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":true,"tx_hash":"abc"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let payload = client
        .transfer_external(2, "TQn9Y2khEsLJW1ChVWFMSMeRDow5KcbLSE", 0.25, Some("payout"))
        .await
        .unwrap();

    assert_eq!(payload.get("tx_hash"), Some(&json!("abc")));
}

#[tokio::test]
async fn check_transfer_posts_wallet_and_amount() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/check-transfer"))
        .and(body_json(json!({ "from_wallet_id": 9, "amount": 100.0 })))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":true,"fee":1.5}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let payload = client.check_transfer(9, 100u32).await.unwrap();

    assert_eq!(payload, json!({ "success": true, "fee": 1.5 }));
}

#[tokio::test]
async fn balance_request_has_no_query_string() {
    let mock_server = MockServer::start().await;
    mount_json(&mock_server, "GET", "/api/balance", 200, r#"{"wallets":[{"id":1,"balance":"12.00"}]}"#).await;

    let client = client_for(&mock_server);
    let payload = client.get_balance().await.unwrap();
    assert_eq!(payload, json!({ "wallets": [{ "id": 1, "balance": "12.00" }] }));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.query().is_none());
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn empty_history_query_has_no_query_string() {
    let mock_server = MockServer::start().await;
    mount_json(&mock_server, "GET", "/api/history", 200, r#"{"items":[]}"#).await;

    let client = client_for(&mock_server);
    client.get_history(&HistoryQuery::default()).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].url.query().is_none());
}

#[tokio::test]
async fn history_query_is_encoded_in_order() {
    let mock_server = MockServer::start().await;
    mount_json(&mock_server, "GET", "/api/history", 200, r#"{"items":[],"total":0}"#).await;

    let client = client_for(&mock_server);
    let query = HistoryQuery::new()
        .wallet_id(7)
        .page(2)
        .page_size(50)
        .filter("type", "transfer")
        .filter("comment", "rent due");
    client.get_history(&query).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].url.query(),
        Some("wallet_id=7&page=2&page_size=50&filters%5Btype%5D=transfer&filters%5Bcomment%5D=rent+due")
    );
}

#[tokio::test]
async fn statistics_sends_period() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/statistics"))
        .and(query_param("period", "month"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":true,"incoming":10}"#))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/statistics"))
        .and(query_param("period", "year"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":true,"incoming":120}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let monthly = client.get_statistics(Period::default()).await.unwrap();
    let yearly = client.get_statistics(Period::Year).await.unwrap();

    assert_eq!(monthly.get("incoming"), Some(&json!(10)));
    assert_eq!(yearly.get("incoming"), Some(&json!(120)));
}

#[tokio::test]
async fn wallet_info_sends_wallet_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/wallet-info"))
        .and(query_param("wallet_id", "31"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":true,"wallet":{"id":31}}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let payload = client.get_wallet_info(31).await.unwrap();
    assert_eq!(payload.get("wallet"), Some(&json!({ "id": 31 })));
}

#[tokio::test]
async fn base_url_trailing_slash_does_not_double_up() {
    let mock_server = MockServer::start().await;
    mount_json(&mock_server, "GET", "/api/balance", 200, "{}").await;

    let mut client = WalletApiClient::new("test-token").unwrap();
    client.set_base_url(&format!("{}/", mock_server.uri()));
    client.get_balance().await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.path(), "/api/balance");
}

#[tokio::test]
async fn non_200_status_is_reported_with_its_code() {
    let mock_server = MockServer::start().await;
    mount_json(
        &mock_server,
        "POST",
        "/api/transfer",
        403,
        r#"{"success":false,"error":"Forbidden","message":"Token revoked"}"#,
    )
    .await;

    let client = client_for(&mock_server);
    let err = client.transfer(1, "w2", 1.0, None).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::HttpStatus);
    assert_eq!(client.last_error().await.as_deref(), Some("HTTP Error: 403"));
    let raw = client.last_response().await.unwrap();
    assert_eq!(raw.http_code, 403);
    assert!(raw.body.unwrap().contains("Token revoked"));
}

#[tokio::test]
async fn invalid_json_is_a_decode_failure() {
    let mock_server = MockServer::start().await;
    mount_json(&mock_server, "GET", "/api/balance", 200, "<html>Bad gateway</html>").await;

    let client = client_for(&mock_server);
    let err = client.get_balance().await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Decode);
    let last_error = client.last_error().await.unwrap();
    assert!(last_error.starts_with("JSON decode error: "));
    assert_eq!(last_error, err.to_string());
}

#[tokio::test]
async fn application_failure_messages() {
    let cases = [
        (r#"{"success":false,"error":"X","message":"Y"}"#, "X: Y"),
        (r#"{"success":false,"error":"X"}"#, "X"),
        (r#"{"success":false}"#, UNKNOWN_API_ERROR),
    ];

    for (body, expected) in cases {
        let mock_server = MockServer::start().await;
        mount_json(&mock_server, "POST", "/api/check-transfer", 200, body).await;

        let client = client_for(&mock_server);
        let err = client.check_transfer(1, 5.0).await.unwrap_err();

        assert_eq!(err.kind(), FailureKind::Application);
        assert_eq!(err.to_string(), expected);
        assert_eq!(client.last_error().await.as_deref(), Some(expected));
        assert_eq!(client.last_response().await.unwrap().http_code, 200);
    }
}

#[tokio::test]
async fn connection_refused_is_a_transport_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let mut client = WalletApiClient::new("test-token").unwrap();
    client.set_base_url(&format!("http://127.0.0.1:{}", port)).set_timeout(5);

    let err = client.get_balance().await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Transport);
    let raw = client.last_response().await.unwrap();
    assert_eq!(raw.http_code, 0);
    assert!(raw.body.is_none());
    let transport_text = raw.error.unwrap();
    assert!(!transport_text.is_empty());
    assert!(client.last_error().await.unwrap().contains(&transport_text));
}

#[tokio::test]
async fn last_outcome_is_overwritten_by_each_call() {
    let mock_server = MockServer::start().await;
    mount_json(&mock_server, "GET", "/api/balance", 500, "").await;
    mount_json(&mock_server, "GET", "/api/wallet-info", 200, r#"{"success":true}"#).await;

    let client = client_for(&mock_server);

    assert!(client.get_balance().await.is_err());
    assert_eq!(client.last_error().await.as_deref(), Some("HTTP Error: 500"));

    assert!(client.get_wallet_info(1).await.is_ok());
    assert!(client.last_error().await.is_none());
    assert_eq!(
        client.last_response().await.unwrap().body.as_deref(),
        Some(r#"{"success":true}"#)
    );
}

#[tokio::test]
async fn transfer_redirect_is_not_followed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/transfer"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/landing"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(path("/landing"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.transfer(1, "w2", 5, None).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::HttpStatus);
    assert_eq!(err.to_string(), "HTTP Error: 302");
    assert_eq!(client.last_response().await.unwrap().http_code, 302);
}

#[tokio::test]
async fn zero_timeout_waits_for_a_slow_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/balance"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"balances":[]}"#)
                .set_delay(std::time::Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    client.set_timeout(0);
    let payload = client.get_balance().await.unwrap();

    assert_eq!(payload, json!({ "balances": [] }));
}

#[tokio::test]
async fn bare_list_body_is_a_successful_payload() {
    let mock_server = MockServer::start().await;
    mount_json(&mock_server, "GET", "/api/balance", 200, r#"[{"id":1,"balance":5}]"#).await;

    let client = client_for(&mock_server);
    let payload = client.get_balance().await.unwrap();

    assert_eq!(payload, json!([{ "id": 1, "balance": 5 }]));
    assert!(payload.as_map().is_none());
    assert!(client.last_error().await.is_none());
}

#[tokio::test]
async fn non_finite_amount_is_rejected_before_sending() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":true}"#))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let err = client.transfer(1, "w2", f64::NAN, None).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::InvalidRequest);
    assert!(err.to_string().contains("finite"));
    assert_eq!(client.last_error().await, Some(err.to_string()));
    assert_eq!(client.last_response().await.unwrap().http_code, 0);

    let err = client.check_transfer(1, f64::INFINITY).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::InvalidRequest);
}
