use core_logic::{
    delete_message, fetch_page, ApiClient, Credential, Cursor, DeleteOutcome, Endpoint,
    FetchOutcome, NetworkError, RunController,
};
use std::sync::Arc;
use twitter_dm_sweeper::{TwitterClient, TwitterConfig};
use wiremock::matchers::{body_string_contains, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credential() -> Credential {
    Credential::new("ck", "cs", "at", "ats")
}

fn client_for(server: &MockServer) -> TwitterClient {
    let config = TwitterConfig {
        api_base: format!("{}/1.1", server.uri()),
        ..TwitterConfig::default()
    };
    TwitterClient::new("001".to_string(), credential(), &config).unwrap()
}

#[tokio::test]
async fn test_list_request_is_signed_and_paged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/direct_messages.json"))
        .and(query_param("count", "200"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id_str": "1001", "text": "hello"},
            {"id_str": "1002", "text": "bye"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = fetch_page(&client, Endpoint::Received, Cursor::NEWEST, 200)
        .await
        .unwrap();

    assert_eq!(outcome, FetchOutcome::Page(vec![1001, 1002]));

    let requests = server.received_requests().await.unwrap();
    let auth = requests[0]
        .headers
        .get("authorization")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(auth.starts_with("OAuth "));
    assert!(auth.contains("oauth_signature_method=\"HMAC-SHA1\""));
    assert!(requests[0].url.query().unwrap_or("").find("max_id").is_none());
}

#[tokio::test]
async fn test_list_429_maps_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/direct_messages/sent.json"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = fetch_page(&client, Endpoint::Sent, Cursor::NEWEST, 200)
        .await
        .unwrap();

    assert_eq!(outcome, FetchOutcome::RateLimited);
}

#[tokio::test]
async fn test_destroy_posts_form_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1.1/direct_messages/destroy.json"))
        .and(body_string_contains("id=42"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = delete_message(&client, 42).await;

    assert!(matches!(outcome, DeleteOutcome::Deleted));
}

#[tokio::test]
async fn test_destroy_statuses() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("id=1"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("id=2"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);

    assert!(matches!(
        delete_message(&client, 1).await,
        DeleteOutcome::RateLimited
    ));
    match delete_message(&client, 2).await {
        DeleteOutcome::Failed(NetworkError::HttpError { status_code, .. }) => {
            assert_eq!(status_code, 404)
        }
        other => panic!("Expected HttpError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_host_is_a_transport_failure() {
    let config = TwitterConfig {
        api_base: "http://127.0.0.1:1/1.1/".to_string(),
        ..TwitterConfig::default()
    };
    let client = TwitterClient::new("001".to_string(), credential(), &config).unwrap();

    match delete_message(&client, 7).await {
        DeleteOutcome::Failed(NetworkError::Transport { endpoint, .. }) => {
            assert_eq!(endpoint, "direct_messages/destroy.json")
        }
        other => panic!("Expected Transport failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_run_against_mock_api_clears_mailbox() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1.1/direct_messages.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"id_str": "1"}, {"id_str": "2"}])),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/1.1/direct_messages.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/1.1/direct_messages/sent.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/1.1/direct_messages/destroy.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(2)
        .mount(&server)
        .await;

    let client: Arc<dyn ApiClient> = Arc::new(client_for(&server));
    let config = TwitterConfig::default();
    let controller = RunController::new(vec![client], config.sweep_config()).unwrap();

    let summary = controller.run().await.unwrap();

    assert_eq!(summary.deleted, 2);
    assert_eq!(summary.backoffs, 0);
    assert_eq!(summary.cleared_by, Some(0));
}
