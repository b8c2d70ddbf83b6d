//! Mock tests for the Aethel client
//!
//! These tests run the dispatcher against a WireMock server and verify the
//! request shapes on the wire plus outcome classification end to end.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::core::ServiceClient;
    use crate::dispatch::RequestOutcome;
    use crate::services::aethel::{
        AethelClient, CHAT_ENDPOINT, GENERATE_CODE_ENDPOINT, GENERATE_SHADER_ENDPOINT,
    };
    use crate::tests::init_logs;

    /// Creates a test client targeting the mock server
    fn create_test_client(mock_server: &MockServer) -> AethelClient {
        AethelClient::builder()
            .base_url(mock_server.uri())
            .build()
            .expect("failed to build Aethel client")
    }

    #[tokio::test]
    async fn test_chat_handshake_request_shape() {
        init_logs();
        let mock_server = MockServer::start().await;

        let expected_body = json!({
            "messages": [{"role": "user", "content": "ping"}],
            "maxTokens": 64
        });

        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(&expected_body))
            .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let outcome = client.chat_handshake("ping").await_outcome().await;

        assert_eq!(
            outcome,
            RequestOutcome::Success {
                status: 200,
                body: "pong".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_generate_unreal_code_request_shape() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/aethel/generate-unreal-code"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(&json!({"prompt": "spawn a cube"})))
            .respond_with(ResponseTemplate::new(200).set_body_string("AActor code"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let outcome = client
            .generate_unreal_code("spawn a cube")
            .await_outcome()
            .await;

        assert!(outcome.is_success());
        assert_eq!(outcome.status(), Some(200));
    }

    #[tokio::test]
    async fn test_generate_shader_http_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/aethel/generate-shader"))
            .and(body_json(&json!({"prompt": "water caustics"})))
            .respond_with(ResponseTemplate::new(404).set_body_string("unknown endpoint"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let outcome = client.generate_shader("water caustics").await_outcome().await;

        assert_eq!(
            outcome,
            RequestOutcome::HttpError {
                status: 404,
                body: "unknown endpoint".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_transport_failure_when_server_down() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();
        drop(mock_server);

        let client = AethelClient::builder()
            .base_url(uri)
            .build()
            .expect("failed to build Aethel client");

        let outcome = client.chat_handshake("anyone there").await_outcome().await;

        assert!(matches!(outcome, RequestOutcome::TransportFailure(_)));
        assert_eq!(outcome.status(), None);
    }

    #[tokio::test]
    async fn test_serialization_failure_never_reaches_network() {
        struct Unserializable;

        impl serde::Serialize for Unserializable {
            fn serialize<S: serde::Serializer>(
                &self,
                _serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("refused"))
            }
        }

        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let outcome = client
            .dispatch(CHAT_ENDPOINT, &Unserializable)
            .await_outcome()
            .await;

        assert!(matches!(outcome, RequestOutcome::TransportFailure(_)));
        let requests = mock_server.received_requests().await.unwrap_or_default();
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_returns_before_completion() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("slow")
                    .set_delay(Duration::from_millis(200)),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let handle = client.chat_handshake("no rush");

        // The call itself must not wait for the backend.
        assert!(!handle.is_finished());

        let outcome = handle.await_outcome().await;
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn test_target_url_construction() {
        let client = AethelClient::builder()
            .base_url("http://localhost:8000")
            .build()
            .expect("failed to build Aethel client");

        assert_eq!(
            format!("{}{}", client.base_url(), CHAT_ENDPOINT),
            "http://localhost:8000/chat"
        );

        let client = AethelClient::builder()
            .base_url("https://api.example.com///")
            .build()
            .expect("failed to build Aethel client");

        assert_eq!(
            format!("{}{}", client.base_url(), GENERATE_SHADER_ENDPOINT),
            "https://api.example.com/aethel/generate-shader"
        );
        assert_eq!(
            format!("{}{}", client.base_url(), GENERATE_CODE_ENDPOINT),
            "https://api.example.com/aethel/generate-unreal-code"
        );
    }

    #[tokio::test]
    async fn test_client_identity() {
        let client = AethelClient::builder()
            .base_url("http://localhost:8000/")
            .build()
            .expect("failed to build Aethel client");

        assert_eq!(client.name(), "aethel");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
