//! Integration tests for the careline library.
//! These tests require a live backend and a bearer token in the environment.

#[cfg(test)]
mod tests {
    use careline::{AgentApi, AgentClient};

    fn live_client() -> Option<AgentClient> {
        let base_url = std::env::var("CARELINE_BASE_URL").ok();
        let token = std::env::var("CARELINE_TOKEN").ok();
        if base_url.is_none() || token.is_none() {
            eprintln!("Skipping test: CARELINE_BASE_URL or CARELINE_TOKEN not set");
            return None;
        }
        Some(
            AgentClient::with_options(token, base_url, None)
                .expect("Failed to create client"),
        )
    }

    #[tokio::test]
    async fn test_create_session() {
        let Some(client) = live_client() else {
            return;
        };

        let response = client.create_session().await;
        assert!(
            response.is_ok(),
            "Session creation should succeed with a valid token"
        );
        let response = response.unwrap();
        assert!(!response.session_id.is_empty());
    }

    #[tokio::test]
    async fn test_send_message_round_trip() {
        let Some(client) = live_client() else {
            return;
        };

        let session = client.create_session().await.expect("session creation");
        let request = careline::SendMessageRequest::new(session.session_id.clone(), "Hello");
        let reply = client.send_message(request).await;
        assert!(reply.is_ok(), "Message send should succeed");
        assert!(!reply.unwrap().response.is_empty());
    }

    #[tokio::test]
    async fn test_session_status_for_unknown_handle() {
        let Some(client) = live_client() else {
            return;
        };

        let status = client
            .session_status("00000000-0000-0000-0000-000000000000")
            .await;
        assert!(status.is_err(), "Unknown session should be rejected");
    }
}
