//! Refund assistant commands

use std::sync::Arc;

use refundline_domain::constants::ASSISTANT_CHAT_PATH;
use refundline_domain::{AssistantChatRequest, AssistantChatResponse};
use tracing::{debug, instrument};

use super::client::ApiClient;
use super::errors::ApiError;

/// Refund assistant chat, sent through the authenticated path
pub struct AssistantApi {
    client: Arc<ApiClient>,
}

impl AssistantApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Ask the assistant a question about the user's refund
    ///
    /// # Errors
    ///
    /// Returns error if API request fails
    #[instrument(skip(self, question), fields(question_len = question.len()))]
    pub async fn ask(&self, question: &str) -> Result<AssistantChatResponse, ApiError> {
        let request = AssistantChatRequest { question: question.to_string() };
        let response: AssistantChatResponse =
            self.client.post_json(ASSISTANT_CHAT_PATH, &request).await?;

        debug!(
            citations = response.citations.len(),
            actions = response.actions.len(),
            confidence = ?response.confidence,
            "Assistant answered"
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use refundline_domain::{Confidence, Credential};
    use reqwest::StatusCode;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::client::ApiClientConfig;
    use crate::api::session::Session;

    fn assistant_api(server: &MockServer) -> AssistantApi {
        let config = ApiClientConfig { base_url: server.uri(), ..Default::default() };
        let session = Arc::new(Session::with_credential(Credential::new("t1")));
        AssistantApi::new(Arc::new(ApiClient::new(config, session).unwrap()))
    }

    #[tokio::test]
    async fn ask_sends_question() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ASSISTANT_CHAT_PATH))
            .and(body_json(serde_json::json!({ "question": "Where is my refund?" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "answerMarkdown": "It is being processed.",
                "confidence": "MEDIUM"
            })))
            .mount(&server)
            .await;

        let answer = assistant_api(&server).ask("Where is my refund?").await.unwrap();

        assert_eq!(answer.answer_markdown, "It is being processed.");
        assert_eq!(answer.confidence, Confidence::Medium);
        assert!(answer.citations.is_empty());
    }

    #[tokio::test]
    async fn ask_failure_uses_normalized_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ASSISTANT_CHAT_PATH))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({ "message": "question must not be blank" })),
            )
            .mount(&server)
            .await;

        let err = assistant_api(&server).ask("").await.unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(err.to_string(), "question must not be blank");
    }
}
