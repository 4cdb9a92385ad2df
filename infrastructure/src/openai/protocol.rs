//! Chat-completions wire types
//!
//! Only the fields this adapter sends or reads are modelled; unknown
//! response fields are ignored.

use super::error::{OpenAiError, Result};
use arena_domain::CompletionRequest;
use serde::{Deserialize, Serialize};

/// Request body for `POST {base_url}/chat/completions`
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

impl<'a> From<&'a CompletionRequest> for ChatCompletionRequest<'a> {
    fn from(request: &'a CompletionRequest) -> Self {
        Self {
            model: request.model.as_str(),
            messages: request
                .messages
                .iter()
                .map(|m| ChatMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: request.params.temperature,
            max_tokens: request.params.max_tokens,
            top_p: request.params.top_p,
            frequency_penalty: request.params.frequency_penalty,
            presence_penalty: request.params.presence_penalty,
            stream: false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first choice.
    pub fn into_text(self) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .ok_or(OpenAiError::NoChoices)?
            .message
            .content
            .ok_or(OpenAiError::NoContent)
    }
}

/// Decode a successful response body into the first choice's text.
pub fn parse_response(body: &str) -> Result<String> {
    serde_json::from_str::<ChatCompletionResponse>(body)?.into_text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_domain::{GenerationParams, Model, Stage};
    use std::time::Duration;

    #[test]
    fn test_request_body() {
        let request = CompletionRequest::new(
            Stage::Stances,
            Model::DeepSeekChat,
            "系统",
            "生成立场",
            GenerationParams::default(),
            Duration::from_secs(15),
        );
        let body = serde_json::to_value(ChatCompletionRequest::from(&request)).unwrap();

        assert_eq!(body["model"], "deepseek-chat");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "系统");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "生成立场");
        assert_eq!(body["max_tokens"], 1000);
        assert_eq!(body["stream"], false);
        // Routing metadata never reaches the wire
        assert!(body.get("stage").is_none());
        assert!(body.get("timeout").is_none());
    }

    #[test]
    fn test_parse_first_choice() {
        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "{\"pro\": \"是\"}"}},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
            ],
            "usage": {"total_tokens": 12}
        }"#;
        assert_eq!(parse_response(body).unwrap(), r#"{"pro": "是"}"#);
    }

    #[test]
    fn test_zero_choices() {
        assert!(matches!(
            parse_response(r#"{"choices": []}"#),
            Err(OpenAiError::NoChoices)
        ));
        assert!(matches!(parse_response("{}"), Err(OpenAiError::NoChoices)));
    }

    #[test]
    fn test_null_content() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        assert!(matches!(parse_response(body), Err(OpenAiError::NoContent)));
    }

    #[test]
    fn test_not_json() {
        assert!(matches!(
            parse_response("<html>bad gateway</html>"),
            Err(OpenAiError::Decode(_))
        ));
    }
}
