//! OpenAI-compatible completion engine implementation.
//!
//! One engine serves any OpenAI-compatible chat completions API via a
//! configurable base URL. Uses [`async_openai`] for type-safe
//! request/response handling; streaming is not part of the engine
//! surface.

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};
use secrecy::{ExposeSecret, SecretString};

use halcyon_core::llm::engine::CompletionEngine;
use halcyon_types::completion::{CompletionError, CompletionRequest, CompletionResponse};
use halcyon_types::message::MessageRole;

/// Completion engine for any OpenAI-compatible API.
///
/// Does NOT derive Debug to prevent accidental exposure of the API key
/// stored inside the `async_openai::Client`.
pub struct OpenAiCompatEngine {
    client: Client<OpenAIConfig>,
    provider_name: String,
}

impl OpenAiCompatEngine {
    /// Create an engine against the given base URL.
    pub fn new(api_key: SecretString, base_url: &str, provider_name: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key.expose_secret())
            .with_api_base(base_url);

        Self {
            client: Client::with_config(config),
            provider_name: provider_name.to_string(),
        }
    }

    /// Create an engine against the OpenAI API.
    pub fn openai(api_key: SecretString) -> Self {
        Self::new(api_key, "https://api.openai.com/v1", "openai")
    }

    fn build_request(&self, request: &CompletionRequest) -> CreateChatCompletionRequest {
        let messages = request
            .messages
            .iter()
            .map(|turn| match turn.role {
                MessageRole::System => {
                    ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                        content: ChatCompletionRequestSystemMessageContent::Text(
                            turn.content.clone(),
                        ),
                        name: None,
                    })
                }
                MessageRole::User => {
                    ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                        content: ChatCompletionRequestUserMessageContent::Text(
                            turn.content.clone(),
                        ),
                        name: None,
                    })
                }
                MessageRole::Assistant => {
                    #[allow(deprecated)]
                    ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                        content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                            turn.content.clone(),
                        )),
                        refusal: None,
                        name: None,
                        audio: None,
                        tool_calls: None,
                        function_call: None,
                    })
                }
            })
            .collect();

        CreateChatCompletionRequest {
            model: request.model.clone(),
            messages,
            max_completion_tokens: Some(request.max_tokens),
            temperature: request.temperature.map(|t| t as f32),
            presence_penalty: request.presence_penalty.map(|p| p as f32),
            frequency_penalty: request.frequency_penalty.map(|p| p as f32),
            ..Default::default()
        }
    }
}

fn map_openai_error(err: async_openai::error::OpenAIError) -> CompletionError {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::ApiError(api_err) => {
            let code = api_err.code.as_deref().unwrap_or("");
            let error_type = api_err.r#type.as_deref().unwrap_or("");

            if code == "authentication_error"
                || error_type == "authentication_error"
                || api_err.message.contains("Incorrect API key")
                || api_err.message.contains("Invalid API key")
            {
                CompletionError::AuthenticationFailed
            } else if code == "invalid_request_error" || error_type == "invalid_request_error" {
                CompletionError::InvalidRequest(api_err.message.clone())
            } else {
                CompletionError::Provider(err.to_string())
            }
        }
        OpenAIError::JSONDeserialize(..) => CompletionError::Deserialization(err.to_string()),
        OpenAIError::InvalidArgument(msg) => CompletionError::InvalidRequest(msg.clone()),
        _ => CompletionError::Provider(err.to_string()),
    }
}

impl CompletionEngine for OpenAiCompatEngine {
    fn name(&self) -> &str {
        &self.provider_name
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        let oai_request = self.build_request(request);

        let response = self
            .client
            .chat()
            .create(oai_request)
            .await
            .map_err(map_openai_error)?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        Ok(CompletionResponse {
            id: response.id,
            content,
            model: response.model,
        })
    }
}
