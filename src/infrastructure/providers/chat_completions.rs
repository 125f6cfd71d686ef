//! OpenAI 호환 chat-completions(Groq 등) provider 어댑터.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use url::Url;

use crate::application::config::ProviderConfig;
use crate::application::ports::CompletionGateway;
use crate::domain::audit::{ChatMessage, CompletionError, CompletionRequest};

use super::api_runner::{build_api_client, extract_message_content, send_json};

pub struct ChatCompletionsProvider {
    client: Client,
    endpoint: Url,
    name: String,
    model: String,
    max_tokens: u32,
}

impl ChatCompletionsProvider {
    /// 설정의 api_base/model/max_tokens로 provider를 구성한다.
    pub fn from_config(provider: &ProviderConfig) -> Result<Self> {
        let endpoint = completions_endpoint(provider.api_base())?;
        let name = endpoint.host_str().unwrap_or("chat-completions").to_string();
        Ok(Self {
            client: build_api_client(),
            endpoint,
            name,
            model: provider.model().to_string(),
            max_tokens: provider.max_tokens(),
        })
    }
}

/// `{api_base}/chat/completions` 엔드포인트를 만든다.
pub fn completions_endpoint(api_base: &str) -> Result<Url> {
    let mut base = Url::parse(api_base.trim())
        .with_context(|| format!("invalid provider api_base: {api_base}"))?;
    if !matches!(base.scheme(), "http" | "https") {
        bail!("unsupported api_base scheme: {}", base.scheme());
    }
    // 마지막 경로 조각이 join에서 사라지지 않도록 슬래시를 보장한다.
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("chat/completions")
        .with_context(|| format!("failed to build completions endpoint from {api_base}"))
}

/// `{model, max_tokens, messages:[{role, content}]}` 요청 본문.
pub fn build_payload(model: &str, max_tokens: u32, messages: &[ChatMessage]) -> Value {
    let messages: Vec<Value> = messages
        .iter()
        .map(|m| json!({ "role": m.role.as_str(), "content": m.content }))
        .collect();
    json!({
        "model": model,
        "max_tokens": max_tokens,
        "messages": messages,
    })
}

#[async_trait]
impl CompletionGateway for ChatCompletionsProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let payload = build_payload(&self.model, self.max_tokens, &request.messages);
        let http = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&request.credential)
            .json(&payload);

        tracing::debug!(endpoint = %self.endpoint, model = %self.model, "requesting completion");
        let response = send_json(http).await?;
        Ok(extract_message_content(&response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit::ChatRole;

    #[test]
    fn endpoint_keeps_versioned_base_path() {
        let url = completions_endpoint("https://api.groq.com/openai/v1").unwrap();
        assert_eq!(url.as_str(), "https://api.groq.com/openai/v1/chat/completions");

        let url = completions_endpoint("http://127.0.0.1:8080/").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/chat/completions");
    }

    #[test]
    fn endpoint_rejects_garbage() {
        assert!(completions_endpoint("not a url").is_err());
        assert!(completions_endpoint("ftp://example.com/v1").is_err());
    }

    #[test]
    fn payload_matches_wire_shape() {
        let messages = vec![
            ChatMessage {
                role: ChatRole::System,
                content: "sys".to_string(),
            },
            ChatMessage {
                role: ChatRole::User,
                content: "usr".to_string(),
            },
        ];
        let payload = build_payload("llama-3.1-8b-instant", 1000, &messages);
        assert_eq!(
            payload,
            json!({
                "model": "llama-3.1-8b-instant",
                "max_tokens": 1000,
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "usr"}
                ]
            })
        );
    }

    #[test]
    fn provider_uses_config_defaults() {
        let provider = ChatCompletionsProvider::from_config(&ProviderConfig::default()).unwrap();
        assert_eq!(provider.name(), "api.groq.com");
        assert_eq!(provider.model, "llama-3.1-8b-instant");
        assert_eq!(provider.max_tokens, 1000);
    }
}
