//! Provider HTTP API 호출 공용 유틸리티.

use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use crate::domain::audit::CompletionError;

/// Provider API 호출용 기본 HTTP 클라이언트를 생성한다.
/// 타임아웃은 전송 계층 기본값을 그대로 쓴다.
pub fn build_api_client() -> Client {
    // TLS 설정 실패 등 예외 상황에서는 기본 클라이언트로 폴백한다.
    Client::builder()
        .user_agent(concat!("vidaudit/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// JSON 응답을 기대하는 요청을 전송하고 실패/파싱 오류를 표준화한다.
pub async fn send_json(request: RequestBuilder) -> Result<Value, CompletionError> {
    let response = request
        .send()
        .await
        .map_err(|err| CompletionError::Transport(err.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| CompletionError::Transport(err.to_string()))?;

    if !status.is_success() {
        tracing::debug!(
            status = status.as_u16(),
            body_len = body.len(),
            "completion endpoint returned error"
        );
        return Err(CompletionError::Status {
            status: status.as_u16(),
            message: extract_error_message(&body),
        });
    }

    serde_json::from_str(&body).map_err(|_| CompletionError::InvalidBody)
}

/// 오류 응답 본문에서 `error.message`를 꺼낸다. 파싱 불가/빈 값이면 `None`.
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .pointer("/error/message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|msg| !msg.is_empty())
        .map(str::to_string)
}

/// 성공 응답에서 `choices[0].message.content`를 꺼낸다. 없으면 빈 문자열.
pub fn extract_message_content(response: &Value) -> String {
    response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn error_message_is_read_from_envelope() {
        assert_eq!(
            extract_error_message(r#"{"error":{"message":"bad key","type":"invalid_request_error"}}"#),
            Some("bad key".to_string())
        );
    }

    #[test]
    fn unparsable_or_empty_error_body_yields_none() {
        assert_eq!(extract_error_message("<html>502 Bad Gateway</html>"), None);
        assert_eq!(extract_error_message(r#"{"error":{"message":""}}"#), None);
        assert_eq!(extract_error_message(r#"{"detail":"nope"}"#), None);
    }

    #[test]
    fn content_is_taken_from_first_choice() {
        let response = json!({
            "choices": [
                {"message": {"role": "assistant", "content": "{\"score\":1}"}},
                {"message": {"role": "assistant", "content": "second"}}
            ]
        });
        assert_eq!(extract_message_content(&response), "{\"score\":1}");
    }

    #[test]
    fn missing_choices_yield_empty_text() {
        assert_eq!(extract_message_content(&json!({"choices": []})), "");
        assert_eq!(extract_message_content(&json!({})), "");
    }
}
