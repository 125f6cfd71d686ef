//! 모델 응답 텍스트 해석(코드펜스 제거 + JSON 파싱).

use serde_json::Value;

use crate::domain::audit::{AuditError, AuditResult};

/// 응답 어디에 있든 ```json / ``` 마커를 모두 지우고 앞뒤 공백을 정리한다.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// 응답 텍스트를 감사 결과로 변환한다.
/// 스키마 검증은 하지 않으며, JSON이 아니면 일반 오류로 처리한다.
pub fn interpret_reply(raw: &str) -> Result<AuditResult, AuditError> {
    let cleaned = strip_code_fences(raw);
    match serde_json::from_str::<Value>(&cleaned) {
        Ok(value) => Ok(AuditResult::new(value)),
        Err(err) => {
            tracing::debug!(error = %err, reply_len = raw.len(), "model reply is not valid JSON");
            Err(AuditError::Interpretation)
        }
    }
}
