//! 감사 요청 프롬프트 구성 규칙.

use crate::domain::audit::{
    AuditRequest, ChatMessage, ChatRole, CompletionRequest, InputMode, Platform,
};

/// 브랜드 기준과 응답 JSON 형식을 고정한 시스템 지시문. 호출마다 그대로 전송한다.
pub const AUDIT_SYSTEM_PROMPT: &str = r#"You are a senior brand strategist for WiBiz — a Singapore-based AI automation and CRM solutions company. Your job is to audit video scripts or descriptions against WiBiz's brand standards.

WiBiz Brand Standards:
- Core Services: AI automation, CRM solutions, business process automation, lead generation
- Brand Voice: Professional yet approachable, forward-thinking, results-driven, Singapore market savvy
- Must Include: Clear value proposition, technology focus, CRM or automation mention
- Hook: First 3 seconds must grab attention
- CTA: Must have a clear call-to-action
- Platform Fit: Content must match platform's native style and audience

Return ONLY valid JSON (no markdown, no explanation) in this exact format:
{
  "platform": "detected or inputted platform",
  "brand_alignment": "Yes / No / Partially",
  "crm_mention": "Yes / No / Partially",
  "action": "Keep / Revise / Delete",
  "score": 0-100,
  "hook_strength": "Strong / Moderate / Weak",
  "cta_present": true or false,
  "verdict": "one sentence summary",
  "issues": ["issue 1", "issue 2"],
  "suggestions": ["suggestion 1", "suggestion 2"],
  "revised_angle": "A one paragraph suggested revision angle for the script"
}"#;

/// 입력 방식에 맞춰 사용자 메시지를 만든다.
pub fn build_user_message(platform: Platform, input_mode: InputMode, content: &str) -> String {
    match input_mode {
        InputMode::Url => format!(
            "Please audit this video content for the {platform} platform.\nVideo URL: {content}"
        ),
        InputMode::Script => format!(
            "Please audit this video script/description for the {platform} platform:\n\n{content}"
        ),
    }
}

/// system + user 2개 메시지로 이루어진 completion 요청을 구성한다.
pub fn build_completion_request(request: &AuditRequest) -> CompletionRequest {
    CompletionRequest {
        credential: request.credential.clone(),
        messages: vec![
            ChatMessage {
                role: ChatRole::System,
                content: AUDIT_SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: ChatRole::User,
                content: build_user_message(
                    request.platform,
                    request.input_mode,
                    &request.content,
                ),
            },
        ],
    }
}
