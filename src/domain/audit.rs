//! 브랜드 감사 도메인 엔티티/값 객체.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

/// 감사 대상 플랫폼(고정 열거).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    #[default]
    TikTok,
    Instagram,
    Facebook,
    YouTube,
    X,
    LinkedIn,
}

impl Platform {
    pub const ALL: [Platform; 6] = [
        Self::TikTok,
        Self::Instagram,
        Self::Facebook,
        Self::YouTube,
        Self::X,
        Self::LinkedIn,
    ];

    /// 프롬프트/화면에 쓰는 표시 이름.
    pub fn label(self) -> &'static str {
        match self {
            Self::TikTok => "TikTok",
            Self::Instagram => "Instagram",
            Self::Facebook => "Facebook",
            Self::YouTube => "YouTube",
            Self::X => "X (Twitter)",
            Self::LinkedIn => "LinkedIn",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::TikTok => "♪",
            Self::Instagram => "◈",
            Self::Facebook => "ƒ",
            Self::YouTube => "▶",
            Self::X => "𝕏",
            Self::LinkedIn => "in",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Platform {
    type Err = String;

    /// 대소문자 무시, 짧은 별칭(tt/ig/fb/yt/x/li)도 허용한다.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "tiktok" | "tt" => Ok(Self::TikTok),
            "instagram" | "ig" => Ok(Self::Instagram),
            "facebook" | "fb" => Ok(Self::Facebook),
            "youtube" | "yt" => Ok(Self::YouTube),
            "x" | "twitter" | "x (twitter)" => Ok(Self::X),
            "linkedin" | "li" => Ok(Self::LinkedIn),
            other => Err(format!(
                "unknown platform: {other} (expected one of: tiktok, instagram, facebook, youtube, x, linkedin)"
            )),
        }
    }
}

/// 입력 방식(스크립트 본문 / 영상 URL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Script,
    Url,
}

impl InputMode {
    pub fn code(self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Url => "url",
        }
    }
}

impl FromStr for InputMode {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "script" => Ok(Self::Script),
            "url" => Ok(Self::Url),
            other => Err(format!("unknown input mode: {other} (expected script or url)")),
        }
    }
}

/// 제출 직전의 폼 입력값.
#[derive(Debug, Clone, Default)]
pub struct AuditForm {
    pub platform: Platform,
    pub input_mode: InputMode,
    pub script: String,
    pub video_url: String,
    pub credential: String,
}

impl AuditForm {
    /// 현재 입력 방식에 해당하는 본문.
    pub fn active_content(&self) -> &str {
        match self.input_mode {
            InputMode::Script => &self.script,
            InputMode::Url => &self.video_url,
        }
    }
}

/// 검증을 통과한 1회성 감사 요청.
#[derive(Clone)]
pub struct AuditRequest {
    pub platform: Platform,
    pub input_mode: InputMode,
    pub content: String,
    pub credential: String,
}

impl AuditRequest {
    /// 본문 -> 자격증명 순서로 검증한다. 실패 시 네트워크 호출은 일어나지 않는다.
    pub fn from_form(form: &AuditForm) -> Result<Self, ValidationError> {
        let content = form.active_content().trim();
        if content.is_empty() {
            return Err(ValidationError::MissingContent);
        }
        let credential = form.credential.trim();
        if credential.is_empty() {
            return Err(ValidationError::MissingCredential);
        }

        Ok(Self {
            platform: form.platform,
            input_mode: form.input_mode,
            content: content.to_string(),
            credential: credential.to_string(),
        })
    }
}

// credential은 로그/디버그 출력에 남기지 않는다.
impl fmt::Debug for AuditRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditRequest")
            .field("platform", &self.platform)
            .field("input_mode", &self.input_mode)
            .field("content_len", &self.content.len())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
}

impl ChatRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// completion 엔드포인트로 보낼 대화 + 인증 정보.
#[derive(Clone)]
pub struct CompletionRequest {
    pub credential: String,
    pub messages: Vec<ChatMessage>,
}

impl fmt::Debug for CompletionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionRequest")
            .field("messages", &self.messages.len())
            .finish_non_exhaustive()
    }
}

/// 모델 응답(JSON)을 검증 없이 그대로 보관하는 감사 결과.
///
/// 필드가 없거나 타입이 다르면 접근자는 `None`을 돌려준다.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditResult {
    raw: Value,
}

impl AuditResult {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn platform(&self) -> Option<&str> {
        self.str_field("platform")
    }

    pub fn brand_alignment(&self) -> Option<&str> {
        self.str_field("brand_alignment")
    }

    pub fn crm_mention(&self) -> Option<&str> {
        self.str_field("crm_mention")
    }

    pub fn action(&self) -> Option<&str> {
        self.str_field("action")
    }

    /// 원본 점수. 숫자 문자열(`"80"`)도 받아들인다. 구간 판정은 이 값으로 한다.
    pub fn score_value(&self) -> Option<f64> {
        let value = self.raw.get("score")?;
        value
            .as_f64()
            .or_else(|| value.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
            .filter(|f| f.is_finite())
    }

    /// 표시용 정수 점수(반올림).
    pub fn score(&self) -> Option<i64> {
        self.score_value().map(|f| f.round() as i64)
    }

    pub fn hook_strength(&self) -> Option<&str> {
        self.str_field("hook_strength")
    }

    pub fn cta_present(&self) -> bool {
        self.raw
            .get("cta_present")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn verdict(&self) -> Option<&str> {
        self.str_field("verdict")
    }

    pub fn issues(&self) -> Vec<&str> {
        self.str_list("issues")
    }

    pub fn suggestions(&self) -> Vec<&str> {
        self.str_list("suggestions")
    }

    pub fn revised_angle(&self) -> Option<&str> {
        self.str_field("revised_angle").filter(|s| !s.is_empty())
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.raw.get(key).and_then(Value::as_str)
    }

    fn str_list(&self, key: &str) -> Vec<&str> {
        self.raw
            .get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// 제출 전 입력 검증 오류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please provide a video URL or script.")]
    MissingContent,
    #[error("Please enter your API key.")]
    MissingCredential,
}

/// completion 호출 단계 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// non-2xx 응답. 본문의 `error.message`가 없으면 상태코드로 메시지를 만든다.
    #[error("{}", status_message(.status, .message))]
    Status { status: u16, message: Option<String> },
    /// 전송 계층 실패(메시지 그대로 전달).
    #[error("{0}")]
    Transport(String),
    /// 2xx 이지만 JSON 본문이 아님.
    #[error("invalid completion response body")]
    InvalidBody,
}

fn status_message(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("API error {status}"),
    }
}

/// 사용자에게 표시되는 단일 감사 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Upstream(String),
    #[error("Something went wrong. Check your API key and try again.")]
    Interpretation,
}

impl From<CompletionError> for AuditError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::InvalidBody => Self::Interpretation,
            other => Self::Upstream(other.to_string()),
        }
    }
}
