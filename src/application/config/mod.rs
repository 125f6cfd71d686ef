//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.

use serde::{Deserialize, Serialize};

use crate::domain::audit::{InputMode, Platform};

pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 폼 초기값
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// completion 엔드포인트 설정
    #[serde(default)]
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultsConfig {
    /// 기본 플랫폼(tiktok/instagram/...)
    pub platform: Option<String>,
    /// 기본 입력 방식(script/url)
    pub input_mode: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProviderConfig {
    /// API 베이스 URL(`/chat/completions`가 뒤에 붙는다)
    pub api_base: Option<String>,
    /// 모델 식별자
    pub model: Option<String>,
    /// 최대 출력 토큰
    pub max_tokens: Option<u32>,
    /// 인증 키(직접값, 권장하지 않음)
    pub api_key: Option<String>,
    /// 인증 키를 읽을 환경변수 이름
    pub api_key_env: Option<String>,
}

impl Config {
    /// 설정값이 잘못되었으면 기본 플랫폼(TikTok)으로 대체한다.
    pub fn default_platform(&self) -> Platform {
        self.defaults
            .platform
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    pub fn default_input_mode(&self) -> InputMode {
        self.defaults
            .input_mode
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);
        self.provider.merge_from(other.provider);
    }
}

impl DefaultsConfig {
    pub(crate) fn merge_from(&mut self, other: DefaultsConfig) {
        if other.platform.is_some() {
            self.platform = other.platform;
        }
        if other.input_mode.is_some() {
            self.input_mode = other.input_mode;
        }
    }
}

impl ProviderConfig {
    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    pub fn api_key_env(&self) -> &str {
        self.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV)
    }

    pub(crate) fn merge_from(&mut self, other: ProviderConfig) {
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
        if other.model.is_some() {
            self.model = other.model;
        }
        if other.max_tokens.is_some() {
            self.max_tokens = other.max_tokens;
        }
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.api_key_env.is_some() {
            self.api_key_env = other.api_key_env;
        }
    }
}
