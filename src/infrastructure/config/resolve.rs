//! 설정 값(api_key/env)을 실제 런타임 자격증명으로 해석하는 유틸리티.
//!
//! - 환경변수 접근은 인프라 계층에서만 수행한다.

use std::env;

use crate::application::config::ProviderConfig;
use crate::application::ports::CredentialResolution;

/// `api_key` 직접값 우선, 없으면 `api_key_env` 환경변수를 조회한다.
pub fn resolve_api_key(cfg: &ProviderConfig) -> CredentialResolution {
    resolve_api_key_with(cfg, |name| env::var(name).ok())
}

/// 환경 조회 함수를 주입받는 버전(테스트용).
pub fn resolve_api_key_with(
    cfg: &ProviderConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> CredentialResolution {
    if let Some(key) = cfg.api_key.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        return CredentialResolution {
            credential: Some(key.to_string()),
            source: Some("inline".to_string()),
        };
    }

    let env_name = cfg.api_key_env().trim();
    if env_name.is_empty() {
        return CredentialResolution::default();
    }

    match lookup(env_name).map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => CredentialResolution {
            credential: Some(v),
            source: Some(format!("env:{env_name}")),
        },
        _ => CredentialResolution {
            credential: None,
            source: Some(format!("env:{env_name} (missing)")),
        },
    }
}
