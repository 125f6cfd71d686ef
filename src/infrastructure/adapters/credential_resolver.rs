//! 기본 자격증명 해석 포트 구현 어댑터.

use crate::application::config::Config;
use crate::application::ports::{CredentialResolution, CredentialResolver};
use crate::infrastructure::config::resolve_api_key;

/// 설정의 `provider.api_key` / `provider.api_key_env`에서 자격증명을 찾는다.
pub struct ConfigCredentialResolver;

impl CredentialResolver for ConfigCredentialResolver {
    fn resolve(&self, config: &Config) -> CredentialResolution {
        resolve_api_key(&config.provider)
    }
}
