//! 적용 설정 진단(inspection) 뷰 모델.

use serde::Serialize;

use super::loader::LoadedConfig;
use super::resolve::resolve_api_key;
use crate::application::config::{Config, DefaultsConfig};

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub defaults: DefaultsConfig,
    pub effective_platform: String,
    pub effective_input_mode: String,
    pub provider: EffectiveProvider,
}

/// 자격증명 값은 노출하지 않고 출처만 표시한다.
#[derive(Debug, Clone, Serialize)]
pub struct EffectiveProvider {
    pub api_base: String,
    pub model: String,
    pub max_tokens: u32,
    pub api_key_source: Option<String>,
    pub api_key_resolved: bool,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let config = &loaded.config;
        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            defaults: config.defaults.clone(),
            effective_platform: config.default_platform().label().to_string(),
            effective_input_mode: config.default_input_mode().code().to_string(),
            provider: EffectiveProvider::from_config(config),
        }
    }
}

impl EffectiveProvider {
    fn from_config(config: &Config) -> Self {
        let provider = &config.provider;
        let resolution = resolve_api_key(provider);
        Self {
            api_base: provider.api_base().to_string(),
            model: provider.model().to_string(),
            max_tokens: provider.max_tokens(),
            api_key_resolved: resolution.credential.is_some(),
            api_key_source: resolution.source,
        }
    }
}
