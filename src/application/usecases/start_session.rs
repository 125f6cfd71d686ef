//! 설정을 읽어 감사 폼 초기값과 completion 게이트웨이를 준비하는 유스케이스.

use anyhow::{Context, Result};

use crate::application::ports::{
    CompletionGateway, CompletionGatewayFactory, ConfigRepository, CredentialResolver,
};
use crate::domain::audit::AuditForm;

/// 폼 초기값 + 호출 준비가 끝난 게이트웨이.
pub struct PreparedSession {
    pub form: AuditForm,
    pub gateway: Box<dyn CompletionGateway>,
    /// 기본 자격증명 출처(inline/env:NAME). 값 자체는 담지 않는다.
    pub credential_source: Option<String>,
}

pub struct StartSessionUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub credential_resolver: &'a dyn CredentialResolver,
    pub gateway_factory: &'a dyn CompletionGatewayFactory,
}

impl<'a> StartSessionUseCase<'a> {
    pub fn execute(&self) -> Result<PreparedSession> {
        let config = self.config_repo.load().context("failed to load config")?;
        let gateway = self
            .gateway_factory
            .build(&config)
            .context("failed to prepare completion endpoint")?;
        let resolution = self.credential_resolver.resolve(&config);

        tracing::debug!(
            gateway = gateway.name(),
            credential_source = resolution.source.as_deref().unwrap_or("none"),
            "session prepared"
        );

        Ok(PreparedSession {
            form: AuditForm {
                platform: config.default_platform(),
                input_mode: config.default_input_mode(),
                credential: resolution.credential.unwrap_or_default(),
                ..AuditForm::default()
            },
            gateway,
            credential_source: resolution.source,
        })
    }
}
