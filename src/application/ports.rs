//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::Config;
use crate::domain::audit::{AuditResult, CompletionError, CompletionRequest, Platform};

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 기본 자격증명 해석 결과.
#[derive(Debug, Clone, Default)]
pub struct CredentialResolution {
    pub credential: Option<String>,
    pub source: Option<String>,
}

/// 설정/환경에서 기본 자격증명을 찾는 포트.
pub trait CredentialResolver: Send + Sync {
    fn resolve(&self, config: &Config) -> CredentialResolution;
}

/// chat-completion 엔드포인트 호출 포트.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    fn name(&self) -> &str;
    /// 대화를 보내고 `choices[0].message.content` 텍스트를 돌려받는다.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

/// 설정에 맞는 completion 게이트웨이를 생성하는 팩토리 포트.
pub trait CompletionGatewayFactory: Send + Sync {
    fn build(&self, config: &Config) -> Result<Box<dyn CompletionGateway>>;
}

/// 감사 결과 대시보드 렌더링 포트.
pub trait DashboardRenderer: Send + Sync {
    fn render(&self, result: &AuditResult, selected_platform: Platform) -> String;
}

/// 콘솔/로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn status(&self, scope: &str, message: &str);
    fn error(&self, message: &str);
    fn raw(&self, line: &str);
}
