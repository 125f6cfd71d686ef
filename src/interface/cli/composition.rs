//! 애플리케이션 조립(composition root) 모듈.

use crate::application::ports::{CompletionGateway, DashboardRenderer, Reporter};
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::application::usecases::run_audit::RunAuditUseCase;
use crate::application::usecases::start_session::StartSessionUseCase;
use crate::infrastructure::adapters::{
    ChatCompletionsGatewayFactory, ConfigCredentialResolver, ConsoleReporter, JsonConfigRepository,
    TerminalDashboardRenderer,
};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    credential_resolver: ConfigCredentialResolver,
    gateway_factory: ChatCompletionsGatewayFactory,
    renderer: TerminalDashboardRenderer,
    reporter: ConsoleReporter,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self::new(TerminalDashboardRenderer::default())
    }
}

impl AppComposition {
    /// 렌더러(색상 여부)를 외부에서 주입한다.
    pub fn new(renderer: TerminalDashboardRenderer) -> Self {
        Self {
            config_repo: JsonConfigRepository,
            credential_resolver: ConfigCredentialResolver,
            gateway_factory: ChatCompletionsGatewayFactory,
            renderer,
            reporter: ConsoleReporter::new(),
        }
    }

    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    /// 세션 준비(설정 로딩/게이트웨이 구성) 유스케이스를 생성한다.
    pub fn start_session_usecase(&self) -> StartSessionUseCase<'_> {
        StartSessionUseCase {
            config_repo: &self.config_repo,
            credential_resolver: &self.credential_resolver,
            gateway_factory: &self.gateway_factory,
        }
    }

    /// 감사 실행 유스케이스를 생성한다.
    pub fn run_audit_usecase<'a>(
        &'a self,
        gateway: &'a dyn CompletionGateway,
    ) -> RunAuditUseCase<'a> {
        RunAuditUseCase {
            gateway,
            reporter: &self.reporter,
        }
    }

    pub fn renderer(&self) -> &dyn DashboardRenderer {
        &self.renderer
    }

    pub fn reporter(&self) -> &dyn Reporter {
        &self.reporter
    }
}
