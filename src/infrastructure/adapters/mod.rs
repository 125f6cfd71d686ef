//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod config_repository;
mod credential_resolver;
mod dashboard_renderer;
mod gateway_factory;
mod reporter;

pub use config_repository::JsonConfigRepository;
pub use credential_resolver::ConfigCredentialResolver;
pub use dashboard_renderer::TerminalDashboardRenderer;
pub use gateway_factory::ChatCompletionsGatewayFactory;
pub use reporter::ConsoleReporter;
