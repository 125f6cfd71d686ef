//! vidaudit library root.
//! Clean Architecture 계층(domain/application/infrastructure/interface)을 외부에 노출한다.

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use interface::cli::{AppComposition, AuditOptions};

/// 라이브러리 직접 호출용 단발 감사 함수. 감사가 성공하면 `true`.
pub async fn run(options: AuditOptions) -> Result<bool> {
    let composition = AppComposition::default();
    interface::cli::run_audit_command(&composition, options).await
}

/// 설정 점검 JSON 출력용 함수.
pub fn inspect_config_pretty_json() -> Result<String> {
    let composition = AppComposition::default();
    composition.inspect_config_usecase().execute()
}
