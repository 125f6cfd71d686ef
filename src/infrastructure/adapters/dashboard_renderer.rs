//! 대시보드 렌더링 포트 구현 어댑터.

use std::env;
use std::io::{self, IsTerminal};

use crate::application::ports::DashboardRenderer;
use crate::domain::audit::{AuditResult, Platform};
use crate::infrastructure::render::render_dashboard;

/// stdout이 TTY이고 `NO_COLOR`가 없을 때만 색을 입힌다.
pub struct TerminalDashboardRenderer {
    color: bool,
}

impl Default for TerminalDashboardRenderer {
    fn default() -> Self {
        Self {
            color: io::stdout().is_terminal() && env::var_os("NO_COLOR").is_none(),
        }
    }
}

impl DashboardRenderer for TerminalDashboardRenderer {
    fn render(&self, result: &AuditResult, selected_platform: Platform) -> String {
        render_dashboard(result, selected_platform, self.color)
    }
}
