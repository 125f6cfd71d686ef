//! 콘솔 리포터 포트 구현 어댑터.

use std::io::{self, IsTerminal};

use crossterm::style::Stylize;

use crate::application::ports::Reporter;

/// 콘솔 전용 리포터 어댑터.
/// 진행 상태/오류는 stderr로 보내 `--json` 출력과 섞이지 않게 한다.
pub struct ConsoleReporter {
    interactive: bool,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            interactive: io::stderr().is_terminal(),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn status(&self, scope: &str, message: &str) {
        if self.interactive {
            eprintln!("[{:<8}] {}", scope, format!("⟳ {message}").dark_grey());
        } else {
            eprintln!("[{:<8}] {}", scope, message);
        }
    }

    fn error(&self, message: &str) {
        if self.interactive {
            eprintln!("{}", format!("⚠ {message}").red());
        } else {
            eprintln!("⚠ {message}");
        }
    }

    fn raw(&self, line: &str) {
        println!("{}", line);
    }
}
