//! 대화형 감사 폼(REPL) 인터페이스.

use std::future::Future;
use std::io::{self, Write};
use std::pin::Pin;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

use crate::application::ports::DashboardRenderer;
use crate::application::usecases::run_audit::{AuditSession, RunAuditUseCase, SubmitOutcome};
use crate::domain::audit::{AuditForm, InputMode, Platform};
use crate::interface::cli::command::SessionOptions;
use crate::interface::cli::composition::AppComposition;

#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Exit,
    Help,
    Status,
    ListPlatforms,
    SetPlatform(Platform),
    SetMode(InputMode),
    SetScript(String),
    /// 슬래시 없이 입력된 줄은 스크립트 뒤에 이어 붙인다(여러 줄 붙여넣기).
    AppendScript(String),
    SetUrl(String),
    SetKey(String),
    Audit,
    Show,
}

/// 진행 중인 감사 호출. 제출 시점의 플랫폼과 함께 결과를 돌려준다.
type PendingAudit<'r> = Pin<Box<dyn Future<Output = (Platform, SubmitOutcome)> + 'r>>;

enum ReplEvent {
    Line(Option<String>),
    Finished(Platform, SubmitOutcome),
}

/// 대화형 입력으로 폼을 채우고 `/audit`으로 제출한다.
pub async fn run_repl(composition: &AppComposition, options: SessionOptions) -> Result<()> {
    let prepared = composition.start_session_usecase().execute()?;
    let gateway = prepared.gateway;
    let mut credential_source = prepared.credential_source;
    let mut form = prepared.form;
    if let Some(platform) = options.platform {
        form.platform = platform;
    }
    if let Some(key) = options.api_key {
        form.credential = key;
        credential_source = Some("flag".to_string());
    }

    print_welcome(&form);
    let lines = BufReader::new(tokio::io::stdin()).lines();
    let use_case = composition.run_audit_usecase(gateway.as_ref());
    drive(lines, &use_case, composition.renderer(), form, credential_source).await
}

/// 입력 줄과 진행 중인 감사 호출을 함께 기다린다.
/// 호출이 끝나기 전에 들어온 `/audit`은 세션의 진행 중 플래그에 막혀 무시된다.
async fn drive<R>(
    mut lines: Lines<R>,
    use_case: &RunAuditUseCase<'_>,
    renderer: &dyn DashboardRenderer,
    mut form: AuditForm,
    mut credential_source: Option<String>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let session = AuditSession::new();
    let mut pending: Option<PendingAudit<'_>> = None;

    loop {
        if pending.is_none() {
            print!("vidaudit> ");
            io::stdout().flush()?;
        }

        // biased: 감사 future를 먼저 poll해야 다음 입력보다 먼저 진행 중 플래그가 선다.
        let event = match pending.as_mut() {
            Some(audit) => tokio::select! {
                biased;
                (platform, outcome) = audit => ReplEvent::Finished(platform, outcome),
                line = lines.next_line() => ReplEvent::Line(line?),
            },
            None => ReplEvent::Line(lines.next_line().await?),
        };

        let raw_input = match event {
            ReplEvent::Finished(platform, outcome) => {
                pending = None;
                report_outcome(use_case, renderer, platform, outcome);
                continue;
            }
            ReplEvent::Line(Some(line)) => line,
            ReplEvent::Line(None) => {
                if let Some(audit) = pending.take() {
                    let (platform, outcome) = audit.await;
                    report_outcome(use_case, renderer, platform, outcome);
                }
                println!();
                break;
            }
        };
        let input = raw_input.trim_end();
        if input.trim().is_empty() {
            continue;
        }

        let command = match parse_repl_command(input) {
            Ok(command) => command,
            Err(msg) => {
                eprintln!("error: {msg}");
                eprintln!("hint: type /help for commands");
                continue;
            }
        };

        match command {
            ReplCommand::Exit => {
                if let Some(audit) = pending.take() {
                    let (platform, outcome) = audit.await;
                    report_outcome(use_case, renderer, platform, outcome);
                }
                break;
            }
            ReplCommand::Help => print_help(),
            ReplCommand::Status => print_status(&form, credential_source.as_deref()),
            ReplCommand::ListPlatforms => print_platforms(form.platform),
            ReplCommand::SetPlatform(platform) => {
                form.platform = platform;
                println!("platform: {} {}", platform.icon(), platform.label());
            }
            ReplCommand::SetMode(mode) => {
                form.input_mode = mode;
                println!("input mode: {}", mode.code());
            }
            ReplCommand::SetScript(script) => {
                form.script = script;
                println!("script: {} chars", form.script.chars().count());
            }
            ReplCommand::AppendScript(line) => {
                if !form.script.is_empty() {
                    form.script.push('\n');
                }
                form.script.push_str(&line);
            }
            ReplCommand::SetUrl(url) => {
                form.video_url = url;
                println!("url: {}", form.video_url);
            }
            ReplCommand::SetKey(key) => {
                form.credential = key;
                credential_source = Some("typed".to_string());
                println!("api key: set");
            }
            ReplCommand::Audit if pending.is_some() => {
                let outcome = use_case.execute(&session, &form).await;
                report_outcome(use_case, renderer, form.platform, outcome);
            }
            ReplCommand::Audit => {
                let snapshot = form.clone();
                let session = &session;
                pending = Some(Box::pin(async move {
                    let outcome = use_case.execute(session, &snapshot).await;
                    (snapshot.platform, outcome)
                }));
            }
            ReplCommand::Show => {
                if session.is_in_flight() {
                    println!("audit in progress");
                } else if let Some(result) = session.last_result() {
                    println!("{}", renderer.render(&result, form.platform));
                } else if let Some(err) = session.last_error() {
                    use_case.reporter.error(&err.to_string());
                } else {
                    println!("no audit yet. fill the form and run /audit");
                }
            }
        }
    }

    Ok(())
}

fn report_outcome(
    use_case: &RunAuditUseCase<'_>,
    renderer: &dyn DashboardRenderer,
    platform: Platform,
    outcome: SubmitOutcome,
) {
    match outcome {
        SubmitOutcome::Completed(result) => {
            println!();
            println!("{}", renderer.render(&result, platform));
        }
        SubmitOutcome::Failed(err) => use_case.reporter.error(&err.to_string()),
        SubmitOutcome::Ignored => use_case
            .reporter
            .status("Audit", "an audit is already running"),
    }
}

fn parse_repl_command(input: &str) -> Result<ReplCommand, String> {
    if !input.starts_with('/') {
        return Ok(ReplCommand::AppendScript(input.to_string()));
    }

    let (head, rest) = match input.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (input, ""),
    };

    match head {
        "/exit" | "/quit" => Ok(ReplCommand::Exit),
        "/help" => Ok(ReplCommand::Help),
        "/status" => Ok(ReplCommand::Status),
        "/audit" => Ok(ReplCommand::Audit),
        "/show" => Ok(ReplCommand::Show),
        "/platform" if rest.is_empty() => Ok(ReplCommand::ListPlatforms),
        "/platform" => rest.parse().map(ReplCommand::SetPlatform),
        "/mode" if rest.is_empty() => Err("usage: /mode script|url".to_string()),
        "/mode" => rest.parse().map(ReplCommand::SetMode),
        "/script" => Ok(ReplCommand::SetScript(rest.to_string())),
        "/url" => Ok(ReplCommand::SetUrl(rest.to_string())),
        "/key" if rest.is_empty() => Err("usage: /key <token>".to_string()),
        "/key" => Ok(ReplCommand::SetKey(rest.to_string())),
        other => Err(format!("unknown command: {other}")),
    }
}

fn print_welcome(form: &AuditForm) {
    println!("vidaudit — brand audit for video scripts and links");
    println!(
        "platform: {} {}  |  mode: {}",
        form.platform.icon(),
        form.platform.label(),
        form.input_mode.code()
    );
    println!("type /help for commands");
}

fn print_help() {
    println!("/platform [name]   show or select the target platform");
    println!("/mode script|url   choose what to audit");
    println!("/script <text>     replace the script (plain lines append to it)");
    println!("/url <link>        set the video URL");
    println!("/key <token>       set the API key for this session");
    println!("/audit             run the brand audit");
    println!("/show              show the last result or error");
    println!("/status            show the current form");
    println!("/exit              quit");
}

fn print_platforms(selected: Platform) {
    for platform in Platform::ALL {
        let marker = if platform == selected { "*" } else { " " };
        println!("{marker} {} {}", platform.icon(), platform.label());
    }
}

fn print_status(form: &AuditForm, credential_source: Option<&str>) {
    println!("{:<10}: {} {}", "platform", form.platform.icon(), form.platform.label());
    println!("{:<10}: {}", "mode", form.input_mode.code());
    println!("{:<10}: {} chars", "script", form.script.trim().chars().count());
    println!(
        "{:<10}: {}",
        "url",
        if form.video_url.trim().is_empty() {
            "-"
        } else {
            form.video_url.trim()
        }
    );
    let key_state = if form.credential.trim().is_empty() {
        "missing".to_string()
    } else {
        format!("set ({})", credential_source.unwrap_or("unknown"))
    };
    println!("{:<10}: {}", "api key", key_state);
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::application::ports::{CompletionGateway, Reporter};
    use crate::domain::audit::{AuditResult, CompletionError, CompletionRequest};

    /// `release`가 울릴 때까지 응답을 붙잡아 두는 게이트웨이.
    struct HeldGateway {
        release: Arc<Notify>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CompletionGateway for HeldGateway {
        fn name(&self) -> &str {
            "held"
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<String, CompletionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.release.notified().await;
            Ok(r#"{"action":"Keep","score":90}"#.to_string())
        }
    }

    /// 중복 제출 안내를 받으면 붙잡힌 호출을 풀어준다.
    struct ReleasingReporter {
        release: Arc<Notify>,
        statuses: Mutex<Vec<String>>,
        errors: Mutex<Vec<String>>,
    }

    impl Reporter for ReleasingReporter {
        fn status(&self, _scope: &str, message: &str) {
            self.statuses.lock().unwrap().push(message.to_string());
            if message == "an audit is already running" {
                self.release.notify_one();
            }
        }

        fn error(&self, message: &str) {
            self.errors.lock().unwrap().push(message.to_string());
        }

        fn raw(&self, _line: &str) {}
    }

    struct CountingRenderer {
        renders: AtomicUsize,
    }

    impl DashboardRenderer for CountingRenderer {
        fn render(&self, _result: &AuditResult, _selected_platform: Platform) -> String {
            self.renders.fetch_add(1, Ordering::SeqCst);
            "dashboard".to_string()
        }
    }

    fn filled_form() -> AuditForm {
        AuditForm {
            script: "Automate follow-ups with WiBiz.".to_string(),
            credential: "gsk_test".to_string(),
            ..AuditForm::default()
        }
    }

    #[tokio::test]
    async fn second_audit_while_pending_does_not_call_again() {
        let release = Arc::new(Notify::new());
        let gateway = HeldGateway {
            release: release.clone(),
            calls: AtomicUsize::new(0),
        };
        let reporter = ReleasingReporter {
            release,
            statuses: Mutex::new(Vec::new()),
            errors: Mutex::new(Vec::new()),
        };
        let renderer = CountingRenderer {
            renders: AtomicUsize::new(0),
        };
        let use_case = RunAuditUseCase {
            gateway: &gateway,
            reporter: &reporter,
        };
        let lines = BufReader::new(&b"/audit\n/audit\n"[..]).lines();

        drive(lines, &use_case, &renderer, filled_form(), None)
            .await
            .unwrap();

        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
        assert_eq!(renderer.renders.load(Ordering::SeqCst), 1);
        let statuses = reporter.statuses.lock().unwrap();
        assert_eq!(
            statuses
                .iter()
                .filter(|m| *m == "an audit is already running")
                .count(),
            1
        );
        assert!(reporter.errors.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn exit_waits_for_pending_audit() {
        let release = Arc::new(Notify::new());
        // 호출이 바로 풀리도록 허가를 미리 넣어 둔다.
        release.notify_one();
        let gateway = HeldGateway {
            release: release.clone(),
            calls: AtomicUsize::new(0),
        };
        let reporter = ReleasingReporter {
            release: release.clone(),
            statuses: Mutex::new(Vec::new()),
            errors: Mutex::new(Vec::new()),
        };
        let renderer = CountingRenderer {
            renders: AtomicUsize::new(0),
        };
        let use_case = RunAuditUseCase {
            gateway: &gateway,
            reporter: &reporter,
        };
        let lines = BufReader::new(&b"/audit\n/exit\n"[..]).lines();

        drive(lines, &use_case, &renderer, filled_form(), None)
            .await
            .unwrap();

        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
        assert_eq!(renderer.renders.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn plain_text_appends_to_script() {
        assert_eq!(
            parse_repl_command("Hook: stop losing leads").unwrap(),
            ReplCommand::AppendScript("Hook: stop losing leads".to_string())
        );
    }

    #[test]
    fn platform_with_and_without_argument() {
        assert_eq!(parse_repl_command("/platform").unwrap(), ReplCommand::ListPlatforms);
        assert_eq!(
            parse_repl_command("/platform  YouTube ").unwrap(),
            ReplCommand::SetPlatform(Platform::YouTube)
        );
        assert_eq!(
            parse_repl_command("/platform X (Twitter)").unwrap(),
            ReplCommand::SetPlatform(Platform::X)
        );
        assert!(parse_repl_command("/platform vine").is_err());
    }

    #[test]
    fn script_keeps_inner_spacing() {
        assert_eq!(
            parse_repl_command("/script Save  10 hours   a week").unwrap(),
            ReplCommand::SetScript("Save  10 hours   a week".to_string())
        );
        assert_eq!(
            parse_repl_command("/script").unwrap(),
            ReplCommand::SetScript(String::new())
        );
    }

    #[test]
    fn mode_and_key_require_arguments() {
        assert_eq!(parse_repl_command("/mode url").unwrap(), ReplCommand::SetMode(InputMode::Url));
        assert!(parse_repl_command("/mode").is_err());
        assert!(parse_repl_command("/key").is_err());
        assert_eq!(
            parse_repl_command("/key gsk_abc").unwrap(),
            ReplCommand::SetKey("gsk_abc".to_string())
        );
    }

    #[test]
    fn unknown_command_is_error() {
        assert_eq!(
            parse_repl_command("/publish").unwrap_err(),
            "unknown command: /publish"
        );
    }
}
