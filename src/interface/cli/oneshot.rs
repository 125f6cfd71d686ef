//! 단발(non-interactive) 감사 실행.

use anyhow::{Context, Result};

use crate::application::usecases::run_audit::{AuditSession, SubmitOutcome};
use crate::domain::audit::InputMode;
use crate::interface::cli::command::{AuditInput, AuditOptions};
use crate::interface::cli::composition::AppComposition;

/// CLI 옵션으로 폼을 채워 1회 감사한다.
/// 감사 자체가 실패하면 `Ok(false)`, 준비 단계 실패는 `Err`.
pub async fn run_audit_command(
    composition: &AppComposition,
    options: AuditOptions,
) -> Result<bool> {
    let prepared = composition.start_session_usecase().execute()?;
    let mut form = prepared.form;

    if let Some(platform) = options.session.platform {
        form.platform = platform;
    }
    if let Some(key) = options.session.api_key {
        form.credential = key;
    }
    match options.input {
        AuditInput::Script(script) => {
            form.input_mode = InputMode::Script;
            form.script = script;
        }
        AuditInput::Url(url) => {
            form.input_mode = InputMode::Url;
            form.video_url = url;
        }
    }

    let session = AuditSession::new();
    let outcome = composition
        .run_audit_usecase(prepared.gateway.as_ref())
        .execute(&session, &form)
        .await;

    match outcome {
        SubmitOutcome::Completed(result) => {
            if options.json {
                let json = serde_json::to_string_pretty(result.raw())
                    .context("failed to serialize audit result")?;
                composition.reporter().raw(&json);
            } else {
                composition
                    .reporter()
                    .raw(&composition.renderer().render(&result, form.platform));
            }
            Ok(true)
        }
        SubmitOutcome::Failed(err) => {
            composition.reporter().error(&err.to_string());
            Ok(false)
        }
        SubmitOutcome::Ignored => Ok(false),
    }
}
