//! 폼 제출부터 completion 호출, 응답 해석까지의 감사 실행 유스케이스.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::application::ports::{CompletionGateway, Reporter};
use crate::domain::audit::{AuditError, AuditForm, AuditRequest, AuditResult};
use crate::domain::interpret::interpret_reply;
use crate::domain::prompt::build_completion_request;

/// 1회 제출 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Completed(AuditResult),
    Failed(AuditError),
    /// 이미 진행 중인 호출이 있어 아무 것도 하지 않음.
    Ignored,
}

#[derive(Debug, Default)]
struct SessionView {
    result: Option<AuditResult>,
    error: Option<AuditError>,
}

/// 마지막 결과/오류와 진행 중 플래그를 보관하는 감사 세션.
/// 동시에 하나의 호출만 진행된다.
#[derive(Debug, Default)]
pub struct AuditSession {
    in_flight: AtomicBool,
    view: Mutex<SessionView>,
}

impl AuditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn last_result(&self) -> Option<AuditResult> {
        self.view.lock().ok().and_then(|v| v.result.clone())
    }

    pub fn last_error(&self) -> Option<AuditError> {
        self.view.lock().ok().and_then(|v| v.error.clone())
    }

    fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard { session: self })
    }

    /// 마지막 결과/오류를 비운다.
    pub fn clear(&self) {
        if let Ok(mut view) = self.view.lock() {
            view.result = None;
            view.error = None;
        }
    }

    fn record(&self, outcome: &Result<AuditResult, AuditError>) {
        if let Ok(mut view) = self.view.lock() {
            match outcome {
                Ok(result) => {
                    view.result = Some(result.clone());
                    view.error = None;
                }
                Err(err) => {
                    view.result = None;
                    view.error = Some(err.clone());
                }
            }
        }
    }
}

/// 어떤 경로로 끝나든 진행 중 플래그를 해제한다.
struct InFlightGuard<'a> {
    session: &'a AuditSession,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.session.in_flight.store(false, Ordering::Release);
    }
}

pub struct RunAuditUseCase<'a> {
    pub gateway: &'a dyn CompletionGateway,
    pub reporter: &'a dyn Reporter,
}

impl<'a> RunAuditUseCase<'a> {
    /// 폼을 검증하고 completion 1회 호출 후 결과를 세션에 기록한다.
    pub async fn execute(&self, session: &AuditSession, form: &AuditForm) -> SubmitOutcome {
        let Some(_guard) = session.try_begin() else {
            tracing::debug!("audit already in flight; ignoring submit");
            return SubmitOutcome::Ignored;
        };
        session.clear();

        let outcome = self.run(form).await;
        session.record(&outcome);

        match outcome {
            Ok(result) => SubmitOutcome::Completed(result),
            Err(err) => SubmitOutcome::Failed(err),
        }
    }

    async fn run(&self, form: &AuditForm) -> Result<AuditResult, AuditError> {
        let request = AuditRequest::from_form(form)?;

        self.reporter.status("Audit", "Preparing audit request…");
        let completion = build_completion_request(&request);
        tracing::debug!(?request, gateway = self.gateway.name(), "submitting audit");

        self.reporter.status("Audit", "Analyzing brand alignment…");
        let started = Instant::now();
        let reply = self.gateway.complete(&completion).await.map_err(|err| {
            tracing::warn!(error = %err, "completion call failed");
            AuditError::from(err)
        })?;
        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            reply_len = reply.len(),
            "completion received"
        );

        self.reporter.status("Audit", "Processing results…");
        interpret_reply(&reply)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;
    use serde_json::json;
    use tokio::sync::Notify;

    use super::*;
    use crate::domain::audit::{CompletionError, CompletionRequest, ValidationError};

    #[derive(Default)]
    struct SilentReporter;

    impl Reporter for SilentReporter {
        fn status(&self, _scope: &str, _message: &str) {}
        fn error(&self, _message: &str) {}
        fn raw(&self, _line: &str) {}
    }

    struct FakeGateway {
        reply: Result<String, CompletionError>,
        calls: AtomicUsize,
        last_user_message: Mutex<Option<String>>,
    }

    impl FakeGateway {
        fn new(reply: Result<String, CompletionError>) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
                last_user_message: Mutex::new(None),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionGateway for FakeGateway {
        fn name(&self) -> &str {
            "fake"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_user_message.lock().unwrap() =
                request.messages.last().map(|m| m.content.clone());
            self.reply.clone()
        }
    }

    fn filled_form() -> AuditForm {
        AuditForm {
            script: "Automate your CRM with WiBiz. Book a demo today!".to_string(),
            credential: "gsk_test".to_string(),
            ..AuditForm::default()
        }
    }

    fn valid_reply() -> String {
        "```json\n{\"platform\":\"TikTok\",\"action\":\"Keep\",\"score\":81,\"issues\":[],\"suggestions\":[\"x\"]}\n```".to_string()
    }

    #[tokio::test]
    async fn blank_content_never_calls_gateway() {
        let gateway = FakeGateway::new(Ok(valid_reply()));
        let use_case = RunAuditUseCase {
            gateway: &gateway,
            reporter: &SilentReporter,
        };
        let session = AuditSession::new();
        let form = AuditForm {
            script: "   \n".to_string(),
            ..filled_form()
        };

        let outcome = use_case.execute(&session, &form).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed(AuditError::Validation(ValidationError::MissingContent))
        );
        assert_eq!(gateway.calls(), 0);
        assert!(!session.is_in_flight());
    }

    #[tokio::test]
    async fn missing_credential_never_calls_gateway() {
        let gateway = FakeGateway::new(Ok(valid_reply()));
        let use_case = RunAuditUseCase {
            gateway: &gateway,
            reporter: &SilentReporter,
        };
        let session = AuditSession::new();
        let form = AuditForm {
            credential: String::new(),
            ..filled_form()
        };

        let outcome = use_case.execute(&session, &form).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed(AuditError::Validation(ValidationError::MissingCredential))
        );
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn success_stores_parsed_result() {
        let gateway = FakeGateway::new(Ok(valid_reply()));
        let use_case = RunAuditUseCase {
            gateway: &gateway,
            reporter: &SilentReporter,
        };
        let session = AuditSession::new();

        let outcome = use_case.execute(&session, &filled_form()).await;

        let SubmitOutcome::Completed(result) = outcome else {
            panic!("expected completed outcome, got {outcome:?}");
        };
        assert_eq!(result.score(), Some(81));
        assert_eq!(session.last_result(), Some(result));
        assert_eq!(session.last_error(), None);
        assert_eq!(gateway.calls(), 1);
        let sent = gateway.last_user_message.lock().unwrap().clone().unwrap();
        assert!(sent.contains("for the TikTok platform"));
    }

    #[tokio::test]
    async fn upstream_error_clears_previous_result() {
        let session = AuditSession::new();
        let ok = FakeGateway::new(Ok(valid_reply()));
        RunAuditUseCase {
            gateway: &ok,
            reporter: &SilentReporter,
        }
        .execute(&session, &filled_form())
        .await;
        assert!(session.last_result().is_some());

        let failing = FakeGateway::new(Err(CompletionError::Status {
            status: 401,
            message: Some("bad key".to_string()),
        }));
        let outcome = RunAuditUseCase {
            gateway: &failing,
            reporter: &SilentReporter,
        }
        .execute(&session, &filled_form())
        .await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed(AuditError::Upstream("bad key".to_string()))
        );
        assert_eq!(session.last_result(), None);
        assert_eq!(
            session.last_error().map(|e| e.to_string()),
            Some("bad key".to_string())
        );
    }

    #[tokio::test]
    async fn malformed_reply_surfaces_generic_error() {
        let gateway = FakeGateway::new(Ok("I cannot help with that.".to_string()));
        let session = AuditSession::new();

        let outcome = RunAuditUseCase {
            gateway: &gateway,
            reporter: &SilentReporter,
        }
        .execute(&session, &filled_form())
        .await;

        assert_eq!(outcome, SubmitOutcome::Failed(AuditError::Interpretation));
        assert_eq!(session.last_result(), None);
    }

    #[tokio::test]
    async fn unknown_enum_values_are_stored_verbatim() {
        let reply = json!({"action": "Archive", "score": "high"}).to_string();
        let gateway = FakeGateway::new(Ok(reply));
        let session = AuditSession::new();

        let outcome = RunAuditUseCase {
            gateway: &gateway,
            reporter: &SilentReporter,
        }
        .execute(&session, &filled_form())
        .await;

        let SubmitOutcome::Completed(result) = outcome else {
            panic!("expected completed outcome");
        };
        assert_eq!(result.action(), Some("Archive"));
        assert_eq!(result.score(), None);
    }

    struct BlockingGateway {
        release: Arc<Notify>,
        entered: Arc<Notify>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CompletionGateway for BlockingGateway {
        fn name(&self) -> &str {
            "blocking"
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<String, CompletionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.entered.notify_one();
            self.release.notified().await;
            Ok(r#"{"action":"Delete","score":10}"#.to_string())
        }
    }

    #[tokio::test]
    async fn resubmit_while_pending_is_ignored() {
        let gateway = BlockingGateway {
            release: Arc::new(Notify::new()),
            entered: Arc::new(Notify::new()),
            calls: AtomicUsize::new(0),
        };
        let use_case = RunAuditUseCase {
            gateway: &gateway,
            reporter: &SilentReporter,
        };
        let session = AuditSession::new();
        let form = filled_form();

        let first = use_case.execute(&session, &form);
        let second = async {
            gateway.entered.notified().await;
            assert!(session.is_in_flight());
            let outcome = use_case.execute(&session, &form).await;
            gateway.release.notify_one();
            outcome
        };

        let (first, second) = tokio::join!(first, second);

        assert_eq!(second, SubmitOutcome::Ignored);
        assert!(matches!(first, SubmitOutcome::Completed(_)));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
        assert!(!session.is_in_flight());

        let third = use_case.execute(&session, &form);
        let release = async {
            gateway.entered.notified().await;
            gateway.release.notify_one();
        };
        let (third, ()) = tokio::join!(third, release);
        assert!(matches!(third, SubmitOutcome::Completed(_)));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 2);
    }
}
