use crate::domain::model::{ContactForm, ContactPayload, SubmissionOutcome, SubmissionState};
use crate::domain::ports::PortfolioApi;
use std::sync::Arc;
use tokio::sync::watch;

const ALREADY_SUBMITTING: &str = "A submission is already in progress";

/// Drives one contact-form submission at a time through
/// Idle -> Submitting -> Succeeded | Failed.
pub struct SubmissionController<A: PortfolioApi + ?Sized> {
    api: Arc<A>,
    state: watch::Sender<SubmissionState>,
}

impl<A: PortfolioApi + ?Sized> SubmissionController<A> {
    pub fn new(api: Arc<A>) -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);
        Self { api, state }
    }

    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    pub fn is_submitting(&self) -> bool {
        matches!(*self.state.borrow(), SubmissionState::Submitting)
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    /// Sends `payload` to the backend unchanged.
    ///
    /// The state moves to `Submitting` before the request is issued. A call made
    /// while another submission is in flight is rejected without reaching the
    /// backend and leaves the state alone. Dropping the returned future before it
    /// completes returns the state to `Idle`.
    pub async fn submit(&self, payload: &ContactPayload) -> SubmissionOutcome {
        let started = self.state.send_if_modified(|state| {
            if matches!(state, SubmissionState::Submitting) {
                false
            } else {
                *state = SubmissionState::Submitting;
                true
            }
        });
        if !started {
            tracing::warn!("⚠️ Contact submission ignored: {}", ALREADY_SUBMITTING);
            return SubmissionOutcome::Failure {
                error: ALREADY_SUBMITTING.to_string(),
            };
        }

        let in_flight = InFlight {
            state: &self.state,
            settled: false,
        };

        tracing::debug!("📨 Submitting contact form for {}", payload.email);
        match self.api.submit_contact(payload).await {
            Ok(confirmation) => {
                tracing::info!("✅ Contact form submitted");
                in_flight.settle(SubmissionState::Succeeded);
                SubmissionOutcome::Success(confirmation)
            }
            Err(e) => {
                tracing::error!("❌ Failed to submit contact form: {}", e);
                let error = e.to_string();
                in_flight.settle(SubmissionState::Failed(error.clone()));
                SubmissionOutcome::Failure { error }
            }
        }
    }

    /// Submits the form's fields and clears them only when the backend accepted them.
    pub async fn submit_form(&self, form: &mut ContactForm) -> SubmissionOutcome {
        let outcome = self.submit(&form.to_payload()).await;
        if outcome.is_success() {
            form.clear();
        }
        outcome
    }

    pub fn reset_status(&self) {
        self.state.send_replace(SubmissionState::Idle);
    }
}

/// Puts the controller back to `Idle` when a submission future is dropped
/// before the backend answered.
struct InFlight<'a> {
    state: &'a watch::Sender<SubmissionState>,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(mut self, outcome: SubmissionState) {
        self.settled = true;
        self.state.send_replace(outcome);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        tracing::warn!("⚠️ Contact submission abandoned before the backend answered");
        self.state.send_if_modified(|state| {
            if matches!(state, SubmissionState::Submitting) {
                *state = SubmissionState::Idle;
                true
            } else {
                false
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{
        Certification, Confirmation, ContactRecord, EducationEntry, Job, Project, SkillGroup,
    };
    use crate::utils::error::{PortfolioError, Result};
    use std::sync::Mutex;
    use tokio::sync::Notify;
    use tokio_test::{assert_pending, assert_ready};

    #[derive(Default)]
    struct ContactApi {
        fail_with_status: Option<u16>,
        gate: Option<Arc<Notify>>,
        received: Mutex<Vec<ContactPayload>>,
    }

    impl ContactApi {
        fn received(&self) -> Vec<ContactPayload> {
            self.received.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl PortfolioApi for ContactApi {
        async fn get_skills(&self) -> Result<Vec<SkillGroup>> {
            unimplemented!("not used by the submission controller")
        }

        async fn get_projects(&self) -> Result<Vec<Project>> {
            unimplemented!("not used by the submission controller")
        }

        async fn get_project(&self, _project_id: &str) -> Result<Project> {
            unimplemented!("not used by the submission controller")
        }

        async fn get_experience(&self) -> Result<Vec<Job>> {
            unimplemented!("not used by the submission controller")
        }

        async fn get_education(&self) -> Result<Vec<EducationEntry>> {
            unimplemented!("not used by the submission controller")
        }

        async fn get_certifications(&self) -> Result<Vec<Certification>> {
            unimplemented!("not used by the submission controller")
        }

        async fn submit_contact(&self, payload: &ContactPayload) -> Result<Confirmation> {
            self.received.lock().unwrap().push(payload.clone());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            match self.fail_with_status {
                Some(status) => Err(PortfolioError::StatusError {
                    status,
                    body: String::new(),
                }),
                None => Ok(Confirmation {
                    message: "Contact form submitted successfully!".to_string(),
                    id: "c-1".to_string(),
                }),
            }
        }

        async fn get_contacts(&self) -> Result<Vec<ContactRecord>> {
            unimplemented!("not used by the submission controller")
        }
    }

    fn payload() -> ContactPayload {
        ContactPayload {
            name: "A".to_string(),
            email: "a@b.com".to_string(),
            subject: "S".to_string(),
            message: "M".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_enters_submitting_before_backend_settles() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(ContactApi {
            gate: Some(gate.clone()),
            ..Default::default()
        });
        let controller = SubmissionController::new(api);
        let payload = payload();
        assert_eq!(controller.state(), SubmissionState::Idle);

        let mut submission = tokio_test::task::spawn(controller.submit(&payload));
        assert_pending!(submission.poll());
        assert_eq!(controller.state(), SubmissionState::Submitting);
        assert!(controller.is_submitting());

        gate.notify_one();
        let outcome = assert_ready!(submission.poll());
        assert!(outcome.is_success());
        assert_eq!(controller.state(), SubmissionState::Succeeded);
    }

    #[tokio::test]
    async fn test_successful_submission_passes_payload_verbatim() {
        let api = Arc::new(ContactApi::default());
        let controller = SubmissionController::new(api.clone());

        let outcome = controller.submit(&payload()).await;

        match outcome {
            SubmissionOutcome::Success(confirmation) => assert_eq!(confirmation.id, "c-1"),
            other => panic!("expected success, got {:?}", other),
        }
        assert_eq!(api.received(), vec![payload()]);
        assert_eq!(controller.state(), SubmissionState::Succeeded);
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_backend_message() {
        let api = Arc::new(ContactApi {
            fail_with_status: Some(500),
            ..Default::default()
        });
        let controller = SubmissionController::new(api);

        let outcome = controller.submit(&payload()).await;

        assert_eq!(outcome.error(), Some("Request failed with status code 500"));
        assert_eq!(
            controller.state(),
            SubmissionState::Failed("Request failed with status code 500".to_string())
        );
    }

    #[tokio::test]
    async fn test_reset_status_returns_to_idle_from_terminal_states() {
        let ok = SubmissionController::new(Arc::new(ContactApi::default()));
        ok.submit(&payload()).await;
        assert_eq!(ok.state(), SubmissionState::Succeeded);
        ok.reset_status();
        assert_eq!(ok.state(), SubmissionState::Idle);

        let failing = SubmissionController::new(Arc::new(ContactApi {
            fail_with_status: Some(422),
            ..Default::default()
        }));
        failing.submit(&payload()).await;
        assert!(matches!(failing.state(), SubmissionState::Failed(_)));
        failing.reset_status();
        assert_eq!(failing.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_new_submission_clears_previous_failure() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(ContactApi {
            fail_with_status: Some(500),
            gate: Some(gate.clone()),
            ..Default::default()
        });
        let controller = SubmissionController::new(api);
        let payload = payload();

        gate.notify_one();
        controller.submit(&payload).await;
        assert!(matches!(controller.state(), SubmissionState::Failed(_)));

        let mut retry = tokio_test::task::spawn(controller.submit(&payload));
        assert_pending!(retry.poll());
        assert_eq!(controller.state(), SubmissionState::Submitting);

        gate.notify_one();
        assert_ready!(retry.poll());
        assert!(matches!(controller.state(), SubmissionState::Failed(_)));
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight_is_rejected() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(ContactApi {
            gate: Some(gate.clone()),
            ..Default::default()
        });
        let controller = SubmissionController::new(api.clone());
        let payload = payload();

        let mut first = tokio_test::task::spawn(controller.submit(&payload));
        assert_pending!(first.poll());

        let second = controller.submit(&payload).await;
        assert_eq!(second.error(), Some(ALREADY_SUBMITTING));
        assert_eq!(controller.state(), SubmissionState::Submitting);
        assert_eq!(api.received().len(), 1);

        gate.notify_one();
        assert!(assert_ready!(first.poll()).is_success());
    }

    #[tokio::test]
    async fn test_dropped_submission_does_not_lock_the_controller() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(ContactApi {
            gate: Some(gate.clone()),
            ..Default::default()
        });
        let controller = SubmissionController::new(api.clone());
        let payload = payload();

        let mut abandoned = tokio_test::task::spawn(controller.submit(&payload));
        assert_pending!(abandoned.poll());
        assert_eq!(controller.state(), SubmissionState::Submitting);
        drop(abandoned);
        assert_eq!(controller.state(), SubmissionState::Idle);

        gate.notify_one();
        let retry = controller.submit(&payload).await;
        assert!(retry.is_success());
        assert_eq!(api.received().len(), 2);
        assert_eq!(controller.state(), SubmissionState::Succeeded);
    }

    #[tokio::test]
    async fn test_submission_abandoned_by_timeout_can_be_retried() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(ContactApi {
            gate: Some(gate.clone()),
            ..Default::default()
        });
        let controller = SubmissionController::new(api.clone());
        let payload = payload();

        let timed_out = tokio::time::timeout(
            std::time::Duration::from_millis(10),
            controller.submit(&payload),
        )
        .await;
        assert!(timed_out.is_err());
        assert!(!controller.is_submitting());

        gate.notify_one();
        assert!(controller.submit(&payload).await.is_success());
        assert_eq!(api.received().len(), 2);
    }

    #[tokio::test]
    async fn test_submit_form_clears_only_on_success() {
        let mut form = ContactForm::from(payload());

        let failing = SubmissionController::new(Arc::new(ContactApi {
            fail_with_status: Some(500),
            ..Default::default()
        }));
        assert!(!failing.submit_form(&mut form).await.is_success());
        assert_eq!(form, ContactForm::from(payload()));

        let ok = SubmissionController::new(Arc::new(ContactApi::default()));
        assert!(ok.submit_form(&mut form).await.is_success());
        assert!(form.is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_observe_state_changes() {
        let controller = SubmissionController::new(Arc::new(ContactApi::default()));
        let mut rx = controller.subscribe();

        controller.submit(&payload()).await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), SubmissionState::Succeeded);

        controller.reset_status();
        assert_eq!(*rx.borrow_and_update(), SubmissionState::Idle);
    }
}
