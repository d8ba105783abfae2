// src/controller/mod.rs
//! Form state for one suggestion form instance.
//!
//! Submitting is a two-step affair: `begin` validates the form and hands out a
//! `Submission`, `finish` consumes it together with the service outcome. The
//! token can't be cloned and `begin` refuses while one is outstanding, so a
//! form never has two requests in flight. Every token must be redeemed with
//! `finish` or `cancel`; dropping one leaves the form in `Submitting`.

use std::future::Future;
use std::sync::Arc;

use log::{debug, error};
use thiserror::Error;

use crate::models::{
    Complexity, SuggestionInput, SuggestionRequest, SuggestionResult, DEFAULT_PASSWORD_LENGTH,
};
use crate::presentation::{Notification, Notifier};
use crate::suggest::{
    validate_request, ServiceError, SuggestionService, ValidationError, GENERIC_FAILURE_MESSAGE,
};

/// What the user has typed into the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub length: i64,
    pub complexity: String,
    pub keywords: String,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            length: i64::from(DEFAULT_PASSWORD_LENGTH),
            complexity: Complexity::default().to_string(),
            keywords: String::new(),
        }
    }
}

impl FormValues {
    pub fn to_input(&self) -> SuggestionInput {
        SuggestionInput {
            length: self.length,
            complexity: self.complexity.clone(),
            // An empty field means "no keyword hint"
            keywords: if self.keywords.is_empty() {
                None
            } else {
                Some(self.keywords.clone())
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    Success(SuggestionResult),
    Failed(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SubmitError {
    #[error("A suggestion is already being generated")]
    Busy,

    #[error("{0}")]
    Invalid(#[from] ValidationError),
}

/// Proof that the form is in `Submitting`; redeemed once by `finish` or `cancel`.
#[derive(Debug)]
#[must_use = "a submission must be passed to `finish` or `cancel`"]
pub struct Submission {
    request: SuggestionRequest,
}

impl Submission {
    pub fn request(&self) -> &SuggestionRequest {
        &self.request
    }
}

pub struct FormController {
    values: FormValues,
    state: FormState,
    notifier: Arc<dyn Notifier>,
}

impl FormController {
    pub fn new(values: FormValues, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            values,
            state: FormState::Idle,
            notifier,
        }
    }

    /// The form stays editable in every state.
    pub fn values_mut(&mut self) -> &mut FormValues {
        &mut self.values
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn can_submit(&self) -> bool {
        !matches!(self.state, FormState::Submitting)
    }

    pub fn result(&self) -> Option<&SuggestionResult> {
        match &self.state {
            FormState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FormState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Validate the current values and enter `Submitting`.
    ///
    /// Invalid values leave the state as it was.
    pub fn begin(&mut self) -> Result<Submission, SubmitError> {
        if !self.can_submit() {
            return Err(SubmitError::Busy);
        }
        let request = validate_request(&self.values.to_input())?;
        debug!("Form submitted, clearing previous result");
        self.state = FormState::Submitting;
        Ok(Submission { request })
    }

    pub fn finish(&mut self, _submission: Submission, outcome: Result<SuggestionResult, ServiceError>) {
        self.state = match outcome {
            Ok(result) => FormState::Success(result),
            Err(e) => {
                error!("Error generating password: {}", e);
                self.notifier
                    .notify(Notification::error("Error", GENERIC_FAILURE_MESSAGE));
                FormState::Failed(GENERIC_FAILURE_MESSAGE.to_string())
            }
        };
    }

    /// Abandon an in-flight request. The prior result was already cleared by
    /// `begin`, so the form goes back to `Idle`.
    pub fn cancel(&mut self, _submission: Submission) {
        debug!("Submission cancelled");
        self.state = FormState::Idle;
    }

    pub async fn submit(&mut self, service: &SuggestionService) -> Result<&FormState, SubmitError> {
        self.submit_until(service, std::future::pending::<()>()).await
    }

    /// Like `submit`, but gives up as soon as `cancelled` resolves.
    pub async fn submit_until<F>(
        &mut self,
        service: &SuggestionService,
        cancelled: F,
    ) -> Result<&FormState, SubmitError>
    where
        F: Future,
    {
        let submission = self.begin()?;
        let outcome = tokio::select! {
            biased;
            _ = cancelled => None,
            outcome = service.suggest(submission.request()) => Some(outcome),
        };
        match outcome {
            Some(outcome) => self.finish(submission, outcome),
            None => self.cancel(submission),
        }
        Ok(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::notify::testing::RecordingNotifier;
    use crate::presentation::notify::NotificationKind;
    use crate::suggest::provider::{MockProvider, ProviderError};
    use serde_json::json;

    fn controller(notifier: Arc<RecordingNotifier>) -> FormController {
        FormController::new(FormValues::default(), notifier)
    }

    fn service(mock: MockProvider) -> SuggestionService {
        SuggestionService::new(Arc::new(mock)).unwrap()
    }

    fn success_result() -> SuggestionResult {
        SuggestionResult {
            password: "Tr0ub4dor&3".into(),
            strength: "strong".into(),
            reason: None,
        }
    }

    #[test]
    fn defaults_match_the_form() {
        let values = FormValues::default();
        assert_eq!(values.length, 16);
        assert_eq!(values.complexity, "medium");
        assert_eq!(values.to_input().keywords, None);
    }

    #[test]
    fn begin_moves_to_submitting_and_blocks_a_second_submit() {
        let mut form = controller(Arc::new(RecordingNotifier::default()));
        assert_eq!(form.state(), &FormState::Idle);

        let submission = form.begin().unwrap();
        assert_eq!(form.state(), &FormState::Submitting);
        assert!(!form.can_submit());
        assert_eq!(form.begin().unwrap_err(), SubmitError::Busy);

        form.finish(submission, Ok(success_result()));
        assert_eq!(form.state(), &FormState::Success(success_result()));
        assert!(form.can_submit());
    }

    #[test]
    fn invalid_values_are_rejected_without_leaving_current_state() {
        let mut form = controller(Arc::new(RecordingNotifier::default()));
        let submission = form.begin().unwrap();
        form.finish(submission, Ok(success_result()));

        form.values_mut().length = 7;
        let err = form.begin().unwrap_err();
        assert_eq!(
            err,
            SubmitError::Invalid(ValidationError::LengthTooShort { length: 7, min: 8 })
        );
        assert_eq!(form.result(), Some(&success_result()));
    }

    #[test]
    fn resubmitting_clears_prior_error_immediately() {
        let notifier = Arc::new(RecordingNotifier::default());
        let mut form = controller(notifier.clone());
        let submission = form.begin().unwrap();
        form.finish(submission, Err(ServiceError::MissingOutput));
        assert_eq!(form.error(), Some(GENERIC_FAILURE_MESSAGE));

        let _submission = form.begin().unwrap();
        assert_eq!(form.error(), None);
        assert_eq!(form.state(), &FormState::Submitting);
    }

    #[test]
    fn resubmitting_clears_prior_result_immediately() {
        let mut form = controller(Arc::new(RecordingNotifier::default()));
        let submission = form.begin().unwrap();
        form.finish(submission, Ok(success_result()));
        assert_eq!(form.result(), Some(&success_result()));

        let _submission = form.begin().unwrap();
        assert_eq!(form.result(), None);
        assert_eq!(form.state(), &FormState::Submitting);
    }

    #[test]
    fn cancel_releases_the_form() {
        let mut form = controller(Arc::new(RecordingNotifier::default()));
        let submission = form.begin().unwrap();
        form.cancel(submission);

        assert_eq!(form.state(), &FormState::Idle);
        assert!(form.can_submit());
        let submission = form.begin().unwrap();
        form.finish(submission, Ok(success_result()));
        assert_eq!(form.result(), Some(&success_result()));
    }

    #[tokio::test]
    async fn cancelled_submit_skips_the_provider_and_returns_to_idle() {
        let mut mock = MockProvider::new();
        mock.expect_generate().never();
        let service = service(mock);
        let notifier = Arc::new(RecordingNotifier::default());
        let mut form = controller(notifier.clone());

        let state = form.submit_until(&service, std::future::ready(())).await.unwrap();
        assert_eq!(state, &FormState::Idle);
        assert!(form.can_submit());
        assert!(notifier.sent().is_empty());
    }

    #[test]
    fn empty_keywords_are_not_sent() {
        let mut form = controller(Arc::new(RecordingNotifier::default()));
        form.values_mut().keywords = String::new();
        assert_eq!(form.begin().unwrap().request().keywords(), None);
    }

    #[tokio::test]
    async fn submit_transitions_to_success() {
        let mut mock = MockProvider::new();
        mock.expect_generate()
            .times(1)
            .returning(|_, _| Ok(Some(json!({"password": "Tr0ub4dor&3", "strength": "strong"}))));
        let service = service(mock);
        let notifier = Arc::new(RecordingNotifier::default());
        let mut form = controller(notifier.clone());

        let state = form.submit(&service).await.unwrap();
        assert_eq!(state, &FormState::Success(success_result()));
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn provider_failure_clears_prior_result_and_notifies() {
        let mut mock = MockProvider::new();
        let mut first = true;
        mock.expect_generate().times(2).returning(move |_, _| {
            if std::mem::take(&mut first) {
                Ok(Some(json!({"password": "Tr0ub4dor&3", "strength": "strong"})))
            } else {
                Err(ProviderError::Status {
                    status: 503,
                    body: "overloaded".into(),
                })
            }
        });
        let service = service(mock);
        let notifier = Arc::new(RecordingNotifier::default());
        let mut form = controller(notifier.clone());

        form.submit(&service).await.unwrap();
        assert!(form.result().is_some());

        let state = form.submit(&service).await.unwrap();
        assert_eq!(state, &FormState::Failed(GENERIC_FAILURE_MESSAGE.to_string()));
        assert_eq!(form.result(), None);
        assert!(form.can_submit());

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind, NotificationKind::Error);
        assert_eq!(sent[0].description, GENERIC_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_provider() {
        let mut mock = MockProvider::new();
        mock.expect_generate().never();
        let service = service(mock);
        let mut form = controller(Arc::new(RecordingNotifier::default()));
        form.values_mut().complexity = "extreme".into();

        let err = form.submit(&service).await.unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(ValidationError::UnknownComplexity(_))));
        assert_eq!(form.state(), &FormState::Idle);
    }
}
