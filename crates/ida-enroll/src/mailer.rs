//! # Confirmation delivery collaborator
//!
//! Delivery of the confirmation link is external to this stack; the
//! orchestrator sees only the `send(to, token)` contract. A delivery
//! failure fails the registration step, never the process.

use core::future::Future;

use parking_lot::Mutex;

use crate::error::MailerError;

/// Delivers a confirmation token to an email address.
pub trait ConfirmationMailer: Send + Sync {
    /// Deliver `token` to `to`. Implementations report failure through
    /// the `Result`; they must not panic on delivery trouble.
    fn send(
        &self,
        to: &str,
        token: &str,
    ) -> impl Future<Output = Result<(), MailerError>> + Send;
}

impl<T: ConfirmationMailer + ?Sized> ConfirmationMailer for std::sync::Arc<T> {
    async fn send(&self, to: &str, token: &str) -> Result<(), MailerError> {
        (**self).send(to, token).await
    }
}

/// Test double that records every send and always succeeds.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingMailer {
    /// A fresh recorder with no deliveries.
    pub fn new() -> Self {
        Self::default()
    }

    /// All `(to, token)` pairs delivered so far.
    pub fn deliveries(&self) -> Vec<(String, String)> {
        self.sent.lock().clone()
    }

    /// The most recently delivered token, if any.
    pub fn last_token(&self) -> Option<String> {
        self.sent.lock().last().map(|(_, token)| token.clone())
    }
}

impl ConfirmationMailer for RecordingMailer {
    async fn send(&self, to: &str, token: &str) -> Result<(), MailerError> {
        self.sent.lock().push((to.to_string(), token.to_string()));
        Ok(())
    }
}

/// Test double that always fails delivery.
#[derive(Debug, Default)]
pub struct FailingMailer;

impl ConfirmationMailer for FailingMailer {
    async fn send(&self, _to: &str, _token: &str) -> Result<(), MailerError> {
        Err(MailerError::Delivery("injected delivery failure".into()))
    }
}
