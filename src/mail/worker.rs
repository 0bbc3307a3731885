use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::transport::{Email, Mailer};

const QUEUE_CAPACITY: usize = 256;

/// Handle for queueing mail to the background worker. Never blocks the caller.
#[derive(Clone)]
pub struct Notifier {
    tx: Option<mpsc::Sender<Email>>,
}

impl Notifier {
    /// Start the worker task on the current runtime.
    pub fn spawn(mailer: Arc<dyn Mailer>) -> Self {
        let (tx, mut rx) = mpsc::channel::<Email>(QUEUE_CAPACITY);
        tokio::spawn(async move {
            while let Some(email) = rx.recv().await {
                match mailer.send(&email).await {
                    Ok(()) => info!(to = %email.to, subject = %email.subject, "email sent"),
                    Err(e) => error!(error = ?e, to = %email.to, "email delivery failed"),
                }
            }
            debug!("mail worker stopped");
        });
        Self { tx: Some(tx) }
    }

    /// A notifier that drops everything.
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn dispatch(&self, email: Email) {
        let Some(tx) = &self.tx else {
            debug!(to = %email.to, "mail disabled, message dropped");
            return;
        };
        if let Err(e) = tx.try_send(email) {
            warn!(error = %e, "mail queue rejected message");
        }
    }
}
