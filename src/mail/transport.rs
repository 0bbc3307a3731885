use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;

use crate::config::MailConfig;

/// A single outbound HTML message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub html: String,
}

impl Email {
    pub fn welcome(to: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: "Welcome to Health Chamber!".into(),
            html: "<p>Thanks for signing up. We hope you find plenty of useful resources \
                   here.</p>"
                .into(),
        }
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &Email) -> anyhow::Result<()>;
}

/// Resend-compatible HTTP mail API client.
pub struct HttpMailer {
    client: reqwest::Client,
    config: MailConfig,
}

#[derive(Debug, Serialize)]
struct SendPayload<'a> {
    from: String,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

impl HttpMailer {
    pub fn new(config: MailConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .context("build mail http client")?;
        Ok(Self { client, config })
    }

    fn payload<'a>(&self, email: &'a Email) -> SendPayload<'a> {
        SendPayload {
            from: format!("\"HealthChamber\" <{}>", self.config.from),
            to: [email.to.as_str()],
            subject: &email.subject,
            html: &email.html,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, email: &Email) -> anyhow::Result<()> {
        let res = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&self.payload(email))
            .send()
            .await
            .context("mail api request")?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            anyhow::bail!("mail api returned {status}: {body}");
        }
        Ok(())
    }
}
