//! Reqwest-backed transactional email adapter.
//!
//! Posts one JSON message per call to a Resend-compatible `/emails`
//! endpoint using a bearer API key.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use zeroize::Zeroizing;

use crate::domain::ports::{EmailMessage, Notifier, NotifierError};

#[derive(Debug, Serialize)]
struct SendEmailDto<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

pub struct HttpEmailNotifier {
    client: Client,
    endpoint: Url,
    api_key: Zeroizing<String>,
    from: String,
}

impl HttpEmailNotifier {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed or the
    /// base URL cannot be extended with `/emails`.
    pub fn new(
        base_url: &Url,
        api_key: Zeroizing<String>,
        from: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, std::io::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(std::io::Error::other)?;
        let endpoint = base_url
            .join("emails")
            .map_err(|error| std::io::Error::new(std::io::ErrorKind::InvalidInput, error))?;
        Ok(Self {
            client,
            endpoint,
            api_key,
            from: from.into(),
        })
    }
}

#[async_trait]
impl Notifier for HttpEmailNotifier {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifierError> {
        let payload = SendEmailDto {
            from: &self.from,
            to: &message.to,
            subject: &message.subject,
            html: &message.html,
            text: &message.text,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.as_str())
            .json(&payload)
            .send()
            .await
            .map_err(|error| NotifierError::transport(error.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(map_status_error(status, &body))
    }
}

fn map_status_error(status: StatusCode, body: &str) -> NotifierError {
    const PREVIEW_CHAR_LIMIT: usize = 160;
    let preview: String = body.trim().chars().take(PREVIEW_CHAR_LIMIT).collect();
    NotifierError::rejected(status.as_u16(), preview)
}
