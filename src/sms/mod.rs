//! The messaging boundary: SMS delivery through the Twilio REST API.
//!
//! Delivery failures are per-recipient: callers log them and keep going, and
//! a failed delivery never blocks persistence of state changes that already
//! happened. Nothing in here mutates domain state.

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_API_BASE: &str = "https://api.twilio.com";

#[derive(Debug, Error)]
pub enum SmsError {
    #[error(
        "missing Twilio environment variables (TWILIO_ACCOUNT_SID, \
         TWILIO_AUTH_TOKEN, TWILIO_FROM_NUMBER)"
    )]
    MissingCredentials,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("twilio api returned {status}: {message}")]
    Api { status: u16, message: String },
}

/// Sends assignment, reminder, and admin-digest messages. Each send returns
/// the provider's message SID as the delivery id.
pub struct SmsClient {
    http: reqwest::Client,
    account_sid: String,
    auth_token: String,
    from_number: String,
    api_base: String,
}

impl SmsClient {
    pub fn new(account_sid: String, auth_token: String, from_number: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            account_sid,
            auth_token,
            from_number,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Build from `TWILIO_ACCOUNT_SID` / `TWILIO_AUTH_TOKEN` /
    /// `TWILIO_FROM_NUMBER`.
    pub fn from_env() -> Result<Self, SmsError> {
        let (Ok(account_sid), Ok(auth_token), Ok(from_number)) = (
            std::env::var("TWILIO_ACCOUNT_SID"),
            std::env::var("TWILIO_AUTH_TOKEN"),
            std::env::var("TWILIO_FROM_NUMBER"),
        ) else {
            return Err(SmsError::MissingCredentials);
        };

        Ok(Self::new(account_sid, auth_token, from_number))
    }

    pub async fn send_assignment(
        &self,
        to: &str,
        member_name: &str,
        chore_name: &str,
        chore_description: &str,
        confirm_url: &str,
        history_url: &str,
    ) -> Result<String, SmsError> {
        let body = format!(
            "Hi {member_name}! Your chore this week is: {chore_name}\n\n\
             {chore_description}\n\n\
             Confirm completion: {confirm_url}\n\
             View history: {history_url}"
        );
        self.send(to, &body).await
    }

    pub async fn send_reminder(
        &self,
        to: &str,
        member_name: &str,
        chore_name: &str,
        confirm_url: &str,
    ) -> Result<String, SmsError> {
        let body = format!(
            "Reminder: Hi {member_name}, your chore \"{chore_name}\" hasn't been \
             confirmed yet. Please complete and confirm: {confirm_url}"
        );
        self.send(to, &body).await
    }

    pub async fn send_admin_summary(
        &self,
        to: &str,
        admin_name: &str,
        summary: &str,
    ) -> Result<String, SmsError> {
        let body = format!("Weekly Chore Summary for {admin_name}:\n\n{summary}");
        self.send(to, &body).await
    }

    async fn send(&self, to: &str, body: &str) -> Result<String, SmsError> {
        #[derive(Deserialize)]
        struct MessageResponse {
            sid: String,
        }

        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base, self.account_sid
        );
        let params = [("To", to), ("From", self.from_number.as_str()), ("Body", body)];

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(SmsError::Api { status, message });
        }

        Ok(response.json::<MessageResponse>().await?.sid)
    }
}
