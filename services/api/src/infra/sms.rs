use tracing::{info, warn};

use crate::config::TwilioConfig;
use crate::domain::repository::SmsSender;

/// Twilio REST API client for outbound SMS. Fire-and-forget: delivery
/// failures are logged and never propagated.
#[derive(Clone)]
pub struct TwilioSmsSender {
    http: reqwest::Client,
    config: TwilioConfig,
}

impl TwilioSmsSender {
    pub fn new(config: TwilioConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

impl SmsSender for TwilioSmsSender {
    async fn send(&self, to_e164: &str, body: &str) {
        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.config.account_sid
        );
        let params = [
            ("To", to_e164),
            ("From", self.config.from_number.as_str()),
            ("Body", body),
        ];

        let result = self
            .http
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await;

        match result {
            Ok(resp) if resp.status().is_success() => {
                info!("sms recovery message sent");
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "twilio rejected sms message");
            }
            Err(e) => {
                warn!(error = %e, "failed to send sms message");
            }
        }
    }
}
