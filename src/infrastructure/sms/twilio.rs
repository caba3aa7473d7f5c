use crate::config::TwilioConfig;
use crate::domain::SmsSender;
use anyhow::Result;
use reqwest::Client;
use std::time::Duration;

pub struct TwilioSmsSender {
    // ---
    client: Client,
    config: TwilioConfig,
}

impl TwilioSmsSender {
    // ---
    pub fn new(config: TwilioConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.config.account_sid
        )
    }
}

fn message_body(code: &str, ttl: Duration) -> String {
    let minutes = (ttl.as_secs() / 60).max(1);
    format!("Your verification code is: {code}, valid for {minutes} minutes.")
}

#[async_trait::async_trait]
impl SmsSender for TwilioSmsSender {
    async fn send_otp(&self, phone_number: &str, code: &str, ttl: Duration) -> Result<()> {
        // ---
        let body = message_body(code, ttl);
        let params = [
            ("To", phone_number),
            ("From", self.config.from_phone.as_str()),
            ("Body", body.as_str()),
        ];

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await?;

        if response.status().is_success() {
            tracing::info!("Verification code SMS sent: {}", phone_number);
            Ok(())
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(
                "Verification code SMS failed: {}, error: {}",
                phone_number,
                error_text
            );
            anyhow::bail!("SMS sending failed: {error_text}")
        }
    }
}
