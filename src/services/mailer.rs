use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::domain::otp::OTP_TTL_MINUTES,
};

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_otp_email(&self, to: &str, otp: &str) -> AppResult<()>;
}

/// Sends mail through an HTTP mail API (any Resend-style provider that
/// accepts a JSON body with bearer auth). When no provider is configured
/// sending fails loudly so the caller can roll back the stored OTP.
pub struct HttpMailer {
    api_url: String,
    api_key: SecretString,
    from: String,
    http: reqwest::Client,
}

impl HttpMailer {
    pub fn new(config: &Config) -> Self {
        Self {
            api_url: config.mail_api_url.clone(),
            api_key: config.mail_api_key.clone(),
            from: config.mail_from.clone(),
            http: reqwest::Client::new(),
        }
    }

    fn is_configured(&self) -> bool {
        !self.api_url.is_empty() && !self.api_key.expose_secret().is_empty()
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send_otp_email(&self, to: &str, otp: &str) -> AppResult<()> {
        if !self.is_configured() {
            log::error!("Mail delivery requested but MAIL_API_URL / MAIL_API_KEY are not set");
            return Err(AppError::InternalError(
                "Email service not configured. Set MAIL_API_URL and MAIL_API_KEY.".to_string(),
            ));
        }

        let body = json!({
            "from": self.from,
            "to": [to],
            "subject": "Password Reset OTP - Quiz App",
            "text": format!(
                "You have requested to reset your password for your Quiz App account.\n\n\
                 Your OTP code is: {}\n\n\
                 This OTP will expire in {} minutes. If you didn't request this, \
                 please ignore this email.",
                otp, OTP_TTL_MINUTES
            ),
        });

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to send email: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            log::error!("Mail API returned {}: {}", status, detail);
            return Err(AppError::InternalError(
                "Failed to send email. Please try again later.".to_string(),
            ));
        }

        log::info!("OTP email dispatched to {}", to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_unconfigured_mailer_fails() {
        let config = Config::test_config();
        let mailer = HttpMailer::new(&config);

        let result = mailer.send_otp_email("user@example.com", "123456").await;
        match result {
            Err(AppError::InternalError(msg)) => assert!(msg.contains("not configured")),
            other => panic!("Expected InternalError, got {:?}", other),
        }
    }
}
