//! SMTP mailer adapter
//!
//! Sends transactional HTML email through an SMTP relay. When email is
//! disabled in configuration the adapter logs the message instead, which is
//! also what tests rely on.

use crate::config::app_config::EmailConfig;
use crate::shared::error::{AppError, AppResult};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{info, warn};

/// Outbound email adapter
pub struct Mailer {
    config: EmailConfig,
}

impl Mailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    fn build_transport(&self) -> AppResult<SmtpTransport> {
        let credentials = Credentials::new(
            self.config.smtp_username.clone(),
            self.config.smtp_password.clone(),
        );
        let transport = SmtpTransport::relay(&self.config.smtp_host)
            .map_err(|e| AppError::Email(format!("SMTP relay error: {}", e)))?
            .port(self.config.smtp_port)
            .credentials(credentials)
            .build();
        Ok(transport)
    }

    fn from_header(&self) -> String {
        format!("{} <{}>", self.config.from_name, self.config.from_email)
    }

    async fn send_html(&self, to: &str, subject: &str, html_body: String) -> AppResult<()> {
        if !self.config.enabled {
            info!(to = %to, subject = %subject, "Email disabled, skipping send");
            return Ok(());
        }

        let email = Message::builder()
            .from(
                self.from_header()
                    .parse()
                    .map_err(|e| AppError::Email(format!("Invalid from address: {}", e)))?,
            )
            .to(to
                .parse()
                .map_err(|e| AppError::Email(format!("Invalid to address: {}", e)))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body)
            .map_err(|e| AppError::Email(format!("Failed to build email: {}", e)))?;

        let mailer = self.build_transport()?;

        tokio::task::spawn_blocking(move || {
            mailer
                .send(&email)
                .map_err(|e| AppError::Email(format!("Failed to send email: {}", e)))
        })
        .await
        .map_err(|e| AppError::Email(format!("Email task failed: {}", e)))?
        .map(|_| ())
    }

    /// Best-effort send: failures are logged, never propagated to the caller
    async fn send_best_effort(&self, to: &str, subject: &str, html_body: String) {
        if let Err(e) = self.send_html(to, subject, html_body).await {
            warn!(to = %to, subject = %subject, error = %e, "Email delivery failed");
        }
    }

    /// Registration received, payment still outstanding
    pub async fn send_registration_pending(
        &self,
        to: &str,
        name: &str,
        event_title: &str,
        checkout_url: &str,
        amount_cents: i64,
        currency: &str,
    ) {
        let amount = format!("{:.2} {}", amount_cents as f64 / 100.0, currency);
        let html_body = format!(
            r#"
<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Complete your registration</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
        <h2 style="color: #2563eb;">Almost there, {name}!</h2>
        <p>Your spot for <strong>{event_title}</strong> is reserved. Complete the payment of
        <strong>{amount}</strong> to confirm your registration.</p>
        <p style="margin: 30px 0;">
            <a href="{checkout_url}"
               style="display: inline-block; background-color: #2563eb; color: white; padding: 12px 24px; text-decoration: none; border-radius: 4px;">
                Pay now
            </a>
        </p>
        <p style="color: #666; font-size: 12px; margin-top: 40px;">
            Or copy and paste this link into your browser:<br>
            {checkout_url}
        </p>
    </div>
</body>
</html>
            "#
        );

        self.send_best_effort(to, "Complete your registration", html_body)
            .await;
    }

    /// Registration confirmed (free event or payment received)
    pub async fn send_registration_confirmed(
        &self,
        to: &str,
        name: &str,
        event_title: &str,
        registration_code: &str,
    ) {
        let lookup_url = format!(
            "{}/registrations/{}",
            self.config.public_base_url.trim_end_matches('/'),
            registration_code
        );
        let html_body = format!(
            r#"
<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Registration confirmed</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
        <h2 style="color: #16a34a;">You're in, {name}!</h2>
        <p>Your registration for <strong>{event_title}</strong> is confirmed.</p>
        <p>Your registration code is:</p>
        <p style="font-size: 24px; font-weight: bold; letter-spacing: 2px; margin: 30px 0;">
            {registration_code}
        </p>
        <p style="color: #666; font-size: 14px;">
            Keep this code. You will need it to check in at the venue and to download
            your certificate afterwards.
        </p>
        <p style="color: #666; font-size: 12px; margin-top: 40px;">
            Check your registration at any time:<br>
            {lookup_url}
        </p>
    </div>
</body>
</html>
            "#
        );

        self.send_best_effort(to, "Registration confirmed", html_body)
            .await;
    }
}
