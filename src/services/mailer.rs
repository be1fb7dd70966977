use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::EmailConfig;

/// Plain-text notifications over SMTP with implicit TLS.
#[derive(Clone)]
pub struct Mailer {
    config: EmailConfig,
}

impl Mailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    pub fn build_message(
        &self,
        subject: &str,
        body: &str,
    ) -> Result<Message, Box<dyn std::error::Error + Send + Sync>> {
        let from: Mailbox = self.config.sender.parse()?;
        let to: Mailbox = self.config.recipient.parse()?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        Ok(message)
    }

    pub async fn send(&self, subject: &str, body: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let message = self.build_message(subject, body)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)?
            .port(self.config.smtp_port)
            .credentials(Credentials::new(
                self.config.sender.clone(),
                self.config.app_password.clone(),
            ))
            .build();

        transport.send(message).await?;

        tracing::info!("Email '{}' sent to {}", subject, self.config.recipient);
        Ok(())
    }
}
