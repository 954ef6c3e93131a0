//! SMTP 메일 발송기.
//!
//! `lettre`의 tokio 비동기 전송을 사용합니다. 포트 465는 암묵적 TLS,
//! 로컬 호스트는 평문, 그 외에는 STARTTLS로 연결합니다.

use async_trait::async_trait;
use jobboard_core::SmtpConfig;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;
use tracing::{debug, error, info};

use crate::types::{EmailMessage, Mailer, NotificationError, NotificationResult};

/// SMTP 발송기.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

fn parse_mailbox(address: &str) -> NotificationResult<Mailbox> {
    address
        .trim()
        .parse::<Mailbox>()
        .map_err(|e| NotificationError::InvalidAddress(format!("{}: {}", address, e)))
}

fn is_local_host(host: &str) -> bool {
    matches!(host, "localhost" | "127.0.0.1" | "::1")
}

impl SmtpMailer {
    /// 설정에서 발송기를 생성합니다.
    ///
    /// tokio 런타임 안에서 호출해야 합니다 (커넥션 풀이 백그라운드 태스크를 띄움).
    pub fn new(config: &SmtpConfig) -> NotificationResult<Self> {
        let from = parse_mailbox(&config.from)?;

        let builder = if config.port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| NotificationError::InvalidConfig(e.to_string()))?
        } else if is_local_host(&config.host) {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| NotificationError::InvalidConfig(e.to_string()))?
        };

        let mut builder = builder.port(config.port);
        if let (Some(user), Some(pass)) = (&config.user, &config.pass) {
            builder = builder.credentials(Credentials::new(
                user.clone(),
                pass.expose_secret().to_string(),
            ));
        }

        info!(host = %config.host, port = config.port, "SMTP mailer configured");

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    /// `EmailMessage`를 MIME 메시지로 변환합니다.
    fn build_message(&self, message: &EmailMessage) -> NotificationResult<Message> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(parse_mailbox(&message.to)?)
            .subject(message.subject.clone())
            .header(ContentType::TEXT_PLAIN);

        if let Some(reply_to) = &message.reply_to {
            builder = builder.reply_to(parse_mailbox(reply_to)?);
        }

        builder
            .body(message.body.clone())
            .map_err(|e| NotificationError::BuildFailed(e.to_string()))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &EmailMessage) -> NotificationResult<()> {
        let email = self.build_message(message)?;

        debug!(to = %message.to, subject = %message.subject, "Sending email");

        match self.transport.send(email).await {
            Ok(_) => {
                info!(to = %message.to, "Email sent");
                Ok(())
            }
            Err(e) => {
                error!(to = %message.to, error = %e, "Failed to send email");
                Err(NotificationError::SendFailed(e.to_string()))
            }
        }
    }

    fn name(&self) -> &str {
        "smtp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(from: &str) -> SmtpConfig {
        SmtpConfig {
            host: "localhost".to_string(),
            port: 2525,
            user: None,
            pass: None,
            from: from.to_string(),
            contact_receiver: Some("support@example.com".to_string()),
        }
    }

    #[tokio::test]
    async fn test_build_message_headers() {
        let mailer = SmtpMailer::new(&config("Jobs <no-reply@example.com>")).unwrap();
        let message = EmailMessage::new("support@example.com", "Contact: hello", "Hi there")
            .with_reply_to("jane@example.com");

        let built = mailer.build_message(&message).unwrap();
        let raw = String::from_utf8(built.formatted()).unwrap();

        assert!(raw.contains("Subject: Contact: hello"));
        assert!(raw.contains("Reply-To: jane@example.com"));
        assert!(raw.contains("To: support@example.com"));
        assert!(raw.contains("no-reply@example.com"));
        assert!(raw.contains("Hi there"));
    }

    #[tokio::test]
    async fn test_invalid_recipient() {
        let mailer = SmtpMailer::new(&config("no-reply@example.com")).unwrap();
        let message = EmailMessage::new("not an address", "s", "b");

        let err = mailer.build_message(&message).unwrap_err();
        assert!(matches!(err, NotificationError::InvalidAddress(_)));
    }

    #[tokio::test]
    async fn test_invalid_from_rejected() {
        let result = SmtpMailer::new(&config("broken"));
        assert!(matches!(result, Err(NotificationError::InvalidAddress(_))));
    }
}
