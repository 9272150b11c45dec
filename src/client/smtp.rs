use std::fmt;
use std::time::Duration;

use anyhow::{anyhow, Context};

use async_trait::async_trait;

use chrono::Utc;

use lettre::address::Envelope;
use lettre::message::dkim::{DkimConfig, DkimSigningAlgorithm, DkimSigningKey};
use lettre::message::header::{ContentType, Header, HeaderName, HeaderValue};
use lettre::message::{Attachment, Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use secrecy::{ExposeSecret, Secret};

use uuid::Uuid;

use crate::settings::EmailSettings;

use super::email_client::{Email, EmailTransport};

const MAILER_NAME: &str = "CampusConnect Mailer";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

macro_rules! text_header {
    ($header:ident, $name:literal) => {
        #[derive(Debug, Clone)]
        struct $header(String);

        impl Header for $header {
            fn name() -> HeaderName {
                HeaderName::new_from_ascii_str($name)
            }

            fn parse(s: &str) -> Result<Self, BoxError> {
                Ok(Self(s.to_string()))
            }

            fn display(&self) -> HeaderValue {
                HeaderValue::new(Self::name(), self.0.clone())
            }
        }
    };
}

text_header!(XPriority, "X-Priority");
text_header!(XMsMailPriority, "X-MSMail-Priority");
text_header!(Importance, "Importance");
text_header!(XMailer, "X-Mailer");
text_header!(ListUnsubscribe, "List-Unsubscribe");

/// How the SMTP connection is secured
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SmtpSecurity {
    /// TLS from the first byte, usually port 465
    Tls,
    /// Plain connection upgraded with STARTTLS, which must succeed
    StartTls,
    /// No encryption, for local development relays only
    None,
}

/// [`EmailTransport`] speaking SMTP.
///
/// A fresh connection is opened for every email.
pub struct SmtpTransport {
    host: String,
    port: u16,
    security: SmtpSecurity,
    username: String,
    password: Secret<String>,
    timeout: Duration,
    sender: Mailbox,
    bounce: Address,
    domain: String,
    dkim: Option<DkimConfig>,
}

impl fmt::Debug for SmtpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpTransport")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("security", &self.security)
            .field("username", &self.username)
            .field("sender", &self.sender)
            .field("dkim", &self.dkim.is_some())
            .finish_non_exhaustive()
    }
}

impl SmtpTransport {
    pub fn from_settings(settings: &EmailSettings) -> anyhow::Result<Self> {
        let security = match (settings.secure(), settings.require_tls()) {
            (true, _) => SmtpSecurity::Tls,
            (false, true) => SmtpSecurity::StartTls,
            (false, false) => SmtpSecurity::None,
        };

        let domain = settings.domain()?;

        let sender_address: Address = settings
            .username()
            .parse()
            .context("Failed to parse email sender address")?;
        let sender = Mailbox::new(Some(settings.from_name().to_string()), sender_address);

        let bounce: Address = format!("bounces@{}", domain)
            .parse()
            .context("Failed to build bounce address")?;

        let dkim = match settings.dkim() {
            Some((private_key, selector)) => {
                let signing_key =
                    DkimSigningKey::new(private_key.expose_secret(), DkimSigningAlgorithm::Rsa)
                        .map_err(|e| anyhow!("Invalid DKIM private key: {:?}", e))?;
                Some(DkimConfig::default_config(
                    selector.to_string(),
                    domain.clone(),
                    signing_key,
                ))
            }
            None => None,
        };

        Ok(Self {
            host: settings.host().to_string(),
            port: settings.port(),
            security,
            username: settings.username().to_string(),
            password: settings.password().clone(),
            timeout: settings.timeout(),
            sender,
            bounce,
            domain,
            dkim,
        })
    }

    fn transport(&self) -> anyhow::Result<AsyncSmtpTransport<Tokio1Executor>> {
        let builder = match self.security {
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&self.host)?,
            SmtpSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)?
            }
            SmtpSecurity::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.host),
        };

        let builder = builder.port(self.port).timeout(Some(self.timeout));
        let builder = if self.password.expose_secret().is_empty() {
            builder
        } else {
            builder.credentials(Credentials::new(
                self.username.clone(),
                self.password.expose_secret().clone(),
            ))
        };

        Ok(builder.build())
    }

    fn message_id(&self) -> String {
        format!(
            "<{}.{}@{}>",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple(),
            self.domain
        )
    }

    /// Build the MIME message, returning it with its message id
    fn message(&self, email: &Email, recipient: Address) -> anyhow::Result<(Message, String)> {
        let message_id = self.message_id();

        let mut builder = Message::builder()
            .from(self.sender.clone())
            .to(Mailbox::new(None, recipient))
            .subject(email.subject.clone())
            .message_id(Some(message_id.clone()))
            .header(XPriority("1".into()))
            .header(XMsMailPriority("High".into()))
            .header(Importance("High".into()))
            .header(XMailer(MAILER_NAME.into()));
        if let Some(list_unsubscribe) = &email.list_unsubscribe {
            builder = builder.header(ListUnsubscribe(list_unsubscribe.clone()));
        }

        let alternative =
            MultiPart::alternative_plain_html(email.text_body.clone(), email.html_body.clone());
        let body = if email.attachments.is_empty() {
            alternative
        } else {
            let mut mixed = MultiPart::mixed().multipart(alternative);
            for attachment in &email.attachments {
                let content_type = ContentType::parse(&attachment.content_type).map_err(|e| {
                    anyhow!(
                        "Invalid content type {:?} for attachment {}: {:?}",
                        attachment.content_type,
                        attachment.filename,
                        e
                    )
                })?;
                mixed = mixed.singlepart(
                    Attachment::new(attachment.filename.clone())
                        .body(attachment.content.clone(), content_type),
                );
            }
            mixed
        };

        let mut message = builder.multipart(body).context("Failed to build email")?;
        if let Some(dkim) = &self.dkim {
            message.sign(dkim);
        }

        Ok((message, message_id))
    }
}

#[async_trait]
impl EmailTransport for SmtpTransport {
    #[tracing::instrument(name = "SMTP send", skip(self, email), fields(host = %self.host))]
    async fn send(&self, email: &Email) -> anyhow::Result<String> {
        let recipient: Address = email
            .to
            .as_ref()
            .parse()
            .context("Failed to parse recipient address")?;
        let envelope = Envelope::new(Some(self.bounce.clone()), vec![recipient.clone()])
            .context("Failed to build envelope")?;

        let (message, message_id) = self.message(email, recipient)?;

        self.transport()?
            .send_raw(&envelope, &message.formatted())
            .await
            .context("SMTP delivery failed")?;

        Ok(message_id)
    }
}
