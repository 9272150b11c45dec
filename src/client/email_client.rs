use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use chrono::Datelike;

use crate::domain::{CommunicationType, EmailAddress};

use super::templates::{self, SiteDetails};

/// File attached to an outgoing email
#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

/// A single outgoing email
#[derive(Debug, Clone)]
pub struct Email {
    pub to: EmailAddress,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
    pub attachments: Vec<EmailAttachment>,
    /// Value of the `List-Unsubscribe` header, if any
    pub list_unsubscribe: Option<String>,
}

/// Something that can put an [`Email`] on the wire
#[async_trait]
pub trait EmailTransport: Send + Sync {
    /// Deliver the email, returning its message id
    async fn send(&self, email: &Email) -> anyhow::Result<String>;
}

/// Outcome of a best-effort send
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    Sent { message_id: String },
    Failed { error: String },
}

impl Delivery {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }
}

/// Details of a submission, for the admin mailbox
#[derive(Debug, Clone)]
pub struct AdminNotification {
    pub communication_type: CommunicationType,
    pub name: Option<String>,
    pub email: EmailAddress,
    pub institution: Option<String>,
    /// Overrides the subject derived from `communication_type`
    pub subject: Option<String>,
    pub message: Option<String>,
    pub resume_link: Option<String>,
}

/// Acknowledgement sent back to the submitter
#[derive(Debug, Clone)]
pub struct UserConfirmation {
    pub name: String,
    pub email: EmailAddress,
    pub communication_type: CommunicationType,
}

/// Sends transactional emails through an [`EmailTransport`]
#[derive(Clone)]
pub struct EmailClient {
    transport: Arc<dyn EmailTransport>,
    admin: EmailAddress,
    site: SiteDetails,
}

impl fmt::Debug for EmailClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailClient")
            .field("admin", &self.admin)
            .field("site", &self.site)
            .finish_non_exhaustive()
    }
}

impl EmailClient {
    pub fn new(transport: Arc<dyn EmailTransport>, admin: EmailAddress, site: SiteDetails) -> Self {
        Self {
            transport,
            admin,
            site,
        }
    }

    /// Send an email. Failures are logged and reported, never returned as errors.
    #[tracing::instrument(
        name = "Send email",
        skip(self, email),
        fields(recipient = %email.to, subject = %email.subject)
    )]
    pub async fn send_email(&self, email: Email) -> Delivery {
        match self.transport.send(&email).await {
            Ok(message_id) => {
                tracing::info!(message_id = %message_id, "Email sent");
                Delivery::Sent { message_id }
            }
            Err(e) => {
                tracing::error!(error.cause_chain = ?e, "Email sending failed");
                Delivery::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Forward a submission to the admin mailbox
    pub async fn notify_admin(&self, notification: &AdminNotification) -> Delivery {
        let rendered = templates::admin_notification(notification, current_year());

        self.send_email(Email {
            to: self.admin.clone(),
            subject: rendered.subject,
            html_body: rendered.html_body,
            text_body: rendered.text_body,
            attachments: Vec::new(),
            list_unsubscribe: None,
        })
        .await
    }

    /// Thank the submitter, worded for the kind of submission
    pub async fn send_confirmation_to_user(&self, confirmation: &UserConfirmation) -> Delivery {
        let rendered = templates::user_confirmation(confirmation, &self.site, current_year());
        let list_unsubscribe = templates::list_unsubscribe(confirmation.email.as_ref(), &self.site);

        self.send_email(Email {
            to: confirmation.email.clone(),
            subject: rendered.subject,
            html_body: rendered.html_body,
            text_body: rendered.text_body,
            attachments: Vec::new(),
            list_unsubscribe: Some(list_unsubscribe),
        })
        .await
    }
}

fn current_year() -> i32 {
    chrono::Utc::now().year()
}
