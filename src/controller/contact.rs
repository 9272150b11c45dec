use actix_web::{post, web, HttpResponse, Responder};

use serde::{Deserialize, Deserializer};

use crate::client::{AdminNotification, EmailClient, UserConfirmation};
use crate::domain::InquiryType;
use crate::error::{IntakeError, IntakeResponse, IntakeResult};
use crate::model::NewCommunication;
use crate::repo::CommunicationRepo;

use super::{parse_email, provided, send_emails};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    name: Option<String>,
    email: Option<String>,
    subject: Option<String>,
    message: Option<String>,
    /// `None` when the field is absent, `Some(None)` when it is `null`
    #[serde(default, deserialize_with = "present")]
    inquiry_type: Option<Option<InquiryType>>,
    institution: Option<String>,
    resume_link: Option<String>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<InquiryType>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::deserialize(deserializer).map(Some)
}

/// Accept a contact form message, or any other general inquiry.
/// Every submission is stored, repeated ones included.
#[tracing::instrument(
    name = "Submit a contact inquiry",
    skip(repo, email_client, submission),
    fields(
        sender_email = ?submission.email,
        inquiry_type = ?submission.inquiry_type,
    )
)]
#[post("/email")]
pub async fn create(
    repo: web::Data<dyn CommunicationRepo>,
    email_client: web::Data<EmailClient>,
    submission: web::Json<ContactSubmission>,
) -> IntakeResult<impl Responder> {
    let submission = submission.into_inner();
    // Only a missing or literal `contact` type makes the message mandatory,
    // an explicit `null` is filed as a contact without one
    let (inquiry_type, message_required) = match submission.inquiry_type {
        None => (InquiryType::Contact, true),
        Some(None) => (InquiryType::Contact, false),
        Some(Some(inquiry_type)) => (inquiry_type, inquiry_type == InquiryType::Contact),
    };

    let Some(email) = provided(&submission.email) else {
        return Err(IntakeError::Validation("Email is required".into()));
    };
    let message = provided(&submission.message);
    if message.is_none() && message_required {
        return Err(IntakeError::Validation(
            "Message is required for contact inquiries".into(),
        ));
    }

    let email = parse_email(email)?;
    let communication_type = inquiry_type.communication_type();

    let name = provided(&submission.name);
    let subject = provided(&submission.subject);
    let institution = provided(&submission.institution).unwrap_or_default();
    let resume_link = provided(&submission.resume_link).unwrap_or_default();

    repo.insert(NewCommunication {
        name: Some(name.unwrap_or("Anonymous").to_string()),
        subject: Some(subject.unwrap_or("No Subject").to_string()),
        message: Some(message.unwrap_or_default().to_string()),
        institution: Some(institution.to_string()),
        resume_link: Some(resume_link.to_string()),
        ..NewCommunication::new(email.clone(), communication_type)
    })
    .await?;

    let confirmation = UserConfirmation {
        name: name.unwrap_or("User").to_string(),
        email: email.clone(),
        communication_type,
    };
    let notification = AdminNotification {
        communication_type,
        name: Some(name.unwrap_or("Anonymous").to_string()),
        email,
        institution: Some(institution.to_string()),
        subject: Some(subject.unwrap_or("New Contact Form Submission").to_string()),
        message: Some(format!(
            "{}\n\nInstitution: {}\nResume Link: {}",
            message.unwrap_or("No message provided"),
            if institution.is_empty() { "Not provided" } else { institution },
            if resume_link.is_empty() { "Not provided" } else { resume_link },
        )),
        resume_link: Some(resume_link.to_string()),
    };
    send_emails(&email_client, &confirmation, &notification).await;

    Ok(HttpResponse::Ok().json(IntakeResponse::success("Message received successfully")))
}
