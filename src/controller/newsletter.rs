use actix_web::{post, web, HttpResponse, Responder};

use serde::Deserialize;

use crate::client::{AdminNotification, EmailClient, UserConfirmation};
use crate::domain::CommunicationType;
use crate::error::{IntakeError, IntakeResponse, IntakeResult};
use crate::model::NewCommunication;
use crate::repo::CommunicationRepo;
use crate::settings::IntakeSettings;

use super::{parse_email, provided, send_emails};

#[derive(Debug, Deserialize)]
pub struct NewsletterSubmission {
    email: Option<String>,
    name: Option<String>,
}

/// Subscribe an email address to the newsletter
#[tracing::instrument(
    name = "Subscribe to the newsletter",
    skip(repo, email_client, intake, submission),
    fields(subscriber_email = ?submission.email)
)]
#[post("/newsletter")]
pub async fn create(
    repo: web::Data<dyn CommunicationRepo>,
    email_client: web::Data<EmailClient>,
    intake: web::Data<IntakeSettings>,
    submission: web::Json<NewsletterSubmission>,
) -> IntakeResult<impl Responder> {
    let submission = submission.into_inner();

    let Some(email) = provided(&submission.email) else {
        return Err(IntakeError::Validation("Email is required".into()));
    };
    let email = parse_email(email)?;
    let name = provided(&submission.name).unwrap_or("Subscriber");

    if repo
        .has_communicated(&email, CommunicationType::Newsletter)
        .await?
    {
        return Err(IntakeError::Duplicate(
            "This email is already subscribed to our newsletter".into(),
        ));
    }

    if intake.persist_newsletter {
        repo.insert(NewCommunication {
            name: Some(name.to_string()),
            message: Some("Newsletter subscription request".into()),
            ..NewCommunication::new(email.clone(), CommunicationType::Newsletter)
        })
        .await?;
    } else {
        tracing::debug!("Newsletter persistence disabled, subscription not stored");
    }

    let confirmation = UserConfirmation {
        name: name.to_string(),
        email: email.clone(),
        communication_type: CommunicationType::Newsletter,
    };
    let notification = AdminNotification {
        communication_type: CommunicationType::Newsletter,
        name: Some(name.to_string()),
        email: email.clone(),
        institution: None,
        subject: Some("New Newsletter Subscription".into()),
        message: Some(format!(
            "A new user has subscribed to the newsletter with email: {}",
            email
        )),
        resume_link: None,
    };
    send_emails(&email_client, &confirmation, &notification).await;

    Ok(HttpResponse::Ok().json(IntakeResponse::success("Subscription successful")))
}
