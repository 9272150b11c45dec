use actix_web::{post, web, HttpResponse, Responder};

use serde::Deserialize;

use crate::client::{AdminNotification, EmailClient, UserConfirmation};
use crate::domain::{AmbassadorApplication, CommunicationType};
use crate::error::{IntakeError, IntakeResponse, IntakeResult};
use crate::model::NewCommunication;
use crate::repo::CommunicationRepo;
use crate::settings::IntakeSettings;

use super::{parse_email, provided, send_emails};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmbassadorSubmission {
    name: Option<String>,
    email: Option<String>,
    institution: Option<String>,
    year: Option<String>,
    phone: Option<String>,
    motivation: Option<String>,
    resume_link: Option<String>,
}

impl AmbassadorSubmission {
    fn as_application(&self) -> AmbassadorApplication {
        AmbassadorApplication {
            name: self.name.clone().unwrap_or_default(),
            email: self.email.clone().unwrap_or_default(),
            institution: self.institution.clone().unwrap_or_default(),
            year: self.year.clone().unwrap_or_default(),
            phone: self.phone.clone().unwrap_or_default(),
            motivation: self.motivation.clone().unwrap_or_default(),
            resume_link: self.resume_link.clone().unwrap_or_default(),
        }
    }
}

/// Accept a campus-ambassador application
#[tracing::instrument(
    name = "Submit a campus ambassador application",
    skip(repo, email_client, intake, submission),
    fields(applicant_email = ?submission.email)
)]
#[post("/campus-ambassador")]
pub async fn create(
    repo: web::Data<dyn CommunicationRepo>,
    email_client: web::Data<EmailClient>,
    intake: web::Data<IntakeSettings>,
    submission: web::Json<AmbassadorSubmission>,
) -> IntakeResult<impl Responder> {
    let submission = submission.into_inner();

    let (Some(name), Some(email), Some(institution), Some(year), Some(phone), Some(motivation)) = (
        provided(&submission.name),
        provided(&submission.email),
        provided(&submission.institution),
        provided(&submission.year),
        provided(&submission.phone),
        provided(&submission.motivation),
    ) else {
        return Err(IntakeError::Validation("All fields are required".into()));
    };

    let email = parse_email(email)?;

    if intake.strict_validation {
        if let Err(errors) = submission.as_application().validate() {
            let message = errors
                .first()
                .map(|(_, message)| message.to_string())
                .unwrap_or_default();
            return Err(IntakeError::Validation(message));
        }
    }

    if repo
        .has_communicated(&email, CommunicationType::CampusAmbassador)
        .await?
    {
        return Err(IntakeError::Duplicate(
            "You have already applied for the Campus Ambassador program".into(),
        ));
    }

    let resume_link = provided(&submission.resume_link).unwrap_or_default();

    repo.insert(NewCommunication {
        name: Some(name.to_string()),
        institution: Some(institution.to_string()),
        year: Some(year.to_string()),
        phone: Some(phone.to_string()),
        motivation: Some(motivation.to_string()),
        resume_link: Some(resume_link.to_string()),
        // Keep the motivation searchable alongside other messages
        message: Some(motivation.to_string()),
        ..NewCommunication::new(email.clone(), CommunicationType::CampusAmbassador)
    })
    .await?;

    let confirmation = UserConfirmation {
        name: name.to_string(),
        email: email.clone(),
        communication_type: CommunicationType::CampusAmbassador,
    };
    let notification = AdminNotification {
        communication_type: CommunicationType::CampusAmbassador,
        name: Some(name.to_string()),
        email: email.clone(),
        institution: Some(institution.to_string()),
        subject: Some("New Campus Ambassador Application".into()),
        message: Some(format!(
            "Name: {}\nEmail: {}\nInstitution: {}\nYear of Study: {}\nPhone: {}\nMotivation: {}\nResume Link: {}",
            name,
            email,
            institution,
            year,
            phone,
            motivation,
            if resume_link.is_empty() { "Not provided" } else { resume_link },
        )),
        resume_link: Some(resume_link.to_string()),
    };
    send_emails(&email_client, &confirmation, &notification).await;

    Ok(HttpResponse::Created().json(IntakeResponse::success("Application submitted successfully")))
}
