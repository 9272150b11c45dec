/// `POST /api/campus-ambassador`
pub mod campus_ambassador;
/// `POST /api/email`
pub mod contact;
/// `POST /api/newsletter`
pub mod newsletter;

use actix_web::dev::HttpServiceFactory;
use actix_web::web;

use crate::client::{AdminNotification, EmailClient, UserConfirmation};
use crate::domain::EmailAddress;
use crate::error::{IntakeError, IntakeResult};

/// Intake API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/api")
        .service(campus_ambassador::create)
        .service(contact::create)
        .service(newsletter::create)
}

/// A submitted field counts as missing when absent, null or empty
fn provided(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn parse_email(value: &str) -> IntakeResult<EmailAddress> {
    value
        .parse()
        .map_err(|_| IntakeError::Validation("Invalid email format".into()))
}

/// Confirm to the user, then notify the admin.
/// Delivery is best effort: failures are logged by the client and the
/// submission still succeeds.
async fn send_emails(
    email_client: &EmailClient,
    confirmation: &UserConfirmation,
    notification: &AdminNotification,
) {
    let confirmed = email_client.send_confirmation_to_user(confirmation).await;
    let notified = email_client.notify_admin(notification).await;

    if !(confirmed.is_sent() && notified.is_sent()) {
        tracing::warn!(
            confirmation = ?confirmed,
            notification = ?notified,
            "Submission accepted but not every email was delivered"
        );
    }
}
