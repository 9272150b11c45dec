mod email_client;
mod smtp;
mod templates;

pub use email_client::{
    AdminNotification, Delivery, Email, EmailAttachment, EmailClient, EmailTransport,
    UserConfirmation,
};
pub use smtp::SmtpTransport;
pub use templates::SiteDetails;
