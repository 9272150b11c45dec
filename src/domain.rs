mod application_form;
mod communication;
mod email_address;
mod institution;
mod motivation;
mod person_name;
mod phone_number;
mod resume_link;

pub use application_form::{AmbassadorApplication, ApplicationField, FieldErrors};
pub use communication::{CommunicationStatus, CommunicationType, InquiryType};
pub use email_address::EmailAddress;
pub use institution::Institution;
pub use motivation::Motivation;
pub use person_name::PersonName;
pub use phone_number::PhoneNumber;
pub use resume_link::ResumeLink;
