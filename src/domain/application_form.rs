use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use super::{EmailAddress, Institution, Motivation, PersonName, PhoneNumber, ResumeLink};

/// Fields of the campus-ambassador form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ApplicationField {
    Name,
    Email,
    Institution,
    Year,
    Phone,
    Motivation,
    ResumeLink,
}

impl ApplicationField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Institution => "institution",
            Self::Year => "year",
            Self::Phone => "phone",
            Self::Motivation => "motivation",
            Self::ResumeLink => "resumeLink",
        }
    }
}

impl fmt::Display for ApplicationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every failing field of a form together with its message
#[derive(Debug, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<ApplicationField, String>);

impl FieldErrors {
    pub fn get(&self, field: ApplicationField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// The failure a single-message response should report
    pub fn first(&self) -> Option<(ApplicationField, &str)> {
        self.0
            .iter()
            .next()
            .map(|(field, message)| (*field, message.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn check<T>(&mut self, field: ApplicationField, parsed: Result<T, String>) {
        if let Err(message) = parsed {
            self.0.insert(field, message);
        }
    }
}

/// Campus-ambassador application as filled in by the browser form.
///
/// [`AmbassadorApplication::validate`] applies the rules the form checks
/// before it submits. The intake endpoint itself only requires the fields
/// to be present, unless strict validation is enabled.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AmbassadorApplication {
    pub name: String,
    pub email: String,
    pub institution: String,
    pub year: String,
    pub phone: String,
    pub motivation: String,
    pub resume_link: String,
}

impl AmbassadorApplication {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        errors.check(ApplicationField::Name, self.name.parse::<PersonName>());
        errors.check(ApplicationField::Email, validate_email(&self.email));
        errors.check(
            ApplicationField::Institution,
            self.institution.parse::<Institution>(),
        );
        if self.year.is_empty() {
            errors.check::<()>(ApplicationField::Year, Err("Year of study is required".into()));
        }
        errors.check(ApplicationField::Phone, self.phone.parse::<PhoneNumber>());
        errors.check(
            ApplicationField::Motivation,
            self.motivation.parse::<Motivation>(),
        );
        errors.check(
            ApplicationField::ResumeLink,
            self.resume_link.parse::<ResumeLink>(),
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// The form trims before matching and words its messages for the end user
fn validate_email(value: &str) -> Result<EmailAddress, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("Email is required".into());
    }
    value
        .parse()
        .map_err(|_| "Please enter a valid email address".to_string())
}
