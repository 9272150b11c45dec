use std::fmt;
use std::str::FromStr;

use regex::Regex;

lazy_static::lazy_static! {
    static ref NAME_REGEX: Regex = Regex::new(r#"^[a-zA-Z\s.'"-]{2,50}$"#).unwrap();
}

/// Applicant name as accepted by the campus-ambassador form
#[derive(Debug, PartialEq, Clone)]
pub struct PersonName(String);

impl FromStr for PersonName {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err("Name is required".into());
        }
        if !NAME_REGEX.is_match(value) {
            return Err("Please enter a valid name (2-50 characters, letters only)".into());
        }
        Ok(Self(value.to_string()))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
