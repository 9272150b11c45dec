use std::str::FromStr;

use regex::Regex;

lazy_static::lazy_static! {
    static ref RESUME_HOST_REGEX: Regex = Regex::new(
        r"^(https?://)?(www\.)?(drive\.google\.com|docs\.google\.com|linkedin\.com|github\.com|dropbox\.com|onedrive\.live\.com).*$"
    )
    .unwrap();
}

/// Link to a resume hosted on one of the accepted document services
#[derive(Debug, PartialEq, Clone)]
pub struct ResumeLink(String);

impl FromStr for ResumeLink {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err("Resume link is required".into());
        }
        if !RESUME_HOST_REGEX.is_match(value) {
            return Err("Please provide a valid link to Google Drive, LinkedIn, GitHub, Dropbox, or OneDrive".into());
        }
        Ok(Self(value.to_string()))
    }
}

impl AsRef<str> for ResumeLink {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
