use std::str::FromStr;

use unicode_segmentation::UnicodeSegmentation;

const MIN_LEN: usize = 3;

/// Name of the applicant's educational institution
#[derive(Debug, PartialEq, Clone)]
pub struct Institution(String);

impl FromStr for Institution {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err("Institution is required".into());
        }
        if value.graphemes(true).count() < MIN_LEN {
            return Err("Institution name must be at least 3 characters".into());
        }
        Ok(Self(value.to_string()))
    }
}

impl AsRef<str> for Institution {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
