use std::str::FromStr;

use unicode_segmentation::UnicodeSegmentation;

const MIN_LEN: usize = 50;

/// Free-text motivation of a campus-ambassador applicant
#[derive(Debug, PartialEq, Clone)]
pub struct Motivation(String);

impl FromStr for Motivation {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err("Please tell us why you want to be a Campus Ambassador".into());
        }
        if value.graphemes(true).count() < MIN_LEN {
            return Err("Please provide at least 50 characters".into());
        }
        Ok(Self(value.to_string()))
    }
}

impl AsRef<str> for Motivation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
