use std::str::FromStr;

/// Ten digit phone number, optionally prefixed with `+` and a country code
/// of up to three digits, as the application form sends it
#[derive(Debug, PartialEq, Clone)]
pub struct PhoneNumber(String);

impl FromStr for PhoneNumber {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err("Phone number is required".into());
        }
        let digits = value.strip_prefix('+').unwrap_or(value);
        let valid_len = if digits.len() == value.len() {
            digits.len() == 10
        } else {
            (11..=13).contains(&digits.len())
        };
        if !valid_len || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err("Please enter a valid 10-digit phone number".into());
        }
        Ok(Self(value.to_string()))
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
