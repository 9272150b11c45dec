use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a stored communication, also the second half of the dedup key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationType {
    EarlyAccess,
    Newsletter,
    CampusAmbassador,
    Contact,
    Other,
}

impl CommunicationType {
    pub const ALL: [Self; 5] = [
        Self::EarlyAccess,
        Self::Newsletter,
        Self::CampusAmbassador,
        Self::Contact,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EarlyAccess => "early_access",
            Self::Newsletter => "newsletter",
            Self::CampusAmbassador => "campus_ambassador",
            Self::Contact => "contact",
            Self::Other => "other",
        }
    }

    /// Human readable label, e.g. "Campus ambassador"
    pub fn label(&self) -> &'static str {
        match self {
            Self::EarlyAccess => "Early access",
            Self::Newsletter => "Newsletter",
            Self::CampusAmbassador => "Campus ambassador",
            Self::Contact => "Contact",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for CommunicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review state of a stored communication.
/// Intake always writes `Pending`; transitions belong to admin tooling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationStatus {
    #[default]
    Pending,
    Reviewed,
    Approved,
    Rejected,
    Contacted,
}

impl CommunicationStatus {
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Reviewed,
        Self::Approved,
        Self::Rejected,
        Self::Contacted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Contacted => "contacted",
        }
    }
}

/// `inquiryType` sent by the contact form.
/// Several spellings map onto the same communication type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryType {
    #[default]
    Contact,
    Newsletter,
    Ambassador,
    CampusAmbassador,
    Signup,
    EarlyAccess,
    #[serde(other)]
    Other,
}

impl InquiryType {
    pub fn communication_type(&self) -> CommunicationType {
        match self {
            Self::Newsletter => CommunicationType::Newsletter,
            Self::Ambassador | Self::CampusAmbassador => CommunicationType::CampusAmbassador,
            Self::Signup | Self::EarlyAccess => CommunicationType::EarlyAccess,
            Self::Contact | Self::Other => CommunicationType::Contact,
        }
    }
}
