use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;

use chrono::{DateTime, Utc};

use serde::{Deserialize, Serialize};

use crate::domain::{CommunicationStatus, CommunicationType, EmailAddress};

/// A submission accepted by one of the intake endpoints, before it is stored
#[derive(Debug, Clone)]
pub struct NewCommunication {
    pub email: EmailAddress,
    pub communication_type: CommunicationType,
    pub name: Option<String>,
    pub institution: Option<String>,
    pub phone: Option<String>,
    pub motivation: Option<String>,
    pub resume_link: Option<String>,
    pub message: Option<String>,
    pub year: Option<String>,
    pub subject: Option<String>,
}

impl NewCommunication {
    /// Empty submission of the given type, fields are filled in by the caller
    pub fn new(email: EmailAddress, communication_type: CommunicationType) -> Self {
        Self {
            email,
            communication_type,
            name: None,
            institution: None,
            phone: None,
            motivation: None,
            resume_link: None,
            message: None,
            year: None,
            subject: None,
        }
    }
}

/// Stored `user_communications` document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub communication_type: CommunicationType,
    pub status: CommunicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Admin notes, only written by admin tooling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub admin_responses: Vec<AdminResponse>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl CommunicationRecord {
    /// Stamp a new submission as pending, created and updated at `now`
    pub fn from_new(new: NewCommunication, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            email: new.email.as_ref().to_string(),
            communication_type: new.communication_type,
            status: CommunicationStatus::default(),
            name: new.name,
            institution: new.institution,
            phone: new.phone,
            motivation: new.motivation,
            resume_link: new.resume_link,
            message: new.message,
            year: new.year,
            subject: new.subject,
            notes: None,
            admin_responses: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// One entry of a record's admin response history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
    pub admin_id: String,
    pub message: String,
}

/// Fields admin tooling may change on an existing record
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CommunicationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
