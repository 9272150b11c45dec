mod communications;
mod schema;

pub use communications::MongoCommunicationRepo;
pub use schema::{communication_indexes, communication_validator, COMMUNICATIONS_COLLECTION};

use async_trait::async_trait;

use bson::oid::ObjectId;

use thiserror::Error;

use crate::domain::{CommunicationType, EmailAddress};
use crate::model::{CommunicationUpdate, NewCommunication};

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Failed to serialize record: {0}")]
    Serialization(#[from] bson::ser::Error),

    #[error("Unexpected inserted id: {0}")]
    UnexpectedId(bson::Bson),
}

/// Storage for user communications
#[async_trait]
pub trait CommunicationRepo: Send + Sync {
    /// Whether `email` already has a communication of the given type
    async fn has_communicated(
        &self,
        email: &EmailAddress,
        communication_type: CommunicationType,
    ) -> RepoResult<bool>;

    /// Store a new pending communication, returning its id
    async fn insert(&self, new_communication: NewCommunication) -> RepoResult<ObjectId>;

    /// Apply an admin update, returning whether a record matched `id`
    async fn update(&self, id: ObjectId, update: CommunicationUpdate) -> RepoResult<bool>;

    /// Append to a record's admin responses, returning whether a record matched `id`
    async fn add_admin_response(
        &self,
        id: ObjectId,
        admin_id: &str,
        message: &str,
    ) -> RepoResult<bool>;
}
