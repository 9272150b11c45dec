use async_trait::async_trait;

use bson::oid::ObjectId;
use bson::{doc, Document};

use chrono::Utc;

use mongodb::options::CreateCollectionOptions;
use mongodb::{Client, Collection, Database};

use tokio::sync::OnceCell;

use crate::domain::{CommunicationType, EmailAddress};
use crate::model::{AdminResponse, CommunicationRecord, CommunicationUpdate, NewCommunication};
use crate::settings::DatabaseSettings;

use super::schema::{communication_indexes, communication_validator, COMMUNICATIONS_COLLECTION};
use super::{CommunicationRepo, RepoError, RepoResult};

/// MongoDB backed [`CommunicationRepo`].
///
/// One instance is shared by every request; the driver pools connections
/// internally. The collection, its validator and its indexes are set up
/// on first use.
#[derive(Debug)]
pub struct MongoCommunicationRepo {
    db: Database,
    collection: OnceCell<Collection<CommunicationRecord>>,
}

impl MongoCommunicationRepo {
    pub async fn connect(settings: &DatabaseSettings) -> RepoResult<Self> {
        use secrecy::ExposeSecret;

        let client = Client::with_uri_str(settings.uri().expose_secret()).await?;

        Ok(Self::new(client.database(settings.name())))
    }

    pub fn new(db: Database) -> Self {
        Self {
            db,
            collection: OnceCell::new(),
        }
    }

    async fn collection(&self) -> RepoResult<&Collection<CommunicationRecord>> {
        self.collection
            .get_or_try_init(|| init_collection(&self.db))
            .await
    }
}

#[tracing::instrument(name = "Initialize communications collection", skip(db))]
async fn init_collection(db: &Database) -> RepoResult<Collection<CommunicationRecord>> {
    let existing = db.list_collection_names(None).await?;

    if !existing.iter().any(|name| name == COMMUNICATIONS_COLLECTION) {
        let options = CreateCollectionOptions::builder()
            .validator(communication_validator())
            .build();
        db.create_collection(COMMUNICATIONS_COLLECTION, options)
            .await?;
        db.collection::<Document>(COMMUNICATIONS_COLLECTION)
            .create_indexes(communication_indexes(), None)
            .await?;

        tracing::info!(
            "Created {} collection with schema validation",
            COMMUNICATIONS_COLLECTION
        );
    }

    Ok(db.collection(COMMUNICATIONS_COLLECTION))
}

#[async_trait]
impl CommunicationRepo for MongoCommunicationRepo {
    #[tracing::instrument(name = "Check for a previous communication", skip(self))]
    async fn has_communicated(
        &self,
        email: &EmailAddress,
        communication_type: CommunicationType,
    ) -> RepoResult<bool> {
        let count = self
            .collection()
            .await?
            .count_documents(
                doc! {
                    "email": email.as_ref(),
                    "communicationType": communication_type.as_str(),
                },
                None,
            )
            .await?;

        Ok(count > 0)
    }

    #[tracing::instrument(
        name = "Insert communication",
        skip(self, new_communication),
        fields(
            email = %new_communication.email,
            communication_type = %new_communication.communication_type,
        )
    )]
    async fn insert(&self, new_communication: NewCommunication) -> RepoResult<ObjectId> {
        let record = CommunicationRecord::from_new(new_communication, Utc::now());

        let result = self.collection().await?.insert_one(&record, None).await?;

        result
            .inserted_id
            .as_object_id()
            .ok_or(RepoError::UnexpectedId(result.inserted_id))
    }

    #[tracing::instrument(name = "Update communication", skip(self))]
    async fn update(&self, id: ObjectId, update: CommunicationUpdate) -> RepoResult<bool> {
        let mut set = bson::to_document(&update)?;
        set.insert("updatedAt", bson::DateTime::from_chrono(Utc::now()));

        let result = self
            .collection()
            .await?
            .update_one(doc! { "_id": id }, doc! { "$set": set }, None)
            .await?;

        Ok(result.matched_count > 0)
    }

    #[tracing::instrument(name = "Add admin response", skip(self, message))]
    async fn add_admin_response(
        &self,
        id: ObjectId,
        admin_id: &str,
        message: &str,
    ) -> RepoResult<bool> {
        let now = Utc::now();
        let response = AdminResponse {
            date: now,
            admin_id: admin_id.to_string(),
            message: message.to_string(),
        };

        let result = self
            .collection()
            .await?
            .update_one(
                doc! { "_id": id },
                doc! {
                    "$push": { "adminResponses": bson::to_bson(&response)? },
                    "$set": { "updatedAt": bson::DateTime::from_chrono(now) },
                },
                None,
            )
            .await?;

        Ok(result.matched_count > 0)
    }
}
