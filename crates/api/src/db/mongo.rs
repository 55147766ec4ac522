//! `MongoDB` backend for [`DocumentStore`].

use std::time::Duration;

use bson::{Bson, Document, doc};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use secrecy::{ExposeSecret, SecretString};
use stockroom_core::ResourceId;

use super::store::{DocumentStore, Filter, StoreError, UpdateOutcome};

/// Application name reported to the server in the connection handshake.
const APP_NAME: &str = "stockroom-api";

/// Gateway backed by one `MongoDB` database.
///
/// Cloning is cheap: the driver's `Database` handle shares the client's
/// connection pool.
#[derive(Clone, Debug)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Build a client for `uri` and select `database`.
    ///
    /// The driver connects lazily, so this succeeds even when the server is
    /// down; use [`DocumentStore::ping`] to check reachability.
    /// `selection_timeout` bounds how long an operation waits for a usable
    /// server.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Mongo` if the URI cannot be parsed or the client
    /// options are invalid.
    pub async fn connect(
        uri: &SecretString,
        database: &str,
        selection_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(uri.expose_secret()).await?;
        options.app_name = Some(APP_NAME.to_owned());
        options.server_selection_timeout = Some(selection_timeout);

        let client = Client::with_options(options)?;
        tracing::info!(database, "MongoDB client created");

        Ok(Self {
            database: client.database(database),
        })
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection(name)
    }
}

impl DocumentStore for MongoStore {
    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<ResourceId, StoreError> {
        let result = self.collection(collection).insert_one(document).await?;
        match result.inserted_id {
            Bson::ObjectId(oid) => Ok(oid.into()),
            other => Err(StoreError::UnexpectedId(other)),
        }
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Filter,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self
            .collection(collection)
            .find_one(filter.to_document())
            .await?)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Filter,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        let result = self
            .collection(collection)
            .update_one(filter.to_document(), doc! { "$set": set })
            .upsert(upsert)
            .await?;

        let upserted_id = match result.upserted_id {
            Some(Bson::ObjectId(oid)) => Some(oid.into()),
            _ => None,
        };

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
            upserted_id,
        })
    }

    async fn delete_one(&self, collection: &str, filter: Filter) -> Result<u64, StoreError> {
        let result = self
            .collection(collection)
            .delete_one(filter.to_document())
            .await?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
