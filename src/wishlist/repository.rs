// Repository pattern - isolates all database side effects
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::{Collection, Database};
use std::sync::Arc;

use crate::db::RepositoryError;
use crate::wishlist::domain::Wishlist;

#[async_trait]
pub trait WishlistRepository: Send + Sync {
    /// All wishlists, optionally narrowed to one owner.
    async fn find(&self, owner_id: Option<&str>) -> Result<Vec<Wishlist>, RepositoryError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Wishlist>, RepositoryError>;

    async fn insert(&self, wishlist: &Wishlist) -> Result<ObjectId, RepositoryError>;

    /// Apply a `$set` patch; false when no document matched.
    async fn set_fields(&self, id: &ObjectId, fields: Document) -> Result<bool, RepositoryError>;

    async fn delete(&self, id: &ObjectId) -> Result<bool, RepositoryError>;

    /// Append a stay reference and stamp the update time.
    async fn push_stay(
        &self,
        id: &ObjectId,
        stay_id: &str,
        updated_at: i64,
    ) -> Result<bool, RepositoryError>;

    /// Remove a stay reference and stamp the update time.
    async fn pull_stay(
        &self,
        id: &ObjectId,
        stay_id: &str,
        updated_at: i64,
    ) -> Result<bool, RepositoryError>;
}

/// Type alias for Arc-wrapped repository (for AppState)
pub type DynWishlistRepository = Arc<dyn WishlistRepository>;

/// MongoDB implementation over the `wishlist` collection.
pub struct MongoWishlistRepository {
    wishlists: Collection<Wishlist>,
}

impl MongoWishlistRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            wishlists: db.collection("wishlist"),
        }
    }
}

#[async_trait]
impl WishlistRepository for MongoWishlistRepository {
    async fn find(&self, owner_id: Option<&str>) -> Result<Vec<Wishlist>, RepositoryError> {
        let criteria = match owner_id {
            Some(owner_id) => doc! { "byUser._id": owner_id },
            None => Document::new(),
        };

        Ok(self.wishlists.find(criteria).await?.try_collect().await?)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Wishlist>, RepositoryError> {
        Ok(self.wishlists.find_one(doc! { "_id": *id }).await?)
    }

    async fn insert(&self, wishlist: &Wishlist) -> Result<ObjectId, RepositoryError> {
        let result = self.wishlists.insert_one(wishlist).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or(RepositoryError::MissingInsertedId)
    }

    async fn set_fields(&self, id: &ObjectId, fields: Document) -> Result<bool, RepositoryError> {
        let result = self
            .wishlists
            .update_one(doc! { "_id": *id }, doc! { "$set": fields })
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, RepositoryError> {
        let result = self.wishlists.delete_one(doc! { "_id": *id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn push_stay(
        &self,
        id: &ObjectId,
        stay_id: &str,
        updated_at: i64,
    ) -> Result<bool, RepositoryError> {
        let result = self
            .wishlists
            .update_one(
                doc! { "_id": *id },
                doc! {
                    "$push": { "stays": stay_id },
                    "$set": { "updatedAt": updated_at },
                },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn pull_stay(
        &self,
        id: &ObjectId,
        stay_id: &str,
        updated_at: i64,
    ) -> Result<bool, RepositoryError> {
        let result = self
            .wishlists
            .update_one(
                doc! { "_id": *id },
                doc! {
                    "$pull": { "stays": stay_id },
                    "$set": { "updatedAt": updated_at },
                },
            )
            .await?;
        Ok(result.matched_count > 0)
    }
}
