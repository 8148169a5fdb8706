// User-service collaborator: keeps the wishlist back-reference set on the
// user document in sync when wishlists are created or deleted.
use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::{Collection, Database};
use std::sync::Arc;

use crate::db::RepositoryError;

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn add_wishlist_ref(
        &self,
        user_id: &str,
        wishlist_id: &str,
    ) -> Result<(), RepositoryError>;

    async fn remove_wishlist_ref(
        &self,
        user_id: &str,
        wishlist_id: &str,
    ) -> Result<(), RepositoryError>;
}

pub type DynUserDirectory = Arc<dyn UserDirectory>;

pub struct MongoUserDirectory {
    users: Collection<Document>,
}

impl MongoUserDirectory {
    pub fn new(db: &Database) -> Self {
        Self {
            users: db.collection("user"),
        }
    }
}

#[async_trait]
impl UserDirectory for MongoUserDirectory {
    async fn add_wishlist_ref(
        &self,
        user_id: &str,
        wishlist_id: &str,
    ) -> Result<(), RepositoryError> {
        let user_oid = ObjectId::parse_str(user_id)?;
        self.users
            .update_one(
                doc! { "_id": user_oid },
                doc! { "$addToSet": { "wishlistIds": wishlist_id } },
            )
            .await?;
        Ok(())
    }

    async fn remove_wishlist_ref(
        &self,
        user_id: &str,
        wishlist_id: &str,
    ) -> Result<(), RepositoryError> {
        let user_oid = ObjectId::parse_str(user_id)?;
        self.users
            .update_one(
                doc! { "_id": user_oid },
                doc! { "$pull": { "wishlistIds": wishlist_id } },
            )
            .await?;
        Ok(())
    }
}
