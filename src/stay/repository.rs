// Repository pattern - isolates all database side effects
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson, Document};
use mongodb::{Collection, Database};
use std::sync::Arc;

use crate::auth::OwnerScope;
use crate::db::RepositoryError;
use crate::stay::domain::{Review, Stay, StayMsg, StaySummary};
use crate::stay::query::{build_criteria, build_sort, StayFilter};

/// Rows per page when a page index is requested.
const PAGE_SIZE: i64 = 3;

#[async_trait]
pub trait StayRepository: Send + Sync {
    /// Filtered, sorted, optionally paginated listing.
    async fn find(&self, filter: &StayFilter) -> Result<Vec<Stay>, RepositoryError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Stay>, RepositoryError>;

    /// Insert and return the generated id.
    async fn insert(&self, stay: &Stay) -> Result<ObjectId, RepositoryError>;

    /// Apply a `$set` patch; false when no document matched.
    async fn set_fields(&self, id: &ObjectId, fields: Document) -> Result<bool, RepositoryError>;

    /// Owner-scoped conditional delete; false when nothing was deleted.
    async fn delete(&self, id: &ObjectId, scope: &OwnerScope) -> Result<bool, RepositoryError>;

    async fn push_review(&self, id: &ObjectId, review: &Review) -> Result<bool, RepositoryError>;

    /// Owner-scoped pull by review id; false when nothing changed.
    async fn pull_review(
        &self,
        id: &ObjectId,
        review_id: &str,
        scope: &OwnerScope,
    ) -> Result<bool, RepositoryError>;

    async fn push_msg(&self, id: &ObjectId, msg: &StayMsg) -> Result<bool, RepositoryError>;

    async fn pull_msg(
        &self,
        id: &ObjectId,
        msg_id: &str,
        scope: &OwnerScope,
    ) -> Result<bool, RepositoryError>;

    /// Bulk summary projection for wishlist resolution; ids that match no
    /// document are simply absent from the result.
    async fn find_summaries(&self, ids: &[ObjectId]) -> Result<Vec<StaySummary>, RepositoryError>;
}

/// Type alias for Arc-wrapped repository (for AppState)
pub type DynStayRepository = Arc<dyn StayRepository>;

/// MongoDB implementation over the `stay` collection.
pub struct MongoStayRepository {
    stays: Collection<Stay>,
    summaries: Collection<StaySummary>,
}

impl MongoStayRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            stays: db.collection("stay"),
            summaries: db.collection("stay"),
        }
    }
}

/// Narrow a criteria document to the caller's scope. Admins pass through,
/// everyone else gets an owner clause on the given field.
fn scoped(mut criteria: Document, scope: &OwnerScope, owner_field: &str) -> Document {
    if let OwnerScope::Owner(user_id) = scope {
        criteria.insert(owner_field, user_id.clone());
    }
    criteria
}

#[async_trait]
impl StayRepository for MongoStayRepository {
    async fn find(&self, filter: &StayFilter) -> Result<Vec<Stay>, RepositoryError> {
        let criteria = build_criteria(filter);
        let sort = build_sort(filter);

        let mut find = self.stays.find(criteria);
        if !sort.is_empty() {
            find = find.sort(sort);
        }
        if let Some(page_idx) = filter.page_idx {
            find = find.skip(page_idx * PAGE_SIZE as u64).limit(PAGE_SIZE);
        }

        Ok(find.await?.try_collect().await?)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Stay>, RepositoryError> {
        Ok(self.stays.find_one(doc! { "_id": *id }).await?)
    }

    async fn insert(&self, stay: &Stay) -> Result<ObjectId, RepositoryError> {
        let result = self.stays.insert_one(stay).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or(RepositoryError::MissingInsertedId)
    }

    async fn set_fields(&self, id: &ObjectId, fields: Document) -> Result<bool, RepositoryError> {
        let result = self
            .stays
            .update_one(doc! { "_id": *id }, doc! { "$set": fields })
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &ObjectId, scope: &OwnerScope) -> Result<bool, RepositoryError> {
        let criteria = scoped(doc! { "_id": *id }, scope, "host._id");
        let result = self.stays.delete_one(criteria).await?;
        Ok(result.deleted_count > 0)
    }

    async fn push_review(&self, id: &ObjectId, review: &Review) -> Result<bool, RepositoryError> {
        let result = self
            .stays
            .update_one(
                doc! { "_id": *id },
                doc! { "$push": { "reviews": to_bson(review)? } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn pull_review(
        &self,
        id: &ObjectId,
        review_id: &str,
        scope: &OwnerScope,
    ) -> Result<bool, RepositoryError> {
        let criteria = scoped(doc! { "_id": *id }, scope, "reviews.by._id");
        let result = self
            .stays
            .update_one(criteria, doc! { "$pull": { "reviews": { "id": review_id } } })
            .await?;
        Ok(result.modified_count > 0)
    }

    async fn push_msg(&self, id: &ObjectId, msg: &StayMsg) -> Result<bool, RepositoryError> {
        let result = self
            .stays
            .update_one(
                doc! { "_id": *id },
                doc! { "$push": { "msgs": to_bson(msg)? } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn pull_msg(
        &self,
        id: &ObjectId,
        msg_id: &str,
        scope: &OwnerScope,
    ) -> Result<bool, RepositoryError> {
        let criteria = scoped(doc! { "_id": *id }, scope, "msgs.from._id");
        let result = self
            .stays
            .update_one(criteria, doc! { "$pull": { "msgs": { "id": msg_id } } })
            .await?;
        Ok(result.modified_count > 0)
    }

    async fn find_summaries(&self, ids: &[ObjectId]) -> Result<Vec<StaySummary>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self
            .summaries
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .projection(doc! {
                "name": 1,
                "loc": 1,
                "price": 1,
                "imgUrls": 1,
                "summary": 1,
                "beds": 1,
                "host.rating": 1,
            })
            .await?;

        Ok(cursor.try_collect().await?)
    }
}
