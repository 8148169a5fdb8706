use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, to_bson};

use crate::auth::{authorize_owner, Identity};
use crate::db::RepositoryError;
use crate::error::{AppError, AppResult};
use crate::stay::domain::UserRef;
use crate::stay::repository::DynStayRepository;
use crate::users::DynUserDirectory;
use crate::util::{now_millis, parse_object_id};
use crate::wishlist::domain::{Wishlist, WishlistDraft, WishlistUpdate, WishlistView};
use crate::wishlist::repository::DynWishlistRepository;

#[derive(Clone)]
pub struct WishlistService {
    repo: DynWishlistRepository,
    stays: DynStayRepository,
    users: DynUserDirectory,
}

impl WishlistService {
    pub fn new(
        repo: DynWishlistRepository,
        stays: DynStayRepository,
        users: DynUserDirectory,
    ) -> Self {
        Self { repo, stays, users }
    }

    pub async fn list(&self, owner_id: Option<&str>) -> AppResult<Vec<WishlistView>> {
        let wishlists = self.repo.find(owner_id).await?;

        let mut views = Vec::with_capacity(wishlists.len());
        for wishlist in wishlists {
            views.push(self.resolve(wishlist).await?);
        }
        Ok(views)
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<WishlistView> {
        let oid = parse_object_id(id)?;
        let wishlist = self
            .repo
            .find_by_id(&oid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("wishlist {id} not found")))?;
        self.resolve(wishlist).await
    }

    pub async fn create(&self, draft: WishlistDraft, actor: &Identity) -> AppResult<Wishlist> {
        let now = now_millis();
        let mut wishlist = Wishlist {
            id: None,
            title: draft.title,
            city: draft.city,
            country: draft.country,
            by_user: UserRef::from(actor),
            stays: draft.stays,
            created_at: now,
            updated_at: now,
        };

        let id = self.repo.insert(&wishlist).await?;
        wishlist.id = Some(id);

        self.users
            .add_wishlist_ref(&wishlist.by_user.id, &id.to_hex())
            .await?;

        Ok(wishlist)
    }

    pub async fn update(
        &self,
        id: &str,
        update: WishlistUpdate,
        actor: &Identity,
    ) -> AppResult<Wishlist> {
        let oid = parse_object_id(id)?;
        let existing = self
            .repo
            .find_by_id(&oid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("wishlist {id} not found")))?;

        authorize_owner(actor, &existing.by_user.id)?;

        // Check-then-write: a concurrent delete can slip between the load
        // and the $set; the zero-effect write below still surfaces it.
        let by_user = update.by_user.unwrap_or(existing.by_user);
        let fields = doc! {
            "title": update.title,
            "stays": update.stays,
            "city": update.city,
            "country": update.country,
            "byUser": to_bson(&by_user).map_err(RepositoryError::from)?,
            "updatedAt": now_millis(),
        };

        if !self.repo.set_fields(&oid, fields).await? {
            return Err(AppError::NotFound(format!("wishlist {id} not found")));
        }

        self.repo
            .find_by_id(&oid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("wishlist {id} not found")))
    }

    pub async fn remove(&self, id: &str, actor: &Identity) -> AppResult<String> {
        let oid = parse_object_id(id)?;
        let existing = self
            .repo
            .find_by_id(&oid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("wishlist {id} not found")))?;

        authorize_owner(actor, &existing.by_user.id)?;

        if !self.repo.delete(&oid).await? {
            return Err(AppError::NotFound(format!("wishlist {id} not found")));
        }

        self.users
            .remove_wishlist_ref(&existing.by_user.id, id)
            .await?;

        Ok(id.to_string())
    }

    pub async fn add_stay(
        &self,
        id: &str,
        stay_id: &str,
        actor: &Identity,
    ) -> AppResult<WishlistView> {
        let oid = parse_object_id(id)?;
        let existing = self
            .repo
            .find_by_id(&oid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("wishlist {id} not found")))?;

        authorize_owner(actor, &existing.by_user.id)?;

        if existing.contains_stay(stay_id) {
            return Err(AppError::Conflict(format!(
                "stay {stay_id} already in wishlist"
            )));
        }

        if !self.repo.push_stay(&oid, stay_id, now_millis()).await? {
            return Err(AppError::NotFound(format!("wishlist {id} not found")));
        }

        self.get_by_id(id).await
    }

    pub async fn remove_stay(
        &self,
        id: &str,
        stay_id: &str,
        actor: &Identity,
    ) -> AppResult<WishlistView> {
        let oid = parse_object_id(id)?;
        let existing = self
            .repo
            .find_by_id(&oid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("wishlist {id} not found")))?;

        authorize_owner(actor, &existing.by_user.id)?;

        if !self.repo.pull_stay(&oid, stay_id, now_millis()).await? {
            return Err(AppError::NotFound(format!("wishlist {id} not found")));
        }

        self.get_by_id(id).await
    }

    /// Resolve stay references to summaries. Ids that no longer match a
    /// stay, or never parsed as ids, are silently dropped.
    async fn resolve(&self, wishlist: Wishlist) -> AppResult<WishlistView> {
        let ids: Vec<ObjectId> = wishlist
            .stays
            .iter()
            .filter_map(|id| ObjectId::parse_str(id).ok())
            .collect();

        let summaries = if ids.is_empty() {
            Vec::new()
        } else {
            self.stays.find_summaries(&ids).await?
        };

        Ok(WishlistView::new(wishlist, summaries))
    }
}
