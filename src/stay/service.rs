use chrono::{Duration, Utc};
use mongodb::bson::{to_bson, Document};

use crate::auth::{authorize_owner, Identity};
use crate::db::RepositoryError;
use crate::error::{AppError, AppResult};
use crate::stay::domain::{
    Host, MsgSender, Review, Stay, StayDetails, StayDraft, StayListItem, StayMsg, StayPatch,
    UserRef,
};
use crate::stay::query::StayFilter;
use crate::stay::repository::DynStayRepository;
use crate::util::{make_id, now_millis, parse_object_id};

/// Availability granted when a draft does not specify a window.
const DEFAULT_AVAILABILITY_DAYS: i64 = 60;

#[derive(Clone)]
pub struct StayService {
    repo: DynStayRepository,
}

impl StayService {
    pub fn new(repo: DynStayRepository) -> Self {
        Self { repo }
    }

    /// Filtered listing reshaped into the public row view. The viewer is
    /// only used for the unread-message badge and may be absent.
    pub async fn list(
        &self,
        filter: &StayFilter,
        viewer: Option<&Identity>,
    ) -> AppResult<Vec<StayListItem>> {
        let stays = self.repo.find(filter).await?;
        Ok(stays
            .into_iter()
            .map(|stay| StayListItem::from_stay(stay, viewer))
            .collect())
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<StayDetails> {
        let oid = parse_object_id(id)?;
        let stay = self
            .repo
            .find_by_id(&oid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("stay {id} not found")))?;
        Ok(StayDetails::from(stay))
    }

    pub async fn create(&self, draft: StayDraft, host: &Identity) -> AppResult<Stay> {
        let price = draft
            .price
            .ok_or_else(|| AppError::Validation("price is required".to_string()))?;

        let capacity = positive(draft.capacity)
            .or(positive(draft.guests))
            .unwrap_or(1);
        let today = Utc::now().date_naive();
        let host_img = draft
            .host
            .and_then(|h| h.img_url)
            .or_else(|| host.img_url.clone());

        let mut stay = Stay {
            id: None,
            name: draft.name.unwrap_or_else(|| "Untitled Stay".to_string()),
            r#type: draft.r#type.unwrap_or_else(|| "House".to_string()),
            summary: draft.summary,
            price,
            capacity,
            guests: capacity,
            bedrooms: positive(draft.bedrooms).unwrap_or(1),
            beds: positive(draft.beds).unwrap_or(1),
            bathrooms: positive(draft.bathrooms).unwrap_or(1),
            room_type: draft.room_type.unwrap_or_default(),
            img_urls: draft.img_urls,
            loc: draft.loc,
            amenities: draft.amenities,
            available_from: draft.available_from.unwrap_or(today),
            available_until: draft
                .available_until
                .unwrap_or(today + Duration::days(DEFAULT_AVAILABILITY_DAYS)),
            host: Host {
                id: host.id.clone(),
                fullname: host.fullname.clone(),
                img_url: host_img,
                rating: None,
                num_reviews: None,
            },
            reviews: Vec::new(),
            liked_by_users: Vec::new(),
            msgs: Vec::new(),
            free_cancellation: false,
        };

        let id = self.repo.insert(&stay).await?;
        stay.id = Some(id);
        Ok(stay)
    }

    pub async fn update(&self, id: &str, patch: StayPatch, actor: &Identity) -> AppResult<Stay> {
        if patch.price.is_none() {
            return Err(AppError::Validation("price is required".to_string()));
        }

        let oid = parse_object_id(id)?;
        let existing = self
            .repo
            .find_by_id(&oid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("stay {id} not found")))?;

        authorize_owner(actor, &existing.host.id)?;

        let fields = patch_set_document(patch, &existing.host)?;
        if !self.repo.set_fields(&oid, fields).await? {
            return Err(AppError::NotFound(format!("stay {id} not found")));
        }

        self.repo
            .find_by_id(&oid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("stay {id} not found")))
    }

    pub async fn remove(&self, id: &str, actor: &Identity) -> AppResult<String> {
        let oid = parse_object_id(id)?;
        if !self.repo.delete(&oid, &actor.owner_scope()).await? {
            return Err(AppError::NotFound(format!(
                "stay {id} not found or not yours"
            )));
        }
        Ok(id.to_string())
    }

    pub async fn add_review(&self, id: &str, txt: String, actor: &Identity) -> AppResult<Review> {
        let oid = parse_object_id(id)?;
        let review = Review {
            id: make_id(),
            by: UserRef::from(actor),
            txt,
            created_at: now_millis(),
        };

        if !self.repo.push_review(&oid, &review).await? {
            return Err(AppError::NotFound(format!("stay {id} not found")));
        }
        Ok(review)
    }

    pub async fn remove_review(
        &self,
        id: &str,
        review_id: &str,
        actor: &Identity,
    ) -> AppResult<String> {
        let oid = parse_object_id(id)?;
        if !self
            .repo
            .pull_review(&oid, review_id, &actor.owner_scope())
            .await?
        {
            return Err(AppError::NotFound(format!(
                "review {review_id} not found or not yours"
            )));
        }
        Ok(review_id.to_string())
    }

    pub async fn add_msg(&self, id: &str, txt: String, sender: &Identity) -> AppResult<StayMsg> {
        let oid = parse_object_id(id)?;
        let msg = StayMsg {
            id: make_id(),
            from: MsgSender::from_identity(sender),
            txt,
            timestamp: Utc::now(),
            is_read: false,
        };

        if !self.repo.push_msg(&oid, &msg).await? {
            return Err(AppError::NotFound(format!("stay {id} not found")));
        }
        Ok(msg)
    }

    pub async fn remove_msg(&self, id: &str, msg_id: &str, sender: &Identity) -> AppResult<String> {
        let oid = parse_object_id(id)?;
        if !self
            .repo
            .pull_msg(&oid, msg_id, &sender.owner_scope())
            .await?
        {
            return Err(AppError::NotFound(format!(
                "message {msg_id} not found or not yours"
            )));
        }
        Ok(msg_id.to_string())
    }

    pub async fn msgs(&self, id: &str) -> AppResult<Vec<StayMsg>> {
        let oid = parse_object_id(id)?;
        let stay = self
            .repo
            .find_by_id(&oid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("stay {id} not found")))?;
        Ok(stay.msgs)
    }
}

fn positive(value: Option<i64>) -> Option<i64> {
    value.filter(|n| *n > 0)
}

/// Compile a patch into a `$set` document. Only the allow-listed fields make
/// it through, and the host snapshot always comes from the stored record.
fn patch_set_document(patch: StayPatch, host: &Host) -> Result<Document, RepositoryError> {
    let mut fields = Document::new();

    if let Some(name) = patch.name {
        fields.insert("name", name);
    }
    if let Some(summary) = patch.summary {
        fields.insert("summary", summary);
    }
    if let Some(price) = patch.price {
        fields.insert("price", price);
    }
    if let Some(capacity) = patch.capacity {
        fields.insert("capacity", capacity);
    }
    if let Some(guests) = patch.guests {
        fields.insert("guests", guests);
    }
    if let Some(bedrooms) = patch.bedrooms {
        fields.insert("bedrooms", bedrooms);
    }
    if let Some(beds) = patch.beds {
        fields.insert("beds", beds);
    }
    if let Some(bathrooms) = patch.bathrooms {
        fields.insert("bathrooms", bathrooms);
    }
    if let Some(room_type) = patch.room_type {
        fields.insert("roomType", room_type);
    }
    if let Some(img_urls) = patch.img_urls {
        fields.insert("imgUrls", img_urls);
    }
    if let Some(loc) = patch.loc {
        fields.insert("loc", to_bson(&loc)?);
    }
    if let Some(amenities) = patch.amenities {
        fields.insert("amenities", amenities);
    }
    if let Some(kind) = patch.r#type {
        fields.insert("type", kind);
    }
    if let Some(available_from) = patch.available_from {
        fields.insert("availableFrom", to_bson(&available_from)?);
    }
    if let Some(available_until) = patch.available_until {
        fields.insert("availableUntil", to_bson(&available_until)?);
    }
    if let Some(reviews) = patch.reviews {
        fields.insert("reviews", to_bson(&reviews)?);
    }
    if let Some(liked_by_users) = patch.liked_by_users {
        fields.insert("likedByUsers", liked_by_users);
    }
    if let Some(msgs) = patch.msgs {
        fields.insert("msgs", to_bson(&msgs)?);
    }

    fields.insert("host", to_bson(host)?);
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::OwnerScope;
    use crate::stay::domain::{Loc, StaySummary, SummaryHost};
    use async_trait::async_trait;
    use mongodb::bson::oid::ObjectId;
    use mongodb::bson::{from_document, to_document};
    use std::sync::{Arc, Mutex};

    /// In-memory stand-in for the Mongo repository.
    #[derive(Default)]
    struct MemStayRepository {
        stays: Mutex<Vec<Stay>>,
    }

    impl MemStayRepository {
        fn get(&self, id: &ObjectId) -> Option<Stay> {
            self.stays
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.id == Some(*id))
                .cloned()
        }

        fn allowed(scope: &OwnerScope, owner_id: &str) -> bool {
            match scope {
                OwnerScope::Any => true,
                OwnerScope::Owner(user_id) => user_id == owner_id,
            }
        }
    }

    #[async_trait]
    impl crate::stay::repository::StayRepository for MemStayRepository {
        async fn find(&self, _filter: &StayFilter) -> Result<Vec<Stay>, RepositoryError> {
            Ok(self.stays.lock().unwrap().clone())
        }

        async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Stay>, RepositoryError> {
            Ok(self.get(id))
        }

        async fn insert(&self, stay: &Stay) -> Result<ObjectId, RepositoryError> {
            let id = ObjectId::new();
            let mut stored = stay.clone();
            stored.id = Some(id);
            self.stays.lock().unwrap().push(stored);
            Ok(id)
        }

        async fn set_fields(
            &self,
            id: &ObjectId,
            fields: Document,
        ) -> Result<bool, RepositoryError> {
            let mut stays = self.stays.lock().unwrap();
            let Some(stay) = stays.iter_mut().find(|s| s.id == Some(*id)) else {
                return Ok(false);
            };

            let mut doc = to_document(stay)?;
            doc.remove("_id");
            for (key, value) in fields {
                doc.insert(key, value);
            }
            let mut updated: Stay = from_document(doc)?;
            updated.id = Some(*id);
            *stay = updated;
            Ok(true)
        }

        async fn delete(&self, id: &ObjectId, scope: &OwnerScope) -> Result<bool, RepositoryError> {
            let mut stays = self.stays.lock().unwrap();
            let before = stays.len();
            stays.retain(|s| !(s.id == Some(*id) && Self::allowed(scope, &s.host.id)));
            Ok(stays.len() < before)
        }

        async fn push_review(
            &self,
            id: &ObjectId,
            review: &Review,
        ) -> Result<bool, RepositoryError> {
            let mut stays = self.stays.lock().unwrap();
            let Some(stay) = stays.iter_mut().find(|s| s.id == Some(*id)) else {
                return Ok(false);
            };
            stay.reviews.push(review.clone());
            Ok(true)
        }

        async fn pull_review(
            &self,
            id: &ObjectId,
            review_id: &str,
            scope: &OwnerScope,
        ) -> Result<bool, RepositoryError> {
            let mut stays = self.stays.lock().unwrap();
            let Some(stay) = stays.iter_mut().find(|s| s.id == Some(*id)) else {
                return Ok(false);
            };
            // Mirrors the store: the owner clause matches the document, the
            // pull then removes by embedded id.
            if let OwnerScope::Owner(user_id) = scope {
                if !stay.reviews.iter().any(|r| &r.by.id == user_id) {
                    return Ok(false);
                }
            }
            let before = stay.reviews.len();
            stay.reviews.retain(|r| r.id != review_id);
            Ok(stay.reviews.len() < before)
        }

        async fn push_msg(&self, id: &ObjectId, msg: &StayMsg) -> Result<bool, RepositoryError> {
            let mut stays = self.stays.lock().unwrap();
            let Some(stay) = stays.iter_mut().find(|s| s.id == Some(*id)) else {
                return Ok(false);
            };
            stay.msgs.push(msg.clone());
            Ok(true)
        }

        async fn pull_msg(
            &self,
            id: &ObjectId,
            msg_id: &str,
            scope: &OwnerScope,
        ) -> Result<bool, RepositoryError> {
            let mut stays = self.stays.lock().unwrap();
            let Some(stay) = stays.iter_mut().find(|s| s.id == Some(*id)) else {
                return Ok(false);
            };
            if let OwnerScope::Owner(user_id) = scope {
                if !stay.msgs.iter().any(|m| &m.from.id == user_id) {
                    return Ok(false);
                }
            }
            let before = stay.msgs.len();
            stay.msgs.retain(|m| m.id != msg_id);
            Ok(stay.msgs.len() < before)
        }

        async fn find_summaries(
            &self,
            ids: &[ObjectId],
        ) -> Result<Vec<StaySummary>, RepositoryError> {
            let stays = self.stays.lock().unwrap();
            Ok(stays
                .iter()
                .filter(|s| s.id.map(|id| ids.contains(&id)).unwrap_or(false))
                .map(|s| StaySummary {
                    id: s.id.unwrap(),
                    name: s.name.clone(),
                    loc: s.loc.clone(),
                    price: s.price,
                    img_urls: s.img_urls.clone(),
                    summary: s.summary.clone(),
                    beds: s.beds,
                    host: SummaryHost {
                        rating: s.host.rating,
                    },
                })
                .collect())
        }
    }

    fn service() -> (StayService, Arc<MemStayRepository>) {
        let repo = Arc::new(MemStayRepository::default());
        (StayService::new(repo.clone()), repo)
    }

    fn user(id: &str) -> Identity {
        Identity {
            id: id.to_string(),
            fullname: format!("User {id}"),
            img_url: None,
            is_admin: false,
        }
    }

    fn admin() -> Identity {
        Identity {
            id: "admin".to_string(),
            fullname: "Admin".to_string(),
            img_url: None,
            is_admin: true,
        }
    }

    fn draft_with_price(price: f64) -> StayDraft {
        StayDraft {
            price: Some(price),
            ..Default::default()
        }
    }

    fn patch_with_price(price: f64) -> StayPatch {
        StayPatch {
            price: Some(price),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_without_price_is_a_validation_error() {
        let (service, _) = service();
        let err = service
            .create(StayDraft::default(), &user("host1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn create_with_zero_price_succeeds() {
        let (service, _) = service();
        let stay = service
            .create(draft_with_price(0.0), &user("host1"))
            .await
            .unwrap();
        assert_eq!(stay.price, 0.0);
    }

    #[tokio::test]
    async fn create_fills_defaults_and_stamps_the_host() {
        let (service, _) = service();
        let stay = service
            .create(draft_with_price(80.0), &user("host1"))
            .await
            .unwrap();

        assert!(stay.id.is_some());
        assert_eq!(stay.name, "Untitled Stay");
        assert_eq!(stay.r#type, "House");
        assert_eq!(stay.capacity, 1);
        assert_eq!(stay.guests, 1);
        assert_eq!(stay.bedrooms, 1);
        assert_eq!(stay.beds, 1);
        assert_eq!(stay.bathrooms, 1);
        assert_eq!(stay.host.id, "host1");
        assert!(stay.reviews.is_empty());
        assert!(stay.msgs.is_empty());
        assert!(stay.liked_by_users.is_empty());
        assert!(!stay.free_cancellation);
        assert_eq!(
            (stay.available_until - stay.available_from).num_days(),
            60
        );
    }

    #[tokio::test]
    async fn create_unifies_capacity_from_guests() {
        let (service, _) = service();
        let draft = StayDraft {
            price: Some(50.0),
            guests: Some(4),
            ..Default::default()
        };
        let stay = service.create(draft, &user("host1")).await.unwrap();
        assert_eq!(stay.capacity, 4);
        assert_eq!(stay.guests, 4);
    }

    #[tokio::test]
    async fn update_without_price_is_a_validation_error() {
        let (service, _) = service();
        let stay = service
            .create(draft_with_price(50.0), &user("host1"))
            .await
            .unwrap();
        let id = stay.id.unwrap().to_hex();

        let err = service
            .update(&id, StayPatch::default(), &user("host1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn update_by_stranger_is_forbidden_and_changes_nothing() {
        let (service, repo) = service();
        let stay = service
            .create(draft_with_price(50.0), &user("host1"))
            .await
            .unwrap();
        let oid = stay.id.unwrap();

        let patch = StayPatch {
            name: Some("Hijacked".to_string()),
            price: Some(999.0),
            ..Default::default()
        };
        let err = service
            .update(&oid.to_hex(), patch, &user("intruder"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let stored = repo.get(&oid).unwrap();
        assert_eq!(stored.name, "Untitled Stay");
        assert_eq!(stored.price, 50.0);
    }

    #[tokio::test]
    async fn update_never_reassigns_the_host() {
        let (service, repo) = service();
        let stay = service
            .create(draft_with_price(50.0), &user("host1"))
            .await
            .unwrap();
        let oid = stay.id.unwrap();

        let patch = StayPatch {
            name: Some("Renamed".to_string()),
            price: Some(60.0),
            host: Some(Host {
                id: "intruder".to_string(),
                fullname: "Intruder".to_string(),
                img_url: None,
                rating: None,
                num_reviews: None,
            }),
            ..Default::default()
        };

        let updated = service
            .update(&oid.to_hex(), patch, &user("host1"))
            .await
            .unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.price, 60.0);
        assert_eq!(updated.host.id, "host1");
        assert_eq!(repo.get(&oid).unwrap().host.id, "host1");
    }

    #[tokio::test]
    async fn admin_can_update_any_stay() {
        let (service, _) = service();
        let stay = service
            .create(draft_with_price(50.0), &user("host1"))
            .await
            .unwrap();

        let updated = service
            .update(&stay.id.unwrap().to_hex(), patch_with_price(75.0), &admin())
            .await
            .unwrap();
        assert_eq!(updated.price, 75.0);
    }

    #[tokio::test]
    async fn remove_by_non_owner_has_no_effect() {
        let (service, repo) = service();
        let stay = service
            .create(draft_with_price(50.0), &user("host1"))
            .await
            .unwrap();
        let oid = stay.id.unwrap();

        let err = service
            .remove(&oid.to_hex(), &user("intruder"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(repo.get(&oid).is_some());
    }

    #[tokio::test]
    async fn remove_by_owner_or_admin_deletes() {
        let (service, repo) = service();
        let first = service
            .create(draft_with_price(50.0), &user("host1"))
            .await
            .unwrap();
        let second = service
            .create(draft_with_price(60.0), &user("host1"))
            .await
            .unwrap();

        service
            .remove(&first.id.unwrap().to_hex(), &user("host1"))
            .await
            .unwrap();
        service
            .remove(&second.id.unwrap().to_hex(), &admin())
            .await
            .unwrap();
        assert!(repo.stays.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_by_id_reports_missing_stays() {
        let (service, _) = service();
        let err = service
            .get_by_id(&ObjectId::new().to_hex())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn get_by_id_derives_created_at_from_the_id() {
        let (service, _) = service();
        let stay = service
            .create(draft_with_price(50.0), &user("host1"))
            .await
            .unwrap();

        let details = service.get_by_id(&stay.id.unwrap().to_hex()).await.unwrap();
        assert!(details.created_at.is_some());
    }

    #[tokio::test]
    async fn invalid_id_is_a_validation_error() {
        let (service, _) = service();
        let err = service.get_by_id("not-hex").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn review_lifecycle_author_can_remove_once() {
        let (service, repo) = service();
        let stay = service
            .create(draft_with_price(50.0), &user("host1"))
            .await
            .unwrap();
        let id = stay.id.unwrap().to_hex();

        let review = service
            .add_review(&id, "lovely".to_string(), &user("guest1"))
            .await
            .unwrap();
        assert_eq!(review.by.id, "guest1");
        assert!(!review.id.is_empty());

        service
            .remove_review(&id, &review.id, &user("guest1"))
            .await
            .unwrap();
        assert!(repo.get(&stay.id.unwrap()).unwrap().reviews.is_empty());

        // Already gone: zero-effect pull surfaces as an error.
        let err = service
            .remove_review(&id, &review.id, &user("guest1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn review_removal_by_stranger_has_no_effect() {
        let (service, repo) = service();
        let stay = service
            .create(draft_with_price(50.0), &user("host1"))
            .await
            .unwrap();
        let id = stay.id.unwrap().to_hex();

        let review = service
            .add_review(&id, "lovely".to_string(), &user("guest1"))
            .await
            .unwrap();

        let err = service
            .remove_review(&id, &review.id, &user("stranger"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(repo.get(&stay.id.unwrap()).unwrap().reviews.len(), 1);
    }

    #[tokio::test]
    async fn admin_can_remove_any_review() {
        let (service, _) = service();
        let stay = service
            .create(draft_with_price(50.0), &user("host1"))
            .await
            .unwrap();
        let id = stay.id.unwrap().to_hex();

        let review = service
            .add_review(&id, "meh".to_string(), &user("guest1"))
            .await
            .unwrap();
        service.remove_review(&id, &review.id, &admin()).await.unwrap();
    }

    #[tokio::test]
    async fn messages_append_unread_and_list_back() {
        let (service, _) = service();
        let stay = service
            .create(draft_with_price(50.0), &user("host1"))
            .await
            .unwrap();
        let id = stay.id.unwrap().to_hex();

        let msg = service
            .add_msg(&id, "is it free in June?".to_string(), &user("guest1"))
            .await
            .unwrap();
        assert!(!msg.is_read);
        assert_eq!(msg.from.id, "guest1");

        let msgs = service.msgs(&id).await.unwrap();
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].id, msg.id);

        service.remove_msg(&id, &msg.id, &user("guest1")).await.unwrap();
        assert!(service.msgs(&id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn msgs_of_unknown_stay_is_not_found() {
        let (service, _) = service();
        let err = service.msgs(&ObjectId::new().to_hex()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_computes_the_unread_badge_per_viewer() {
        let (service, _) = service();
        let stay = service
            .create(draft_with_price(50.0), &user("host1"))
            .await
            .unwrap();
        let id = stay.id.unwrap().to_hex();

        service
            .add_msg(&id, "hello".to_string(), &user("guest1"))
            .await
            .unwrap();
        service
            .add_msg(&id, "anyone?".to_string(), &user("guest2"))
            .await
            .unwrap();

        let filter = StayFilter::default();

        let host_view = service.list(&filter, Some(&user("host1"))).await.unwrap();
        assert_eq!(host_view[0].unread_msg_count, 2);

        let guest_view = service.list(&filter, Some(&user("guest1"))).await.unwrap();
        assert_eq!(guest_view[0].unread_msg_count, 1);

        let anonymous = service.list(&filter, None).await.unwrap();
        assert_eq!(anonymous[0].unread_msg_count, 0);
    }

    #[test]
    fn patch_drops_nothing_from_the_allow_list_and_forces_the_host() {
        let host = Host {
            id: "host1".to_string(),
            fullname: "Hosty".to_string(),
            img_url: None,
            rating: None,
            num_reviews: None,
        };
        let patch = StayPatch {
            name: Some("New".to_string()),
            price: Some(10.0),
            loc: Some(Loc {
                city: "Porto".to_string(),
                country: "Portugal".to_string(),
                address: "".to_string(),
            }),
            host: Some(Host {
                id: "evil".to_string(),
                fullname: "Evil".to_string(),
                img_url: None,
                rating: None,
                num_reviews: None,
            }),
            ..Default::default()
        };

        let fields = patch_set_document(patch, &host).unwrap();
        assert_eq!(fields.get_str("name").unwrap(), "New");
        assert_eq!(fields.get_f64("price").unwrap(), 10.0);
        assert_eq!(
            fields.get_document("host").unwrap().get_str("_id").unwrap(),
            "host1"
        );
        assert_eq!(
            fields.get_document("loc").unwrap().get_str("city").unwrap(),
            "Porto"
        );
    }
}
