// Wishlist domain types. Stays are referenced by id only; the resolved view
// carries summary projections instead.
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::stay::domain::{StaySummary, UserRef};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wishlist {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::util::serialize_opt_oid_as_hex"
    )]
    pub id: Option<ObjectId>,
    pub title: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    pub by_user: UserRef,
    #[serde(default)]
    pub stays: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Wishlist {
    pub fn contains_stay(&self, stay_id: &str) -> bool {
        self.stays.iter().any(|id| id == stay_id)
    }
}

/// Wishlist with its stay references resolved to summaries.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistView {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub city: String,
    pub country: String,
    pub by_user: UserRef,
    pub stays: Vec<StaySummary>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl WishlistView {
    pub fn new(wishlist: Wishlist, stays: Vec<StaySummary>) -> Self {
        Self {
            id: wishlist.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            title: wishlist.title,
            city: wishlist.city,
            country: wishlist.country,
            by_user: wishlist.by_user,
            stays,
            created_at: wishlist.created_at,
            updated_at: wishlist.updated_at,
        }
    }
}

/// Incoming body for wishlist creation. The owner comes from the acting
/// identity, never from the payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WishlistDraft {
    pub title: String,
    pub city: String,
    pub country: String,
    pub stays: Vec<String>,
}

/// Incoming body for wishlist update. Only these fields are written back.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WishlistUpdate {
    pub title: String,
    pub city: String,
    pub country: String,
    pub stays: Vec<String>,
    pub by_user: Option<UserRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_stay_matches_exact_ids() {
        let wishlist = Wishlist {
            id: None,
            title: "Summer".to_string(),
            city: "".to_string(),
            country: "".to_string(),
            by_user: UserRef {
                id: "u1".to_string(),
                fullname: "User".to_string(),
                img_url: None,
            },
            stays: vec!["abc".to_string()],
            created_at: 0,
            updated_at: 0,
        };

        assert!(wishlist.contains_stay("abc"));
        assert!(!wishlist.contains_stay("abcd"));
    }

    #[test]
    fn view_serializes_id_as_portable_string() {
        let oid = ObjectId::new();
        let wishlist = Wishlist {
            id: Some(oid),
            title: "Summer".to_string(),
            city: "".to_string(),
            country: "".to_string(),
            by_user: UserRef {
                id: "u1".to_string(),
                fullname: "User".to_string(),
                img_url: None,
            },
            stays: vec![],
            created_at: 1,
            updated_at: 2,
        };

        let view = WishlistView::new(wishlist, vec![]);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["_id"], serde_json::Value::String(oid.to_hex()));
        assert_eq!(json["byUser"]["_id"], "u1");
    }
}
