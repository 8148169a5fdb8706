// Domain types for stays and their embedded reviews/messages, plus the
// pure view helpers the list projection is built from.
use chrono::{DateTime, Duration, NaiveDate, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::auth::Identity;

/// Fallback avatar for message senders without a profile image.
pub const DEFAULT_AVATAR_URL: &str =
    "https://cdn.pixabay.com/photo/2020/07/01/12/58/icon-5359553_1280.png";

/// Nights covered by a suggested stay range.
const SUGGESTED_NIGHTS: i64 = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Loc {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub address: String,
}

/// Host snapshot embedded in a stay. Preserved verbatim on update; never
/// taken from client input after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    #[serde(rename = "_id")]
    pub id: String,
    pub fullname: String,
    #[serde(default)]
    pub img_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_reviews: Option<i64>,
}

/// Embedded author snapshot on reviews and wishlist owners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub fullname: String,
    #[serde(default)]
    pub img_url: Option<String>,
}

impl From<&Identity> for UserRef {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.clone(),
            fullname: identity.fullname.clone(),
            img_url: identity.img_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub by: UserRef,
    pub txt: String,
    pub created_at: i64,
}

/// Message sender snapshot. The avatar always resolves to something
/// displayable, falling back to a stock image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MsgSender {
    #[serde(rename = "_id")]
    pub id: String,
    pub fullname: String,
    pub img_url: String,
}

impl MsgSender {
    pub fn from_identity(identity: &Identity) -> Self {
        Self {
            id: identity.id.clone(),
            fullname: identity.fullname.clone(),
            img_url: identity
                .img_url
                .clone()
                .unwrap_or_else(|| DEFAULT_AVATAR_URL.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StayMsg {
    pub id: String,
    pub from: MsgSender,
    pub txt: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stay {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::util::serialize_opt_oid_as_hex"
    )]
    pub id: Option<ObjectId>,
    pub name: String,
    pub r#type: String,
    pub summary: String,
    pub price: f64,
    pub capacity: i64,
    pub guests: i64,
    pub bedrooms: i64,
    pub beds: i64,
    pub bathrooms: i64,
    pub room_type: String,
    pub img_urls: Vec<String>,
    pub loc: Loc,
    pub amenities: Vec<String>,
    pub available_from: NaiveDate,
    pub available_until: NaiveDate,
    pub host: Host,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub liked_by_users: Vec<String>,
    #[serde(default)]
    pub msgs: Vec<StayMsg>,
    #[serde(default)]
    pub free_cancellation: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StayRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Stay {
    /// Capacity and guests are historical synonyms; whichever is set wins.
    pub fn effective_capacity(&self) -> i64 {
        if self.capacity > 0 {
            self.capacity
        } else if self.guests > 0 {
            self.guests
        } else {
            0
        }
    }

    /// Creation time embedded in the ObjectId.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.id.map(|oid| oid.timestamp().to_chrono())
    }

    /// A 5-night window positioned a third of the way into the availability
    /// window; windows no longer than 5 nights are returned unchanged.
    pub fn suggested_range(&self) -> StayRange {
        suggested_range(self.available_from, self.available_until, SUGGESTED_NIGHTS)
    }

    /// Unread messages not authored by the viewer. No viewer, no badge.
    pub fn unread_msg_count(&self, viewer: Option<&Identity>) -> usize {
        let Some(viewer) = viewer else { return 0 };
        self.msgs
            .iter()
            .filter(|msg| !msg.is_read && msg.from.id != viewer.id)
            .count()
    }
}

fn suggested_range(from: NaiveDate, until: NaiveDate, nights: i64) -> StayRange {
    let total_days = (until - from).num_days();
    if total_days <= nights {
        return StayRange {
            start: from,
            end: until,
        };
    }

    let start = from + Duration::days(total_days / 3);
    StayRange {
        start,
        end: start + Duration::days(nights),
    }
}

/// Detail view: the stored stay plus the creation time derived from its id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StayDetails {
    #[serde(flatten)]
    pub stay: Stay,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Stay> for StayDetails {
    fn from(stay: Stay) -> Self {
        let created_at = stay.created_at();
        Self { stay, created_at }
    }
}

/// Public row shape for stay listings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StayListItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub r#type: String,
    pub img_urls: Vec<String>,
    pub price: f64,
    pub summary: String,
    pub capacity: i64,
    pub guests: i64,
    pub bathrooms: i64,
    pub bedrooms: i64,
    pub beds: i64,
    pub room_type: String,
    pub available_from: NaiveDate,
    pub available_until: NaiveDate,
    pub host: Host,
    pub loc: Loc,
    pub reviews: Vec<Review>,
    pub num_reviews: i64,
    pub liked_by_users: Vec<String>,
    pub free_cancellation: bool,
    pub rating: Option<f64>,
    pub suggested_range: StayRange,
    pub unread_msg_count: usize,
}

impl StayListItem {
    pub fn from_stay(stay: Stay, viewer: Option<&Identity>) -> Self {
        let capacity = stay.effective_capacity();
        let suggested_range = stay.suggested_range();
        let unread_msg_count = stay.unread_msg_count(viewer);

        Self {
            id: stay.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            name: stay.name,
            r#type: stay.r#type,
            img_urls: stay.img_urls,
            price: stay.price,
            summary: stay.summary,
            capacity,
            guests: capacity,
            bathrooms: stay.bathrooms,
            bedrooms: stay.bedrooms,
            beds: stay.beds,
            room_type: stay.room_type,
            available_from: stay.available_from,
            available_until: stay.available_until,
            num_reviews: stay.host.num_reviews.unwrap_or(0),
            rating: stay.host.rating,
            host: stay.host,
            loc: stay.loc,
            reviews: stay.reviews,
            liked_by_users: stay.liked_by_users,
            free_cancellation: stay.free_cancellation,
            suggested_range,
            unread_msg_count,
        }
    }
}

/// Summary projection resolved into wishlists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaySummary {
    #[serde(rename = "_id", serialize_with = "crate::util::serialize_oid_as_hex")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub loc: Loc,
    pub price: f64,
    #[serde(default)]
    pub img_urls: Vec<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub beds: i64,
    #[serde(default)]
    pub host: SummaryHost,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryHost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

/// Incoming body for stay creation. Anything omitted gets a default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StayDraft {
    pub name: Option<String>,
    pub r#type: Option<String>,
    pub summary: String,
    pub price: Option<f64>,
    pub capacity: Option<i64>,
    pub guests: Option<i64>,
    pub bedrooms: Option<i64>,
    pub beds: Option<i64>,
    pub bathrooms: Option<i64>,
    pub room_type: Option<String>,
    pub img_urls: Vec<String>,
    pub loc: Loc,
    pub amenities: Vec<String>,
    pub available_from: Option<NaiveDate>,
    pub available_until: Option<NaiveDate>,
    pub host: Option<HostOverride>,
}

/// The only host field a draft may influence is the display image.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostOverride {
    pub img_url: Option<String>,
}

/// Incoming body for stay update. Exactly the allow-listed fields; anything
/// else in the payload is dropped on deserialization. The host field is
/// accepted but always replaced with the stored snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StayPatch {
    pub name: Option<String>,
    pub summary: Option<String>,
    pub price: Option<f64>,
    pub capacity: Option<i64>,
    pub guests: Option<i64>,
    pub bedrooms: Option<i64>,
    pub beds: Option<i64>,
    pub bathrooms: Option<i64>,
    pub room_type: Option<String>,
    pub img_urls: Option<Vec<String>>,
    pub loc: Option<Loc>,
    pub amenities: Option<Vec<String>>,
    pub r#type: Option<String>,
    pub available_from: Option<NaiveDate>,
    pub available_until: Option<NaiveDate>,
    pub host: Option<Host>,
    pub reviews: Option<Vec<Review>>,
    pub liked_by_users: Option<Vec<String>>,
    pub msgs: Option<Vec<StayMsg>>,
}
