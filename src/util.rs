use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use serde::Serializer;

use crate::error::AppError;

const ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const ID_LENGTH: usize = 8;

/// Short random id for embedded documents (reviews, messages).
pub fn make_id() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..ID_CHARSET.len());
            ID_CHARSET[idx] as char
        })
        .collect()
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Parse a client-supplied hex id, mapping bad input to a 400 rather than
/// letting it surface as a server error.
pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::Validation(format!("invalid id: {id}")))
}

/// Serialize an ObjectId as its hex form. JSON responses carry portable
/// string ids; the BSON layer never serializes these fields (ids are
/// omitted on insert and generated by the store).
pub fn serialize_oid_as_hex<S>(oid: &ObjectId, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&oid.to_hex())
}

pub fn serialize_opt_oid_as_hex<S>(oid: &Option<ObjectId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match oid {
        Some(oid) => serializer.serialize_str(&oid.to_hex()),
        None => serializer.serialize_none(),
    }
}
