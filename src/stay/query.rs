//! Criteria and sort builders: pure translation of a stay filter into the
//! query documents the store understands.

use mongodb::bson::{doc, Document, Regex};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StayFilter {
    pub txt: String,
    pub min_price: Option<f64>,
    pub r#type: String,
    pub city: String,
    pub guests: Option<i64>,
    pub sort_field: String,
    pub sort_dir: Option<i32>,
    pub page_idx: Option<u64>,
}

fn ci_regex(pattern: &str) -> Regex {
    Regex {
        pattern: pattern.to_string(),
        options: "i".to_string(),
    }
}

/// Build the filter predicate. An empty filter yields the empty document,
/// which matches everything.
pub fn build_criteria(filter: &StayFilter) -> Document {
    let mut criteria = Document::new();

    // Free-text search matches any of the name/summary/location fields.
    let mut or_conditions: Vec<Document> = Vec::new();
    if !filter.txt.is_empty() {
        for field in ["name", "summary", "loc.city", "loc.country", "loc.address"] {
            or_conditions.push(doc! { field: ci_regex(&filter.txt) });
        }
    }

    if let Some(min_price) = filter.min_price.filter(|p| *p > 0.0) {
        criteria.insert("price", doc! { "$gte": min_price });
    }

    if !filter.r#type.is_empty() {
        criteria.insert("type", filter.r#type.clone());
    }

    if !filter.city.is_empty() {
        criteria.insert("loc.city", ci_regex(&filter.city));
    }

    if let Some(guests) = filter.guests.filter(|g| *g > 0) {
        let guest_or = vec![
            doc! { "capacity": { "$gte": guests } },
            doc! { "guests": { "$gte": guests } },
        ];

        // Both OR-groups must hold, so they nest under $and instead of
        // flattening into one $or.
        if or_conditions.is_empty() {
            criteria.insert("$or", guest_or);
        } else {
            criteria.insert(
                "$and",
                vec![doc! { "$or": or_conditions }, doc! { "$or": guest_or }],
            );
        }
    } else if !or_conditions.is_empty() {
        criteria.insert("$or", or_conditions);
    }

    criteria
}

/// Single-key sort, or the empty document for natural order. Field names
/// are passed through unvalidated; the store ignores unknown keys.
pub fn build_sort(filter: &StayFilter) -> Document {
    if filter.sort_field.is_empty() {
        return Document::new();
    }

    let mut sort = Document::new();
    sort.insert(filter.sort_field.clone(), filter.sort_dir.unwrap_or(1));
    sort
}
