use serde::Serialize;
use serde_json::Value;

use crate::models::Role;

/// Filters for `GET /teachers/`.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct TeacherQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
    pub department: Option<String>,
    pub subject: Option<String>,
    pub min_rating: Option<f64>,
    pub has_reviews: Option<bool>,
    pub ordering: Option<String>,
}

/// Filters for `GET /reviews/` and `GET /reviews/manage/`.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ReviewQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub teacher: Option<u64>,
    pub course: Option<String>,
    pub min_rating: Option<u8>,
    pub max_rating: Option<u8>,
    pub would_take_again: Option<bool>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

/// Filters for `GET /auth/users/`.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct UserQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub user_type: Option<Role>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

/// Flattens a filter struct into query pairs, dropping absent and empty
/// values the way the backend expects.
pub fn query_params<Q: Serialize>(query: &Q) -> Vec<(String, String)> {
    let Ok(Value::Object(fields)) = serde_json::to_value(query) else {
        return Vec::new();
    };

    fields
        .into_iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::Null => return None,
                Value::String(text) => text.trim().to_string(),
                Value::Bool(flag) => flag.to_string(),
                Value::Number(number) => number.to_string(),
                Value::Array(_) | Value::Object(_) => return None,
            };
            (!text.is_empty()).then_some((key, text))
        })
        .collect()
}

/// Blank filter text means "no filter".
pub fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
