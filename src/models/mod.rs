pub mod course;
pub mod review;
pub mod teacher;
pub mod user;

use serde::{Deserialize, Deserializer, Serialize};

pub use review::{NewReview, Rating, Review, ReviewDraft, TeacherRef};
pub use teacher::{Teacher, TeacherForm, TeacherStats, TeacherSummary};
pub use user::{LoginCredentials, Role, TokenResponse, User, UserForm, UserStats};

/// One page of a paginated list endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Page<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Number of pages needed for `count` records at `per_page` each, never
    /// less than one so pagers always have something to show.
    pub fn total_pages(&self, per_page: u32) -> u64 {
        if per_page == 0 {
            return 1;
        }
        self.count.div_ceil(u64::from(per_page)).max(1)
    }
}

/// The backend serializes decimal aggregates either as JSON numbers or as
/// strings such as `"4.50"`; both decode to `f64`, `null` decodes to zero.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Float(f64),
        Text(String),
        Missing(()),
    }

    match Number::deserialize(deserializer)? {
        Number::Float(value) => Ok(value),
        Number::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(serde::de::Error::custom),
        Number::Missing(()) => Ok(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "lenient_f64")]
        value: f64,
    }

    #[test]
    fn test_lenient_f64_accepts_numbers_strings_and_null() {
        for (input, expected) in [(json!(4.5), 4.5), (json!("3.25"), 3.25), (json!(null), 0.0)] {
            let holder: Holder = serde_json::from_value(json!({ "value": input })).unwrap();
            assert_eq!(holder.value, expected);
        }
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page: Page<u8> = Page {
            count: 41,
            next: None,
            previous: None,
            results: vec![],
        };
        assert_eq!(page.total_pages(20), 3);

        let empty: Page<u8> = serde_json::from_value(json!({"count": 0, "results": []})).unwrap();
        assert_eq!(empty.total_pages(20), 1);
    }
}
