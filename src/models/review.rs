use std::fmt;

use serde::{Deserialize, Serialize};

use super::course::course_name;
use super::teacher::TeacherSummary;
use crate::error::ValidationError;

pub const ANONYMOUS_REVIEWER: &str = "匿名用户";
pub const MAX_TAG_CHARS: usize = 10;
pub const MIN_CONTENT_CHARS: usize = 10;
const TITLE_CHARS: usize = 50;

/// Tags offered as one-click chips on the review form.
pub const COMMON_TAGS: [&str; 10] = [
    "认真负责",
    "讲解清楚",
    "作业适中",
    "考试公平",
    "互动性强",
    "幽默风趣",
    "严格要求",
    "实践性强",
    "理论扎实",
    "答疑耐心",
];

/// A 1–5 star rating.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Very poor",
            2 => "Poor",
            3 => "Average",
            4 => "Good",
            _ => "Excellent",
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value).ok_or_else(|| format!("rating {value} is outside 1-5"))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

/// The `teacher` field of a review: some endpoints send the id, others embed
/// the teacher.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum TeacherRef {
    Id(u64),
    Embedded(TeacherSummary),
}

impl TeacherRef {
    pub fn resolve(self, teacher_name: Option<String>) -> TeacherSummary {
        match self {
            TeacherRef::Id(id) => TeacherSummary {
                id,
                name: teacher_name.unwrap_or_default(),
                department: String::new(),
            },
            TeacherRef::Embedded(mut summary) => {
                if summary.name.is_empty() {
                    summary.name = teacher_name.unwrap_or_default();
                }
                summary
            }
        }
    }
}

/// Tags arrive either comma-joined or as an array.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
enum RawTags {
    List(Vec<String>),
    Joined(String),
}

impl RawTags {
    fn normalize(self) -> Vec<String> {
        match self {
            RawTags::List(tags) => tags
                .iter()
                .map(|tag| tag.trim())
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
            RawTags::Joined(joined) => split_tags(&joined),
        }
    }
}

/// Splits a comma-joined tag string, trimming and dropping blanks.
pub fn split_tags(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Review as the backend sends it, before normalization.
#[derive(Deserialize)]
struct ReviewRecord {
    id: u64,
    teacher: TeacherRef,
    #[serde(default)]
    teacher_name: Option<String>,
    #[serde(default)]
    student_name: Option<String>,
    #[serde(default)]
    reviewer_name: Option<String>,
    #[serde(default)]
    course: String,
    #[serde(default)]
    course_display: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: String,
    overall_rating: Rating,
    difficulty_rating: Rating,
    #[serde(default)]
    would_take_again: bool,
    #[serde(default)]
    tags: Option<RawTags>,
    #[serde(default)]
    tags_list: Option<Vec<String>>,
    #[serde(default)]
    helpful_count: u32,
    #[serde(default)]
    created_at: Option<String>,
}

/// A review with its teacher reference resolved and its tags normalized.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(from = "ReviewRecord")]
pub struct Review {
    pub id: u64,
    pub teacher: TeacherSummary,
    pub reviewer: String,
    pub course: String,
    pub course_display: Option<String>,
    pub title: Option<String>,
    pub content: String,
    pub overall_rating: Rating,
    pub difficulty_rating: Rating,
    pub would_take_again: bool,
    pub tags: Vec<String>,
    pub helpful_count: u32,
    pub created_at: Option<String>,
}

impl From<ReviewRecord> for Review {
    fn from(record: ReviewRecord) -> Self {
        let mut tags = record.tags.map(RawTags::normalize).unwrap_or_default();
        if tags.is_empty() {
            tags = record
                .tags_list
                .map(|list| RawTags::List(list).normalize())
                .unwrap_or_default();
        }

        let reviewer = [record.student_name, record.reviewer_name]
            .into_iter()
            .flatten()
            .map(|name| name.trim().to_string())
            .find(|name| !name.is_empty())
            .unwrap_or_else(|| ANONYMOUS_REVIEWER.to_string());

        Self {
            id: record.id,
            teacher: record.teacher.resolve(record.teacher_name),
            reviewer,
            course: record.course,
            course_display: record.course_display,
            title: record.title.filter(|title| !title.trim().is_empty()),
            content: record.content,
            overall_rating: record.overall_rating,
            difficulty_rating: record.difficulty_rating,
            would_take_again: record.would_take_again,
            tags,
            helpful_count: record.helpful_count,
            created_at: record.created_at,
        }
    }
}

impl Review {
    /// Name used in confirmation prompts.
    pub fn display_title(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => format!("{} - {}", self.reviewer, self.course),
        }
    }

    /// Full course name; the backend's display name wins when it sent one.
    pub fn course_label(&self) -> String {
        self.course_display
            .clone()
            .filter(|display| !display.trim().is_empty())
            .unwrap_or_else(|| course_name(&self.course).to_string())
    }

    /// Date part of `created_at`, or empty when the backend omitted it.
    pub fn posted_on(&self) -> &str {
        self.created_at
            .as_deref()
            .map(|stamp| stamp.get(..10).unwrap_or(stamp))
            .unwrap_or_default()
    }
}

/// Body of `POST /reviews/create/`. Tags travel comma-joined.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewReview {
    pub teacher: u64,
    pub student_name: String,
    pub title: String,
    pub course: String,
    pub content: String,
    pub overall_rating: Rating,
    pub difficulty_rating: Rating,
    pub would_take_again: bool,
    pub tags: String,
}

/// State of the "write a review" form.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDraft {
    pub student_name: String,
    pub overall_rating: Rating,
    pub difficulty_rating: Rating,
    pub would_take_again: bool,
    pub course: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl Default for ReviewDraft {
    fn default() -> Self {
        Self {
            student_name: String::new(),
            overall_rating: Rating(5),
            difficulty_rating: Rating(3),
            would_take_again: true,
            course: String::new(),
            content: String::new(),
            tags: Vec::new(),
        }
    }
}

impl ReviewDraft {
    pub fn toggle_tag(&mut self, tag: &str) {
        match self.tags.iter().position(|existing| existing == tag) {
            Some(index) => {
                self.tags.remove(index);
            }
            None => self.tags.push(tag.to_string()),
        }
    }

    /// Adds a free-text tag. Blank input is ignored.
    pub fn add_custom_tag(&mut self, tag: &str) -> Result<(), ValidationError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Ok(());
        }
        if self.tags.iter().any(|existing| existing == tag) {
            return Err(ValidationError::Rejected("That tag has already been added"));
        }
        if tag.chars().count() > MAX_TAG_CHARS {
            return Err(ValidationError::TooLong {
                field: "tag",
                max: MAX_TAG_CHARS,
            });
        }
        self.tags.push(tag.to_string());
        Ok(())
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|existing| existing != tag);
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.content.trim().is_empty() {
            return Err(ValidationError::Required("content"));
        }
        if self.course.is_empty() {
            return Err(ValidationError::Required("course"));
        }
        if self.content.chars().count() < MIN_CONTENT_CHARS {
            return Err(ValidationError::TooShort {
                field: "content",
                min: MIN_CONTENT_CHARS,
            });
        }
        Ok(())
    }

    pub fn to_new_review(&self, teacher: u64) -> Result<NewReview, ValidationError> {
        self.validate()?;

        let title = if self.content.chars().count() > TITLE_CHARS {
            let head: String = self.content.chars().take(TITLE_CHARS).collect();
            format!("{head}...")
        } else {
            self.content.clone()
        };
        let student_name = match self.student_name.trim() {
            "" => ANONYMOUS_REVIEWER.to_string(),
            name => name.to_string(),
        };

        Ok(NewReview {
            teacher,
            student_name,
            title,
            course: self.course.clone(),
            content: self.content.clone(),
            overall_rating: self.overall_rating,
            difficulty_rating: self.difficulty_rating,
            would_take_again: self.would_take_again,
            tags: self.tags.join(","),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn payload(teacher: Value, tags: Value) -> Value {
        json!({
            "id": 3,
            "teacher": teacher,
            "teacher_name": "张老师",
            "student_name": "",
            "reviewer_name": "小明",
            "course": "OOP",
            "content": "讲得非常清楚，作业量适中",
            "overall_rating": 5,
            "difficulty_rating": 2,
            "would_take_again": true,
            "tags": tags,
            "helpful_count": 4
        })
    }

    #[test]
    fn test_joined_and_list_tags_normalize_identically() {
        let joined: Review =
            serde_json::from_value(payload(json!(9), json!("认真负责, 讲解清楚"))).unwrap();
        let list: Review =
            serde_json::from_value(payload(json!(9), json!(["认真负责", "讲解清楚"]))).unwrap();

        assert_eq!(joined.tags, vec!["认真负责", "讲解清楚"]);
        assert_eq!(joined.tags, list.tags);
    }

    #[test]
    fn test_missing_tags_fall_back_to_tags_list() {
        let mut value = payload(json!(9), json!(""));
        value["tags_list"] = json!(["幽默风趣"]);
        let review: Review = serde_json::from_value(value).unwrap();
        assert_eq!(review.tags, vec!["幽默风趣"]);

        let none: Review = serde_json::from_value(payload(json!(9), Value::Null)).unwrap();
        assert!(none.tags.is_empty());
    }

    #[test]
    fn test_teacher_id_and_embedded_resolve_to_summary() {
        let by_id: Review = serde_json::from_value(payload(json!(9), json!([]))).unwrap();
        assert_eq!(by_id.teacher.id, 9);
        assert_eq!(by_id.teacher.name, "张老师");

        let embedded: Review = serde_json::from_value(payload(
            json!({"id": 9, "name": "Zhang", "department": "其他"}),
            json!([]),
        ))
        .unwrap();
        assert_eq!(embedded.teacher.name, "Zhang");
        assert_eq!(embedded.teacher.department, "其他");
    }

    #[test]
    fn test_reviewer_falls_back_through_names() {
        let review: Review = serde_json::from_value(payload(json!(9), json!([]))).unwrap();
        assert_eq!(review.reviewer, "小明");
        assert_eq!(review.display_title(), "小明 - OOP");
    }

    #[test]
    fn test_course_label_and_posted_on() {
        let mut value = payload(json!(9), json!([]));
        value["created_at"] = json!("2024-11-02T09:15:00Z");
        let review: Review = serde_json::from_value(value).unwrap();
        assert_eq!(review.course_label(), "Object-Oriented Programming");
        assert_eq!(review.posted_on(), "2024-11-02");

        let mut value = payload(json!(9), json!([]));
        value["course_display"] = json!("面向对象程序设计");
        let review: Review = serde_json::from_value(value).unwrap();
        assert_eq!(review.course_label(), "面向对象程序设计");
        assert_eq!(review.posted_on(), "");
    }

    #[test]
    fn test_out_of_range_rating_is_rejected() {
        let mut value = payload(json!(9), json!([]));
        value["overall_rating"] = json!(6);
        assert!(serde_json::from_value::<Review>(value).is_err());
    }

    #[test]
    fn test_custom_tags_are_trimmed_unique_and_short() {
        let mut draft = ReviewDraft::default();
        draft.add_custom_tag("  耐心  ").unwrap();
        draft.add_custom_tag("   ").unwrap();
        assert_eq!(draft.tags, vec!["耐心"]);

        assert!(matches!(
            draft.add_custom_tag("耐心"),
            Err(ValidationError::Rejected(_))
        ));
        assert!(matches!(
            draft.add_custom_tag("一二三四五六七八九十一"),
            Err(ValidationError::TooLong { max: 10, .. })
        ));

        draft.toggle_tag("认真负责");
        draft.toggle_tag("耐心");
        assert_eq!(draft.tags, vec!["认真负责"]);
    }

    #[test]
    fn test_draft_validation_order() {
        let mut draft = ReviewDraft::default();
        assert_eq!(draft.validate(), Err(ValidationError::Required("content")));
        draft.content = "太短了".into();
        assert_eq!(draft.validate(), Err(ValidationError::Required("course")));
        draft.course = "SE".into();
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::TooShort { min: 10, .. })
        ));
    }

    #[test]
    fn test_new_review_joins_tags_and_truncates_title() {
        let draft = ReviewDraft {
            course: "SE".into(),
            content: "a".repeat(60),
            tags: vec!["认真负责".into(), "讲解清楚".into()],
            ..ReviewDraft::default()
        };

        let review = draft.to_new_review(4).unwrap();
        assert_eq!(review.tags, "认真负责,讲解清楚");
        assert_eq!(review.title, format!("{}...", "a".repeat(50)));
        assert_eq!(review.student_name, ANONYMOUS_REVIEWER);

        let body = serde_json::to_value(&review).unwrap();
        assert_eq!(body["overall_rating"], json!(5));
        assert_eq!(body["teacher"], json!(4));
    }
}
