use serde::{Deserialize, Serialize};

use super::lenient_f64;

pub const DEPARTMENTS: [&str; 2] = ["计算机科学与技术&软件工程", "其他"];

pub const SUBJECTS: [&str; 12] = [
    "问题解决与编程",
    "面向对象编程",
    "高级面向对象编程",
    "软件工程",
    "软件分析与测试",
    "人机交互",
    "DevOps",
    "创新产品开发",
    "C++",
    "Java",
    "计算数学",
    "计算机相关课程",
];

/// A teacher profile as the backend returns it. List responses leave out
/// `bio` and `detail_url`; the detail endpoint fills them in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Teacher {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub subjects_list: Vec<String>,
    #[serde(default)]
    pub detail_url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub total_reviews: u32,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub average_rating: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub difficulty_rating: f64,
    #[serde(default, alias = "would_take_again", deserialize_with = "lenient_f64")]
    pub would_take_again_percentage: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Teacher {
    pub fn summary(&self) -> TeacherSummary {
        TeacherSummary {
            id: self.id,
            name: self.name.clone(),
            department: self.department.clone(),
        }
    }

    pub fn subjects_display(&self) -> String {
        self.subjects_list.join(", ")
    }
}

/// The part of a teacher a review needs to show who it is about.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct TeacherSummary {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub department: String,
}

/// Form mirror for creating or editing a teacher. `subjects` is the
/// comma-joined text the backend stores.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TeacherForm {
    pub name: String,
    pub bio: String,
    pub department: String,
    pub subjects: String,
    pub detail_url: String,
}

impl Default for TeacherForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            bio: String::new(),
            department: DEPARTMENTS[0].to_string(),
            subjects: String::new(),
            detail_url: String::new(),
        }
    }
}

impl From<&Teacher> for TeacherForm {
    fn from(teacher: &Teacher) -> Self {
        Self {
            name: teacher.name.clone(),
            bio: teacher.bio.clone(),
            department: teacher.department.clone(),
            subjects: teacher.subjects_display(),
            detail_url: teacher.detail_url.clone().unwrap_or_default(),
        }
    }
}

impl TeacherForm {
    /// Subjects split back into a list, blanks dropped.
    pub fn subject_list(&self) -> Vec<String> {
        self.subjects
            .split(',')
            .map(str::trim)
            .filter(|subject| !subject.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn toggle_subject(&mut self, subject: &str) {
        let mut subjects = self.subject_list();
        match subjects.iter().position(|existing| existing == subject) {
            Some(index) => {
                subjects.remove(index);
            }
            None => subjects.push(subject.to_string()),
        }
        self.subjects = subjects.join(", ");
    }

    /// Multipart text fields in the order the backend form expects.
    pub fn fields(&self) -> [(&'static str, &str); 5] {
        [
            ("name", self.name.as_str()),
            ("bio", self.bio.as_str()),
            ("department", self.department.as_str()),
            ("subjects", self.subjects.as_str()),
            ("detail_url", self.detail_url.as_str()),
        ]
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct TeacherStats {
    #[serde(default)]
    pub total_teachers: u64,
    #[serde(default)]
    pub teachers_with_reviews: u64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub average_rating: f64,
    #[serde(default)]
    pub total_reviews: u64,
}
