pub mod add_review;
pub mod admin;
pub mod home;
pub mod login;
pub mod teacher_detail;
pub mod teachers;
