#![cfg(not(target_arch = "wasm32"))]

use std::cell::Cell;
use std::rc::Rc;

use http::{Method, StatusCode};
use leptos::*;
use serde_json::{json, Value};
use teacher_review::api::{ApiClient, RequestBody};
use teacher_review::config::AppConfig;
use teacher_review::error::ApiError;
use teacher_review::management::{ReviewManager, TeacherManager, UserManager};
use teacher_review::models::{Review, Teacher, User};
use teacher_review::notify::{Notifier, Severity};

mod mocks;
use mocks::session_mock::{ScriptedConfirm, Session};
use mocks::transport_mock::{page, ScriptedTransport};

fn teacher_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "department": "其他",
        "subjects_list": ["数据结构"],
        "total_reviews": 2,
        "average_rating": "4.50"
    })
}

fn review_json(id: u64) -> Value {
    json!({
        "id": id,
        "teacher": 1,
        "teacher_name": "王老师",
        "student_name": "小红",
        "course": "DSA",
        "content": "讲解清楚，作业量适中",
        "overall_rating": 4,
        "difficulty_rating": 3,
        "would_take_again": true,
        "tags": "认真负责,讲解清楚"
    })
}

fn user_json(id: u64, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{username}@example.edu"),
        "user_type": "student",
        "date_joined": "2024-09-01T00:00:00Z"
    })
}

fn toast(notifier: &Notifier) -> Option<(Severity, String)> {
    notifier
        .current()
        .map(|toast| (toast.severity, toast.message))
}

fn teacher_ids(manager: &TeacherManager<ScriptedTransport>) -> Vec<u64> {
    manager.teachers().get_untracked().iter().map(|t| t.id).collect()
}

#[tokio::test]
async fn test_confirmed_teacher_delete_removes_row_and_reports_success() {
    let runtime = create_runtime();
    let session = Session::admin();
    let transport = ScriptedTransport::default();
    transport
        .ok(Method::GET, "/teachers/", page(vec![teacher_json(1, "王老师"), teacher_json(2, "李老师")]))
        .no_content(Method::DELETE, "/teachers/1/")
        .ok(Method::GET, "/teachers/", page(vec![teacher_json(2, "李老师")]));
    let notifier = Notifier::new();
    let confirm = ScriptedConfirm::answering(true);
    let manager = TeacherManager::new(
        ApiClient::new(transport.clone(), session.auth.clone()),
        notifier,
        confirm.clone(),
        &AppConfig::default(),
    );

    manager.load().await;
    assert_eq!(teacher_ids(&manager), vec![1, 2]);
    assert_eq!(
        transport.sent()[0].query_value("page_size"),
        Some("100"),
        "management lists fetch everything in one page"
    );

    let target: Teacher = manager.teachers().get_untracked()[0].clone();
    assert!(manager.delete(&target).await);

    assert_eq!(
        confirm.prompts(),
        vec!["Delete teacher \"王老师\"? This cannot be undone.".to_string()]
    );
    assert_eq!(teacher_ids(&manager), vec![2]);
    assert_eq!(toast(&notifier), Some((Severity::Success, "Teacher deleted".into())));
    assert_eq!(
        transport.sent()[1].bearer.as_deref(),
        Some("admin-token"),
        "requests carry the stored access token"
    );

    runtime.dispose();
}

#[tokio::test]
async fn test_cancelled_delete_sends_nothing() {
    let runtime = create_runtime();
    let session = Session::admin();
    let transport = ScriptedTransport::default();
    transport.ok(Method::GET, "/teachers/", page(vec![teacher_json(1, "王老师")]));
    let notifier = Notifier::new();
    let manager = TeacherManager::new(
        ApiClient::new(transport.clone(), session.auth.clone()),
        notifier,
        ScriptedConfirm::answering(false),
        &AppConfig::default(),
    );

    manager.load().await;
    let target = manager.teachers().get_untracked()[0].clone();
    assert!(!manager.delete(&target).await);

    assert_eq!(transport.calls(), vec!["GET /teachers/"]);
    assert_eq!(teacher_ids(&manager), vec![1]);
    assert_eq!(toast(&notifier), None);

    runtime.dispose();
}

#[tokio::test]
async fn test_teacher_without_name_is_never_sent() {
    let runtime = create_runtime();
    let session = Session::admin();
    let transport = ScriptedTransport::default();
    let notifier = Notifier::new();
    let manager = TeacherManager::new(
        ApiClient::new(transport.clone(), session.auth.clone()),
        notifier,
        ScriptedConfirm::answering(true),
        &AppConfig::default(),
    );

    manager.open_editor(None).await;
    manager.edit_form(|form| form.name = "   ".into());
    assert!(!manager.submit().await);

    assert!(transport.calls().is_empty());
    assert_eq!(toast(&notifier), Some((Severity::Error, "Name is required".into())));
    assert!(manager.editor().get_untracked().is_some(), "the form stays open");

    runtime.dispose();
}

#[tokio::test]
async fn test_teacher_create_posts_multipart_and_shows_field_error() {
    let runtime = create_runtime();
    let session = Session::admin();
    let transport = ScriptedTransport::default();
    transport.json(
        Method::POST,
        "/teachers/",
        StatusCode::BAD_REQUEST,
        json!({"name": ["teacher with this name already exists."]}),
    );
    let notifier = Notifier::new();
    let manager = TeacherManager::new(
        ApiClient::new(transport.clone(), session.auth.clone()),
        notifier,
        ScriptedConfirm::answering(true),
        &AppConfig::default(),
    );

    manager.open_editor(None).await;
    manager.edit_form(|form| {
        form.name = "王老师".into();
        form.toggle_subject("数据结构");
        form.toggle_subject("操作系统");
    });
    assert!(!manager.submit().await);

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    let RequestBody::Multipart(fields) = &sent[0].body else {
        panic!("teacher forms are sent as multipart, got {:?}", sent[0].body);
    };
    let names: Vec<&str> = fields.iter().map(|field| field.name()).collect();
    assert_eq!(names, vec!["name", "bio", "department", "subjects", "detail_url"]);

    assert_eq!(
        toast(&notifier),
        Some((
            Severity::Error,
            "Name: teacher with this name already exists.".into()
        ))
    );

    runtime.dispose();
}

#[tokio::test]
async fn test_editor_falls_back_to_listed_teacher_with_warning() {
    let runtime = create_runtime();
    let session = Session::admin();
    let transport = ScriptedTransport::default();
    transport.json(
        Method::GET,
        "/teachers/7/",
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"detail": "boom"}),
    );
    let notifier = Notifier::new();
    let manager = TeacherManager::new(
        ApiClient::new(transport.clone(), session.auth.clone()),
        notifier,
        ScriptedConfirm::answering(true),
        &AppConfig::default(),
    );

    let listed: Teacher = serde_json::from_value(teacher_json(7, "赵老师")).unwrap();
    manager.open_editor(Some(listed)).await;

    let editor = manager.editor().get_untracked().expect("editor opened");
    assert_eq!(editor.form.name, "赵老师");
    assert_eq!(editor.editing.map(|t| t.id), Some(7));
    assert_eq!(
        toast(&notifier).map(|(severity, _)| severity),
        Some(Severity::Warning)
    );

    runtime.dispose();
}

#[tokio::test]
async fn test_network_failure_on_save_becomes_network_toast() {
    let runtime = create_runtime();
    let session = Session::admin();
    let transport = ScriptedTransport::default();
    transport.reply(
        Method::PATCH,
        "/teachers/3/",
        Err(ApiError::Network("connection refused".into())),
    );
    let notifier = Notifier::new();
    let manager = TeacherManager::new(
        ApiClient::new(transport.clone(), session.auth.clone()),
        notifier,
        ScriptedConfirm::answering(true),
        &AppConfig::default(),
    );

    transport.ok(Method::GET, "/teachers/3/", teacher_json(3, "钱老师"));
    manager
        .open_editor(Some(serde_json::from_value(teacher_json(3, "钱老师")).unwrap()))
        .await;
    assert!(!manager.submit().await);

    assert_eq!(transport.calls(), vec!["GET /teachers/3/", "PATCH /teachers/3/"]);
    assert_eq!(
        toast(&notifier),
        Some((Severity::Error, "Network error: connection refused".into()))
    );

    runtime.dispose();
}

#[tokio::test]
async fn test_review_delete_reloads_teachers_exactly_once() {
    let runtime = create_runtime();
    let session = Session::admin();
    let transport = ScriptedTransport::default();
    transport
        .ok(Method::GET, "/reviews/manage/", page(vec![review_json(10), review_json(11)]))
        .no_content(Method::DELETE, "/reviews/manage/10/")
        .ok(Method::GET, "/reviews/manage/", page(vec![review_json(11)]));
    let notifier = Notifier::new();
    let reloads = Rc::new(Cell::new(0));
    let counter = Rc::clone(&reloads);
    let confirm = ScriptedConfirm::answering(true);
    let manager = ReviewManager::new(
        ApiClient::new(transport.clone(), session.auth.clone()),
        notifier,
        confirm.clone(),
        &AppConfig::default(),
    )
    .on_deleted(Callback::new(move |_: ()| counter.set(counter.get() + 1)));

    manager.load().await;
    let sent = transport.sent();
    assert_eq!(sent[0].query_value("ordering"), Some("-created_at"));

    let target: Review = manager.reviews().get_untracked()[0].clone();
    assert_eq!(target.tags, vec!["认真负责", "讲解清楚"]);
    assert!(manager.delete(&target).await);

    assert_eq!(reloads.get(), 1);
    assert!(confirm.prompts()[0].contains("rating statistics"));
    let ids: Vec<u64> = manager.reviews().get_untracked().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![11]);
    assert_eq!(toast(&notifier), Some((Severity::Success, "Review deleted".into())));

    runtime.dispose();
}

#[tokio::test]
async fn test_failed_review_delete_does_not_reload_teachers() {
    let runtime = create_runtime();
    let session = Session::admin();
    let transport = ScriptedTransport::default();
    transport.json(
        Method::DELETE,
        "/reviews/manage/10/",
        StatusCode::INTERNAL_SERVER_ERROR,
        Value::Null,
    );
    let notifier = Notifier::new();
    let reloads = Rc::new(Cell::new(0));
    let counter = Rc::clone(&reloads);
    let manager = ReviewManager::new(
        ApiClient::new(transport.clone(), session.auth.clone()),
        notifier,
        ScriptedConfirm::answering(true),
        &AppConfig::default(),
    )
    .on_deleted(Callback::new(move |_: ()| counter.set(counter.get() + 1)));

    let review: Review = serde_json::from_value(review_json(10)).unwrap();
    assert!(!manager.delete(&review).await);

    assert_eq!(reloads.get(), 0);
    assert_eq!(
        toast(&notifier),
        Some((
            Severity::Error,
            "Delete failed, please check your network connection".into()
        ))
    );

    runtime.dispose();
}

#[tokio::test]
async fn test_new_user_without_password_is_never_sent() {
    let runtime = create_runtime();
    let session = Session::admin();
    let transport = ScriptedTransport::default();
    let notifier = Notifier::new();
    let manager = UserManager::new(
        ApiClient::new(transport.clone(), session.auth.clone()),
        notifier,
        ScriptedConfirm::answering(true),
        &AppConfig::default(),
    );

    manager.open_editor(None).await;
    manager.edit_form(|form| form.username = "s2024001".into());
    assert!(!manager.submit().await);

    assert!(transport.calls().is_empty());
    assert_eq!(toast(&notifier), Some((Severity::Error, "Password is required".into())));

    runtime.dispose();
}

#[tokio::test]
async fn test_new_user_without_username_is_never_sent() {
    let runtime = create_runtime();
    let session = Session::admin();
    let transport = ScriptedTransport::default();
    let notifier = Notifier::new();
    let manager = UserManager::new(
        ApiClient::new(transport.clone(), session.auth.clone()),
        notifier,
        ScriptedConfirm::answering(true),
        &AppConfig::default(),
    );

    manager.open_editor(None).await;
    manager.edit_form(|form| {
        form.username = "   ".into();
        form.password = "initial-pass".into();
    });
    assert!(!manager.submit().await);

    assert!(transport.calls().is_empty());
    assert!(manager.editor().get_untracked().is_some());
    assert_eq!(toast(&notifier), Some((Severity::Error, "Username is required".into())));

    runtime.dispose();
}

#[tokio::test]
async fn test_user_create_reloads_list_and_stats() {
    let runtime = create_runtime();
    let session = Session::admin();
    let transport = ScriptedTransport::default();
    transport
        .json(Method::POST, "/auth/users/", StatusCode::CREATED, user_json(5, "s2024001"))
        .ok(Method::GET, "/auth/users/", page(vec![user_json(5, "s2024001")]))
        .ok(
            Method::GET,
            "/auth/users/stats/",
            json!({"total_users": 1, "active_users": 1, "student_users": 1, "admin_users": 0}),
        );
    let notifier = Notifier::new();
    let manager = UserManager::new(
        ApiClient::new(transport.clone(), session.auth.clone()),
        notifier,
        ScriptedConfirm::answering(true),
        &AppConfig::default(),
    );

    manager.open_editor(None).await;
    manager.edit_form(|form| {
        form.username = "s2024001".into();
        form.password = "initial-pass".into();
    });
    assert!(manager.submit().await);

    assert_eq!(
        transport.calls(),
        vec!["POST /auth/users/", "GET /auth/users/", "GET /auth/users/stats/"]
    );
    let RequestBody::Json(body) = &transport.sent()[0].body else {
        panic!("users are sent as JSON");
    };
    assert_eq!(body["user_type"], json!("student"));
    assert_eq!(body["password"], json!("initial-pass"));
    assert!(manager.editor().get_untracked().is_none());
    assert_eq!(manager.stats().get_untracked().map(|s| s.total_users), Some(1));
    assert_eq!(manager.stats().get_untracked().map(|s| s.student_count), Some(1));
    assert_eq!(toast(&notifier), Some((Severity::Success, "User created".into())));

    runtime.dispose();
}

#[tokio::test]
async fn test_user_delete_failure_uses_backend_detail() {
    let runtime = create_runtime();
    let session = Session::admin();
    let transport = ScriptedTransport::default();
    transport.json(
        Method::DELETE,
        "/auth/users/5/",
        StatusCode::FORBIDDEN,
        json!({"detail": "You cannot delete yourself."}),
    );
    let notifier = Notifier::new();
    let confirm = ScriptedConfirm::answering(true);
    let manager = UserManager::new(
        ApiClient::new(transport.clone(), session.auth.clone()),
        notifier,
        confirm.clone(),
        &AppConfig::default(),
    );

    let user: User = serde_json::from_value(user_json(5, "root")).unwrap();
    assert!(!manager.delete(&user).await);

    assert_eq!(
        confirm.prompts(),
        vec!["Delete user \"root\"? This cannot be undone.".to_string()]
    );
    assert_eq!(
        toast(&notifier),
        Some((Severity::Error, "You cannot delete yourself.".into()))
    );

    runtime.dispose();
}

#[tokio::test]
async fn test_reset_password_puts_new_password_only_when_given() {
    let runtime = create_runtime();
    let session = Session::admin();
    let transport = ScriptedTransport::default();
    transport.ok(Method::PUT, "/auth/users/5/", user_json(5, "s2024001"));
    let notifier = Notifier::new();
    let manager = UserManager::new(
        ApiClient::new(transport.clone(), session.auth.clone()),
        notifier,
        ScriptedConfirm::answering(true),
        &AppConfig::default(),
    );
    let user: User = serde_json::from_value(user_json(5, "s2024001")).unwrap();

    assert!(!manager.reset_password(&user, "  ").await);
    assert!(transport.calls().is_empty());

    assert!(manager.reset_password(&user, "n3w-pass").await);
    let RequestBody::Json(body) = &transport.sent()[0].body else {
        panic!("users are sent as JSON");
    };
    assert_eq!(body["password"], json!("n3w-pass"));
    assert_eq!(body["username"], json!("s2024001"));
    assert_eq!(
        toast(&notifier),
        Some((Severity::Success, "Password reset for s2024001".into()))
    );

    runtime.dispose();
}
