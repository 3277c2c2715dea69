use std::rc::Rc;

use leptos::logging::error;
use leptos::*;

use super::{Confirm, DELETE_NETWORK_FAILURE};
use crate::api::{ApiClient, ImageUpload, TeacherQuery, Transport};
use crate::config::AppConfig;
use crate::error::{decode_error, ValidationError, UNKNOWN_ERROR};
use crate::models::{Teacher, TeacherForm};
use crate::notify::Notifier;

/// Backend fields whose validation messages are worth showing verbatim.
const TEACHER_ERROR_FIELDS: [&str; 2] = ["name", "subjects"];

#[derive(Clone, Debug)]
pub struct TeacherEditor {
    /// `None` while creating.
    pub editing: Option<Teacher>,
    pub form: TeacherForm,
    pub image: Option<ImageUpload>,
}

impl TeacherEditor {
    fn create() -> Self {
        Self {
            editing: None,
            form: TeacherForm::default(),
            image: None,
        }
    }

    fn edit(teacher: Teacher) -> Self {
        Self {
            form: TeacherForm::from(&teacher),
            editing: Some(teacher),
            image: None,
        }
    }
}

/// Rejects anything that is not an image or is over `max_bytes`.
pub fn check_image(content_type: &str, size: u64, max_bytes: u64) -> Result<(), ValidationError> {
    if !content_type.starts_with("image/") {
        return Err(ValidationError::Rejected("Please choose an image file"));
    }
    if size > max_bytes {
        return Err(ValidationError::Rejected("Images must be 5 MB or smaller"));
    }
    Ok(())
}

pub struct TeacherManager<T> {
    api: ApiClient<T>,
    notifier: Notifier,
    confirm: Rc<dyn Confirm>,
    page_size: u32,
    max_image_bytes: u64,
    teachers: RwSignal<Vec<Teacher>>,
    loading: RwSignal<bool>,
    editor: RwSignal<Option<TeacherEditor>>,
}

impl<T> Clone for TeacherManager<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            notifier: self.notifier,
            confirm: Rc::clone(&self.confirm),
            page_size: self.page_size,
            max_image_bytes: self.max_image_bytes,
            teachers: self.teachers,
            loading: self.loading,
            editor: self.editor,
        }
    }
}

impl<T: Transport> TeacherManager<T> {
    pub fn new(
        api: ApiClient<T>,
        notifier: Notifier,
        confirm: Rc<dyn Confirm>,
        config: &AppConfig,
    ) -> Self {
        Self {
            api,
            notifier,
            confirm,
            page_size: config.page_size_ceiling,
            max_image_bytes: config.max_image_bytes,
            teachers: create_rw_signal(Vec::new()),
            loading: create_rw_signal(true),
            editor: create_rw_signal(None),
        }
    }

    pub fn teachers(&self) -> ReadSignal<Vec<Teacher>> {
        self.teachers.read_only()
    }

    pub fn loading(&self) -> ReadSignal<bool> {
        self.loading.read_only()
    }

    pub fn editor(&self) -> ReadSignal<Option<TeacherEditor>> {
        self.editor.read_only()
    }

    pub async fn load(&self) {
        self.loading.set(true);
        let query = TeacherQuery {
            page_size: Some(self.page_size),
            ..TeacherQuery::default()
        };
        match self.api.list_teachers(&query).await {
            Ok(page) => self.teachers.set(page.results),
            Err(err) => {
                error!("[TEACHERS] loading the list failed: {}", err);
                self.notifier.error("Failed to load teachers");
            }
        }
        self.loading.set(false);
    }

    /// Opens the dialog empty for `None`, or filled from the detail endpoint
    /// for an existing teacher.
    pub async fn open_editor(&self, teacher: Option<Teacher>) {
        let editor = match teacher {
            None => TeacherEditor::create(),
            Some(listed) => match self.api.teacher(listed.id).await {
                Ok(full) => TeacherEditor::edit(full),
                Err(err) => {
                    error!("[TEACHERS] fetching teacher {} failed: {}", listed.id, err);
                    self.notifier
                        .warning("Could not load full teacher details; some fields may be empty");
                    TeacherEditor::edit(listed)
                }
            },
        };
        self.editor.set(Some(editor));
    }

    pub fn close_editor(&self) {
        self.editor.set(None);
    }

    pub fn edit_form(&self, change: impl FnOnce(&mut TeacherForm)) {
        self.editor.update(|editor| {
            if let Some(editor) = editor {
                change(&mut editor.form);
            }
        });
    }

    pub fn select_image(&self, upload: ImageUpload) {
        if let Err(err) = check_image(&upload.content_type(), upload.size(), self.max_image_bytes) {
            self.notifier.error(err.to_string());
            return;
        }
        self.editor.update(|editor| {
            if let Some(editor) = editor {
                editor.image = Some(upload);
            }
        });
    }

    /// Creates or updates, then reloads the list. Returns whether it saved.
    pub async fn submit(&self) -> bool {
        let Some(editor) = self.editor.get_untracked() else {
            return false;
        };
        if editor.form.name.trim().is_empty() {
            self.notifier
                .error(ValidationError::Required("name").to_string());
            return false;
        }

        let image = editor.image.as_ref();
        let saved = match &editor.editing {
            Some(teacher) => self
                .api
                .update_teacher(teacher.id, &editor.form, image)
                .await
                .map(|_| "Teacher updated"),
            None => self
                .api
                .create_teacher(&editor.form, image)
                .await
                .map(|_| "Teacher created"),
        };

        match saved {
            Ok(message) => {
                self.notifier.success(message);
                self.close_editor();
                self.load().await;
                true
            }
            Err(err) => {
                error!("[TEACHERS] saving failed: {}", err);
                let report = decode_error(&err, &TEACHER_ERROR_FIELDS, UNKNOWN_ERROR);
                self.notifier.error(report.to_string());
                false
            }
        }
    }

    /// Asks first; a cancelled prompt sends nothing.
    pub async fn delete(&self, teacher: &Teacher) -> bool {
        let prompt = format!(
            "Delete teacher \"{}\"? This cannot be undone.",
            teacher.name
        );
        if !self.confirm.confirm(&prompt) {
            return false;
        }

        match self.api.delete_teacher(teacher.id).await {
            Ok(()) => {
                self.notifier.success("Teacher deleted");
                self.load().await;
                true
            }
            Err(err) => {
                error!("[TEACHERS] deleting teacher {} failed: {}", teacher.id, err);
                self.notifier.error(DELETE_NETWORK_FAILURE);
                false
            }
        }
    }
}

/// Headline figures for the teacher tab, computed from the loaded list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TeacherTotals {
    pub teachers: usize,
    pub reviews: u64,
    /// Mean of the teachers' average ratings; 0 for an empty list.
    pub average_rating: f64,
}

pub fn teacher_totals(teachers: &[Teacher]) -> TeacherTotals {
    if teachers.is_empty() {
        return TeacherTotals::default();
    }
    let rating_sum: f64 = teachers.iter().map(|teacher| teacher.average_rating).sum();
    TeacherTotals {
        teachers: teachers.len(),
        reviews: teachers.iter().map(|teacher| u64::from(teacher.total_reviews)).sum(),
        average_rating: rating_sum / teachers.len() as f64,
    }
}
