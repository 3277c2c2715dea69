//! Controllers behind the admin dashboard. Each one owns a flat list for its
//! entity and follows the same cycle: load the whole list, edit through a
//! form mirror, submit, then reload the whole list again.

pub mod reviews;
pub mod teachers;
pub mod users;

pub use reviews::{review_totals, ReviewFilterField, ReviewFilters, ReviewManager, ReviewTotals};
pub use teachers::{check_image, teacher_totals, TeacherEditor, TeacherManager, TeacherTotals};
pub use users::{UserEditor, UserFilters, UserManager};

pub const DELETE_NETWORK_FAILURE: &str = "Delete failed, please check your network connection";

/// Blocking yes/no prompt shown before destructive actions.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// `window.confirm`. A browser that refuses to show the dialog counts as "no".
pub struct WindowConfirm;

impl Confirm for WindowConfirm {
    fn confirm(&self, message: &str) -> bool {
        gloo_utils::window()
            .confirm_with_message(message)
            .unwrap_or(false)
    }
}
