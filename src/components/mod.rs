pub mod header;
pub mod labeled_input;
pub mod pagination;
pub mod protected_route;
pub mod review_card;
pub mod review_dialog;
pub mod review_form;
pub mod review_list;
pub mod tag_chips;
pub mod tag_editor;
pub mod teacher_card;
pub mod teacher_dialog;
pub mod teacher_list;
pub mod toast;
pub mod user_dialog;
pub mod user_list;
