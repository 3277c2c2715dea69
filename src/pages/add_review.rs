use leptos::logging::{error, log};
use leptos::*;
use leptos_meta::Title;
use leptos_router::{use_navigate, use_params_map, NavigateOptions, A};
use wasm_bindgen_futures::spawn_local;

use crate::app::HttpClient;
use crate::components::review_form::ReviewForm;
use crate::error::decode_error;
use crate::models::{ReviewDraft, Teacher};
use crate::notify::Notifier;
use crate::utils::leptos_owner::with_owner_safe;

const REVIEW_ERROR_FIELDS: [&str; 4] = ["content", "course", "overall_rating", "tags"];

#[component]
pub fn AddReviewPage() -> impl IntoView {
    let client = store_value(expect_context::<HttpClient>());
    let notifier = expect_context::<Notifier>();
    let navigate = store_value(use_navigate());
    let params = use_params_map();
    let teacher_id =
        move || params.with(|params| params.get("id").and_then(|id| id.parse::<u64>().ok()));

    let teacher = create_rw_signal(None::<Teacher>);
    let draft = create_rw_signal(ReviewDraft::default());
    let submitting = create_rw_signal(false);

    create_effect(move |_| {
        let Some(id) = teacher_id() else {
            return;
        };
        let client = client.get_value();
        spawn_local(async move {
            match client.teacher(id).await {
                Ok(loaded) => teacher.set(Some(loaded)),
                Err(err) => error!("[REVIEW] loading teacher {} failed: {}", id, err),
            }
        });
    });

    let submit = move |_: ()| {
        let Some(id) = teacher_id() else {
            return;
        };
        let review = match draft.with_untracked(|d| d.to_new_review(id)) {
            Ok(review) => review,
            Err(err) => {
                notifier.error(err.to_string());
                return;
            }
        };

        let client = client.get_value();
        let owner = Owner::current();
        submitting.set(true);
        spawn_local(async move {
            match client.create_review(&review).await {
                Ok(()) => {
                    log!("[REVIEW] review for teacher {} submitted", id);
                    notifier.success("Review submitted, thank you!");
                    with_owner_safe(owner, "navigating after review submit", || {
                        navigate.with_value(|navigate| {
                            navigate(&format!("/teachers/{id}"), NavigateOptions::default())
                        })
                    });
                }
                Err(err) => {
                    error!("[REVIEW] submitting review for teacher {} failed: {}", id, err);
                    let report = decode_error(&err, &REVIEW_ERROR_FIELDS, "Failed to submit review");
                    notifier.error(report.to_string());
                }
            }
            submitting.set(false);
        });
    };

    view! {
        <Title text="Write a review"/>
        <h1>
            {move || match teacher.get() {
                Some(teacher) => format!("Review {}", teacher.name),
                None => "Write a review".to_string(),
            }}
        </h1>
        {move || {
            teacher_id()
                .map(|id| view! { <A href=format!("/teachers/{id}") class="back-link">"Back to teacher"</A> })
        }}
        <ReviewForm draft=draft submitting=submitting on_submit=submit/>
    }
}
