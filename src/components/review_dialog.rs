use leptos::*;

use crate::api::GlooTransport;
use crate::components::tag_chips::TagChips;
use crate::management::ReviewManager;

/// Read-only view of the review picked in the admin list.
#[component]
pub fn ReviewDialog(manager: ReviewManager<GlooTransport>) -> impl IntoView {
    let selected = manager.selected();
    let manager = store_value(manager);

    move || {
        selected.get().map(|review| {
            view! {
                <div class="dialog-backdrop">
                    <div class="dialog" role="dialog">
                        <h3>{review.display_title()}</h3>
                        <dl class="review-details">
                            <dt>"Teacher"</dt>
                            <dd>{review.teacher.name.clone()}</dd>
                            <dt>"Reviewer"</dt>
                            <dd>{review.reviewer.clone()}</dd>
                            <dt>"Course"</dt>
                            <dd>{review.course_label()}</dd>
                            <dt>"Overall"</dt>
                            <dd>{review.overall_rating.to_string()}</dd>
                            <dt>"Difficulty"</dt>
                            <dd>{review.difficulty_rating.to_string()}</dd>
                            <dt>"Would take again"</dt>
                            <dd>{if review.would_take_again { "Yes" } else { "No" }}</dd>
                            <dt>"Helpful votes"</dt>
                            <dd>{review.helpful_count}</dd>
                            <dt>"Posted"</dt>
                            <dd>{review.posted_on().to_string()}</dd>
                        </dl>
                        <p class="review-content">{review.content.clone()}</p>
                        <TagChips tags=review.tags.clone()/>
                        <div class="dialog-actions">
                            <button on:click=move |_| manager.with_value(|m| m.close_view())>
                                "Close"
                            </button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}
