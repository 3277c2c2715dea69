use leptos::*;

use crate::components::tag_chips::TagChips;
use crate::models::Review;

/// One review on a teacher's page.
#[component]
pub fn ReviewCard(review: Review, #[prop(into)] on_helpful: Callback<u64>) -> impl IntoView {
    let id = review.id;
    let course = review.course_label();
    let posted_on = review.posted_on().to_string();
    let title = review.title.clone();

    view! {
        <article class="review-card">
            <header class="review-card-header">
                <span class="reviewer">{review.reviewer}</span>
                <span class="course">{course}</span>
                <span class="posted-on">{posted_on}</span>
            </header>
            {title.map(|title| view! { <h4 class="review-title">{title}</h4> })}
            <div class="review-ratings">
                <span>{format!("Overall {} ({})", review.overall_rating, review.overall_rating.label())}</span>
                <span>{format!("Difficulty {}", review.difficulty_rating)}</span>
                <span>
                    {if review.would_take_again { "Would take again" } else { "Would not take again" }}
                </span>
            </div>
            <p class="review-content">{review.content}</p>
            <TagChips tags=review.tags/>
            <footer class="review-card-footer">
                <button class="helpful" on:click=move |_| on_helpful.call(id)>
                    {format!("Helpful ({})", review.helpful_count)}
                </button>
            </footer>
        </article>
    }
}
