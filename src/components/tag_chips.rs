use leptos::*;

/// Read-only tag labels. Both the public review cards and the admin review
/// dialog render tags through this, so they always look the same.
#[component]
pub fn TagChips(tags: Vec<String>) -> impl IntoView {
    (!tags.is_empty()).then(|| {
        view! {
            <div class="tag-chips">
                {tags
                    .into_iter()
                    .map(|tag| view! { <span class="tag-chip">{tag}</span> })
                    .collect_view()}
            </div>
        }
    })
}
