use leptos::*;

use crate::components::tag_editor::TagEditor;
use crate::models::course::COURSES;
use crate::models::review::MIN_CONTENT_CHARS;
use crate::models::{Rating, ReviewDraft};
use crate::notify::Notifier;

fn rating_options(current: impl Fn() -> u8 + Copy + 'static) -> impl IntoView {
    (Rating::MIN..=Rating::MAX)
        .rev()
        .map(|stars| {
            let label = Rating::new(stars).map(Rating::label).unwrap_or_default();
            view! {
                <option value=stars.to_string() selected=move || current() == stars>
                    {format!("{stars} - {label}")}
                </option>
            }
        })
        .collect_view()
}

/// The "write a review" form. All state lives in `draft`; the page decides
/// what submitting means.
#[component]
pub fn ReviewForm(
    draft: RwSignal<ReviewDraft>,
    #[prop(into)] submitting: Signal<bool>,
    #[prop(into)] on_submit: Callback<()>,
) -> impl IntoView {
    let notifier = expect_context::<Notifier>();

    let overall = move || draft.with(|d| d.overall_rating.get());
    let difficulty = move || draft.with(|d| d.difficulty_rating.get());
    let content_chars = move || draft.with(|d| d.content.chars().count());
    let parse_rating = |e: &ev::Event| event_target_value(e).parse::<u8>().ok().and_then(Rating::new);

    let add_tag = move |tag: String| match draft.try_update(|d| d.add_custom_tag(&tag)) {
        Some(Err(err)) => {
            notifier.error(err.to_string());
            false
        }
        _ => true,
    };

    let handle_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        on_submit.call(());
    };

    view! {
        <form class="review-form" on:submit=handle_submit>
            <label class="field">
                <span class="field-label">"Your name (optional)"</span>
                <input
                    placeholder="Leave blank to post anonymously"
                    prop:value=move || draft.with(|d| d.student_name.clone())
                    on:input=move |e| draft.update(|d| d.student_name = event_target_value(&e))
                />
            </label>
            <label class="field">
                <span class="field-label">"Course *"</span>
                <select on:change=move |e| draft.update(|d| d.course = event_target_value(&e))>
                    <option value="">"Select a course"</option>
                    {COURSES
                        .iter()
                        .map(|&(code, name)| {
                            let selected = move || draft.with(|d| d.course == code);
                            view! { <option value=code selected=selected>{format!("{code} - {name}")}</option> }
                        })
                        .collect_view()}
                </select>
            </label>
            <div class="rating-row">
                <label class="field">
                    <span class="field-label">"Overall rating"</span>
                    <select on:change=move |e| {
                        if let Some(rating) = parse_rating(&e) {
                            draft.update(|d| d.overall_rating = rating);
                        }
                    }>
                        {rating_options(overall)}
                    </select>
                </label>
                <label class="field">
                    <span class="field-label">"Difficulty"</span>
                    <select on:change=move |e| {
                        if let Some(rating) = parse_rating(&e) {
                            draft.update(|d| d.difficulty_rating = rating);
                        }
                    }>
                        {rating_options(difficulty)}
                    </select>
                </label>
            </div>
            <label class="checkbox">
                <input
                    type="checkbox"
                    prop:checked=move || draft.with(|d| d.would_take_again)
                    on:change=move |e| draft.update(|d| d.would_take_again = event_target_checked(&e))
                />
                "I would take this teacher again"
            </label>
            <label class="field">
                <span class="field-label">"Review *"</span>
                <textarea
                    rows="6"
                    placeholder="What was the course like?"
                    prop:value=move || draft.with(|d| d.content.clone())
                    on:input=move |e| draft.update(|d| d.content = event_target_value(&e))
                ></textarea>
                <span class="char-count" class:too-short=move || content_chars() < MIN_CONTENT_CHARS>
                    {move || format!("{} characters (at least {MIN_CONTENT_CHARS})", content_chars())}
                </span>
            </label>
            <div class="field">
                <span class="field-label">"Tags"</span>
                <TagEditor
                    selected=Signal::derive(move || draft.with(|d| d.tags.clone()))
                    on_toggle=move |tag: String| draft.update(|d| d.toggle_tag(&tag))
                    on_add=add_tag
                    on_remove=move |tag: String| draft.update(|d| d.remove_tag(&tag))
                />
            </div>
            <button type="submit" class="primary" disabled=move || submitting.get()>
                {move || if submitting.get() { "Submitting..." } else { "Submit review" }}
            </button>
        </form>
    }
}
