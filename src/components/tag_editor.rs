use leptos::*;

use crate::models::review::{COMMON_TAGS, MAX_TAG_CHARS};

/// Tag picker for the review form: toggles for the common tags plus a free
/// text box for custom ones. `on_add` reports whether the tag was accepted;
/// the text box is only cleared when it was.
#[component]
pub fn TagEditor(
    #[prop(into)] selected: Signal<Vec<String>>,
    #[prop(into)] on_toggle: Callback<String>,
    #[prop(into)] on_add: Callback<String, bool>,
    #[prop(into)] on_remove: Callback<String>,
) -> impl IntoView {
    let (custom, set_custom) = create_signal(String::new());

    let add_tag = move || {
        if on_add.call(custom.get_untracked()) {
            set_custom.set(String::new());
        }
    };

    view! {
        <div class="tag-editor">
            <div class="tag-options">
                {COMMON_TAGS
                    .iter()
                    .map(|&tag| {
                        let active = move || selected.with(|tags| tags.iter().any(|t| t == tag));
                        view! {
                            <button
                                type="button"
                                class="tag-option"
                                class:active=active
                                on:click=move |_| on_toggle.call(tag.to_string())
                            >
                                {tag}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            <ul class="selected-tags">
                {move || {
                    selected
                        .get()
                        .into_iter()
                        .map(|tag| {
                            let removed = tag.clone();
                            view! {
                                <li class="tag-chip">
                                    {tag}
                                    <button
                                        type="button"
                                        class="tag-remove"
                                        on:click=move |_| on_remove.call(removed.clone())
                                    >
                                        "×"
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
            <div class="custom-tag">
                <input
                    placeholder="Custom tag"
                    maxlength=MAX_TAG_CHARS.to_string()
                    prop:value=move || custom.get()
                    on:input=move |e| set_custom.set(event_target_value(&e))
                />
                <button type="button" on:click=move |_| add_tag()>"Add tag"</button>
            </div>
        </div>
    }
}
