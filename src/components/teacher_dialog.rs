use leptos::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;

use crate::api::{GlooTransport, ImageUpload};
use crate::components::labeled_input::LabeledInput;
use crate::management::TeacherManager;
use crate::models::teacher::{DEPARTMENTS, SUBJECTS};
use crate::models::TeacherForm;

/// Create/edit form for a teacher, shown while the manager has an open editor.
#[component]
pub fn TeacherDialog(manager: TeacherManager<GlooTransport>) -> impl IntoView {
    let editor = manager.editor();
    let manager = store_value(manager);

    let read = move |field: fn(&TeacherForm) -> String| {
        Signal::derive(move || {
            editor.with(|editor| editor.as_ref().map(|e| field(&e.form)).unwrap_or_default())
        })
    };
    let write = move |field: fn(&mut TeacherForm, String)| {
        Callback::new(move |value: String| {
            manager.with_value(|m| m.edit_form(|form| field(form, value)))
        })
    };

    let bio = read(|form| form.bio.clone());

    let has_subject = move |subject: &'static str| {
        move || {
            editor.with(|editor| {
                editor
                    .as_ref()
                    .is_some_and(|e| e.form.subject_list().iter().any(|s| s == subject))
            })
        }
    };
    let image_name = move || {
        editor.with(|editor| {
            editor
                .as_ref()
                .and_then(|e| e.image.as_ref().map(ImageUpload::file_name))
        })
    };

    let select_image = move |e: ev::Event| {
        let input: HtmlInputElement = event_target(&e);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            manager.with_value(|m| m.select_image(ImageUpload::new(file)));
        }
    };

    let handle_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let manager = manager.get_value();
        spawn_local(async move {
            manager.submit().await;
        });
    };

    view! {
        <Show when=move || editor.with(Option::is_some)>
            <div class="dialog-backdrop">
                <form class="dialog" on:submit=handle_submit>
                    <h3>
                        {move || {
                            if editor.with(|e| e.as_ref().is_some_and(|e| e.editing.is_some())) {
                                "Edit teacher"
                            } else {
                                "Add teacher"
                            }
                        }}
                    </h3>
                    <LabeledInput
                        label="Name"
                        required=true
                        value=read(|form| form.name.clone())
                        on_input=write(|form, value| form.name = value)
                    />
                    <label class="field">
                        <span class="field-label">"Department"</span>
                        <select on:change=move |e| {
                            let department = event_target_value(&e);
                            manager.with_value(|m| m.edit_form(|form| form.department = department));
                        }>
                            {DEPARTMENTS
                                .iter()
                                .map(|&department| {
                                    let selected = move || {
                                        editor.with(|e| {
                                            e.as_ref().is_some_and(|e| e.form.department == department)
                                        })
                                    };
                                    view! {
                                        <option value=department selected=selected>
                                            {department}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </label>
                    <fieldset class="field subjects">
                        <legend>"Subjects"</legend>
                        {SUBJECTS
                            .iter()
                            .map(|&subject| {
                                view! {
                                    <label class="checkbox">
                                        <input
                                            type="checkbox"
                                            prop:checked=has_subject(subject)
                                            on:change=move |_| {
                                                manager.with_value(|m| {
                                                    m.edit_form(|form| form.toggle_subject(subject))
                                                })
                                            }
                                        />
                                        {subject}
                                    </label>
                                }
                            })
                            .collect_view()}
                    </fieldset>
                    <label class="field">
                        <span class="field-label">"Bio"</span>
                        <textarea
                            rows="4"
                            prop:value=move || bio.get()
                            on:input=move |e| {
                                let text = event_target_value(&e);
                                manager.with_value(|m| m.edit_form(|form| form.bio = text));
                            }
                        ></textarea>
                    </label>
                    <LabeledInput
                        label="Profile link"
                        input_type="url"
                        placeholder="https://"
                        value=read(|form| form.detail_url.clone())
                        on_input=write(|form, value| form.detail_url = value)
                    />
                    <label class="field">
                        <span class="field-label">"Photo"</span>
                        <input type="file" accept="image/*" on:change=select_image/>
                        {move || image_name().map(|name| view! { <span class="file-name">{name}</span> })}
                    </label>
                    <div class="dialog-actions">
                        <button type="button" on:click=move |_| manager.with_value(|m| m.close_editor())>
                            "Cancel"
                        </button>
                        <button type="submit" class="primary">"Save"</button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
