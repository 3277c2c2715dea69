use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::GlooTransport;
use crate::components::labeled_input::LabeledInput;
use crate::management::UserManager;
use crate::models::{Role, UserForm};

/// Create/edit form for an account. Existing passwords are never shown; an
/// edited account gets a separate reset box instead.
#[component]
pub fn UserDialog(manager: UserManager<GlooTransport>) -> impl IntoView {
    let editor = manager.editor();
    let manager = store_value(manager);
    let new_password = create_rw_signal(String::new());

    let creating = move || editor.with(|e| e.as_ref().is_some_and(|e| e.is_new()));
    let read = move |field: fn(&UserForm) -> String| {
        Signal::derive(move || {
            editor.with(|editor| editor.as_ref().map(|e| field(&e.form)).unwrap_or_default())
        })
    };
    let write = move |field: fn(&mut UserForm, String)| {
        Callback::new(move |value: String| {
            manager.with_value(|m| m.edit_form(|form| field(form, value)))
        })
    };
    let role = move || editor.with(|e| e.as_ref().map(|e| e.form.role).unwrap_or_default());
    let active = move || editor.with(|e| e.as_ref().is_some_and(|e| e.form.is_active));

    let handle_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let manager = manager.get_value();
        spawn_local(async move {
            manager.submit().await;
        });
    };

    let reset_password = move |_| {
        let Some(user) = editor.with_untracked(|e| e.as_ref().and_then(|e| e.editing.clone())) else {
            return;
        };
        let manager = manager.get_value();
        let password = new_password.get_untracked();
        spawn_local(async move {
            if manager.reset_password(&user, &password).await {
                new_password.set(String::new());
            }
        });
    };

    let close = move |_| {
        new_password.set(String::new());
        manager.with_value(|m| m.close_editor());
    };

    view! {
        <Show when=move || editor.with(Option::is_some)>
            <div class="dialog-backdrop">
                <form class="dialog" on:submit=handle_submit>
                    <h3>{move || if creating() { "Add user" } else { "Edit user" }}</h3>
                    <LabeledInput
                        label="Username"
                        required=true
                        value=read(|form| form.username.clone())
                        on_input=write(|form, value| form.username = value)
                    />
                    <Show when=creating>
                        <LabeledInput
                            label="Password"
                            input_type="password"
                            required=true
                            value=read(|form| form.password.clone())
                            on_input=write(|form, value| form.password = value)
                        />
                    </Show>
                    <LabeledInput
                        label="First name"
                        value=read(|form| form.first_name.clone())
                        on_input=write(|form, value| form.first_name = value)
                    />
                    <LabeledInput
                        label="Last name"
                        value=read(|form| form.last_name.clone())
                        on_input=write(|form, value| form.last_name = value)
                    />
                    <LabeledInput
                        label="Email"
                        input_type="email"
                        value=read(|form| form.email.clone())
                        on_input=write(|form, value| form.email = value)
                    />
                    <label class="field">
                        <span class="field-label">"Role"</span>
                        <select on:change=move |e| {
                            if let Ok(role) = event_target_value(&e).parse::<Role>() {
                                manager.with_value(|m| m.edit_form(|form| form.role = role));
                            }
                        }>
                            {[Role::Student, Role::Admin]
                                .into_iter()
                                .map(|option| {
                                    view! {
                                        <option value=option.as_str() selected=move || role() == option>
                                            {option.label()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </label>
                    <Show when=move || role() == Role::Student>
                        <LabeledInput
                            label="Student ID"
                            value=read(|form| form.student_id.clone())
                            on_input=write(|form, value| form.student_id = value)
                        />
                    </Show>
                    <label class="checkbox">
                        <input
                            type="checkbox"
                            prop:checked=active
                            on:change=move |e| {
                                let checked = event_target_checked(&e);
                                manager.with_value(|m| m.edit_form(|form| form.is_active = checked));
                            }
                        />
                        "Account active"
                    </label>
                    <Show when=move || !creating()>
                        <fieldset class="reset-password">
                            <legend>"Reset password"</legend>
                            <input
                                type="password"
                                placeholder="New password"
                                prop:value=move || new_password.get()
                                on:input=move |e| new_password.set(event_target_value(&e))
                            />
                            <button type="button" on:click=reset_password>"Reset"</button>
                        </fieldset>
                    </Show>
                    <div class="dialog-actions">
                        <button type="button" on:click=close>"Cancel"</button>
                        <button type="submit" class="primary">"Save"</button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
