use leptos::logging::error;
use leptos::*;
use leptos_meta::Title;
use leptos_router::{use_navigate, NavigateOptions};
use wasm_bindgen_futures::spawn_local;

use crate::app::HttpClient;
use crate::auth::guard::landing_path;
use crate::auth::AuthStore;
use crate::components::labeled_input::LabeledInput;
use crate::error::{decode_error, ValidationError};
use crate::models::{LoginCredentials, Role};
use crate::notify::Notifier;

const LOGIN_ERROR_FIELDS: [&str; 3] = ["non_field_errors", "username", "password"];

/// Checked before anything is sent.
fn credentials(username: &str, password: &str) -> Result<LoginCredentials, ValidationError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ValidationError::Required("username"));
    }
    if password.is_empty() {
        return Err(ValidationError::Required("password"));
    }
    Ok(LoginCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let client = store_value(expect_context::<HttpClient>());
    let auth = expect_context::<AuthStore>();
    let notifier = expect_context::<Notifier>();
    let navigate = use_navigate();
    let session = auth.signal();

    let role = create_rw_signal(Role::Student);
    let username = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let submitting = create_rw_signal(false);

    // Anyone already signed in, including someone who just signed in here,
    // goes to their landing page.
    create_effect(move |_| {
        let state = session.get();
        if state.role().is_some() {
            navigate(landing_path(&state), NavigateOptions::default());
        }
    });

    let handle_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let credentials = match credentials(&username.get_untracked(), &password.get_untracked()) {
            Ok(credentials) => credentials,
            Err(err) => {
                notifier.error(err.to_string());
                return;
            }
        };
        let role = role.get_untracked();
        let client = client.get_value();
        submitting.set(true);
        spawn_local(async move {
            match client.login(role, &credentials).await {
                Ok(_) => notifier.success(format!("Welcome, {}", credentials.username)),
                Err(err) => {
                    error!("[AUTH] {} login failed: {}", role, err);
                    let report = decode_error(&err, &LOGIN_ERROR_FIELDS, "Login failed");
                    notifier.error(report.to_string());
                }
            }
            submitting.set(false);
        });
    };

    let tab = move |tab_role: Role| {
        view! {
            <button
                type="button"
                class="tab"
                class:active=move || role.get() == tab_role
                on:click=move |_| role.set(tab_role)
            >
                {format!("{} login", tab_role.label())}
            </button>
        }
    };

    view! {
        <Title text="Sign in"/>
        <section class="login">
            <div class="tabs">{tab(Role::Student)} {tab(Role::Admin)}</div>
            <form class="login-form" on:submit=handle_submit>
                <LabeledInput
                    label="Username"
                    required=true
                    value=username
                    on_input=move |value: String| username.set(value)
                />
                <LabeledInput
                    label="Password"
                    input_type="password"
                    required=true
                    value=password
                    on_input=move |value: String| password.set(value)
                />
                <button type="submit" class="primary" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </section>
    }
}
