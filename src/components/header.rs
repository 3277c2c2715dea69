use leptos::*;
use leptos_router::{use_navigate, NavigateOptions, A};
use wasm_bindgen_futures::spawn_local;

use crate::app::HttpClient;
use crate::auth::guard::LOGIN_PATH;
use crate::auth::{AuthState, AuthStore};

#[component]
pub fn Header() -> impl IntoView {
    let auth = expect_context::<AuthStore>();
    let client = store_value(expect_context::<HttpClient>());
    let navigate = store_value(use_navigate());
    let state = auth.signal();

    let logout = move |_| {
        let client = client.get_value();
        let navigate = navigate.get_value();
        spawn_local(async move {
            client.logout().await;
            navigate(LOGIN_PATH, NavigateOptions::default());
        });
    };

    view! {
        <header class="site-header">
            <A href="/" class="brand">"Teacher Reviews"</A>
            <nav class="site-nav">
                <A href="/" exact=true>"Home"</A>
                <A href="/teachers">"Teachers"</A>
                <Show when=move || state.with(AuthState::is_admin)>
                    <A href="/admin">"Admin"</A>
                </Show>
            </nav>
            <div class="session">
                {move || match state.get() {
                    AuthState::Anonymous => view! { <A href=LOGIN_PATH>"Sign in"</A> }.into_view(),
                    signed_in => view! {
                        <span class="session-user">
                            {signed_in.username().unwrap_or_default().to_string()}
                            {signed_in.role().map(|role| format!(" ({})", role.label()))}
                        </span>
                        <button class="link-button" on:click=logout>"Sign out"</button>
                    }
                    .into_view(),
                }}
            </div>
        </header>
    }
}
