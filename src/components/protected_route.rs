use leptos::*;
use leptos_router::Redirect;

use crate::auth::guard::{guard, Access, GuardOutcome};
use crate::auth::AuthStore;

/// Renders `children` only when the session passes `access`; otherwise
/// redirects. Re-evaluated whenever the session changes.
#[component]
pub fn RequireAuth(access: Access, children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<AuthStore>();
    let state = auth.signal();

    move || match state.with(|state| guard(state, access)) {
        GuardOutcome::Render => children().into_view(),
        GuardOutcome::Redirect(path) => view! { <Redirect path=path/> }.into_view(),
    }
}
