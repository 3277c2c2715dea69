use leptos::*;

use crate::config::AppConfig;
use crate::notify::Notifier;

#[component]
pub fn ToastView() -> impl IntoView {
    let notifier = expect_context::<Notifier>();
    let duration = expect_context::<AppConfig>().toast_duration;
    let current = notifier.signal();

    // Each toast schedules its own dismissal; a newer toast is unaffected.
    create_effect(move |_| {
        if let Some(id) = current.with(|toast| toast.as_ref().map(|toast| toast.id)) {
            set_timeout(move || notifier.dismiss(id), duration);
        }
    });

    move || {
        current.get().map(|toast| {
            let id = toast.id;
            view! {
                <div class=toast.severity.class() role="alert">
                    <span class="toast-message">{toast.message}</span>
                    <button class="toast-close" on:click=move |_| notifier.dismiss(id)>
                        "×"
                    </button>
                </div>
            }
        })
    }
}
