use leptos::*;

#[component]
pub fn Pagination(
    #[prop(into)] page: Signal<u32>,
    #[prop(into)] total_pages: Signal<u64>,
    #[prop(into)] on_change: Callback<u32>,
) -> impl IntoView {
    let at_start = move || page.get() <= 1;
    let at_end = move || u64::from(page.get()) >= total_pages.get();

    view! {
        <nav class="pagination">
            <button
                disabled=at_start
                on:click=move |_| on_change.call(page.get_untracked().saturating_sub(1).max(1))
            >
                "Previous"
            </button>
            <span class="page-indicator">
                {move || format!("Page {} of {}", page.get(), total_pages.get())}
            </span>
            <button disabled=at_end on:click=move |_| on_change.call(page.get_untracked() + 1)>
                "Next"
            </button>
        </nav>
    }
}
