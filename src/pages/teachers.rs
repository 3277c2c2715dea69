use leptos::logging::error;
use leptos::*;
use leptos_meta::Title;
use wasm_bindgen_futures::spawn_local;

use crate::api::query::non_empty;
use crate::api::TeacherQuery;
use crate::app::HttpClient;
use crate::components::pagination::Pagination;
use crate::components::teacher_card::TeacherCard;
use crate::config::AppConfig;
use crate::error::decode_error;
use crate::models::{Page, Teacher};
use crate::notify::Notifier;

const ORDERINGS: [(&str, &str); 4] = [
    ("-average_rating", "Highest rated"),
    ("-total_reviews", "Most reviewed"),
    ("name", "Name"),
    ("-difficulty_rating", "Most demanding"),
];

/// Applies a filter change; any filter change starts again from page one.
fn refine(query: &mut TeacherQuery, change: impl FnOnce(&mut TeacherQuery)) {
    change(query);
    query.page = Some(1);
}

#[component]
pub fn TeachersPage() -> impl IntoView {
    let client = expect_context::<HttpClient>();
    let notifier = expect_context::<Notifier>();
    let per_page = expect_context::<AppConfig>().browse_page_size;

    let query = create_rw_signal(TeacherQuery {
        page: Some(1),
        page_size: Some(per_page),
        ordering: Some(ORDERINGS[0].0.to_string()),
        ..TeacherQuery::default()
    });
    let search = create_rw_signal(String::new());
    let results = create_rw_signal(None::<Page<Teacher>>);
    let loading = create_rw_signal(true);

    create_effect(move |_| {
        let current = query.get();
        let client = client.clone();
        loading.set(true);
        spawn_local(async move {
            match client.list_teachers(&current).await {
                Ok(page) => results.set(Some(page)),
                Err(err) => {
                    error!("[TEACHERS] browsing failed: {}", err);
                    notifier.error(decode_error(&err, &[], "Failed to load teachers").to_string());
                }
            }
            loading.set(false);
        });
    });

    let page = Signal::derive(move || query.with(|q| q.page.unwrap_or(1)));
    let total_pages = Signal::derive(move || {
        results.with(|page| page.as_ref().map_or(1, |page| page.total_pages(per_page)))
    });

    let apply_search = move || {
        let text = search.get_untracked();
        query.update(|q| refine(q, |q| q.search = non_empty(&text)));
    };

    view! {
        <Title text="Teachers"/>
        <h1>"Teachers"</h1>
        <form
            class="filter-bar"
            on:submit=move |ev: ev::SubmitEvent| {
                ev.prevent_default();
                apply_search();
            }
        >
            <input
                type="search"
                placeholder="Search by name or subject"
                prop:value=move || search.get()
                on:input=move |e| search.set(event_target_value(&e))
            />
            <select on:change=move |e| {
                let min_rating = event_target_value(&e).parse::<f64>().ok();
                query.update(|q| refine(q, |q| q.min_rating = min_rating));
            }>
                <option value="">"Any rating"</option>
                <option value="4">"4+ stars"</option>
                <option value="3">"3+ stars"</option>
                <option value="2">"2+ stars"</option>
            </select>
            <select on:change=move |e| {
                let ordering = non_empty(&event_target_value(&e));
                query.update(|q| refine(q, |q| q.ordering = ordering));
            }>
                {ORDERINGS
                    .iter()
                    .map(|&(value, label)| view! { <option value=value>{label}</option> })
                    .collect_view()}
            </select>
            <button type="submit">"Search"</button>
        </form>
        <Show when=move || !loading.get() fallback=|| view! { <p class="loading">"Loading..."</p> }>
            {move || {
                results
                    .with(|page| page.as_ref().map(|page| page.count))
                    .map(|count| view! { <p class="result-count">{format!("{count} teachers")}</p> })
            }}
            <div class="teacher-grid">
                <For
                    each=move || results.with(|page| page.as_ref().map(|page| page.results.clone()).unwrap_or_default())
                    key=|teacher: &Teacher| teacher.id
                    children=|teacher| view! { <TeacherCard teacher=teacher/> }
                />
            </div>
        </Show>
        <Pagination
            page=page
            total_pages=total_pages
            on_change=move |next: u32| query.update(|q| q.page = Some(next))
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_change_resets_page() {
        let mut query = TeacherQuery {
            page: Some(4),
            ..TeacherQuery::default()
        };
        refine(&mut query, |q| q.search = Some("王".into()));
        assert_eq!(query.page, Some(1));
        assert_eq!(query.search.as_deref(), Some("王"));
    }

    /// Fields the teacher list endpoint can sort on.
    const SORTABLE_FIELDS: [&str; 4] = ["average_rating", "difficulty_rating", "total_reviews", "name"];

    #[test]
    fn test_every_ordering_is_sortable() {
        for (ordering, _) in ORDERINGS {
            let field = ordering.trim_start_matches('-');
            assert!(SORTABLE_FIELDS.contains(&field), "{ordering} is not sortable");
        }
    }
}
