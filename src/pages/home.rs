use futures::future;
use leptos::logging::error;
use leptos::*;
use leptos_meta::Title;
use leptos_router::A;
use wasm_bindgen_futures::spawn_local;

use crate::api::TeacherQuery;
use crate::app::HttpClient;
use crate::components::teacher_card::TeacherCard;
use crate::models::{Teacher, TeacherStats};

const TOP_TEACHERS: u32 = 8;

#[component]
pub fn HomePage() -> impl IntoView {
    let client = expect_context::<HttpClient>();
    let stats = create_rw_signal(None::<TeacherStats>);
    let top = create_rw_signal(Vec::<Teacher>::new());
    let loading = create_rw_signal(true);

    spawn_local(async move {
        let query = TeacherQuery {
            ordering: Some("-average_rating".to_string()),
            page_size: Some(TOP_TEACHERS),
            ..TeacherQuery::default()
        };
        let (stats_result, top_result) =
            future::join(client.teacher_stats(), client.list_teachers(&query)).await;

        match stats_result {
            Ok(loaded) => stats.set(Some(loaded)),
            Err(err) => error!("[HOME] loading stats failed: {}", err),
        }
        match top_result {
            Ok(page) => top.set(page.results),
            Err(err) => error!("[HOME] loading top teachers failed: {}", err),
        }
        loading.set(false);
    });

    view! {
        <Title text="Teacher Reviews"/>
        <section class="hero">
            <h1>"Find out what a course is really like"</h1>
            <p>"Honest reviews of teachers, written by the students who took their courses."</p>
            <A href="/teachers" class="primary button">"Browse teachers"</A>
        </section>
        {move || {
            stats.get().map(|stats| {
                view! {
                    <section class="stat-cards">
                        <div class="stat-card">
                            <span class="stat-value">{stats.total_teachers}</span>
                            <span class="stat-label">"Teachers"</span>
                        </div>
                        <div class="stat-card">
                            <span class="stat-value">{stats.total_reviews}</span>
                            <span class="stat-label">"Reviews"</span>
                        </div>
                        <div class="stat-card">
                            <span class="stat-value">{format!("{:.1}", stats.average_rating)}</span>
                            <span class="stat-label">"Average rating"</span>
                        </div>
                    </section>
                }
            })
        }}
        <section class="top-teachers">
            <h2>"Top rated"</h2>
            <Show when=move || !loading.get() fallback=|| view! { <p class="loading">"Loading..."</p> }>
                <div class="teacher-grid">
                    <For
                        each=move || top.get()
                        key=|teacher: &Teacher| teacher.id
                        children=|teacher| view! { <TeacherCard teacher=teacher/> }
                    />
                </div>
            </Show>
        </section>
    }
}
