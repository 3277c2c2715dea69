//! Admin table of teachers with edit and delete actions.
use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::GlooTransport;
use crate::management::{teacher_totals, TeacherManager};
use crate::models::Teacher;

#[component]
pub fn TeacherStatsPanel(manager: TeacherManager<GlooTransport>) -> impl IntoView {
    let teachers = manager.teachers();
    let totals = create_memo(move |_| teachers.with(|teachers| teacher_totals(teachers)));

    view! {
        <div class="stat-cards">
            <div class="stat-card">
                <span class="stat-value">{move || totals.get().teachers}</span>
                <span class="stat-label">"Teachers"</span>
            </div>
            <div class="stat-card">
                <span class="stat-value">{move || totals.get().reviews}</span>
                <span class="stat-label">"Reviews"</span>
            </div>
            <div class="stat-card">
                <span class="stat-value">{move || format!("{:.1}", totals.get().average_rating)}</span>
                <span class="stat-label">"Average rating"</span>
            </div>
        </div>
    }
}

#[component]
pub fn TeacherList(manager: TeacherManager<GlooTransport>) -> impl IntoView {
    let teachers = manager.teachers();
    let loading = manager.loading();
    let manager = store_value(manager);

    let open_editor = move |teacher: Option<Teacher>| {
        let manager = manager.get_value();
        spawn_local(async move { manager.open_editor(teacher).await });
    };

    let row = move |teacher: Teacher| {
        let edited = teacher.clone();
        let deleted = teacher.clone();
        view! {
            <tr>
                <td>{teacher.name.clone()}</td>
                <td>{teacher.department.clone()}</td>
                <td>{teacher.subjects_display()}</td>
                <td>{format!("{:.1}", teacher.average_rating)}</td>
                <td>{teacher.total_reviews}</td>
                <td class="actions">
                    <button on:click=move |_| open_editor(Some(edited.clone()))>"Edit"</button>
                    <button
                        class="danger"
                        on:click=move |_| {
                            let manager = manager.get_value();
                            let teacher = deleted.clone();
                            spawn_local(async move {
                                manager.delete(&teacher).await;
                            });
                        }
                    >
                        "Delete"
                    </button>
                </td>
            </tr>
        }
    };

    view! {
        <div class="toolbar">
            <button class="primary" on:click=move |_| open_editor(None)>"Add teacher"</button>
        </div>
        <Show
            when=move || !loading.get()
            fallback=|| view! { <p class="loading">"Loading teachers..."</p> }
        >
            <Show
                when=move || teachers.with(|teachers| !teachers.is_empty())
                fallback=|| view! { <p class="empty">"No teachers yet"</p> }
            >
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Department"</th>
                            <th>"Subjects"</th>
                            <th>"Average"</th>
                            <th>"Reviews"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For each=move || teachers.get() key=|teacher: &Teacher| teacher.id children=row/>
                    </tbody>
                </table>
            </Show>
        </Show>
    }
}
