use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::GlooTransport;
use crate::management::{review_totals, ReviewFilterField, ReviewManager};
use crate::models::course::COURSES;
use crate::models::Review;

#[component]
pub fn ReviewStatsPanel(manager: ReviewManager<GlooTransport>) -> impl IntoView {
    let reviews = manager.reviews();
    let totals = create_memo(move |_| reviews.with(|reviews| review_totals(reviews)));

    view! {
        <div class="stat-cards">
            <div class="stat-card">
                <span class="stat-value">{move || totals.get().reviews}</span>
                <span class="stat-label">"Reviews"</span>
            </div>
            <div class="stat-card">
                <span class="stat-value">{move || format!("{:.1}", totals.get().average_rating)}</span>
                <span class="stat-label">"Average rating"</span>
            </div>
            <div class="stat-card warning">
                <span class="stat-value">{move || totals.get().low_rated}</span>
                <span class="stat-label">"Low ratings"</span>
            </div>
            <div class="stat-card">
                <span class="stat-value">{move || totals.get().teachers}</span>
                <span class="stat-label">"Teachers reviewed"</span>
            </div>
        </div>
    }
}

#[component]
pub fn ReviewFilterBar(manager: ReviewManager<GlooTransport>) -> impl IntoView {
    let filters = manager.filters();
    let manager = store_value(manager);
    let set = move |field: ReviewFilterField| {
        move |e: ev::Event| manager.with_value(|m| m.set_filter(field, event_target_value(&e)))
    };
    let apply = move |_| {
        let manager = manager.get_value();
        spawn_local(async move { manager.apply_filters().await });
    };

    view! {
        <div class="filter-bar">
            <input
                type="number"
                placeholder="Teacher ID"
                prop:value=move || filters.with(|f| f.teacher.clone())
                on:input=move |e| {
                    manager.with_value(|m| m.set_filter(ReviewFilterField::Teacher, event_target_value(&e)))
                }
            />
            <select on:change=set(ReviewFilterField::Course)>
                <option value="">"All courses"</option>
                {COURSES
                    .iter()
                    .map(|&(code, name)| {
                        let selected = move || filters.with(|f| f.course == code);
                        view! { <option value=code selected=selected>{name}</option> }
                    })
                    .collect_view()}
            </select>
            <select on:change=set(ReviewFilterField::MinRating)>
                <option value="">"Any rating"</option>
                {(1..=5u8)
                    .map(|stars| {
                        let value = stars.to_string();
                        let selected = {
                            let value = value.clone();
                            move || filters.with(|f| f.min_rating == value)
                        };
                        view! {
                            <option value=value selected=selected>
                                {format!("{stars}+ stars")}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
            <button on:click=apply>"Filter"</button>
        </div>
    }
}

#[component]
pub fn ReviewList(manager: ReviewManager<GlooTransport>) -> impl IntoView {
    let reviews = manager.reviews();
    let loading = manager.loading();
    let manager = store_value(manager);

    let row = move |review: Review| {
        let viewed = review.clone();
        let deleted = review.clone();
        view! {
            <tr>
                <td>{review.display_title()}</td>
                <td>{review.teacher.name.clone()}</td>
                <td>{review.reviewer.clone()}</td>
                <td>{review.course_label()}</td>
                <td>{review.overall_rating.to_string()}</td>
                <td>{review.helpful_count}</td>
                <td>{review.posted_on().to_string()}</td>
                <td class="actions">
                    <button on:click=move |_| manager.with_value(|m| m.view(viewed.clone()))>
                        "View"
                    </button>
                    <button
                        class="danger"
                        on:click=move |_| {
                            let manager = manager.get_value();
                            let review = deleted.clone();
                            spawn_local(async move {
                                manager.delete(&review).await;
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
        <Show
            when=move || !loading.get()
            fallback=|| view! { <p class="loading">"Loading reviews..."</p> }
        >
            <Show
                when=move || reviews.with(|reviews| !reviews.is_empty())
                fallback=|| view! { <p class="empty">"No reviews found"</p> }
            >
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Title"</th>
                            <th>"Teacher"</th>
                            <th>"Reviewer"</th>
                            <th>"Course"</th>
                            <th>"Overall"</th>
                            <th>"Helpful"</th>
                            <th>"Posted"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For each=move || reviews.get() key=|review: &Review| review.id children=row/>
                    </tbody>
                </table>
            </Show>
        </Show>
    }
}
