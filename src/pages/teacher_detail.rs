use futures::future;
use leptos::logging::error;
use leptos::*;
use leptos_meta::Title;
use leptos_router::{use_params_map, A};
use wasm_bindgen_futures::spawn_local;

use crate::api::ReviewQuery;
use crate::app::HttpClient;
use crate::components::review_card::ReviewCard;
use crate::error::decode_error;
use crate::models::{Review, Teacher};
use crate::notify::Notifier;

fn reviews_query(teacher: u64) -> ReviewQuery {
    ReviewQuery {
        teacher: Some(teacher),
        ordering: Some("-created_at".to_string()),
        ..ReviewQuery::default()
    }
}

#[component]
pub fn TeacherDetailPage() -> impl IntoView {
    let client = store_value(expect_context::<HttpClient>());
    let notifier = expect_context::<Notifier>();
    let params = use_params_map();
    let teacher_id =
        move || params.with(|params| params.get("id").and_then(|id| id.parse::<u64>().ok()));

    let teacher = create_rw_signal(None::<Teacher>);
    let reviews = create_rw_signal(Vec::<Review>::new());
    let loading = create_rw_signal(true);

    create_effect(move |_| {
        let Some(id) = teacher_id() else {
            loading.set(false);
            return;
        };
        let client = client.get_value();
        loading.set(true);
        spawn_local(async move {
            let query = reviews_query(id);
            let (teacher_result, reviews_result) =
                future::join(client.teacher(id), client.list_reviews(&query)).await;
            match teacher_result {
                Ok(loaded) => teacher.set(Some(loaded)),
                Err(err) => {
                    error!("[TEACHER] loading teacher {} failed: {}", id, err);
                    notifier.error(decode_error(&err, &[], "Failed to load teacher").to_string());
                }
            }
            match reviews_result {
                Ok(page) => reviews.set(page.results),
                Err(err) => error!("[TEACHER] loading reviews for {} failed: {}", id, err),
            }
            loading.set(false);
        });
    });

    // Posts the vote, then reloads the list so counts and order are fresh.
    let mark_helpful = move |review_id: u64| {
        let Some(id) = teacher_id() else {
            return;
        };
        let client = client.get_value();
        spawn_local(async move {
            match client.mark_helpful(review_id).await {
                Ok(_) => notifier.success("Thanks for your feedback"),
                Err(err) => {
                    error!("[TEACHER] marking review {} helpful failed: {}", review_id, err);
                    notifier.error(decode_error(&err, &[], "Could not record your vote").to_string());
                    return;
                }
            }
            match client.list_reviews(&reviews_query(id)).await {
                Ok(page) => reviews.set(page.results),
                Err(err) => error!("[TEACHER] reloading reviews for {} failed: {}", id, err),
            }
        });
    };

    view! {
        <Show when=move || !loading.get() fallback=|| view! { <p class="loading">"Loading..."</p> }>
            {move || match teacher.get() {
                None => view! { <p class="empty">"Teacher not found"</p> }.into_view(),
                Some(teacher) => {
                    let review_href = format!("/teachers/{}/review", teacher.id);
                    let subjects = teacher.subjects_display();
                    view! {
                        <Title text=teacher.name.clone()/>
                        <section class="teacher-profile">
                            {teacher.image.clone().map(|src| view! { <img class="teacher-photo" src=src alt=""/> })}
                            <div>
                                <h1>{teacher.name.clone()}</h1>
                                <p class="department">{teacher.department.clone()}</p>
                                {(!subjects.is_empty()).then(|| view! { <p class="subjects">{subjects}</p> })}
                                {(!teacher.bio.is_empty()).then(|| view! { <p class="bio">{teacher.bio.clone()}</p> })}
                                {teacher.detail_url.clone().map(|url| view! {
                                    <a href=url target="_blank" rel="noopener">"Faculty profile"</a>
                                })}
                            </div>
                            <dl class="teacher-ratings">
                                <dt>"Overall"</dt>
                                <dd>{format!("{:.1}", teacher.average_rating)}</dd>
                                <dt>"Difficulty"</dt>
                                <dd>{format!("{:.1}", teacher.difficulty_rating)}</dd>
                                <dt>"Would take again"</dt>
                                <dd>{format!("{:.0}%", teacher.would_take_again_percentage)}</dd>
                                <dt>"Reviews"</dt>
                                <dd>{teacher.total_reviews}</dd>
                            </dl>
                        </section>
                        <A href=review_href class="primary button">"Write a review"</A>
                    }
                    .into_view()
                }
            }}
            <section class="reviews">
                <h2>"Reviews"</h2>
                <Show
                    when=move || reviews.with(|reviews| !reviews.is_empty())
                    fallback=|| view! { <p class="empty">"No reviews yet. Be the first!"</p> }
                >
                    <For
                        each=move || reviews.get()
                        key=|review: &Review| (review.id, review.helpful_count)
                        children=move |review| view! { <ReviewCard review=review on_helpful=mark_helpful/> }
                    />
                </Show>
            </section>
        </Show>
    }
}
