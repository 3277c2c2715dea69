use leptos::*;
use leptos_router::A;

use crate::models::Teacher;

/// Compact teacher summary linking to the detail page.
#[component]
pub fn TeacherCard(teacher: Teacher) -> impl IntoView {
    let href = format!("/teachers/{}", teacher.id);
    let rating = if teacher.total_reviews == 0 {
        "No ratings yet".to_string()
    } else {
        format!("{:.1} / 5", teacher.average_rating)
    };
    let subjects = teacher.subjects_display();

    view! {
        <A href=href class="teacher-card">
            {teacher.image.map(|src| view! { <img class="teacher-avatar" src=src alt=""/> })}
            <div class="teacher-card-body">
                <h3>{teacher.name}</h3>
                <p class="department">{teacher.department}</p>
                {(!subjects.is_empty()).then(|| view! { <p class="subjects">{subjects}</p> })}
                <p class="rating">
                    <span class="rating-value">{rating}</span>
                    <span class="review-count">
                        {format!("{} reviews", teacher.total_reviews)}
                    </span>
                </p>
            </div>
        </A>
    }
}
