#![cfg(target_arch = "wasm32")]

use leptos::*;
use serde_json::json;
use teacher_review::components::review_card::ReviewCard;
use teacher_review::components::tag_chips::TagChips;
use teacher_review::models::Review;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn review_with_tags(tags: serde_json::Value) -> Review {
    serde_json::from_value(json!({
        "id": 1,
        "teacher": 4,
        "teacher_name": "王老师",
        "course": "OOP",
        "content": "讲解清楚，课堂互动多",
        "overall_rating": 5,
        "difficulty_rating": 2,
        "tags": tags
    }))
    .unwrap()
}

fn container(id: &str) -> web_sys::HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let container = document
        .create_element("div")
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();
    container.set_id(id);
    document.body().unwrap().append_child(&container).unwrap();
    container
}

fn chip_texts(container: &web_sys::HtmlElement) -> Vec<String> {
    let chips = container.query_selector_all(".tag-chip").unwrap();
    (0..chips.length())
        .filter_map(|i| chips.item(i))
        .filter_map(|node| node.text_content())
        .collect()
}

#[wasm_bindgen_test]
fn test_joined_and_list_tags_render_the_same_chips() {
    let joined = review_with_tags(json!("认真负责, 讲解清楚"));
    let list = review_with_tags(json!(["认真负责", "讲解清楚"]));

    let joined_container = container("joined-tags");
    let joined_tags = joined.tags.clone();
    mount_to(joined_container.clone(), move || view! { <TagChips tags=joined_tags/> });

    let list_container = container("list-tags");
    let list_tags = list.tags.clone();
    mount_to(list_container.clone(), move || view! { <TagChips tags=list_tags/> });

    assert_eq!(chip_texts(&joined_container), vec!["认真负责", "讲解清楚"]);
    assert_eq!(chip_texts(&joined_container), chip_texts(&list_container));
}

#[wasm_bindgen_test]
fn test_review_card_uses_the_same_chips() {
    let review = review_with_tags(json!("认真负责,讲解清楚"));
    let card = container("review-card");
    mount_to(card.clone(), move || {
        view! { <ReviewCard review=review on_helpful=|_: u64| {}/> }
    });

    assert_eq!(chip_texts(&card), vec!["认真负责", "讲解清楚"]);
}

#[wasm_bindgen_test]
fn test_no_tags_render_nothing() {
    let empty = container("no-tags");
    mount_to(empty.clone(), || view! { <TagChips tags=Vec::new()/> });

    assert!(chip_texts(&empty).is_empty());
}
