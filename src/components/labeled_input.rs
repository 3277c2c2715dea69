use leptos::*;

/// A text input with its label. The value is controlled from outside; every
/// keystroke goes to `on_input`.
#[component]
pub fn LabeledInput(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">
                {label}
                {required.then_some(" *")}
            </span>
            <input
                type=input_type
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |e| on_input.call(event_target_value(&e))
            />
        </label>
    }
}
