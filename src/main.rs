#[cfg(feature = "csr")]
pub fn main() {
    // to run: `trunk serve --open`
    use teacher_review::app::App;
    use teacher_review::utils::panic_hook;

    console_error_panic_hook::set_once();
    panic_hook::init();

    leptos::mount_to_body(App);
}

#[cfg(not(feature = "csr"))]
pub fn main() {
    // no client-side main function without the `csr` feature
}
