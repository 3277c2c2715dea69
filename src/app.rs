//! Application shell: shared services in context, the header, the router and
//! the toast outlet.
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{ApiClient, GlooTransport};
use crate::auth::guard::Access;
use crate::auth::AuthStore;
use crate::components::header::Header;
use crate::components::protected_route::RequireAuth;
use crate::components::toast::ToastView;
use crate::config::AppConfig;
use crate::notify::Notifier;
use crate::pages::{
    add_review::AddReviewPage, admin::AdminPage, home::HomePage, login::LoginPage,
    teacher_detail::TeacherDetailPage, teachers::TeachersPage,
};

/// The client every page pulls from context.
pub type HttpClient = ApiClient<GlooTransport>;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AppConfig::from_env();
    let auth = AuthStore::browser();
    let client: HttpClient = ApiClient::new(GlooTransport::new(config.clone()), auth.clone());

    provide_context(config);
    provide_context(auth);
    provide_context(client.clone());
    provide_context(Notifier::new());

    spawn_local(async move {
        client.revalidate_session().await;
    });

    view! {
        <Title text="Teacher Reviews"/>
        <Router>
            <Header/>
            <main class="container">
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/teachers" view=TeachersPage/>
                    <Route path="/teachers/:id" view=TeacherDetailPage/>
                    <Route
                        path="/teachers/:id/review"
                        view=|| view! {
                            <RequireAuth access=Access::Authenticated>
                                <AddReviewPage/>
                            </RequireAuth>
                        }
                    />
                    <Route path="/login" view=LoginPage/>
                    <Route
                        path="/admin"
                        view=|| view! {
                            <RequireAuth access=Access::AdminOnly>
                                <AdminPage/>
                            </RequireAuth>
                        }
                    />
                    <Route path="/*any" view=|| view! { <Redirect path="/"/> }/>
                </Routes>
            </main>
            <ToastView/>
        </Router>
    }
}
