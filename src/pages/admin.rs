use std::rc::Rc;

use leptos::*;
use leptos_meta::Title;
use wasm_bindgen_futures::spawn_local;

use crate::app::HttpClient;
use crate::components::review_dialog::ReviewDialog;
use crate::components::review_list::{ReviewFilterBar, ReviewList, ReviewStatsPanel};
use crate::components::teacher_dialog::TeacherDialog;
use crate::components::teacher_list::{TeacherList, TeacherStatsPanel};
use crate::components::user_dialog::UserDialog;
use crate::components::user_list::{UserFilterBar, UserList, UserStatsPanel};
use crate::config::AppConfig;
use crate::management::{Confirm, ReviewManager, TeacherManager, UserManager, WindowConfirm};
use crate::notify::Notifier;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AdminTab {
    Teachers,
    Reviews,
    Users,
}

impl AdminTab {
    const ALL: [AdminTab; 3] = [AdminTab::Teachers, AdminTab::Reviews, AdminTab::Users];

    fn label(self) -> &'static str {
        match self {
            AdminTab::Teachers => "Teachers",
            AdminTab::Reviews => "Reviews",
            AdminTab::Users => "Users",
        }
    }
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let client = expect_context::<HttpClient>();
    let notifier = expect_context::<Notifier>();
    let config = expect_context::<AppConfig>();
    let confirm: Rc<dyn Confirm> = Rc::new(WindowConfirm);

    let teachers = TeacherManager::new(client.clone(), notifier, Rc::clone(&confirm), &config);
    let users = UserManager::new(client.clone(), notifier, Rc::clone(&confirm), &config);

    // Deleting a review changes the teacher's aggregates.
    let reload_teachers = {
        let teachers = store_value(teachers.clone());
        Callback::new(move |_: ()| {
            let teachers = teachers.get_value();
            spawn_local(async move { teachers.load().await });
        })
    };
    let reviews = ReviewManager::new(client, notifier, confirm, &config).on_deleted(reload_teachers);

    {
        let (teachers, reviews, users) = (teachers.clone(), reviews.clone(), users.clone());
        spawn_local(async move {
            teachers.load().await;
            reviews.load().await;
            users.load().await;
            users.load_stats().await;
        });
    }

    let tab = create_rw_signal(AdminTab::Teachers);

    view! {
        <Title text="Administration"/>
        <h1>"Administration"</h1>
        <div class="tabs">
            {AdminTab::ALL
                .into_iter()
                .map(|option| {
                    view! {
                        <button
                            class="tab"
                            class:active=move || tab.get() == option
                            on:click=move |_| tab.set(option)
                        >
                            {option.label()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
        <section class="tab-panel" class:hidden=move || tab.get() != AdminTab::Teachers>
            <TeacherStatsPanel manager=teachers.clone()/>
            <TeacherList manager=teachers.clone()/>
            <TeacherDialog manager=teachers/>
        </section>
        <section class="tab-panel" class:hidden=move || tab.get() != AdminTab::Reviews>
            <ReviewStatsPanel manager=reviews.clone()/>
            <ReviewFilterBar manager=reviews.clone()/>
            <ReviewList manager=reviews.clone()/>
            <ReviewDialog manager=reviews/>
        </section>
        <section class="tab-panel" class:hidden=move || tab.get() != AdminTab::Users>
            <UserStatsPanel manager=users.clone()/>
            <UserFilterBar manager=users.clone()/>
            <UserList manager=users.clone()/>
            <UserDialog manager=users/>
        </section>
    }
}
