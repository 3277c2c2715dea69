use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::GlooTransport;
use crate::management::UserManager;
use crate::models::{Role, User};

#[component]
pub fn UserStatsPanel(manager: UserManager<GlooTransport>) -> impl IntoView {
    let stats = manager.stats();

    move || {
        stats.get().map(|stats| {
            view! {
                <div class="stat-cards">
                    <div class="stat-card">
                        <span class="stat-value">{stats.total_users}</span>
                        <span class="stat-label">"Users"</span>
                    </div>
                    <div class="stat-card">
                        <span class="stat-value">{stats.active_users}</span>
                        <span class="stat-label">"Active"</span>
                    </div>
                    <div class="stat-card">
                        <span class="stat-value">{stats.student_count}</span>
                        <span class="stat-label">"Students"</span>
                    </div>
                    <div class="stat-card">
                        <span class="stat-value">{stats.admin_count}</span>
                        <span class="stat-label">"Administrators"</span>
                    </div>
                </div>
            }
        })
    }
}

#[component]
pub fn UserFilterBar(manager: UserManager<GlooTransport>) -> impl IntoView {
    let filters = manager.filters();
    let manager = store_value(manager);

    let set_role = move |e: ev::Event| {
        let role = event_target_value(&e).parse::<Role>().ok();
        manager.with_value(|m| m.set_role_filter(role));
    };
    let apply = move |_| {
        let manager = manager.get_value();
        spawn_local(async move { manager.apply_filters().await });
    };

    view! {
        <div class="filter-bar">
            <select on:change=set_role>
                <option value="">"All roles"</option>
                {[Role::Student, Role::Admin]
                    .into_iter()
                    .map(|role| {
                        let selected = move || filters.with(|f| f.role == Some(role));
                        view! { <option value=role.as_str() selected=selected>{role.label()}</option> }
                    })
                    .collect_view()}
            </select>
            <input
                type="search"
                placeholder="Username, name or email"
                prop:value=move || filters.with(|f| f.search.clone())
                on:input=move |e| manager.with_value(|m| m.set_search(event_target_value(&e)))
            />
            <button on:click=apply>"Filter"</button>
        </div>
    }
}

#[component]
pub fn UserList(manager: UserManager<GlooTransport>) -> impl IntoView {
    let users = manager.users();
    let loading = manager.loading();
    let manager = store_value(manager);

    let open_editor = move |user: Option<User>| {
        let manager = manager.get_value();
        spawn_local(async move { manager.open_editor(user).await });
    };

    let row = move |user: User| {
        let edited = user.clone();
        let deleted = user.clone();
        view! {
            <tr class:inactive=!user.is_active>
                <td>{user.username.clone()}</td>
                <td>{user.full_name()}</td>
                <td>{user.email.clone()}</td>
                <td>{user.role.label()}</td>
                <td>{user.student_id.clone().unwrap_or_default()}</td>
                <td>{if user.is_active { "Active" } else { "Disabled" }}</td>
                <td>{user.joined_on()}</td>
                <td class="actions">
                    <button on:click=move |_| open_editor(Some(edited.clone()))>"Edit"</button>
                    <button
                        class="danger"
                        on:click=move |_| {
                            let manager = manager.get_value();
                            let user = deleted.clone();
                            spawn_local(async move {
                                manager.delete(&user).await;
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
            <button class="primary" on:click=move |_| open_editor(None)>"Add user"</button>
        </div>
        <Show
            when=move || !loading.get()
            fallback=|| view! { <p class="loading">"Loading users..."</p> }
        >
            <Show
                when=move || users.with(|users| !users.is_empty())
                fallback=|| view! { <p class="empty">"No users found"</p> }
            >
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Username"</th>
                            <th>"Name"</th>
                            <th>"Email"</th>
                            <th>"Role"</th>
                            <th>"Student ID"</th>
                            <th>"Status"</th>
                            <th>"Joined"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For each=move || users.get() key=|user: &User| user.id children=row/>
                    </tbody>
                </table>
            </Show>
        </Show>
    }
}
