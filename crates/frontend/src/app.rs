use std::sync::Arc;

use contracts::domain::scheduled_query::ScheduledQuery;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::domain::scheduled_query::model::{self, SessionInfo};
use crate::domain::scheduled_query::ui::list::actions::BackendMutation;
use crate::domain::scheduled_query::ui::list::SchedulerList;

const DEFAULT_DIALECT: &str = "postgres";

/// Application shell: owns the query list and session state and wires the
/// scheduler panel's callback props to the HTTP model layer.
#[component]
pub fn App() -> impl IntoView {
    let (queries, set_queries) = signal(Vec::<ScheduledQuery>::new());
    let (load_error, set_load_error) = signal(None::<String>);
    let (session, set_session) = signal(None::<SessionInfo>);

    let fetch_queries = move || {
        spawn_local(async move {
            match model::fetch_scheduled_queries().await {
                Ok(list) => {
                    set_queries.set(list);
                    set_load_error.set(None);
                }
                Err(e) => set_load_error.set(Some(e)),
            }
        });
    };

    // The panel is mounted only once the session is known: its mount-time
    // decisions (auto-opening the create flow) depend on the requestor.
    spawn_local(async move {
        match model::fetch_session().await {
            Ok(info) => set_session.set(Some(info)),
            Err(e) => {
                log::warn!("session lookup failed: {e}");
                set_session.set(Some(SessionInfo::default()));
            }
        }
    });
    fetch_queries();

    let requestor = Signal::derive(move || session.get().and_then(|s| s.requestor));
    let dialect = Signal::derive(move || {
        session
            .get()
            .and_then(|s| s.dialect)
            .unwrap_or_else(|| DEFAULT_DIALECT.to_string())
    });

    let initial_code = initial_code_from_url();

    let refresh_queries = Callback::new(move |_: ()| fetch_queries());
    let open_login = Callback::new(|_: ()| navigate_to("/login"));
    let open_query_page = Callback::new(|_: ()| navigate_to("/query"));

    let create_query: BackendMutation = Arc::new(|payload| {
        Box::pin(async move { model::create_scheduled_query(&payload).await })
    });
    let update_query: BackendMutation = Arc::new(|payload| {
        Box::pin(async move { model::update_scheduled_query(&payload).await })
    });
    let delete_query = Callback::new(move |fid: String| {
        spawn_local(async move {
            if let Err(e) = model::delete_scheduled_query(&fid).await {
                log::warn!("scheduled query delete failed: {e}");
            }
            fetch_queries();
        });
    });

    view! {
        <main class="page scheduler-page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"Scheduled Queries"</h1>
                </div>
            </div>

            {move || load_error.get().map(|e| view! {
                <div class="warning-box">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <Show when=move || session.get().is_some()>
                <SchedulerList
                    queries=queries
                    requestor=requestor
                    dialect=dialect
                    initial_code=initial_code.clone()
                    preview=None
                    refresh_queries=refresh_queries
                    open_login=open_login
                    open_query_page=open_query_page
                    create_scheduled_query=create_query.clone()
                    update_scheduled_query=update_query.clone()
                    delete_scheduled_query=delete_query
                />
            </Show>
        </main>
    }
}

fn navigate_to(path: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(path);
    }
}

/// SQL handed over from the query page via the `code` URL parameter; it
/// auto-opens the create flow on mount.
fn initial_code_from_url() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let query = search.trim_start_matches('?');
    if query.is_empty() {
        return None;
    }
    let params = web_sys::UrlSearchParams::new_with_str(query).ok()?;
    params.get("code").filter(|code| !code.trim().is_empty())
}
