pub mod actions;
pub mod rows;
pub mod state;

use std::sync::Arc;

use contracts::domain::scheduled_query::ScheduledQuery;
use contracts::shared::dialect::uses_inline_editor;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use actions::{delete_with_requestor, submit_with_requestor, BackendMutation, SubmitFn};
use rows::{count_label, get_rows};
use state::SchedulerModal;

use super::create::CreateQueryModal;
use super::login::PromptLoginModal;
use super::preview::PreviewModal;
use crate::shared::components::sql_viewer::SqlSnippet;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::modal_frame::ModalFrame;
use crate::shared::schedule_utils::describe_run;

const ROW_HEIGHT: u32 = 84;
const HEADER_HEIGHT: u32 = 32;

/// Scheduled-queries panel: searchable grid plus create/login/preview
/// dialogs. All persistence goes through the injected callbacks; the panel
/// itself owns only the search string and the dialog state.
#[component]
pub fn SchedulerList(
    /// Full unfiltered list of scheduled queries.
    #[prop(into)]
    queries: Signal<Vec<ScheduledQuery>>,
    /// Authenticated identity; `None` while logged out.
    #[prop(into)]
    requestor: Signal<Option<String>>,
    /// Active SQL dialect key.
    #[prop(into)]
    dialect: Signal<String>,
    /// Pre-filled SQL that auto-opens the create flow on mount.
    initial_code: Option<String>,
    /// Opaque payload forwarded to the login prompt.
    preview: Option<serde_json::Value>,
    /// Reload the query list.
    refresh_queries: Callback<()>,
    /// Start the login flow.
    open_login: Callback<()>,
    /// Navigate to the ad-hoc query page.
    open_query_page: Callback<()>,
    /// Backend create call.
    create_scheduled_query: BackendMutation,
    /// Backend update call.
    update_scheduled_query: BackendMutation,
    /// Backend delete call, fire and forget.
    delete_scheduled_query: Callback<String>,
) -> impl IntoView {
    let (search, set_search) = signal(String::new());

    let has_initial_code = initial_code
        .as_deref()
        .is_some_and(|code| !code.trim().is_empty());
    let modal = RwSignal::new(SchedulerModal::initial(
        requestor.get_untracked().is_some(),
        has_initial_code,
    ));

    let close_modal = Callback::new(move |_: ()| modal.set(SchedulerModal::Closed));

    // Escape closes whichever dialog is open. Registered once for the
    // panel's lifetime.
    Effect::new(move |_| {
        let closure = Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
            if event.key() == "Escape" && modal.get_untracked().is_open() {
                modal.set(SchedulerModal::Closed);
            }
        }) as Box<dyn FnMut(_)>);
        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    });

    let submit_create: SubmitFn = {
        let backend = create_scheduled_query.clone();
        Arc::new(move |payload| {
            submit_with_requestor(&backend, payload, requestor.get_untracked().as_deref())
        })
    };
    let submit_update: SubmitFn = {
        let backend = update_scheduled_query.clone();
        Arc::new(move |payload| {
            submit_with_requestor(&backend, payload, requestor.get_untracked().as_deref())
        })
    };

    let on_saved = Callback::new(move |_: ()| {
        modal.set(SchedulerModal::Closed);
        refresh_queries.run(());
    });

    let handle_delete = Callback::new(move |fid: String| {
        let ran = delete_with_requestor(&fid, requestor.get_untracked().as_deref(), |fid| {
            delete_scheduled_query.run(fid)
        });
        if ran {
            modal.set(SchedulerModal::Closed);
        }
    });

    let handle_create_click = move |_| {
        modal.set(SchedulerModal::open_create(
            requestor.get_untracked().is_some(),
        ));
    };

    view! {
        <div class="scheduler">
            <div
                class="scheduler__toolbar"
                style="display: flex; justify-content: space-between; align-items: center; margin: 24px 0;"
            >
                <SearchInput
                    value=search
                    on_change=Callback::new(move |value| set_search.set(value))
                    placeholder="Search scheduled queries..."
                />
                <Show when=move || !uses_inline_editor(&dialect.get())>
                    <button class="button button--primary" on:click=handle_create_click>
                        {icon("plus")}
                        "Create Scheduled Query"
                    </button>
                </Show>
            </div>

            <div
                class="scheduler__meta"
                style="display: flex; justify-content: space-between; align-items: center; margin-bottom: 16px; padding: 0 8px;"
            >
                <span class="scheduler__count">
                    {move || count_label(get_rows(&queries.get(), &search.get()).len())}
                </span>
                <button
                    class="button button--secondary refresh-button"
                    title="Refresh"
                    on:click=move |_| refresh_queries.run(())
                >
                    {icon("refresh")}
                </button>
            </div>

            <div class="table scheduler-table">
                <table class="table__data table--striped" style="width: 100%; border-collapse: collapse;">
                    <thead class="table__head">
                        <tr style=format!("height: {HEADER_HEIGHT}px;")>
                            <th class="table__header-cell">"Query"</th>
                            <th class="table__header-cell">"Schedule"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            get_rows(&queries.get(), &search.get())
                                .into_iter()
                                .map(|row| {
                                    let selected = row.query.clone();
                                    let schedule = describe_run(
                                        row.run.refresh_interval,
                                        row.run.cron_interval.as_deref(),
                                    );
                                    view! {
                                        <tr
                                            class="table__row"
                                            style=format!("height: {ROW_HEIGHT}px; cursor: pointer;")
                                            on:click=move |_| {
                                                modal.set(SchedulerModal::open_preview(selected.clone()))
                                            }
                                        >
                                            <td
                                                class="table__cell table__cell--query"
                                                style="padding: 8px 24px 8px 8px; font-size: 15px; max-width: 0; width: 60%;"
                                            >
                                                {match row.query.name.clone() {
                                                    Some(name) => view! {
                                                        <span
                                                            class="ellipsis"
                                                            style="display: block; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; font-size: 16px;"
                                                        >
                                                            {name}
                                                        </span>
                                                    }
                                                        .into_any(),
                                                    None => view! {
                                                        <SqlSnippet sql=row.query.query.clone()/>
                                                    }
                                                        .into_any(),
                                                }}
                                            </td>
                                            <td class="table__cell table__cell--schedule" style="padding: 8px;">
                                                <em
                                                    class="ellipsis"
                                                    style="display: block; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; font-size: 15px;"
                                                >
                                                    {schedule}
                                                </em>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </div>

            {move || match modal.get() {
                SchedulerModal::Closed => view! { <></> }.into_any(),
                SchedulerModal::Create => {
                    let initial_code = initial_code.clone();
                    let submit = submit_create.clone();
                    view! {
                        <ModalFrame
                            on_close=close_modal
                            modal_class="scheduler-create-modal"
                            modal_style="max-width: min(720px, 95vw); width: min(720px, 95vw);"
                        >
                            <CreateQueryModal
                                initial_code=initial_code
                                dialect=dialect
                                on_submit=submit
                                on_saved=on_saved
                                open_query_page=open_query_page
                            />
                        </ModalFrame>
                    }
                        .into_any()
                }
                SchedulerModal::LoginPrompt => {
                    let preview = preview.clone();
                    view! {
                        <ModalFrame on_close=close_modal modal_class="scheduler-login-modal">
                            <PromptLoginModal preview=preview on_submit=open_login/>
                        </ModalFrame>
                    }
                        .into_any()
                }
                SchedulerModal::Preview(query) => {
                    let submit = submit_update.clone();
                    view! {
                        <ModalFrame
                            on_close=close_modal
                            modal_class="scheduler-preview-modal"
                            modal_style="max-width: min(900px, 95vw); width: min(900px, 95vw);"
                        >
                            <PreviewModal
                                query=query
                                requestor=requestor
                                on_login=open_login
                                on_save=submit
                                on_saved=on_saved
                                on_delete=handle_delete
                                open_query_page=open_query_page
                            />
                        </ModalFrame>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
