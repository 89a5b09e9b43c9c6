use contracts::domain::scheduled_query::ScheduledQuery;
use leptos::prelude::*;

use super::list::actions::SubmitFn;
use super::query_form::{QueryForm, QueryFormViewModel, ScheduleFields};
use crate::shared::components::sql_viewer::SqlBlock;
use crate::shared::icons::icon;

/// Preview dialog for an existing schedule: highlighted SQL with an edit
/// toggle, editable schedule, save and delete.
///
/// Mounted only while a query is selected, so every opening starts from
/// the selected record, never from leftover form state.
#[component]
pub fn PreviewModal(
    query: ScheduledQuery,
    /// Authenticated identity; logged-out viewers get a login action
    /// instead of save/delete.
    #[prop(into)]
    requestor: Signal<Option<String>>,
    on_login: Callback<()>,
    on_save: SubmitFn,
    on_saved: Callback<()>,
    on_delete: Callback<String>,
    open_query_page: Callback<()>,
) -> impl IntoView {
    let vm = QueryFormViewModel::new(QueryForm::for_existing(&query));
    let fid = query.fid.clone();
    let title = query.name.clone().unwrap_or_else(|| "Scheduled query".to_string());

    let (editing, set_editing) = signal(false);

    let handle_save = {
        let on_save = on_save.clone();
        move |_| vm.submit(&on_save, on_saved)
    };

    let handle_delete = move |_| on_delete.run(fid.clone());

    let copy_sql = move |_| {
        if let Some(window) = web_sys::window() {
            let clipboard = window.navigator().clipboard();
            let _ = clipboard.write_text(&vm.form.get_untracked().query);
        }
    };

    view! {
        <div class="details-container scheduler-preview">
            <div class="details-header">
                <h3>{title}</h3>
                <button
                    class="link-button"
                    style="background: none; border: none; padding: 0; color: #1976d2; cursor: pointer; font-size: 13px;"
                    on:click=move |_| open_query_page.run(())
                >
                    "Open the query page"
                </button>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <div class="form-group">
                    <div style="display: flex; justify-content: space-between; align-items: center;">
                        <label>"Query"</label>
                        <span style="display: inline-flex; gap: 8px;">
                            <button
                                class="button button--secondary"
                                title="Copy SQL"
                                on:click=copy_sql
                            >
                                {icon("copy")}
                            </button>
                            <button
                                class="button button--secondary"
                                on:click=move |_| set_editing.update(|e| *e = !*e)
                            >
                                {move || if editing.get() { "Done" } else { "Edit" }}
                            </button>
                        </span>
                    </div>
                    {move || {
                        if editing.get() {
                            view! {
                                <textarea
                                    rows="8"
                                    style="font-family: monospace; width: 100%;"
                                    prop:value=move || vm.form.get().query
                                    on:input=move |ev| {
                                        vm.form.update(|f| f.query = event_target_value(&ev));
                                    }
                                ></textarea>
                            }
                                .into_any()
                        } else {
                            view! { <SqlBlock sql=vm.form.get().query/> }.into_any()
                        }
                    }}
                </div>

                <ScheduleFields vm=vm/>
            </div>

            {move || {
                if requestor.get().is_some() {
                    let handle_save = handle_save.clone();
                    let handle_delete = handle_delete.clone();
                    view! {
                        <div
                            class="details-actions"
                            style="display: flex; justify-content: space-between; margin-top: 16px;"
                        >
                            <button
                                class="button button--secondary button--danger"
                                on:click=handle_delete
                            >
                                {icon("trash")}
                                "Delete"
                            </button>
                            <button
                                class="button button--primary"
                                disabled=move || vm.saving.get()
                                on:click=handle_save
                            >
                                {move || if vm.saving.get() { "Saving..." } else { "Save" }}
                            </button>
                        </div>
                    }
                        .into_any()
                } else {
                    view! {
                        <div class="details-actions" style="margin-top: 16px;">
                            <p style="color: #666;">
                                "Log in to edit or delete this scheduled query."
                            </p>
                            <button
                                class="button button--primary"
                                on:click=move |_| on_login.run(())
                            >
                                "Log in"
                            </button>
                        </div>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
