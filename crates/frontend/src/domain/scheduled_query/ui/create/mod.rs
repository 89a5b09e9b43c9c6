use leptos::prelude::*;

use super::list::actions::SubmitFn;
use super::query_form::{QueryForm, QueryFormViewModel, ScheduleFields};

/// Create dialog: name, SQL text and schedule controls.
///
/// Submission is delegated to the panel; this dialog only drives the
/// pending call and shows its outcome.
#[component]
pub fn CreateQueryModal(
    /// SQL the form starts with, if any.
    initial_code: Option<String>,
    /// Active SQL dialect key, shown as a caption.
    #[prop(into)]
    dialect: Signal<String>,
    on_submit: SubmitFn,
    on_saved: Callback<()>,
    open_query_page: Callback<()>,
) -> impl IntoView {
    let vm = QueryFormViewModel::new(QueryForm::for_new(initial_code));

    let handle_submit = {
        let on_submit = on_submit.clone();
        move |_| vm.submit(&on_submit, on_saved)
    };

    view! {
        <div class="details-container scheduler-create">
            <div class="details-header">
                <h3>"Create Scheduled Query"</h3>
                <span style="color: #666; font-size: 13px;">
                    {move || format!("Dialect: {}", dialect.get())}
                </span>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <div class="form-group">
                    <label for="query-name">"Name (optional)"</label>
                    <input
                        type="text"
                        id="query-name"
                        placeholder="Shown in the list instead of the SQL"
                        prop:value=move || vm.form.get().name
                        on:input=move |ev| {
                            vm.form.update(|f| f.name = event_target_value(&ev));
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="query-sql">"Query"</label>
                    <textarea
                        id="query-sql"
                        rows="8"
                        placeholder="SELECT * FROM ..."
                        style="font-family: monospace;"
                        prop:value=move || vm.form.get().query
                        on:input=move |ev| {
                            vm.form.update(|f| f.query = event_target_value(&ev));
                        }
                    ></textarea>
                    <button
                        class="link-button"
                        style="background: none; border: none; padding: 0; color: #1976d2; cursor: pointer; font-size: 13px;"
                        on:click=move |_| open_query_page.run(())
                    >
                        "Test this query on the query page"
                    </button>
                </div>

                <ScheduleFields vm=vm/>
            </div>

            <div class="details-actions" style="display: flex; justify-content: flex-end; gap: 8px; margin-top: 16px;">
                <button
                    class="button button--primary"
                    disabled=move || vm.saving.get()
                    on:click=handle_submit
                >
                    {move || if vm.saving.get() { "Scheduling..." } else { "Schedule Query" }}
                </button>
            </div>
        </div>
    }
}
