use leptos::prelude::*;

/// Login prompt shown when a logged-out user triggers the create flow.
///
/// `preview` is opaque here; it is carried on the dialog root for the
/// login flow to pick up after the redirect.
#[component]
pub fn PromptLoginModal(
    preview: Option<serde_json::Value>,
    on_submit: Callback<()>,
) -> impl IntoView {
    let preview_attr = preview.map(|p| p.to_string());

    view! {
        <div class="details-container scheduler-login" data-preview=preview_attr>
            <div class="details-header">
                <h3>"Login required"</h3>
            </div>
            <p>
                "Scheduled queries run under your identity. Log in to create "
                "and manage them."
            </p>
            <div class="details-actions" style="display: flex; justify-content: flex-end; margin-top: 16px;">
                <button class="button button--primary" on:click=move |_| on_submit.run(())>
                    "Log in"
                </button>
            </div>
        </div>
    }
}
