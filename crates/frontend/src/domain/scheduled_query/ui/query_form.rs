//! Form model shared by the create and preview dialogs.

use contracts::domain::scheduled_query::{ScheduledQuery, ScheduledQueryPayload};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use super::list::actions::SubmitFn;
use crate::shared::schedule_utils::{describe_run, humanize_duration_ms};

/// How the recurrence is specified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScheduleMode {
    #[default]
    Interval,
    Cron,
}

/// Interval presets offered by the frequency selector, in seconds.
pub const INTERVAL_PRESETS: &[(u64, &str)] = &[
    (60, "Every minute"),
    (300, "Every 5 minutes"),
    (900, "Every 15 minutes"),
    (3600, "Every hour"),
    (21_600, "Every 6 hours"),
    (86_400, "Every day"),
    (604_800, "Every week"),
];

const DEFAULT_INTERVAL_SECS: u64 = 3600;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryForm {
    pub fid: Option<String>,
    pub name: String,
    pub query: String,
    pub mode: ScheduleMode,
    pub interval_secs: u64,
    pub cron: String,
}

impl QueryForm {
    /// Blank form for the create dialog, optionally seeded with SQL.
    pub fn for_new(initial_code: Option<String>) -> Self {
        Self {
            query: initial_code.unwrap_or_default(),
            interval_secs: DEFAULT_INTERVAL_SECS,
            ..Default::default()
        }
    }

    /// Form pre-filled from an existing schedule, for the preview dialog.
    pub fn for_existing(q: &ScheduledQuery) -> Self {
        Self {
            fid: Some(q.fid.clone()),
            name: q.name.clone().unwrap_or_default(),
            query: q.query.clone(),
            mode: if q.cron_interval.is_some() {
                ScheduleMode::Cron
            } else {
                ScheduleMode::Interval
            },
            interval_secs: q.refresh_interval,
            cron: q.cron_interval.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.query.trim().is_empty() {
            return Err("A SQL query is required".to_string());
        }
        match self.mode {
            ScheduleMode::Interval if self.interval_secs == 0 => {
                Err("A refresh interval is required".to_string())
            }
            ScheduleMode::Cron if self.cron.trim().is_empty() => {
                Err("A cron expression is required".to_string())
            }
            _ => Ok(()),
        }
    }

    /// Mutation payload; the requestor is stamped later by the panel.
    pub fn to_payload(&self) -> ScheduledQueryPayload {
        let name = self.name.trim();
        ScheduledQueryPayload {
            fid: self.fid.clone(),
            query: self.query.trim().to_string(),
            name: (!name.is_empty()).then(|| name.to_string()),
            refresh_interval: self.interval_secs,
            cron_interval: match self.mode {
                ScheduleMode::Cron => Some(self.cron.trim().to_string()),
                ScheduleMode::Interval => None,
            },
            requestor: None,
        }
    }

    /// Live schedule line shown under the form controls.
    pub fn schedule_summary(&self) -> String {
        match self.mode {
            ScheduleMode::Cron if self.cron.trim().is_empty() => String::new(),
            ScheduleMode::Cron => describe_run(self.interval_secs, Some(self.cron.trim())),
            ScheduleMode::Interval => describe_run(self.interval_secs, None),
        }
    }
}

/// Reactive wrapper driving a form through validation and submission.
#[derive(Clone, Copy)]
pub struct QueryFormViewModel {
    pub form: RwSignal<QueryForm>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
}

impl QueryFormViewModel {
    pub fn new(form: QueryForm) -> Self {
        Self {
            form: RwSignal::new(form),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    /// Validate and hand the payload to the panel's submit delegate.
    ///
    /// The delegate returns `None` for a logged-out no-op; otherwise the
    /// pending call is driven here and `on_saved` fires on success.
    pub fn submit(&self, on_submit: &SubmitFn, on_saved: Callback<()>) {
        let current = self.form.get();
        if let Err(message) = current.validate() {
            self.error.set(Some(message));
            return;
        }

        let pending = match on_submit(current.to_payload()) {
            Some(pending) => pending,
            None => return,
        };

        let error = self.error;
        let saving = self.saving;
        saving.set(true);
        spawn_local(async move {
            match pending.await {
                Ok(_) => {
                    error.set(None);
                    on_saved.run(());
                }
                Err(message) => error.set(Some(message)),
            }
            saving.set(false);
        });
    }
}

/// Schedule controls shared by the create and preview dialogs: a mode
/// toggle, the matching input, and a live summary line.
#[component]
pub fn ScheduleFields(vm: QueryFormViewModel) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>"Schedule"</label>
            <div class="schedule-mode" style="display: flex; gap: 16px; margin-bottom: 8px;">
                <label style="display: inline-flex; align-items: center; gap: 4px;">
                    <input
                        type="radio"
                        name="schedule-mode"
                        prop:checked=move || vm.form.get().mode == ScheduleMode::Interval
                        on:change=move |_| vm.form.update(|f| f.mode = ScheduleMode::Interval)
                    />
                    "Frequency"
                </label>
                <label style="display: inline-flex; align-items: center; gap: 4px;">
                    <input
                        type="radio"
                        name="schedule-mode"
                        prop:checked=move || vm.form.get().mode == ScheduleMode::Cron
                        on:change=move |_| vm.form.update(|f| f.mode = ScheduleMode::Cron)
                    />
                    "Cron expression"
                </label>
            </div>

            {move || match vm.form.get().mode {
                ScheduleMode::Interval => view! {
                    <select
                        prop:value=move || vm.form.get().interval_secs.to_string()
                        on:change=move |ev| {
                            if let Ok(secs) = event_target_value(&ev).parse::<u64>() {
                                vm.form.update(|f| f.interval_secs = secs);
                            }
                        }
                    >
                        {INTERVAL_PRESETS
                            .iter()
                            .map(|(secs, label)| {
                                view! { <option value=secs.to_string()>{*label}</option> }
                            })
                            .collect_view()}
                        {move || {
                            // Existing schedules may carry an interval that
                            // is not a preset; keep it selectable.
                            let current = vm.form.get().interval_secs;
                            if INTERVAL_PRESETS.iter().any(|(secs, _)| *secs == current) {
                                view! { <></> }.into_any()
                            } else {
                                view! {
                                    <option value=current.to_string()>
                                        {format!("Every {}", humanize_duration_ms(current * 1000))}
                                    </option>
                                }
                                    .into_any()
                            }
                        }}
                    </select>
                }
                    .into_any(),
                ScheduleMode::Cron => view! {
                    <input
                        type="text"
                        placeholder="*/5 * * * *"
                        prop:value=move || vm.form.get().cron
                        on:input=move |ev| vm.form.update(|f| f.cron = event_target_value(&ev))
                    />
                }
                    .into_any(),
            }}

            {move || {
                let summary = vm.form.get().schedule_summary();
                if summary.is_empty() {
                    view! { <></> }.into_any()
                } else {
                    view! {
                        <p class="schedule-summary" style="margin: 8px 0 0; color: #666;">
                            <em>{summary}</em>
                        </p>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_existing_picks_cron_mode_when_set() {
        let q = ScheduledQuery {
            fid: "usr:1".into(),
            query: "SELECT 1".into(),
            name: Some("one".into()),
            refresh_interval: 300,
            cron_interval: Some("0 9 * * 1".into()),
            requestor: "usr".into(),
        };
        let form = QueryForm::for_existing(&q);
        assert_eq!(form.mode, ScheduleMode::Cron);
        assert_eq!(form.cron, "0 9 * * 1");
        assert_eq!(form.fid.as_deref(), Some("usr:1"));
    }

    #[test]
    fn validate_requires_sql() {
        let form = QueryForm::for_new(None);
        assert!(form.validate().is_err());

        let form = QueryForm {
            query: "SELECT 1".into(),
            ..QueryForm::for_new(None)
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn validate_requires_cron_in_cron_mode() {
        let form = QueryForm {
            query: "SELECT 1".into(),
            mode: ScheduleMode::Cron,
            ..QueryForm::for_new(None)
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn payload_omits_cron_in_interval_mode() {
        let form = QueryForm {
            query: " SELECT 1 ".into(),
            name: "  ".into(),
            interval_secs: 300,
            cron: "0 9 * * 1".into(),
            ..Default::default()
        };
        let payload = form.to_payload();
        assert_eq!(payload.query, "SELECT 1");
        assert_eq!(payload.name, None);
        assert_eq!(payload.cron_interval, None);
        assert_eq!(payload.refresh_interval, 300);
    }

    #[test]
    fn payload_carries_cron_in_cron_mode() {
        let form = QueryForm {
            query: "SELECT 1".into(),
            mode: ScheduleMode::Cron,
            cron: " */5 * * * * ".into(),
            interval_secs: 60,
            ..Default::default()
        };
        assert_eq!(
            form.to_payload().cron_interval.as_deref(),
            Some("*/5 * * * *")
        );
    }

    #[test]
    fn schedule_summary_tracks_the_mode() {
        let form = QueryForm {
            query: "SELECT 1".into(),
            interval_secs: 300,
            ..Default::default()
        };
        assert_eq!(form.schedule_summary(), "Runs every 5 minutes");

        let form = QueryForm {
            mode: ScheduleMode::Cron,
            cron: "30 5 * * *".into(),
            ..form
        };
        assert_eq!(form.schedule_summary(), "At 05:30");
    }
}
