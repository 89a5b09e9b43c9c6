use contracts::domain::scheduled_query::ScheduledQuery;

/// Dialog state of the scheduler panel.
///
/// A single value, so at most one dialog can be open; the preview dialog
/// exists only while this is `Preview(_)` and is unmounted on close, never
/// hidden.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SchedulerModal {
    #[default]
    Closed,
    Create,
    LoginPrompt,
    Preview(ScheduledQuery),
}

impl SchedulerModal {
    /// State on mount: pre-filled code opens the create flow immediately,
    /// routed through the login gate like any other create trigger.
    pub fn initial(logged_in: bool, has_initial_code: bool) -> Self {
        if has_initial_code {
            Self::open_create(logged_in)
        } else {
            Self::Closed
        }
    }

    /// The create trigger: the form for authenticated users, the login
    /// prompt otherwise.
    pub fn open_create(logged_in: bool) -> Self {
        if logged_in {
            Self::Create
        } else {
            Self::LoginPrompt
        }
    }

    /// Row click in the grid.
    pub fn open_preview(query: ScheduledQuery) -> Self {
        Self::Preview(query)
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(fid: &str) -> ScheduledQuery {
        ScheduledQuery {
            fid: fid.into(),
            query: "SELECT 1".into(),
            name: None,
            refresh_interval: 60,
            cron_interval: None,
            requestor: "usr".into(),
        }
    }

    #[test]
    fn create_trigger_gates_on_login() {
        assert_eq!(SchedulerModal::open_create(true), SchedulerModal::Create);
        assert_eq!(
            SchedulerModal::open_create(false),
            SchedulerModal::LoginPrompt
        );
    }

    #[test]
    fn initial_code_opens_create_flow_on_mount() {
        assert_eq!(SchedulerModal::initial(true, true), SchedulerModal::Create);
        assert_eq!(
            SchedulerModal::initial(false, true),
            SchedulerModal::LoginPrompt
        );
        assert_eq!(SchedulerModal::initial(true, false), SchedulerModal::Closed);
    }

    #[test]
    fn row_click_selects_the_query() {
        let state = SchedulerModal::open_preview(query("usr:1"));
        match &state {
            SchedulerModal::Preview(q) => assert_eq!(q.fid, "usr:1"),
            other => panic!("expected preview, got {other:?}"),
        }
        assert!(state.is_open());
        assert!(!SchedulerModal::Closed.is_open());
    }
}
