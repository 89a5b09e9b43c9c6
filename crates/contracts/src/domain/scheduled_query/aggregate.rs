use serde::{Deserialize, Serialize};

// ============================================================================
// Aggregate
// ============================================================================

/// A stored SQL query paired with a recurrence (fixed interval or cron
/// expression) for repeated execution.
///
/// Owned by the scheduling backend; the frontend reads and mutates it only
/// through injected callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledQuery {
    /// Unique id minted by the backend.
    pub fid: String,

    /// Raw SQL text.
    pub query: String,

    /// Optional display name, shown in lists instead of the SQL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Refresh period in seconds. The backend ignores it while a cron
    /// expression is set.
    #[serde(rename = "refreshInterval")]
    pub refresh_interval: u64,

    /// 5-field cron expression; takes precedence over `refresh_interval`.
    #[serde(
        rename = "cronInterval",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cron_interval: Option<String>,

    /// Identity that owns the schedule.
    pub requestor: String,
}

// ============================================================================
// Mutation shapes
// ============================================================================

/// Payload submitted by the create/preview dialogs.
///
/// `fid` is absent on create. `requestor` is stamped by the panel from the
/// authenticated identity, never filled in by a dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledQueryPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fid: Option<String>,

    pub query: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "refreshInterval")]
    pub refresh_interval: u64,

    #[serde(
        rename = "cronInterval",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cron_interval: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requestor: Option<String>,
}

impl ScheduledQueryPayload {
    /// Mutation payload for an existing schedule, seeded from its current
    /// state.
    pub fn from_query(q: &ScheduledQuery) -> Self {
        Self {
            fid: Some(q.fid.clone()),
            query: q.query.clone(),
            name: q.name.clone(),
            refresh_interval: q.refresh_interval,
            cron_interval: q.cron_interval.clone(),
            requestor: None,
        }
    }
}

/// Resolved value of a create/update call.
///
/// A present `error` means the backend accepted the request but refused the
/// mutation; transport failures never reach this shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<ScheduledQuery>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_camel_case_wire_shape() {
        let json = r#"{
            "fid": "usr:42",
            "query": "SELECT * FROM sales",
            "name": "Daily sales",
            "refreshInterval": 3600,
            "cronInterval": "0 9 * * 1",
            "requestor": "usr"
        }"#;

        let q: ScheduledQuery = serde_json::from_str(json).unwrap();
        assert_eq!(q.fid, "usr:42");
        assert_eq!(q.name.as_deref(), Some("Daily sales"));
        assert_eq!(q.refresh_interval, 3600);
        assert_eq!(q.cron_interval.as_deref(), Some("0 9 * * 1"));
        assert_eq!(q.requestor, "usr");
    }

    #[test]
    fn optional_fields_default_to_none() {
        let json = r#"{
            "fid": "usr:7",
            "query": "SELECT 1",
            "refreshInterval": 60,
            "requestor": "usr"
        }"#;

        let q: ScheduledQuery = serde_json::from_str(json).unwrap();
        assert_eq!(q.name, None);
        assert_eq!(q.cron_interval, None);
    }

    #[test]
    fn payload_from_query_keeps_fid_and_clears_requestor() {
        let q = ScheduledQuery {
            fid: "usr:42".into(),
            query: "SELECT 1".into(),
            name: None,
            refresh_interval: 300,
            cron_interval: None,
            requestor: "usr".into(),
        };

        let payload = ScheduledQueryPayload::from_query(&q);
        assert_eq!(payload.fid.as_deref(), Some("usr:42"));
        assert_eq!(payload.requestor, None);
        assert_eq!(payload.refresh_interval, 300);
    }

    #[test]
    fn mutation_response_error_is_optional() {
        let res: MutationResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(res.error, None);

        let res: MutationResponse =
            serde_json::from_str(r#"{"error": "quota exceeded"}"#).unwrap();
        assert_eq!(res.error.as_deref(), Some("quota exceeded"));
    }
}
