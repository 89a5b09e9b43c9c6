use contracts::domain::scheduled_query::ScheduledQuery;

use crate::shared::list_utils::{rank_filter, Searchable};

/// Grid row. Both cells are driven by the same record: `query` feeds the
/// name/SQL cell, `run` feeds the schedule cell. Rebuilt per render, never
/// stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerRow {
    pub query: ScheduledQuery,
    pub run: ScheduledQuery,
}

impl From<ScheduledQuery> for SchedulerRow {
    fn from(q: ScheduledQuery) -> Self {
        Self {
            query: q.clone(),
            run: q,
        }
    }
}

impl Searchable for ScheduledQuery {
    fn search_keys(&self) -> Vec<&str> {
        let mut keys = vec![self.query.as_str()];
        if let Some(name) = &self.name {
            keys.push(name.as_str());
        }
        keys
    }
}

/// Filter the full list against the search string and project the
/// survivors into rows. Recomputed on every access, so the result is
/// always consistent with current state.
pub fn get_rows(queries: &[ScheduledQuery], search: &str) -> Vec<SchedulerRow> {
    rank_filter(queries.to_vec(), search)
        .into_iter()
        .map(SchedulerRow::from)
        .collect()
}

/// "1 query" / "N queries".
pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 query".to_string()
    } else {
        format!("{count} queries")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(fid: &str, sql: &str, name: Option<&str>) -> ScheduledQuery {
        ScheduledQuery {
            fid: fid.into(),
            query: sql.into(),
            name: name.map(Into::into),
            refresh_interval: 300,
            cron_interval: None,
            requestor: "usr".into(),
        }
    }

    #[test]
    fn empty_search_projects_the_full_list() {
        let queries = vec![
            query("a", "SELECT 1", None),
            query("b", "SELECT 2", Some("two")),
        ];
        let rows = get_rows(&queries, "");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].query.fid, "a");
        // Both cells carry the same record.
        assert_eq!(rows[0].query, rows[0].run);
    }

    #[test]
    fn search_matches_query_text_and_name() {
        let queries = vec![
            query("a", "SELECT * FROM sales", None),
            query("b", "SELECT * FROM users", Some("sales overview")),
            query("c", "SELECT * FROM inventory", None),
        ];

        let rows = get_rows(&queries, "sales");
        let fids: Vec<&str> = rows.iter().map(|r| r.query.fid.as_str()).collect();
        // "b" wins: its name starts with the needle, "a" only contains it.
        assert_eq!(fids, ["b", "a"]);
    }

    #[test]
    fn search_misses_return_no_rows() {
        let queries = vec![query("a", "SELECT 1", None)];
        assert!(get_rows(&queries, "zzzz").is_empty());
    }

    #[test]
    fn count_label_is_singular_for_one() {
        assert_eq!(count_label(0), "0 queries");
        assert_eq!(count_label(1), "1 query");
        assert_eq!(count_label(12), "12 queries");
    }
}
