use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Dialects whose connector embeds an inline schedule editor.
///
/// For these the scheduler panel hides its separate "Create Scheduled Query"
/// flow; the connector surface owns creation instead.
pub static SQL_DIALECTS_USING_EDITOR: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "athena",
        "clickhouse",
        "impala",
        "mariadb",
        "mssql",
        "mysql",
        "oracle",
        "postgres",
        "redshift",
        "sqlite",
    ]
    .into_iter()
    .collect()
});

/// Whether `dialect` belongs to the inline-editor set.
pub fn uses_inline_editor(dialect: &str) -> bool {
    SQL_DIALECTS_USING_EDITOR.contains(dialect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_dialects_use_inline_editor() {
        assert!(uses_inline_editor("postgres"));
        assert!(uses_inline_editor("mysql"));
    }

    #[test]
    fn unknown_dialects_fall_back_to_separate_flow() {
        assert!(!uses_inline_editor("csv"));
        assert!(!uses_inline_editor(""));
        // Lookup is exact, not case-folded.
        assert!(!uses_inline_editor("Postgres"));
    }
}
