use leptos::prelude::*;

/// One-line SQL rendering for grid cells; overflow is ellipsized by CSS.
#[component]
pub fn SqlSnippet(#[prop(into)] sql: String) -> impl IntoView {
    let html = highlight_sql(&sql);
    view! {
        <code
            class="sql-snippet ellipsis"
            style="display: block; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;"
            inner_html=html
        ></code>
    }
}

/// Block SQL rendering for the preview dialog.
#[component]
pub fn SqlBlock(#[prop(into)] sql: String) -> impl IntoView {
    let html = highlight_sql(&sql);
    view! {
        <pre class="sql-block" style="white-space: pre-wrap; margin: 0;">
            <code inner_html=html></code>
        </pre>
    }
}

/// Render SQL as HTML with keyword/function/string/number spans.
///
/// Single pass over the text: string literals are consumed whole, words are
/// classified against the keyword tables, everything is HTML-escaped on the
/// way out.
pub fn highlight_sql(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len() + sql.len() / 2);
    let mut chars = sql.chars().peekable();

    while let Some(&ch) = chars.peek() {
        if ch == '\'' {
            chars.next();
            let mut literal = String::from("'");
            let mut prev = '\'';
            for c in chars.by_ref() {
                literal.push(c);
                if c == '\'' && prev != '\\' {
                    break;
                }
                prev = c;
            }
            out.push_str("<span class=\"sql-string\">");
            push_escaped(&mut out, &literal);
            out.push_str("</span>");
        } else if ch.is_ascii_digit() {
            let mut number = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_ascii_digit() || c == '.' {
                    number.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            out.push_str("<span class=\"sql-number\">");
            out.push_str(&number);
            out.push_str("</span>");
        } else if ch.is_alphabetic() || ch == '_' {
            let mut word = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_alphanumeric() || c == '_' {
                    word.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            let lower = word.to_lowercase();
            if KEYWORDS.contains(&lower.as_str()) {
                out.push_str("<span class=\"sql-keyword\">");
                push_escaped(&mut out, &word);
                out.push_str("</span>");
            } else if FUNCTIONS.contains(&lower.as_str()) {
                out.push_str("<span class=\"sql-function\">");
                push_escaped(&mut out, &word);
                out.push_str("</span>");
            } else {
                push_escaped(&mut out, &word);
            }
        } else {
            let mut buf = [0u8; 4];
            push_escaped(&mut out, ch.encode_utf8(&mut buf));
            chars.next();
        }
    }

    out
}

const KEYWORDS: &[&str] = &[
    "select", "from", "where", "group", "order", "by", "having", "left", "right", "inner",
    "outer", "full", "cross", "join", "on", "and", "or", "as", "in", "between", "is", "null",
    "not", "like", "distinct", "limit", "offset", "union", "all", "case", "when", "then",
    "else", "end", "insert", "into", "values", "update", "set", "delete", "with",
];

const FUNCTIONS: &[&str] = &[
    "sum", "count", "avg", "min", "max", "coalesce", "cast", "upper", "lower", "now",
    "date_trunc", "extract",
];

fn push_escaped(out: &mut String, s: &str) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_keywords_and_functions() {
        let html = highlight_sql("SELECT count(id) FROM users");
        assert!(html.contains("<span class=\"sql-keyword\">SELECT</span>"));
        assert!(html.contains("<span class=\"sql-keyword\">FROM</span>"));
        assert!(html.contains("<span class=\"sql-function\">count</span>"));
        assert!(html.contains("users"));
    }

    #[test]
    fn tags_string_literals_whole() {
        let html = highlight_sql("SELECT * FROM t WHERE name = 'O''Brien <admin>'");
        // The literal is one span and its markup-significant chars are escaped.
        assert!(html.contains("<span class=\"sql-string\">"));
        assert!(html.contains("&lt;admin&gt;"));
        assert!(!html.contains("<admin>"));
    }

    #[test]
    fn tags_numbers() {
        let html = highlight_sql("LIMIT 10");
        assert!(html.contains("<span class=\"sql-number\">10</span>"));
    }

    #[test]
    fn escapes_markup_outside_literals() {
        let html = highlight_sql("SELECT a <> b");
        assert!(html.contains("&lt;&gt;"));
    }

    #[test]
    fn keywords_inside_identifiers_stay_plain() {
        let html = highlight_sql("SELECT fromage FROM cheeses");
        assert!(html.contains(">fromage<") || html.contains("fromage"));
        assert!(!html.contains("<span class=\"sql-keyword\">fromage</span>"));
    }
}
