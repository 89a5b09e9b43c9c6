/// List utilities: ranked free-text filtering and the search input widget.
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Data types a free-text filter can match against.
pub trait Searchable {
    /// Candidate strings the filter is compared with.
    fn search_keys(&self) -> Vec<&str>;
}

// Match quality tiers; higher wins.
const RANK_EXACT: u8 = 4;
const RANK_PREFIX: u8 = 3;
const RANK_CONTAINS: u8 = 2;
const RANK_SUBSEQUENCE: u8 = 1;

/// Rank a single candidate string against a lowercased needle.
fn rank_key(key: &str, needle_lower: &str) -> Option<u8> {
    let key_lower = key.to_lowercase();
    if key_lower == needle_lower {
        Some(RANK_EXACT)
    } else if key_lower.starts_with(needle_lower) {
        Some(RANK_PREFIX)
    } else if key_lower.contains(needle_lower) {
        Some(RANK_CONTAINS)
    } else if is_subsequence(&key_lower, needle_lower) {
        Some(RANK_SUBSEQUENCE)
    } else {
        None
    }
}

/// In-order, not necessarily contiguous character match ("slct" ~ "select").
fn is_subsequence(haystack: &str, needle: &str) -> bool {
    let mut chars = haystack.chars();
    needle.chars().all(|n| chars.any(|h| h == n))
}

/// Filter `items` against a free-text query, best matches first.
///
/// An empty (or whitespace-only) filter returns the list untouched. Items
/// are scored by their best-matching key; ties keep input order.
pub fn rank_filter<T: Searchable>(items: Vec<T>, filter: &str) -> Vec<T> {
    let needle = filter.trim().to_lowercase();
    if needle.is_empty() {
        return items;
    }

    let mut scored: Vec<(usize, u8, T)> = items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| {
            let best = item
                .search_keys()
                .iter()
                .filter_map(|key| rank_key(key, &needle))
                .max()?;
            Some((idx, best, item))
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    scored.into_iter().map(|(_, _, item)| item).collect()
}

/// Search input with debounce and a clear button.
#[component]
pub fn SearchInput(
    /// Current filter value.
    #[prop(into)]
    value: Signal<String>,
    /// Invoked with the new filter value after the debounce window.
    #[prop(into)]
    on_change: Callback<String>,
    /// Placeholder text.
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    // Local pre-debounce state, seeded from the owner's current filter.
    let (input_value, set_input_value) = signal(value.get_untracked());
    let debounce_timeout = StoredValue::new(None::<i32>);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());

        if let Some(timeout_id) = debounce_timeout.get_value() {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(timeout_id);
            }
        }

        let window = match web_sys::window() {
            Some(w) => w,
            None => return,
        };
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
            on_change.run(new_value.clone());
        }) as Box<dyn Fn()>);

        // 300ms: short enough to feel live, long enough to skip keystrokes.
        if let Ok(timeout_id) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref::<js_sys::Function>(),
            300,
        ) {
            debounce_timeout.set_value(Some(timeout_id));
        }
        closure.forget();
    };

    let clear_filter = move |_| {
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input" style="position: relative; display: inline-flex; align-items: center;">
            <input
                type="text"
                style="width: 280px; padding: 6px 32px 6px 10px; border: 1px solid #ddd; border-radius: 4px; font-size: 15px;"
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            {move || {
                if input_value.get().is_empty() {
                    view! { <></> }.into_any()
                } else {
                    view! {
                        <button
                            class="search-input__clear"
                            style="position: absolute; right: 6px; background: none; border: none; cursor: pointer; padding: 4px; color: #666; line-height: 1;"
                            title="Clear"
                            on:click=clear_filter
                        >
                            {crate::shared::icons::icon("x")}
                        </button>
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

    struct Named(&'static str);

    impl Searchable for Named {
        fn search_keys(&self) -> Vec<&str> {
            vec![self.0]
        }
    }

    fn labels(items: Vec<Named>) -> Vec<&'static str> {
        items.into_iter().map(|n| n.0).collect()
    }

    #[test]
    fn empty_filter_returns_everything_in_order() {
        let items = vec![Named("beta"), Named("alpha")];
        assert_eq!(labels(rank_filter(items, "")), vec!["beta", "alpha"]);

        let items = vec![Named("beta"), Named("alpha")];
        assert_eq!(labels(rank_filter(items, "   ")), vec!["beta", "alpha"]);
    }

    #[test]
    fn non_matches_are_dropped() {
        let items = vec![Named("sales by region"), Named("inventory")];
        assert_eq!(labels(rank_filter(items, "sales")), vec!["sales by region"]);
    }

    #[test]
    fn better_matches_rank_first() {
        let items = vec![
            Named("weekly sales"), // contains
            Named("sales"),        // exact
            Named("sales weekly"), // prefix
        ];
        assert_eq!(
            labels(rank_filter(items, "sales")),
            vec!["sales", "sales weekly", "weekly sales"]
        );
    }

    #[test]
    fn subsequence_matches_rank_last() {
        let items = vec![Named("slct"), Named("select count(*)")];
        assert_eq!(
            labels(rank_filter(items, "slct")),
            vec!["slct", "select count(*)"]
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        let items = vec![Named("SELECT * FROM users")];
        assert_eq!(labels(rank_filter(items, "select")).len(), 1);
    }

    #[test]
    fn ties_keep_input_order() {
        let items = vec![Named("sales a"), Named("sales b")];
        assert_eq!(labels(rank_filter(items, "sales")), vec!["sales a", "sales b"]);
    }
}
