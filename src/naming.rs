//! Name derivation: output type names, accessor names, singular forms.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_IDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9]").expect("valid regex"));

/// `"widget part"` → `"WidgetPart"`: capitalize each whitespace-delimited
/// word, then drop everything outside `[A-Za-z0-9]`.
pub fn type_name(title: &str) -> String {
    NON_IDENT.replace_all(&ucwords(title), "").into_owned()
}

/// `"created_at"` → `"CreatedAt"`. Runs of `_`/`-` collapse; the rest of each
/// segment is kept as written.
pub fn accessor_name(property: &str) -> String {
    let mut out = String::with_capacity(property.len());
    let mut upper_next = true;
    for ch in property.chars() {
        if ch == '_' || ch == '-' {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

pub fn getter_name(accessor: &str) -> String { format!("get{accessor}") }
pub fn setter_name(accessor: &str) -> String { format!("set{accessor}") }
pub fn adder_name(accessor: &str) -> String { format!("add{accessor}") }

/// Drop one trailing `s`: `items` → `item`, `Tags` → `Tag`.
///
/// Heuristic only. Words ending in `ss` and words without a trailing `s` come
/// back unchanged, and irregular plurals are not handled (`categories` →
/// `categorie`, `people` → `people`).
pub fn singularize(name: &str) -> &str {
    match name.strip_suffix(['s', 'S']) {
        Some(stem) if !stem.is_empty() && !stem.ends_with(['s', 'S']) => stem,
        _ => name,
    }
}

fn ucwords(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars() {
        if at_word_start && !ch.is_whitespace() {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = ch.is_whitespace();
    }
    out
}
