use std::collections::BTreeSet;

/// Distinct non-empty values, sorted lexicographically.
///
/// Dedupe is by exact string equality: "animals" and "Animals" are both kept.
pub fn sorted_distinct<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let set: BTreeSet<&str> = values
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect();

    set.into_iter().map(|s| s.to_string()).collect()
}

/// Display name for a category or subcategory id, e.g. "daily_life" -> "Daily Life".
pub fn format_category_name(name: &str) -> String {
    name.split('_')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
