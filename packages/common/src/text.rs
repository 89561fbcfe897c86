//! Shared text helpers for labels and display names.

/// Turn a machine key into a human-readable label.
///
/// Handles camelCase (`metaTitle` → `Meta Title`), snake_case
/// (`meta_title` → `Meta Title`) and kebab-case (`hero-banner` → `Hero
/// Banner`). Already-spaced input only gets its words capitalized.
pub fn humanize_key(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for ch in key.chars() {
        if ch == '_' || ch == '-' || ch == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else if ch.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
            current.push(ch);
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanizes_camel_case() {
        assert_eq!(humanize_key("metaTitle"), "Meta Title");
        assert_eq!(humanize_key("title"), "Title");
    }

    #[test]
    fn humanizes_snake_and_kebab() {
        assert_eq!(humanize_key("hero_banner"), "Hero Banner");
        assert_eq!(humanize_key("hero-banner"), "Hero Banner");
    }

    #[test]
    fn empty_key_stays_empty() {
        assert_eq!(humanize_key(""), "");
    }
}
