use regex::Regex;
use tracing::error;

use crate::options::DetectOptions;

/// Translate glob-like filter strings (`*`, `?`) to anchored regexes.
/// Invalid results are logged and skipped.
pub(crate) fn compile_filters(filters: &[String]) -> Vec<Regex> {
    filters
        .iter()
        .filter_map(|filter| match Regex::new(&glob_to_regex(filter)) {
            Ok(re) => Some(re),
            Err(e) => {
                error!("Invalid filter '{}': {}", filter, e);
                None
            }
        })
        .collect()
}

fn glob_to_regex(glob: &str) -> String {
    let mut pattern = String::from("^");
    for c in glob.chars() {
        match c {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            _ => pattern.push_str(&regex::escape(&c.to_string())),
        }
    }
    pattern.push('$');
    pattern
}

/// A filename passes when the filter list is empty or at least one filter
/// matches it.
pub(crate) fn filename_matches(filename: &str, filters: &[Regex]) -> bool {
    filters.is_empty() || filters.iter().any(|re| re.is_match(filename))
}

/// Filenames starting with a dot are hidden unless the dot-file option is
/// set.
pub(crate) fn is_visible(filename: &str, options: DetectOptions) -> bool {
    !filename.starts_with('.') || options.contains(DetectOptions::DOT_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_translation() {
        let filters = compile_filters(&["*.jpg".to_string()]);
        assert!(filename_matches("img.0001.jpg", &filters));
        assert!(!filename_matches("img.0001.exr", &filters));
        // the dot is literal, not a regex wildcard
        assert!(!filename_matches("imgXjpg", &filters));
    }

    #[test]
    fn test_question_mark_matches_one_char() {
        let filters = compile_filters(&["img.?.jpg".to_string()]);
        assert!(filename_matches("img.1.jpg", &filters));
        assert!(!filename_matches("img.10.jpg", &filters));
    }

    #[test]
    fn test_empty_filter_list_passes_everything() {
        assert!(filename_matches("anything", &[]));
    }

    #[test]
    fn test_any_filter_may_match() {
        let filters = compile_filters(&["*.jpg".to_string(), "*.exr".to_string()]);
        assert!(filename_matches("a.exr", &filters));
        assert!(filename_matches("a.jpg", &filters));
        assert!(!filename_matches("a.png", &filters));
    }

    #[test]
    fn test_visibility() {
        assert!(is_visible("img.jpg", DetectOptions::default()));
        assert!(!is_visible(".hidden", DetectOptions::default()));
        assert!(is_visible(
            ".hidden",
            DetectOptions::default() | DetectOptions::DOT_FILE
        ));
    }
}
