//! Directory matching for path-segment ignore tokens.

use std::collections::HashSet;

/// Directories whose path contains `segment`, with descendants of an
/// already-matched directory collapsed away.
///
/// Matching is a case-insensitive substring search over the whole path, with
/// `\` and `/` treated alike. Candidates are visited shortest first; a
/// candidate is skipped when the text before its match was already recorded,
/// which means a parent directory with the same prefix is in the result.
/// Returned paths keep their original spelling minus trailing separators.
pub fn match_directories<S: AsRef<str>>(segment: &str, directories: &[S]) -> Vec<String> {
    let needle = normalize(segment);

    let mut candidates: Vec<(&str, String)> = directories
        .iter()
        .filter_map(|dir| {
            let path = dir.as_ref();
            let normalized = normalize(path);
            normalized
                .find(&needle)
                .map(|index| (path, normalized[..index].to_owned()))
        })
        .collect();
    candidates.sort_by_key(|(path, _)| path.len());

    let mut seen_prefixes = HashSet::new();
    let mut matched = Vec::new();
    for (path, prefix) in candidates {
        if seen_prefixes.insert(prefix) {
            matched.push(path.trim_end_matches(['\\', '/']).to_owned());
        }
    }

    matched
}

/// Wrap `path` in double quotes when it contains whitespace.
pub fn quote_spaces(path: &str) -> String {
    if path.contains(char::is_whitespace) {
        format!("\"{path}\"")
    } else {
        path.to_owned()
    }
}

/// Inverse of [`quote_spaces`].
pub fn unquote(path: &str) -> &str {
    path.strip_prefix('"')
        .and_then(|p| p.strip_suffix('"'))
        .unwrap_or(path)
}

/// ASCII case folding and separator unification. Byte offsets are preserved,
/// so an index into the normalized text is valid for the original.
fn normalize(path: &str) -> String {
    path.chars()
        .map(|c| match c {
            '\\' => '/',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}
