// Patient module
// Structured intake fields and their validation

mod case;
mod concern;

pub use case::{PatientCase, MAX_AGE, MIN_AGE};
pub use concern::{Comorbidity, PrimaryConcern};

/// Normalize free-form label text for comparison
///
/// Lowercases and collapses every run of non-alphanumeric characters into a
/// single `-`, so "Depression/Mood Disorder", "depression mood disorder" and
/// "depression-mood-disorder" all compare equal.
pub(crate) fn normalize_label(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("Depression/Mood Disorder"), "depression-mood-disorder");
        assert_eq!(normalize_label("  ADHD Only "), "adhd-only");
        assert_eq!(normalize_label("suicidal_ideation"), "suicidal-ideation");
        assert_eq!(normalize_label("--"), "");
    }
}
