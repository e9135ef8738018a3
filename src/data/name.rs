use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::model::DatasetName;

/// A parenthesised run of digits with at most one decimal point: `(2)`, `(2.5)`.
static NUMBER_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d+(?:\.\d+)?)\)").expect("Invalid regex pattern"));

/// A real file extension: `csv`, `txt`, `dpt`. Not the `5)` of `Amostra (2.5)`.
static EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("Invalid regex pattern"));

/// Derive the dataset name of a file.
///
/// The file stem is cut at its first underscore. A parenthesised number in
/// the remaining text is normalised to `"<text before it> (<n>)"` and anything
/// after it is dropped. When the kept part has no such number but the part
/// cut off at the underscore does, that number is appended instead, so
/// `sample_run1(2).txt` and `sample (2).txt` name the same dataset.
pub fn extract_dataset_name(path: impl AsRef<Path>) -> DatasetName {
    let stem = file_stem(path.as_ref());

    let (head, tail) = match stem.split_once('_') {
        Some((head, tail)) => (head, tail),
        None => (stem.as_str(), ""),
    };

    if let Some(caps) = NUMBER_SUFFIX.captures(head) {
        let start = caps.get(0).map_or(0, |m| m.start());
        return with_number(&head[..start], &caps[1]);
    }

    match NUMBER_SUFFIX.captures(tail) {
        Some(caps) => with_number(head, &caps[1]),
        None => DatasetName::new(head.trim()),
    }
}

/// The file name without its extension. A trailing dot segment that is not
/// alphanumeric belongs to the name.
fn file_stem(path: &Path) -> String {
    let has_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| EXTENSION.is_match(e));
    let stem = if has_extension {
        path.file_stem()
    } else {
        path.file_name()
    };
    stem.map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
}

fn with_number(base: &str, number: &str) -> DatasetName {
    DatasetName::new(format!("{} ({number})", base.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(path: &str) -> String {
        extract_dataset_name(path).to_string()
    }

    #[test]
    fn plain_stem() {
        assert_eq!(name("/data/PET film.csv"), "PET film");
    }

    #[test]
    fn truncates_at_first_underscore() {
        assert_eq!(name("polyethylene_2024_run3.txt"), "polyethylene");
    }

    #[test]
    fn normalises_parenthesised_suffix() {
        assert_eq!(name("Amostra(2).txt"), "Amostra (2)");
        assert_eq!(name("Amostra   (2.5) extra.txt"), "Amostra (2.5)");
        assert_eq!(name("Amostra (3)_absorbance.csv"), "Amostra (3)");
    }

    #[test]
    fn keeps_copy_number_after_underscore() {
        assert_eq!(name("sample_run1(2).txt"), "sample (2)");
    }

    #[test]
    fn decimal_suffix_is_not_an_extension() {
        assert_eq!(name("Amostra (2.5).txt"), "Amostra (2.5)");
        assert_eq!(name("Amostra (2.5)"), "Amostra (2.5)");
        assert_eq!(name("PET film.dpt"), "PET film");
    }

    #[test]
    fn ignores_non_numeric_parentheses() {
        assert_eq!(name("sample (a).txt"), "sample (a)");
        assert_eq!(name("sample (1.2.3).txt"), "sample (1.2.3)");
    }

    #[test]
    fn is_idempotent() {
        for raw in [
            "sample_run1(2).txt",
            "Amostra   (3) extra.txt",
            "Amostra (2.5).txt",
            "sample (1.2.3).txt",
            "plain.csv",
            "  padded  .txt",
        ] {
            let once = name(raw);
            assert_eq!(name(&once), once, "input {raw}");
        }
    }
}
