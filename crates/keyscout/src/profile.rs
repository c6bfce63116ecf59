//! Column profiling: distinct value extraction and format classification.

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::FormatThresholds;
use crate::dataset::Dataset;

// Format patterns compiled once on first use.

static NUMERIC_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}-\d{2}-\d{2}").unwrap(), // ISO date
        Regex::new(r"\d{2}/\d{2}/\d{4}").unwrap(),  // FR/US date
    ]
});

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{9,15}$").unwrap());

static ALPHANUMERIC_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());

/// The distinct, non-empty values of one column within one dataset.
///
/// Values keep their original (untrimmed) text and first-seen order, which
/// keeps sample selection and tie-breaking deterministic.
pub type ColumnValueSet = IndexSet<String>;

/// Value-format classification for a column.
///
/// The four flags are independent: an all-digit column of 10-character
/// values is both `numeric` and `phone`, for instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FormatSignature {
    /// Values are digit-only.
    pub numeric: bool,
    /// Values start with an ISO date or contain a DD/MM/YYYY date.
    pub date: bool,
    /// Values are 9 to 15 digits.
    pub phone: bool,
    /// Values are letters and digits only.
    pub alphanumeric: bool,
}

/// Everything the scorer needs to know about one column.
#[derive(Debug, Clone)]
pub struct ColumnProfile {
    /// Column name as it appears in the export.
    pub name: String,
    /// Distinct non-empty values.
    pub values: ColumnValueSet,
    /// Format classification of those values.
    pub format: FormatSignature,
    /// Number of rows analyzed (denominator for uniqueness).
    pub row_count: usize,
}

/// Extracts and classifies column values.
#[derive(Debug, Clone, Default)]
pub struct ColumnProfiler {
    thresholds: FormatThresholds,
}

impl ColumnProfiler {
    /// Create a profiler with the given classification thresholds.
    pub fn new(thresholds: FormatThresholds) -> Self {
        Self { thresholds }
    }

    /// Profile one column, looking at most `max_rows` rows when set.
    pub fn profile(
        &self,
        dataset: &Dataset,
        column: &str,
        max_rows: Option<usize>,
    ) -> ColumnProfile {
        let row_count = max_rows
            .map(|cap| dataset.row_count().min(cap))
            .unwrap_or_else(|| dataset.row_count());
        let values = self.extract_values(dataset, column, max_rows);
        let format = self.classify_format(&values);

        ColumnProfile {
            name: column.to_string(),
            values,
            format,
            row_count,
        }
    }

    /// Collect the distinct non-empty values of a column.
    ///
    /// A value missing from a row or blank after trimming is skipped; kept
    /// values are stored untrimmed, exactly as exported.
    pub fn extract_values(
        &self,
        dataset: &Dataset,
        column: &str,
        max_rows: Option<usize>,
    ) -> ColumnValueSet {
        let mut values = ColumnValueSet::new();
        let limit = max_rows.unwrap_or(usize::MAX);
        for row in dataset.rows().iter().take(limit) {
            let Some(raw) = row.get(column) else { continue };
            if raw.trim().is_empty() {
                continue;
            }
            values.insert(raw.clone());
        }
        values
    }

    /// Classify the format of a value set.
    ///
    /// Each flag is set when the fraction of matching values exceeds its
    /// threshold. An empty set yields all flags false.
    pub fn classify_format(&self, values: &ColumnValueSet) -> FormatSignature {
        if values.is_empty() {
            return FormatSignature::default();
        }

        let total = values.len() as f64;
        let fraction = |matched: usize| matched as f64 / total;

        let numeric = values.iter().filter(|v| NUMERIC_PATTERN.is_match(v)).count();
        let date = values
            .iter()
            .filter(|v| DATE_PATTERNS.iter().any(|p| p.is_match(v)))
            .count();
        let phone = values.iter().filter(|v| PHONE_PATTERN.is_match(v)).count();
        let alphanumeric = values
            .iter()
            .filter(|v| ALPHANUMERIC_PATTERN.is_match(v))
            .count();

        FormatSignature {
            numeric: fraction(numeric) > self.thresholds.numeric,
            date: fraction(date) > self.thresholds.date,
            phone: fraction(phone) > self.thresholds.phone,
            alphanumeric: fraction(alphanumeric) > self.thresholds.alphanumeric,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Row;

    fn make_dataset(column: &str, values: &[&str]) -> Dataset {
        Dataset::new(
            values
                .iter()
                .map(|v| Row::from_iter([(column.to_string(), v.to_string())]))
                .collect(),
        )
    }

    fn value_set(values: &[&str]) -> ColumnValueSet {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_extract_skips_blank_values() {
        let dataset = make_dataset("id", &["TX100", "  ", "", "TX101", "TX100"]);
        let profiler = ColumnProfiler::default();
        let values = profiler.extract_values(&dataset, "id", None);

        assert_eq!(values, value_set(&["TX100", "TX101"]));
    }

    #[test]
    fn test_extract_keeps_original_text() {
        let dataset = make_dataset("id", &[" TX100 "]);
        let profiler = ColumnProfiler::default();
        let values = profiler.extract_values(&dataset, "id", None);

        assert!(values.contains(" TX100 "));
        assert!(!values.contains("TX100"));
    }

    #[test]
    fn test_extract_skips_missing_column() {
        let dataset = make_dataset("id", &["TX100"]);
        let profiler = ColumnProfiler::default();
        let values = profiler.extract_values(&dataset, "montant", None);

        assert!(values.is_empty());
    }

    #[test]
    fn test_extract_honors_row_cap() {
        let dataset = make_dataset("id", &["a1", "b2", "c3", "d4"]);
        let profiler = ColumnProfiler::default();
        let values = profiler.extract_values(&dataset, "id", Some(2));

        assert_eq!(values, value_set(&["a1", "b2"]));
    }

    #[test]
    fn test_classify_numeric_column() {
        let profiler = ColumnProfiler::default();
        let sig = profiler.classify_format(&value_set(&["100", "2500", "37", "40000", "5"]));

        assert!(sig.numeric);
        assert!(sig.alphanumeric); // digits are alphanumeric too
        assert!(!sig.date);
    }

    #[test]
    fn test_classify_date_column() {
        let profiler = ColumnProfiler::default();
        let sig = profiler.classify_format(&value_set(&[
            "2024-01-15",
            "2024-02-20 10:30:00",
            "15/03/2024",
            "not a date",
        ]));

        assert!(sig.date);
        assert!(!sig.numeric);
    }

    #[test]
    fn test_classify_phone_column() {
        let profiler = ColumnProfiler::default();
        let sig = profiler.classify_format(&value_set(&[
            "237690112233",
            "237677445566",
            "237699887766",
        ]));

        assert!(sig.phone);
        assert!(sig.numeric);
    }

    #[test]
    fn test_classify_mixed_column_below_thresholds() {
        let profiler = ColumnProfiler::default();
        let sig = profiler.classify_format(&value_set(&["100", "REF-1", "ok", "12/12/2024"]));

        assert!(!sig.numeric);
        assert!(!sig.phone);
        assert!(!sig.alphanumeric);
        assert!(!sig.date);
    }

    #[test]
    fn test_classify_empty_set_all_false() {
        let profiler = ColumnProfiler::default();
        let sig = profiler.classify_format(&ColumnValueSet::new());

        assert_eq!(sig, FormatSignature::default());
    }

    #[test]
    fn test_profile_row_count_with_cap() {
        let dataset = make_dataset("id", &["a1", "b2", "c3"]);
        let profiler = ColumnProfiler::default();

        assert_eq!(profiler.profile(&dataset, "id", None).row_count, 3);
        assert_eq!(profiler.profile(&dataset, "id", Some(2)).row_count, 2);
        assert_eq!(profiler.profile(&dataset, "id", Some(10)).row_count, 3);
    }
}
