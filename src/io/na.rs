//! Missing-value markers.

/// Cell spellings read as missing.
const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// True when a cell holds one of the conventional missing-value spellings.
pub fn is_na(cell: &str) -> bool {
    NA_VALUES.contains(&cell)
}
