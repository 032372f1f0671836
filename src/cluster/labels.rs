//! Spreadsheet-column style cluster labels.
//!
//! Bijective base-26: 0 -> "A", 25 -> "Z", 26 -> "AA", 27 -> "AB", ...
//! There is no zero digit, so every label maps back to exactly one index.

/// Encode a zero-based cluster index as a letter label.
pub fn cluster_label(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

/// Decode a letter label back to its zero-based index.
///
/// Returns `None` for an empty label, any character outside `A..=Z`, or a
/// label too long to fit in `usize`.
pub fn cluster_index(label: &str) -> Option<usize> {
    if label.is_empty() {
        return None;
    }
    let mut n: usize = 0;
    for b in label.bytes() {
        if !b.is_ascii_uppercase() {
            return None;
        }
        n = n.checked_mul(26)?.checked_add((b - b'A') as usize + 1)?;
    }
    Some(n - 1)
}
