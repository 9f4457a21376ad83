//! Canonicalization of free-text establishment names for deduplication and
//! brand matching. Pure string functions, no I/O.

/// Trailing qualifiers stripped by [`extract_core_name`]. Multi-word entries
/// come first so their single-word tails below cannot preempt them.
pub const CORE_NAME_SUFFIXES: &[&str] = &[
    "shopping centre",
    "shopping center",
    "coffee house",
    "eating house",
    "food court",
    "food centre",
    "pte ltd",
    "restaurant",
    "kopitiam",
    "singapore",
    "express",
    "outlet",
    "bistro",
    "centre",
    "center",
    "plaza",
    "point",
    "mall",
    "cafe",
];

/// Lowercases, drops punctuation (quotes, apostrophes, dashes, brackets)
/// and collapses whitespace runs to single spaces.
pub fn normalize(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// [`normalize`] plus repeated stripping of trailing generic qualifiers,
/// so "Ajisen Ramen Restaurant" and "Ajisen Ramen" match. Never strips a
/// name down to nothing.
pub fn extract_core_name(raw: &str) -> String {
    let mut name = normalize(raw);
    'strip: loop {
        for suffix in CORE_NAME_SUFFIXES {
            if name.len() > suffix.len()
                && name.ends_with(suffix)
                && name.as_bytes()[name.len() - suffix.len() - 1] == b' '
            {
                name.truncate(name.len() - suffix.len());
                let trimmed = name.trim_end().len();
                name.truncate(trimmed);
                continue 'strip;
            }
        }
        break;
    }
    name
}
