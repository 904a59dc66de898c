/// Number of mistakes made typing `actual` where `expected` was asked for.
///
/// This is the Levenshtein distance between the two, capped at the length of
/// `expected` so that pasting garbage into one token costs at most that token.
pub fn mistake_count(expected: &str, actual: &str) -> usize {
    if expected == actual {
        return 0;
    }

    strsim::levenshtein(expected, actual).min(expected.chars().count())
}

/// Whether `typed` is a literal prefix of `expected`.
///
/// A deviation anywhere in `typed` makes the whole entry inaccurate.
pub fn is_accurate_prefix(expected: &str, typed: &str) -> bool {
    expected.starts_with(typed)
}
