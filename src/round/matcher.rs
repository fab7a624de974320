/// Result of comparing the live input against the target translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Exact,
    Partial,
    Miss,
    Empty,
}

/// Case-insensitive comparison. An exact match wins over the prefix check.
pub fn evaluate(input: &str, translation: &str) -> MatchOutcome {
    if input.is_empty() {
        return MatchOutcome::Empty;
    }

    let input = input.to_lowercase();
    let translation = translation.to_lowercase();

    if input == translation {
        MatchOutcome::Exact
    } else if translation.starts_with(&input) {
        MatchOutcome::Partial
    } else {
        MatchOutcome::Miss
    }
}
