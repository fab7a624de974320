use std::{fmt::Display, sync::Arc};

#[derive(Debug, PartialEq, Eq)]
pub struct WordPair {
    term: Arc<str>,
    translation: Arc<str>,
}

impl WordPair {
    pub fn new(term: &str, translation: &str) -> Self {
        Self {
            term: term.into(),
            translation: translation.into(),
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }
}

// Pairs are drawn on every match, keep the clone to two reference count bumps
impl Clone for WordPair {
    fn clone(&self) -> Self {
        Self {
            term: Arc::clone(&self.term),
            translation: Arc::clone(&self.translation),
        }
    }
}

impl Display for WordPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", &self.term, &self.translation)
    }
}
