mod word_pair;

use rand::{thread_rng, Rng};
use std::fs;

use crate::error::Error;

pub use self::word_pair::WordPair;

/// The static set of word pairs a round draws from. Never empty.
#[derive(Debug, Clone)]
pub struct Catalog {
    words: Vec<WordPair>,
}

impl Catalog {
    const COMMENT_PREFIX: char = '#';
    const SEPARATOR: char = '\t';

    pub fn new(words: Vec<WordPair>) -> Result<Self, Error> {
        if words.is_empty() {
            Err(Error::EmptyCatalog)
        } else {
            Ok(Catalog { words })
        }
    }

    pub fn built_in() -> Self {
        let words = [
            ("りんご", "apple"),
            ("犬", "dog"),
            ("猫", "cat"),
            ("本", "book"),
            ("水", "water"),
            ("山", "mountain"),
            ("海", "sea"),
            ("花", "flower"),
            ("学校", "school"),
            ("友達", "friend"),
        ]
        .into_iter()
        .map(|(term, translation)| WordPair::new(term, translation))
        .collect();

        Catalog { words }
    }

    /// Reads the catalog file, falling back to the built-in list when it is unusable.
    pub fn load_or_built_in(file_path: &str) -> Self {
        match Catalog::from_file(file_path) {
            Ok(catalog) => {
                log::info!(
                    "Word catalog loaded. File: '{file_path}', Words: '{}'.",
                    catalog.len()
                );
                catalog
            }
            Err(error) => {
                log::error!(
                    "Could not load the word catalog, defaulting to the built-in list of words. File: '{file_path}', Error: '{error}'."
                );
                Catalog::built_in()
            }
        }
    }

    pub fn from_file(file_path: &str) -> Result<Self, Error> {
        let content = fs::read_to_string(file_path)
            .map_err(|error| Error::UnreadableCatalog(file_path.to_string(), error.to_string()))?;
        Catalog::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, Error> {
        let words = content
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with(Catalog::COMMENT_PREFIX))
            .map(|(line_number, line)| match line.split_once(Catalog::SEPARATOR) {
                Some((term, translation))
                    if !term.trim().is_empty() && !translation.trim().is_empty() =>
                {
                    Ok(WordPair::new(term.trim(), translation.trim()))
                }
                _ => Err(Error::MalformedCatalogLine(line_number, line.to_string())),
            })
            .collect::<Result<Vec<WordPair>, Error>>()?;

        Catalog::new(words)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn words(&self) -> &[WordPair] {
        &self.words
    }

    pub fn pick_random(&self) -> WordPair {
        self.pick_random_with(&mut thread_rng())
    }

    pub fn pick_random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> WordPair {
        // The constructors guarantee at least one word, so the range is never empty
        let index = rng.gen_range(0..self.words.len());
        self.words[index].clone()
    }
}
