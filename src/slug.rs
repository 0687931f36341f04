//! Anchor slug derivation for heading elements.
//!
//! A slug is the heading text lower-cased, with spaces turned into hyphens and
//! everything outside `[A-Za-z0-9_-]` dropped. Slugs are disambiguated per page
//! by [`SlugRegistry`].

use std::collections::{HashMap, HashSet};

/// Convert heading text to a URL-safe anchor slug.
///
/// Algorithm: lowercase the text, map each ASCII space to `-`, and drop every
/// character that is not an ASCII letter, digit, underscore or hyphen. Runs of
/// spaces produce runs of hyphens; nothing is collapsed or trimmed.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c == ' ' {
            slug.push('-');
        } else if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            slug.push(c);
        }
        // all other characters are dropped
    }
    slug
}

/// Hands out unique anchor ids for one page.
///
/// The first occurrence of a slug is bare (e.g. `setup`); subsequent
/// occurrences receive a numeric suffix (`setup-1`, `setup-2`).
#[derive(Debug, Default)]
pub struct SlugRegistry {
    /// Maps base slug → next suffix to try.
    counters: HashMap<String, usize>,
    /// Every id handed out so far.
    taken: HashSet<String>,
}

impl SlugRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a unique id derived from `base`.
    pub fn claim(&mut self, base: &str) -> String {
        if self.taken.insert(base.to_owned()) {
            self.counters.entry(base.to_owned()).or_insert(1);
            return base.to_owned();
        }

        let next = self.counters.entry(base.to_owned()).or_insert(1);
        loop {
            let candidate = format!("{}-{}", base, next);
            *next += 1;
            // `intro-1` may already exist as a literal heading.
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    /// Number of ids handed out.
    pub fn len(&self) -> usize {
        self.taken.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates_spaces() {
        assert_eq!(slugify("Getting Started"), "getting-started");
        assert_eq!(slugify("Intro"), "intro");
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(slugify("What's new? (v2.0)"), "whats-new-v20");
    }

    #[test]
    fn keeps_underscores_and_hyphens() {
        assert_eq!(slugify("snake_case-and-kebab"), "snake_case-and-kebab");
    }

    #[test]
    fn does_not_collapse_consecutive_spaces() {
        assert_eq!(slugify("a  b"), "a--b");
        assert_eq!(slugify(" padded "), "-padded-");
    }

    #[test]
    fn drops_non_ascii_and_other_whitespace() {
        assert_eq!(slugify("Café\tZürich"), "cafzrich");
    }

    #[test]
    fn output_alphabet_is_restricted() {
        let inputs = [
            "Hello, World!",
            "ÀÉÎ õü 123",
            "tabs\tand\nnewlines",
            "<script>alert(1)</script>",
            "  __--  ",
        ];
        for input in inputs {
            let slug = slugify(input);
            assert!(
                slug.chars().all(|c| c.is_ascii_lowercase()
                    || c.is_ascii_digit()
                    || c == '_'
                    || c == '-'),
                "unexpected character in slug {slug:?} for {input:?}"
            );
        }
    }

    #[test]
    fn registry_suffixes_duplicates() {
        let mut reg = SlugRegistry::new();
        assert_eq!(reg.claim("foo"), "foo");
        assert_eq!(reg.claim("foo"), "foo-1");
        assert_eq!(reg.claim("foo"), "foo-2");
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn registry_skips_suffixes_already_taken() {
        let mut reg = SlugRegistry::new();
        assert_eq!(reg.claim("foo-1"), "foo-1");
        assert_eq!(reg.claim("foo"), "foo");
        assert_eq!(reg.claim("foo"), "foo-2");
    }

    #[test]
    fn registry_keeps_first_empty_slug() {
        let mut reg = SlugRegistry::new();
        assert_eq!(reg.claim(""), "");
        assert_eq!(reg.claim(""), "-1");
    }
}
