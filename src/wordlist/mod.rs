//! Wordlists and candidate hostname generation.
//!
//! A [`Wordlist`] is an ordered, cleaned list of subdomain labels. Candidates
//! are produced lazily from it, one `label.domain` per label, in wordlist
//! order. Iterating twice yields the same sequence, so a wordlist can be
//! reused for re-scans.

mod builtin;

use std::path::Path;
use std::sync::Arc;

use log::info;

use crate::config::WordlistSource;
use crate::error_handling::ScanError;

pub use builtin::{DEFAULT_LABELS, QUICK_LABELS};

/// A hypothesized subdomain hostname awaiting resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate(String);

impl Candidate {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered list of subdomain labels. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Wordlist {
    labels: Arc<[String]>,
}

impl Wordlist {
    /// Wraps labels that are already clean. No filtering or dedup is applied.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses wordlist text: one label per line, trimmed and lowercased;
    /// blank lines and lines starting with `#` are skipped.
    pub fn parse(text: &str) -> Self {
        Self::from_labels(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_ascii_lowercase),
        )
    }

    /// Reads and parses a wordlist file.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::Wordlist` if the file cannot be read or contains
    /// no labels.
    pub async fn load(path: &Path) -> Result<Self, ScanError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ScanError::Wordlist(format!("failed to read {}: {e}", path.display())))?;
        let wordlist = Self::parse(&text);
        if wordlist.is_empty() {
            return Err(ScanError::Wordlist(format!(
                "{} contains no labels",
                path.display()
            )));
        }
        info!("Loaded {} words from {}", wordlist.len(), path.display());
        Ok(wordlist)
    }

    /// Resolves a configured source into a wordlist.
    pub async fn from_source(source: &WordlistSource) -> Result<Self, ScanError> {
        match source {
            WordlistSource::File(path) => Self::load(path).await,
            WordlistSource::BuiltIn => {
                info!("Using built-in wordlist ({} entries)", DEFAULT_LABELS.len());
                Ok(Self::built_in())
            }
            WordlistSource::BuiltInQuick => {
                info!("Using quick wordlist ({} entries)", QUICK_LABELS.len());
                Ok(Self::quick())
            }
        }
    }

    pub fn built_in() -> Self {
        Self::from_labels(DEFAULT_LABELS.iter().copied())
    }

    pub fn quick() -> Self {
        Self::from_labels(QUICK_LABELS.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// Lazy candidate sequence for one wordlist and domain.
///
/// Owns its inputs, so it can be handed to the concurrency gate without
/// borrowing the caller's wordlist.
#[derive(Debug, Clone)]
pub struct Candidates {
    labels: Arc<[String]>,
    domain: String,
    next: usize,
}

impl Iterator for Candidates {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        let label = self.labels.get(self.next)?;
        self.next += 1;
        Some(Candidate(format!("{}.{}", label, self.domain)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.labels.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Candidates {}

/// Produces `label + "." + domain` for every label, in wordlist order.
pub fn candidates(wordlist: &Wordlist, domain: &str) -> Candidates {
    Candidates {
        labels: Arc::clone(&wordlist.labels),
        domain: domain.to_string(),
        next: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;

    #[test]
    fn test_candidates_in_wordlist_order() {
        let wordlist = Wordlist::from_labels(["www", "mail", "bogus"]);
        let names: Vec<String> = candidates(&wordlist, "example.com")
            .map(Candidate::into_string)
            .collect();
        assert_eq!(
            names,
            ["www.example.com", "mail.example.com", "bogus.example.com"]
        );
    }

    #[test]
    fn test_candidates_restartable() {
        let wordlist = Wordlist::from_labels(["a", "b"]);
        let first: Vec<Candidate> = candidates(&wordlist, "example.com").collect();
        let second: Vec<Candidate> = candidates(&wordlist, "example.com").collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_candidates_keep_duplicates() {
        let wordlist = Wordlist::from_labels(["www", "www"]);
        assert_eq!(candidates(&wordlist, "example.com").count(), 2);
    }

    #[test]
    fn test_candidates_size_hint() {
        let wordlist = Wordlist::from_labels(["a", "b", "c"]);
        let mut iter = candidates(&wordlist, "example.com");
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
    }

    #[test]
    fn test_parse_cleans_lines() {
        let wordlist = Wordlist::parse("www\n\n  Mail  \n# comment\n\t\napi\r\n");
        assert_eq!(wordlist.labels(), ["www", "mail", "api"]);
    }

    #[test]
    fn test_built_in_lists() {
        assert!(Wordlist::quick().len() < Wordlist::built_in().len());
        assert!(Wordlist::built_in().labels().iter().any(|l| l == "www"));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "www\n# skip\nmail\n").expect("write");
        let wordlist = Wordlist::load(file.path()).await.expect("loads");
        assert_eq!(wordlist.labels(), ["www", "mail"]);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_error() {
        let result = Wordlist::load(Path::new("/definitely/not/here.txt")).await;
        assert!(matches!(result, Err(ScanError::Wordlist(_))));
    }

    #[tokio::test]
    async fn test_load_empty_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "# only comments\n\n").expect("write");
        assert!(Wordlist::load(file.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_from_source_built_in() {
        let quick = Wordlist::from_source(&WordlistSource::BuiltInQuick)
            .await
            .expect("built-in");
        assert_eq!(quick.len(), QUICK_LABELS.len());
    }

    proptest! {
        #[test]
        fn test_candidate_count_matches_cleaned_lines(
            labels in prop::collection::vec("[a-z0-9]{1,12}", 0..200),
            domain in "[a-z]{3,12}\\.(com|net|org)"
        ) {
            let text = labels.join("\n");
            let wordlist = Wordlist::parse(&text);
            let generated: Vec<Candidate> = candidates(&wordlist, &domain).collect();
            prop_assert_eq!(generated.len(), labels.len());
            for (candidate, label) in generated.iter().zip(&labels) {
                prop_assert_eq!(candidate.as_str(), format!("{}.{}", label, domain));
            }
        }
    }
}
