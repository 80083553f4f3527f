//! Suspect directory
//!
//! A chained hash table mapping clue text to the suspect it implicates.
//! The bucket count is fixed when the directory is created; each bucket owns
//! a singly linked chain of entries and new keys are prepended to it.

use std::fmt;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Bucket count used unless a case asks for another (a small prime)
pub const DEFAULT_BUCKETS: usize = 101;

/// Seed of the djb2 string hash
pub const HASH_SEED: u64 = 5381;

/// Multiplier of the djb2 string hash
pub const HASH_MULTIPLIER: u64 = 33;

/// djb2 over the UTF-8 bytes of `text`, with wrapping 64-bit arithmetic
pub fn djb2(text: &str) -> u64 {
    text.bytes().fold(HASH_SEED, |hash, byte| {
        hash.wrapping_mul(HASH_MULTIPLIER).wrapping_add(u64::from(byte))
    })
}

/// One `clue -> suspect` association as written in a case file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspectLink {
    pub clue: String,
    pub suspect: String,
}

impl SuspectLink {
    pub fn new(clue: &str, suspect: &str) -> Self {
        Self {
            clue: clue.to_string(),
            suspect: suspect.to_string(),
        }
    }
}

/// Directory construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("The suspect directory needs at least one bucket")]
    ZeroBuckets,
}

type Chain = Option<Box<Entry>>;

struct Entry {
    clue: String,
    suspect: String,
    next: Chain,
}

/// Fixed-size chained hash map from clue text to suspect name
pub struct SuspectDirectory {
    buckets: Vec<Chain>,
    len: usize,
}

impl Default for SuspectDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl SuspectDirectory {
    /// Create an empty directory with [`DEFAULT_BUCKETS`] buckets
    pub fn new() -> Self {
        Self::empty(DEFAULT_BUCKETS)
    }

    /// Create an empty directory with a custom bucket count
    pub fn with_buckets(buckets: usize) -> Result<Self, DirectoryError> {
        if buckets == 0 {
            return Err(DirectoryError::ZeroBuckets);
        }
        Ok(Self::empty(buckets))
    }

    fn empty(buckets: usize) -> Self {
        let mut table = Vec::with_capacity(buckets);
        table.resize_with(buckets, || None);
        Self {
            buckets: table,
            len: 0,
        }
    }

    /// Build a directory from a seed list; later links win on repeated clues.
    pub fn from_links<'a, I>(buckets: usize, links: I) -> Result<Self, DirectoryError>
    where
        I: IntoIterator<Item = &'a SuspectLink>,
    {
        let mut directory = Self::with_buckets(buckets)?;
        for link in links {
            if let Some(previous) = directory.insert_or_update(&link.clue, &link.suspect) {
                debug!(clue = %link.clue, %previous, now = %link.suspect, "clue reassigned");
            }
        }
        Ok(directory)
    }

    /// Bucket that `clue` hashes to
    pub fn hash(&self, clue: &str) -> usize {
        (djb2(clue) % self.buckets.len() as u64) as usize
    }

    /// Associate `clue` with `suspect`, replacing any earlier association.
    ///
    /// Returns the suspect that was replaced, if any.
    pub fn insert_or_update(&mut self, clue: &str, suspect: &str) -> Option<String> {
        let bucket = self.hash(clue);

        let mut cursor = self.buckets[bucket].as_deref_mut();
        while let Some(entry) = cursor {
            if entry.clue == clue {
                return Some(std::mem::replace(&mut entry.suspect, suspect.to_string()));
            }
            cursor = entry.next.as_deref_mut();
        }

        let next = self.buckets[bucket].take();
        self.buckets[bucket] = Some(Box::new(Entry {
            clue: clue.to_string(),
            suspect: suspect.to_string(),
            next,
        }));
        self.len += 1;
        None
    }

    /// Suspect implicated by `clue`, if the directory knows one
    pub fn lookup(&self, clue: &str) -> Option<&str> {
        let mut cursor = self.buckets[self.hash(clue)].as_deref();
        while let Some(entry) = cursor {
            if entry.clue == clue {
                return Some(entry.suspect.as_str());
            }
            cursor = entry.next.as_deref();
        }
        None
    }

    /// Number of associations
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Fixed number of buckets
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Length of the longest bucket chain
    pub fn longest_chain(&self) -> usize {
        self.buckets
            .iter()
            .map(|bucket| chain_iter(bucket.as_deref()).count())
            .max()
            .unwrap_or(0)
    }

    /// All `(clue, suspect)` associations, bucket by bucket
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.buckets
            .iter()
            .flat_map(|bucket| chain_iter(bucket.as_deref()))
            .map(|entry| (entry.clue.as_str(), entry.suspect.as_str()))
    }

    /// Distinct suspect names, sorted alphabetically
    pub fn suspects(&self) -> Vec<&str> {
        let distinct: HashSet<&str> = self.iter().map(|(_, suspect)| suspect).collect();
        let mut names: Vec<&str> = distinct.into_iter().collect();
        names.sort_unstable();
        names
    }

    /// Release every entry of every chain.
    ///
    /// Returns the number of entries released.
    pub fn teardown(mut self) -> usize {
        let released = self.release();
        debug!(released, "suspect directory torn down");
        released
    }

    fn release(&mut self) -> usize {
        let mut released = 0;
        for bucket in &mut self.buckets {
            let mut chain = bucket.take();
            while let Some(mut entry) = chain {
                chain = entry.next.take();
                released += 1;
            }
        }
        self.len = 0;
        released
    }
}

fn chain_iter(head: Option<&Entry>) -> impl Iterator<Item = &Entry> {
    std::iter::successors(head, |entry| entry.next.as_deref())
}

impl Drop for SuspectDirectory {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for SuspectDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuspectDirectory")
            .field("len", &self.len)
            .field("buckets", &self.buckets.len())
            .field("longest_chain", &self.longest_chain())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_djb2_known_values() {
        assert_eq!(djb2(""), 5381);
        // 5381 * 33 + 'a'
        assert_eq!(djb2("a"), 177_670);
        assert_eq!(djb2("ab"), 177_670 * 33 + 98);
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut directory = SuspectDirectory::new();
        assert_eq!(directory.insert_or_update("glove", "Mr. A"), None);
        assert_eq!(directory.insert_or_update("glass", "Mrs. B"), None);

        assert_eq!(directory.lookup("glove"), Some("Mr. A"));
        assert_eq!(directory.lookup("glass"), Some("Mrs. B"));
        assert_eq!(directory.lookup("knife"), None);
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn test_reinsert_overwrites() {
        let mut directory = SuspectDirectory::new();
        directory.insert_or_update("glove", "Mr. A");
        let previous = directory.insert_or_update("glove", "Mrs. B");

        assert_eq!(previous.as_deref(), Some("Mr. A"));
        assert_eq!(directory.lookup("glove"), Some("Mrs. B"));
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.iter().count(), 1);
    }

    #[test]
    fn test_single_bucket_chains_everything() {
        let mut directory = SuspectDirectory::with_buckets(1).unwrap();
        for (clue, suspect) in [("a", "X"), ("b", "Y"), ("c", "X"), ("b", "Z")] {
            directory.insert_or_update(clue, suspect);
        }

        assert_eq!(directory.len(), 3);
        assert_eq!(directory.longest_chain(), 3);
        assert_eq!(directory.lookup("a"), Some("X"));
        assert_eq!(directory.lookup("b"), Some("Z"));
        assert_eq!(directory.lookup("c"), Some("X"));
        // Newest keys sit at the head of the chain
        let clues: Vec<_> = directory.iter().map(|(clue, _)| clue).collect();
        assert_eq!(clues, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_zero_buckets_rejected() {
        assert_eq!(
            SuspectDirectory::with_buckets(0).unwrap_err(),
            DirectoryError::ZeroBuckets
        );
    }

    #[test]
    fn test_from_links_last_wins() {
        let links = vec![
            SuspectLink::new("glove", "Mr. A"),
            SuspectLink::new("knife", "Mr. A"),
            SuspectLink::new("glove", "Dr. C"),
        ];
        let directory = SuspectDirectory::from_links(DEFAULT_BUCKETS, &links).unwrap();
        assert_eq!(directory.lookup("glove"), Some("Dr. C"));
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn test_suspect_roll_call() {
        let links = vec![
            SuspectLink::new("glove", "Mr. A"),
            SuspectLink::new("knife", "Mr. A"),
            SuspectLink::new("letter", "Dr. C"),
            SuspectLink::new("wine", "Mrs. B"),
        ];
        let directory = SuspectDirectory::from_links(7, &links).unwrap();
        assert_eq!(directory.suspects(), vec!["Dr. C", "Mr. A", "Mrs. B"]);
    }

    #[test]
    fn test_teardown_releases_every_entry() {
        let mut directory = SuspectDirectory::with_buckets(3).unwrap();
        for i in 0..50 {
            directory.insert_or_update(&format!("clue {}", i), "X");
        }
        assert_eq!(directory.teardown(), 50);
    }

    #[test]
    fn test_hash_in_range() {
        let directory = SuspectDirectory::with_buckets(13).unwrap();
        for clue in ["", "glove", "Pedaço de tecido", "a much longer clue text"] {
            assert!(directory.hash(clue) < 13);
        }
    }
}
