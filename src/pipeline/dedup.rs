// Duplicate detection by URL and content hash.
//
// A batch is checked against what storage already holds and against itself.
// Content hashes are SHA-256 over the cleaned content, hex-encoded.

use std::collections::HashSet;

use sha2::{Digest, Sha256};

use crate::db::models::KnownFingerprints;

/// Hex SHA-256 of `content`.
pub fn content_hash(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

/// Tracks every URL and content hash seen so far.
#[derive(Debug, Clone, Default)]
pub struct Deduplicator {
    urls: HashSet<String>,
    content_hashes: HashSet<String>,
}

impl Deduplicator {
    /// Seed with what storage already holds.
    pub fn new(known: KnownFingerprints) -> Self {
        Self {
            urls: known.urls,
            content_hashes: known.content_hashes,
        }
    }

    /// Returns true if the article was seen before; otherwise records it.
    ///
    /// Articles with empty content are matched on URL only, since every one
    /// of them shares the same hash.
    pub fn check_and_record(&mut self, url: &str, content: &str, hash: &str) -> bool {
        let url_seen = self.urls.contains(url);
        let hash_seen = !content.is_empty() && self.content_hashes.contains(hash);
        if url_seen || hash_seen {
            return true;
        }

        self.urls.insert(url.to_string());
        if !content.is_empty() {
            self.content_hashes.insert(hash.to_string());
        }
        false
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
