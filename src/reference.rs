//! Reference wordlists.
//!
//! Well-known password and dictionary lists are downloaded once into a cache
//! directory and then streamed line by line. Failures never reach the
//! pipeline: a list that cannot be fetched or read contributes no words and
//! logs a warning.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// Named lists and their download URLs.
pub const CATALOG: [(&str, &str); 3] = [
    ("rockyou", "https://github.com/brannondorsey/naive-hashcat/releases/download/data/rockyou.txt"),
    (
        "common_passwords",
        "https://raw.githubusercontent.com/danielmiessler/SecLists/master/Passwords/Common-Credentials/10-million-password-list-top-1000000.txt",
    ),
    ("english_words", "https://raw.githubusercontent.com/dwyl/english-words/master/words_alpha.txt"),
];

/// Shortest reference word kept, in characters.
pub const MIN_REFERENCE_LEN: usize = 4;
/// Longest reference word kept, in characters.
pub const MAX_REFERENCE_LEN: usize = 30;

/// Default cache directory for downloaded lists.
pub const DEFAULT_CACHE_DIR: &str = "wordlists";

/// Supplies words from a named reference list.
pub trait ReferenceSource {
    /// At most `max` words from `list`, each `4..=30` characters long.
    fn words(&self, list: &str, max: usize) -> Box<dyn Iterator<Item = String> + '_>;
}

pub fn catalog_url(name: &str) -> Option<&'static str> {
    CATALOG.iter().find(|(n, _)| *n == name).map(|(_, url)| *url)
}

pub fn catalog_names() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|(name, _)| *name)
}

/// Stream trimmed, length-filtered lines from `reader`, at most `max`.
///
/// Invalid UTF-8 is replaced rather than rejected; a read error ends the
/// stream.
pub fn read_reference_lines<R: BufRead>(reader: R, max: usize) -> impl Iterator<Item = String> {
    reader
        .split(b'\n')
        .map_while(|line| line.ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
        .filter(|word| (MIN_REFERENCE_LEN..=MAX_REFERENCE_LEN).contains(&word.chars().count()))
        .take(max)
}

/// Downloads catalog lists into a cache directory on first use.
#[derive(Debug, Clone)]
pub struct CachedDownloader {
    cache_dir: PathBuf,
    timeout: Duration,
}

impl Default for CachedDownloader {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_DIR)
    }
}

impl CachedDownloader {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self { cache_dir: cache_dir.into(), timeout: Duration::from_secs(300) }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn cached_path(&self, name: &str) -> PathBuf {
        self.cache_dir.join(format!("{name}.txt"))
    }

    /// Path of the cached list, downloading it first if needed.
    ///
    /// Returns `Ok(None)` for names outside the catalog.
    pub fn fetch(&self, name: &str) -> Result<Option<PathBuf>> {
        let Some(url) = catalog_url(name) else {
            return Ok(None);
        };

        let path = self.cached_path(name);
        if path.exists() {
            return Ok(Some(path));
        }

        std::fs::create_dir_all(&self.cache_dir).map_err(|e| Error::io(&self.cache_dir, e))?;
        info!(name, url, "downloading reference wordlist");

        let download = |source: reqwest::Error| Error::Download { name: name.to_string(), source };
        let client = reqwest::blocking::Client::builder().timeout(self.timeout).build().map_err(download)?;
        let mut response = client.get(url).send().and_then(|r| r.error_for_status()).map_err(download)?;

        // Written beside the target and renamed, so an interrupted download
        // never leaves a truncated list in the cache.
        let mut temp = NamedTempFile::new_in(&self.cache_dir).map_err(|e| Error::io(&self.cache_dir, e))?;
        response.copy_to(temp.as_file_mut()).map_err(download)?;
        temp.persist(&path).map_err(|e| Error::io(&path, e.error))?;

        info!(name, path = %path.display(), "downloaded reference wordlist");
        Ok(Some(path))
    }
}

impl ReferenceSource for CachedDownloader {
    fn words(&self, list: &str, max: usize) -> Box<dyn Iterator<Item = String> + '_> {
        let path = match self.fetch(list) {
            Ok(Some(path)) => path,
            Ok(None) => {
                warn!(list, known = ?CATALOG.map(|(name, _)| name), "unknown reference wordlist");
                return Box::new(std::iter::empty());
            }
            Err(err) => {
                warn!(list, error = %err, "reference wordlist unavailable");
                return Box::new(std::iter::empty());
            }
        };

        match File::open(&path) {
            Ok(file) => Box::new(read_reference_lines(BufReader::new(file), max)),
            Err(err) => {
                warn!(list, path = %path.display(), error = %err, "cannot read reference wordlist");
                Box::new(std::iter::empty())
            }
        }
    }
}
