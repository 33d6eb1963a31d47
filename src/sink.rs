//! Wordlist output.

use crate::error::{Error, Result};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// A progress line is logged every this many words.
pub const PROGRESS_INTERVAL: usize = 10_000;

/// Write at most `max_words` words to `path`, one per line.
///
/// The list is written to a temporary file in the same directory and renamed
/// into place once complete. Returns the number of words written.
pub fn write_wordlist<I>(words: I, path: &Path, max_words: usize) -> Result<usize>
where
    I: IntoIterator<Item = String>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;

    let mut count = 0;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        for word in words.into_iter().take(max_words) {
            writeln!(writer, "{word}").map_err(|e| Error::io(path, e))?;
            count += 1;
            if count % PROGRESS_INTERVAL == 0 {
                info!(count, "written words so far");
            }
        }
        writer.flush().map_err(|e| Error::io(path, e))?;
    }

    temp.persist(path).map_err(|e| Error::io(path, e.error))?;
    info!(count, path = %path.display(), "wordlist saved");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_word_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        let written = write_wordlist(vec!["amir".to_string(), "Amir1999".to_string()], &path, 10).unwrap();
        assert_eq!(written, 2);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "amir\nAmir1999\n");
    }

    #[test]
    fn stops_at_max_words() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        let words = (0..100).map(|i| format!("word{i}"));
        assert_eq!(write_wordlist(words, &path, 3).unwrap(), 3);
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 3);
    }

    #[test]
    fn empty_input_leaves_an_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");

        assert_eq!(write_wordlist(Vec::new(), &path, 10).unwrap(), 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        assert!(matches!(write_wordlist(Vec::new(), &path, 10), Err(Error::Io { .. })));
    }
}
