/*
 * Reads item names from a text source. Tokens are split on runs of whitespace
 * and handed out lazily, one line buffered at a time, so the same tokenizer
 * serves both the item file and the interactive console.
 *
 * Opening a source goes through `ItemSourceOperations` so the session can be
 * driven by an in-memory source in tests. `CoreItemReader` is the file-backed
 * implementation used by the binary.
 */
use super::frequency_table::FrequencyTable;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum SourceError {
    Unavailable { path: PathBuf, source: io::Error },
    ReadFailed { path: PathBuf, source: io::Error },
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Unavailable { path, .. } => {
                write!(f, "Could not open input file {}", path.display())
            }
            SourceError::ReadFailed { path, source } => {
                write!(f, "Could not read input file {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Unavailable { source, .. } => Some(source),
            SourceError::ReadFailed { source, .. } => Some(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;

/*
 * Lazy whitespace tokenizer over any buffered reader. Blank lines produce no
 * tokens. Tokens left over from the current line stay pending until consumed
 * or explicitly discarded. Lines are read as bytes and decoded lossily, so
 * bytes that are not valid UTF-8 end up inside a token instead of failing
 * the read.
 */
pub struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
    line: Vec<u8>,
    exhausted: bool,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Tokens {
            reader,
            pending: VecDeque::new(),
            line: Vec::new(),
            exhausted: false,
        }
    }

    /*
     * Returns the next token, reading further lines as needed. `Ok(None)`
     * means the reader is exhausted. A read error also ends the sequence.
     */
    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            if self.exhausted {
                return Ok(None);
            }
            self.line.clear();
            match self.reader.read_until(b'\n', &mut self.line) {
                Ok(0) => {
                    self.exhausted = true;
                    return Ok(None);
                }
                Ok(_) => self.pending.extend(
                    String::from_utf8_lossy(&self.line)
                        .split_whitespace()
                        .map(str::to_owned),
                ),
                Err(e) => {
                    self.exhausted = true;
                    return Err(e);
                }
            }
        }
    }

    /// Drops whatever remains of the current line. Returns how many tokens were dropped.
    pub fn discard_pending(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }
}

impl<R: BufRead> Iterator for Tokens<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

pub trait ItemSourceOperations {
    /*
     * Opens the item source at `path` for buffered reading. Failing to open
     * maps to `SourceError::Unavailable` naming the path.
     */
    fn open(&self, path: &Path) -> Result<Box<dyn BufRead>>;
}

pub struct CoreItemReader {}

impl CoreItemReader {
    pub fn new() -> Self {
        CoreItemReader {}
    }
}

impl Default for CoreItemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemSourceOperations for CoreItemReader {
    fn open(&self, path: &Path) -> Result<Box<dyn BufRead>> {
        log::trace!("CoreItemReader: Opening item source {path:?}");
        let file = File::open(path).map_err(|source| SourceError::Unavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/*
 * Build phase: streams every token from the source into a fresh table.
 * An I/O failure part way through is fatal as well; a partial tally would
 * misreport counts.
 */
pub fn load_frequency_table(
    item_source: &dyn ItemSourceOperations,
    path: &Path,
) -> Result<FrequencyTable> {
    let reader = item_source.open(path)?;
    let mut table = FrequencyTable::new();
    for token in Tokens::new(reader) {
        let token = token.map_err(|source| SourceError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        table.record(&token);
    }
    if table.is_empty() {
        log::warn!("load_frequency_table: {path:?} contains no items.");
    }
    log::debug!(
        "load_frequency_table: Read {} tokens ({} distinct items) from {path:?}",
        table.total(),
        table.len()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read, Write};
    use tempfile::{NamedTempFile, tempdir};

    // Reader that yields one good line and then fails.
    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::other("disk went away"));
            }
            self.served = true;
            let line = b"apple banana\n";
            buf[..line.len()].copy_from_slice(line);
            Ok(line.len())
        }
    }

    struct FailingSource;

    impl ItemSourceOperations for FailingSource {
        fn open(&self, _path: &Path) -> Result<Box<dyn BufRead>> {
            Ok(Box::new(BufReader::new(FailingReader { served: false })))
        }
    }

    fn collect_tokens(text: &str) -> Vec<String> {
        Tokens::new(Cursor::new(text.to_string()))
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_tokens_split_on_runs_of_whitespace() {
        let tokens = collect_tokens("  apple\tbanana\n\n   pear  \r\nkiwi");
        assert_eq!(tokens, vec!["apple", "banana", "pear", "kiwi"]);
    }

    #[test]
    fn test_tokens_empty_and_blank_input() {
        assert!(collect_tokens("").is_empty());
        assert!(collect_tokens(" \n\t\n   \r\n").is_empty());
    }

    #[test]
    fn test_tokens_keep_punctuation_and_case() {
        let tokens = collect_tokens("Apple apple, \"pear\"");
        assert_eq!(tokens, vec!["Apple", "apple,", "\"pear\""]);
    }

    #[test]
    fn test_discard_pending_drops_rest_of_line_only() {
        let mut tokens = Tokens::new(Cursor::new("abc def ghi\nnext line\n"));
        assert_eq!(tokens.next_token().unwrap().as_deref(), Some("abc"));
        assert_eq!(tokens.discard_pending(), 2);
        assert_eq!(tokens.next_token().unwrap().as_deref(), Some("next"));
        assert_eq!(tokens.next_token().unwrap().as_deref(), Some("line"));
        assert_eq!(tokens.next_token().unwrap(), None);
        assert_eq!(tokens.discard_pending(), 0);
    }

    #[test]
    fn test_core_item_reader_reads_file() -> io::Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "apple banana")?;
        writeln!(file, "apple pear apple")?;

        let table = load_frequency_table(&CoreItemReader::new(), file.path()).unwrap();
        assert_eq!(table.get("apple"), Some(3));
        assert_eq!(table.get("banana"), Some(1));
        assert_eq!(table.get("pear"), Some(1));
        assert_eq!(table.total(), 5);
        Ok(())
    }

    #[test]
    fn test_core_item_reader_empty_file_gives_empty_table() -> io::Result<()> {
        let file = NamedTempFile::new()?;
        let table = load_frequency_table(&CoreItemReader::new(), file.path()).unwrap();
        assert!(table.is_empty());
        Ok(())
    }

    #[test]
    fn test_core_item_reader_missing_file_is_unavailable() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("no_such_input.txt");

        match load_frequency_table(&CoreItemReader::new(), &missing) {
            Err(SourceError::Unavailable { path, source }) => {
                assert_eq!(path, missing);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            Ok(table) => panic!("Expected SourceError, got table {table:?}"),
            Err(other) => panic!("Expected SourceError::Unavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_read_failure_mid_stream_is_read_failed() {
        let path = Path::new("flaky.txt");
        match load_frequency_table(&FailingSource, path) {
            Err(err @ SourceError::ReadFailed { .. }) => {
                let message = err.to_string();
                assert!(message.contains("flaky.txt"));
                assert!(message.starts_with("Could not read input file"));
            }
            other => panic!("Expected SourceError::ReadFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_tokens_decode_invalid_utf8_lossily() {
        let mut tokens = Tokens::new(Cursor::new(b"\xff\xfe\nJalape\xf1o apple\n".to_vec()));
        assert_eq!(
            tokens.next_token().unwrap().as_deref(),
            Some("\u{FFFD}\u{FFFD}")
        );
        assert_eq!(
            tokens.next_token().unwrap().as_deref(),
            Some("Jalape\u{FFFD}o")
        );
        assert_eq!(tokens.next_token().unwrap().as_deref(), Some("apple"));
        assert_eq!(tokens.next_token().unwrap(), None);
    }

    #[test]
    fn test_core_item_reader_counts_latin1_items() -> io::Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"apple Jalape\xf1o apple\nJalape\xf1o\n")?;

        let table = load_frequency_table(&CoreItemReader::new(), file.path()).unwrap();
        assert_eq!(table.get("apple"), Some(2));
        assert_eq!(table.get("Jalape\u{FFFD}o"), Some(2));
        assert_eq!(table.total(), 4);
        Ok(())
    }

    #[test]
    fn test_unavailable_message_names_the_file() {
        let err = SourceError::Unavailable {
            path: PathBuf::from("items.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "Could not open input file items.txt");
    }
}
