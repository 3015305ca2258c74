/*
 * Persists a `FrequencyTable` to the flat backup format: one `<name> <count>`
 * line per item, in table order, each line newline-terminated. The destination
 * is created or truncated on every write.
 *
 * Writing goes through `BackupWriterOperations` so the session can be tested
 * against a writer that records calls or fails on demand. Tests read the
 * format back into a table with `parse_backup`.
 */
use super::frequency_table::FrequencyTable;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum SinkError {
    Unavailable { path: PathBuf, source: io::Error },
}

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkError::Unavailable { path, source } => {
                write!(f, "Could not write backup file {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SinkError::Unavailable { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
#[derive(Debug)]
pub enum BackupParseError {
    Io(io::Error),
    MalformedLine { line_number: usize, line: String },
    InvalidCount { line_number: usize, value: String },
}

#[cfg(test)]
impl From<io::Error> for BackupParseError {
    fn from(err: io::Error) -> Self {
        BackupParseError::Io(err)
    }
}

#[cfg(test)]
impl std::fmt::Display for BackupParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackupParseError::Io(e) => write!(f, "Backup I/O error: {e}"),
            BackupParseError::MalformedLine { line_number, line } => {
                write!(f, "Malformed backup line {line_number}: '{line}'")
            }
            BackupParseError::InvalidCount { line_number, value } => {
                write!(f, "Invalid count '{value}' on backup line {line_number}")
            }
        }
    }
}

#[cfg(test)]
impl std::error::Error for BackupParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackupParseError::Io(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SinkError>;

pub trait BackupWriterOperations {
    fn write_backup(&self, table: &FrequencyTable, path: &Path) -> Result<()>;
}

pub struct CoreBackupWriter {}

impl CoreBackupWriter {
    pub fn new() -> Self {
        CoreBackupWriter {}
    }
}

impl Default for CoreBackupWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BackupWriterOperations for CoreBackupWriter {
    fn write_backup(&self, table: &FrequencyTable, path: &Path) -> Result<()> {
        log::trace!(
            "CoreBackupWriter: Writing {} entries to {path:?}",
            table.len()
        );
        let unavailable = |source: io::Error| SinkError::Unavailable {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(unavailable)?;
        let mut writer = BufWriter::new(file);
        write_entries(table, &mut writer).map_err(unavailable)?;
        writer.flush().map_err(unavailable)?;
        log::debug!("CoreBackupWriter: Backup written to {path:?}.");
        Ok(())
    }
}

/// Writes the table in backup format to any sink.
pub fn write_entries<W: Write>(table: &FrequencyTable, out: &mut W) -> io::Result<()> {
    for (name, count) in table.iter() {
        writeln!(out, "{name} {count}")?;
    }
    Ok(())
}

/*
 * Reads a backup back into a table. Blank lines are skipped. Every other line
 * must be exactly a name and a positive count. A name listed twice has its
 * counts summed.
 */
#[cfg(test)]
pub fn parse_backup<R: io::BufRead>(
    reader: R,
) -> std::result::Result<FrequencyTable, BackupParseError> {
    let mut table = FrequencyTable::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next(), fields.next()) {
            (None, _, _) => continue,
            (Some(name), Some(count_text), None) => {
                let count = match count_text.parse::<usize>() {
                    Ok(count) if count > 0 => count,
                    _ => {
                        return Err(BackupParseError::InvalidCount {
                            line_number,
                            value: count_text.to_string(),
                        });
                    }
                };
                table.add(name, count);
            }
            _ => {
                return Err(BackupParseError::MalformedLine {
                    line_number,
                    line: line.clone(),
                });
            }
        }
    }
    Ok(table)
}
