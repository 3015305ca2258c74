/*
 * Platform-agnostic core of the tracker: tokenizing the item source, the
 * frequency table, backup persistence, queries, histogram rendering and
 * settings. Nothing here touches the console.
 */
pub mod backup;
pub mod config;
pub mod frequency_table;
pub mod histogram;
pub mod item_reader;
pub mod path_utils;
pub mod query;

pub use frequency_table::FrequencyTable;

// Re-export item source related items
pub use item_reader::{
    CoreItemReader, ItemSourceOperations, SourceError, Tokens, load_frequency_table,
};

// Re-export backup related items
pub use backup::{BackupWriterOperations, CoreBackupWriter, SinkError};

pub use query::{LookupOutcome, QueryEngine};

pub use histogram::{HistogramStyle, render_histogram};

// Re-export config related items
pub use config::{AppConfig, ConfigManagerOperations, CoreConfigManager};
