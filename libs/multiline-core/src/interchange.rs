//! Import and export of the store tree.
//!
//! # Format
//! ```yaml
//! sets:
//!   - title: Spanish
//!     flashcards:
//!       - title: A
//!         text: uno
//! ```
//!
//! The same document can be written as YAML or as JSON. YAML is the default
//! so that exports from earlier versions of the app import unchanged.
//! Import checks the shape of the document and nothing else.

use crate::error::InterchangeError;
use crate::store::Command;
use crate::types::StoreState;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// Result type alias using InterchangeError.
pub type Result<T> = std::result::Result<T, InterchangeError>;

/// Text encoding of an interchange document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// File extension used for exports, without the dot.
    pub fn extension(self) -> &'static str {
        self.as_str()
    }

    /// Guess the format of a file from its extension.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, extension) = name.rsplit_once('.')?;
        Self::from_str(extension)
    }
}

/// Serialize the whole tree.
pub fn export_to_string(state: &StoreState, format: Format) -> Result<String> {
    let document = match format {
        Format::Yaml => serde_yaml::to_string(state)?,
        Format::Json => serde_json::to_string_pretty(state)?,
    };
    tracing::info!(sets = state.sets.len(), format = format.as_str(), "exported flashcards");
    Ok(document)
}

/// Serialize the whole tree into `writer`.
pub fn export_to_writer<W: Write>(state: &StoreState, format: Format, mut writer: W) -> Result<()> {
    match format {
        Format::Yaml => serde_yaml::to_writer(&mut writer, state)?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut writer, state)?;
            writer.write_all(b"\n")?;
        }
    }
    tracing::info!(sets = state.sets.len(), format = format.as_str(), "exported flashcards");
    Ok(())
}

/// Parse an exported document.
pub fn import_from_str(document: &str, format: Format) -> Result<StoreState> {
    let state: StoreState = match format {
        Format::Yaml => serde_yaml::from_str(document)?,
        Format::Json => serde_json::from_str(document)?,
    };
    tracing::info!(sets = state.sets.len(), format = format.as_str(), "imported flashcards");
    Ok(state)
}

/// Parse an exported document from `reader`.
pub fn import_from_reader<R: Read>(reader: R, format: Format) -> Result<StoreState> {
    let state: StoreState = match format {
        Format::Yaml => serde_yaml::from_reader(reader)?,
        Format::Json => serde_json::from_reader(reader)?,
    };
    tracing::info!(sets = state.sets.len(), format = format.as_str(), "imported flashcards");
    Ok(state)
}

/// Parse a document into the command that installs it.
pub fn import_command(document: &str, format: Format) -> Result<Command> {
    import_from_str(document, format).map(|state| Command::replace_all_sets(state.sets))
}

/// File name for an export made on `date`, e.g. `flashcards-2024-3-7.yaml`.
pub fn export_file_name(prefix: &str, date: NaiveDate, format: Format) -> String {
    format!(
        "{}-{}-{}-{}.{}",
        prefix,
        date.year(),
        date.month(),
        date.day(),
        format.extension()
    )
}
