//! Input dataset and output outcome documents
//!
//! A dataset carries the candidate items and the currently chosen keys.
//! The outcome is what gets handed back to the invoking script once the
//! user confirms.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::transfer::{dedup_last_wins, Item, Transfer, TransferChange};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML dataset: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("cannot tell dataset format of {0} (use --format json|toml)")]
    UnknownFormat(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DatasetFormat {
    Json,
    Toml,
}

impl DatasetFormat {
    /// Guess the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(DatasetError::UnknownFormat(path.to_path_buf())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub chosen: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titles: Option<[String; 2]>,
}

impl Dataset {
    pub fn parse(text: &str, format: DatasetFormat) -> Result<Self, DatasetError> {
        let dataset = match format {
            DatasetFormat::Json => serde_json::from_str(text)?,
            DatasetFormat::Toml => toml::from_str(text)?,
        };
        Ok(dataset)
    }

    /// Read and parse a dataset file. The format defaults to the extension.
    pub async fn load(path: &Path, format: Option<DatasetFormat>) -> Result<Self, DatasetError> {
        let format = match format {
            Some(f) => f,
            None => DatasetFormat::from_path(path)?,
        };

        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| DatasetError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let dataset = Self::parse(&text, format)?;
        tracing::info!(
            "Loaded {} items ({} chosen) from {}",
            dataset.items.len(),
            dataset.chosen.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Partition report used by `--check`
    pub fn summary(&self) -> Summary {
        let (items, duplicates) = dedup_last_wins(self.items.clone());
        let chosen: HashSet<&str> = self.chosen.iter().map(String::as_str).collect();
        let known: HashSet<&str> = items.iter().map(|i| i.key.as_str()).collect();

        Summary {
            items: items.len(),
            available: items
                .iter()
                .filter(|i| !chosen.contains(i.key.as_str()))
                .map(|i| i.key.clone())
                .collect(),
            chosen: items
                .iter()
                .filter(|i| chosen.contains(i.key.as_str()))
                .map(|i| i.key.clone())
                .collect(),
            unknown_chosen: self
                .chosen
                .iter()
                .filter(|k| !known.contains(k.as_str()))
                .cloned()
                .collect(),
            duplicate_keys: duplicates,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub items: usize,
    pub available: Vec<String>,
    pub chosen: Vec<String>,
    pub unknown_chosen: Vec<String>,
    pub duplicate_keys: Vec<String>,
}

/// Confirmed result of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub chosen: Vec<String>,
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub moves: Vec<TransferChange>,
}

impl Outcome {
    /// Build the outcome from the final selector state and the keys the
    /// session started with.
    pub fn new(transfer: &Transfer, initial: &[String], moves: Vec<TransferChange>) -> Self {
        let before: HashSet<&str> = initial.iter().map(String::as_str).collect();
        let after: HashSet<&str> = transfer.chosen_keys().iter().map(String::as_str).collect();

        Self {
            chosen: transfer.chosen_keys().to_vec(),
            added: transfer
                .chosen_keys()
                .iter()
                .filter(|k| !before.contains(k.as_str()))
                .cloned()
                .collect(),
            removed: initial
                .iter()
                .filter(|k| !after.contains(k.as_str()))
                .cloned()
                .collect(),
            moves,
        }
    }

    pub async fn write(&self, output: Option<&Path>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        match output {
            Some(path) => {
                tokio::fs::write(path, format!("{}\n", json))
                    .await
                    .with_context(|| format!("Could not write outcome to {}", path.display()))?;
                tracing::info!("Wrote outcome to {}", path.display());
            }
            None => println!("{}", json),
        }
        Ok(())
    }

    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}
