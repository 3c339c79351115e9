//! Loading posting snapshots from JSON exports.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::domain::{JobId, JobListing, JobPosting};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("unable to read posting export {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("posting export is not a JSON array of postings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Export row; ids are kept when present so snapshots stay addressable.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedEntry {
    #[serde(default, alias = "_id")]
    pub id: Option<JobId>,
    #[serde(flatten)]
    pub listing: JobListing,
}

pub fn parse_entries<R: Read>(reader: R) -> Result<Vec<SeedEntry>, SeedError> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_entries(path: &Path) -> Result<Vec<SeedEntry>, SeedError> {
    let file = File::open(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_entries(BufReader::new(file))
}

/// Materialize an export into postings, numbering rows that carry no id.
pub fn snapshot(entries: Vec<SeedEntry>, created_at: DateTime<Utc>) -> Vec<JobPosting> {
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| JobPosting {
            id: entry
                .id
                .unwrap_or_else(|| JobId(format!("job-{:06}", index + 1))),
            listing: entry.listing,
            created_at,
        })
        .collect()
}
