//! Where verse text comes from: the public verse API or chapter files on disk.

pub mod local;
pub mod remote;

pub use local::ChapterFiles;
pub use remote::AlQuranClient;

use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};
use crate::messages;

/// A single (chapter, verse) lookup, taken from the form when the user
/// triggers resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupRequest {
    pub chapter: u16,
    pub verse: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseResult {
    pub text: String,
    pub display_reference: String,
}

#[derive(Debug, Error)]
pub enum SourceError {
    /// The API answered but with a status other than `OK`.
    #[error("verse service answered with status {status:?}")]
    Rejected { status: String },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("chapter file {path:?} could not be read: {source}")]
    MissingChapterFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("verse {verse} is not present in chapter {chapter}")]
    VerseNotFound { chapter: u16, verse: u16 },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Remote,
    Local,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Remote => "remote",
            SourceKind::Local => "local",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "remote" | "api" => Some(SourceKind::Remote),
            "local" | "files" => Some(SourceKind::Local),
            _ => None,
        }
    }

    pub fn all() -> Vec<SourceKind> {
        vec![SourceKind::Remote, SourceKind::Local]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SourceKind::Remote => "alquran.cloud API",
            SourceKind::Local => "Local chapter files",
        }
    }
}

/// Verse source selected by configuration. Both variants answer the same two
/// questions: which chapters exist, and what a given verse says.
#[derive(Debug, Clone)]
pub enum VerseSource {
    Remote(AlQuranClient),
    Local(ChapterFiles),
}

impl VerseSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            VerseSource::Remote(_) => SourceKind::Remote,
            VerseSource::Local(_) => SourceKind::Local,
        }
    }

    /// The remote variant ships with the built-in table; the local variant
    /// reads the catalog file next to the chapter files.
    pub async fn fetch_chapter_list(&self) -> Result<Catalog, SourceError> {
        match self {
            VerseSource::Remote(_) => Ok(Catalog::builtin()),
            VerseSource::Local(files) => Ok(Catalog::load(&files.catalog_path()).await?),
        }
    }

    pub async fn fetch_verse(&self, request: LookupRequest) -> Result<VerseResult, SourceError> {
        match self {
            VerseSource::Remote(client) => client.fetch_ayah(request).await,
            VerseSource::Local(files) => files.fetch_verse(request).await,
        }
    }

    /// Message for the verse slot when a lookup fails. Never includes the
    /// error's own text.
    pub fn failure_notice(&self, request: LookupRequest, error: &SourceError) -> String {
        match self {
            VerseSource::Remote(_) => match error {
                SourceError::Rejected { .. } => messages::REJECTED.to_string(),
                _ => messages::UNREACHABLE.to_string(),
            },
            VerseSource::Local(files) => match error {
                SourceError::VerseNotFound { chapter, verse } => {
                    messages::verse_not_in_file(*chapter, *verse)
                }
                _ => messages::chapter_file_missing(
                    &files.chapter_path(request.chapter),
                    &files.chapters_dir(),
                ),
            },
        }
    }
}
