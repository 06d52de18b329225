//! Ordered chapter catalog used to populate the chapter selector and bound the
//! verse input.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Highest chapter number in the built-in catalog.
pub const CHAPTER_COUNT: u16 = 114;

/// Verse count given to built-in chapters that have no literal entry.
pub const PLACEHOLDER_VERSE_COUNT: u16 = 50;

const NAMED_CHAPTERS: [(&str, u16); 25] = [
    ("الفاتحة", 7),
    ("البقرة", 286),
    ("آل عمران", 200),
    ("النساء", 176),
    ("المائدة", 120),
    ("الأنعام", 165),
    ("الأعراف", 206),
    ("الأنفال", 75),
    ("التوبة", 129),
    ("يونس", 109),
    ("هود", 123),
    ("يوسف", 111),
    ("الرعد", 43),
    ("إبراهيم", 52),
    ("الحجر", 99),
    ("النحل", 128),
    ("الإسراء", 111),
    ("الكهف", 110),
    ("مريم", 98),
    ("طه", 135),
    ("الأنبياء", 112),
    ("الحج", 78),
    ("المؤمنون", 118),
    ("النور", 64),
    ("الفرقان", 77),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRecord {
    pub number: u16,
    pub name: String,
    #[serde(rename = "verses")]
    pub verse_count: u16,
}

impl ChapterRecord {
    /// Label shown in the chapter selector, e.g. `"1. الفاتحة"`
    pub fn option_label(&self) -> String {
        format!("{}. {}", self.number, self.name)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read chapter catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed chapter catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("chapter catalog is empty")]
    Empty,
    #[error("chapter numbers must be positive")]
    ZeroNumber,
    #[error("chapter {0} appears more than once")]
    DuplicateNumber(u16),
    #[error("chapter {0} has no verses")]
    NoVerses(u16),
}

/// Immutable, ordered list of chapters. Built once at startup and shared by
/// reference afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    chapters: Vec<ChapterRecord>,
}

impl Catalog {
    /// The literal table padded with placeholder chapters up to
    /// [`CHAPTER_COUNT`].
    pub fn builtin() -> Self {
        let mut chapters: Vec<ChapterRecord> = NAMED_CHAPTERS
            .iter()
            .zip(1u16..)
            .map(|(&(name, verse_count), number)| ChapterRecord {
                number,
                name: name.to_string(),
                verse_count,
            })
            .collect();

        let next = chapters.len() as u16 + 1;
        for number in next..=CHAPTER_COUNT {
            chapters.push(ChapterRecord {
                number,
                name: placeholder_name(number),
                verse_count: PLACEHOLDER_VERSE_COUNT,
            });
        }

        Self { chapters }
    }

    pub fn from_records(chapters: Vec<ChapterRecord>) -> Result<Self, CatalogError> {
        if chapters.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for chapter in &chapters {
            if chapter.number == 0 {
                return Err(CatalogError::ZeroNumber);
            }
            if !seen.insert(chapter.number) {
                return Err(CatalogError::DuplicateNumber(chapter.number));
            }
            if chapter.verse_count == 0 {
                return Err(CatalogError::NoVerses(chapter.number));
            }
        }

        Ok(Self { chapters })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let chapters: Vec<ChapterRecord> = serde_json::from_str(json)?;
        Self::from_records(chapters)
    }

    /// Load the catalog from a JSON file of `{number, name, verses}` objects.
    pub async fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&content)
    }

    pub fn get(&self, number: u16) -> Option<&ChapterRecord> {
        self.chapters.iter().find(|c| c.number == number)
    }

    pub fn chapters(&self) -> &[ChapterRecord] {
        &self.chapters
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }
}

fn placeholder_name(number: u16) -> String {
    format!("سورة رقم {}", number)
}
