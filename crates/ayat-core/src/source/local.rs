use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{LookupRequest, SourceError, VerseResult};
use crate::messages;

/// Chapter document written by the downloader tool.
#[derive(Debug, Deserialize)]
pub struct ChapterFile {
    pub name: String,
    pub verses: Vec<VerseEntry>,
}

#[derive(Debug, Deserialize)]
pub struct VerseEntry {
    #[serde(rename = "numberInSurah")]
    pub number_in_surah: u16,
    pub text: String,
}

impl ChapterFile {
    pub fn verse(&self, number: u16) -> Option<&VerseEntry> {
        self.verses.iter().find(|v| v.number_in_surah == number)
    }
}

/// Reads `<root>/quran/{chapter}.json` and `<root>/surahs.json`.
#[derive(Debug, Clone)]
pub struct ChapterFiles {
    root: PathBuf,
}

impl ChapterFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folder the downloader tool fills with chapter files.
    pub fn chapters_dir(&self) -> PathBuf {
        self.root.join("quran")
    }

    pub fn chapter_path(&self, chapter: u16) -> PathBuf {
        self.chapters_dir().join(format!("{}.json", chapter))
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root.join("surahs.json")
    }

    pub async fn fetch_chapter(&self, chapter: u16) -> Result<ChapterFile, SourceError> {
        let path = self.chapter_path(chapter);
        debug!(path = %path.display(), "reading chapter file");

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SourceError::MissingChapterFile { path, source })?;
        Ok(serde_json::from_str(&content)?)
    }

    pub async fn fetch_verse(&self, request: LookupRequest) -> Result<VerseResult, SourceError> {
        let chapter = self.fetch_chapter(request.chapter).await?;
        let entry = chapter
            .verse(request.verse)
            .ok_or(SourceError::VerseNotFound {
                chapter: request.chapter,
                verse: request.verse,
            })?;

        Ok(VerseResult {
            text: entry.text.clone(),
            display_reference: messages::reference_label(&chapter.name, entry.number_in_surah),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_fatiha(root: &Path) {
        fs::create_dir_all(root.join("quran")).unwrap();
        fs::write(
            root.join("quran").join("1.json"),
            r#"{"name": "الفاتحة", "verses": [
                {"numberInSurah": 1, "text": "بسم الله الرحمن الرحيم"},
                {"numberInSurah": 2, "text": "الحمد لله رب العالمين"}
            ]}"#,
        )
        .unwrap();
    }

    #[test]
    fn test_paths() {
        let files = ChapterFiles::new("data");
        assert_eq!(files.chapter_path(7), Path::new("data").join("quran").join("7.json"));
        assert_eq!(files.catalog_path(), Path::new("data").join("surahs.json"));
    }

    #[tokio::test]
    async fn test_fetch_verse_by_number_in_chapter() {
        let dir = tempfile::tempdir().unwrap();
        write_fatiha(dir.path());
        let files = ChapterFiles::new(dir.path());

        let result = files.fetch_verse(LookupRequest { chapter: 1, verse: 2 }).await.unwrap();
        assert_eq!(result.text, "الحمد لله رب العالمين");
        assert_eq!(result.display_reference, "سورة الفاتحة • الآية 2");
    }

    #[tokio::test]
    async fn test_fetch_verse_absent_from_file() {
        let dir = tempfile::tempdir().unwrap();
        write_fatiha(dir.path());
        let files = ChapterFiles::new(dir.path());

        let result = files.fetch_verse(LookupRequest { chapter: 1, verse: 9999 }).await;
        assert!(matches!(
            result,
            Err(SourceError::VerseNotFound { chapter: 1, verse: 9999 })
        ));
    }

    #[tokio::test]
    async fn test_fetch_missing_chapter_file() {
        let dir = tempfile::tempdir().unwrap();
        let files = ChapterFiles::new(dir.path());

        let result = files.fetch_verse(LookupRequest { chapter: 3, verse: 1 }).await;
        match result {
            Err(SourceError::MissingChapterFile { path, .. }) => {
                assert_eq!(path, dir.path().join("quran").join("3.json"));
            }
            other => panic!("expected missing file, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_malformed_chapter_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("quran")).unwrap();
        fs::write(dir.path().join("quran").join("1.json"), "not json").unwrap();
        let files = ChapterFiles::new(dir.path());

        let result = files.fetch_verse(LookupRequest { chapter: 1, verse: 1 }).await;
        assert!(matches!(result, Err(SourceError::Parse(_))));
    }
}
