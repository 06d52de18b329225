//! Verse resolution: loading state, one fetch, then verse (or failure notice)
//! followed by a commentary fragment.
//!
//! The three phases are exposed separately so a UI can spawn the fetch on its
//! runtime and render the outcome whenever it lands. Overlapping lookups are
//! not coordinated; whichever finishes last owns the result slots.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::commentary::CommentaryPool;
use crate::source::{LookupRequest, SourceError, VerseResult, VerseSource};
use crate::view::{VerseSlot, ViewBinding};

/// Delay before scrolling to the result on narrow layouts, so the freshly
/// shown region is laid out first.
pub const RESULT_SCROLL_DELAY: Duration = Duration::from_millis(100);

pub struct Resolver {
    source: VerseSource,
    commentary: CommentaryPool,
    rng: SmallRng,
}

impl Resolver {
    pub fn new(source: VerseSource) -> Self {
        Self::with_rng(source, SmallRng::from_entropy())
    }

    pub fn with_rng(source: VerseSource, rng: SmallRng) -> Self {
        Self {
            source,
            commentary: CommentaryPool::builtin(),
            rng,
        }
    }

    pub fn source(&self) -> &VerseSource {
        &self.source
    }

    pub fn commentary_pool(&self) -> &CommentaryPool {
        &self.commentary
    }

    /// Show the result region in its loading state. Returns `None`, touching
    /// nothing, when either input is missing.
    pub fn begin<B: ViewBinding + ?Sized>(
        &self,
        binding: &mut B,
        chapter: Option<u16>,
        verse: Option<u16>,
    ) -> Option<LookupRequest> {
        let (Some(chapter), Some(verse)) = (chapter, verse) else {
            return None;
        };

        binding.set_empty_state_visible(false);
        binding.set_result_visible(true);
        if binding.is_narrow() {
            binding.schedule_result_scroll(RESULT_SCROLL_DELAY);
        }
        binding.set_verse_slot(VerseSlot::Loading);

        Some(LookupRequest { chapter, verse })
    }

    /// The fetch, detached from `self` so it can be spawned.
    pub fn fetch(
        &self,
        request: LookupRequest,
    ) -> impl Future<Output = Result<VerseResult, SourceError>> + Send + 'static {
        let source = self.source.clone();
        async move { source.fetch_verse(request).await }
    }

    /// Render a finished fetch, then the commentary regardless of outcome.
    pub fn finish<B: ViewBinding + ?Sized>(
        &mut self,
        binding: &mut B,
        request: LookupRequest,
        outcome: Result<VerseResult, SourceError>,
    ) {
        match outcome {
            Ok(verse) => {
                debug!(chapter = request.chapter, verse = request.verse, "verse resolved");
                binding.set_verse_slot(VerseSlot::Text(verse.text));
                binding.set_verse_reference(verse.display_reference);
            }
            Err(e) => {
                warn!(
                    chapter = request.chapter,
                    verse = request.verse,
                    source = self.source.kind().as_str(),
                    error = %e,
                    "verse lookup failed"
                );
                let notice = self.source.failure_notice(request, &e);
                binding.set_verse_slot(VerseSlot::Notice(notice));
                binding.set_verse_reference(String::new());
            }
        }

        binding.set_commentary(self.commentary.pick(&mut self.rng));
    }

    /// All three phases in one call.
    pub async fn resolve<B: ViewBinding + ?Sized>(
        &mut self,
        binding: &mut B,
        chapter: Option<u16>,
        verse: Option<u16>,
    ) {
        let Some(request) = self.begin(binding, chapter, verse) else {
            return;
        };
        let outcome = self.fetch(request).await;
        self.finish(binding, request, outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commentary::{Commentary, DISCLAIMER};
    use crate::source::ChapterFiles;
    use crate::view::{Hint, ViewId, ViewState};
    use std::fs;
    use std::path::Path;

    /// Counts every write so a no-op can be told apart from a repaint.
    #[derive(Default)]
    struct RecordingBinding {
        writes: usize,
        narrow: bool,
        scrolls_scheduled: usize,
        slot: VerseSlot,
        commentary: Vec<Commentary>,
    }

    impl ViewBinding for RecordingBinding {
        fn set_view_visible(&mut self, _view: ViewId, _visible: bool) {
            self.writes += 1;
        }
        fn scroll_to_top(&mut self) {
            self.writes += 1;
        }
        fn set_result_visible(&mut self, _visible: bool) {
            self.writes += 1;
        }
        fn set_empty_state_visible(&mut self, _visible: bool) {
            self.writes += 1;
        }
        fn is_narrow(&self) -> bool {
            self.narrow
        }
        fn schedule_result_scroll(&mut self, _delay: Duration) {
            self.writes += 1;
            self.scrolls_scheduled += 1;
        }
        fn set_verse_slot(&mut self, slot: VerseSlot) {
            self.writes += 1;
            self.slot = slot;
        }
        fn set_verse_reference(&mut self, _reference: String) {
            self.writes += 1;
        }
        fn set_commentary(&mut self, commentary: Commentary) {
            self.writes += 1;
            self.commentary.push(commentary);
        }
        fn append_chapter_option(&mut self, _number: u16, _label: String) {
            self.writes += 1;
        }
        fn selected_chapter(&self) -> Option<u16> {
            None
        }
        fn set_verse_hint(&mut self, _hint: Hint) {
            self.writes += 1;
        }
        fn set_verse_max(&mut self, _max: u16) {
            self.writes += 1;
        }
        fn verse_input(&self) -> Option<u16> {
            None
        }
        fn set_verse_input(&mut self, _value: u16) {
            self.writes += 1;
        }
    }

    fn local_resolver(root: &Path) -> Resolver {
        Resolver::with_rng(
            VerseSource::Local(ChapterFiles::new(root)),
            SmallRng::seed_from_u64(3),
        )
    }

    fn data_dir_with_fatiha() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("data");
        fs::create_dir_all(root.join("quran")).unwrap();
        fs::write(
            root.join("quran").join("1.json"),
            r#"{"name": "الفاتحة", "verses": [
                {"numberInSurah": 1, "text": "بسم الله الرحمن الرحيم"},
                {"numberInSurah": 2, "text": "الحمد لله رب العالمين"}
            ]}"#,
        )
        .unwrap();
        (dir, root)
    }

    #[tokio::test]
    async fn test_missing_inputs_touch_nothing() {
        let (_dir, root) = data_dir_with_fatiha();
        let mut resolver = local_resolver(&root);
        let mut binding = RecordingBinding::default();

        resolver.resolve(&mut binding, None, Some(1)).await;
        resolver.resolve(&mut binding, Some(1), None).await;
        resolver.resolve(&mut binding, None, None).await;

        assert_eq!(binding.writes, 0);
        assert!(binding.commentary.is_empty());
    }

    #[tokio::test]
    async fn test_local_success() {
        let (_dir, root) = data_dir_with_fatiha();
        let mut resolver = local_resolver(&root);
        let mut view = ViewState::new();

        resolver.resolve(&mut view, Some(1), Some(1)).await;

        assert!(view.result_visible());
        assert!(!view.empty_state_visible());
        assert_eq!(view.verse(), &VerseSlot::Text("بسم الله الرحمن الرحيم".to_string()));
        assert!(view.reference().contains("الفاتحة"));
        assert!(view.reference().contains('1'));
    }

    #[tokio::test]
    async fn test_local_verse_not_in_file() {
        let (_dir, root) = data_dir_with_fatiha();
        let mut resolver = local_resolver(&root);
        let mut view = ViewState::new();

        resolver.resolve(&mut view, Some(1), Some(9999)).await;

        let VerseSlot::Notice(notice) = view.verse() else {
            panic!("expected a notice, got {:?}", view.verse());
        };
        let missing = resolver.source().failure_notice(
            LookupRequest { chapter: 1, verse: 9999 },
            &SourceError::MissingChapterFile {
                path: root.join("quran").join("1.json"),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            },
        );
        assert!(notice.contains("9999"));
        assert_ne!(notice, &missing);
    }

    #[tokio::test]
    async fn test_local_missing_chapter_file() {
        let (_dir, root) = data_dir_with_fatiha();
        let mut resolver = local_resolver(&root);
        let mut view = ViewState::new();

        resolver.resolve(&mut view, Some(5), Some(1)).await;

        let VerseSlot::Notice(notice) = view.verse() else {
            panic!("expected a notice, got {:?}", view.verse());
        };
        assert!(notice.contains("data/quran/5.json"));
        assert!(view.reference().is_empty());
    }

    #[tokio::test]
    async fn test_commentary_follows_every_outcome() {
        let (_dir, root) = data_dir_with_fatiha();
        let mut resolver = local_resolver(&root);
        let mut binding = RecordingBinding::default();

        resolver.resolve(&mut binding, Some(1), Some(2)).await;
        resolver.resolve(&mut binding, Some(1), Some(9999)).await;
        resolver.resolve(&mut binding, Some(77), Some(1)).await;

        assert_eq!(binding.commentary.len(), 3);
        for commentary in &binding.commentary {
            assert!(resolver.commentary_pool().contains(commentary.fragment));
            assert_eq!(commentary.disclaimer, DISCLAIMER);
        }
    }

    #[tokio::test]
    async fn test_narrow_layout_schedules_scroll() {
        let (_dir, root) = data_dir_with_fatiha();
        let mut resolver = local_resolver(&root);

        let mut wide = RecordingBinding::default();
        resolver.resolve(&mut wide, Some(1), Some(1)).await;
        assert_eq!(wide.scrolls_scheduled, 0);

        let mut narrow = RecordingBinding {
            narrow: true,
            ..Default::default()
        };
        resolver.resolve(&mut narrow, Some(1), Some(1)).await;
        assert_eq!(narrow.scrolls_scheduled, 1);
    }

    #[test]
    fn test_begin_shows_loading() {
        let resolver = local_resolver(Path::new("data"));
        let mut view = ViewState::new();

        let request = resolver.begin(&mut view, Some(2), Some(255));
        assert_eq!(request, Some(LookupRequest { chapter: 2, verse: 255 }));
        assert_eq!(view.verse(), &VerseSlot::Loading);
        assert!(view.result_visible());
        assert!(view.commentary().is_none());
    }

    #[tokio::test]
    async fn test_last_finish_wins() {
        let (_dir, root) = data_dir_with_fatiha();
        let mut resolver = local_resolver(&root);
        let mut view = ViewState::new();

        let first = resolver.begin(&mut view, Some(1), Some(1)).unwrap();
        let second = resolver.begin(&mut view, Some(1), Some(2)).unwrap();
        let second_outcome = resolver.fetch(second).await;
        let first_outcome = resolver.fetch(first).await;

        resolver.finish(&mut view, second, second_outcome);
        resolver.finish(&mut view, first, first_outcome);
        assert_eq!(view.verse(), &VerseSlot::Text("بسم الله الرحمن الرحيم".to_string()));
    }
}
