//! Chapter selector wiring: fills the selector from the catalog and keeps the
//! verse input's bound and hint in step with the selected chapter.

use std::sync::Arc;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::source::SourceError;
use crate::view::{Hint, ViewBinding};

/// Where an out-of-range verse input is moved when the chapter changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClampPolicy {
    /// The last verse of the new chapter.
    #[default]
    ToMaximum,
    /// Verse 1.
    ToFirst,
}

impl ClampPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClampPolicy::ToMaximum => "max",
            ClampPolicy::ToFirst => "first",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "max" | "maximum" => Some(ClampPolicy::ToMaximum),
            "first" | "one" | "1" => Some(ClampPolicy::ToFirst),
            _ => None,
        }
    }

    fn target(&self, max: u16) -> u16 {
        match self {
            ClampPolicy::ToMaximum => max,
            ClampPolicy::ToFirst => 1,
        }
    }
}

pub struct ChapterPicker {
    catalog: Option<Arc<Catalog>>,
    clamp: ClampPolicy,
}

impl ChapterPicker {
    /// Wire a freshly loaded catalog into the view. On success the selector is
    /// populated and the change handler runs once for the default selection.
    /// On failure the selector stays empty and the hint shows the error.
    pub fn attach<B: ViewBinding + ?Sized>(
        loaded: Result<Catalog, SourceError>,
        clamp: ClampPolicy,
        binding: &mut B,
    ) -> Self {
        match loaded {
            Ok(catalog) => {
                info!(chapters = catalog.len(), "chapter catalog loaded");
                let picker = Self {
                    catalog: Some(Arc::new(catalog)),
                    clamp,
                };
                picker.populate_selector(binding);
                let selected = binding.selected_chapter();
                picker.on_chapter_change(binding, selected);
                picker
            }
            Err(e) => {
                warn!(error = %e, "failed to load chapter catalog");
                binding.set_verse_hint(Hint::CatalogUnavailable);
                Self {
                    catalog: None,
                    clamp,
                }
            }
        }
    }

    pub fn catalog(&self) -> Option<&Arc<Catalog>> {
        self.catalog.as_ref()
    }

    pub fn clamp_policy(&self) -> ClampPolicy {
        self.clamp
    }

    pub fn populate_selector<B: ViewBinding + ?Sized>(&self, binding: &mut B) {
        if let Some(catalog) = &self.catalog {
            for chapter in catalog.chapters() {
                binding.append_chapter_option(chapter.number, chapter.option_label());
            }
        }
    }

    pub fn on_chapter_change<B: ViewBinding + ?Sized>(&self, binding: &mut B, selected: Option<u16>) {
        let Some(chapter) = selected.and_then(|n| self.catalog.as_ref()?.get(n)) else {
            return;
        };

        let max = chapter.verse_count;
        binding.set_verse_hint(Hint::Available(max));
        binding.set_verse_max(max);

        if let Some(current) = binding.verse_input() {
            if current > max {
                binding.set_verse_input(self.clamp.target(max));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogError;
    use crate::view::ViewState;

    fn attached(clamp: ClampPolicy) -> (ChapterPicker, ViewState) {
        let mut view = ViewState::new();
        let picker = ChapterPicker::attach(Ok(Catalog::builtin()), clamp, &mut view);
        (picker, view)
    }

    #[test]
    fn test_attach_populates_and_runs_handler() {
        let (_, view) = attached(ClampPolicy::ToMaximum);
        assert_eq!(view.chapter_options().len(), 114);
        assert_eq!(view.chapter_options()[0].label, "1. الفاتحة");
        assert_eq!(view.chapter_options()[113].label, "114. سورة رقم 114");
        assert_eq!(view.selected_chapter(), Some(1));
        assert_eq!(view.verse_max(), Some(7));
        assert_eq!(view.verse_hint(), Hint::Available(7));
    }

    #[test]
    fn test_change_sets_bound_and_hint() {
        let (picker, mut view) = attached(ClampPolicy::ToMaximum);
        view.select_option(1);
        let selected = view.selected_chapter();
        picker.on_chapter_change(&mut view, selected);
        assert_eq!(view.verse_max(), Some(286));
        assert_eq!(view.verse_hint().text(), "العدد المتاح: 286");
    }

    #[test]
    fn test_clamp_to_maximum() {
        let (picker, mut view) = attached(ClampPolicy::ToMaximum);
        view.set_verse_input(200);
        picker.on_chapter_change(&mut view, Some(1));
        assert_eq!(view.verse_input(), Some(7));
    }

    #[test]
    fn test_clamp_to_first() {
        let (picker, mut view) = attached(ClampPolicy::ToFirst);
        view.set_verse_input(200);
        picker.on_chapter_change(&mut view, Some(1));
        assert_eq!(view.verse_input(), Some(1));
    }

    #[test]
    fn test_in_range_input_untouched() {
        let (picker, mut view) = attached(ClampPolicy::ToFirst);
        view.set_verse_input(50);
        picker.on_chapter_change(&mut view, Some(2));
        assert_eq!(view.verse_input(), Some(50));

        view.set_verse_input(7);
        picker.on_chapter_change(&mut view, Some(1));
        assert_eq!(view.verse_input(), Some(7));
    }

    #[test]
    fn test_unknown_chapter_is_ignored() {
        let (picker, mut view) = attached(ClampPolicy::ToMaximum);
        picker.on_chapter_change(&mut view, Some(500));
        assert_eq!(view.verse_max(), Some(7));
        picker.on_chapter_change(&mut view, None);
        assert_eq!(view.verse_max(), Some(7));
    }

    #[test]
    fn test_failed_catalog_leaves_selector_empty() {
        let mut view = ViewState::new();
        let picker = ChapterPicker::attach(
            Err(SourceError::Catalog(CatalogError::Empty)),
            ClampPolicy::ToMaximum,
            &mut view,
        );
        assert!(picker.catalog().is_none());
        assert!(view.chapter_options().is_empty());
        assert_eq!(view.verse_hint(), Hint::CatalogUnavailable);
        assert_eq!(view.verse_max(), None);
    }

    #[test]
    fn test_clamp_policy_names() {
        assert_eq!(ClampPolicy::from_str("max"), Some(ClampPolicy::ToMaximum));
        assert_eq!(ClampPolicy::from_str("First"), Some(ClampPolicy::ToFirst));
        assert_eq!(ClampPolicy::from_str("middle"), None);
        assert_eq!(ClampPolicy::default().as_str(), "max");
    }
}
