//! UI-agnostic view contract
//!
//! The router, picker and resolver only talk to named slots through
//! [`ViewBinding`]. [`ViewState`] is the in-memory implementation that the TUI
//! draws from and the command line prints from.

use std::time::{Duration, Instant};

use crate::commentary::Commentary;
use crate::messages;

/// Verse input accepts at most this many digits.
pub const MAX_VERSE_DIGITS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Home,
    Lookup,
    Secondary,
}

impl ViewId {
    pub const ALL: [ViewId; 3] = [ViewId::Home, ViewId::Lookup, ViewId::Secondary];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewId::Home => "home",
            ViewId::Lookup => "lookup",
            ViewId::Secondary => "secondary",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "home" => Some(ViewId::Home),
            "lookup" | "quran" => Some(ViewId::Lookup),
            "secondary" | "bukhari" => Some(ViewId::Secondary),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ViewId::Home => "الرئيسية",
            ViewId::Lookup => "البحث عن آية",
            ViewId::Secondary => "صحيح البخاري",
        }
    }
}

/// Content of the verse text slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VerseSlot {
    #[default]
    Empty,
    Loading,
    Text(String),
    Notice(String),
}

/// Content of the hint line under the verse input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hint {
    #[default]
    Blank,
    Available(u16),
    CatalogUnavailable,
}

impl Hint {
    pub fn text(&self) -> String {
        match self {
            Hint::Blank => String::new(),
            Hint::Available(count) => messages::verses_available(*count),
            Hint::CatalogUnavailable => messages::CATALOG_UNAVAILABLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterOption {
    pub number: u16,
    pub label: String,
}

pub trait ViewBinding {
    // Views
    fn set_view_visible(&mut self, view: ViewId, visible: bool);
    fn scroll_to_top(&mut self);

    // Result region
    fn set_result_visible(&mut self, visible: bool);
    fn set_empty_state_visible(&mut self, visible: bool);
    fn is_narrow(&self) -> bool;
    fn schedule_result_scroll(&mut self, delay: Duration);
    fn set_verse_slot(&mut self, slot: VerseSlot);
    fn set_verse_reference(&mut self, reference: String);
    fn set_commentary(&mut self, commentary: Commentary);

    // Lookup form
    fn append_chapter_option(&mut self, number: u16, label: String);
    fn selected_chapter(&self) -> Option<u16>;
    fn set_verse_hint(&mut self, hint: Hint);
    fn set_verse_max(&mut self, max: u16);
    fn verse_input(&self) -> Option<u16>;
    fn set_verse_input(&mut self, value: u16);
}

#[derive(Debug, Clone)]
pub struct ViewState {
    visible_views: Vec<ViewId>,
    scroll: u16,
    narrow: bool,
    result_scroll_due: Option<Instant>,

    result_visible: bool,
    empty_state_visible: bool,
    verse: VerseSlot,
    reference: String,
    commentary: Option<Commentary>,

    chapter_options: Vec<ChapterOption>,
    selected_option: Option<usize>,
    verse_hint: Hint,
    verse_max: Option<u16>,
    verse_input: String,
}

impl ViewState {
    /// Starting markup: home showing, empty placeholder in the result area.
    pub fn new() -> Self {
        Self {
            visible_views: vec![ViewId::Home],
            scroll: 0,
            narrow: false,
            result_scroll_due: None,

            result_visible: false,
            empty_state_visible: true,
            verse: VerseSlot::Empty,
            reference: String::new(),
            commentary: None,

            chapter_options: Vec::new(),
            selected_option: None,
            verse_hint: Hint::Blank,
            verse_max: None,
            verse_input: String::new(),
        }
    }

    pub fn is_visible(&self, view: ViewId) -> bool {
        self.visible_views.contains(&view)
    }

    /// First visible view, or `None` when everything is hidden.
    pub fn current_view(&self) -> Option<ViewId> {
        ViewId::ALL.into_iter().find(|v| self.is_visible(*v))
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn set_scroll(&mut self, scroll: u16) {
        self.scroll = scroll;
    }

    pub fn set_narrow(&mut self, narrow: bool) {
        self.narrow = narrow;
    }

    /// Returns true once when a scheduled result scroll has become due.
    pub fn take_due_result_scroll(&mut self, now: Instant) -> bool {
        match self.result_scroll_due {
            Some(due) if now >= due => {
                self.result_scroll_due = None;
                true
            }
            _ => false,
        }
    }

    pub fn result_scroll_pending(&self) -> bool {
        self.result_scroll_due.is_some()
    }

    pub fn result_visible(&self) -> bool {
        self.result_visible
    }

    pub fn empty_state_visible(&self) -> bool {
        self.empty_state_visible
    }

    pub fn verse(&self) -> &VerseSlot {
        &self.verse
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn commentary(&self) -> Option<&Commentary> {
        self.commentary.as_ref()
    }

    pub fn chapter_options(&self) -> &[ChapterOption] {
        &self.chapter_options
    }

    pub fn selected_option(&self) -> Option<usize> {
        self.selected_option
    }

    /// Select by index. Out-of-range indexes are ignored.
    pub fn select_option(&mut self, idx: usize) -> bool {
        if idx < self.chapter_options.len() {
            self.selected_option = Some(idx);
            true
        } else {
            false
        }
    }

    pub fn verse_hint(&self) -> Hint {
        self.verse_hint
    }

    pub fn verse_max(&self) -> Option<u16> {
        self.verse_max
    }

    pub fn verse_input_text(&self) -> &str {
        &self.verse_input
    }

    pub fn push_verse_digit(&mut self, c: char) {
        if c.is_ascii_digit() && self.verse_input.len() < MAX_VERSE_DIGITS {
            self.verse_input.push(c);
        }
    }

    pub fn pop_verse_digit(&mut self) {
        self.verse_input.pop();
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewBinding for ViewState {
    fn set_view_visible(&mut self, view: ViewId, visible: bool) {
        self.visible_views.retain(|v| *v != view);
        if visible {
            self.visible_views.push(view);
        }
    }

    fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    fn set_result_visible(&mut self, visible: bool) {
        self.result_visible = visible;
        // A hidden result has nothing to scroll to
        if !visible {
            self.result_scroll_due = None;
        }
    }

    fn set_empty_state_visible(&mut self, visible: bool) {
        self.empty_state_visible = visible;
    }

    fn is_narrow(&self) -> bool {
        self.narrow
    }

    fn schedule_result_scroll(&mut self, delay: Duration) {
        self.result_scroll_due = Some(Instant::now() + delay);
    }

    fn set_verse_slot(&mut self, slot: VerseSlot) {
        self.verse = slot;
    }

    fn set_verse_reference(&mut self, reference: String) {
        self.reference = reference;
    }

    fn set_commentary(&mut self, commentary: Commentary) {
        self.commentary = Some(commentary);
    }

    fn append_chapter_option(&mut self, number: u16, label: String) {
        self.chapter_options.push(ChapterOption { number, label });
        // A fresh select element defaults to its first option
        if self.selected_option.is_none() {
            self.selected_option = Some(0);
        }
    }

    fn selected_chapter(&self) -> Option<u16> {
        self.selected_option
            .and_then(|i| self.chapter_options.get(i))
            .map(|o| o.number)
    }

    fn set_verse_hint(&mut self, hint: Hint) {
        self.verse_hint = hint;
    }

    fn set_verse_max(&mut self, max: u16) {
        self.verse_max = Some(max);
    }

    fn verse_input(&self) -> Option<u16> {
        self.verse_input.parse().ok()
    }

    fn set_verse_input(&mut self, value: u16) {
        self.verse_input = value.to_string();
    }
}
