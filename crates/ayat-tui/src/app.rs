use ayat_core::router;
use ayat_core::{
    ChapterPicker, ClampPolicy, LookupRequest, Resolver, SourceError, VerseResult, VerseSlot,
    VerseSource, ViewBinding, ViewId, ViewState,
};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Rows the lookup form takes when the layout is stacked. Scrolling past
/// this many rows brings the result panel to the top.
pub const STACKED_FORM_HEIGHT: u16 = 14;

/// Entries of the home menu, in display order.
pub const HOME_ENTRIES: [ViewId; 2] = [ViewId::Lookup, ViewId::Secondary];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Chapters,
    Verse,
}

pub struct Settings {
    pub source: VerseSource,
    pub clamp: ClampPolicy,
    pub narrow_width: u16,
}

/// A fetch running on the runtime, rendered when it finishes.
pub struct PendingLookup {
    pub request: LookupRequest,
    pub handle: JoinHandle<Result<VerseResult, SourceError>>,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub focus: FormFocus,
    pub narrow_width: u16,

    // Named slots the widgets are drawn from
    pub view: ViewState,

    // Lookup machinery
    pub picker: ChapterPicker,
    pub resolver: Resolver,
    pub lookups: Vec<PendingLookup>,

    // Widget state
    pub home_state: ListState,
    pub chapter_state: ListState,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Panel areas for mouse hit-testing (updated during render)
    pub chapter_area: Option<Rect>,
    pub result_area: Option<Rect>,
}

impl App {
    /// Loads the catalog before anything is wired, so the first chapter-change
    /// pass never sees an empty catalog.
    pub async fn new(settings: Settings) -> anyhow::Result<Self> {
        info!(source = settings.source.kind().as_str(), "starting verse lookup");

        let mut view = ViewState::new();
        let catalog = settings.source.fetch_chapter_list().await;
        let picker = ChapterPicker::attach(catalog, settings.clamp, &mut view);
        info!(
            chapters = picker.catalog().map(|c| c.len()).unwrap_or(0),
            clamp = picker.clamp_policy().as_str(),
            "chapter picker ready"
        );
        let resolver = Resolver::new(settings.source);

        let mut home_state = ListState::default();
        home_state.select(Some(0));

        Ok(Self {
            should_quit: false,
            focus: FormFocus::Chapters,
            narrow_width: settings.narrow_width,

            view,

            picker,
            resolver,
            lookups: Vec::new(),

            home_state,
            chapter_state: ListState::default(),

            animation_frame: 0,

            chapter_area: None,
            result_area: None,
        })
    }

    pub fn current_view(&self) -> Option<ViewId> {
        self.view.current_view()
    }

    pub fn navigate(&mut self, target: ViewId) {
        router::navigate_to(&mut self.view, target);
        if target == ViewId::Lookup {
            self.focus = FormFocus::Chapters;
        }
    }

    pub fn navigate_named(&mut self, name: &str) {
        if let Some(target) = router::navigate_to_named(&mut self.view, name) {
            if target == ViewId::Lookup {
                self.focus = FormFocus::Chapters;
            }
        }
    }

    // Home menu
    pub fn home_nav_down(&mut self) {
        let i = self.home_state.selected().unwrap_or(0);
        self.home_state.select(Some((i + 1).min(HOME_ENTRIES.len() - 1)));
    }

    pub fn home_nav_up(&mut self) {
        let i = self.home_state.selected().unwrap_or(0);
        self.home_state.select(Some(i.saturating_sub(1)));
    }

    pub fn home_enter(&mut self) {
        if let Some(&target) = self.home_state.selected().and_then(|i| HOME_ENTRIES.get(i)) {
            self.navigate(target);
        }
    }

    // Chapter selection; every move fires the change handler
    pub fn chapter_down(&mut self) {
        let len = self.view.chapter_options().len();
        if len > 0 {
            let i = self.view.selected_option().unwrap_or(0);
            self.select_chapter_index((i + 1).min(len - 1));
        }
    }

    pub fn chapter_up(&mut self) {
        let i = self.view.selected_option().unwrap_or(0);
        self.select_chapter_index(i.saturating_sub(1));
    }

    pub fn chapter_first(&mut self) {
        self.select_chapter_index(0);
    }

    pub fn chapter_last(&mut self) {
        let len = self.view.chapter_options().len();
        if len > 0 {
            self.select_chapter_index(len - 1);
        }
    }

    fn select_chapter_index(&mut self, idx: usize) {
        if self.view.select_option(idx) {
            let selected = self.view.selected_chapter();
            self.picker.on_chapter_change(&mut self.view, selected);
        }
    }

    // Verse input
    pub fn verse_push(&mut self, c: char) {
        self.view.push_verse_digit(c);
    }

    pub fn verse_pop(&mut self) {
        self.view.pop_verse_digit();
    }

    /// Start a lookup from the current form values. Incomplete forms are
    /// ignored without any visible change.
    pub fn submit_lookup(&mut self) {
        let chapter = self.view.selected_chapter();
        let verse = self.view.verse_input();

        if let Some(request) = self.resolver.begin(&mut self.view, chapter, verse) {
            let handle = tokio::spawn(self.resolver.fetch(request));
            self.lookups.push(PendingLookup { request, handle });
        }
    }

    /// Render every lookup that has finished, in the order they are found.
    pub async fn poll_lookups(&mut self) {
        let mut i = 0;
        while i < self.lookups.len() {
            if !self.lookups[i].handle.is_finished() {
                i += 1;
                continue;
            }

            let PendingLookup { request, handle } = self.lookups.remove(i);
            match handle.await {
                Ok(outcome) => self.resolver.finish(&mut self.view, request, outcome),
                Err(e) => error!(error = %e, "lookup task failed"),
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.view.verse(), VerseSlot::Loading)
    }

    /// Called on every Tick event
    pub fn tick(&mut self, now: Instant) {
        if self.is_loading() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
        if self.view.take_due_result_scroll(now)
            && self.view.is_narrow()
            && self.view.result_visible()
        {
            self.view.set_scroll(STACKED_FORM_HEIGHT);
        }
    }

    pub fn update_layout(&mut self, width: u16) {
        self.view.set_narrow(width < self.narrow_width);
    }

    // Stacked layout scrolling
    pub fn scroll_down(&mut self) {
        let scroll = self.view.scroll().saturating_add(1).min(STACKED_FORM_HEIGHT);
        self.view.set_scroll(scroll);
    }

    pub fn scroll_up(&mut self) {
        self.view.set_scroll(self.view.scroll().saturating_sub(1));
    }
}
