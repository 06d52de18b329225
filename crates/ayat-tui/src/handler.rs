use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::time::Instant;

use crate::app::{App, FormFocus};
use crate::tui::AppEvent;
use ayat_core::ViewId;

pub fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(width) => app.update_layout(width),
        AppEvent::Tick => app.tick(Instant::now()),
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any view
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.current_view() {
        Some(ViewId::Home) => handle_home(app, key),
        Some(ViewId::Lookup) => match app.focus {
            FormFocus::Chapters => handle_lookup_chapters(app, key),
            FormFocus::Verse => handle_lookup_verse(app, key),
        },
        Some(ViewId::Secondary) => handle_secondary(app, key),
        None => handle_no_view(app, key),
    }
}

/// View shortcuts shared by screens without text entry.
fn handle_view_shortcut(app: &mut App, key: KeyEvent) -> bool {
    let target = match key.code {
        KeyCode::Char('1') => ViewId::Home,
        KeyCode::Char('2') => ViewId::Lookup,
        KeyCode::Char('3') => ViewId::Secondary,
        _ => return false,
    };
    app.navigate(target);
    true
}

fn handle_home(app: &mut App, key: KeyEvent) {
    if handle_view_shortcut(app, key) {
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('j') | KeyCode::Down => app.home_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.home_nav_up(),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => app.home_enter(),
        _ => {}
    }
}

fn handle_lookup_chapters(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc => app.navigate(ViewId::Home),

        // Chapter selection
        KeyCode::Char('j') | KeyCode::Down => app.chapter_down(),
        KeyCode::Char('k') | KeyCode::Up => app.chapter_up(),
        KeyCode::Char('g') | KeyCode::Home => app.chapter_first(),
        KeyCode::Char('G') | KeyCode::End => app.chapter_last(),

        // Typing a digit jumps straight into the verse field
        KeyCode::Char(c) if c.is_ascii_digit() => {
            app.focus = FormFocus::Verse;
            app.verse_push(c);
        }

        KeyCode::Tab => app.focus = FormFocus::Verse,
        KeyCode::Enter => app.submit_lookup(),

        // Stacked layout scrolling
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => app.scroll_down(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => app.scroll_up(),

        _ => {}
    }
}

fn handle_lookup_verse(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Tab => app.focus = FormFocus::Chapters,
        KeyCode::Enter => app.submit_lookup(),
        KeyCode::Backspace => app.verse_pop(),
        KeyCode::Char(c) if c.is_ascii_digit() => app.verse_push(c),

        // Chapter can still be changed while the verse field is focused
        KeyCode::Down => app.chapter_down(),
        KeyCode::Up => app.chapter_up(),

        _ => {}
    }
}

fn handle_secondary(app: &mut App, key: KeyEvent) {
    if handle_view_shortcut(app, key) {
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left => app.navigate(ViewId::Home),
        _ => {}
    }
}

fn handle_no_view(app: &mut App, key: KeyEvent) {
    if handle_view_shortcut(app, key) {
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc => app.navigate(ViewId::Home),
        _ => {}
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.current_view() != Some(ViewId::Lookup) {
        return;
    }

    let hit = |area: Option<Rect>| {
        area.map(|r| point_in_rect(mouse.column, mouse.row, r))
            .unwrap_or(false)
    };
    let in_chapters = hit(app.chapter_area);
    let in_result = hit(app.result_area);

    match mouse.kind {
        MouseEventKind::ScrollDown if in_chapters => app.chapter_down(),
        MouseEventKind::ScrollUp if in_chapters => app.chapter_up(),
        MouseEventKind::ScrollDown if in_result => app.scroll_down(),
        MouseEventKind::ScrollUp if in_result => app.scroll_up(),
        _ => {}
    }
}
