use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, FormFocus, HOME_ENTRIES, STACKED_FORM_HEIGHT};
use ayat_core::{messages, Hint, ViewBinding, ViewId, VerseSlot};

const FORM_WIDTH: u16 = 34;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    app.update_layout(area.width);

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    app.chapter_area = None;
    app.result_area = None;
    match app.current_view() {
        Some(ViewId::Home) => render_home(app, frame, body_area),
        Some(ViewId::Lookup) => render_lookup(app, frame, body_area),
        Some(ViewId::Secondary) => render_secondary(frame, body_area),
        // Unknown view: nothing visible
        None => {}
    }

    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let view_title = app.current_view().map(|v| v.title()).unwrap_or_default();

    let title = Line::from(vec![
        Span::styled(" آيات ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(format!("{} ", view_title), Style::default().fg(Color::White)),
        Span::styled(
            format!("[{}] ", app.resolver.source().kind().display_name()),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let editing = app.current_view() == Some(ViewId::Lookup) && app.focus == FormFocus::Verse;
    let mode_style = if editing {
        Style::default().bg(Color::Yellow).fg(Color::Black)
    } else {
        Style::default().bg(Color::Blue).fg(Color::White)
    };

    let mode_text = match app.current_view() {
        Some(ViewId::Home) => " HOME ",
        Some(ViewId::Lookup) if editing => " VERSE ",
        Some(ViewId::Lookup) => " LOOKUP ",
        Some(ViewId::Secondary) => " SECONDARY ",
        None => " - ",
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);
    let hint = |key: &'static str, label: &'static str| {
        [Span::styled(key, key_style), Span::styled(label, label_style)]
    };

    let hints: Vec<Span> = match (app.current_view(), app.focus) {
        (Some(ViewId::Home), _) => [
            hint(" j/k ", " nav "),
            hint(" Enter ", " open "),
            hint(" 1-3 ", " views "),
            hint(" q ", " quit "),
        ]
        .concat(),
        (Some(ViewId::Lookup), FormFocus::Chapters) => [
            hint(" j/k ", " chapter "),
            hint(" 0-9 ", " verse "),
            hint(" Tab ", " focus "),
            hint(" Enter ", " show "),
            hint(" Esc ", " home "),
            hint(" q ", " quit "),
        ]
        .concat(),
        (Some(ViewId::Lookup), FormFocus::Verse) => [
            hint(" 0-9 ", " type "),
            hint(" ↑/↓ ", " chapter "),
            hint(" Enter ", " show "),
            hint(" Esc ", " stop typing "),
        ]
        .concat(),
        (Some(ViewId::Secondary), _) => [
            hint(" Esc ", " home "),
            hint(" 1-3 ", " views "),
            hint(" q ", " quit "),
        ]
        .concat(),
        (None, _) => [hint(" Esc ", " home "), hint(" q ", " quit ")].concat(),
    };

    let footer_content = Line::from(
        vec![Span::styled(mode_text, mode_style), Span::styled(" ", label_style)]
            .into_iter()
            .chain(hints)
            .collect::<Vec<_>>(),
    );

    let footer = Paragraph::new(footer_content).style(Style::default().bg(Color::Black));
    frame.render_widget(footer, area);
}

fn render_home(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", ViewId::Home.title()));

    let items: Vec<ListItem> = HOME_ENTRIES
        .iter()
        .enumerate()
        .map(|(i, view)| ListItem::new(format!(" {}. {} ", i + 2, view.title())))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.home_state);
}

fn render_secondary(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", ViewId::Secondary.title()));

    let placeholder = Paragraph::new(messages::SECONDARY_PLACEHOLDER)
        .block(block)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true });
    frame.render_widget(placeholder, area);
}

fn render_lookup(app: &mut App, frame: &mut Frame, area: Rect) {
    let (form_area, result_area) = if app.view.is_narrow() {
        // Stacked: scrolling eats into the form until the result reaches the top
        let form_height = STACKED_FORM_HEIGHT.saturating_sub(app.view.scroll());
        let [form, result] =
            Layout::vertical([Constraint::Length(form_height), Constraint::Min(0)]).areas(area);
        (form, result)
    } else {
        let [form, result] =
            Layout::horizontal([Constraint::Length(FORM_WIDTH), Constraint::Min(0)]).areas(area);
        (form, result)
    };

    app.result_area = Some(result_area);
    if form_area.height > 0 {
        render_form(app, frame, form_area);
    }

    if app.view.result_visible() {
        render_result(app, frame, result_area);
    } else if app.view.empty_state_visible() {
        render_empty_state(frame, result_area);
    }
}

fn render_form(app: &mut App, frame: &mut Frame, area: Rect) {
    let [chapters_area, input_area, hint_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    app.chapter_area = Some(chapters_area);

    // Chapter selector
    let chapters_focused = app.focus == FormFocus::Chapters;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if chapters_focused { Color::Cyan } else { Color::DarkGray }))
        .title(" السورة ");

    let items: Vec<ListItem> = app
        .view
        .chapter_options()
        .iter()
        .map(|o| ListItem::new(format!(" {} ", o.label)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    app.chapter_state.select(app.view.selected_option());
    frame.render_stateful_widget(list, chapters_area, &mut app.chapter_state);

    // Verse number input
    let verse_focused = app.focus == FormFocus::Verse;
    let title = match app.view.verse_max() {
        Some(max) => format!(" رقم الآية (1-{}) ", max),
        None => " رقم الآية ".to_string(),
    };
    let mut input_text = app.view.verse_input_text().to_string();
    if verse_focused {
        input_text.push('▏');
    }
    let input = Paragraph::new(input_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if verse_focused { Color::Yellow } else { Color::DarkGray }))
            .title(title),
    );
    frame.render_widget(input, input_area);

    // Hint line
    let hint = app.view.verse_hint();
    let hint_style = match hint {
        Hint::CatalogUnavailable => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::Gray),
    };
    frame.render_widget(Paragraph::new(format!(" {}", hint.text())).style(hint_style), hint_area);
}

fn render_empty_state(frame: &mut Frame, area: Rect) {
    let placeholder = Paragraph::new(messages::EMPTY_STATE)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true });
    frame.render_widget(placeholder, area);
}

fn render_result(app: &App, frame: &mut Frame, area: Rect) {
    let [verse_area, commentary_area] =
        Layout::vertical([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(area);

    // Verse text, titled with the reference
    let reference = app.view.reference();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(if reference.is_empty() {
            String::new()
        } else {
            format!(" {} ", reference)
        });

    let verse = match app.view.verse() {
        VerseSlot::Empty => Text::default(),
        VerseSlot::Loading => {
            let dots = ".".repeat(app.animation_frame as usize + 1);
            Text::from(Line::from(Span::styled(
                format!("{}{}", messages::LOADING, dots),
                Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            )))
        }
        VerseSlot::Text(text) => Text::from(Line::from(Span::styled(
            text.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))),
        VerseSlot::Notice(notice) => Text::from(
            notice
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Yellow))))
                .collect::<Vec<_>>(),
        ),
    };

    let verse = Paragraph::new(verse)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(verse, verse_area);

    // Commentary with its disclaimer
    let mut lines = Vec::new();
    if let Some(commentary) = app.view.commentary() {
        lines.push(Line::from(commentary.fragment));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            commentary.disclaimer,
            Style::default().fg(Color::Yellow).bg(Color::Black),
        )));
    }

    let commentary = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" تعليق "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(commentary, commentary_area);
}
