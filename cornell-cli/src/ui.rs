//! Terminal UI rendering for the Cornell notes editor

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use cornell_core::{App, Mode, NotePair};

// Catppuccin Mocha colors
const SURFACE0: Color = Color::Rgb(49, 50, 68);
const SURFACE1: Color = Color::Rgb(69, 71, 90);
const TEXT: Color = Color::Rgb(205, 214, 244);
const SUBTEXT0: Color = Color::Rgb(166, 173, 200);
const RED: Color = Color::Rgb(243, 139, 168);
const YELLOW: Color = Color::Rgb(249, 226, 175);
const GREEN: Color = Color::Rgb(166, 227, 161);
const BLUE: Color = Color::Rgb(137, 180, 250);
const MAUVE: Color = Color::Rgb(203, 166, 247);

const CUE_PREVIEW_CHARS: usize = 28;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Length(3), // Topic
            Constraint::Min(0),    // Pairs
            Constraint::Length(6), // Summary
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_title_bar(frame, app, chunks[0]);
    draw_topic(frame, app, chunks[1]);
    draw_pairs(frame, app, chunks[2]);
    draw_summary(frame, app, chunks[3]);
    draw_status_bar(frame, app, chunks[4]);

    match app.mode {
        Mode::Input => draw_input_dialog(frame, app),
        Mode::ConfirmClear => draw_confirm_clear(frame),
        Mode::Help => draw_help(frame),
        Mode::Normal => {}
    }
}

fn draw_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let count = app.document.pairs.len();
    let current = if count > 0 { app.selected + 1 } else { 0 };

    let title_text = format!(" Cornell Notes - {} [{}/{}]", app.title(), current, count);
    let title_bar = Paragraph::new(title_text).style(Style::default().fg(TEXT).bg(SURFACE0));

    frame.render_widget(title_bar, area);
}

fn draw_topic(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SUBTEXT0))
        .title("Topic (t)");

    let topic = if app.document.topic.is_empty() {
        Span::styled("My Notes", Style::default().fg(SUBTEXT0))
    } else {
        Span::styled(
            app.document.topic.as_str(),
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
        )
    };

    frame.render_widget(Paragraph::new(Line::from(topic)).block(block), area);
}

fn draw_pairs(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35), // Cues
            Constraint::Percentage(65), // Notes
        ])
        .split(area);

    draw_cue_column(frame, app, chunks[0]);
    draw_notes_column(frame, app, chunks[1]);
}

fn draw_cue_column(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BLUE))
        .title(format!("Cues ({})", app.document.pairs.len()));

    let items: Vec<ListItem> = app
        .document
        .pairs
        .iter()
        .enumerate()
        .map(|(i, pair)| {
            let selected = i == app.selected;
            let marker = if selected { ">" } else { " " };
            let star = if pair.is_important { "⭐" } else { "  " };

            let style = if selected {
                Style::default().fg(TEXT).bg(SURFACE1)
            } else if pair.is_blank() {
                Style::default().fg(SUBTEXT0)
            } else {
                Style::default().fg(TEXT)
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", marker), style),
                Span::styled(star, style.fg(YELLOW)),
                Span::styled(format!(" {}", cue_preview(pair)), style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn draw_notes_column(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SUBTEXT0))
        .title("Notes (n)");

    let Some(pair) = app.selected_pair() else {
        let hint = Paragraph::new("No pairs. Press 'a' to add one.")
            .style(Style::default().fg(SUBTEXT0))
            .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            pair.cue.as_str(),
            Style::default().fg(MAUVE).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(
        pair.notes
            .lines()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(TEXT)))),
    );

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn draw_summary(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SUBTEXT0))
        .title("Summary (S)");

    let paragraph = Paragraph::new(app.document.summary.as_str())
        .style(Style::default().fg(TEXT))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode_str = match app.mode {
        Mode::Normal => "NORMAL",
        Mode::Input => "INPUT",
        Mode::ConfirmClear => "CONFIRM",
        Mode::Help => "HELP",
    };

    let help_hint = "j/k select | a add | c cue | n notes | b bulk | e/m export | ? help";

    let (text, color) = match &app.notice {
        Some(notice) if notice.is_error => (notice.message.as_str(), RED),
        Some(notice) => (notice.message.as_str(), GREEN),
        None => (help_hint, SUBTEXT0),
    };

    let status_bar = Paragraph::new(format!(" {} | {}", mode_str, text))
        .style(Style::default().fg(color).bg(SURFACE0));

    frame.render_widget(status_bar, area);
}

fn draw_input_dialog(frame: &mut Frame, app: &App) {
    let height = if app.input_target.is_multiline() { 14 } else { 5 };
    let area = centered_rect(70, height, frame.area());
    frame.render_widget(Clear, area);

    let hint = if app.input_target.is_multiline() {
        "Ctrl+S save, Esc cancel"
    } else {
        "Enter save, Esc cancel"
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GREEN))
        .title(format!("{} ({})", app.input_target.label(), hint));

    let input = Paragraph::new(format!("{}_", app.input_buffer))
        .style(Style::default().fg(TEXT))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(input, area);
}

fn draw_confirm_clear(frame: &mut Frame) {
    let area = centered_rect(50, 5, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(RED))
        .title("Clear all notes?");

    let text = Paragraph::new("This cannot be undone. Press y to confirm, any other key to cancel.")
        .style(Style::default().fg(TEXT))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(text, area);
}

fn draw_help(frame: &mut Frame) {
    let area = centered_rect(60, 24, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BLUE))
        .title("Help (press any key to close)");

    let heading = Style::default().fg(MAUVE).add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(Span::styled("Pairs", heading)),
        Line::from("  j/k      Select next/prev pair"),
        Line::from("  a        Add pair"),
        Line::from("  d        Delete pair"),
        Line::from("  K/J      Move pair up/down"),
        Line::from("  s        Toggle important"),
        Line::from("  c/Enter  Edit cue"),
        Line::from("  n        Edit notes"),
        Line::from(""),
        Line::from(Span::styled("Document", heading)),
        Line::from("  t / S    Edit topic / summary"),
        Line::from("  b        Bulk add pairs from pasted text"),
        Line::from("  C        Clear all"),
        Line::from(""),
        Line::from(Span::styled("File", heading)),
        Line::from("  o        Open .json or .md"),
        Line::from("  e / m    Export as JSON / Markdown"),
        Line::from("  q        Quit"),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", Style::default().fg(SUBTEXT0))),
    ];

    let paragraph = Paragraph::new(help_text).block(block);
    frame.render_widget(paragraph, area);
}

fn cue_preview(pair: &NotePair) -> String {
    let first_line = pair.cue.lines().next().unwrap_or("").trim();
    if first_line.is_empty() {
        return "(empty)".to_string();
    }
    let mut preview: String = first_line.chars().take(CUE_PREVIEW_CHARS).collect();
    if first_line.chars().count() > CUE_PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
