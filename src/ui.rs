//! UI rendering helpers for the terminal user interface.
//!
//! One draw function per screen, all rendered with `ratatui`. Nothing in
//! here mutates state; the runtime hands over what to show.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    widgets::{
        Block, Borders, List, ListItem, ListState, Padding, Paragraph, Tabs, Wrap,
        canvas::{Canvas, Circle},
    },
};

use crate::app::{App, Screen};
use crate::config::UiSettings;
use crate::session::PulseFrame;

/// Player-screen data sampled by the runtime for this frame.
pub struct PlayerView<'a> {
    /// Already formatted, e.g. `"14 min 59 sec"`.
    pub time_left: String,
    pub pulse: PulseFrame,
    /// Shown when there is no playback, e.g. a missing asset.
    pub notice: Option<&'a str>,
}

/// Outer ring radius relative to the inner circle, as 220/200 in points.
const OUTER_RING_RATIO: f64 = 1.1;

fn controls_text(screen: &Screen) -> &'static str {
    match screen {
        Screen::Home => "[j/k] up/down | [enter] choose | [q] quit",
        Screen::Meditate { .. } => "[h/l] duration | [enter] play | [esc] back | [q] quit",
        Screen::Player { .. } => "[s/enter/esc] stop | [q] quit",
    }
}

fn bordered(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_alignment(Alignment::Center)
}

/// Render the current screen of `app` into `frame`.
pub fn draw(frame: &mut Frame, app: &App, player: Option<&PlayerView>, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(bordered(" stillpoint "));
    frame.render_widget(header, chunks[0]);

    match app.screen() {
        Screen::Home => draw_home(frame, app, chunks[1]),
        Screen::Meditate { title } => draw_meditate(frame, app, title, chunks[1]),
        Screen::Player { title, .. } => draw_player(frame, title, player, chunks[1]),
    }

    let footer = Paragraph::new(controls_text(app.screen()))
        .block(bordered(" controls ").padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        }))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[2]);
}

fn draw_home(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .catalog
        .tracks()
        .iter()
        .map(|t| ListItem::new(format!("▶  {}", t.title)))
        .collect();

    let list = List::new(items)
        .block(bordered(" tracks "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if !app.catalog.tracks().is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_meditate(frame: &mut Frame, app: &App, title: &str, area: Rect) {
    let block = bordered(" meditate ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(title)
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD)),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new("Select Meditation Time").alignment(Alignment::Center),
        rows[1],
    );

    let options: Vec<String> = app.durations().iter().map(|m| format!("{m} min")).collect();
    let picker = Tabs::new(options)
        .select(app.duration_index())
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .divider("|");
    frame.render_widget(picker, centered_row(rows[2], 48));

    frame.render_widget(
        Paragraph::new("[ Play ]")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
        rows[3],
    );
}

fn draw_player(frame: &mut Frame, title: &str, player: Option<&PlayerView>, area: Rect) {
    let block = bordered(" player ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(format!("Playing: {title}"))
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD)),
        rows[0],
    );

    let pulse = player.map(|p| p.pulse).unwrap_or(PulseFrame::RESTING);
    let circles = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.5, 1.5])
        .y_bounds([-1.5, 1.5])
        .paint(move |ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: pulse.inner,
                color: Color::White,
            });
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: pulse.outer * OUTER_RING_RATIO,
                color: Color::Gray,
            });
        });
    frame.render_widget(circles, rows[1]);

    let time_left = player.map(|p| p.time_left.as_str()).unwrap_or("0 min 0 sec");
    frame.render_widget(
        Paragraph::new(format!("Time left: {time_left}")).alignment(Alignment::Center),
        rows[2],
    );

    if let Some(notice) = player.and_then(|p| p.notice) {
        frame.render_widget(
            Paragraph::new(notice)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Yellow)),
            rows[3],
        );
    }

    frame.render_widget(
        Paragraph::new("[ Stop ]")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        rows[4],
    );
}

/// A horizontally centered slice of `r`, at most `width` columns wide.
fn centered_row(r: Rect, width: u16) -> Rect {
    let width = width.min(r.width);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y,
        width,
        height: r.height,
    }
}
