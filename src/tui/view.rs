use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use time::macros::format_description;

use crate::control::{ControlSnapshot, SettingState};
use crate::feed::FeedView;
use crate::live::ChannelState;
use crate::model::{Clip, Setting};
use crate::session::DashboardRemote;

use super::App;

const STATUS_LINES: usize = 4;

/// One line of the grouped feed list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum FeedRow {
    Day(String),
    Clip(Clip),
}

/// Flattens the view into day headers followed by their clips.
pub(super) fn feed_rows(view: &FeedView) -> Vec<FeedRow> {
    let mut rows = Vec::with_capacity(view.len() + view.groups.len());
    for group in &view.groups {
        rows.push(FeedRow::Day(format!(
            "{} ({})",
            group.date,
            group.clips.len()
        )));
        rows.extend(group.clips.iter().cloned().map(FeedRow::Clip));
    }
    rows
}

/// Row index of the `nth` clip, skipping day headers.
pub(super) fn row_of_clip(rows: &[FeedRow], nth: usize) -> Option<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, r)| matches!(r, FeedRow::Clip(_)))
        .nth(nth)
        .map(|(i, _)| i)
}

pub(super) fn draw<R: DashboardRemote + 'static>(frame: &mut Frame, app: &App<R>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(STATUS_LINES as u16 + 1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let control = app.session.control();
    let header = Paragraph::new(settings_line(&control))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let view = app.session.view();
    let rows = feed_rows(&view);
    let title = format!("Clips ({})", view.len());
    if rows.is_empty() {
        frame.render_widget(
            Paragraph::new("(no clips yet)")
                .style(Style::default().fg(Color::Gray))
                .block(Block::default().borders(Borders::ALL).title(title)),
            chunks[1],
        );
    } else {
        let items: Vec<ListItem> = rows.iter().map(row_item).collect();
        let mut state = ListState::default();
        state.select(row_of_clip(&rows, app.selected));
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    let lines: Vec<Line> = app
        .status
        .iter()
        .rev()
        .take(STATUS_LINES)
        .rev()
        .map(|s| {
            let style = if s.error {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(s.text.as_str(), style))
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::TOP).title("Status")),
        chunks[2],
    );

    let (live_text, live_color) = match app.session.live_state() {
        ChannelState::Connected => ("live", Color::Green),
        ChannelState::Disconnected => ("offline", Color::Red),
    };
    let footer = Line::from(vec![
        Span::styled(live_text, Style::default().fg(live_color)),
        Span::raw("  a arm  +/- sensitivity  n notify  d delete  r resync  q quit"),
    ]);
    frame.render_widget(
        Paragraph::new(footer).style(Style::default().fg(Color::Gray)),
        chunks[3],
    );
}

fn settings_line(control: &ControlSnapshot) -> Line<'static> {
    let mut spans = vec![Span::styled(
        "Clipwatch",
        Style::default().fg(Color::Black).bg(Color::White),
    )];
    for setting in Setting::ALL {
        spans.push(Span::raw("  "));
        spans.push(Span::raw(format!("{}=", setting.label())));
        spans.push(setting_span(control.get(setting)));
    }
    if !control.loaded {
        spans.push(Span::styled(
            "  (settings not loaded)",
            Style::default().fg(Color::Yellow),
        ));
    }
    Line::from(spans)
}

// Pending values render in yellow with a trailing `*`.
fn setting_span(state: SettingState) -> Span<'static> {
    match state.pending {
        Some(pending) => Span::styled(
            format!("{}*", pending),
            Style::default().fg(Color::Yellow),
        ),
        None => Span::styled(
            state.confirmed.to_string(),
            Style::default().fg(Color::Cyan),
        ),
    }
}

fn row_item(row: &FeedRow) -> ListItem<'static> {
    match row {
        FeedRow::Day(label) => ListItem::new(Line::from(Span::styled(
            label.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))),
        FeedRow::Clip(clip) => {
            let time = clip
                .timestamp
                .datetime()
                .format(format_description!("[hour]:[minute]:[second]"))
                .unwrap_or_else(|_| clip.timestamp.to_rfc3339());
            let mut spans = vec![
                Span::raw("  "),
                Span::styled(time, Style::default().fg(Color::Gray)),
                Span::raw("  "),
                Span::raw(clip.id.to_string()),
            ];
            if !clip.video_ref.is_empty() {
                spans.push(Span::styled("  [video]", Style::default().fg(Color::Green)));
            }
            ListItem::new(Line::from(spans))
        }
    }
}
