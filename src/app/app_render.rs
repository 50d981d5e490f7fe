use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::app_state::App;
use crate::suggest::Highlight;
use crate::widgets::popup;

// Border plus the "► " marker
const DROPDOWN_PADDING: u16 = 4;
const MIN_DROPDOWN_WIDTH: u16 = 12;

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        self.resize(frame.area());

        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

        render_title(frame, layout[0]);
        render_grid(self, frame, layout[1]);
        render_help_line(self, frame, layout[2]);

        if self.is_editing() && self.editor.host().is_dropdown_open() {
            render_dropdown(self, frame);
        }
    }
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Line::from(Span::styled(
        " cellsuggest ",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(title), area);
}

fn render_grid(app: &App, frame: &mut Frame, area: Rect) {
    let visible = usize::from(area.height);

    for (offset, row) in (app.scroll()..app.cells().len()).take(visible).enumerate() {
        let y = area.y + offset as u16;
        let is_selected = row == app.selected();

        let label_style = if is_selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let label = Paragraph::new(Span::styled(format!("{:>4} │ ", row + 1), label_style));
        frame.render_widget(label, Rect::new(area.x, y, area.width, 1));

        let Some(cell) = app.cell_area(row) else {
            continue;
        };

        if is_selected && app.is_editing() {
            frame.render_widget(app.editor.host().textarea(), cell);
            continue;
        }

        let cell_style = if is_selected {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::White)
        };
        let text = Paragraph::new(app.cells()[row].as_str()).style(cell_style);
        frame.render_widget(text, cell);
    }
}

fn render_help_line(app: &App, frame: &mut Frame, area: Rect) {
    let line = match app.notice() {
        Some(notice) => Line::from(Span::styled(
            format!(" {} ", notice),
            Style::default().fg(Color::Yellow),
        )),
        None if app.is_editing() => {
            Line::from(" ↑↓ choose  Enter commit  Tab commit and next  Esc cancel ")
        }
        None => Line::from(" type or Enter to edit  ↑↓ move  Del clear  Esc quit "),
    };
    frame.render_widget(
        Paragraph::new(line).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

/// Draw the candidate list under (or, shifted by its margin, over) the cell
fn render_dropdown(app: &App, frame: &mut Frame) {
    let list = app.editor.widget();
    if list.rows().is_empty() {
        return;
    }

    let host = app.editor.host();
    let width = list.width().unwrap_or_else(|| content_width(list.rows()));
    let area = popup::dropdown_area(
        host.anchor(),
        width.max(MIN_DROPDOWN_WIDTH),
        list.height(),
        popup::margin_rows(host.margin()),
        frame.area(),
    );
    if area.height < 3 {
        return;
    }

    let items: Vec<ListItem> = list
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let marker = if Some(i) == list.selected() { "► " } else { "  " };
            ListItem::new(row_line(marker, row, list.highlight()))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));
    let widget = List::new(items).block(block).highlight_style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default().with_selected(list.selected());

    popup::clear_area(frame, area);
    frame.render_stateful_widget(widget, area, &mut state);
}

/// Row text with the matched part emphasised
fn row_line<'a>(marker: &'a str, text: &'a str, highlight: &Highlight) -> Line<'a> {
    let plain = Style::default().fg(Color::White);
    let matched = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    match highlight.split(text) {
        Some((before, hit, after)) => Line::from(vec![
            Span::raw(marker),
            Span::styled(before, plain),
            Span::styled(hit, matched),
            Span::styled(after, plain),
        ]),
        None => Line::from(vec![Span::raw(marker), Span::styled(text, plain)]),
    }
}

fn content_width(rows: &[String]) -> u16 {
    let widest = rows.iter().map(|r| r.width()).max().unwrap_or(0);
    u16::try_from(widest)
        .unwrap_or(u16::MAX)
        .saturating_add(DROPDOWN_PADDING)
}

#[cfg(test)]
#[path = "app_render_tests.rs"]
mod app_render_tests;
