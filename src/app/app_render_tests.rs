//! Tests for app_render

use std::time::Instant;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::crossterm::event::KeyCode;
use ratatui::style::Modifier;

use crate::app::App;
use crate::config::CellSettings;
use crate::test_utils::test_helpers::{key, test_app};

fn render(app: &mut App) -> Buffer {
    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();
    terminal.backend().buffer().clone()
}

fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol())
        .collect()
}

fn type_str(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key_event(key(KeyCode::Char(c)), Instant::now());
        app.tick(Instant::now());
    }
}

#[test]
fn test_grid_shows_row_numbers_and_values() {
    let mut app = App::new(
        vec!["Apple".to_string(), "Kiwi".to_string()],
        None,
        CellSettings::default(),
    );
    let buffer = render(&mut app);

    assert!(row_text(&buffer, 0).contains("cellsuggest"));
    assert!(row_text(&buffer, 1).starts_with("   1 │ Apple"));
    assert!(row_text(&buffer, 2).starts_with("   2 │ Kiwi"));
    assert!(row_text(&buffer, 23).contains("Enter to edit"));
}

#[test]
fn test_no_dropdown_when_not_editing() {
    let mut app = test_app(CellSettings::default());
    let buffer = render(&mut app);

    assert!(!row_text(&buffer, 2).contains('┌'));
}

#[test]
fn test_dropdown_drawn_below_cell() {
    let mut app = test_app(CellSettings::default());
    type_str(&mut app, "a");
    let buffer = render(&mut app);

    assert!(row_text(&buffer, 1).contains("   1 │ a"));
    assert!(row_text(&buffer, 2).contains('┌'));
    assert!(row_text(&buffer, 3).contains("Apple"));
    assert!(row_text(&buffer, 4).contains("Banana"));
    assert!(row_text(&buffer, 5).contains("Grape"));
    assert!(row_text(&buffer, 6).contains("Pineapple"));
    assert!(row_text(&buffer, 7).contains('└'));
}

#[test]
fn test_dropdown_drawn_above_cell_near_bottom() {
    let mut app = test_app(CellSettings::default());
    app.move_selection(20);
    type_str(&mut app, "ap");
    let buffer = render(&mut app);

    // Row 21 is edited at y 21; three rows plus border end right above it
    assert!(row_text(&buffer, 16).contains('┌'));
    assert!(row_text(&buffer, 17).contains("Apple"));
    assert!(row_text(&buffer, 19).contains("Pineapple"));
    assert!(row_text(&buffer, 20).contains('└'));
    assert!(row_text(&buffer, 21).contains("  21 │ ap"));
}

#[test]
fn test_selected_candidate_marked() {
    let mut app = test_app(CellSettings::default());
    type_str(&mut app, "ap");
    app.handle_key_event(key(KeyCode::Down), Instant::now());
    let buffer = render(&mut app);

    assert!(row_text(&buffer, 3).contains("► Apple"));
    assert!(row_text(&buffer, 4).contains("  Grape"));
    assert!(row_text(&buffer, 23).contains("Esc cancel"));
}

#[test]
fn test_match_is_emphasised() {
    let mut app = test_app(CellSettings::default());
    type_str(&mut app, "ap");
    let buffer = render(&mut app);

    // "Grape" on row 4: the dropdown starts at x 7, then border and marker
    assert!(row_text(&buffer, 4).contains("Grape"));
    let g = &buffer[(10, 4)];
    let a = &buffer[(12, 4)];

    assert_eq!(g.symbol(), "G");
    assert_eq!(a.symbol(), "a");

    assert!(!g.modifier.contains(Modifier::BOLD));
    assert!(a.modifier.contains(Modifier::BOLD));
}

#[test]
fn test_notice_in_help_line() {
    let mut app = test_app(CellSettings::default()).with_notice(Some("Config warning".to_string()));
    let buffer = render(&mut app);

    assert!(row_text(&buffer, 23).contains("Config warning"));
}

#[test]
fn test_empty_candidate_list_draws_nothing() {
    let mut app = test_app(CellSettings::default());
    type_str(&mut app, "zz");
    let buffer = render(&mut app);

    assert!(!row_text(&buffer, 2).contains('┌'));
}
