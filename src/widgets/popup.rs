use ratatui::{Frame, layout::Rect, widgets::Clear};

/// Area of a dropdown hanging under `anchor`
///
/// `margin` shifts the area vertically in rows (negative moves it up, which
/// is how a dropdown opened upwards is drawn). The result never leaves
/// `bounds`.
pub fn dropdown_area(anchor: Rect, width: u16, height: u16, margin: i32, bounds: Rect) -> Rect {
    let top = i32::from(anchor.bottom()) + margin;
    let y = top.clamp(i32::from(bounds.y), i32::from(bounds.bottom())) as u16;
    let x = anchor.x.clamp(bounds.x, bounds.right());

    Rect {
        x,
        y,
        width: width.min(bounds.right() - x),
        height: height.min(bounds.bottom() - y),
    }
}

/// Rows a fractional margin occupies on a terminal grid
pub fn margin_rows(margin: Option<f64>) -> i32 {
    margin.map(|m| m.round() as i32).unwrap_or(0)
}

pub fn clear_area(frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);
}

#[cfg(test)]
#[path = "popup_tests.rs"]
mod popup_tests;
