//! Dropdown placement
//!
//! Decides whether the candidate dropdown opens below or above its anchor,
//! how many rows it may show, and how far it has to be shifted when drawn
//! upwards. Units are whatever the host measures in (pixels, terminal rows).

use crate::error::SuggestError;

/// Default space taken by the dropdown's border and shadow
pub const DEFAULT_CHROME_PADDING: f64 = 8.0;
/// Default border added to the anchor height to get a row height
pub const DEFAULT_ROW_BORDER: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Down,
    Up,
}

/// Anchor measurements as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorGeometry {
    /// Anchor top within its scroll container
    pub top_offset: f64,
    pub scroll_position: f64,
    pub height: f64,
    pub width: f64,
    pub viewport_height: f64,
}

impl AnchorGeometry {
    pub fn is_laid_out(&self) -> bool {
        self.height > 0.0 && self.viewport_height > 0.0
    }
}

/// Space available around the anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportConstraints {
    pub anchor_top_offset: f64,
    pub anchor_height: f64,
    pub space_above: f64,
    pub space_below: f64,
    pub desired_row_count: usize,
    pub row_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlacementDecision {
    pub direction: Direction,
    /// Row limit when neither side fits the desired row count
    pub max_rows: Option<usize>,
    /// Vertical shift applied when opening upwards
    pub margin_offset: Option<f64>,
}

impl PlacementDecision {
    /// Row limit to use: the computed limit, else the desired row count
    pub fn effective_max_rows(&self, desired_row_count: usize) -> usize {
        self.max_rows.unwrap_or(desired_row_count)
    }
}

/// Pick a direction and optional row limit for the dropdown
pub fn decide_placement(
    constraints: &ViewportConstraints,
    desired_row_count: usize,
) -> PlacementDecision {
    let desired_height = desired_row_count as f64 * constraints.row_height;
    let below = constraints.space_below;
    let above = constraints.space_above;

    if below >= desired_height {
        return PlacementDecision::default();
    }

    if above >= desired_height {
        return PlacementDecision {
            direction: Direction::Up,
            ..PlacementDecision::default()
        };
    }

    let (direction, space) = if above > below {
        (Direction::Up, above)
    } else {
        (Direction::Down, below)
    };

    PlacementDecision {
        direction,
        max_rows: Some(rows_fitting(space, constraints.row_height)),
        margin_offset: None,
    }
}

fn rows_fitting(space: f64, row_height: f64) -> usize {
    if space <= 0.0 || row_height <= 0.0 {
        return 0;
    }
    (space / row_height).floor() as usize
}

/// Host-specific placement constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportPlacer {
    pub chrome_padding: f64,
    pub row_border: f64,
}

impl Default for ViewportPlacer {
    fn default() -> Self {
        Self {
            chrome_padding: DEFAULT_CHROME_PADDING,
            row_border: DEFAULT_ROW_BORDER,
        }
    }
}

impl ViewportPlacer {
    pub fn new(chrome_padding: f64, row_border: f64) -> Self {
        Self {
            chrome_padding,
            row_border,
        }
    }

    /// Measure the space around the anchor
    ///
    /// Fails with [`SuggestError::GeometryUnavailable`] until the anchor has
    /// been laid out.
    pub fn constraints(
        &self,
        geometry: &AnchorGeometry,
        desired_row_count: usize,
    ) -> Result<ViewportConstraints, SuggestError> {
        if !geometry.is_laid_out() {
            return Err(SuggestError::GeometryUnavailable {
                height: geometry.height,
                viewport_height: geometry.viewport_height,
            });
        }

        let top = geometry.top_offset - geometry.scroll_position;
        let row_height = geometry.height + self.row_border;

        Ok(ViewportConstraints {
            anchor_top_offset: top,
            anchor_height: geometry.height,
            space_above: top,
            space_below: geometry.viewport_height - top - row_height,
            desired_row_count,
            row_height,
        })
    }

    /// Shift for a dropdown drawn above its anchor
    pub fn margin_offset(
        &self,
        candidate_count: usize,
        max_rows_or_desired: usize,
        row_height: f64,
    ) -> f64 {
        let visible_rows = candidate_count.min(max_rows_or_desired);
        -((visible_rows + 1) as f64) * row_height - self.chrome_padding
    }

    pub fn dropdown_height(
        &self,
        candidate_count: usize,
        effective_max_rows: usize,
        row_height: f64,
    ) -> f64 {
        if candidate_count >= effective_max_rows {
            effective_max_rows as f64 * row_height
        } else {
            candidate_count as f64 * row_height + self.chrome_padding
        }
    }
}

#[cfg(test)]
#[path = "placement_tests.rs"]
mod placement_tests;
