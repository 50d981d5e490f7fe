//! Tests for suggest/placement

use super::*;
use proptest::prelude::*;

fn constraints(above: f64, below: f64, row_height: f64) -> ViewportConstraints {
    ViewportConstraints {
        anchor_top_offset: above,
        anchor_height: row_height,
        space_above: above,
        space_below: below,
        desired_row_count: 10,
        row_height,
    }
}

#[test]
fn test_fits_below_opens_down_unlimited() {
    let decision = decide_placement(&constraints(0.0, 200.0, 20.0), 10);
    assert_eq!(decision.direction, Direction::Down);
    assert_eq!(decision.max_rows, None);
}

#[test]
fn test_fits_above_only_opens_up_unlimited() {
    let decision = decide_placement(&constraints(300.0, 40.0, 20.0), 10);
    assert_eq!(decision.direction, Direction::Up);
    assert_eq!(decision.max_rows, None);
    assert_eq!(decision.effective_max_rows(10), 10);
}

#[test]
fn test_up_margin_uses_desired_rows_when_unlimited() {
    let placer = ViewportPlacer::default();
    let decision = decide_placement(&constraints(300.0, 40.0, 20.0), 10);
    let rows = decision.effective_max_rows(10);

    // 30 candidates, only 10 shown
    assert_eq!(placer.margin_offset(30, rows, 20.0), -(11.0 * 20.0) - 8.0);
    // 3 candidates, all shown
    assert_eq!(placer.margin_offset(3, rows, 20.0), -(4.0 * 20.0) - 8.0);
}

#[test]
fn test_neither_fits_limits_to_larger_side_below() {
    let decision = decide_placement(&constraints(50.0, 130.0, 20.0), 10);
    assert_eq!(decision.direction, Direction::Down);
    assert_eq!(decision.max_rows, Some(6));
}

#[test]
fn test_neither_fits_limits_to_larger_side_above() {
    let decision = decide_placement(&constraints(150.0, 60.0, 20.0), 10);
    assert_eq!(decision.direction, Direction::Up);
    assert_eq!(decision.max_rows, Some(7));
}

#[test]
fn test_neither_fits_tie_goes_down() {
    let decision = decide_placement(&constraints(100.0, 100.0, 20.0), 10);
    assert_eq!(decision.direction, Direction::Down);
    assert_eq!(decision.max_rows, Some(5));
}

#[test]
fn test_negative_space_limits_to_zero_rows() {
    let decision = decide_placement(&constraints(-10.0, -30.0, 20.0), 10);
    assert_eq!(decision.direction, Direction::Up);
    assert_eq!(decision.max_rows, Some(0));
}

#[test]
fn test_effective_max_rows_prefers_limit() {
    let decision = PlacementDecision {
        max_rows: Some(3),
        ..PlacementDecision::default()
    };
    assert_eq!(decision.effective_max_rows(10), 3);
    assert_eq!(PlacementDecision::default().effective_max_rows(10), 10);
}

#[test]
fn test_zero_limit_is_not_replaced_by_desired() {
    let decision = PlacementDecision {
        max_rows: Some(0),
        ..PlacementDecision::default()
    };
    assert_eq!(decision.effective_max_rows(10), 0);
}

mod height_tests {
    use super::*;

    #[test]
    fn test_height_capped_at_max_rows() {
        let placer = ViewportPlacer::default();
        assert_eq!(placer.dropdown_height(25, 10, 20.0), 200.0);
        assert_eq!(placer.dropdown_height(10, 10, 20.0), 200.0);
    }

    #[test]
    fn test_height_for_few_candidates_adds_padding() {
        let placer = ViewportPlacer::default();
        assert_eq!(placer.dropdown_height(3, 10, 20.0), 68.0);
    }

    #[test]
    fn test_height_for_no_candidates_is_padding() {
        let placer = ViewportPlacer::default();
        assert_eq!(placer.dropdown_height(0, 10, 20.0), 8.0);
    }

    #[test]
    fn test_custom_padding() {
        let placer = ViewportPlacer::new(2.0, 0.0);
        assert_eq!(placer.dropdown_height(3, 10, 1.0), 5.0);
        assert_eq!(placer.margin_offset(3, 10, 1.0), -6.0);
    }
}

mod constraints_tests {
    use super::*;

    fn geometry() -> AnchorGeometry {
        AnchorGeometry {
            top_offset: 300.0,
            scroll_position: 100.0,
            height: 22.0,
            width: 120.0,
            viewport_height: 600.0,
        }
    }

    #[test]
    fn test_constraints_from_geometry() {
        let c = ViewportPlacer::default().constraints(&geometry(), 10).unwrap();
        assert_eq!(c.anchor_top_offset, 200.0);
        assert_eq!(c.row_height, 23.0);
        assert_eq!(c.space_above, 200.0);
        assert_eq!(c.space_below, 600.0 - 200.0 - 23.0);
        assert_eq!(c.desired_row_count, 10);
    }

    #[test]
    fn test_zero_height_anchor_is_unavailable() {
        let g = AnchorGeometry {
            height: 0.0,
            ..geometry()
        };
        let err = ViewportPlacer::default().constraints(&g, 10).unwrap_err();
        assert!(matches!(err, SuggestError::GeometryUnavailable { .. }));
    }

    #[test]
    fn test_zero_viewport_is_unavailable() {
        let g = AnchorGeometry {
            viewport_height: 0.0,
            ..geometry()
        };
        assert!(ViewportPlacer::default().constraints(&g, 10).is_err());
        assert!(!AnchorGeometry::default().is_laid_out());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_fitting_below_always_opens_down(
        rows in 1usize..30,
        row_height in 1u32..40,
        extra in 0u32..500,
        above in 0u32..2000,
    ) {
        let row_height = row_height as f64;
        let below = rows as f64 * row_height + extra as f64;
        let decision = decide_placement(&constraints(above as f64, below, row_height), rows);
        prop_assert_eq!(decision.direction, Direction::Down);
        prop_assert_eq!(decision.max_rows, None);
    }

    #[test]
    fn prop_limited_rows_follow_larger_side(
        rows in 2usize..30,
        row_height in 1u32..40,
        above_frac in 0u32..100,
        below_frac in 0u32..100,
    ) {
        let row_height = row_height as f64;
        let desired = rows as f64 * row_height;
        // Both sides strictly smaller than the desired height
        let above = desired * above_frac as f64 / 101.0;
        let below = desired * below_frac as f64 / 101.0;

        let decision = decide_placement(&constraints(above, below, row_height), rows);
        let expected_rows = (above.max(below) / row_height).floor() as usize;

        prop_assert_eq!(decision.max_rows, Some(expected_rows));
        let expected_direction = if above > below { Direction::Up } else { Direction::Down };
        prop_assert_eq!(decision.direction, expected_direction);
    }
}
