//! Property-based invariant tests for geometry and configuration primitives.
//!
//! 1. Union is commutative and contains both inputs.
//! 2. Intersection, when present, fits inside both inputs.
//! 3. Right/bottom edges are consistent with x+width, y+height.
//! 4. The midpoint lies between the left and right edges.
//! 5. Unit conversion is monotone and stays within `1..=max_columns`.
//! 6. Scroll key action codes round-trip.

use proptest::prelude::*;
use scrollgrid_core::{GridGeometry, Rect, ScrollKeyAction};

// ── Helpers ─────────────────────────────────────────────────────────────

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (0u16..=2000, 0u16..=2000, 0u16..=500, 0u16..=500)
        .prop_map(|(x, y, w, h)| Rect::new(x as f32, y as f32, w as f32, h as f32))
}

fn geometry_strategy() -> impl Strategy<Value = GridGeometry> {
    (1usize..=12, 1usize..=12, 10u16..=120).prop_map(|(rows, cols, unit)| GridGeometry {
        max_rows: rows,
        max_columns: cols,
        cell_unit_width: unit as f32,
        row_height: 30.0,
    })
}

fn contains_rect(outer: &Rect, inner: &Rect) -> bool {
    inner.left() >= outer.left()
        && inner.top() >= outer.top()
        && inner.right() <= outer.right()
        && inner.bottom() <= outer.bottom()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Union
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn union_commutative(a in rect_strategy(), b in rect_strategy()) {
        prop_assert_eq!(a.union(&b), b.union(&a));
    }

    #[test]
    fn union_contains_both(a in rect_strategy(), b in rect_strategy()) {
        let u = a.union(&b);
        prop_assert!(contains_rect(&u, &a), "union {:?} misses {:?}", u, a);
        prop_assert!(contains_rect(&u, &b), "union {:?} misses {:?}", u, b);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Intersection
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn intersection_fits_inside(a in rect_strategy(), b in rect_strategy()) {
        if let Some(i) = a.intersection_opt(&b) {
            prop_assert!(contains_rect(&a, &i));
            prop_assert!(contains_rect(&b, &i));
            prop_assert!(!i.is_empty());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3-4. Edges
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn edges_consistent(r in rect_strategy()) {
        prop_assert_eq!(r.right(), r.x + r.width);
        prop_assert_eq!(r.bottom(), r.y + r.height);
        prop_assert!(r.mid_x() >= r.left());
        prop_assert!(r.mid_x() <= r.right());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Units
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn units_bounded(g in geometry_strategy(), w in 0u16..=4000) {
        let units = g.units_for(w as f32);
        prop_assert!(units >= 1);
        prop_assert!(units <= g.max_columns);
    }

    #[test]
    fn units_monotone(g in geometry_strategy(), a in 0u16..=4000, b in 0u16..=4000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(g.units_for(lo as f32) <= g.units_for(hi as f32));
    }

    #[test]
    fn snapped_width_covers_uncapped_width(g in geometry_strategy(), w in 1u16..=4000) {
        let units = g.units_for(w as f32);
        if units < g.max_columns {
            prop_assert!(units as f32 * g.cell_unit_width >= w as f32);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Action codes
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn action_codes_round_trip(code in -5i32..=25) {
        if let Ok(action) = ScrollKeyAction::try_from(code) {
            prop_assert_eq!(action.code(), code);
        }
    }
}
