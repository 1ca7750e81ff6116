//! Touch snapshots and the colored trackers derived from them.
//!
//! Trackers are rebuilt from scratch on every input event. Colors follow the
//! touch's position in the snapshot, so a finger may change color if the input
//! source enumerates touches in a different order. The winner is matched by
//! identifier instead, which survives reordering.

use crate::render::Rgb;
use crate::PickerError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Browser `Touch.identifier`
pub type TouchId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: TouchId,
    pub x: f64,
    pub y: f64,
}

/// All touches active at one input event, in input-source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TouchSnapshot {
    points: Vec<TouchPoint>,
}

impl TouchSnapshot {
    /// Validate a list of touch points.
    ///
    /// Identifiers must be unique and coordinates finite.
    pub fn new(points: Vec<TouchPoint>) -> Result<Self, PickerError> {
        let mut seen = HashSet::with_capacity(points.len());
        for p in &points {
            if !seen.insert(p.id) {
                return Err(PickerError::DuplicateTouchId(p.id));
            }
            if !p.x.is_finite() || !p.y.is_finite() {
                return Err(PickerError::NonFiniteCoordinate { id: p.id });
            }
        }
        Ok(Self { points })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[TouchPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    #[default]
    Neutral,
    Winner,
    Loser,
}

/// A touch point with its display color and role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackedTouch {
    pub id: TouchId,
    pub x: f64,
    pub y: f64,
    pub color: Rgb,
    pub role: Role,
}

/// Palette entry for the touch at `index`.
///
/// Indices past the end of the palette wrap around.
pub fn color_for_index(palette: &[Rgb], index: usize) -> Rgb {
    if palette.is_empty() {
        return Rgb::WHITE;
    }
    palette[index % palette.len()]
}

/// Build the tracker list for a snapshot.
///
/// With a winner set, the matching touch is marked `Winner` and every other
/// touch `Loser`; otherwise all are `Neutral`.
pub fn track(
    snapshot: &TouchSnapshot,
    palette: &[Rgb],
    winner: Option<TouchId>,
) -> Vec<TrackedTouch> {
    snapshot
        .points()
        .iter()
        .enumerate()
        .map(|(index, p)| TrackedTouch {
            id: p.id,
            x: p.x,
            y: p.y,
            color: color_for_index(palette, index),
            role: match winner {
                None => Role::Neutral,
                Some(w) if w == p.id => Role::Winner,
                Some(_) => Role::Loser,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PALETTE;

    fn point(id: TouchId, x: f64, y: f64) -> TouchPoint {
        TouchPoint { id, x, y }
    }

    #[test]
    fn snapshot_rejects_duplicate_ids() {
        let err = TouchSnapshot::new(vec![point(3, 0.0, 0.0), point(3, 1.0, 1.0)]).unwrap_err();
        assert_eq!(err, PickerError::DuplicateTouchId(3));
    }

    #[test]
    fn snapshot_rejects_nan_coordinates() {
        let err = TouchSnapshot::new(vec![point(1, f64::NAN, 0.0)]).unwrap_err();
        assert_eq!(err, PickerError::NonFiniteCoordinate { id: 1 });
    }

    #[test]
    fn colors_follow_snapshot_position() {
        let a = TouchSnapshot::new(vec![point(10, 0.0, 0.0), point(20, 5.0, 5.0)]).unwrap();
        let b = TouchSnapshot::new(vec![point(20, 5.0, 5.0), point(10, 0.0, 0.0)]).unwrap();

        let ta = track(&a, &PALETTE, None);
        let tb = track(&b, &PALETTE, None);

        assert_eq!(ta[0].color, PALETTE[0]);
        assert_eq!(ta[0].id, 10);
        assert_eq!(tb[0].color, PALETTE[0]);
        assert_eq!(tb[0].id, 20);
    }

    #[test]
    fn colors_wrap_past_palette() {
        let points = (0..8).map(|i| point(i, i as f64, 0.0)).collect();
        let tracked = track(&TouchSnapshot::new(points).unwrap(), &PALETTE, None);

        assert_eq!(tracked.len(), 8);
        assert_eq!(tracked[6].color, PALETTE[0]);
        assert_eq!(tracked[7].color, PALETTE[1]);
    }

    #[test]
    fn winner_is_matched_by_id() {
        let snap = TouchSnapshot::new(vec![point(4, 0.0, 0.0), point(9, 1.0, 1.0)]).unwrap();
        let tracked = track(&snap, &PALETTE, Some(9));

        assert_eq!(tracked[0].role, Role::Loser);
        assert_eq!(tracked[1].role, Role::Winner);
    }

    #[test]
    fn touch_points_decode_from_plain_objects() {
        let points: Vec<TouchPoint> =
            serde_json::from_str(r#"[{"id": 3, "x": 1.5, "y": 2}, {"id": 8, "x": 0, "y": 0}]"#).unwrap();
        let snapshot = TouchSnapshot::new(points).unwrap();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.points()[0], point(3, 1.5, 2.0));
    }

    #[test]
    fn empty_palette_falls_back_to_white() {
        assert_eq!(color_for_index(&[], 3), Rgb::WHITE);
    }
}
