use glam::DVec2;

use crate::camera::Pose;
use crate::world::Grid;

/// One discrete movement request per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    MoveForward,
    MoveBackward,
    RotateLeft,
    RotateRight,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Speeds {
    pub move_speed: f64,   // cells per second
    pub rotate_speed: f64, // degrees per second
}

impl Default for Speeds {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            rotate_speed: 8.0,
        }
    }
}

/// Advances `pose` by one frame. Never places the position inside a wall or
/// outside the grid; blocked axes are dropped independently so the player
/// slides along walls.
#[must_use]
pub fn advance(pose: Pose, intent: Option<Intent>, dt: f64, grid: &Grid, speeds: &Speeds) -> Pose {
    // NaN and negative deltas collapse to 0
    let dt = dt.max(0.0);

    match intent {
        Some(Intent::MoveForward) => translate(pose, pose.direction * speeds.move_speed * dt, grid),
        Some(Intent::MoveBackward) => {
            translate(pose, -pose.direction * speeds.move_speed * dt, grid)
        }
        Some(Intent::RotateLeft) => pose.rotated(speeds.rotate_speed * dt),
        Some(Intent::RotateRight) => pose.rotated(-speeds.rotate_speed * dt),
        None => pose,
    }
}

fn translate(pose: Pose, delta: DVec2, grid: &Grid) -> Pose {
    let candidate = pose.position + delta;
    let mut position = pose.position;

    // X first against the current row, then Y against the (possibly updated) column.
    if let Some(col) = cell_index(candidate.x, grid.width()) {
        if let Some(row) = cell_index(position.y, grid.height()) {
            if grid.is_open(row, col) {
                position.x = candidate.x;
            }
        }
    }
    if let Some(row) = cell_index(candidate.y, grid.height()) {
        if let Some(col) = cell_index(position.x, grid.width()) {
            if grid.is_open(row, col) {
                position.y = candidate.y;
            }
        }
    }

    Pose { position, ..pose }
}

/// Cell index of a coordinate, or `None` when it falls outside `[0, len)`.
#[inline]
fn cell_index(coord: f64, len: usize) -> Option<usize> {
    if coord >= 0.0 && coord < len as f64 {
        Some(coord as usize)
    } else {
        None
    }
}
