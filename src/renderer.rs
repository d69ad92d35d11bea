use glam::DVec2;
use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};

use crate::{camera::Pose, color::Rgb, world::World};

/// Ray components smaller than this count as parallel to the axis.
const AXIS_EPSILON: f64 = 1e-12;
/// Walls closer than this fill the whole column.
const MIN_DISTANCE: f64 = 1e-6;

/// Internal render resolution in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Which grid line the ray crossed last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// X step, face of a vertical grid line. Drawn at full brightness.
    Vertical,
    /// Y step, face of a horizontal grid line. Drawn at half brightness.
    Horizontal,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub cell: [i64; 2], // (col, row); may lie outside the grid
    pub side: Side,
    /// Perpendicular distance to the view plane, not Euclidean ray length.
    pub distance: f64,
    /// Wall value struck, `None` when the ray left the grid.
    pub wall: Option<u32>,
}

/// One screen column's worth of wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slice {
    pub x: u32,
    pub y_start: u32,
    pub height: u32,
    pub color: Rgb,
}

/// Walks the grid from `origin` along `ray` one cell boundary at a time and
/// stops at the first wall or at the grid border.
pub fn cast_ray(world: &World, origin: DVec2, ray: DVec2) -> RayHit {
    let grid = world.grid();

    let (delta_x, step_x) = axis_step(ray.x);
    let (delta_y, step_y) = axis_step(ray.y);

    let mut map_x = origin.x.floor() as i64;
    let mut map_y = origin.y.floor() as i64;

    let mut side_x = delta_x * boundary_margin(origin.x, step_x);
    let mut side_y = delta_y * boundary_margin(origin.y, step_y);

    // Every step moves one axis monotonically, so the border is reached within
    // width + height steps. The cap only matters for a degenerate zero ray.
    let max_steps = grid.width() + grid.height() + 2;
    let mut side;
    let mut wall = None;
    let mut steps = 0;

    loop {
        if side_x < side_y {
            side_x += delta_x;
            map_x += step_x;
            side = Side::Vertical;
        } else {
            side_y += delta_y;
            map_y += step_y;
            side = Side::Horizontal;
        }

        match grid.get_signed(map_y, map_x) {
            Some(0) => {}
            Some(value) => {
                wall = Some(value);
                break;
            }
            None => break,
        }

        steps += 1;
        if steps >= max_steps {
            log::debug!("ray {ray:?} from {origin:?} hit the step cap");
            break;
        }
    }

    // Remove the final over-step
    let distance = match side {
        Side::Vertical => side_x - delta_x,
        Side::Horizontal => side_y - delta_y,
    };

    RayHit {
        cell: [map_x, map_y],
        side,
        distance,
        wall,
    }
}

/// `(delta_distance, step)` for one ray component. Parallel components get an
/// infinite delta so that axis is never chosen.
#[inline]
fn axis_step(component: f64) -> (f64, i64) {
    if component.abs() < AXIS_EPSILON {
        (f64::INFINITY, 0)
    } else if component > 0.0 {
        (1.0 / component, 1)
    } else {
        (-1.0 / component, -1)
    }
}

/// Distance along one axis from `coord` to the next grid line in the step direction.
/// Always positive for non-negative steps so it never multiplies an infinite delta by zero.
#[inline]
fn boundary_margin(coord: f64, step: i64) -> f64 {
    let cell = coord.floor();
    if step < 0 { coord - cell } else { cell + 1.0 - coord }
}

/// Wall height in pixels for a perpendicular distance, clamped to the screen.
#[inline]
pub fn wall_height(distance: f64, screen_height: u32) -> u32 {
    if distance.is_nan() || distance == f64::INFINITY {
        return 0;
    }
    if distance < MIN_DISTANCE {
        return screen_height;
    }
    // float -> int `as` truncates and saturates
    ((f64::from(screen_height) / distance) as u32).min(screen_height)
}

/// Casts the ray for column `x` and shades the resulting slice.
pub fn cast_column(x: u32, viewport: Viewport, pose: &Pose, world: &World) -> Slice {
    let ray = pose.column_ray(x, viewport.width);
    let hit = cast_ray(world, pose.position, ray);

    let height = wall_height(hit.distance, viewport.height);
    let y_start = (viewport.height / 2).saturating_sub(height / 2);

    let palette = world.palette();
    let base = hit
        .wall
        .and_then(|value| palette.wall_color(value))
        .unwrap_or_else(|| palette.border());
    let color = match hit.side {
        Side::Vertical => base,
        Side::Horizontal => base.halved(),
    };

    Slice {
        x,
        y_start,
        height,
        color,
    }
}

/// One slice per screen column, left to right.
pub fn render_slices(viewport: Viewport, pose: &Pose, world: &World) -> Vec<Slice> {
    let mut out = Vec::with_capacity(viewport.width as usize);
    render_slices_into(&mut out, viewport, pose, world);
    out
}

/// Like [`render_slices`] but reuses `out`'s allocation. Columns are cast in parallel.
pub fn render_slices_into(out: &mut Vec<Slice>, viewport: Viewport, pose: &Pose, world: &World) {
    (0..viewport.width)
        .into_par_iter()
        .map(|x| cast_column(x, viewport, pose, world))
        .collect_into_vec(out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Grid, Palette};

    fn sample_world() -> World {
        World::new(Grid::sample(), Palette::classic()).unwrap()
    }

    #[test]
    fn axis_step_handles_parallel_components() {
        assert_eq!(axis_step(0.0), (f64::INFINITY, 0));
        assert_eq!(axis_step(-0.0), (f64::INFINITY, 0));
        assert_eq!(axis_step(0.5), (2.0, 1));
        assert_eq!(axis_step(-0.25), (4.0, -1));
    }

    #[test]
    fn boundary_margin_is_distance_to_next_line() {
        assert_eq!(boundary_margin(2.25, 1), 0.75);
        assert_eq!(boundary_margin(2.25, -1), 0.25);
        assert_eq!(boundary_margin(2.0, 1), 1.0);
        assert_eq!(boundary_margin(2.0, -1), 0.0);
        assert_eq!(boundary_margin(2.0, 0), 1.0);
    }

    #[test]
    fn straight_ray_hits_west_border() {
        let world = sample_world();
        let hit = cast_ray(&world, DVec2::new(22.0, 12.0), DVec2::new(-1.0, 0.0));
        assert_eq!(hit.cell, [0, 12]);
        assert_eq!(hit.side, Side::Vertical);
        assert_eq!(hit.wall, Some(1));
        assert!((hit.distance - 21.0).abs() < 1e-12);
    }

    #[test]
    fn vertical_ray_ends_on_horizontal_side() {
        let world = sample_world();
        let hit = cast_ray(&world, DVec2::new(12.5, 12.5), DVec2::new(0.0, -1.0));
        assert_eq!(hit.side, Side::Horizontal);
        assert_eq!(hit.cell, [12, 0]);
        assert!((hit.distance - 11.5).abs() < 1e-12);
    }

    #[test]
    fn ray_leaving_open_grid_uses_border_color() {
        let grid = Grid::from_rows(&[[0u32; 4]; 4][..]).unwrap();
        let world = World::new(grid, Palette::classic()).unwrap();
        let hit = cast_ray(&world, DVec2::new(1.5, 1.5), DVec2::new(1.0, 0.0));
        assert_eq!(hit.wall, None);
        assert_eq!(hit.cell, [4, 1]);
        assert!((hit.distance - 2.5).abs() < 1e-12);

        let pose = Pose::new(DVec2::new(1.5, 1.5), DVec2::X, DVec2::new(0.0, 0.66));
        let viewport = Viewport {
            width: 2,
            height: 100,
        };
        let slice = cast_column(1, viewport, &pose, &world);
        assert_eq!(slice.color, Palette::classic().border());
    }

    #[test]
    fn zero_ray_terminates() {
        let world = sample_world();
        let hit = cast_ray(&world, DVec2::new(12.5, 12.5), DVec2::ZERO);
        assert_eq!(hit.wall, None);
        assert_eq!(wall_height(hit.distance, 480), 0);
    }

    #[test]
    fn wall_height_guards_extremes() {
        assert_eq!(wall_height(0.0, 480), 480);
        assert_eq!(wall_height(1e-9, 480), 480);
        assert_eq!(wall_height(0.5, 480), 480);
        assert_eq!(wall_height(2.0, 480), 240);
        assert_eq!(wall_height(f64::INFINITY, 480), 0);
        assert_eq!(wall_height(f64::NAN, 480), 0);
    }

    #[test]
    fn horizontal_hits_are_darkened() {
        let world = sample_world();
        let pose = Pose::new(DVec2::new(12.5, 12.5), DVec2::new(0.0, -1.0), DVec2::new(0.66, 0.0));
        let viewport = Viewport {
            width: 640,
            height: 480,
        };
        let slice = cast_column(320, viewport, &pose, &world);
        assert_eq!(slice.color, Rgb::RED.halved());
    }
}
