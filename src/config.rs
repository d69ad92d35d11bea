//! Static configuration.
//!
//! Everything has a compiled-in default reproducing the classic demo: the
//! 24x24 sample map, a five color palette, a 640x480 internal frame and the
//! player at (22, 12) looking down -X. A JSON file may override any subset:
//!
//! ```json
//! { "player": { "position": [3.5, 3.5] }, "grid": [[1,1,1],[1,0,1],[1,1,1]] }
//! ```
//!
//! [`Config::build`] validates the whole thing once and hands back a [`Scene`];
//! the frame loop never revisits these checks.

use std::fs;
use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::camera::Pose;
use crate::color::Rgb;
use crate::error::ConfigError;
use crate::player::Speeds;
use crate::renderer::Viewport;
use crate::world::{Grid, Palette, SAMPLE_MAP, World};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Initial logical window size. The internal frame is stretched to fit.
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Grid Raycaster".to_string(),
            width: 1280,
            height: 960,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub position: [f64; 2],
    pub direction: [f64; 2],
    pub camera: [f64; 2],
    pub move_speed: f64,
    pub rotate_speed: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        let speeds = Speeds::default();
        Self {
            position: [22.0, 12.0],
            direction: [-1.0, 0.0],
            camera: [0.0, 0.66],
            move_speed: speeds.move_speed,
            rotate_speed: speeds.rotate_speed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub screen: ScreenConfig,
    pub window: WindowConfig,
    pub player: PlayerConfig,
    pub palette: Vec<Rgb>,
    pub border_color: Rgb,
    pub background: Rgb,
    pub grid: Vec<Vec<u32>>,
}

impl Default for Config {
    fn default() -> Self {
        let palette = Palette::classic();
        Self {
            screen: ScreenConfig::default(),
            window: WindowConfig::default(),
            player: PlayerConfig::default(),
            palette: palette.colors().to_vec(),
            border_color: palette.border(),
            background: Rgb::BLACK,
            grid: SAMPLE_MAP.iter().map(|row| row.to_vec()).collect(),
        }
    }
}

/// Validated runtime state built from a [`Config`].
#[derive(Clone, Debug)]
pub struct Scene {
    pub world: World,
    pub pose: Pose,
    pub speeds: Speeds,
    pub viewport: Viewport,
    pub background: Rgb,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let txt = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&txt)
    }

    pub fn from_json_str(txt: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(txt)?)
    }

    pub fn build(&self) -> Result<Scene, ConfigError> {
        let viewport = Viewport {
            width: self.screen.width,
            height: self.screen.height,
        };
        if viewport.width == 0 || viewport.height == 0 {
            return Err(ConfigError::EmptyScreen {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let grid = Grid::from_rows(self.grid.as_slice())?;
        let palette = Palette::new(self.palette.clone(), self.border_color);
        let world = World::new(grid, palette)?;

        let speeds = Speeds {
            move_speed: speed(self.player.move_speed, "move_speed")?,
            rotate_speed: speed(self.player.rotate_speed, "rotate_speed")?,
        };

        let pose = Pose::new(
            DVec2::from_array(self.player.position),
            non_zero(self.player.direction, "direction")?,
            non_zero(self.player.camera, "camera")?,
        );
        if pose.direction.perp_dot(pose.camera).abs() < 1e-9 {
            return Err(ConfigError::ParallelCameraPlane);
        }
        check_start(&pose, world.grid())?;

        Ok(Scene {
            world,
            pose,
            speeds,
            viewport,
            background: self.background,
        })
    }
}

fn speed(value: f64, name: &'static str) -> Result<f64, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::BadSpeed(name))
    }
}

fn non_zero(v: [f64; 2], name: &'static str) -> Result<DVec2, ConfigError> {
    let v = DVec2::from_array(v);
    if v.is_finite() && v.length_squared() > 0.0 {
        Ok(v)
    } else {
        Err(ConfigError::DegenerateVector(name))
    }
}

fn check_start(pose: &Pose, grid: &Grid) -> Result<(), ConfigError> {
    let DVec2 { x, y } = pose.position;
    let inside = x >= 0.0 && y >= 0.0 && x < grid.width() as f64 && y < grid.height() as f64;
    if !inside {
        return Err(ConfigError::StartOutOfBounds {
            x,
            y,
            width: grid.width(),
            height: grid.height(),
        });
    }
    if !grid.is_open(y as usize, x as usize) {
        return Err(ConfigError::StartInWall { x, y });
    }
    Ok(())
}
