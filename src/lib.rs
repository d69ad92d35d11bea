//! Grid raycaster: turns a tile grid and a player pose into one shaded wall
//! slice per screen column.
//!
//! Per frame: [`player::advance`] moves the pose, [`renderer::render_slices`]
//! casts every column, and [`framebuffer::Framebuffer::paint_slices`] rasterizes
//! the result for the window surface.

pub mod camera;
pub mod color;
pub mod config;
pub mod error;
pub mod framebuffer;
pub mod input;
pub mod player;
pub mod renderer;
pub mod scaler;
pub mod world;

pub use camera::Pose;
pub use color::Rgb;
pub use config::{Config, Scene};
pub use error::ConfigError;
pub use player::{Intent, Speeds, advance};
pub use renderer::{RayHit, Side, Slice, Viewport, cast_column, cast_ray, render_slices};
pub use world::{Grid, Palette, World};
