use std::collections::HashSet;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use grid_raycaster::config::{Config, Scene, WindowConfig};
use grid_raycaster::framebuffer::Framebuffer;
use grid_raycaster::input::intent_from_keys;
use grid_raycaster::player::advance;
use grid_raycaster::renderer::{Slice, render_slices_into};
use grid_raycaster::scaler::{ScaleLut, blit_stretch, build_scale_lut};

/// Longest frame delta fed to movement; longer stalls are clamped.
const MAX_FRAME_DT: Duration = Duration::from_millis(100);

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    window_config: WindowConfig,
    scene: Scene,

    // HUD
    frame_counter: u32,
    last_fps_print: Instant,

    // Internal frame at the configured screen size
    fb: Framebuffer,
    slices: Vec<Slice>,

    scale_lut: ScaleLut,

    // Input
    keys_down: HashSet<KeyCode>,
    last_tick: Instant,
}

impl App {
    fn new(scene: Scene, window_config: WindowConfig) -> Self {
        let fb = Framebuffer::new(
            scene.viewport.width as usize,
            scene.viewport.height as usize,
        );
        Self {
            window: None,
            surface: None,
            window_config,
            slices: Vec::with_capacity(scene.viewport.width as usize),
            scene,

            frame_counter: 0,
            last_fps_print: Instant::now(),

            fb,

            scale_lut: ScaleLut::empty(),

            keys_down: HashSet::new(),
            last_tick: Instant::now(),
        }
    }

    fn create_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title(self.window_config.title.clone())
            .with_inner_size(LogicalSize::new(
                self.window_config.width as f64,
                self.window_config.height as f64,
            ));

        let window = Rc::new(
            event_loop
                .create_window(attributes)
                .context("create window")?,
        );
        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| anyhow::anyhow!("softbuffer context: {e}"))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| anyhow::anyhow!("softbuffer surface: {e}"))?;

        let size = window.inner_size();
        self.rebuild_lut(size.width as usize, size.height as usize);
        log::info!("window {}x{} created", size.width, size.height);

        window.request_redraw();
        self.surface = Some(surface);
        self.window = Some(window);
        Ok(())
    }

    fn tick(&mut self) {
        // Compute dt with cap to avoid huge jumps if the app was paused
        let now = Instant::now();
        let mut dt = now.duration_since(self.last_tick);
        self.last_tick = now;
        if dt > MAX_FRAME_DT {
            log::warn!("frame took {:?}; clamping movement step", dt);
            dt = MAX_FRAME_DT;
        }

        let intent = intent_from_keys(&self.keys_down);
        let scene = &mut self.scene;
        scene.pose = advance(
            scene.pose,
            intent,
            dt.as_secs_f64(),
            scene.world.grid(),
            &scene.speeds,
        );
    }

    fn redraw(&mut self, id: WindowId) -> Result<()> {
        self.tick();

        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return Ok(()),
        };

        let size = window.inner_size();
        let (Some(dw), Some(dh)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(()); // Minimized window, skip drawing
        };

        // Set softbuffer to window size
        surface
            .resize(dw, dh)
            .map_err(|e| anyhow::anyhow!("resize surface: {e}"))?;

        let scene = &self.scene;
        render_slices_into(&mut self.slices, scene.viewport, &scene.pose, &scene.world);
        self.fb.clear(scene.background);
        self.fb.paint_slices(&self.slices);

        let mut buf = surface
            .buffer_mut()
            .map_err(|e| anyhow::anyhow!("surface buffer: {e}"))?;
        blit_stretch(&mut buf, self.fb.pixels(), &self.scale_lut);
        buf.present()
            .map_err(|e| anyhow::anyhow!("present frame: {e}"))?;

        // Log FPS
        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
        if elapsed >= 1.0 {
            log::info!("FPS: {:.1}", self.frame_counter as f32 / elapsed);
            self.frame_counter = 0;
            self.last_fps_print = now;
        }

        window.request_redraw();
        Ok(())
    }

    fn rebuild_lut(&mut self, dst_w: usize, dst_h: usize) {
        log::debug!(
            "scaling {}x{} frame to {}x{}",
            self.fb.width(),
            self.fb.height(),
            dst_w,
            dst_h
        );
        self.scale_lut = build_scale_lut(dst_w, dst_h, self.fb.width(), self.fb.height());
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_surface(event_loop) {
            log::error!("{e:#}");
            event_loop.exit();
            return;
        }
        self.last_tick = Instant::now();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested; stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed if code == KeyCode::Escape => event_loop.exit(),
                ElementState::Pressed => {
                    self.keys_down.insert(code);
                }
                ElementState::Released => {
                    self.keys_down.remove(&code);
                }
            },

            WindowEvent::Focused(false) => self.keys_down.clear(),

            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw(id) {
                    log::error!("{e:#}");
                    event_loop.exit();
                }
            }

            WindowEvent::Resized(new_size) => {
                self.rebuild_lut(new_size.width as usize, new_size.height as usize);
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn load_config() -> Result<Config> {
    match std::env::args_os().nth(1) {
        Some(path) => {
            log::info!("loading config from {}", path.to_string_lossy());
            Config::load(&path).with_context(|| format!("load config {}", path.to_string_lossy()))
        }
        None => {
            log::info!("using built-in sample map");
            Ok(Config::default())
        }
    }
}

fn main() -> Result<()> {
    // info+ for this crate unless RUST_LOG overrides
    let default = "warn,grid_raycaster=info";
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_secs()
        .try_init();

    let config = load_config()?;
    let scene = config.build().context("validate config")?;
    log::info!(
        "world {}x{}, {} colors, frame {}x{}, fov {:.1} deg",
        scene.world.grid().width(),
        scene.world.grid().height(),
        scene.world.palette().len(),
        scene.viewport.width,
        scene.viewport.height,
        scene.pose.fov_degrees()
    );

    let event_loop = EventLoop::new().context("create event loop")?;

    // ControlFlow::Poll continuously runs the event loop, even if the OS hasn't
    // dispatched any events. Movement is integrated per frame, so keep polling.
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(scene, config.window);
    event_loop.run_app(&mut app).context("run event loop")?;
    Ok(())
}
