// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod geometry;
pub mod sweep;

// External crate imports
use bon::Builder;
use log::{debug, info};
use pixels::{Pixels, SurfaceTexture};
use rusttype::{Font, Scale};

// Standard library imports
use std::sync::mpsc::Receiver;
use std::time::Instant;

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use geometry::{graduation_geometry, DialSpec, GraduationSpec, Rect};
use sweep::Sweep;

// ============================================================================
// COLOR CONFIGURATION
// ============================================================================

/// Color representation for dial elements
#[derive(Debug, Clone, Copy)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Maps the current graduation angle (radians) to the label drawn at the end
/// of the tick.
pub type LabelFormatter = fn(f64) -> String;

/// Default label: the angle in whole degrees.
pub fn degrees_label(angle: f64) -> String {
    format!("{:.0}\u{00b0}", angle.to_degrees())
}

/// Command enum for steering the graduation from another thread
#[derive(Debug, Clone)]
pub enum DialCommand {
    /// Move the graduation to an angle in radians, clamped to [0, pi]. The
    /// displayed angle eases toward it instead of jumping.
    SetAngle(f64),
    /// Change the autonomous sweep speed (radians per frame).
    SetSweepStep(f64),
    /// Forget the last commanded angle and resume the autonomous sweep.
    Resume,
}

/// Main dial struct - the primary public interface
#[derive(Debug, Clone)]
pub struct Dial {
    config: DialConfig,
    angle: f64,
}

#[derive(Debug, Clone, Builder)]
pub struct DialConfig {
    #[builder(default = "".to_string())]
    pub title: String,

    // Window configuration
    #[builder(default = 600)]
    pub window_width: usize,
    #[builder(default = 320)]
    pub window_height: usize,
    #[builder(default = 60.0)]
    pub max_framerate: f64,

    // Arc configuration
    #[builder(default = 100.0)]
    pub arc_inset: f64,
    #[builder(default = 20.0)]
    pub stroke_width: f64,

    // Graduation configuration
    #[builder(default = 4.0)]
    pub graduation_width: f64,
    #[builder(default = 50.0)]
    pub graduation_length: f64,
    #[builder(default = 5.0)]
    pub text_padding: f64,
    #[builder(default = 20.0)]
    pub font_size: f32,

    // Sweep configuration
    #[builder(default = 0.01)]
    pub sweep_step: f64,
    #[builder(default = 0.0)]
    pub start_angle: f64,
    #[builder(default = 0.1)]
    pub lerp_factor: f64,

    // Colors
    #[builder(default = Color::new(0xff, 0x00, 0x00))]
    pub graduation_color: Color,
    #[builder(default = Color::new(237, 236, 236))]
    pub dial_color: Color,
    #[builder(default = Color::new(0xaa, 0xaa, 0xaa))]
    pub background_color: Color,

    // Label configuration
    #[builder(default = degrees_label as LabelFormatter)]
    pub label_fn: LabelFormatter,

    // Font configuration
    #[builder(default = include_bytes!("DejaVuSans.ttf"))]
    pub font_data: &'static [u8],
}

impl Dial {
    pub fn new(config: DialConfig) -> Self {
        let angle = config.start_angle.clamp(0.0, std::f64::consts::PI);
        Self { config, angle }
    }

    /// Positions the graduation before the window opens.
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle.clamp(0.0, std::f64::consts::PI);
    }

    /// Opens the window and sweeps the graduation back and forth between the
    /// ends of the arc until the window is closed.
    pub fn show(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.run_window(None)
    }

    /// Like [`Dial::show`], but the graduation follows [`DialCommand`]s sent
    /// over `receiver`; it sweeps autonomously until the first command lands.
    pub fn show_with_commands(
        &mut self,
        receiver: Receiver<DialCommand>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.run_window(Some(receiver))
    }

    fn run_window(
        &self,
        receiver: Option<Receiver<DialCommand>>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let logical_width: usize = self.config.window_width;
        let logical_height: usize = self.config.window_height;

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(
                logical_width as f64,
                logical_height as f64,
            ))
            .with_resizable(false)
            .build(&event_loop)?;

        let window = std::sync::Arc::new(window);
        info!(
            "dial window opened: {}x{} at {} fps",
            logical_width, logical_height, self.config.max_framerate
        );

        let mut state = DialState::new(self.angle, self.config.sweep_step);

        let window_clone = window.clone();
        let size = window.inner_size();
        let mut fb_width = size.width as usize;
        let mut fb_height = size.height as usize;
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

        let target_fps = self.config.max_framerate;
        let frame_duration = std::time::Duration::from_secs_f64(1.0 / target_fps);
        let mut last_frame = Instant::now();

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        fb_width = new_size.width as usize;
                        fb_height = new_size.height as usize;
                        let _ = pixels.resize_buffer(new_size.width, new_size.height);
                        let _ = pixels.resize_surface(new_size.width, new_size.height);
                    }
                    WindowEvent::RedrawRequested => {
                        if let Some(ref receiver) = receiver {
                            state.apply_commands(receiver);
                        }
                        state.tick(self.config.lerp_factor);

                        let frame = pixels.frame_mut();
                        let mut canvas = Canvas::new(frame, fb_width, fb_height);
                        render_dial(&mut canvas, state.angle, &self.config);
                        let _ = pixels.render();
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = Instant::now();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}

// ============================================================================
// ANIMATION STATE
// ============================================================================

/// Per-window animation state: either sweeping autonomously or easing toward
/// the last commanded angle.
struct DialState {
    angle: f64,
    target: Option<f64>,
    sweep: Sweep,
}

impl DialState {
    fn new(start_angle: f64, sweep_step: f64) -> Self {
        Self {
            angle: start_angle,
            target: None,
            sweep: Sweep::new(sweep_step).starting_at(start_angle),
        }
    }

    fn apply_commands(&mut self, receiver: &Receiver<DialCommand>) {
        while let Ok(command) = receiver.try_recv() {
            debug!("dial command: {:?}", command);
            match command {
                DialCommand::SetAngle(angle) => {
                    self.target = Some(angle.clamp(0.0, std::f64::consts::PI));
                }
                DialCommand::SetSweepStep(step) => {
                    self.sweep.set_step(step);
                }
                DialCommand::Resume => {
                    self.sweep.seek(self.angle);
                    self.target = None;
                }
            }
        }
    }

    fn tick(&mut self, lerp_factor: f64) {
        match self.target {
            Some(target) => self.angle = lerp(self.angle, target, lerp_factor),
            None => self.angle = self.sweep.step(),
        }
    }
}

// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

#[derive(Clone, Debug)]
enum DrawCommand {
    Clear((u8, u8, u8)),
    Arc {
        cx: f64,
        cy: f64,
        r: f64,
        stroke: f64,
        color: (u8, u8, u8),
    },
    Line {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        thickness: f32,
        color: (u8, u8, u8),
    },
    Label {
        rect: Rect,
        text: String,
        font_size: f32,
        color: (u8, u8, u8),
    },
}

struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    fn render(&self, canvas: &mut Canvas, config: &DialConfig) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => {
                    canvas.clear(*color);
                }
                DrawCommand::Arc {
                    cx,
                    cy,
                    r,
                    stroke,
                    color,
                } => {
                    render_half_circle(canvas, *cx, *cy, *r, *stroke, *color);
                }
                DrawCommand::Line {
                    x0,
                    y0,
                    x1,
                    y1,
                    thickness,
                    color,
                } => {
                    draw_thick_line_aa(
                        canvas.frame,
                        canvas.width,
                        x0.round() as i32,
                        y0.round() as i32,
                        x1.round() as i32,
                        y1.round() as i32,
                        *thickness,
                        color.0,
                        color.1,
                        color.2,
                    );
                }
                DrawCommand::Label {
                    rect,
                    text,
                    font_size,
                    color,
                } => {
                    let font =
                        Font::try_from_vec(config.font_data.to_vec()).expect("Error loading font");
                    let scale = Scale::uniform(*font_size);
                    let center = rect.center();
                    draw_text(
                        canvas.frame,
                        canvas.width,
                        canvas.height,
                        center.x.round() as i32,
                        center.y.round() as i32,
                        text,
                        &font,
                        scale,
                        *color,
                    );
                }
            }
        }
    }
}

// ============================================================================
// CORE DATA TYPES
// ============================================================================

struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    fn clear(&mut self, color: (u8, u8, u8)) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.0, color.1, color.2, 0xff]);
        }
    }
}

// ============================================================================
// RENDERING AND DRAWING FUNCTIONS
// ============================================================================

/// Rebuilds the scene from the current parameters. Idempotent: the same
/// inputs always produce the same three primitives (arc, tick, label) on top
/// of the clear.
fn build_scene(width: usize, height: usize, angle: f64, config: &DialConfig) -> Scene {
    let mut scene = Scene::new();
    scene.add_command(DrawCommand::Clear(config.background_color.as_tuple()));

    let dial = DialSpec::from_frame(
        width as f64,
        height as f64,
        config.arc_inset,
        config.stroke_width,
    );
    scene.add_command(DrawCommand::Arc {
        cx: dial.center.x,
        cy: dial.center.y,
        r: dial.radius,
        stroke: dial.stroke_width,
        color: config.dial_color.as_tuple(),
    });

    let grad = GraduationSpec {
        length: config.graduation_length,
        width: config.graduation_width,
        text_padding: config.text_padding,
    };
    let label = (config.label_fn)(angle);
    let font = Font::try_from_vec(config.font_data.to_vec()).expect("Error loading font");
    let text_size = measure_text(&font, Scale::uniform(config.font_size), &label);
    let geo = graduation_geometry(&dial, &grad, angle, &label, text_size);

    scene.add_command(DrawCommand::Line {
        x0: geo.tick_start.x,
        y0: geo.tick_start.y,
        x1: geo.tick_end.x,
        y1: geo.tick_end.y,
        thickness: grad.width as f32,
        color: config.graduation_color.as_tuple(),
    });
    scene.add_command(DrawCommand::Label {
        rect: geo.label_rect,
        text: geo.label,
        font_size: config.font_size,
        color: config.graduation_color.as_tuple(),
    });

    scene
}

fn render_dial(canvas: &mut Canvas, angle: f64, config: &DialConfig) {
    let scene = build_scene(canvas.width, canvas.height, angle, config);
    scene.render(canvas, config);
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Measures `text` under `font` at `scale` from the glyph bounding boxes.
/// Empty or whitespace-only text measures (0, 0).
pub fn measure_text(font: &Font, scale: Scale, text: &str) -> (f64, f64) {
    use rusttype::{point, PositionedGlyph};
    let glyphs: Vec<PositionedGlyph> = font.layout(text, scale, point(0.0, 0.0)).collect();
    let (min_x, max_x, min_y, max_y) = glyphs.iter().filter_map(|g| g.pixel_bounding_box()).fold(
        (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
        |(min_x, max_x, min_y, max_y), bb| {
            (
                min_x.min(bb.min.x),
                max_x.max(bb.max.x),
                min_y.min(bb.min.y),
                max_y.max(bb.max.y),
            )
        },
    );
    let width = if min_x < max_x { max_x - min_x } else { 0 };
    let height = if min_y < max_y { max_y - min_y } else { 0 };
    (width as f64, height as f64)
}

fn lerp(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}

// ============================================================================
// DRAWING PRIMITIVES
// ============================================================================

fn set_pixel(frame: &mut [u8], width: usize, x: usize, y: usize, r: u8, g: u8, b: u8, alpha: f32) {
    if x < width && y < frame.len() / (width * 4) {
        let idx = (y * width + x) * 4;
        let src = [r as f32, g as f32, b as f32, 255.0 * alpha];
        let dst = [
            frame[idx] as f32,
            frame[idx + 1] as f32,
            frame[idx + 2] as f32,
            frame[idx + 3] as f32,
        ];
        let a = src[3] / 255.0;
        let out = [
            (src[0] * a + dst[0] * (1.0 - a)).round() as u8,
            (src[1] * a + dst[1] * (1.0 - a)).round() as u8,
            (src[2] * a + dst[2] * (1.0 - a)).round() as u8,
            0xff,
        ];
        frame[idx..idx + 4].copy_from_slice(&out);
    }
}

fn draw_thick_line_aa(
    frame: &mut [u8],
    width: usize,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    thickness: f32,
    r: u8,
    g: u8,
    b: u8,
) {
    let min_x = x0.min(x1) - thickness.ceil() as i32 - 1;
    let max_x = x0.max(x1) + thickness.ceil() as i32 + 1;
    let min_y = y0.min(y1) - thickness.ceil() as i32 - 1;
    let max_y = y0.max(y1) + thickness.ceil() as i32 + 1;
    let dx = (x1 - x0) as f32;
    let dy = (y1 - y0) as f32;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return;
    }
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let px = x as f32 - x0 as f32;
            let py = y as f32 - y0 as f32;
            let t = ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0);
            let lx = x0 as f32 + t * dx;
            let ly = y0 as f32 + t * dy;
            let dist = ((lx - x as f32).powi(2) + (ly - y as f32).powi(2)).sqrt();
            let aa = (1.0 - (dist - thickness / 2.0).clamp(0.0, 1.0)).clamp(0.0, 1.0);
            if aa > 0.01 && x >= 0 && y >= 0 {
                set_pixel(frame, width, x as usize, y as usize, r, g, b, aa);
            }
        }
    }
}

fn draw_text(
    frame: &mut [u8],
    width: usize,
    height: usize,
    x: i32,
    y: i32,
    text: &str,
    font: &rusttype::Font,
    scale: rusttype::Scale,
    color: (u8, u8, u8),
) {
    use rusttype::{point, PositionedGlyph};
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<PositionedGlyph> = font
        .layout(text, scale, point(0.0, 0.0 + v_metrics.ascent))
        .collect();
    // Calculate bounding box for the whole string
    let (min_x, max_x, min_y, max_y) = glyphs.iter().filter_map(|g| g.pixel_bounding_box()).fold(
        (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
        |(min_x, max_x, min_y, max_y), bb| {
            (
                min_x.min(bb.min.x),
                max_x.max(bb.max.x),
                min_y.min(bb.min.y),
                max_y.max(bb.max.y),
            )
        },
    );
    let width_px = if min_x < max_x { max_x - min_x } else { 0 };
    let height_px = if min_y < max_y { max_y - min_y } else { 0 };
    let offset_x = x - width_px / 2;
    let offset_y = y - height_px / 2;
    for glyph in glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = offset_x + gx as i32 + bb.min.x - min_x;
                let py = offset_y + gy as i32 + bb.min.y - min_y;
                if px >= 0 && px < width as i32 && py >= 0 && py < height as i32 {
                    set_pixel(
                        frame,
                        width,
                        px as usize,
                        py as usize,
                        color.0,
                        color.1,
                        color.2,
                        v as f32,
                    );
                }
            });
        }
    }
}

/// Draws the half-circle arc band, stroke centered on the radius. In the
/// framebuffer's y-down convention the upper half-plane maps to atan2 angles
/// in (pi, 2*pi), so the band spans from pi through the wrap at 2*pi.
fn render_half_circle(
    canvas: &mut Canvas,
    cx: f64,
    cy: f64,
    r: f64,
    stroke: f64,
    color: (u8, u8, u8),
) {
    let inner = (r - stroke * 0.5).max(0.0);
    let outer = r + stroke * 0.5;
    let start_angle = std::f64::consts::PI;
    let end_angle = 0.0; // 2*pi wrapped

    for y in 0..canvas.height as i32 {
        for x in 0..canvas.width as i32 {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist < inner - 1.0 || dist > outer + 1.0 {
                continue;
            }
            let mut angle = dy.atan2(dx);
            if angle < 0.0 {
                angle += 2.0 * std::f64::consts::PI;
            }
            // wrap case: the band crosses the 0/2*pi seam
            let in_arc = angle >= start_angle || angle <= end_angle;
            if in_arc {
                let aa = if dist > outer {
                    1.0 - (dist - outer).min(1.0)
                } else if dist < inner {
                    1.0 - (inner - dist).min(1.0)
                } else {
                    1.0
                };
                if aa > 0.0 {
                    set_pixel(
                        canvas.frame,
                        canvas.width,
                        x as usize,
                        y as usize,
                        color.0,
                        color.1,
                        color.2,
                        aa as f32,
                    );
                }
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
