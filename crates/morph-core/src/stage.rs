//! Per-frame orchestration and the seams to the platform front-end.
//!
//! A front-end owns a [`Stage`], forwards input to it, and calls
//! [`Stage::frame`] once per display refresh with its own [`Renderer`] and
//! [`Presenter`].

use crate::animator::MorphAnimator;
use crate::buffer::{DirtyFlags, ParticleBuffer, ParticleInstance};
use crate::camera::{Camera, Viewport};
use crate::config::MorphConfig;
use crate::constants::SPIN_RADIANS_PER_SEC;
use crate::error::ShapeError;
use crate::picking::{PickEvent, PickIndex, PickResult};
use crate::scene::{SceneEvent, SceneId, SceneSequencer};
use glam::{Mat4, Vec2, Vec3};
use instant::Instant;

/// Everything a renderer needs for one frame.
///
/// Positions and targets are the interpolation endpoints; the renderer
/// blends them with `mix` (`position·(1-mix) + target·mix`).
pub struct ParticleFrame<'a> {
    pub positions: &'a [Vec3],
    pub targets: &'a [Vec3],
    pub sizes: &'a [f32],
    pub colors: &'a [Vec3],
    pub mix: f32,
    pub point_size: f32,
    pub time_sec: f32,
    pub model: Mat4,
    pub camera: &'a Camera,
    /// Arrays changed since the previous frame.
    pub dirty: DirtyFlags,
}

impl ParticleFrame<'_> {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Pack the arrays into the GPU instance layout, reusing `out`.
    pub fn write_instances(&self, out: &mut Vec<ParticleInstance>) {
        out.clear();
        out.extend(
            self.positions
                .iter()
                .zip(self.targets)
                .zip(self.sizes.iter().zip(self.colors))
                .map(|((p, t), (size, c))| ParticleInstance {
                    position: p.to_array(),
                    size: *size,
                    target: t.to_array(),
                    _pad0: 0.0,
                    color: c.to_array(),
                    _pad1: 0.0,
                }),
        );
    }
}

/// Draws the particle cloud.
pub trait Renderer {
    fn draw(&mut self, frame: &ParticleFrame<'_>);
}

/// Narrative text and interaction affordances.
pub trait Presenter {
    /// Begin fading the current text out.
    fn fade_out_text(&mut self);
    /// Replace the text and fade it in.
    fn show_text(&mut self, text: &str);
    /// Pointer cursor on/off while hovering a particle.
    fn set_pointer(&mut self, pointer: bool);
    fn particle_activated(&mut self, index: usize);
}

/// Wall-clock seconds since construction; wasm-safe.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    start: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_sec(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

pub struct Stage {
    config: MorphConfig,
    buffer: ParticleBuffer,
    animator: MorphAnimator,
    picker: PickIndex,
    sequencer: SceneSequencer,
    camera: Camera,
    spin: f32,
    cursor_ndc: Option<Vec2>,
    last_frame_sec: Option<f64>,
    interpolated: Vec<Vec3>,
    scene_events: Vec<SceneEvent>,
    pick_events: Vec<PickEvent>,
}

impl Stage {
    /// Build the buffer and enter the idle scene at `now_sec`.
    pub fn new(config: MorphConfig, viewport: Viewport, now_sec: f64) -> Result<Self, ShapeError> {
        let buffer = ParticleBuffer::new(config.particle_count, config.seed);
        let sequencer = SceneSequencer::with_default_scenes(&config)?;
        let mut stage = Self {
            config,
            buffer,
            animator: MorphAnimator::new(),
            picker: PickIndex::new(),
            sequencer,
            camera: Camera::new(viewport),
            spin: 0.0,
            cursor_ndc: None,
            last_frame_sec: None,
            interpolated: Vec::new(),
            scene_events: Vec::new(),
            pick_events: Vec::new(),
        };
        let mut events = Vec::new();
        stage.sequencer.start(now_sec, &mut events);
        stage.apply_scene_events(&mut events, now_sec, None);
        Ok(stage)
    }

    pub fn config(&self) -> &MorphConfig {
        &self.config
    }

    pub fn buffer(&self) -> &ParticleBuffer {
        &self.buffer
    }

    pub fn animator(&self) -> &MorphAnimator {
        &self.animator
    }

    pub fn picker(&self) -> &PickIndex {
        &self.picker
    }

    pub fn sequencer(&self) -> &SceneSequencer {
        &self.sequencer
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn current_scene(&self) -> Option<SceneId> {
        self.sequencer.current_id()
    }

    /// Ambient rotation applied to the whole cloud.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.spin)
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.camera.viewport = viewport;
    }

    /// Start the story (the "begin" button). Only the first scene listens.
    pub fn trigger(&mut self, now_sec: f64) -> bool {
        self.sequencer.trigger(now_sec, &mut self.scene_events)
    }

    /// Latest cursor sample in normalized device coordinates.
    pub fn pointer_moved(&mut self, cursor_ndc: Vec2) {
        self.cursor_ndc = Some(cursor_ndc);
    }

    pub fn pointer_left(&mut self) {
        self.cursor_ndc = None;
    }

    pub fn click(&mut self, presenter: &mut dyn Presenter) {
        let mut events = std::mem::take(&mut self.pick_events);
        self.picker.click(&mut events);
        dispatch_pick_events(&mut events, presenter);
        self.pick_events = events;
    }

    /// Run one nearest-particle query against the current interpolation.
    pub fn pick(&mut self, cursor_ndc: Vec2) -> Option<PickResult> {
        self.buffer
            .interpolate_into(self.animator.mix(), &mut self.interpolated);
        self.picker.nearest(
            cursor_ndc,
            &self.camera,
            &self.model_matrix(),
            &self.interpolated,
        )
    }

    /// Advance timers, tweens, the dolly and hover, then draw.
    pub fn frame(
        &mut self,
        now_sec: f64,
        renderer: &mut dyn Renderer,
        presenter: &mut dyn Presenter,
    ) {
        let dt = self
            .last_frame_sec
            .map(|last| (now_sec - last).max(0.0))
            .unwrap_or(0.0);
        self.last_frame_sec = Some(now_sec);
        self.spin += SPIN_RADIANS_PER_SEC * dt as f32;

        let mut events = std::mem::take(&mut self.scene_events);
        self.sequencer.tick(now_sec, &mut events);
        self.apply_scene_events(&mut events, now_sec, Some(&mut *presenter));
        self.scene_events = events;

        self.animator.advance(now_sec);
        self.camera.set_distance(self.animator.camera_distance());

        if let Some(cursor) = self.cursor_ndc.filter(|_| self.picker.is_active()) {
            self.buffer
                .interpolate_into(self.animator.mix(), &mut self.interpolated);
            let model = self.model_matrix();
            self.picker.update_hover(
                cursor,
                &self.camera,
                &model,
                &self.interpolated,
                &mut self.pick_events,
            );
        }
        let mut pick_events = std::mem::take(&mut self.pick_events);
        dispatch_pick_events(&mut pick_events, presenter);
        self.pick_events = pick_events;

        let dirty = self.buffer.take_dirty();
        let frame = ParticleFrame {
            positions: self.buffer.positions(),
            targets: self.buffer.targets(),
            sizes: self.buffer.sizes(),
            colors: self.buffer.colors(),
            mix: self.animator.mix(),
            point_size: self.buffer.point_size(),
            time_sec: now_sec as f32,
            model: self.model_matrix(),
            camera: &self.camera,
            dirty,
        };
        renderer.draw(&frame);
    }

    /// Stop all deferred work so nothing fires after teardown.
    pub fn shutdown(&mut self) {
        self.sequencer.cancel_all();
        self.animator.cancel();
        self.scene_events.clear();
        log::info!("[stage] shut down");
    }

    fn apply_scene_events(
        &mut self,
        events: &mut Vec<SceneEvent>,
        now_sec: f64,
        mut presenter: Option<&mut dyn Presenter>,
    ) {
        for event in events.drain(..) {
            match event {
                SceneEvent::FadeOutText => {
                    if let Some(p) = presenter.as_deref_mut() {
                        p.fade_out_text();
                    }
                }
                SceneEvent::ShowText(text) => {
                    if let Some(p) = presenter.as_deref_mut() {
                        p.show_text(&text);
                    }
                }
                SceneEvent::Morph {
                    scene,
                    shape,
                    particle_size,
                    duration_sec,
                    mix_end,
                } => {
                    self.buffer.retarget(&shape, &mut self.animator);
                    self.buffer.set_point_size(particle_size);
                    self.animator
                        .animate_mix_to(mix_end, duration_sec, now_sec);
                    log::info!(
                        "[stage] {} morph to {} over {:.1}s",
                        scene.label(),
                        shape.name(),
                        duration_sec
                    );
                }
                SceneEvent::Picking(on) => {
                    self.picker.set_active(on, &mut self.pick_events);
                }
                SceneEvent::Dolly { from, to } => {
                    self.animator.start_dolly(from, to);
                }
            }
        }
    }
}

fn dispatch_pick_events(events: &mut Vec<PickEvent>, presenter: &mut dyn Presenter) {
    for event in events.drain(..) {
        match event {
            PickEvent::HoverEntered(_) => presenter.set_pointer(true),
            PickEvent::HoverLeft => presenter.set_pointer(false),
            PickEvent::Activated(i) => presenter.particle_activated(i),
        }
    }
}
