//! Narrative scene sequencing.
//!
//! The sequencer is a linear state machine over a fixed scene table. It does
//! not touch the particle buffer or the presentation layer directly; each
//! step pushes [`SceneEvent`]s for the owner to apply, so picking, text and
//! morphing stay decoupled from one another.

use crate::config::MorphConfig;
use crate::constants::*;
use crate::error::ShapeError;
use crate::glyph::GlyphSampler;
use crate::shapes::ShapeSpec;
use crate::timer::{TimerId, TimerQueue};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SceneId {
    Idle,
    Helix,
    Network,
    Galaxy,
    NameReveal,
}

impl SceneId {
    pub fn label(self) -> &'static str {
        match self {
            SceneId::Idle => "idle",
            SceneId::Helix => "helix",
            SceneId::Network => "network",
            SceneId::Galaxy => "galaxy",
            SceneId::NameReveal => "name-reveal",
        }
    }
}

/// Shape a scene morphs into.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneShape {
    Spec(ShapeSpec),
    /// The configured name, sampled when the scene is entered.
    NameGlyph { font_size: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub id: SceneId,
    pub shape: SceneShape,
    pub particle_size: f32,
    pub morph_duration_sec: f64,
    /// Delay before auto-advancing; `None` for the terminal scene.
    pub hold_duration_sec: Option<f64>,
    pub narrative: Option<String>,
    /// Picking is enabled for the whole hold window.
    pub pickable: bool,
    /// Camera dolly `(from, to)` started on entry.
    pub dolly: Option<(f32, f32)>,
}

impl Scene {
    /// The default five-scene story: cell, helix, network, galaxy, name.
    pub fn default_sequence(config: &MorphConfig) -> Vec<Scene> {
        vec![
            Scene {
                id: SceneId::Idle,
                shape: SceneShape::Spec(ShapeSpec::cell()),
                particle_size: 1.0,
                morph_duration_sec: 1.0,
                hold_duration_sec: None,
                narrative: None,
                pickable: false,
                dolly: None,
            },
            Scene {
                id: SceneId::Helix,
                shape: SceneShape::Spec(ShapeSpec::dna()),
                particle_size: 1.0,
                morph_duration_sec: 3.0,
                hold_duration_sec: Some(7.0),
                narrative: Some("Encoded with brilliance.".to_string()),
                pickable: false,
                dolly: None,
            },
            Scene {
                id: SceneId::Network,
                shape: SceneShape::Spec(ShapeSpec::cell()),
                particle_size: 2.0,
                morph_duration_sec: 2.5,
                hold_duration_sec: Some(6.0),
                narrative: Some("Driven by curiosity.".to_string()),
                pickable: true,
                dolly: None,
            },
            Scene {
                id: SceneId::Galaxy,
                shape: SceneShape::Spec(ShapeSpec::galaxy()),
                particle_size: 1.0,
                morph_duration_sec: 4.0,
                hold_duration_sec: Some(7.0),
                narrative: Some("Built to explore.".to_string()),
                pickable: false,
                dolly: None,
            },
            Scene {
                id: SceneId::NameReveal,
                shape: SceneShape::NameGlyph {
                    font_size: NAME_FONT_SIZE,
                },
                particle_size: 1.0,
                morph_duration_sec: 4.0,
                hold_duration_sec: None,
                narrative: Some(config.reveal_text()),
                pickable: false,
                dolly: Some((CAMERA_START_Z, CAMERA_REVEAL_Z)),
            },
        ]
    }
}

/// Work requested by the sequencer, applied by the owner in order.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneEvent {
    /// Start fading the narrative text out.
    FadeOutText,
    /// Swap in and fade in new narrative text.
    ShowText(String),
    /// Retarget the buffer and tween the mix factor to `mix_end`.
    Morph {
        scene: SceneId,
        shape: ShapeSpec,
        particle_size: f32,
        duration_sec: f64,
        mix_end: f32,
    },
    Picking(bool),
    Dolly { from: f32, to: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    /// Text has faded out; enter the scene.
    Enter(usize),
    /// Hold elapsed; leave the scene.
    Leave(usize),
}

pub struct SceneSequencer {
    scenes: Vec<Scene>,
    cursor: usize,
    transition: Option<TimerId>,
    hold: Option<TimerId>,
    timers: TimerQueue<Step>,
    sampler: GlyphSampler,
    particle_budget: usize,
    name: String,
}

impl SceneSequencer {
    /// Validate the literal shapes; the name and glyph budget come from `config`.
    pub fn new(scenes: Vec<Scene>, config: &MorphConfig) -> Result<Self, ShapeError> {
        for scene in &scenes {
            if let SceneShape::Spec(spec) = &scene.shape {
                spec.validate()?;
            }
        }
        Ok(Self {
            scenes,
            cursor: 0,
            transition: None,
            hold: None,
            timers: TimerQueue::new(),
            sampler: GlyphSampler::default(),
            particle_budget: config.particle_count,
            name: config.custom_name.clone(),
        })
    }

    pub fn with_default_scenes(config: &MorphConfig) -> Result<Self, ShapeError> {
        Self::new(Scene::default_sequence(config), config)
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&Scene> {
        self.scenes.get(self.cursor)
    }

    pub fn current_id(&self) -> Option<SceneId> {
        self.current().map(|s| s.id)
    }

    /// A scene change is between its fade-out and its entry.
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn is_terminal(&self) -> bool {
        self.cursor + 1 >= self.scenes.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Enter the first scene immediately, without a text fade.
    pub fn start(&mut self, now_sec: f64, out_events: &mut Vec<SceneEvent>) {
        self.cursor = 0;
        self.enter(0, now_sec, out_events);
    }

    /// Manual trigger; only honored while the first scene is showing.
    pub fn trigger(&mut self, now_sec: f64, out_events: &mut Vec<SceneEvent>) -> bool {
        if self.cursor != 0 {
            log::debug!("[scene] manual trigger ignored outside the first scene");
            return false;
        }
        self.advance(now_sec, out_events)
    }

    /// Move to the next scene. Ignored while a transition is already in
    /// flight and in the terminal scene.
    pub fn advance(&mut self, now_sec: f64, out_events: &mut Vec<SceneEvent>) -> bool {
        if self.transition.is_some() {
            log::debug!("[scene] advance ignored, transition in flight");
            return false;
        }
        if self.is_terminal() {
            return false;
        }
        if let Some(hold) = self.hold.take() {
            self.timers.cancel(hold);
        }
        self.cursor += 1;
        log::info!(
            "[scene] advancing to {}",
            self.scenes[self.cursor].id.label()
        );
        out_events.push(SceneEvent::FadeOutText);
        self.transition = Some(
            self.timers
                .schedule(now_sec + TEXT_FADE_OUT_SEC, Step::Enter(self.cursor)),
        );
        true
    }

    /// Fire every timer due at `now_sec`.
    pub fn tick(&mut self, now_sec: f64, out_events: &mut Vec<SceneEvent>) {
        while let Some((id, step)) = self.timers.pop_due(now_sec) {
            match step {
                Step::Enter(idx) => {
                    if self.transition == Some(id) {
                        self.transition = None;
                    }
                    self.enter(idx, now_sec, out_events);
                }
                Step::Leave(idx) => {
                    if self.hold == Some(id) {
                        self.hold = None;
                    }
                    if self.scenes.get(idx).is_some_and(|s| s.pickable) {
                        out_events.push(SceneEvent::Picking(false));
                    }
                    self.advance(now_sec, out_events);
                }
            }
        }
    }

    /// Drop all scheduled work; the sequence stops where it is.
    pub fn cancel_all(&mut self) {
        self.timers.cancel_all();
        self.transition = None;
        self.hold = None;
    }

    fn enter(&mut self, idx: usize, now_sec: f64, out_events: &mut Vec<SceneEvent>) {
        let Some(scene) = self.scenes.get(idx) else {
            return;
        };
        if let Some(text) = &scene.narrative {
            out_events.push(SceneEvent::ShowText(text.clone()));
        }

        let shape = match &scene.shape {
            SceneShape::Spec(spec) => spec.clone(),
            SceneShape::NameGlyph { font_size } => {
                let points = self
                    .sampler
                    .sample(&self.name, self.particle_budget, *font_size);
                if points.is_empty() {
                    log::warn!("[scene] {:?} produced no glyph points; scattering", self.name);
                }
                ShapeSpec::text(points)
            }
        };
        // The first scene only seeds targets; the cloud stays dispersed.
        let mix_end = if idx == 0 { 0.0 } else { 1.0 };
        out_events.push(SceneEvent::Morph {
            scene: scene.id,
            shape,
            particle_size: scene.particle_size,
            duration_sec: scene.morph_duration_sec,
            mix_end,
        });

        if scene.pickable {
            out_events.push(SceneEvent::Picking(true));
        }
        if let Some((from, to)) = scene.dolly {
            out_events.push(SceneEvent::Dolly { from, to });
        }
        if let Some(hold) = scene.hold_duration_sec {
            if idx + 1 < self.scenes.len() {
                self.hold = Some(self.timers.schedule(now_sec + hold, Step::Leave(idx)));
            }
        }
        log::info!("[scene] entered {}", scene.id.label());
    }
}
