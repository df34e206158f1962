//! Windowless run on a simulated 60 fps clock, for CI and smoke tests.

use crate::overlay::LogPresenter;
use morph_core::{MorphConfig, ParticleFrame, Renderer, Stage, Viewport};

const FRAME_SEC: f64 = 1.0 / 60.0;
const TRIGGER_AT_SEC: f64 = 0.5;

/// Counts frames and uploads instead of drawing.
#[derive(Default)]
pub struct LogRenderer {
    pub frames: u64,
    pub uploads: u64,
    last_mix: f32,
}

impl Renderer for LogRenderer {
    fn draw(&mut self, frame: &ParticleFrame<'_>) {
        self.frames += 1;
        if frame.dirty.any() {
            self.uploads += 1;
            log::debug!("[render] upload {} instances", frame.len());
        }
        // Log each time the morph settles at either end
        let settled = frame.mix == 0.0 || frame.mix == 1.0;
        if settled && frame.mix != self.last_mix {
            log::info!("[render] mix settled at {:.1}", frame.mix);
        }
        self.last_mix = frame.mix;
    }
}

pub fn run(config: MorphConfig, seconds: f64) -> anyhow::Result<()> {
    let viewport = Viewport::new(1280.0, 720.0);
    let mut stage = Stage::new(config, viewport, 0.0)?;
    let mut renderer = LogRenderer::default();
    let mut presenter = LogPresenter::default();

    let total_frames = (seconds.max(0.0) / FRAME_SEC).ceil() as u64;
    let mut triggered = false;
    for n in 0..=total_frames {
        let now = n as f64 * FRAME_SEC;
        if !triggered && now >= TRIGGER_AT_SEC {
            triggered = stage.trigger(now);
        }
        stage.frame(now, &mut renderer, &mut presenter);
    }
    stage.shutdown();

    log::info!(
        "[headless] {} frames, {} uploads, final scene {}, {} captions",
        renderer.frames,
        renderer.uploads,
        stage.current_scene().map(|s| s.label()).unwrap_or("none"),
        presenter.texts.len()
    );
    Ok(())
}
