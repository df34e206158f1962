mod headless;
mod overlay;
mod render;

use clap::Parser;
use glam::Vec2;
use morph_core::{
    FrameClock, MorphConfig, SceneId, Stage, Viewport, DEFAULT_PARTICLE_COUNT,
};
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

#[derive(Parser, Debug, Clone)]
#[command(name = "particle-morph", version, about = "Particle cloud that morphs through a short story")]
struct Args {
    /// Number of particles.
    #[arg(long, env = "MORPH_PARTICLES", default_value_t = DEFAULT_PARTICLE_COUNT)]
    particles: usize,

    /// Name shown in the final reveal.
    #[arg(long, env = "MORPH_NAME")]
    name: Option<String>,

    /// Fixed RNG seed for a reproducible cloud.
    #[arg(long)]
    seed: Option<u64>,

    /// Run without a window on a simulated clock.
    #[arg(long)]
    headless: bool,

    /// Simulated duration for --headless.
    #[arg(long, default_value_t = 30.0)]
    seconds: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let config = MorphConfig::default()
        .with_particle_count(args.particles)?
        .with_name(args.name.as_deref())
        .with_seed(args.seed);
    log::info!(
        "[config] {} particles, reveal \"{}\"",
        config.particle_count,
        config.reveal_text()
    );

    if args.headless {
        return headless::run(config, args.seconds);
    }
    run_windowed(config)
}

fn run_windowed(config: MorphConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Particle Morph")
        .build(&event_loop)?;

    let size = window.inner_size();
    let clock = FrameClock::new();
    let mut stage = Stage::new(
        config.clone(),
        Viewport::new(size.width as f32, size.height as f32),
        clock.now_sec(),
    )?;
    let mut renderer =
        pollster::block_on(render::GpuRenderer::new(&window, config.particle_count))?;
    let mut presenter = overlay::WindowPresenter::new(&window);

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => {
                renderer.resize(size);
                stage.resize(Viewport::new(size.width as f32, size.height as f32));
            }
            WindowEvent::CloseRequested => {
                stage.shutdown();
                elwt.exit();
            }
            WindowEvent::CursorMoved { position, .. } => {
                let px = Vec2::new(position.x as f32, position.y as f32);
                let ndc = stage.camera().viewport.pixels_to_ndc(px);
                stage.pointer_moved(ndc);
            }
            WindowEvent::CursorLeft { .. } => stage.pointer_left(),
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if stage.current_scene() == Some(SceneId::Idle) {
                    stage.trigger(clock.now_sec());
                } else {
                    stage.click(&mut presenter);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match logical_key {
                Key::Named(NamedKey::Space) | Key::Named(NamedKey::Enter) => {
                    stage.trigger(clock.now_sec());
                }
                Key::Named(NamedKey::Escape) => {
                    stage.shutdown();
                    elwt.exit();
                }
                _ => {}
            },
            WindowEvent::RedrawRequested => {
                stage.frame(clock.now_sec(), &mut renderer, &mut presenter);
                if renderer.is_fatal() {
                    stage.shutdown();
                    elwt.exit();
                }
            }
            _ => {}
        },
        Event::AboutToWait => renderer.window.request_redraw(),
        _ => {}
    })?;
    Ok(())
}
