use glam::Vec3;

// Shared shape/animation/interaction tuning constants used by the engine and front-ends.

// Particle system
pub const DEFAULT_PARTICLE_COUNT: usize = 30_000;
pub const MAX_PARTICLE_COUNT: usize = 1_000_000;
pub const DISPERSION_HALF_EXTENT: f32 = 50.0; // bootstrap cube is [-50, 50]^3

// Base color band (HSL)
pub const BASE_HUE: f32 = 0.6; // blue
pub const HUE_SPREAD: f32 = 0.1; // towards purple
pub const BASE_SATURATION: f32 = 0.8;
pub const BASE_LIGHTNESS: f32 = 0.6;

// Cell membrane
pub const CELL_RADIUS: f32 = 8.0;
pub const CELL_WOBBLE_FREQUENCY: f32 = 0.5;
pub const CELL_WOBBLE_AMPLITUDE: f32 = 0.2; // displacement in [0.8, 1.2]

// Double helix
pub const HELIX_LENGTH: f32 = 60.0;
pub const HELIX_RADIUS: f32 = 4.0;
pub const HELIX_TURNS: f32 = 10.0;
pub const HELIX_RUNG_PERIOD: usize = 50; // one rung every 50 particles
pub const HELIX_RUNG_WIDTH: usize = 5; // particles per rung

// Spiral galaxy
pub const GALAXY_ARMS: u32 = 3;
pub const GALAXY_MAX_RADIUS: f32 = 35.0;
pub const GALAXY_TIGHTNESS: f32 = 0.5;
pub const GALAXY_WINDINGS: f32 = 3.0; // full turns from center to rim
pub const GALAXY_JITTER_CORE: f32 = 10.0; // dust spread at the center
pub const GALAXY_JITTER_FALLOFF: f32 = 8.0; // spread lost towards the rim
pub const GALAXY_THICKNESS: f32 = 0.1; // disk height as a fraction of radius

// Glyph/text
pub const GLYPH_SCALE: f32 = 1.5;
pub const GLYPH_BACKGROUND_PUSH: f32 = 6.0; // excess particles become far-away stars
pub const GLYPH_RASTER_WIDTH: usize = 1024;
pub const GLYPH_RASTER_HEIGHT: usize = 512;
pub const GLYPH_SAMPLE_STRIDE: usize = 4;
pub const GLYPH_WORLD_SCALE: f32 = 0.1;
pub const GLYPH_LIT_THRESHOLD: u8 = 128;
pub const GLYPH_ADVANCE_EM: f32 = 0.6; // character width as a fraction of the font size
pub const DEFAULT_FONT_SIZE: f32 = 100.0;
pub const NAME_FONT_SIZE: f32 = 120.0;

// Morphing
pub const SNAPSHOT_THRESHOLD: f32 = 0.5; // mix above which retarget snapshots target -> position
pub const DOLLY_DAMPING: f32 = 0.02;
pub const DOLLY_EPSILON: f32 = 0.1;

// Camera
pub const CAMERA_FOVY_DEG: f32 = 60.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const CAMERA_START_Z: f32 = 40.0;
pub const CAMERA_REVEAL_Z: f32 = 60.0; // zoomed out to fit the name
pub const SPIN_RADIANS_PER_SEC: f32 = 0.05; // ambient rotation about Y

// Interaction
pub const PICK_RADIUS_PX: f32 = 8.0;

// Presentation
pub const TEXT_FADE_OUT_SEC: f64 = 1.0;
pub const SIZE_ATTENUATION: f32 = 300.0; // point size scale at unit view depth

#[inline]
pub fn camera_eye(distance: f32) -> Vec3 {
    Vec3::new(0.0, 0.0, distance)
}
