//! Parametric shape generators.
//!
//! Every generator maps a particle index and the total particle count to a
//! point in world space. Randomized generators draw from the caller's RNG so
//! the particle buffer can be seeded for reproducible runs.

use crate::constants::*;
use crate::error::ShapeError;
use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Target shape for a retarget, consumed once per scene transition.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeSpec {
    /// Cell membrane: sphere with a low-frequency radial wobble.
    Sphere { radius: f32 },
    /// Double helix with rungs pulled towards the axis.
    Helix { length: f32, radius: f32, turns: f32 },
    /// Multi-arm spiral galaxy flattened into a disk.
    Spiral {
        arms: u32,
        max_radius: f32,
        tightness: f32,
    },
    /// Pre-sampled text points; excess particles become background stars.
    Glyph { points: Vec<Vec2>, scale: f32 },
}

impl ShapeSpec {
    pub fn cell() -> Self {
        Self::Sphere {
            radius: CELL_RADIUS,
        }
    }

    pub fn dna() -> Self {
        Self::Helix {
            length: HELIX_LENGTH,
            radius: HELIX_RADIUS,
            turns: HELIX_TURNS,
        }
    }

    pub fn galaxy() -> Self {
        Self::Spiral {
            arms: GALAXY_ARMS,
            max_radius: GALAXY_MAX_RADIUS,
            tightness: GALAXY_TIGHTNESS,
        }
    }

    pub fn text(points: Vec<Vec2>) -> Self {
        Self::Glyph {
            points,
            scale: GLYPH_SCALE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sphere { .. } => "sphere",
            Self::Helix { .. } => "helix",
            Self::Spiral { .. } => "spiral",
            Self::Glyph { .. } => "glyph",
        }
    }

    /// Check parameters before handing the spec to a buffer.
    ///
    /// An empty glyph point list is valid: every particle takes the fallback.
    pub fn validate(&self) -> Result<(), ShapeError> {
        match self {
            Self::Sphere { radius } => positive("radius", *radius),
            Self::Helix {
                length,
                radius,
                turns,
            } => {
                positive("length", *length)?;
                positive("radius", *radius)?;
                positive("turns", *turns)
            }
            Self::Spiral {
                arms,
                max_radius,
                tightness,
            } => {
                if *arms == 0 {
                    return Err(ShapeError::NoArms);
                }
                positive("max_radius", *max_radius)?;
                positive("tightness", *tightness)
            }
            Self::Glyph { points, scale } => {
                positive("scale", *scale)?;
                match points.iter().position(|p| !p.is_finite()) {
                    Some(index) => Err(ShapeError::NonFinitePoint { index }),
                    None => Ok(()),
                }
            }
        }
    }

    /// Target point for particle `index` out of `total`.
    pub fn point<R: Rng + ?Sized>(&self, index: usize, total: usize, rng: &mut R) -> Vec3 {
        if total == 0 {
            return Vec3::ZERO;
        }
        match self {
            Self::Sphere { radius } => cell_point(*radius, rng),
            Self::Helix {
                length,
                radius,
                turns,
            } => helix_point(index, total, *length, *radius, *turns),
            Self::Spiral {
                arms,
                max_radius,
                tightness,
            } => spiral_point(index, total, *arms, *max_radius, *tightness, rng),
            Self::Glyph { points, scale } => glyph_point(index, total, points, *scale, rng),
        }
    }
}

#[inline]
fn positive(name: &'static str, value: f32) -> Result<(), ShapeError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ShapeError::NonPositive { name, value })
    }
}

/// Uniform point in the bootstrap cube.
pub fn dispersion_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let h = DISPERSION_HALF_EXTENT;
    Vec3::new(
        rng.gen_range(-h..h),
        rng.gen_range(-h..h),
        rng.gen_range(-h..h),
    )
}

/// Uniform point on a sphere, displaced radially by `1 + 0.2·sin(0.5x)·cos(0.5y)`.
pub fn cell_point<R: Rng + ?Sized>(radius: f32, rng: &mut R) -> Vec3 {
    let u: f32 = rng.gen();
    let v: f32 = rng.gen();
    let theta = TAU * u;
    let phi = (2.0 * v - 1.0).clamp(-1.0, 1.0).acos();

    let p = Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    );
    p * membrane_displacement(p)
}

#[inline]
pub fn membrane_displacement(p: Vec3) -> f32 {
    let noise = (p.x * CELL_WOBBLE_FREQUENCY).sin() * (p.y * CELL_WOBBLE_FREQUENCY).cos();
    1.0 + noise * CELL_WOBBLE_AMPLITUDE
}

/// Base strand angle for `index`, before the rung pull is applied.
#[inline]
pub fn helix_angle(index: usize, total: usize, turns: f32) -> f32 {
    let t = index as f32 / total as f32;
    let offset = if index % 2 == 0 { 0.0 } else { PI };
    t * TAU * turns + offset
}

pub fn helix_point(index: usize, total: usize, length: f32, radius: f32, turns: f32) -> Vec3 {
    let t = index as f32 / total as f32;
    let angle = helix_angle(index, total, turns);
    let y = t * length - length / 2.0;
    let mut x = radius * angle.cos();
    let mut z = radius * angle.sin();

    let rung = index % HELIX_RUNG_PERIOD;
    if rung < HELIX_RUNG_WIDTH {
        let pull = rung as f32 / HELIX_RUNG_WIDTH as f32;
        x *= pull;
        z *= pull;
    }
    Vec3::new(x, y, z)
}

/// Radius of the spiral at `progress` in [0, 1]; power law concentrates mass at the core.
#[inline]
pub fn spiral_radius(progress: f32, max_radius: f32, tightness: f32) -> f32 {
    progress.max(0.0).powf(tightness) * max_radius
}

/// Full width of the per-axis dust jitter at `progress`; narrows towards the rim.
#[inline]
pub fn spiral_jitter_span(progress: f32) -> f32 {
    GALAXY_JITTER_CORE - progress * GALAXY_JITTER_FALLOFF
}

pub fn spiral_point<R: Rng + ?Sized>(
    index: usize,
    total: usize,
    arms: u32,
    max_radius: f32,
    tightness: f32,
    rng: &mut R,
) -> Vec3 {
    let arms = arms.max(1);
    let progress = index as f32 / total as f32;
    let arm = (index % arms as usize) as f32;
    let angle = progress * TAU * GALAXY_WINDINGS + arm * (TAU / arms as f32);
    let radius = spiral_radius(progress, max_radius, tightness);

    let span = spiral_jitter_span(progress);
    let jx = (rng.gen::<f32>() - 0.5) * span;
    let jz = (rng.gen::<f32>() - 0.5) * span;
    let y = (rng.gen::<f32>() - 0.5) * radius * GALAXY_THICKNESS;

    Vec3::new(angle.cos() * radius + jx, y, angle.sin() * radius + jz)
}

pub fn glyph_point<R: Rng + ?Sized>(
    index: usize,
    total: usize,
    points: &[Vec2],
    scale: f32,
    rng: &mut R,
) -> Vec3 {
    match points.get(index) {
        Some(p) => Vec3::new(p.x * scale, p.y * scale, 0.0),
        None => {
            spiral_point(
                index,
                total,
                GALAXY_ARMS,
                GALAXY_MAX_RADIUS,
                GALAXY_TIGHTNESS,
                rng,
            ) * GLYPH_BACKGROUND_PUSH
        }
    }
}
