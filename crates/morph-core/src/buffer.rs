//! Per-particle storage: interpolation endpoints, sizes and colors.

use crate::animator::MorphAnimator;
use crate::constants::*;
use crate::shapes::{dispersion_point, ShapeSpec};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Which arrays changed since the renderer last uploaded them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirtyFlags {
    pub positions: bool,
    pub targets: bool,
    /// Sizes and colors; only set at initialization.
    pub attributes: bool,
}

impl DirtyFlags {
    pub fn any(&self) -> bool {
        self.positions || self.targets || self.attributes
    }
}

/// GPU vertex layout for one particle instance (48 bytes).
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub target: [f32; 3],
    pub _pad0: f32,
    pub color: [f32; 3],
    pub _pad1: f32,
}

/// Fixed-size particle cloud. `N` never changes after construction.
pub struct ParticleBuffer {
    positions: Vec<Vec3>,
    targets: Vec<Vec3>,
    sizes: Vec<f32>,
    colors: Vec<Vec3>,
    point_size: f32,
    dirty: DirtyFlags,
    rng: StdRng,
}

impl ParticleBuffer {
    /// Allocate `count` particles scattered through the bootstrap cube.
    ///
    /// Targets start equal to positions so an idle buffer renders the dust
    /// cloud at any mix factor.
    pub fn new(count: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let mut positions = Vec::with_capacity(count);
        let mut sizes = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);
        for _ in 0..count {
            positions.push(dispersion_point(&mut rng));
            sizes.push(rng.gen::<f32>());
            let hue = BASE_HUE + rng.gen::<f32>() * HUE_SPREAD;
            colors.push(hsl_to_rgb(hue, BASE_SATURATION, BASE_LIGHTNESS));
        }
        let targets = positions.clone();
        log::info!("[buffer] initialized {} particles", count);
        Self {
            positions,
            targets,
            sizes,
            colors,
            point_size: 1.0,
            dirty: DirtyFlags {
                positions: true,
                targets: true,
                attributes: true,
            },
            rng,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn targets(&self) -> &[Vec3] {
        &self.targets
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    pub fn set_point_size(&mut self, size: f32) {
        self.point_size = size.max(0.0);
    }

    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    /// Return and clear the pending upload flags.
    pub fn take_dirty(&mut self) -> DirtyFlags {
        std::mem::take(&mut self.dirty)
    }

    /// Point new targets at `shape`.
    ///
    /// When the morph is past [`SNAPSHOT_THRESHOLD`] the old targets become
    /// the new sources and the mix factor drops to zero, so the rendered
    /// cloud does not jump.
    pub fn retarget(&mut self, shape: &ShapeSpec, animator: &mut MorphAnimator) {
        if self.is_empty() {
            return;
        }
        if animator.mix() > SNAPSHOT_THRESHOLD {
            self.snapshot();
            animator.reset_mix();
        }

        let total = self.len();
        for (i, target) in self.targets.iter_mut().enumerate() {
            *target = shape.point(i, total, &mut self.rng);
        }
        self.dirty.targets = true;
        log::debug!("[buffer] retargeted {} particles to {}", total, shape.name());
    }

    /// Copy targets into positions.
    pub fn snapshot(&mut self) {
        self.positions.copy_from_slice(&self.targets);
        self.dirty.positions = true;
    }

    #[inline]
    pub fn interpolated(&self, index: usize, mix: f32) -> Option<Vec3> {
        let p = self.positions.get(index)?;
        let t = self.targets.get(index)?;
        Some(p.lerp(*t, mix))
    }

    /// Fill `out` with every interpolated position, reusing its allocation.
    pub fn interpolate_into(&self, mix: f32, out: &mut Vec<Vec3>) {
        out.clear();
        out.extend(
            self.positions
                .iter()
                .zip(&self.targets)
                .map(|(p, t)| p.lerp(*t, mix)),
        );
    }
}

/// HSL (all components in [0, 1]) to linear RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec3 {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    if s == 0.0 {
        return Vec3::splat(l);
    }
    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Vec3::new(
        hue_channel(p, q, h + 1.0 / 3.0),
        hue_channel(p, q, h),
        hue_channel(p, q, h - 1.0 / 3.0),
    )
}

fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}
