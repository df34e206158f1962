//! Where the cloud is seen from, and how world points land on screen.
//!
//! Front-ends push the drawable size in as a [`Viewport`]; the core never
//! asks a window for it.

use crate::constants::{camera_eye, CAMERA_FOVY_DEG, CAMERA_START_Z, CAMERA_ZFAR, CAMERA_ZNEAR};
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Drawable surface size in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Normalized device coordinates (+y up) to pixels (+y down).
    #[inline]
    pub fn ndc_to_pixels(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        )
    }

    /// Pixels (+y down) to normalized device coordinates (+y up).
    #[inline]
    pub fn pixels_to_ndc(&self, px: Vec2) -> Vec2 {
        Vec2::new(
            2.0 * px.x / self.width - 1.0,
            1.0 - 2.0 * px.y / self.height,
        )
    }
}

/// Eye on the +Z axis looking at the origin; the dolly only moves `eye.z`.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub viewport: Viewport,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            eye: camera_eye(CAMERA_START_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            viewport,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Dolly along Z, keeping the look-at point at the origin.
    pub fn set_distance(&mut self, distance: f32) {
        self.eye = camera_eye(distance);
    }

    /// Perspective for the current viewport aspect.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy_radians,
            self.viewport.aspect(),
            self.znear,
            self.zfar,
        )
    }

    /// World to eye space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a point through `mvp` to pixels.
    ///
    /// Returns `(pixel, depth)` where depth is the clip-space `w`, or `None`
    /// for points at or behind the eye.
    #[inline]
    pub fn project(&self, mvp: &Mat4, point: Vec3) -> Option<(Vec2, f32)> {
        let clip = *mvp * Vec4::new(point.x, point.y, point.z, 1.0);
        if clip.w <= self.znear {
            return None;
        }
        let ndc = Vec2::new(clip.x / clip.w, clip.y / clip.w);
        Some((self.viewport.ndc_to_pixels(ndc), clip.w))
    }
}
