//! Frame-clocked animation: the morph mix factor and the camera dolly.
//!
//! Nothing here schedules itself. The owner calls [`MorphAnimator::advance`]
//! once per frame with the current time in seconds; a new tween simply
//! replaces the active one.

use crate::constants::{CAMERA_START_Z, DOLLY_DAMPING, DOLLY_EPSILON};

/// Decelerating curve over progress `p`, clamped to [0, 1].
#[inline]
pub fn ease_out_cubic(p: f32) -> f32 {
    1.0 - (1.0 - p.clamp(0.0, 1.0)).powi(3)
}

/// A single scalar animation from `start` to `end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub start: f32,
    pub end: f32,
    pub duration_sec: f64,
    pub start_sec: f64,
}

impl Tween {
    pub fn new(start: f32, end: f32, duration_sec: f64, start_sec: f64) -> Self {
        Self {
            start,
            end,
            duration_sec,
            start_sec,
        }
    }

    /// Linear progress in [0, 1]; a non-positive duration is complete immediately.
    pub fn progress(&self, now_sec: f64) -> f32 {
        if self.duration_sec <= 0.0 {
            return 1.0;
        }
        ((now_sec - self.start_sec) / self.duration_sec).clamp(0.0, 1.0) as f32
    }

    pub fn value_at(&self, now_sec: f64) -> f32 {
        let p = self.progress(now_sec);
        if p >= 1.0 {
            return self.end;
        }
        self.start + (self.end - self.start) * ease_out_cubic(p)
    }

    pub fn is_finished(&self, now_sec: f64) -> bool {
        self.progress(now_sec) >= 1.0
    }
}

/// Exponential approach of a scalar towards a target, one step per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Damper {
    pub current: f32,
    pub target: f32,
    pub k: f32,
    pub epsilon: f32,
}

impl Damper {
    pub fn new(from: f32, to: f32) -> Self {
        Self {
            current: from,
            target: to,
            k: DOLLY_DAMPING,
            epsilon: DOLLY_EPSILON,
        }
    }

    /// Take one step; returns `true` once settled (and snapped onto the target).
    pub fn step(&mut self) -> bool {
        self.current += (self.target - self.current) * self.k;
        if (self.target - self.current).abs() <= self.epsilon {
            self.current = self.target;
            return true;
        }
        false
    }
}

/// Owns the process-wide mix factor and the camera distance.
#[derive(Clone, Debug)]
pub struct MorphAnimator {
    mix: f32,
    tween: Option<Tween>,
    camera_distance: f32,
    dolly: Option<Damper>,
}

impl Default for MorphAnimator {
    fn default() -> Self {
        Self {
            mix: 0.0,
            tween: None,
            camera_distance: CAMERA_START_Z,
            dolly: None,
        }
    }
}

impl MorphAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn mix(&self) -> f32 {
        self.mix
    }

    pub fn is_morphing(&self) -> bool {
        self.tween.is_some()
    }

    pub fn active_tween(&self) -> Option<&Tween> {
        self.tween.as_ref()
    }

    /// Start a mix tween, superseding any active one.
    pub fn animate_mix(&mut self, start: f32, end: f32, duration_sec: f64, now_sec: f64) {
        let start = start.clamp(0.0, 1.0);
        let end = end.clamp(0.0, 1.0);
        self.mix = start;
        self.tween = Some(Tween::new(start, end, duration_sec, now_sec));
    }

    /// Start a mix tween from wherever the mix factor currently is.
    pub fn animate_mix_to(&mut self, end: f32, duration_sec: f64, now_sec: f64) {
        self.animate_mix(self.mix, end, duration_sec, now_sec);
    }

    /// Drop the active tween and zero the mix factor (retarget snapshot).
    pub fn reset_mix(&mut self) {
        self.tween = None;
        self.mix = 0.0;
    }

    pub fn set_mix(&mut self, mix: f32) {
        self.tween = None;
        self.mix = mix.clamp(0.0, 1.0);
    }

    #[inline]
    pub fn camera_distance(&self) -> f32 {
        self.camera_distance
    }

    pub fn is_dollying(&self) -> bool {
        self.dolly.is_some()
    }

    pub fn start_dolly(&mut self, from: f32, to: f32) {
        self.camera_distance = from;
        self.dolly = Some(Damper::new(from, to));
    }

    /// Cancel everything in flight, leaving current values where they are.
    pub fn cancel(&mut self) {
        self.tween = None;
        self.dolly = None;
    }

    /// Single per-frame update pass over the mix tween and the dolly.
    pub fn advance(&mut self, now_sec: f64) {
        if let Some(tween) = self.tween {
            self.mix = tween.value_at(now_sec).clamp(0.0, 1.0);
            if tween.is_finished(now_sec) {
                self.mix = tween.end;
                self.tween = None;
            }
        }
        if let Some(dolly) = self.dolly.as_mut() {
            let settled = dolly.step();
            self.camera_distance = dolly.current;
            if settled {
                self.dolly = None;
            }
        }
    }
}
