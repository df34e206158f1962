//! Nearest-particle picking under the cursor.

use crate::camera::Camera;
use crate::constants::PICK_RADIUS_PX;
use glam::{Mat4, Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickResult {
    pub index: usize,
    /// Distance from the cursor to the projected particle, in pixels.
    pub screen_distance_px: f32,
    /// Clip-space `w` of the particle (larger is farther).
    pub depth: f32,
}

/// Interaction signals for the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickEvent {
    /// The cursor is over particle `i` (pointer affordance on).
    HoverEntered(usize),
    /// The cursor left every particle (pointer affordance off).
    HoverLeft,
    /// Click on a hovered particle.
    Activated(usize),
}

#[derive(Clone, Debug)]
pub struct PickIndex {
    active: bool,
    hovered: Option<usize>,
    pub radius_px: f32,
}

impl Default for PickIndex {
    fn default() -> Self {
        Self {
            active: false,
            hovered: None,
            radius_px: PICK_RADIUS_PX,
        }
    }
}

impl PickIndex {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Enable or disable interaction. Disabling drops any hover.
    pub fn set_active(&mut self, active: bool, out_events: &mut Vec<PickEvent>) {
        if self.active == active {
            return;
        }
        self.active = active;
        log::info!("[pick] interaction {}", if active { "enabled" } else { "disabled" });
        if !active && self.hovered.take().is_some() {
            out_events.push(PickEvent::HoverLeft);
        }
    }

    /// Closest particle to `cursor_ndc` within the pick radius.
    ///
    /// `points` are world positions before `model` is applied.
    pub fn nearest(
        &self,
        cursor_ndc: Vec2,
        camera: &Camera,
        model: &Mat4,
        points: &[Vec3],
    ) -> Option<PickResult> {
        let cursor_px = camera.viewport.ndc_to_pixels(cursor_ndc);
        let mvp = camera.view_projection() * *model;
        let radius = self.radius_px;

        let mut best: Option<PickResult> = None;
        for (index, p) in points.iter().enumerate() {
            let Some((px, depth)) = camera.project(&mvp, *p) else {
                continue;
            };
            let d = px.distance(cursor_px);
            if d > radius {
                continue;
            }
            match best {
                Some(b)
                    if d > b.screen_distance_px
                        || (d == b.screen_distance_px && depth >= b.depth) => {}
                _ => {
                    best = Some(PickResult {
                        index,
                        screen_distance_px: d,
                        depth,
                    })
                }
            }
        }
        best
    }

    /// Re-run the hover query and report transitions. Inactive indexes do nothing.
    pub fn update_hover(
        &mut self,
        cursor_ndc: Vec2,
        camera: &Camera,
        model: &Mat4,
        points: &[Vec3],
        out_events: &mut Vec<PickEvent>,
    ) -> Option<PickResult> {
        if !self.active {
            return None;
        }
        let hit = self.nearest(cursor_ndc, camera, model, points);
        let now = hit.map(|h| h.index);
        if now != self.hovered {
            match now {
                Some(i) => out_events.push(PickEvent::HoverEntered(i)),
                None => out_events.push(PickEvent::HoverLeft),
            }
            self.hovered = now;
        }
        hit
    }

    /// Activate the hovered particle, if any.
    pub fn click(&self, out_events: &mut Vec<PickEvent>) {
        if !self.active {
            return;
        }
        if let Some(i) = self.hovered {
            log::info!("[pick] particle {} activated", i);
            out_events.push(PickEvent::Activated(i));
        }
    }
}
