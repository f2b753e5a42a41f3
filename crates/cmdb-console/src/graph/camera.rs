//! World-to-screen transform for the graph canvas

use egui::{Pos2, Rect, Vec2};

const MIN_ZOOM: f32 = 0.1;
const MAX_ZOOM: f32 = 5.0;
const FIT_MARGIN: f32 = 60.0;

/// Pan and zoom state. World coordinates are the scene's layout space;
/// screen coordinates are the widget rect.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub center: Pos2,
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            center: Pos2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    pub fn world_to_screen(&self, world: Pos2, viewport: Rect) -> Pos2 {
        viewport.center() + (world - self.center) * self.zoom
    }

    pub fn screen_to_world(&self, screen: Pos2, viewport: Rect) -> Pos2 {
        self.center + (screen - viewport.center()) / self.zoom
    }

    pub fn pan(&mut self, screen_delta: Vec2) {
        self.center -= screen_delta / self.zoom;
    }

    /// Zoom by `factor` about the viewport center, which stays fixed.
    pub fn zoom_step(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Zoom by `factor`, keeping the world point under `anchor` fixed.
    pub fn zoom_by(&mut self, factor: f32, anchor: Pos2, viewport: Rect) {
        let before = self.screen_to_world(anchor, viewport);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let after = self.screen_to_world(anchor, viewport);
        self.center += before - after;
    }

    /// Frame the whole world bounds inside the viewport.
    pub fn fit(&mut self, bounds: Rect, viewport: Rect) {
        self.center = bounds.center();
        if bounds.width() <= f32::EPSILON || bounds.height() <= f32::EPSILON {
            self.zoom = 1.0;
            return;
        }
        let zx = (viewport.width() - FIT_MARGIN) / bounds.width();
        let zy = (viewport.height() - FIT_MARGIN) / bounds.height();
        self.zoom = zx.min(zy).clamp(MIN_ZOOM, MAX_ZOOM);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0))
    }

    #[test]
    fn world_screen_round_trip() {
        let cam = Camera {
            center: Pos2::new(50.0, -20.0),
            zoom: 2.0,
        };
        let world = Pos2::new(123.0, 45.0);
        let screen = cam.world_to_screen(world, viewport());
        let back = cam.screen_to_world(screen, viewport());
        assert!((back - world).length() < 1e-3);
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let mut cam = Camera::default();
        let anchor = Pos2::new(200.0, 150.0);
        let world_before = cam.screen_to_world(anchor, viewport());
        cam.zoom_by(1.5, anchor, viewport());
        let world_after = cam.screen_to_world(anchor, viewport());
        assert!((world_after - world_before).length() < 1e-3);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = Camera::default();
        cam.zoom_by(100.0, Pos2::ZERO, viewport());
        assert!(cam.zoom <= MAX_ZOOM);
        cam.zoom_by(1e-6, Pos2::ZERO, viewport());
        assert!(cam.zoom >= MIN_ZOOM);
    }

    #[test]
    fn zoom_step_scales_and_clamps_without_moving_center() {
        let mut cam = Camera {
            center: Pos2::new(10.0, 20.0),
            zoom: 1.0,
        };
        cam.zoom_step(2.0);
        assert_eq!(cam.zoom, 2.0);
        assert_eq!(cam.center, Pos2::new(10.0, 20.0));
        cam.zoom_step(1000.0);
        assert_eq!(cam.zoom, MAX_ZOOM);
        cam.zoom_step(1e-9);
        assert_eq!(cam.zoom, MIN_ZOOM);
    }

    #[test]
    fn fit_centers_on_bounds() {
        let mut cam = Camera::default();
        let bounds = Rect::from_min_max(Pos2::new(-100.0, -100.0), Pos2::new(100.0, 100.0));
        cam.fit(bounds, viewport());
        assert_eq!(cam.center, bounds.center());
        assert!(cam.zoom > 0.0);
    }
}
