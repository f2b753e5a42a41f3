//! Graph canvas widget
//!
//! Draws the scene with the current camera, handles drag-to-pan,
//! scroll-to-zoom, hover highlighting and click selection. Hit testing is a
//! linear scan over nodes, which is fine at the page's node limit.

use egui::{Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use super::camera::Camera;
use super::scene::GraphScene;

const ZOOM_STEP: f32 = 1.2;
const SCROLL_ZOOM_RATE: f32 = 0.0015;
const EDGE_COLOR: Color32 = Color32::from_gray(140);
const LABEL_ZOOM_CUTOFF: f32 = 0.5;

pub struct GraphWidget {
    scene: GraphScene,
    camera: Camera,
    pub selected: Option<String>,
    hovered: Option<usize>,
    needs_fit: bool,
}

impl Default for GraphWidget {
    fn default() -> Self {
        Self {
            scene: GraphScene::default(),
            camera: Camera::default(),
            selected: None,
            hovered: None,
            needs_fit: true,
        }
    }
}

impl GraphWidget {
    pub fn set_scene(&mut self, scene: GraphScene) {
        if let Some(id) = &self.selected {
            if scene.node_index(id).is_none() {
                self.selected = None;
            }
        }
        self.scene = scene;
        self.hovered = None;
        self.needs_fit = true;
    }

    pub fn scene(&self) -> &GraphScene {
        &self.scene
    }

    /// Select a node and center the camera on it.
    pub fn focus_node(&mut self, id: &str) {
        if let Some(i) = self.scene.node_index(id) {
            self.selected = Some(id.to_string());
            self.camera.center = self.scene.nodes[i].pos;
            self.needs_fit = false;
        }
    }

    pub fn zoom_in(&mut self) {
        self.camera.zoom_step(ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.camera.zoom_step(1.0 / ZOOM_STEP);
    }

    pub fn fit(&mut self) {
        self.needs_fit = true;
    }

    /// Draw the graph; returns the id of a node clicked this frame.
    pub fn ui(&mut self, ui: &mut egui::Ui) -> Option<String> {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, ui.visuals().extreme_bg_color);

        if self.scene.is_empty() {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "No graph data",
                FontId::proportional(16.0),
                ui.visuals().weak_text_color(),
            );
            return None;
        }

        if self.needs_fit {
            self.camera.fit(self.scene.bounds(), rect);
            self.needs_fit = false;
        }

        if response.dragged() {
            self.camera.pan(response.drag_delta());
        }
        if let Some(hover_pos) = response.hover_pos() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > f32::EPSILON {
                let factor = (scroll * SCROLL_ZOOM_RATE).exp();
                self.camera.zoom_by(factor, hover_pos, rect);
            }
            self.hovered = self.hit_test(hover_pos, rect);
        } else {
            self.hovered = None;
        }

        let mut clicked = None;
        if response.clicked() {
            if let Some(i) = self.hovered {
                let id = self.scene.nodes[i].id.clone();
                self.selected = Some(id.clone());
                clicked = Some(id);
            } else {
                self.selected = None;
            }
        }

        self.draw_edges(&painter, rect);
        self.draw_nodes(ui, &painter, rect);

        clicked
    }

    fn hit_test(&self, screen: Pos2, viewport: Rect) -> Option<usize> {
        let world = self.camera.screen_to_world(screen, viewport);
        self.scene
            .nodes
            .iter()
            .position(|n| n.pos.distance(world) <= n.radius)
    }

    fn draw_edges(&self, painter: &egui::Painter, viewport: Rect) {
        for edge in &self.scene.edges {
            let a = self.camera.world_to_screen(self.scene.nodes[edge.from].pos, viewport);
            let b = self.camera.world_to_screen(self.scene.nodes[edge.to].pos, viewport);
            painter.line_segment([a, b], Stroke::new(1.0, EDGE_COLOR));
            if !edge.label.is_empty() && self.camera.zoom >= LABEL_ZOOM_CUTOFF {
                painter.text(
                    a + (b - a) / 2.0,
                    egui::Align2::CENTER_CENTER,
                    &edge.label,
                    FontId::proportional(10.0),
                    EDGE_COLOR,
                );
            }
        }
    }

    fn draw_nodes(&self, ui: &egui::Ui, painter: &egui::Painter, viewport: Rect) {
        for (i, node) in self.scene.nodes.iter().enumerate() {
            let center = self.camera.world_to_screen(node.pos, viewport);
            let radius = node.radius * self.camera.zoom;
            let selected = self.selected.as_deref() == Some(node.id.as_str());
            let hovered = self.hovered == Some(i);

            painter.circle_filled(center, radius, node.color);
            if selected {
                painter.circle_stroke(center, radius + 3.0, Stroke::new(2.0, Color32::WHITE));
            } else if hovered {
                painter.circle_stroke(
                    center,
                    radius + 2.0,
                    Stroke::new(1.5, ui.visuals().strong_text_color()),
                );
            }

            if self.camera.zoom >= LABEL_ZOOM_CUTOFF || selected || hovered {
                painter.text(
                    center + Vec2::new(0.0, radius + 4.0),
                    egui::Align2::CENTER_TOP,
                    &node.label,
                    FontId::proportional(12.0),
                    ui.visuals().text_color(),
                );
            }
        }
    }
}
