//! Wire graph to render scene mapping
//!
//! Nodes are placed on concentric rings in layout order; there is no force
//! simulation, so the layout is deterministic for a given node order.
//! Node color precedence: explicit node color, then the matching CI type's
//! color, then a per-type palette keyed by common infrastructure type names.

use std::collections::HashMap;
use std::f32::consts::TAU;

use egui::{Color32, Pos2, Rect};
use tracing::debug;

use cmdb_types::{CiType, GraphData};

const BASE_RADIUS: f32 = 14.0;
const RING_SPACING: f32 = 110.0;
const FIRST_RING_CAPACITY: usize = 8;

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub id: String,
    pub label: String,
    pub type_name: String,
    pub color: Color32,
    pub radius: f32,
    pub pos: Pos2,
}

/// Edge endpoints are indices into `GraphScene::nodes`.
#[derive(Debug, Clone)]
pub struct SceneEdge {
    pub from: usize,
    pub to: usize,
    pub label: String,
}

#[derive(Debug, Clone, Default)]
pub struct GraphScene {
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<SceneEdge>,
}

impl GraphScene {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn bounds(&self) -> Rect {
        let mut rect = Rect::NOTHING;
        for node in &self.nodes {
            rect = rect.union(Rect::from_center_size(
                node.pos,
                egui::Vec2::splat(node.radius * 2.0),
            ));
        }
        if rect.is_negative() {
            Rect::from_center_size(Pos2::ZERO, egui::Vec2::splat(1.0))
        } else {
            rect
        }
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }
}

pub fn build_scene(data: &GraphData, ci_types: &[CiType]) -> GraphScene {
    let type_colors: HashMap<&str, &str> = ci_types
        .iter()
        .filter_map(|t| t.color.as_deref().map(|c| (t.name.as_str(), c)))
        .collect();

    let mut nodes = Vec::with_capacity(data.nodes.len());
    let mut index_of: HashMap<&str, usize> = HashMap::with_capacity(data.nodes.len());

    for (i, node) in data.nodes.iter().enumerate() {
        let color = node
            .color
            .as_deref()
            .or_else(|| type_colors.get(node.node_type.as_str()).copied())
            .and_then(parse_hex_color)
            .unwrap_or_else(|| palette_color(&node.node_type));
        let radius = node.size.map_or(BASE_RADIUS, |s| (s / 2.0).max(6.0));

        index_of.insert(node.id.as_str(), i);
        nodes.push(SceneNode {
            id: node.id.clone(),
            label: node.label.clone(),
            type_name: node.node_type.clone(),
            color,
            radius,
            pos: ring_position(i, data.nodes.len()),
        });
    }

    let mut edges = Vec::with_capacity(data.edges.len());
    for edge in &data.edges {
        match (
            index_of.get(edge.source.as_str()),
            index_of.get(edge.target.as_str()),
        ) {
            (Some(&from), Some(&to)) => edges.push(SceneEdge {
                from,
                to,
                label: edge.label.clone(),
            }),
            _ => debug!(edge = %edge.id, "dropping edge with unknown endpoint"),
        }
    }

    GraphScene { nodes, edges }
}

/// Concentric ring layout: one node at the center, then rings whose
/// capacity grows with their circumference.
fn ring_position(index: usize, total: usize) -> Pos2 {
    if index == 0 {
        return Pos2::ZERO;
    }
    let mut remaining = index - 1;
    let mut ring = 1usize;
    let mut capacity = FIRST_RING_CAPACITY;
    while remaining >= capacity {
        remaining -= capacity;
        ring += 1;
        capacity = FIRST_RING_CAPACITY * ring;
    }
    // Last ring may be partial; spread what it holds evenly.
    let on_this_ring = capacity.min(total.saturating_sub(ring_start(ring)));
    let slots = on_this_ring.max(1);
    let angle = TAU * remaining as f32 / slots as f32;
    let r = ring as f32 * RING_SPACING;
    Pos2::new(r * angle.cos(), r * angle.sin())
}

/// Index of the first node on `ring`; ring 0 is the single center node.
fn ring_start(ring: usize) -> usize {
    1 + (1..ring).map(|r| FIRST_RING_CAPACITY * r).sum::<usize>()
}

/// `#rgb` or `#rrggbb`, case-insensitive. Anything else is rejected.
/// Colors come from user input and the backend, so non-ASCII text must be
/// rejected, not sliced.
pub fn parse_hex_color(s: &str) -> Option<Color32> {
    let hex = s.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            Some(Color32::from_rgb(r * 17, g * 17, b * 17))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color32::from_rgb(r, g, b))
        }
        _ => None,
    }
}

/// Fallback colors for well-known infrastructure type names.
pub fn palette_color(type_name: &str) -> Color32 {
    match type_name {
        "Server" => Color32::from_rgb(59, 130, 246),
        "Database" => Color32::from_rgb(34, 197, 94),
        "Application" => Color32::from_rgb(168, 85, 247),
        "Network" => Color32::from_rgb(245, 158, 11),
        "Storage" => Color32::from_rgb(236, 72, 153),
        "Container" => Color32::from_rgb(6, 182, 212),
        "Service" => Color32::from_rgb(99, 102, 241),
        _ => Color32::from_rgb(107, 114, 128),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use cmdb_types::{GraphEdge, GraphNode};
    use serde_json::Value;

    fn node(id: &str, node_type: &str, color: Option<&str>) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            label: id.to_string(),
            node_type: node_type.to_string(),
            color: color.map(str::to_string),
            size: None,
            data: Value::Null,
        }
    }

    fn edge(id: &str, source: &str, target: &str) -> GraphEdge {
        GraphEdge {
            id: id.to_string(),
            source: source.to_string(),
            target: target.to_string(),
            label: String::new(),
            edge_type: String::new(),
            color: None,
            data: Value::Null,
        }
    }

    #[test]
    fn hex_colors_parse() {
        assert_eq!(
            parse_hex_color("#3b82f6"),
            Some(Color32::from_rgb(0x3b, 0x82, 0xf6))
        );
        assert_eq!(parse_hex_color("#fff"), Some(Color32::from_rgb(255, 255, 255)));
        assert_eq!(parse_hex_color("red"), None);
        assert_eq!(parse_hex_color("#12345"), None);
    }

    #[test]
    fn multibyte_color_strings_are_rejected_without_panicking() {
        // "€" is 3 bytes and "€€" is 6, so both hit a length branch; the
        // parse must reject them instead of slicing mid-character.
        assert_eq!(parse_hex_color("#€"), None);
        assert_eq!(parse_hex_color("#€€"), None);
        assert_eq!(parse_hex_color("#aé3"), None);
    }

    #[test]
    fn node_color_precedence() {
        let ci_type = CiType {
            id: "t1".to_string(),
            name: "Server".to_string(),
            description: None,
            icon: None,
            color: Some("#00ff00".to_string()),
            attributes: Value::Null,
            created_at: None,
            updated_at: None,
        };
        let data = GraphData {
            nodes: vec![
                node("a", "Server", Some("#ff0000")),
                node("b", "Server", None),
                node("c", "Mystery", None),
            ],
            edges: vec![],
        };
        let scene = build_scene(&data, &[ci_type]);
        assert_eq!(scene.nodes[0].color, Color32::from_rgb(255, 0, 0));
        assert_eq!(scene.nodes[1].color, Color32::from_rgb(0, 255, 0));
        assert_eq!(scene.nodes[2].color, palette_color("Mystery"));
    }

    #[test]
    fn edges_with_unknown_endpoints_are_dropped() {
        let data = GraphData {
            nodes: vec![node("a", "Server", None), node("b", "Server", None)],
            edges: vec![edge("e1", "a", "b"), edge("e2", "a", "ghost")],
        };
        let scene = build_scene(&data, &[]);
        assert_eq!(scene.edges.len(), 1);
        assert_eq!(scene.edges[0].from, 0);
        assert_eq!(scene.edges[0].to, 1);
    }

    #[test]
    fn layout_is_deterministic_and_non_overlapping_at_center() {
        let data = GraphData {
            nodes: (0..20).map(|i| node(&format!("n{i}"), "Server", None)).collect(),
            edges: vec![],
        };
        let a = build_scene(&data, &[]);
        let b = build_scene(&data, &[]);
        assert_eq!(a.nodes[0].pos, Pos2::ZERO);
        for (x, y) in a.nodes.iter().zip(b.nodes.iter()) {
            assert_eq!(x.pos, y.pos);
        }
        // Every non-center node sits on some ring away from the origin.
        for n in &a.nodes[1..] {
            assert!(n.pos.distance(Pos2::ZERO) > RING_SPACING * 0.9);
        }
    }

    #[test]
    fn bounds_cover_all_nodes() {
        let data = GraphData {
            nodes: (0..10).map(|i| node(&format!("n{i}"), "Server", None)).collect(),
            edges: vec![],
        };
        let scene = build_scene(&data, &[]);
        let bounds = scene.bounds();
        for n in &scene.nodes {
            assert!(bounds.contains(n.pos));
        }
    }
}
