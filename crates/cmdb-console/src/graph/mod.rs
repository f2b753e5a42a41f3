//! Interactive topology view
//!
//! `scene` maps the wire graph into positioned render nodes, `camera` holds
//! the world-to-screen transform, and `widget` draws the scene and handles
//! pan, zoom, hover and selection.

pub mod camera;
pub mod scene;
pub mod widget;

pub use camera::Camera;
pub use scene::{build_scene, GraphScene, SceneEdge, SceneNode};
pub use widget::GraphWidget;
