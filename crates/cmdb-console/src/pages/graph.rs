//! Graph page: interactive topology canvas with type filter, debounced
//! search and a color legend.

use egui::{ComboBox, RichText, TextEdit};

use cmdb_types::{CiType, GraphData, GraphNode};

use crate::graph::{build_scene, GraphWidget};
use crate::net::{Net, Slot};
use crate::pages::{report_error, PageEvent, SEARCH_DEBOUNCE_SECS};
use crate::state::Toasts;

const NODE_LIMIT: u32 = 1000;
const SEARCH_LIMIT: u32 = 20;

#[derive(Default)]
pub struct GraphPage {
    data: GraphData,
    ci_types: Vec<CiType>,
    type_filter: Option<String>,
    loading: bool,

    search: String,
    search_dirty_since: Option<f64>,
    search_results: Vec<GraphNode>,

    widget: GraphWidget,
    selected_node: Option<GraphNode>,

    load_slot: Option<Slot<GraphData>>,
    types_slot: Option<Slot<Vec<CiType>>>,
    search_slot: Option<Slot<Vec<GraphNode>>>,
    started: bool,
}

impl GraphPage {
    fn refresh(&mut self, net: &Net) {
        self.loading = true;
        let api = net.api.clone();
        let ci_type = self.type_filter.clone();
        self.load_slot =
            Some(net.spawn(async move { api.graph_data(NODE_LIMIT, ci_type.as_deref()).await }));
    }

    fn poll(&mut self, now: f64, net: &Net, toasts: &mut Toasts) -> Option<PageEvent> {
        let mut event = None;

        if let Some(t) = self.search_dirty_since {
            if now - t >= SEARCH_DEBOUNCE_SECS {
                self.search_dirty_since = None;
                let term = self.search.trim().to_string();
                if term.is_empty() {
                    self.search_results.clear();
                    self.search_slot = None;
                } else {
                    let api = net.api.clone();
                    self.search_slot =
                        Some(net.spawn(async move { api.graph_search(&term, SEARCH_LIMIT).await }));
                }
            }
        }

        if let Some(result) = self.load_slot.as_ref().and_then(Slot::take) {
            self.loading = false;
            self.load_slot = None;
            match result {
                Ok(data) => {
                    self.widget.set_scene(build_scene(&data, &self.ci_types));
                    self.data = data;
                }
                Err(err) => event = event.or(report_error(&err, toasts)),
            }
        }

        if let Some(result) = self.types_slot.as_ref().and_then(Slot::take) {
            self.types_slot = None;
            match result {
                Ok(types) => {
                    self.ci_types = types;
                    // Colors may differ now that type colors are known.
                    self.widget.set_scene(build_scene(&self.data, &self.ci_types));
                }
                Err(err) => event = event.or(report_error(&err, toasts)),
            }
        }

        if let Some(result) = self.search_slot.as_ref().and_then(Slot::take) {
            self.search_slot = None;
            match result {
                Ok(nodes) => self.search_results = nodes,
                Err(err) => event = event.or(report_error(&err, toasts)),
            }
        }

        event
    }

    pub fn is_busy(&self) -> bool {
        self.load_slot.is_some() || self.search_slot.is_some() || self.search_dirty_since.is_some()
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, net: &Net, toasts: &mut Toasts) -> Option<PageEvent> {
        if !self.started {
            self.started = true;
            self.refresh(net);
            let api = net.api.clone();
            self.types_slot = Some(net.spawn(async move { api.list_ci_types(Some(500)).await }));
        }
        let now = ui.input(|i| i.time);
        let event = self.poll(now, net, toasts);

        self.toolbar(ui, net, now);
        ui.add_space(4.0);

        egui::SidePanel::right("graph_details")
            .resizable(true)
            .default_width(220.0)
            .show_inside(ui, |ui| {
                self.side_panel(ui);
            });

        let clicked = self.widget.ui(ui);
        if let Some(id) = clicked {
            self.selected_node = self.data.nodes.iter().find(|n| n.id == id).cloned();
        }

        event
    }

    fn toolbar(&mut self, ui: &mut egui::Ui, net: &Net, now: f64) {
        let mut refresh = false;
        ui.horizontal(|ui| {
            ui.heading("Graph");
            if self.loading {
                ui.spinner();
            }

            if ui
                .add(TextEdit::singleline(&mut self.search).hint_text("Find node...").desired_width(180.0))
                .changed()
            {
                self.search_dirty_since = Some(now);
            }

            let selected = self
                .type_filter
                .as_deref()
                .map_or("All types", |name| name);
            ComboBox::from_id_salt("graph_type_filter")
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    if ui.selectable_label(self.type_filter.is_none(), "All types").clicked() {
                        self.type_filter = None;
                        refresh = true;
                    }
                    for ci_type in &self.ci_types {
                        let checked = self.type_filter.as_deref() == Some(ci_type.name.as_str());
                        if ui.selectable_label(checked, &ci_type.name).clicked() {
                            self.type_filter = Some(ci_type.name.clone());
                            refresh = true;
                        }
                    }
                });

            if ui.button("+").clicked() {
                self.widget.zoom_in();
            }
            if ui.button("−").clicked() {
                self.widget.zoom_out();
            }
            if ui.button("Fit").clicked() {
                self.widget.fit();
            }
            if ui.button("Reload").clicked() {
                refresh = true;
            }
        });

        if !self.search_results.is_empty() {
            let mut focus = None;
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new("Results:").weak());
                for node in &self.search_results {
                    if ui.small_button(&node.label).clicked() {
                        focus = Some(node.id.clone());
                    }
                }
            });
            if let Some(id) = focus {
                self.widget.focus_node(&id);
                self.selected_node = self.data.nodes.iter().find(|n| n.id == id).cloned();
                self.search_results.clear();
                self.search.clear();
            }
        }

        if refresh {
            self.refresh(net);
        }
    }

    fn side_panel(&mut self, ui: &mut egui::Ui) {
        ui.strong("Legend");
        let mut seen: Vec<&str> = Vec::new();
        for node in self.widget.scene().nodes.iter() {
            if seen.contains(&node.type_name.as_str()) {
                continue;
            }
            seen.push(&node.type_name);
            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(egui::Vec2::splat(10.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 5.0, node.color);
                ui.label(&node.type_name);
            });
        }
        ui.separator();

        match &self.selected_node {
            None => {
                ui.label(RichText::new("Click a node to inspect it.").weak());
            }
            Some(node) => {
                ui.strong(&node.label);
                ui.label(RichText::new(&node.node_type).weak());
                if let Some(attrs) = node.data.as_object() {
                    for (key, value) in attrs {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(key).weak().small());
                            ui.label(cmdb_forms::value_to_input_string(value));
                        });
                    }
                }
            }
        }
    }
}
