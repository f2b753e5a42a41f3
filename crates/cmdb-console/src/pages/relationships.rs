//! Relationship types page: searchable table with an inline editor dialog.

use egui::{ComboBox, RichText, TextEdit};
use egui_extras::{Column, TableBuilder};

use cmdb_types::{
    CiType, CreateRelationshipTypeRequest, Paginated, RelationshipType, RelationshipTypeFilter,
    UpdateRelationshipTypeRequest,
};

use crate::modals::ConfirmModal;
use crate::net::{Net, Slot};
use crate::pages::{report_error, PageEvent, SEARCH_DEBOUNCE_SECS};
use crate::state::Toasts;

const PAGE_SIZE: u32 = 25;

#[derive(Default)]
struct RelationshipForm {
    open: bool,
    editing: Option<String>,
    name: String,
    description: String,
    from_ci_type_id: Option<String>,
    to_ci_type_id: Option<String>,
    is_bidirectional: bool,
    reverse_name: String,
    error: Option<String>,
    saving: bool,
}

enum FormResult {
    None,
    Create(CreateRelationshipTypeRequest),
    Update {
        id: String,
        req: UpdateRelationshipTypeRequest,
    },
}

impl RelationshipForm {
    fn open_create(&mut self) {
        *self = Self::default();
        self.open = true;
    }

    fn open_edit(&mut self, rt: &RelationshipType) {
        *self = Self::default();
        self.open = true;
        self.editing = Some(rt.id.clone());
        self.name = rt.name.clone();
        self.description = rt.description.clone().unwrap_or_default();
        self.from_ci_type_id = rt.from_ci_type_id.clone();
        self.to_ci_type_id = rt.to_ci_type_id.clone();
        self.is_bidirectional = rt.is_bidirectional;
        self.reverse_name = rt.reverse_name.clone().unwrap_or_default();
    }

    fn ui(&mut self, ctx: &egui::Context, ci_types: &[CiType]) -> FormResult {
        if !self.open {
            return FormResult::None;
        }
        let mut result = FormResult::None;
        let mut close = false;
        let title = if self.editing.is_some() {
            "Edit Relationship Type"
        } else {
            "New Relationship Type"
        };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .default_width(420.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                egui::Grid::new("relationship_fields").num_columns(2).show(ui, |ui| {
                    ui.label("Name");
                    ui.add(TextEdit::singleline(&mut self.name).hint_text("depends_on"));
                    ui.end_row();
                    ui.label("Description");
                    ui.add(TextEdit::singleline(&mut self.description));
                    ui.end_row();
                    ui.label("From type");
                    type_picker(ui, "rel_from_type", &mut self.from_ci_type_id, ci_types);
                    ui.end_row();
                    ui.label("To type");
                    type_picker(ui, "rel_to_type", &mut self.to_ci_type_id, ci_types);
                    ui.end_row();
                });

                ui.checkbox(&mut self.is_bidirectional, "Bidirectional");
                if self.is_bidirectional {
                    ui.horizontal(|ui| {
                        ui.label("Reverse name");
                        ui.add(TextEdit::singleline(&mut self.reverse_name).hint_text("depended_on_by"));
                    });
                }

                if let Some(error) = &self.error {
                    ui.colored_label(egui::Color32::from_rgb(200, 60, 60), error);
                }

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        close = true;
                    }
                    let label = if self.saving { "Saving..." } else { "Save" };
                    if ui.add_enabled(!self.saving, egui::Button::new(label)).clicked() {
                        match self.submit() {
                            Ok(r) => {
                                self.error = None;
                                result = r;
                            }
                            Err(msg) => self.error = Some(msg),
                        }
                    }
                });
            });

        if close {
            self.open = false;
        }
        result
    }

    fn submit(&self) -> Result<FormResult, String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        let description = {
            let t = self.description.trim();
            (!t.is_empty()).then(|| t.to_string())
        };
        let reverse_name = {
            let t = self.reverse_name.trim();
            (self.is_bidirectional && !t.is_empty()).then(|| t.to_string())
        };
        match &self.editing {
            Some(id) => Ok(FormResult::Update {
                id: id.clone(),
                req: UpdateRelationshipTypeRequest {
                    name: self.name.trim().to_string(),
                    description,
                    from_ci_type_id: self.from_ci_type_id.clone(),
                    to_ci_type_id: self.to_ci_type_id.clone(),
                    is_bidirectional: self.is_bidirectional,
                    reverse_name,
                },
            }),
            None => Ok(FormResult::Create(CreateRelationshipTypeRequest {
                name: self.name.trim().to_string(),
                description,
                from_ci_type_id: self.from_ci_type_id.clone(),
                to_ci_type_id: self.to_ci_type_id.clone(),
                is_bidirectional: self.is_bidirectional,
                reverse_name,
            })),
        }
    }
}

/// Optional CI type selector; `None` means any type.
fn type_picker(ui: &mut egui::Ui, id: &str, selected: &mut Option<String>, ci_types: &[CiType]) {
    let text = selected
        .as_deref()
        .and_then(|sel| ci_types.iter().find(|t| t.id == sel))
        .map_or("Any", |t| t.name.as_str());
    ComboBox::from_id_salt(id).selected_text(text).show_ui(ui, |ui| {
        if ui.selectable_label(selected.is_none(), "Any").clicked() {
            *selected = None;
        }
        for ci_type in ci_types {
            let checked = selected.as_deref() == Some(ci_type.id.as_str());
            if ui.selectable_label(checked, &ci_type.name).clicked() {
                *selected = Some(ci_type.id.clone());
            }
        }
    });
}

#[derive(Default)]
pub struct RelationshipsPage {
    relationship_types: Vec<RelationshipType>,
    total: u64,
    total_pages: u32,
    page: u32,
    ci_types: Vec<CiType>,
    loading: bool,

    search: String,
    search_dirty_since: Option<f64>,
    bidirectional_filter: Option<bool>,

    load_slot: Option<Slot<Paginated<RelationshipType>>>,
    types_slot: Option<Slot<Vec<CiType>>>,
    save_slot: Option<Slot<RelationshipType>>,
    delete_slot: Option<Slot<()>>,

    form: RelationshipForm,
    confirm: ConfirmModal,
    started: bool,
}

impl RelationshipsPage {
    fn refresh(&mut self, net: &Net) {
        self.loading = true;
        let filter = RelationshipTypeFilter {
            search: {
                let t = self.search.trim();
                (!t.is_empty()).then(|| t.to_string())
            },
            is_bidirectional: self.bidirectional_filter,
            limit: Some(PAGE_SIZE),
            offset: Some(self.page * PAGE_SIZE),
        };
        let api = net.api.clone();
        self.load_slot = Some(net.spawn(async move { api.list_relationship_types(&filter).await }));
    }

    fn poll(&mut self, now: f64, net: &Net, toasts: &mut Toasts) -> Option<PageEvent> {
        let mut event = None;

        if let Some(t) = self.search_dirty_since {
            if now - t >= SEARCH_DEBOUNCE_SECS {
                self.search_dirty_since = None;
                self.page = 0;
                self.refresh(net);
            }
        }

        if let Some(result) = self.load_slot.as_ref().and_then(Slot::take) {
            self.loading = false;
            self.load_slot = None;
            match result {
                Ok(page) => {
                    self.relationship_types = page.data;
                    self.total = page.total;
                    self.total_pages = page.total_pages;
                }
                Err(err) => event = event.or(report_error(&err, toasts)),
            }
        }

        if let Some(result) = self.types_slot.as_ref().and_then(Slot::take) {
            self.types_slot = None;
            match result {
                Ok(types) => self.ci_types = types,
                Err(err) => event = event.or(report_error(&err, toasts)),
            }
        }

        if let Some(result) = self.save_slot.as_ref().and_then(Slot::take) {
            self.save_slot = None;
            self.form.saving = false;
            match result {
                Ok(rt) => {
                    toasts.success(format!("Saved {}", rt.name));
                    self.form.open = false;
                    self.refresh(net);
                }
                Err(err) => event = event.or(report_error(&err, toasts)),
            }
        }

        if let Some(result) = self.delete_slot.as_ref().and_then(Slot::take) {
            self.delete_slot = None;
            match result {
                Ok(()) => {
                    toasts.success("Relationship type deleted");
                    self.refresh(net);
                }
                Err(err) => event = event.or(report_error(&err, toasts)),
            }
        }

        event
    }

    pub fn is_busy(&self) -> bool {
        self.load_slot.is_some()
            || self.save_slot.is_some()
            || self.delete_slot.is_some()
            || self.search_dirty_since.is_some()
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, net: &Net, toasts: &mut Toasts) -> Option<PageEvent> {
        if !self.started {
            self.started = true;
            self.refresh(net);
            let api = net.api.clone();
            self.types_slot = Some(net.spawn(async move { api.list_ci_types(Some(500)).await }));
        }
        let now = ui.input(|i| i.time);
        let mut event = self.poll(now, net, toasts);

        ui.horizontal(|ui| {
            ui.heading("Relationship Types");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("+ New Relationship Type").clicked() {
                    self.form.open_create();
                }
            });
        });
        ui.add_space(4.0);

        let mut refresh = false;
        ui.horizontal(|ui| {
            if ui
                .add(TextEdit::singleline(&mut self.search).hint_text("Search...").desired_width(220.0))
                .changed()
            {
                self.search_dirty_since = Some(now);
            }
            let text = match self.bidirectional_filter {
                None => "All",
                Some(true) => "Bidirectional",
                Some(false) => "One-way",
            };
            ComboBox::from_id_salt("bidi_filter").selected_text(text).show_ui(ui, |ui| {
                for (value, label) in [
                    (None, "All"),
                    (Some(true), "Bidirectional"),
                    (Some(false), "One-way"),
                ] {
                    if ui.selectable_label(self.bidirectional_filter == value, label).clicked() {
                        self.bidirectional_filter = value;
                        refresh = true;
                    }
                }
            });
        });
        if refresh {
            self.page = 0;
            self.refresh(net);
        }

        ui.add_space(6.0);
        self.table(ui);
        self.pagination(ui, net);

        event = event.or(self.dialogs(ui.ctx(), net));
        event
    }

    fn type_name(&self, id: Option<&str>) -> String {
        id.and_then(|id| self.ci_types.iter().find(|t| t.id == id))
            .map_or_else(|| "Any".to_string(), |t| t.name.clone())
    }

    fn table(&mut self, ui: &mut egui::Ui) {
        if self.loading && self.relationship_types.is_empty() {
            ui.spinner();
            return;
        }
        if self.relationship_types.is_empty() {
            ui.label(RichText::new("No relationship types found.").weak());
            return;
        }

        let mut edit = None;
        let mut delete: Option<(String, String)> = None;

        TableBuilder::new(ui)
            .striped(true)
            .column(Column::remainder().at_least(120.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(70.0))
            .column(Column::auto().at_least(60.0))
            .column(Column::auto().at_least(110.0))
            .header(22.0, |mut header| {
                for title in ["Name", "From", "To", "Direction", "Uses", "Actions"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for (i, rt) in self.relationship_types.iter().enumerate() {
                    body.row(24.0, |mut row| {
                        row.col(|ui| {
                            ui.label(&rt.name);
                        });
                        row.col(|ui| {
                            ui.label(self.type_name(rt.from_ci_type_id.as_deref()));
                        });
                        row.col(|ui| {
                            ui.label(self.type_name(rt.to_ci_type_id.as_deref()));
                        });
                        row.col(|ui| {
                            ui.label(if rt.is_bidirectional { "↔" } else { "→" });
                        });
                        row.col(|ui| {
                            ui.label(rt.relationship_count.to_string());
                        });
                        row.col(|ui| {
                            ui.horizontal(|ui| {
                                if ui.small_button("Edit").clicked() {
                                    edit = Some(i);
                                }
                                if ui.small_button("Delete").clicked() {
                                    delete = Some((rt.id.clone(), rt.name.clone()));
                                }
                            });
                        });
                    });
                }
            });

        if let Some(i) = edit {
            let rt = self.relationship_types[i].clone();
            self.form.open_edit(&rt);
        }
        if let Some((id, name)) = delete {
            self.confirm.open(
                "Delete relationship type",
                format!("Delete \"{name}\"? Existing relationships of this type are removed."),
                id,
            );
        }
    }

    fn pagination(&mut self, ui: &mut egui::Ui, net: &Net) {
        if self.total_pages <= 1 {
            return;
        }
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui.add_enabled(self.page > 0, egui::Button::new("Prev")).clicked() {
                self.page -= 1;
                self.refresh(net);
            }
            ui.label(format!(
                "Page {} of {} ({} total)",
                self.page + 1,
                self.total_pages,
                self.total
            ));
            let last = self.page + 1 >= self.total_pages;
            if ui.add_enabled(!last, egui::Button::new("Next")).clicked() {
                self.page += 1;
                self.refresh(net);
            }
        });
    }

    fn dialogs(&mut self, ctx: &egui::Context, net: &Net) -> Option<PageEvent> {
        match self.form.ui(ctx, &self.ci_types) {
            FormResult::Create(req) => {
                self.form.saving = true;
                let api = net.api.clone();
                self.save_slot =
                    Some(net.spawn(async move { api.create_relationship_type(&req).await }));
            }
            FormResult::Update { id, req } => {
                self.form.saving = true;
                let api = net.api.clone();
                self.save_slot =
                    Some(net.spawn(async move { api.update_relationship_type(&id, &req).await }));
            }
            FormResult::None => {}
        }

        if let Some(id) = self.confirm.ui(ctx) {
            let api = net.api.clone();
            self.delete_slot =
                Some(net.spawn(async move { api.delete_relationship_type(&id).await }));
        }
        None
    }
}
