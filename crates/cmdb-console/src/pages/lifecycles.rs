//! Lifecycles page: lifecycle types with their ordered state chains.

use egui::{RichText, TextEdit};

use cmdb_types::{
    CreateLifecycleStateRequest, CreateLifecycleTypeRequest, LifecycleState,
    LifecycleTypeResponse, UpdateLifecycleTypeRequest,
};

use crate::modals::ConfirmModal;
use crate::net::{Net, Slot};
use crate::pages::{report_error, PageEvent};
use crate::state::Toasts;

#[derive(Default)]
struct LifecycleForm {
    open: bool,
    editing: Option<String>,
    name: String,
    description: String,
    default_color: String,
    is_active: bool,
    error: Option<String>,
    saving: bool,
}

enum FormResult {
    None,
    Create(CreateLifecycleTypeRequest),
    Update {
        id: String,
        req: UpdateLifecycleTypeRequest,
    },
}

impl LifecycleForm {
    fn open_create(&mut self) {
        *self = Self::default();
        self.open = true;
        self.is_active = true;
    }

    fn open_edit(&mut self, lt: &LifecycleTypeResponse) {
        *self = Self::default();
        self.open = true;
        self.editing = Some(lt.lifecycle_type.id.clone());
        self.name = lt.lifecycle_type.name.clone();
        self.description = lt.lifecycle_type.description.clone().unwrap_or_default();
        self.default_color = lt.lifecycle_type.default_color.clone();
        self.is_active = lt.lifecycle_type.is_active;
    }

    fn ui(&mut self, ctx: &egui::Context) -> FormResult {
        if !self.open {
            return FormResult::None;
        }
        let mut result = FormResult::None;
        let mut close = false;
        let title = if self.editing.is_some() { "Edit Lifecycle" } else { "New Lifecycle" };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .default_width(380.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                egui::Grid::new("lifecycle_fields").num_columns(2).show(ui, |ui| {
                    ui.label("Name");
                    ui.add(TextEdit::singleline(&mut self.name));
                    ui.end_row();
                    ui.label("Description");
                    ui.add(TextEdit::singleline(&mut self.description));
                    ui.end_row();
                    ui.label("Default color");
                    ui.add(TextEdit::singleline(&mut self.default_color).hint_text("#6b7280"));
                    ui.end_row();
                });
                if self.editing.is_some() {
                    ui.checkbox(&mut self.is_active, "Active");
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
        let opt = |s: &str| {
            let t = s.trim();
            (!t.is_empty()).then(|| t.to_string())
        };
        match &self.editing {
            Some(id) => Ok(FormResult::Update {
                id: id.clone(),
                req: UpdateLifecycleTypeRequest {
                    name: self.name.trim().to_string(),
                    description: opt(&self.description),
                    default_color: opt(&self.default_color),
                    is_active: self.is_active,
                },
            }),
            None => Ok(FormResult::Create(CreateLifecycleTypeRequest {
                name: self.name.trim().to_string(),
                description: opt(&self.description),
                default_color: opt(&self.default_color),
            })),
        }
    }
}

/// Inline editor for appending a state to one lifecycle type.
#[derive(Default)]
struct NewStateRow {
    lifecycle_type_id: String,
    name: String,
    color: String,
    is_initial: bool,
    is_terminal: bool,
}

#[derive(Default)]
pub struct LifecyclesPage {
    lifecycles: Vec<LifecycleTypeResponse>,
    loading: bool,

    load_slot: Option<Slot<Vec<LifecycleTypeResponse>>>,
    save_slot: Option<Slot<LifecycleTypeResponse>>,
    state_slot: Option<Slot<LifecycleState>>,
    delete_slot: Option<Slot<()>>,
    delete_state_slot: Option<Slot<()>>,

    form: LifecycleForm,
    new_state: NewStateRow,
    confirm: ConfirmModal,
    started: bool,
}

impl LifecyclesPage {
    fn refresh(&mut self, net: &Net) {
        self.loading = true;
        let api = net.api.clone();
        self.load_slot = Some(net.spawn(async move { api.list_lifecycle_types().await }));
    }

    fn poll(&mut self, net: &Net, toasts: &mut Toasts) -> Option<PageEvent> {
        let mut event = None;

        if let Some(result) = self.load_slot.as_ref().and_then(Slot::take) {
            self.loading = false;
            self.load_slot = None;
            match result {
                Ok(lifecycles) => self.lifecycles = lifecycles,
                Err(err) => event = event.or(report_error(&err, toasts)),
            }
        }

        if let Some(result) = self.save_slot.as_ref().and_then(Slot::take) {
            self.save_slot = None;
            self.form.saving = false;
            match result {
                Ok(lt) => {
                    toasts.success(format!("Saved {}", lt.lifecycle_type.name));
                    self.form.open = false;
                    self.refresh(net);
                }
                Err(err) => event = event.or(report_error(&err, toasts)),
            }
        }

        if let Some(result) = self.state_slot.as_ref().and_then(Slot::take) {
            self.state_slot = None;
            match result {
                Ok(state) => {
                    toasts.success(format!("Added state {}", state.name));
                    self.new_state = NewStateRow::default();
                    self.refresh(net);
                }
                Err(err) => event = event.or(report_error(&err, toasts)),
            }
        }

        if let Some(result) = self.delete_slot.as_ref().and_then(Slot::take) {
            self.delete_slot = None;
            match result {
                Ok(()) => {
                    toasts.success("Lifecycle deleted");
                    self.refresh(net);
                }
                Err(err) => event = event.or(report_error(&err, toasts)),
            }
        }

        if let Some(result) = self.delete_state_slot.as_ref().and_then(Slot::take) {
            self.delete_state_slot = None;
            match result {
                Ok(()) => {
                    toasts.success("State removed");
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
            || self.state_slot.is_some()
            || self.delete_slot.is_some()
            || self.delete_state_slot.is_some()
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, net: &Net, toasts: &mut Toasts) -> Option<PageEvent> {
        if !self.started {
            self.started = true;
            self.refresh(net);
        }
        let mut event = self.poll(net, toasts);

        ui.horizontal(|ui| {
            ui.heading("Lifecycles");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("+ New Lifecycle").clicked() {
                    self.form.open_create();
                }
            });
        });
        ui.add_space(6.0);

        if self.loading && self.lifecycles.is_empty() {
            ui.spinner();
        } else if self.lifecycles.is_empty() {
            ui.label(RichText::new("No lifecycles defined yet.").weak());
        } else {
            self.cards(ui, net);
        }

        event = event.or(self.dialogs(ui.ctx(), net));
        event
    }

    fn cards(&mut self, ui: &mut egui::Ui, net: &Net) {
        let mut edit = None;
        let mut delete: Option<(String, String)> = None;
        let mut delete_state: Option<String> = None;
        let mut add_state: Option<CreateLifecycleStateRequest> = None;

        let Self {
            lifecycles,
            new_state,
            ..
        } = self;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for (i, lt) in lifecycles.iter().enumerate() {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.strong(&lt.lifecycle_type.name);
                        if !lt.lifecycle_type.is_active {
                            ui.label(RichText::new("inactive").weak().small());
                        }
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("Delete").clicked() {
                                delete = Some((
                                    lt.lifecycle_type.id.clone(),
                                    lt.lifecycle_type.name.clone(),
                                ));
                            }
                            if ui.small_button("Edit").clicked() {
                                edit = Some(i);
                            }
                        });
                    });
                    if let Some(description) = &lt.lifecycle_type.description {
                        if !description.is_empty() {
                            ui.label(RichText::new(description).weak());
                        }
                    }

                    // States render as an ordered chain.
                    let mut states: Vec<&LifecycleState> = lt.states.iter().collect();
                    states.sort_by_key(|s| s.order_index);
                    ui.horizontal_wrapped(|ui| {
                        for (j, state) in states.iter().enumerate() {
                            if j > 0 {
                                ui.label("→");
                            }
                            let mut text = state.name.clone();
                            if state.is_initial_state {
                                text.push_str(" (start)");
                            }
                            if state.is_terminal_state {
                                text.push_str(" (end)");
                            }
                            let color = crate::graph::scene::parse_hex_color(&state.color)
                                .unwrap_or(egui::Color32::GRAY);
                            ui.colored_label(color, text);
                            if ui.small_button("✕").clicked() {
                                delete_state = Some(state.id.clone());
                            }
                        }
                    });

                    // Inline add-state editor, one lifecycle at a time.
                    let editing_this = new_state.lifecycle_type_id == lt.lifecycle_type.id;
                    if editing_this {
                        ui.horizontal(|ui| {
                            ui.add(
                                TextEdit::singleline(&mut new_state.name)
                                    .hint_text("State name")
                                    .desired_width(140.0),
                            );
                            ui.add(
                                TextEdit::singleline(&mut new_state.color)
                                    .hint_text("#22c55e")
                                    .desired_width(80.0),
                            );
                            ui.checkbox(&mut new_state.is_initial, "start");
                            ui.checkbox(&mut new_state.is_terminal, "end");
                            if ui.small_button("Add").clicked()
                                && !new_state.name.trim().is_empty()
                            {
                                let next_index =
                                    states.iter().map(|s| s.order_index).max().unwrap_or(-1) + 1;
                                add_state = Some(CreateLifecycleStateRequest {
                                    lifecycle_type_id: lt.lifecycle_type.id.clone(),
                                    name: new_state.name.trim().to_string(),
                                    description: None,
                                    color: {
                                        let t = new_state.color.trim();
                                        (!t.is_empty()).then(|| t.to_string())
                                    },
                                    order_index: next_index,
                                    is_initial_state: new_state.is_initial,
                                    is_terminal_state: new_state.is_terminal,
                                });
                            }
                        });
                    } else if ui.small_button("+ Add state").clicked() {
                        *new_state = NewStateRow {
                            lifecycle_type_id: lt.lifecycle_type.id.clone(),
                            ..NewStateRow::default()
                        };
                    }
                });
                ui.add_space(4.0);
            }
        });

        if let Some(i) = edit {
            let lt = self.lifecycles[i].clone();
            self.form.open_edit(&lt);
        }
        if let Some((id, name)) = delete {
            self.confirm.open(
                "Delete lifecycle",
                format!("Delete \"{name}\" and all of its states?"),
                id,
            );
        }
        if let Some(id) = delete_state {
            let api = net.api.clone();
            self.delete_state_slot =
                Some(net.spawn(async move { api.delete_lifecycle_state(&id).await }));
        }
        if let Some(req) = add_state {
            let api = net.api.clone();
            self.state_slot = Some(net.spawn(async move { api.create_lifecycle_state(&req).await }));
        }
    }

    fn dialogs(&mut self, ctx: &egui::Context, net: &Net) -> Option<PageEvent> {
        match self.form.ui(ctx) {
            FormResult::Create(req) => {
                self.form.saving = true;
                let api = net.api.clone();
                self.save_slot =
                    Some(net.spawn(async move { api.create_lifecycle_type(&req).await }));
            }
            FormResult::Update { id, req } => {
                self.form.saving = true;
                let api = net.api.clone();
                self.save_slot =
                    Some(net.spawn(async move { api.update_lifecycle_type(&id, &req).await }));
            }
            FormResult::None => {}
        }

        if let Some(id) = self.confirm.ui(ctx) {
            let api = net.api.clone();
            self.delete_slot = Some(net.spawn(async move { api.delete_lifecycle_type(&id).await }));
        }
        None
    }
}
