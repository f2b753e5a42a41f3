//! CI types page: card list of type templates with the inferred-attribute
//! editor dialog.

use egui::RichText;

use cmdb_types::CiType;

use crate::modals::{CiTypeFormModal, CiTypeFormResult, ConfirmModal};
use crate::net::{Net, Slot};
use crate::pages::{report_error, PageEvent};
use crate::state::Toasts;

#[derive(Default)]
pub struct CiTypesPage {
    ci_types: Vec<CiType>,
    loading: bool,

    load_slot: Option<Slot<Vec<CiType>>>,
    save_slot: Option<Slot<CiType>>,
    delete_slot: Option<Slot<()>>,

    form: CiTypeFormModal,
    confirm: ConfirmModal,
    started: bool,
}

impl CiTypesPage {
    fn refresh(&mut self, net: &Net) {
        self.loading = true;
        let api = net.api.clone();
        self.load_slot = Some(net.spawn(async move { api.list_ci_types(Some(500)).await }));
    }

    fn poll(&mut self, net: &Net, toasts: &mut Toasts) -> Option<PageEvent> {
        let mut event = None;

        if let Some(result) = self.load_slot.as_ref().and_then(Slot::take) {
            self.loading = false;
            self.load_slot = None;
            match result {
                Ok(types) => self.ci_types = types,
                Err(err) => event = event.or(report_error(&err, toasts)),
            }
        }

        if let Some(result) = self.save_slot.as_ref().and_then(Slot::take) {
            self.save_slot = None;
            self.form.saving = false;
            match result {
                Ok(ci_type) => {
                    toasts.success(format!("Saved {}", ci_type.name));
                    self.form.close();
                    self.refresh(net);
                }
                Err(err) => event = event.or(report_error(&err, toasts)),
            }
        }

        if let Some(result) = self.delete_slot.as_ref().and_then(Slot::take) {
            self.delete_slot = None;
            match result {
                Ok(()) => {
                    toasts.success("CI type deleted");
                    self.refresh(net);
                }
                Err(err) => event = event.or(report_error(&err, toasts)),
            }
        }

        event
    }

    pub fn is_busy(&self) -> bool {
        self.load_slot.is_some() || self.save_slot.is_some() || self.delete_slot.is_some()
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, net: &Net, toasts: &mut Toasts) -> Option<PageEvent> {
        if !self.started {
            self.started = true;
            self.refresh(net);
        }
        let mut event = self.poll(net, toasts);

        ui.horizontal(|ui| {
            ui.heading("CI Types");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("+ New Type").clicked() {
                    self.form.open_create();
                }
            });
        });
        ui.add_space(6.0);

        if self.loading && self.ci_types.is_empty() {
            ui.spinner();
        } else if self.ci_types.is_empty() {
            ui.label(RichText::new("No CI types defined yet.").weak());
        } else {
            self.cards(ui);
        }

        event = event.or(self.dialogs(ui.ctx(), net));
        event
    }

    fn cards(&mut self, ui: &mut egui::Ui) {
        let mut edit = None;
        let mut delete: Option<(String, String)> = None;

        egui::ScrollArea::vertical().show(ui, |ui| {
            for (i, ci_type) in self.ci_types.iter().enumerate() {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        if let Some(color) = ci_type
                            .color
                            .as_deref()
                            .and_then(crate::graph::scene::parse_hex_color)
                        {
                            let (rect, _) =
                                ui.allocate_exact_size(egui::Vec2::splat(12.0), egui::Sense::hover());
                            ui.painter().circle_filled(rect.center(), 6.0, color);
                        }
                        ui.strong(&ci_type.name);
                        if let Some(icon) = &ci_type.icon {
                            ui.label(RichText::new(icon).weak().small());
                        }
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("Delete").clicked() {
                                delete = Some((ci_type.id.clone(), ci_type.name.clone()));
                            }
                            if ui.small_button("Edit").clicked() {
                                edit = Some(i);
                            }
                        });
                    });
                    if let Some(description) = &ci_type.description {
                        if !description.is_empty() {
                            ui.label(RichText::new(description).weak());
                        }
                    }
                    let field_count = ci_type
                        .schema()
                        .and_then(|s| s.get("properties"))
                        .and_then(|p| p.as_object())
                        .map_or(0, |p| p.len());
                    if field_count > 0 {
                        ui.label(
                            RichText::new(format!("{field_count} schema fields"))
                                .weak()
                                .small(),
                        );
                    }
                });
                ui.add_space(4.0);
            }
        });

        if let Some(i) = edit {
            let ci_type = self.ci_types[i].clone();
            self.form.open_edit(&ci_type);
        }
        if let Some((id, name)) = delete {
            self.confirm.open(
                "Delete CI type",
                format!("Delete \"{name}\"? Assets of this type keep their data but lose the schema."),
                id,
            );
        }
    }

    fn dialogs(&mut self, ctx: &egui::Context, net: &Net) -> Option<PageEvent> {
        match self.form.ui(ctx) {
            CiTypeFormResult::Create(req) => {
                self.form.saving = true;
                let api = net.api.clone();
                self.save_slot = Some(net.spawn(async move { api.create_ci_type(&req).await }));
            }
            CiTypeFormResult::Update { id, req } => {
                self.form.saving = true;
                let api = net.api.clone();
                self.save_slot =
                    Some(net.spawn(async move { api.update_ci_type(&id, &req).await }));
            }
            CiTypeFormResult::None => {}
        }

        if let Some(id) = self.confirm.ui(ctx) {
            let api = net.api.clone();
            self.delete_slot = Some(net.spawn(async move { api.delete_ci_type(&id).await }));
        }
        None
    }
}
