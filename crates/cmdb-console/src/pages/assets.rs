//! CI assets page: searchable, filterable, paginated list with the
//! schema-driven create/edit dialog.

use egui::{RichText, TextEdit};
use egui_extras::{Column, TableBuilder};

use cmdb_types::{CiAssetFilter, CiAssetResponse, CiType, Paginated};

use crate::modals::{AssetFormModal, AssetFormResult, ConfirmModal};
use crate::net::{Net, Slot};
use crate::pages::{report_error, PageEvent, SEARCH_DEBOUNCE_SECS};
use crate::state::Toasts;

const PAGE_SIZE: u32 = 25;

#[derive(Default)]
pub struct AssetsPage {
    assets: Vec<CiAssetResponse>,
    total: u64,
    total_pages: u32,
    page: u32,
    ci_types: Vec<CiType>,
    loading: bool,

    search: String,
    search_dirty_since: Option<f64>,
    type_filter: Option<String>,
    show_advanced: bool,
    name_filter: String,
    created_after: String,
    created_before: String,

    load_slot: Option<Slot<Paginated<CiAssetResponse>>>,
    types_slot: Option<Slot<Vec<CiType>>>,
    save_slot: Option<Slot<CiAssetResponse>>,
    delete_slot: Option<Slot<()>>,

    form: AssetFormModal,
    confirm: ConfirmModal,
    started: bool,
}

impl AssetsPage {
    fn filter(&self) -> CiAssetFilter {
        let opt = |s: &str| {
            let t = s.trim();
            (!t.is_empty()).then(|| t.to_string())
        };
        CiAssetFilter {
            search: opt(&self.search),
            ci_type_id: self.type_filter.clone(),
            name: opt(&self.name_filter),
            created_after: opt(&self.created_after),
            created_before: opt(&self.created_before),
            limit: Some(PAGE_SIZE),
            offset: Some(self.page * PAGE_SIZE),
        }
    }

    fn refresh(&mut self, net: &Net) {
        self.loading = true;
        let api = net.api.clone();
        let filter = self.filter();
        self.load_slot = Some(net.spawn(async move { api.list_ci_assets(&filter).await }));
    }

    fn load_types(&mut self, net: &Net) {
        let api = net.api.clone();
        self.types_slot = Some(net.spawn(async move { api.list_ci_types(Some(500)).await }));
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
                    self.assets = page.data;
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
                Ok(asset) => {
                    toasts.success(format!("Saved {}", asset.name));
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
                    toasts.success("Asset deleted");
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
            self.load_types(net);
        }
        let now = ui.input(|i| i.time);
        let mut event = self.poll(now, net, toasts);

        ui.horizontal(|ui| {
            ui.heading("CI Assets");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("+ New Asset").clicked() {
                    self.form.open_create();
                }
            });
        });
        ui.add_space(4.0);

        self.toolbar(ui, net);
        ui.add_space(6.0);
        self.table(ui);
        self.pagination(ui, net);

        event = event.or(self.dialogs(ui.ctx(), net));
        event
    }

    fn toolbar(&mut self, ui: &mut egui::Ui, net: &Net) {
        let mut refresh = false;
        ui.horizontal(|ui| {
            let response = ui.add(
                TextEdit::singleline(&mut self.search)
                    .hint_text("Search assets...")
                    .desired_width(220.0),
            );
            if response.changed() {
                self.search_dirty_since = Some(ui.input(|i| i.time));
            }

            let selected = self
                .type_filter
                .as_deref()
                .and_then(|id| self.ci_types.iter().find(|t| t.id == id))
                .map_or("All types", |t| t.name.as_str());
            egui::ComboBox::from_id_salt("asset_type_filter")
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    if ui.selectable_label(self.type_filter.is_none(), "All types").clicked() {
                        self.type_filter = None;
                        refresh = true;
                    }
                    for ci_type in &self.ci_types {
                        let checked = self.type_filter.as_deref() == Some(ci_type.id.as_str());
                        if ui.selectable_label(checked, &ci_type.name).clicked() {
                            self.type_filter = Some(ci_type.id.clone());
                            refresh = true;
                        }
                    }
                });

            ui.toggle_value(&mut self.show_advanced, "Filters");
        });

        if self.show_advanced {
            ui.horizontal(|ui| {
                ui.label("Name");
                if ui.add(TextEdit::singleline(&mut self.name_filter).desired_width(120.0)).changed() {
                    self.search_dirty_since = Some(ui.input(|i| i.time));
                }
                ui.label("Created after");
                if ui
                    .add(TextEdit::singleline(&mut self.created_after).hint_text("YYYY-MM-DD").desired_width(100.0))
                    .changed()
                {
                    self.search_dirty_since = Some(ui.input(|i| i.time));
                }
                ui.label("before");
                if ui
                    .add(TextEdit::singleline(&mut self.created_before).hint_text("YYYY-MM-DD").desired_width(100.0))
                    .changed()
                {
                    self.search_dirty_since = Some(ui.input(|i| i.time));
                }
                if ui.button("Clear").clicked() {
                    self.name_filter.clear();
                    self.created_after.clear();
                    self.created_before.clear();
                    refresh = true;
                }
            });
        }

        if refresh {
            self.page = 0;
            self.refresh(net);
        }
    }

    fn table(&mut self, ui: &mut egui::Ui) {
        if self.loading && self.assets.is_empty() {
            ui.spinner();
            return;
        }
        if self.assets.is_empty() {
            ui.label(RichText::new("No assets match the current filters.").weak());
            return;
        }

        let mut edit = None;
        let mut delete: Option<(String, String)> = None;

        TableBuilder::new(ui)
            .striped(true)
            .column(Column::remainder().at_least(140.0))
            .column(Column::auto().at_least(100.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(110.0))
            .header(22.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Name");
                });
                header.col(|ui| {
                    ui.strong("Type");
                });
                header.col(|ui| {
                    ui.strong("Created");
                });
                header.col(|ui| {
                    ui.strong("Actions");
                });
            })
            .body(|mut body| {
                for (i, asset) in self.assets.iter().enumerate() {
                    body.row(24.0, |mut row| {
                        row.col(|ui| {
                            ui.label(&asset.name);
                        });
                        row.col(|ui| {
                            ui.label(&asset.ci_type_name);
                        });
                        row.col(|ui| {
                            ui.label(asset.created_at.format("%Y-%m-%d").to_string());
                        });
                        row.col(|ui| {
                            ui.horizontal(|ui| {
                                if ui.small_button("Edit").clicked() {
                                    edit = Some(i);
                                }
                                if ui.small_button("Delete").clicked() {
                                    delete = Some((asset.id.clone(), asset.name.clone()));
                                }
                            });
                        });
                    });
                }
            });

        if let Some(i) = edit {
            let asset = self.assets[i].clone();
            self.form.open_edit(&asset, &self.ci_types);
        }
        if let Some((id, name)) = delete {
            self.confirm.open(
                "Delete asset",
                format!("Delete \"{name}\"? This cannot be undone."),
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
            AssetFormResult::Create(req) => {
                self.form.saving = true;
                let api = net.api.clone();
                self.save_slot = Some(net.spawn(async move { api.create_ci_asset(&req).await }));
            }
            AssetFormResult::Update { id, req } => {
                self.form.saving = true;
                let api = net.api.clone();
                self.save_slot =
                    Some(net.spawn(async move { api.update_ci_asset(&id, &req).await }));
            }
            AssetFormResult::None => {}
        }

        if let Some(id) = self.confirm.ui(ctx) {
            let api = net.api.clone();
            self.delete_slot = Some(net.spawn(async move { api.delete_ci_asset(&id).await }));
        }
        None
    }
}
