//! Create/edit dialog for CI types
//!
//! Attributes are edited as free-form key/value rows; each value's stored
//! type is inferred from its shape and shown as a badge next to the input.

use egui::{RichText, TextEdit};
use serde_json::Value;

use cmdb_forms::{build_attribute_bag, classify, rows_from_bag, AttributeRow};
use cmdb_types::{CiType, CreateCiTypeRequest, UpdateCiTypeRequest};

pub enum CiTypeFormResult {
    None,
    Create(CreateCiTypeRequest),
    Update { id: String, req: UpdateCiTypeRequest },
}

#[derive(Default)]
pub struct CiTypeFormModal {
    open: bool,
    editing: Option<String>,
    name: String,
    description: String,
    icon: String,
    color: String,
    rows: Vec<AttributeRow>,
    error: Option<String>,
    pub saving: bool,
}

impl CiTypeFormModal {
    pub fn open_create(&mut self) {
        *self = Self::default();
        self.open = true;
        self.rows.push(AttributeRow::default());
    }

    pub fn open_edit(&mut self, ci_type: &CiType) {
        *self = Self::default();
        self.open = true;
        self.editing = Some(ci_type.id.clone());
        self.name = ci_type.name.clone();
        self.description = ci_type.description.clone().unwrap_or_default();
        self.icon = ci_type.icon.clone().unwrap_or_default();
        self.color = ci_type.color.clone().unwrap_or_default();
        if let Value::Object(bag) = &ci_type.attributes {
            self.rows = rows_from_bag(bag);
        }
        if self.rows.is_empty() {
            self.rows.push(AttributeRow::default());
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn ui(&mut self, ctx: &egui::Context) -> CiTypeFormResult {
        if !self.open {
            return CiTypeFormResult::None;
        }
        let mut result = CiTypeFormResult::None;
        let mut close = false;
        let title = if self.editing.is_some() { "Edit CI Type" } else { "New CI Type" };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(true)
            .default_width(460.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                egui::Grid::new("ci_type_fields").num_columns(2).show(ui, |ui| {
                    ui.label("Name");
                    ui.add(TextEdit::singleline(&mut self.name).desired_width(f32::INFINITY));
                    ui.end_row();
                    ui.label("Description");
                    ui.add(TextEdit::singleline(&mut self.description).desired_width(f32::INFINITY));
                    ui.end_row();
                    ui.label("Icon");
                    ui.add(TextEdit::singleline(&mut self.icon).hint_text("server"));
                    ui.end_row();
                    ui.label("Color");
                    ui.add(TextEdit::singleline(&mut self.color).hint_text("#3b82f6"));
                    ui.end_row();
                });

                ui.separator();
                ui.label(RichText::new("Attributes").strong());
                self.attribute_rows(ui);

                if let Some(error) = &self.error {
                    ui.add_space(4.0);
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

    fn attribute_rows(&mut self, ui: &mut egui::Ui) {
        let mut remove = None;
        for (i, row) in self.rows.iter_mut().enumerate() {
            ui.horizontal(|ui| {
                ui.add(TextEdit::singleline(&mut row.key).hint_text("key").desired_width(120.0));
                ui.add(TextEdit::singleline(&mut row.value).hint_text("value").desired_width(160.0));
                let badge = classify(&row.value).label();
                ui.label(RichText::new(badge).weak().small());
                if ui.small_button("✕").clicked() {
                    remove = Some(i);
                }
            });
        }
        if let Some(i) = remove {
            self.rows.remove(i);
        }
        if ui.small_button("+ Add attribute").clicked() {
            self.rows.push(AttributeRow::default());
        }
    }

    fn submit(&mut self) -> Result<CiTypeFormResult, String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        let attributes = Value::Object(build_attribute_bag(&self.rows));
        let none_if_empty = |s: &str| {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        match &self.editing {
            Some(id) => Ok(CiTypeFormResult::Update {
                id: id.clone(),
                req: UpdateCiTypeRequest {
                    name: self.name.trim().to_string(),
                    description: none_if_empty(&self.description),
                    icon: none_if_empty(&self.icon),
                    color: none_if_empty(&self.color),
                    attributes,
                },
            }),
            None => Ok(CiTypeFormResult::Create(CreateCiTypeRequest {
                name: self.name.trim().to_string(),
                description: none_if_empty(&self.description),
                icon: none_if_empty(&self.icon),
                color: none_if_empty(&self.color),
                attributes,
            })),
        }
    }
}
