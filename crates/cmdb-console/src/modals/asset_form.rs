//! Create/edit dialog for CI assets
//!
//! The form's shape comes from the selected CI type: its attribute schema is
//! derived into a field list and each input coerces straight into the typed
//! attribute bag on change. Types without a usable schema fall back to a
//! raw-JSON editor where the last valid parse wins.

use std::collections::HashMap;

use egui::{ComboBox, RichText, TextEdit};
use serde_json::{Map, Value};

use cmdb_forms::{
    apply_raw_json, build_create, build_update, coerce_text_input, derive_fields, display_value,
    normalize_date, seed_defaults, truthy, value_to_input_string, AttributeField, FieldType,
};
use cmdb_types::{CiAssetResponse, CiType, CreateCiAssetRequest, UpdateCiAssetRequest};

pub enum AssetFormResult {
    None,
    Create(CreateCiAssetRequest),
    Update {
        id: String,
        req: UpdateCiAssetRequest,
    },
}

/// Input control class for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Toggle,
    Select,
    Multiline,
    TextInput,
}

/// Options force a select no matter what type string the schema declared;
/// a string property with an `enum` must not render as free text.
fn control_for(field: &AttributeField) -> Control {
    match &field.field_type {
        FieldType::Boolean => Control::Toggle,
        _ if field.has_options() => Control::Select,
        FieldType::Textarea => Control::Multiline,
        _ => Control::TextInput,
    }
}

#[derive(Default)]
pub struct AssetFormModal {
    open: bool,
    editing: Option<String>,
    name: String,
    ci_type_id: String,
    fields: Vec<AttributeField>,
    bag: Map<String, Value>,
    buffers: HashMap<String, String>,
    raw_json: String,
    error: Option<String>,
    pub saving: bool,
}

impl AssetFormModal {
    pub fn open_create(&mut self) {
        *self = Self::default();
        self.open = true;
        self.raw_json = "{}".to_string();
    }

    pub fn open_edit(&mut self, asset: &CiAssetResponse, ci_types: &[CiType]) {
        *self = Self::default();
        self.open = true;
        self.editing = Some(asset.id.clone());
        self.name = asset.name.clone();
        self.ci_type_id = asset.ci_type_id.clone();
        self.bag = asset.attributes.clone();
        if let Some(ci_type) = ci_types.iter().find(|t| t.id == asset.ci_type_id) {
            self.fields = derive_fields(ci_type);
        }
        self.rebuild_buffers();
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Text buffers mirror the bag through display semantics: an explicit
    /// empty or zero wins over the schema default, null counts as absent.
    fn rebuild_buffers(&mut self) {
        self.buffers.clear();
        for field in &self.fields {
            let value = display_value(&self.bag, field);
            let text = match field.field_type {
                FieldType::Date => normalize_date(&value),
                _ => value_to_input_string(&value),
            };
            self.buffers.insert(field.key.clone(), text);
        }
        if self.fields.is_empty() {
            self.raw_json = serde_json::to_string_pretty(&Value::Object(self.bag.clone()))
                .unwrap_or_else(|_| "{}".to_string());
        }
    }

    fn select_type(&mut self, ci_type: &CiType) {
        self.ci_type_id = ci_type.id.clone();
        self.fields = derive_fields(ci_type);
        // A fresh bag for the new type; stale keys from the previous
        // selection are dropped.
        self.bag = seed_defaults(&self.fields);
        self.rebuild_buffers();
    }

    pub fn ui(&mut self, ctx: &egui::Context, ci_types: &[CiType]) -> AssetFormResult {
        if !self.open {
            return AssetFormResult::None;
        }
        let mut result = AssetFormResult::None;
        let mut close = false;
        let editing = self.editing.is_some();
        let title = if editing { "Edit Asset" } else { "New Asset" };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(true)
            .default_width(440.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Name");
                    ui.add(TextEdit::singleline(&mut self.name).desired_width(f32::INFINITY));
                });

                ui.horizontal(|ui| {
                    ui.label("CI Type");
                    let selected_name = ci_types
                        .iter()
                        .find(|t| t.id == self.ci_type_id)
                        .map_or("Select a type", |t| t.name.as_str());
                    ui.add_enabled_ui(!editing, |ui| {
                        ComboBox::from_id_salt("asset_ci_type")
                            .selected_text(selected_name)
                            .show_ui(ui, |ui| {
                                let mut picked = None;
                                for ci_type in ci_types {
                                    let checked = ci_type.id == self.ci_type_id;
                                    if ui.selectable_label(checked, &ci_type.name).clicked()
                                        && !checked
                                    {
                                        picked = Some(ci_type.clone());
                                    }
                                }
                                if let Some(ci_type) = picked {
                                    self.select_type(&ci_type);
                                }
                            });
                    });
                });

                ui.separator();
                egui::ScrollArea::vertical().max_height(400.0).show(ui, |ui| {
                    if !editing && self.ci_type_id.is_empty() {
                        ui.label(RichText::new("Select a CI type to edit attributes.").weak());
                    } else if self.fields.is_empty() {
                        self.raw_json_editor(ui);
                    } else {
                        self.schema_fields(ui);
                    }
                });

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

    fn submit(&mut self) -> Result<AssetFormResult, String> {
        match &self.editing {
            Some(id) => build_update(&self.name, &self.bag)
                .map(|req| AssetFormResult::Update {
                    id: id.clone(),
                    req,
                })
                .map_err(|e| e.to_string()),
            None => build_create(&self.name, &self.ci_type_id, &self.bag)
                .map(AssetFormResult::Create)
                .map_err(|e| e.to_string()),
        }
    }

    fn schema_fields(&mut self, ui: &mut egui::Ui) {
        let Self {
            fields, bag, buffers, ..
        } = self;
        for field in fields.iter() {
            let label = if field.required {
                format!("{} *", field.label)
            } else {
                field.label.clone()
            };

            match control_for(field) {
                Control::Toggle => {
                    let mut checked = truthy(&display_value(bag, field));
                    if ui.checkbox(&mut checked, label).changed() {
                        bag.insert(field.key.clone(), Value::Bool(checked));
                    }
                }
                Control::Select => {
                    ui.label(label);
                    let current = buffers.get(&field.key).cloned().unwrap_or_default();
                    ComboBox::from_id_salt(&field.key)
                        .selected_text(if current.is_empty() { "Select..." } else { current.as_str() })
                        .show_ui(ui, |ui| {
                            for option in field.options.as_deref().unwrap_or_default() {
                                if ui.selectable_label(current == *option, option).clicked() {
                                    buffers.insert(field.key.clone(), option.clone());
                                    bag.insert(field.key.clone(), Value::String(option.clone()));
                                }
                            }
                        });
                }
                Control::Multiline => {
                    ui.label(label);
                    let buffer = buffers.entry(field.key.clone()).or_default();
                    if ui
                        .add(TextEdit::multiline(buffer).desired_rows(3).desired_width(f32::INFINITY))
                        .changed()
                    {
                        bag.insert(field.key.clone(), coerce_text_input(&field.field_type, buffer));
                    }
                }
                Control::TextInput => {
                    ui.label(label);
                    let hint = match &field.field_type {
                        FieldType::Number => "0",
                        FieldType::Date => "YYYY-MM-DD",
                        _ if field.wants_email_input() => "name@example.com",
                        _ => "",
                    };
                    let buffer = buffers.entry(field.key.clone()).or_default();
                    if ui
                        .add(
                            TextEdit::singleline(buffer)
                                .hint_text(hint)
                                .desired_width(f32::INFINITY),
                        )
                        .changed()
                    {
                        bag.insert(field.key.clone(), coerce_text_input(&field.field_type, buffer));
                    }
                }
            }
            ui.add_space(6.0);
        }
    }

    fn raw_json_editor(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Attributes (JSON)").strong());
        ui.label(
            RichText::new("This type has no attribute schema; edit the bag directly.")
                .weak()
                .small(),
        );
        if ui
            .add(
                TextEdit::multiline(&mut self.raw_json)
                    .code_editor()
                    .desired_rows(10)
                    .desired_width(f32::INFINITY),
            )
            .changed()
        {
            // Invalid or non-object text is ignored; the bag keeps the
            // last valid parse.
            apply_raw_json(&mut self.bag, &self.raw_json);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enum_fields_get_a_select_regardless_of_declared_type() {
        // The common schema shape is `{type: "string", enum: [...]}`, which
        // derives as Text with options; it must still render as a select.
        let ci_type: CiType = serde_json::from_value(json!({
            "id": "t1",
            "name": "Server",
            "attributes": {
                "schema": {
                    "properties": {
                        "env": {"type": "string", "enum": ["prod", "dev"]},
                        "tier": {"type": "select", "enum": ["gold", "silver"]},
                    },
                }
            }
        }))
        .unwrap();
        let fields = derive_fields(&ci_type);
        assert_eq!(fields[0].field_type, FieldType::Text);
        assert_eq!(control_for(&fields[0]), Control::Select);
        assert_eq!(control_for(&fields[1]), Control::Select);
    }

    #[test]
    fn optionless_fields_keep_their_control_class() {
        let field = |field_type| AttributeField {
            key: "k".into(),
            field_type,
            label: "K".into(),
            required: false,
            options: None,
            default_value: None,
        };
        assert_eq!(control_for(&field(FieldType::Boolean)), Control::Toggle);
        assert_eq!(control_for(&field(FieldType::Textarea)), Control::Multiline);
        assert_eq!(control_for(&field(FieldType::Text)), Control::TextInput);
        assert_eq!(control_for(&field(FieldType::Number)), Control::TextInput);
        // A select with an empty or missing enum has nothing to offer.
        assert_eq!(control_for(&field(FieldType::Select)), Control::TextInput);
    }
}
