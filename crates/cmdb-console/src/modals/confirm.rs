//! Generic delete confirmation dialog

pub struct ConfirmModal {
    open: bool,
    title: String,
    message: String,
    pending_id: Option<String>,
}

impl Default for ConfirmModal {
    fn default() -> Self {
        Self {
            open: false,
            title: String::new(),
            message: String::new(),
            pending_id: None,
        }
    }
}

impl ConfirmModal {
    pub fn open(&mut self, title: impl Into<String>, message: impl Into<String>, id: impl Into<String>) {
        self.open = true;
        self.title = title.into();
        self.message = message.into();
        self.pending_id = Some(id.into());
    }

    /// Returns the confirmed id on the frame the user accepts.
    pub fn ui(&mut self, ctx: &egui::Context) -> Option<String> {
        if !self.open {
            return None;
        }
        let mut confirmed = None;
        let mut close = false;

        egui::Window::new(&self.title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&self.message);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        close = true;
                    }
                    let delete = egui::Button::new(
                        egui::RichText::new("Delete").color(egui::Color32::WHITE),
                    )
                    .fill(egui::Color32::from_rgb(200, 60, 60));
                    if ui.add(delete).clicked() {
                        confirmed = self.pending_id.take();
                        close = true;
                    }
                });
            });

        if close {
            self.open = false;
        }
        confirmed
    }
}
