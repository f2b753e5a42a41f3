//! Transient notification stack drawn in the top-right corner

use egui::{Align2, Color32, Frame, RichText};

const TOAST_SECS: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

impl ToastLevel {
    fn color(&self) -> Color32 {
        match self {
            ToastLevel::Success => Color32::from_rgb(34, 160, 82),
            ToastLevel::Error => Color32::from_rgb(200, 60, 60),
            ToastLevel::Info => Color32::from_rgb(70, 120, 200),
        }
    }
}

struct Toast {
    level: ToastLevel,
    text: String,
    expires_at: f64,
}

#[derive(Default)]
pub struct Toasts {
    items: Vec<Toast>,
    pending: Vec<(ToastLevel, String)>,
}

impl Toasts {
    /// Queue a toast; it picks up its expiry on the next draw.
    pub fn push(&mut self, level: ToastLevel, text: impl Into<String>) {
        self.pending.push((level, text.into()));
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(ToastLevel::Success, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(ToastLevel::Error, text);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(ToastLevel::Info, text);
    }

    pub fn draw(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        for (level, text) in self.pending.drain(..) {
            self.items.push(Toast {
                level,
                text,
                expires_at: now + TOAST_SECS,
            });
        }
        self.items.retain(|t| t.expires_at > now);
        if self.items.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("toasts"))
            .anchor(Align2::RIGHT_TOP, [-12.0, 12.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for toast in &self.items {
                    Frame::popup(ui.style())
                        .fill(toast.level.color().gamma_multiply(0.25))
                        .show(ui, |ui| {
                            ui.label(
                                RichText::new(&toast.text)
                                    .color(toast.level.color())
                                    .strong(),
                            );
                        });
                    ui.add_space(4.0);
                }
            });
        // Keep repainting so expiry fires without input events.
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}
