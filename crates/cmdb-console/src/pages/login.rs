//! Login / register screen shown while no session token exists.

use egui::{RichText, TextEdit};

use cmdb_types::{AuthResponse, LoginRequest, RegisterRequest};

use crate::net::{Net, Slot};

#[derive(Default)]
pub struct LoginPage {
    email: String,
    password: String,
    name: String,
    registering: bool,
    submitting: bool,
    error: Option<String>,
    auth_slot: Option<Slot<AuthResponse>>,
}

impl LoginPage {
    /// Returns the new session on successful login or registration.
    pub fn ui(&mut self, ctx: &egui::Context, net: &Net) -> Option<AuthResponse> {
        let mut session = None;

        if let Some(result) = self.auth_slot.as_ref().and_then(Slot::take) {
            self.auth_slot = None;
            self.submitting = false;
            match result {
                Ok(auth) => session = Some(auth),
                Err(err) => self.error = Some(err.to_string()),
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.25);
                ui.heading("CMDB Console");
                ui.add_space(12.0);

                ui.allocate_ui_with_layout(
                    egui::Vec2::new(280.0, 0.0),
                    egui::Layout::top_down(egui::Align::Min),
                    |ui| {
                        if self.registering {
                            ui.label("Name");
                            ui.add(TextEdit::singleline(&mut self.name).desired_width(f32::INFINITY));
                        }
                        ui.label("Email");
                        ui.add(TextEdit::singleline(&mut self.email).desired_width(f32::INFINITY));
                        ui.label("Password");
                        ui.add(
                            TextEdit::singleline(&mut self.password)
                                .password(true)
                                .desired_width(f32::INFINITY),
                        );
                        if let Some(error) = &self.error {
                            ui.add_space(4.0);
                            ui.colored_label(egui::Color32::from_rgb(200, 60, 60), error);
                        }
                        ui.add_space(10.0);

                        let label = match (self.registering, self.submitting) {
                            (_, true) => "Please wait...",
                            (true, false) => "Register",
                            (false, false) => "Sign in",
                        };
                        let can_submit = !self.submitting
                            && !self.email.trim().is_empty()
                            && !self.password.is_empty()
                            && (!self.registering || !self.name.trim().is_empty());
                        if ui
                            .add_enabled(can_submit, egui::Button::new(label).min_size([280.0, 28.0].into()))
                            .clicked()
                        {
                            self.submit(net);
                        }

                        ui.add_space(6.0);
                        let toggle = if self.registering {
                            "Have an account? Sign in"
                        } else {
                            "No account? Register"
                        };
                        if ui.link(RichText::new(toggle).small()).clicked() {
                            self.registering = !self.registering;
                        }
                    },
                );
            });
        });

        if self.auth_slot.is_some() {
            ctx.request_repaint();
        }
        session
    }

    fn submit(&mut self, net: &Net) {
        self.submitting = true;
        self.error = None;
        let api = net.api.clone();
        if self.registering {
            let req = RegisterRequest {
                email: self.email.trim().to_string(),
                password: self.password.clone(),
                name: self.name.trim().to_string(),
            };
            self.auth_slot = Some(net.spawn(async move { api.register(&req).await }));
        } else {
            let req = LoginRequest {
                email: self.email.trim().to_string(),
                password: self.password.clone(),
            };
            self.auth_slot = Some(net.spawn(async move { api.login(&req).await }));
        }
    }
}
