use eframe::egui::{self, Align2, Color32, Context};

use super::super::PostboardApp;

impl PostboardApp {
    pub(crate) fn render_edit_prompt(&mut self, ctx: &Context) {
        let Some(prompt) = self.edit_prompt.as_mut() else {
            return;
        };

        let mut should_save = false;
        let mut should_cancel = false;

        egui::Window::new("Edit post")
            .collapsible(false)
            .resizable(false)
            .default_width(400.0)
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut prompt.content)
                        .desired_rows(4)
                        .desired_width(f32::INFINITY),
                );
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        should_save = true;
                    }
                    if ui.button("Cancel").clicked() {
                        should_cancel = true;
                    }
                });
            });

        if should_save {
            self.confirm_edit();
        } else if should_cancel {
            self.cancel_edit();
        }
    }

    pub(crate) fn render_notice(&mut self, ctx: &Context) {
        let Some(message) = self.notice.clone() else {
            return;
        };

        let mut dismiss = false;
        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(message.as_str());
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismiss = true;
                }
            });
        if dismiss {
            self.notice = None;
        }
    }

    pub(crate) fn render_sign_in(&mut self, ctx: &Context) {
        if !self.sign_in.open {
            return;
        }

        let mut should_submit = false;
        let mut open = self.sign_in.open;

        egui::Window::new("Sign in")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .default_width(320.0)
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                if let Some(err) = &self.sign_in.error {
                    ui.colored_label(Color32::LIGHT_RED, err);
                }
                ui.label("Username or email");
                ui.text_edit_singleline(&mut self.sign_in.identifier);
                ui.label("Password");
                let password = ui.add(egui::TextEdit::singleline(&mut self.sign_in.password).password(true));
                if password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    should_submit = true;
                }
                ui.add_space(8.0);
                if self.sign_in.submitting {
                    ui.add(egui::Spinner::new());
                } else if ui.button("Sign in").clicked() {
                    should_submit = true;
                }
            });

        if !open {
            self.sign_in = Default::default();
            return;
        }
        if should_submit && !self.sign_in.submitting {
            self.spawn_sign_in();
        }
    }
}
