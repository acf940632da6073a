use eframe::egui::{self, RichText};

use super::super::PostboardApp;

impl PostboardApp {
    pub(crate) fn render_composer(&mut self, ui: &mut egui::Ui) {
        let (username, image_url) = match self.principal() {
            Some(p) => (p.username.clone(), p.image_url.clone()),
            None => (None, None),
        };

        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .rounding(12.0)
            .inner_margin(egui::vec2(12.0, 8.0))
            .show(ui, |ui| {
                ui.set_width(450.0);
                ui.horizontal(|ui| {
                    self.render_avatar(ui, image_url.as_deref(), 20.0);
                    match &username {
                        Some(name) => ui.label(RichText::new(name).strong()),
                        None => ui.label(RichText::new("Signed out").weak()),
                    };
                });
                ui.add_space(6.0);
                ui.add(
                    egui::TextEdit::multiline(&mut self.composer.draft)
                        .desired_rows(4)
                        .desired_width(f32::INFINITY)
                        .hint_text("Write something..."),
                );
                ui.add_space(6.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.composer.submitting {
                        ui.add(egui::Spinner::new());
                    } else if ui.button("Post").clicked() {
                        self.submit_post();
                    }
                });
            });

        if self.session.is_some() {
            ui.add_space(8.0);
            if ui.button("Sign out").clicked() {
                self.spawn_sign_out();
            }
        }
    }
}
