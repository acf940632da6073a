use eframe::egui::{self, RichText};

use super::super::PostboardApp;

impl PostboardApp {
    /// Always shows the signed-in user; `route_id` is only echoed.
    pub(crate) fn render_profile(&mut self, ui: &mut egui::Ui, route_id: &str) {
        ui.label(RichText::new(format!("/profile/{route_id}")).small().monospace().weak());
        ui.add_space(12.0);

        let Some(principal) = self.principal().cloned() else {
            ui.label("Sign in to see your profile.");
            return;
        };

        ui.vertical_centered(|ui| {
            self.render_avatar(ui, principal.image_url.as_deref(), 96.0);
            ui.add_space(8.0);
            ui.heading(principal.username.as_deref().unwrap_or_default());
            if let Some(name) = principal.display_name() {
                ui.label(name);
            }
        });
    }
}
