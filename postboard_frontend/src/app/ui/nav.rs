use eframe::egui::{self, RichText};

use crate::routes::Route;

use super::super::PostboardApp;

impl PostboardApp {
    pub(crate) fn render_top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .selectable_label(self.route == Route::Feed, "Posts")
                .clicked()
            {
                self.navigate(Route::Feed);
            }

            let my_id = self.principal().map(|p| p.id.clone());
            if let Some(id) = my_id {
                let on_profile = matches!(self.route, Route::Profile { .. });
                if ui.selectable_label(on_profile, "My profile").clicked() {
                    self.navigate(Route::profile(id));
                }
            }

            ui.separator();
            ui.label("Go to");
            let response = ui.add(egui::TextEdit::singleline(&mut self.route_input).desired_width(180.0));
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Open").clicked() || submitted {
                let route = Route::parse(&self.route_input);
                self.navigate(route);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let username = self
                    .principal()
                    .map(|p| p.username.clone().unwrap_or_else(|| p.id.clone()));
                match username {
                    Some(username) => {
                        if ui.button("Sign out").clicked() {
                            self.spawn_sign_out();
                        }
                        ui.label(RichText::new(username).strong());
                    }
                    None => {
                        if ui.button("Sign in").clicked() {
                            self.sign_in.open = true;
                        }
                    }
                }
                if self.feed.loads_in_flight > 0 {
                    ui.add(egui::Spinner::new());
                }
                if ui.button("Refresh").clicked() {
                    self.spawn_load_posts();
                }
            });
        });
    }
}
