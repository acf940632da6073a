use std::sync::mpsc::Sender;

use eframe::egui::{self, Sense};
use reqwest::blocking::Client;

use super::super::state::AvatarCache;
use super::super::{tasks, AppMessage, PostboardApp};

/// Borrows just the fields avatar rendering needs, so rows can be drawn
/// while the feed itself stays borrowed.
pub(crate) struct Avatars<'a> {
    pub cache: &'a mut AvatarCache,
    pub http: &'a Client,
    pub tx: &'a Sender<AppMessage>,
}

impl Avatars<'_> {
    /// Round avatar for `url`, downloading it on first sight. Missing or
    /// broken images fall back to a plain disc.
    pub(crate) fn show(&mut self, ui: &mut egui::Ui, url: Option<&str>, size: f32) {
        let Some(url) = url.filter(|url| !url.is_empty()) else {
            placeholder(ui, size);
            return;
        };

        if !self.cache.textures.contains_key(url) {
            if let Some(pending) = self.cache.pending.remove(url) {
                let color = egui::ColorImage::from_rgba_unmultiplied(pending.size, &pending.pixels);
                let tex = ui
                    .ctx()
                    .load_texture(url, color, egui::TextureOptions::default());
                self.cache.textures.insert(url.to_string(), tex);
            }
        }

        if let Some(tex) = self.cache.textures.get(url) {
            ui.add(
                egui::Image::from_texture(tex)
                    .fit_to_exact_size(egui::vec2(size, size))
                    .rounding(size / 2.0),
            );
        } else if self.cache.errors.contains_key(url) {
            placeholder(ui, size);
        } else {
            if self.cache.loading.insert(url.to_string()) {
                tasks::download_avatar(self.http.clone(), self.tx.clone(), url.to_string());
            }
            ui.add(egui::Spinner::new().size(size));
        }
    }
}

impl PostboardApp {
    pub(crate) fn render_avatar(&mut self, ui: &mut egui::Ui, url: Option<&str>, size: f32) {
        Avatars {
            cache: &mut self.avatars,
            http: &self.http,
            tx: &self.tx,
        }
        .show(ui, url, size);
    }
}

fn placeholder(ui: &mut egui::Ui, size: f32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(size, size), Sense::hover());
    ui.painter()
        .circle_filled(rect.center(), size / 2.0, ui.visuals().widgets.inactive.bg_fill);
}
