use eframe::egui::{self, RichText};
use log::info;

use crate::models::{Post, PostId};

use super::super::feed::{MenuEntry, RowMenu};
use super::super::PostboardApp;
use super::avatar::Avatars;
use super::menu::render_row_menu;

enum RowAction {
    ToggleMenu(PostId),
    Choose(PostId, MenuEntry),
}

impl PostboardApp {
    pub(crate) fn render_feed(&mut self, ui: &mut egui::Ui) {
        let feed = &self.feed;
        if feed.loads_in_flight > 0 && feed.posts().is_empty() {
            ui.add(egui::Spinner::new());
        }

        let mut avatars = Avatars {
            cache: &mut self.avatars,
            http: &self.http,
            tx: &self.tx,
        };
        let mounted = self.row_menu.as_ref();
        let mut actions = Vec::new();

        egui::ScrollArea::vertical().show(ui, |ui| {
            if feed.posts().is_empty() && feed.loads_in_flight == 0 {
                ui.label("No posts yet.");
            }
            for post in feed.posts() {
                let menu_open = feed.open_menu() == Some(&post.id);
                render_post_row(ui, post, menu_open, mounted, &mut avatars, &mut actions);
                ui.add_space(8.0);
            }
        });

        for action in actions {
            match action {
                RowAction::ToggleMenu(post_id) => self.toggle_menu(&post_id),
                RowAction::Choose(post_id, entry) => {
                    if let Err(rejection) = self.choose_menu_entry(&post_id, entry) {
                        info!("{entry:?} on post {post_id} refused: {rejection}");
                    }
                }
            }
        }
    }
}

fn render_post_row(
    ui: &mut egui::Ui,
    post: &Post,
    menu_open: bool,
    mounted: Option<&RowMenu>,
    avatars: &mut Avatars<'_>,
    actions: &mut Vec<RowAction>,
) {
    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .rounding(12.0)
        .inner_margin(egui::vec2(12.0, 8.0))
        .show(ui, |ui| {
            ui.set_width(450.0);
            ui.horizontal(|ui| {
                avatars.show(ui, post.author.image_url.as_deref(), 28.0);
                ui.vertical(|ui| {
                    let username = post.author.username.as_deref().unwrap_or("(unknown)");
                    ui.label(RichText::new(username).strong());
                    if let Some(name) = post.author.display_name() {
                        ui.label(RichText::new(name).small().weak());
                    }
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    let trigger = ui.button("⋯");
                    if trigger.clicked() {
                        actions.push(RowAction::ToggleMenu(post.id.clone()));
                    }
                    if menu_open {
                        if let Some(entry) = render_row_menu(ui.ctx(), &post.id, trigger.rect, mounted) {
                            actions.push(RowAction::Choose(post.id.clone(), entry));
                        }
                    }
                });
            });
            ui.label(RichText::new(&post.created_at).small().weak());
            ui.add_space(4.0);
            ui.label(&post.content);
        });
}
