use eframe::egui::{self, Context, Rect};

use crate::models::PostId;

use super::super::feed::{MenuEntry, RowMenu};

/// Draws the open row menu under its trigger and registers both rects
/// as "inside" for outside-press dismissal.
pub(crate) fn render_row_menu(
    ctx: &Context,
    post_id: &PostId,
    trigger: Rect,
    mounted: Option<&RowMenu>,
) -> Option<MenuEntry> {
    let mut chosen = None;
    let area = egui::Area::new(egui::Id::new(("row_menu", post_id.to_string())))
        .order(egui::Order::Foreground)
        .fixed_pos(trigger.left_bottom())
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_min_width(120.0);
                if ui.button("✏ Edit").clicked() {
                    chosen = Some(MenuEntry::Edit);
                }
                if ui.button("🔗 Share").clicked() {
                    chosen = Some(MenuEntry::Share);
                }
                if ui.button("🗑 Delete").clicked() {
                    chosen = Some(MenuEntry::Delete);
                }
            });
        });

    if let Some(menu) = mounted.filter(|menu| &menu.post_id == post_id) {
        menu.place([trigger, area.response.rect]);
    }
    chosen
}
