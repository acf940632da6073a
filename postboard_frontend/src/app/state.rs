use std::collections::{HashMap, HashSet};

use eframe::egui::TextureHandle;

use crate::models::PostId;

#[derive(Default)]
pub struct SignInState {
    pub open: bool,
    pub identifier: String,
    pub password: String,
    pub submitting: bool,
    pub error: Option<String>,
}

/// Replacement-content prompt opened from a row menu.
pub struct EditPrompt {
    pub post_id: PostId,
    pub content: String,
}

pub struct LoadedImage {
    pub size: [usize; 2],
    pub pixels: Vec<u8>,
}

/// Avatar textures keyed by image URL.
#[derive(Default)]
pub struct AvatarCache {
    pub textures: HashMap<String, TextureHandle>,
    pub pending: HashMap<String, LoadedImage>,
    pub loading: HashSet<String>,
    pub errors: HashMap<String, String>,
}
