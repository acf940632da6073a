use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

use log::error;
use reqwest::blocking::Client;

use crate::api::PostStore;
use crate::identity::IdentityProvider;
use crate::models::{NewPost, PostId, PostPatch, Session};

use super::messages::AppMessage;
use super::state::LoadedImage;

pub fn load_posts(store: Arc<dyn PostStore>, tx: Sender<AppMessage>) {
    thread::spawn(move || {
        let result = store.select_all().map_err(anyhow::Error::from);
        if tx.send(AppMessage::PostsLoaded(result)).is_err() {
            error!("failed to send PostsLoaded message");
        }
    });
}

pub fn create_post(store: Arc<dyn PostStore>, tx: Sender<AppMessage>, row: NewPost) {
    thread::spawn(move || {
        let result = store.insert(&row).map_err(anyhow::Error::from);
        if tx.send(AppMessage::PostCreated(result)).is_err() {
            error!("failed to send PostCreated message");
        }
    });
}

pub fn update_post(
    store: Arc<dyn PostStore>,
    tx: Sender<AppMessage>,
    post_id: PostId,
    patch: PostPatch,
) {
    thread::spawn(move || {
        let result = store.update(&post_id, &patch).map_err(anyhow::Error::from);
        if tx.send(AppMessage::PostUpdated { post_id, result }).is_err() {
            error!("failed to send PostUpdated message");
        }
    });
}

pub fn delete_post(store: Arc<dyn PostStore>, tx: Sender<AppMessage>, post_id: PostId) {
    thread::spawn(move || {
        let result = store.delete(&post_id).map_err(anyhow::Error::from);
        if tx.send(AppMessage::PostDeleted { post_id, result }).is_err() {
            error!("failed to send PostDeleted message");
        }
    });
}

pub fn sign_in(
    identity: Arc<dyn IdentityProvider>,
    tx: Sender<AppMessage>,
    identifier: String,
    password: String,
) {
    thread::spawn(move || {
        let result = identity
            .sign_in(&identifier, &password)
            .map_err(anyhow::Error::from);
        if tx.send(AppMessage::SignedIn(result)).is_err() {
            error!("failed to send SignedIn message");
        }
    });
}

pub fn sign_out(identity: Arc<dyn IdentityProvider>, tx: Sender<AppMessage>, session: Session) {
    thread::spawn(move || {
        let result = identity.sign_out(&session).map_err(anyhow::Error::from);
        if tx.send(AppMessage::SignedOut(result)).is_err() {
            error!("failed to send SignedOut message");
        }
    });
}

pub fn download_avatar(client: Client, tx: Sender<AppMessage>, url: String) {
    thread::spawn(move || {
        log::debug!("downloading avatar from {url}");

        let result: Result<LoadedImage, String> = (|| {
            let resp = client
                .get(&url)
                .send()
                .and_then(|resp| resp.error_for_status())
                .map_err(|e| format!("Request error: {e}"))?;
            let bytes = resp.bytes().map_err(|e| format!("Download error: {e}"))?;
            let dyn_img =
                image::load_from_memory(&bytes).map_err(|e| format!("Image decode error: {e}"))?;
            let rgba = dyn_img.to_rgba8();
            let size = [dyn_img.width() as usize, dyn_img.height() as usize];
            Ok(LoadedImage {
                size,
                pixels: rgba.into_raw(),
            })
        })();

        if tx.send(AppMessage::AvatarLoaded { url, result }).is_err() {
            error!("failed to send AvatarLoaded message");
        }
    });
}
