use log::{error, warn};

use crate::models::{Post, PostId, Session};

use super::state::{LoadedImage, SignInState};
use super::PostboardApp;

pub enum AppMessage {
    PostsLoaded(Result<Vec<Post>, anyhow::Error>),
    PostCreated(Result<(), anyhow::Error>),
    PostUpdated {
        post_id: PostId,
        result: Result<(), anyhow::Error>,
    },
    PostDeleted {
        post_id: PostId,
        result: Result<(), anyhow::Error>,
    },
    SignedIn(Result<Session, anyhow::Error>),
    SignedOut(Result<(), anyhow::Error>),
    AvatarLoaded {
        url: String,
        result: Result<LoadedImage, String>,
    },
}

pub(super) fn process_messages(app: &mut PostboardApp) {
    while let Ok(message) = app.rx.try_recv() {
        handle_message(app, message);
    }
}

pub(super) fn handle_message(app: &mut PostboardApp, message: AppMessage) {
    match message {
        AppMessage::PostsLoaded(result) => {
            app.feed.loads_in_flight = app.feed.loads_in_flight.saturating_sub(1);
            match result {
                Ok(posts) => app.feed.replace_posts(posts),
                // Previous posts stay on screen.
                Err(err) => error!("Error fetching the post: {err:#}"),
            }
        }
        AppMessage::PostCreated(result) => {
            let succeeded = match result {
                Ok(()) => true,
                Err(err) => {
                    error!("Error posting: {err:#}");
                    false
                }
            };
            if app.composer.finish(succeeded) {
                app.spawn_load_posts();
            }
        }
        AppMessage::PostUpdated { post_id, result } => match result {
            Ok(()) => app.spawn_load_posts(),
            Err(err) => error!("Error updating post {post_id}: {err:#}"),
        },
        AppMessage::PostDeleted { post_id, result } => match result {
            Ok(()) => app.spawn_load_posts(),
            Err(err) => error!("Error deleting post {post_id}: {err:#}"),
        },
        AppMessage::SignedIn(result) => match result {
            Ok(session) => {
                app.sign_in = SignInState::default();
                app.edit_prompt = None;
                app.session = Some(session);
            }
            Err(err) => {
                warn!("sign-in failed: {err:#}");
                app.sign_in.submitting = false;
                app.sign_in.error = Some(err.to_string());
            }
        },
        AppMessage::SignedOut(result) => {
            if let Err(err) = result {
                error!("failed to revoke session: {err:#}");
            }
        }
        AppMessage::AvatarLoaded { url, result } => {
            app.avatars.loading.remove(&url);
            match result {
                Ok(img) => {
                    app.avatars.pending.insert(url, img);
                }
                Err(err) => {
                    warn!("failed to load avatar {url}: {err}");
                    app.avatars.errors.insert(url, err);
                }
            }
        }
    }
}
