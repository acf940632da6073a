use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use eframe::egui::{self, Context};
use log::{error, info, warn};
use reqwest::blocking::Client;

use crate::api::{PostStore, StoreClient};
use crate::config::FrontendConfig;
use crate::identity::{HostedIdentity, IdentityProvider};
use crate::models::{PostId, PostPatch, Principal, Session};
use crate::routes::Route;

pub mod composer;
pub mod feed;
mod messages;
pub mod pointer;
mod state;
mod tasks;
mod ui;

use composer::ComposerState;
use feed::{FeedState, MenuEntry, Mutation, Rejection, RowMenu};
use pointer::PointerHub;
use state::{AvatarCache, EditPrompt, SignInState};

/// External collaborators the app talks to.
#[derive(Clone)]
pub struct Services {
    pub store: Arc<dyn PostStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub http: Client,
}

impl Services {
    pub fn from_config(config: &FrontendConfig) -> Result<Self> {
        let store = StoreClient::new(&config.store)?;
        let identity = HostedIdentity::new(&config.identity)?;
        info!("identity frontend at {}", identity.frontend_url());
        let http = Client::builder().timeout(Duration::from_secs(15)).build()?;
        Ok(Self {
            store: Arc::new(store),
            identity: Arc::new(identity),
            http,
        })
    }
}

pub struct PostboardApp {
    store: Arc<dyn PostStore>,
    identity: Arc<dyn IdentityProvider>,
    http: Client,
    tx: Sender<AppMessage>,
    rx: Receiver<AppMessage>,
    route: Route,
    route_input: String,
    session: Option<Session>,
    feed: FeedState,
    composer: ComposerState,
    pointer: PointerHub,
    row_menu: Option<RowMenu>,
    edit_prompt: Option<EditPrompt>,
    notice: Option<String>,
    sign_in: SignInState,
    avatars: AvatarCache,
}

pub use messages::AppMessage;

impl PostboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, services: Services, route: Route) -> Self {
        let mut app = Self::with_services(services, route);
        app.spawn_load_posts();
        app
    }

    pub fn with_services(services: Services, route: Route) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            store: services.store,
            identity: services.identity,
            http: services.http,
            tx,
            rx,
            route_input: route.to_string(),
            route,
            session: None,
            feed: FeedState::default(),
            composer: ComposerState::default(),
            pointer: PointerHub::default(),
            row_menu: None,
            edit_prompt: None,
            notice: None,
            sign_in: SignInState::default(),
            avatars: AvatarCache::default(),
        }
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.session.as_ref().map(|session| &session.principal)
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn navigate(&mut self, route: Route) {
        info!("navigating to {route}");
        self.route_input = route.to_string();
        self.feed.close_menu();
        self.sync_row_menu();
        self.route = route;
    }

    /// Fetches every row. Overlapping loads are allowed; the last one to land wins.
    pub fn spawn_load_posts(&mut self) {
        self.feed.loads_in_flight += 1;
        tasks::load_posts(self.store.clone(), self.tx.clone());
    }

    pub fn submit_post(&mut self) {
        let Some(row) = self.composer.prepare(self.principal()) else {
            error!("User or content is not available");
            return;
        };
        self.composer.submitting = true;
        tasks::create_post(self.store.clone(), self.tx.clone(), row);
    }

    pub fn toggle_menu(&mut self, post_id: &PostId) {
        self.feed.toggle_menu(post_id);
        self.sync_row_menu();
    }

    /// Runs a row-menu entry and closes the menu whatever the outcome.
    pub fn choose_menu_entry(&mut self, post_id: &PostId, entry: MenuEntry) -> Result<(), Rejection> {
        let outcome = match entry {
            MenuEntry::Edit => self.request_edit(post_id),
            MenuEntry::Share => {
                self.share_post(post_id);
                Ok(())
            }
            MenuEntry::Delete => self.request_delete(post_id),
        };
        self.feed.close_menu();
        self.sync_row_menu();
        outcome
    }

    pub fn request_delete(&mut self, post_id: &PostId) -> Result<(), Rejection> {
        let Some(post) = self.feed.find(post_id) else {
            warn!("delete requested for unknown post {post_id}");
            return Ok(());
        };
        if let Err(rejection) = FeedState::authorize(post, self.principal(), Mutation::Delete) {
            self.notice = Some(rejection.to_string());
            return Err(rejection);
        }
        tasks::delete_post(self.store.clone(), self.tx.clone(), post_id.clone());
        Ok(())
    }

    /// Opens the replacement-content prompt for an owned post.
    pub fn request_edit(&mut self, post_id: &PostId) -> Result<(), Rejection> {
        let Some(post) = self.feed.find(post_id) else {
            warn!("edit requested for unknown post {post_id}");
            return Ok(());
        };
        if let Err(rejection) = FeedState::authorize(post, self.principal(), Mutation::Edit) {
            self.notice = Some(rejection.to_string());
            return Err(rejection);
        }
        self.edit_prompt = Some(EditPrompt {
            post_id: post.id.clone(),
            content: post.content.clone(),
        });
        Ok(())
    }

    /// An empty replacement is treated like a cancel. Ownership is checked
    /// again because the principal may have changed while the prompt was open.
    pub fn confirm_edit(&mut self) {
        let Some(prompt) = self.edit_prompt.take() else {
            return;
        };
        if prompt.content.is_empty() {
            return;
        }
        let Some(post) = self.feed.find(&prompt.post_id) else {
            warn!("edit confirmed for unknown post {}", prompt.post_id);
            return;
        };
        if let Err(rejection) = FeedState::authorize(post, self.principal(), Mutation::Edit) {
            self.notice = Some(rejection.to_string());
            return;
        }
        let patch = PostPatch {
            content: prompt.content,
        };
        tasks::update_post(self.store.clone(), self.tx.clone(), prompt.post_id, patch);
    }

    pub fn cancel_edit(&mut self) {
        self.edit_prompt = None;
    }

    pub fn share_post(&mut self, post_id: &PostId) {
        info!("share requested for post {post_id}");
    }

    pub fn spawn_sign_in(&mut self) {
        let identifier = self.sign_in.identifier.trim().to_string();
        if identifier.is_empty() || self.sign_in.password.is_empty() {
            self.sign_in.error = Some("Enter your username and password".into());
            return;
        }
        self.sign_in.submitting = true;
        self.sign_in.error = None;
        tasks::sign_in(
            self.identity.clone(),
            self.tx.clone(),
            identifier,
            self.sign_in.password.clone(),
        );
    }

    /// The local session ends immediately; revoking it remotely happens in the background.
    pub fn spawn_sign_out(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        self.edit_prompt = None;
        if matches!(self.route, Route::Profile { .. }) {
            self.navigate(Route::Feed);
        }
        tasks::sign_out(self.identity.clone(), self.tx.clone(), session);
    }

    fn process_messages(&mut self) {
        messages::process_messages(self);
    }

    fn sync_row_menu(&mut self) {
        let wanted = self.feed.open_menu().cloned();
        let mounted = self.row_menu.as_ref().map(|menu| &menu.post_id);
        if wanted.as_ref() == mounted {
            return;
        }
        // Replacing the old menu drops its listener.
        self.row_menu = wanted.map(|post_id| RowMenu::mount(&self.pointer, post_id));
    }

    fn route_pointer_presses(&mut self, ctx: &Context) {
        let pressed_at = ctx.input(|i| {
            if i.pointer.any_pressed() {
                i.pointer.interact_pos()
            } else {
                None
            }
        });
        if let Some(pos) = pressed_at {
            self.pointer.pointer_down(pos);
        }
        if self.row_menu.as_ref().is_some_and(RowMenu::dismissed) {
            self.feed.close_menu();
            self.sync_row_menu();
        }
    }

    fn busy(&self) -> bool {
        self.feed.loads_in_flight > 0
            || self.composer.submitting
            || self.sign_in.submitting
            || !self.avatars.loading.is_empty()
    }
}

impl eframe::App for PostboardApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.process_messages();
        self.route_pointer_presses(ctx);

        egui::TopBottomPanel::top("top_controls").show(ctx, |ui| {
            self.render_top_bar(ui);
        });

        match self.route.clone() {
            Route::Feed => {
                egui::SidePanel::right("composer_panel")
                    .resizable(false)
                    .exact_width(480.0)
                    .show(ctx, |ui| {
                        self.render_composer(ui);
                    });
                egui::CentralPanel::default().show(ctx, |ui| {
                    self.render_feed(ui);
                });
            }
            Route::Profile { id } => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    self.render_profile(ui, &id);
                });
            }
            Route::NotFound(path) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Not found");
                    ui.label(format!("Nothing lives at {path}"));
                    if ui.button("Back to posts").clicked() {
                        self.navigate(Route::Feed);
                    }
                });
            }
        }

        self.sync_row_menu();
        self.render_edit_prompt(ctx);
        self.render_notice(ctx);
        self.render_sign_in(ctx);

        if self.busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
