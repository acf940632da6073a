use std::fmt;

use crate::models::{Post, PostId, Principal};

use super::pointer::{OutsideClickListener, PointerHub};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Edit,
    Delete,
}

/// Entries of the per-row contextual menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Edit,
    Share,
    Delete,
}

/// Returned when the current principal tries to change someone else's post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub mutation: Mutation,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mutation {
            Mutation::Edit => f.write_str("Cannot edit others post."),
            Mutation::Delete => f.write_str("Cannot delete others post."),
        }
    }
}

impl std::error::Error for Rejection {}

#[derive(Default)]
pub struct FeedState {
    posts: Vec<Post>,
    open_menu: Option<PostId>,
    /// Loads currently in flight. Loads never block each other.
    pub loads_in_flight: usize,
}

impl FeedState {
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn find(&self, id: &PostId) -> Option<&Post> {
        self.posts.iter().find(|post| &post.id == id)
    }

    pub fn replace_posts(&mut self, mut posts: Vec<Post>) {
        sort_newest_first(&mut posts);
        self.posts = posts;
    }

    pub fn open_menu(&self) -> Option<&PostId> {
        self.open_menu.as_ref()
    }

    pub fn toggle_menu(&mut self, id: &PostId) {
        if self.open_menu.as_ref() == Some(id) {
            self.open_menu = None;
        } else {
            self.open_menu = Some(id.clone());
        }
    }

    pub fn close_menu(&mut self) {
        self.open_menu = None;
    }

    /// Client-side ownership check shared by edit and delete.
    pub fn authorize(
        post: &Post,
        principal: Option<&Principal>,
        mutation: Mutation,
    ) -> Result<(), Rejection> {
        match principal {
            Some(principal) if post.author.is_owned_by(principal) => Ok(()),
            _ => Err(Rejection { mutation }),
        }
    }
}

/// Newest first. The sort is stable so equal timestamps keep store order.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.created_at_utc().cmp(&a.created_at_utc()));
}

/// The contextual menu for one row while it is on screen.
pub struct RowMenu {
    pub post_id: PostId,
    listener: OutsideClickListener,
}

impl RowMenu {
    pub fn mount(hub: &PointerHub, post_id: PostId) -> Self {
        Self {
            post_id,
            listener: hub.subscribe_outside_click(),
        }
    }

    pub fn place(&self, regions: impl IntoIterator<Item = eframe::egui::Rect>) {
        self.listener.set_regions(regions);
    }

    pub fn dismissed(&self) -> bool {
        self.listener.take_dismissed()
    }
}
