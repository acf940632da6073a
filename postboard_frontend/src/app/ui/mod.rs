pub mod avatar;
pub mod composer;
pub mod dialogs;
pub mod feed;
pub mod menu;
pub mod nav;
pub mod profile;
