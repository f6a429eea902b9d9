// Handler modules, one per content domain. Admin-only handlers rely on the
// token guard applied at the router layer; they do not re-check the session.

pub mod admin;
pub mod blog;
pub mod contacts;
pub mod content;
pub mod gallery;
pub mod news;
pub mod pages;
pub mod search;
