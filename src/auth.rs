//! Token acquisition subsystem.
//!
//! One [`TokenHandler`](handler::TokenHandler) strategy per credential
//! category (app, client, page, system-user, user), each owning a single
//! [`CredentialSlot`](credential::CredentialSlot) and one wire protocol against
//! the platform's authentication endpoints. The [`TokenSource`](source::TokenSource)
//! seam unifies how consumers obtain a bearer, whether from a fixed config value,
//! a refresh grant, or a handler's lazy path.

pub mod app;
pub mod client;
pub mod credential;
pub mod handler;
pub mod page;
pub mod secret;
pub mod source;
pub mod system_user;
pub mod user;

pub use app::*;
pub use client::*;
pub use credential::*;
pub use handler::*;
pub use page::*;
pub use secret::*;
pub use source::*;
pub use system_user::*;
pub use user::*;
