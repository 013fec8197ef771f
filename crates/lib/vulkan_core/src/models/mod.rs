//! Domain models.
//!
//! These are the read models shared by the backend and the console, distinct
//! from the request/response bodies in `vulkan_api::models`.

pub mod auth;
pub mod mail;

pub use auth::{Credentials, PasswordChange};
pub use mail::{Domain, EmailAccount, NewAccount};
