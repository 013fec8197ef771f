//! # vulkan_console
//!
//! Interactive line console for the Vulkan mail administration backend:
//! routing with the login guard, the three pages, toasts and prompts.

pub use self::error::{Error, Result};
mod error;

pub mod command;
pub mod context;
pub mod prompt;
pub mod router;
pub mod shell;
pub mod toast;
pub mod views;
