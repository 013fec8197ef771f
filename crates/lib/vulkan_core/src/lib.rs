//! # vulkan_core
//!
//! Core domain logic for the Vulkan console: mail domain models, form
//! validation, and the persisted login session.

pub mod models;
pub mod session;
pub mod validation;
