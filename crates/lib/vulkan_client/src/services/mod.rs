//! Access layers: one async function per backend operation.
//!
//! Each function picks the method, path and body for its route and returns
//! the typed payload; gateway errors pass through unchanged.

pub mod auth;
pub mod domains;
pub mod emails;
