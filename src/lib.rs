//! Uploaders that publish locally generated image artifacts to Cloudflare R2
//!
//! Artifacts are located by partial filename, optionally re-encoded as WebP,
//! and uploaded under fixed object keys so they can be served from a public URL.

pub mod app;
pub mod cli;
pub mod error;
pub mod image;
pub mod matcher;
pub mod models;
pub mod storage;

pub use error::{Error, Result};
