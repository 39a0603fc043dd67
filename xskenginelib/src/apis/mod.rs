//! Building blocks for the per-frame dispatch path
//!
//! The dispatcher is a pure function over one frame plus the shared tables;
//! everything it touches lives here

pub mod frame;
pub use frame::*;

pub mod headers;
pub use headers::*;

pub mod config;
pub use config::*;

pub mod xsks;
pub use xsks::*;

pub mod dispatch;
pub use dispatch::*;
