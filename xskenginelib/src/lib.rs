//! This is the library module that provides structures like
//! FrameBuf, the wire header views, the configuration maps, the XSK
//! redirect map and the per-frame dispatcher
//!
//! These structures and functions let a kernel-bypass UDP data path decide,
//! once per received frame, whether the frame belongs to the accelerated
//! service and which socket slot should consume it

pub mod apis;

pub use apis::*;
