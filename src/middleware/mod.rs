//! Middleware module
//!
//! Request logging shared by every route

pub mod logging;
