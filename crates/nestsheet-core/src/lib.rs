#![forbid(unsafe_code)]

//! Core: canonical input events and the logging facade shared by the drawer
//! widgets and their hosts.

pub mod event;
pub mod logging;

#[cfg(feature = "tracing")]
pub use logging::{debug, trace};
