//! Request handler module
//!
//! Handler type, built-in handlers, and the dispatcher that routes each
//! request to one of them.

pub mod builtin;
pub mod router;

pub use builtin::{direct, handler_fn, health_check, AllowedMethods, Handler};
pub use router::{handle_request, Router};
