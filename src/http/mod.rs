//! HTTP protocol layer module
//!
//! Response builders shared by the built-in handlers and the router
//! fallbacks, decoupled from routing logic.

pub mod response;

pub use response::{
    build_404_response, build_405_response, build_direct_response, build_health_response,
};
