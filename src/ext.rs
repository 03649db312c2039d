//! Public extension contracts (response handling).
//!
//! The crate ships a no-op default so submissions work out of the box; callers that need to
//! interpret CRPT status codes plug in their own [`ResponseHandler`].

pub mod response_handler;

pub use response_handler::*;
