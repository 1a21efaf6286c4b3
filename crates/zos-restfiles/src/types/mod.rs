//! Request and error types shared across handlers.

pub mod error;
pub mod request;
