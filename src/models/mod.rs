//! Data models for the Prime Infrastructure API.
//!
//! This module contains the request and response shapes of the inventory
//! endpoints and the [`Outcome`](outcome::Outcome) returned by every
//! operation.

// Export submodules
pub mod device;
pub mod envelope;
pub mod outcome;
