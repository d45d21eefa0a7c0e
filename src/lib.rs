#![no_std]

//! An incremental decoder for the Intel HEX firmware-image format.
//!
//! Reflow decodes hex records one input byte at a time, without ever
//! buffering a whole line, making it suitable for memory-constrained targets
//! and for streaming sources where the complete image is never resident at
//! once.
//!
//! Most users should begin with the [`avec`] module: push bytes through an
//! [`avec::Session`], or decode whole sources with [`avec::decode_reader`]
//! and [`avec::decode_slice`], receiving decoded bytes and record events
//! through the [`avec::Receive`] trait. The underlying finite-state machine
//! is exposed in the [`sans`] module for applications needing finer control
//! over internals.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable reader-based decoder (default).

pub mod avec;
pub mod sans;
