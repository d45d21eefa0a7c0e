//! Internal finite-state machine for implementing decoders.
//!
//! This module is intended for advanced applications that need fine control
//! over decoder internals. See [`crate::avec`] for implementations covering
//! common decoding patterns.
//!
//! # Architecture
//!
//! All states are represented by a small, non-copy token. Once a byte is
//! ready, transition to another state by calling the token's `advance`
//! method. This will return a successor state token, along with any
//! completed field value. A record cycles through its tokens in fixed order:
//! mark, byte count, load offset, record kind, zero or more payload bytes,
//! checksum, and back to the mark.
//!
//! Field digits are packed most-significant nibble first, each digit landing
//! at the nibble position given by the token's live down-counter, so one
//! generic insertion routine (in [`digit`]) serves every field width.
//!
//! Only the initial state, re-exported for convenience as [`Decoder`], can
//! be constructed.
//!
//! This architecture enables the compiler and type system to guide
//! applications toward a correct implementation. However, some areas of the
//! decoding process are not represented in the finite-state machine and must
//! be carefully written:
//!
//! - Skipping carriage returns and line feeds, and rejecting bytes outside
//! the input alphabet, before they reach a token. Helpers are provided in
//! the [`digit`] module; the `advance` methods past the mark consume digit
//! *values* (0–15), not raw characters.
//!
//! - Accumulating the record checksum from completed field values, and
//! comparing it against the declared checksum field. A helper function is
//! provided in the [`check`] module.
//!
//! - Interpreting completed fields: combining extension records into a base
//! address, and addressing payload bytes. See [`crate::avec::Session`].
//!
//! Implementers are recommended to begin by studying and modifying the
//! session in the [`crate::avec`] module.

pub mod check;
pub mod data;
pub mod digit;
pub mod field;
pub mod mark;

/// Entrypoint to the finite-state machine.
pub type Decoder = mark::Mark;
