//! State processing record payloads.

use either::Either::{self, Left, Right};

use super::{digit, field::Check};

/// State token to decode the record payload, one byte per digit pair.
#[derive(Debug)]
pub struct Payload {
    pub(super) remaining: u16,
    pub(super) value: u16,
}

impl Payload {
    /// Transition to another state by inserting one hexadecimal digit.
    ///
    /// Returns the completed payload byte at every second digit, and the
    /// checksum state token once all `2 × byte_count` digits have been
    /// received. A multi-byte payload therefore yields one value per byte,
    /// not one value for the whole field.
    pub fn advance(self, d: u8) -> (Option<u8>, Either<Payload, Check>) {
        let remaining = self.remaining - 1;
        let position = (remaining % 2) as u8;
        let value = digit::insert(self.value, d, position);

        let complete = if position == 0 { Some(value as u8) } else { None };
        let value = if position == 0 { 0 } else { value };

        let successor = if remaining == 0 {
            Right(Check {
                remaining: 2,
                value: 0,
            })
        } else {
            Left(Payload { remaining, value })
        };

        (complete, successor)
    }
}
