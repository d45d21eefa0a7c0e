//! States processing the fixed-width fields of a record.

use either::Either::{self, Left, Right};

use super::{data::Payload, digit, mark::Mark};

/// State token to decode the declared payload byte count.
#[derive(Debug)]
pub struct Count {
    pub(super) remaining: u8,
    pub(super) value: u16,
}

impl Count {
    /// Transition to another state by inserting one hexadecimal digit.
    ///
    /// Returns the declared payload length and a successor state token once
    /// both digits have been received.
    pub fn advance(self, d: u8) -> Either<Count, (u8, Offset)> {
        let remaining = self.remaining - 1;
        let value = digit::insert(self.value, d, remaining);

        if remaining == 0 {
            Right((
                value as u8,
                Offset {
                    count: value as u8,
                    remaining: 4,
                    value: 0,
                },
            ))
        } else {
            Left(Count { remaining, value })
        }
    }
}

/// State token to decode the 16-bit load offset.
#[derive(Debug)]
pub struct Offset {
    pub(super) count: u8,
    pub(super) remaining: u8,
    pub(super) value: u16,
}

impl Offset {
    /// Transition to another state by inserting one hexadecimal digit.
    ///
    /// Returns the load offset and a successor state token once all four
    /// digits have been received.
    pub fn advance(self, d: u8) -> Either<Offset, (u16, Kind)> {
        let remaining = self.remaining - 1;
        let value = digit::insert(self.value, d, remaining);

        if remaining == 0 {
            Right((
                value,
                Kind {
                    count: self.count,
                    remaining: 2,
                    value: 0,
                },
            ))
        } else {
            Left(Offset {
                count: self.count,
                remaining,
                value,
            })
        }
    }
}

/// State token to decode the record type code.
pub struct Kind {
    pub(super) count: u8,
    pub(super) remaining: u8,
    pub(super) value: u16,
}

impl Kind {
    /// Transition to another state by inserting one hexadecimal digit.
    ///
    /// Returns the raw type code and a successor state token once both
    /// digits have been received: the payload, or directly the checksum for
    /// a record that declared no payload bytes.
    pub fn advance(self, d: u8) -> Either<Kind, (u8, Either<Payload, Check>)> {
        let remaining = self.remaining - 1;
        let value = digit::insert(self.value, d, remaining);

        if remaining == 0 {
            let successor = if self.count > 0 {
                Left(Payload {
                    remaining: u16::from(self.count) * 2,
                    value: 0,
                })
            } else {
                Right(Check {
                    remaining: 2,
                    value: 0,
                })
            };

            Right((value as u8, successor))
        } else {
            Left(Kind {
                count: self.count,
                remaining,
                value,
            })
        }
    }
}

/// State token to decode the declared checksum closing a record.
#[derive(Debug)]
pub struct Check {
    pub(super) remaining: u8,
    pub(super) value: u16,
}

impl Check {
    /// Transition to another state by inserting one hexadecimal digit.
    ///
    /// Returns the declared checksum and the mark token for the next record
    /// once both digits have been received. The transition back to the mark
    /// is unconditional; comparing the declared checksum against a running
    /// sum is the caller's responsibility (see [`super::check`]).
    pub fn advance(self, d: u8) -> Either<Check, (u8, Mark)> {
        let remaining = self.remaining - 1;
        let value = digit::insert(self.value, d, remaining);

        if remaining == 0 {
            Right((value as u8, Mark))
        } else {
            Left(Check { remaining, value })
        }
    }
}
