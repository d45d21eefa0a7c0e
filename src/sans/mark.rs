//! State hunting for the record mark.

use either::Either::{self, Left, Right};

use super::field::Count;

/// The byte beginning every record.
pub const MARK: u8 = b':';

/// State token awaiting the start-of-record mark.
#[derive(Debug)]
pub struct Mark;

impl Mark {
    /// Transition to another state by examining one byte.
    ///
    /// Any byte other than the mark is ignored, returning this token
    /// unchanged. Upon the mark, returns the byte count token of a fresh
    /// record; callers should reset their per-record accumulators here.
    pub fn advance(self, r: u8) -> Either<Mark, Count> {
        if r == MARK {
            Right(Count {
                remaining: 2,
                value: 0,
            })
        } else {
            Left(self)
        }
    }
}
