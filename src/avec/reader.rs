//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::io::Read;

use thiserror::Error;

use super::{Receive, Session, Step, session};

extern crate std;

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// An error from the decode session.
    #[error(transparent)]
    Record(#[from] session::Error),
    /// Unexpectedly reached the end of the reader.
    #[error("Unexpectedly reached the end of the reader within a record.")]
    EndOfReader,
}

/// Decode records from a reader of an image, publishing to a receiver.
///
/// Runs a checksum-validating [`Session`] until the image's end-of-file
/// record, the receiver breaking off, or the reader running dry, whichever
/// comes first. Bytes are requested one at a time; wrap slow readers in a
/// [`std::io::BufReader`].
///
/// This method is also re-exported as `reflow::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(r: &mut impl Read, o: &mut impl Receive) -> Result<(), Error> {
    let mut session = Session::new();

    for byte in r.bytes() {
        match session.put(byte?, o)? {
            Step::Continue => {}
            Step::Halt | Step::End => return Ok(()),
        }
    }

    if !session.is_idle() {
        Err(Error::EndOfReader)?;
    }

    Ok(())
}
