//! Slice-based decoder implementation.

use thiserror::Error;

use super::{Receive, Session, Step, session};

/// Errors occurring while decoding from a slice.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the decode session.
    #[error(transparent)]
    Record(#[from] session::Error),
    /// Unexpectedly reached the end of the slice.
    #[error("Unexpectedly reached the end of the slice within a record.")]
    EndOfSlice,
}

/// Decode records from a slice of an image, publishing to a receiver.
///
/// Runs a checksum-validating [`Session`] until the image's end-of-file
/// record, the receiver breaking off, or the slice running out, whichever
/// comes first.
///
/// This method is also re-exported as `reflow::avec::decode_slice`.
pub fn decode(r: &[u8], o: &mut impl Receive) -> Result<(), Error> {
    let mut session = Session::new();

    for byte in r {
        match session.put(*byte, o)? {
            Step::Continue => {}
            Step::Halt | Step::End => return Ok(()),
        }
    }

    if !session.is_idle() {
        Err(Error::EndOfSlice)?;
    }

    Ok(())
}
