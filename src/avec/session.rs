//! Byte-push decode session.

use core::{mem, ops::ControlFlow};

use either::Either::{Left, Right};
use thiserror::Error;

use crate::sans::{
    check::{compute_sum, expected},
    data, digit, field,
    mark::Mark,
};

use super::{Receive, RecordKind};

/// Errors signalled by [`Session::put`].
#[derive(Debug, Error)]
pub enum Error {
    /// A byte outside the input alphabet, or a non-digit where the current
    /// field expected hexadecimal digits. The machine is left untouched.
    #[error("Unexpected byte (0x{0:02X}) for the current field.")]
    InvalidInput(u8),
    /// Calculated and found checksum values do not match.
    #[error(
        "Calculated (0x{calculated:02X}) and found (0x{found:02X}) checksum values do not match."
    )]
    Checksum { found: u8, calculated: u8 },
}

/// The success result of feeding one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Keep feeding bytes.
    Continue,
    /// The receiver broke off decoding. The machine keeps its position, so
    /// feeding may also be resumed.
    Halt,
    /// An end-of-file record has been fully consumed and no further bytes
    /// are expected; subsequent bytes are not processed until
    /// [`Session::begin`].
    End,
}

/// Handling of the checksum field closing every record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Policy {
    /// Fail a record whose bytes do not sum to zero with
    /// [`Error::Checksum`].
    #[default]
    Validate,
    /// Publish mismatches through [`Receive::checksum_mismatch`] and keep
    /// decoding.
    Report,
}

/// Fields of the record being assembled, reset at every mark.
///
/// The byte count and the field value in flight live inside the current
/// state token; only what the interpreter needs outlives a field.
#[derive(Debug, Default)]
struct Record {
    offset: u16,
    kind: RecordKind,
    index: u8,
}

/// Address interpreter state persisting across records.
#[derive(Debug, Default)]
struct Interpreter {
    base: u32,
    scratch: u32,
    eof: bool,
}

impl Interpreter {
    fn mark(&mut self) {
        self.scratch = 0;
    }

    fn kind(&mut self, kind: RecordKind, o: &mut impl Receive) {
        if kind == RecordKind::EndOfFile {
            self.eof = true;
        }

        o.kind(kind);
    }

    fn data(&mut self, record: &mut Record, value: u8, o: &mut impl Receive) -> ControlFlow<()> {
        match record.kind {
            RecordKind::Data => {
                let address = self
                    .base
                    .wrapping_add(u32::from(record.offset))
                    .wrapping_add(u32::from(record.index));
                record.index += 1;

                o.data(address, value)
            }
            RecordKind::EndOfFile | RecordKind::Other(_) => ControlFlow::Continue(()),
            _ => {
                // Extension payloads arrive most-significant byte first.
                self.scratch = (self.scratch << 8) | u32::from(value);

                ControlFlow::Continue(())
            }
        }
    }

    fn complete(&mut self, record: &Record, o: &mut impl Receive) {
        match record.kind {
            RecordKind::ExtendedSegmentAddress => self.base = (self.scratch & 0xFFFF) << 4,
            RecordKind::ExtendedLinearAddress => self.base = (self.scratch & 0xFFFF) << 16,
            RecordKind::StartSegmentAddress => {
                o.start_segment((self.scratch >> 16) as u16, self.scratch as u16);
            }
            RecordKind::StartLinearAddress => o.start_linear(self.scratch),
            _ => {}
        }
    }
}

/// Storage for the current state token.
enum State {
    Mark(Mark),
    Count(field::Count),
    Offset(field::Offset),
    Kind(field::Kind),
    Payload(data::Payload),
    Check(field::Check),
    End,
}

/// An incremental decode session over one byte stream.
///
/// A session owns the current state token, the record being assembled, the
/// running checksum accumulator, and the address interpreter. Sessions share
/// no state; decode independent streams with independent sessions.
pub struct Session {
    state: State,
    record: Record,
    sum: u8,
    policy: Policy,
    interpreter: Interpreter,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session validating record checksums.
    pub fn new() -> Self {
        Self::with_policy(Policy::Validate)
    }

    /// Create a session with an explicit checksum policy.
    pub fn with_policy(policy: Policy) -> Self {
        Self {
            state: State::Mark(Mark),
            record: Record::default(),
            sum: 0,
            policy,
            interpreter: Interpreter::default(),
        }
    }

    /// Reset the machine, the record, and the interpreter, retaining the
    /// checksum policy.
    ///
    /// Call to reuse a session for another stream, or to re-arm one that
    /// reached [`Step::End`].
    pub fn begin(&mut self) {
        self.state = State::Mark(Mark);
        self.record = Record::default();
        self.sum = 0;
        self.interpreter = Interpreter::default();
    }

    /// Whether the machine is between records.
    ///
    /// A stream that ends while this is `false` was truncated mid-record.
    pub fn is_idle(&self) -> bool {
        matches!(self.state, State::Mark(_) | State::End)
    }

    /// Feed one byte, publishing completed values to the receiver.
    ///
    /// Carriage returns and line feeds are accepted, and otherwise ignored,
    /// anywhere. Any other byte outside the input alphabet, or a non-digit
    /// byte inside a field, yields [`Error::InvalidInput`] and leaves the
    /// machine exactly as it was; recovery is the caller's policy, the
    /// session never resynchronizes on its own. A record whose checksum
    /// does not verify yields [`Error::Checksum`] under [`Policy::Validate`],
    /// with the machine back at mark-hunting, and does not rebase later
    /// records.
    pub fn put(&mut self, r: u8, o: &mut impl Receive) -> Result<Step, Error> {
        if let State::End = self.state {
            return Ok(Step::End);
        }

        if r == b'\r' || r == b'\n' {
            return Ok(Step::Continue);
        }

        let (state, step) = match mem::replace(&mut self.state, State::End) {
            State::Mark(state) => {
                if digit::is_valid(r) {
                    match state.advance(r) {
                        Left(state) => (State::Mark(state), Ok(Step::Continue)),
                        Right(count) => {
                            self.record = Record::default();
                            self.sum = 0;
                            self.interpreter.mark();

                            (State::Count(count), Ok(Step::Continue))
                        }
                    }
                } else {
                    (State::Mark(state), Err(Error::InvalidInput(r)))
                }
            }
            State::Count(state) => match digit::value(r) {
                Some(d) => match state.advance(d) {
                    Left(state) => (State::Count(state), Ok(Step::Continue)),
                    Right((count, offset)) => {
                        self.sum = compute_sum(self.sum, &[count]);

                        (State::Offset(offset), Ok(Step::Continue))
                    }
                },
                None => (State::Count(state), Err(Error::InvalidInput(r))),
            },
            State::Offset(state) => match digit::value(r) {
                Some(d) => match state.advance(d) {
                    Left(state) => (State::Offset(state), Ok(Step::Continue)),
                    Right((offset, kind)) => {
                        self.sum = compute_sum(self.sum, &offset.to_be_bytes());
                        self.record.offset = offset;

                        (State::Kind(kind), Ok(Step::Continue))
                    }
                },
                None => (State::Offset(state), Err(Error::InvalidInput(r))),
            },
            State::Kind(state) => match digit::value(r) {
                Some(d) => match state.advance(d) {
                    Left(state) => (State::Kind(state), Ok(Step::Continue)),
                    Right((code, successor)) => {
                        self.sum = compute_sum(self.sum, &[code]);
                        let kind = RecordKind::from(code);
                        self.record.kind = kind;
                        self.interpreter.kind(kind, o);

                        let state = match successor {
                            Left(payload) => State::Payload(payload),
                            Right(check) => State::Check(check),
                        };

                        (state, Ok(Step::Continue))
                    }
                },
                None => (State::Kind(state), Err(Error::InvalidInput(r))),
            },
            State::Payload(state) => match digit::value(r) {
                Some(d) => {
                    let (value, successor) = state.advance(d);

                    let mut step = Step::Continue;
                    if let Some(value) = value {
                        self.sum = compute_sum(self.sum, &[value]);

                        if self.interpreter.data(&mut self.record, value, o).is_break() {
                            step = Step::Halt;
                        }
                    }

                    let state = match successor {
                        Left(payload) => State::Payload(payload),
                        Right(check) => State::Check(check),
                    };

                    (state, Ok(step))
                }
                None => (State::Payload(state), Err(Error::InvalidInput(r))),
            },
            State::Check(state) => match digit::value(r) {
                Some(d) => match state.advance(d) {
                    Left(state) => (State::Check(state), Ok(Step::Continue)),
                    Right((found, mark)) => self.close(found, mark, o),
                },
                None => (State::Check(state), Err(Error::InvalidInput(r))),
            },
            State::End => (State::End, Ok(Step::End)),
        };

        self.state = state;
        step
    }

    /// Close the record at its checksum field: verify the running sum,
    /// apply extension semantics, and choose the next state.
    fn close(
        &mut self,
        found: u8,
        mark: Mark,
        o: &mut impl Receive,
    ) -> (State, Result<Step, Error>) {
        let calculated = expected(self.sum);

        if found != calculated {
            match self.policy {
                Policy::Validate => {
                    return (State::Mark(mark), Err(Error::Checksum { found, calculated }));
                }
                Policy::Report => o.checksum_mismatch(found, calculated),
            }
        }

        self.interpreter.complete(&self.record, o);

        if self.interpreter.eof {
            (State::End, Ok(Step::End))
        } else {
            (State::Mark(mark), Ok(Step::Continue))
        }
    }
}
