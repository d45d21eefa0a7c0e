#![cfg(feature = "std")]

use std::ops::ControlFlow;
use std::path::Path;

use csv::ReaderBuilder;
use reflow::avec::Receive;

#[test]
fn decode_slice_blink() {
    const PATH: &str = "fixtures/blink.hex";
    let data = std::fs::read(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    reflow::avec::decode_slice(&data, &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_reader_blink() {
    const PATH: &str = "fixtures/blink.hex";
    let mut file = std::fs::File::open(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    reflow::avec::decode_reader(&mut file, &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_slice_loader() {
    const PATH: &str = "fixtures/loader.hex";
    let data = std::fs::read(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    reflow::avec::decode_slice(&data, &mut validator).unwrap();
    assert_eq!(validator.2, Some((0x0010, 0x0200)));
    validator.finish();
}

#[test]
fn decode_reader_loader() {
    const PATH: &str = "fixtures/loader.hex";
    let mut file = std::fs::File::open(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    reflow::avec::decode_reader(&mut file, &mut validator).unwrap();
    assert_eq!(validator.2, Some((0x0010, 0x0200)));
    validator.finish();
}

#[test]
fn decode_slice_truncated() {
    let err = reflow::avec::decode_slice(b":0300300002", &mut Ignore).unwrap_err();
    assert!(matches!(err, reflow::avec::slice::Error::EndOfSlice));
}

#[test]
fn decode_reader_truncated() {
    let mut reader = &b":0300300002"[..];
    let err = reflow::avec::decode_reader(&mut reader, &mut Ignore).unwrap_err();
    assert!(matches!(err, reflow::avec::reader::Error::EndOfReader));
}

struct Ignore;

impl Receive for Ignore {}

struct Validator(Vec<(u32, u8)>, usize, Option<(u16, u16)>);

impl Validator {
    fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().with_extension("csv");

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();

        let expected = reader
            .records()
            .map(|r| {
                let r = r.unwrap();
                (r[0].parse().unwrap(), r[1].parse().unwrap())
            })
            .collect();

        Self(expected, 0, None)
    }

    fn finish(self) {
        assert_eq!(self.1, self.0.len());
    }
}

impl Receive for Validator {
    fn data(&mut self, address: u32, value: u8) -> ControlFlow<()> {
        assert_eq!(self.0.get(self.1).copied(), Some((address, value)));
        self.1 += 1;
        ControlFlow::Continue(())
    }

    fn start_segment(&mut self, cs: u16, ip: u16) {
        self.2 = Some((cs, ip));
    }
}
