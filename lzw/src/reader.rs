//! Unpacking of 12 bit codewords.
//!
//! Codewords are packed two per three bytes, most significant bits first:
//!
//! ```text
//! 0xAB 0xCD 0xEF -> 0xABC 0xDEF
//! ```
//!
//! When the bit count of the stream isn't a multiple of 12, the last codeword is not packed but
//! padded to 16 bits, so that the stream still ends on a byte boundary.

use std::{
    fs::File,
    io::{BufReader, ErrorKind, Read},
    iter::FusedIterator,
    path::Path,
};

use crate::{
    decoder::{DecodingError, Malformed},
    Codeword, CODEWORD_BITS,
};

const READ_BUFFER_SIZE: usize = 8 * 1024;

/// Reads 12 bit codewords out of a byte source of known length.
///
/// The reader is an [Iterator] over the codewords. It stops after the last codeword, and drops the
/// underlying source at that point.
pub struct CodewordReader<R>
where
    R: Read,
{
    read: Option<BufReader<R>>,
    byte_len: u64,
    consumed: u64,
    window: [u8; 2],
    read_buffer: [u8; 1],
    // Counts from 1, the last packed codeword is at `whole_codewords - 1`.
    count: u64,
    whole_codewords: u64,
    padded_tail: bool,
    finished: bool,
}

impl<R> CodewordReader<R>
where
    R: Read,
{
    /// Wraps `read`, which must hold exactly `byte_len` bytes.
    ///
    /// # Errors
    ///
    /// The first two bytes are read right away, so this can fail on an [std::io::Error], or if
    /// `read` holds less than the declared length.
    pub fn new(read: R, byte_len: u64) -> Result<Self, DecodingError> {
        let total_bits = byte_len.saturating_mul(8);
        let whole_codewords = total_bits / CODEWORD_BITS;
        let padded_tail = total_bits % CODEWORD_BITS != 0 && total_bits >= 16;

        let mut reader = Self {
            read: Some(BufReader::with_capacity(READ_BUFFER_SIZE, read)),
            byte_len,
            consumed: 0,
            window: [0; 2],
            read_buffer: [0; 1],
            count: 1,
            whole_codewords,
            padded_tail,
            finished: false,
        };

        if byte_len < 2 {
            reader.finish();
        } else {
            reader.window = [reader.next_byte()?, reader.next_byte()?];
        }

        Ok(reader)
    }

    /// The number of codewords the reader produces in total, if the source is as long as declared.
    pub fn codeword_count(&self) -> u64 {
        self.whole_codewords.saturating_sub(1) + self.padded_tail as u64
    }

    /// The declared length of the source, in bytes.
    pub fn byte_len(&self) -> u64 {
        self.byte_len
    }

    fn remaining(&self) -> u64 {
        if self.finished {
            0
        } else {
            self.whole_codewords.saturating_sub(self.count) + self.padded_tail as u64
        }
    }

    fn finish(&mut self) {
        self.finished = true;
        self.read = None;
    }

    fn truncated(&self) -> DecodingError {
        DecodingError::MalformedInput(Malformed::TruncatedSource {
            expected: self.byte_len,
            actual: self.consumed,
        })
    }

    fn next_byte(&mut self) -> Result<u8, DecodingError> {
        let result = match self.read.as_mut() {
            Some(read) => read.read_exact(&mut self.read_buffer[..]),
            None => Err(ErrorKind::UnexpectedEof.into()),
        };

        match result {
            Ok(()) => {
                self.consumed += 1;
                Ok(self.read_buffer[0])
            }
            Err(error) if error.kind() == ErrorKind::UnexpectedEof => Err(self.truncated()),
            Err(error) => Err(error.into()),
        }
    }

    fn next_packed(&mut self) -> Result<Codeword, DecodingError> {
        let [first, second] = self.window;

        let codeword = if self.count & 1 == 1 {
            // From 0xAB 0xC? to 0xABC.
            let codeword = (first as u16) << 4 | (second as u16) >> 4;
            self.window = [second, self.next_byte()?];
            codeword
        } else {
            // From 0x?A 0xBC to 0xABC.
            let codeword = ((first & 0x0f) as u16) << 8 | second as u16;
            let first = self.next_byte()?;
            let second = self.next_byte()?;
            self.window = [first, second];
            codeword
        };

        self.count += 1;
        Ok(codeword)
    }
}

impl CodewordReader<File> {
    /// Opens the file at `path`. Its size, from the file metadata, is the declared length.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DecodingError> {
        let file = File::open(path)?;
        let byte_len = file.metadata()?.len();
        Self::new(file, byte_len)
    }
}

impl<'a> CodewordReader<&'a [u8]> {
    pub fn from_slice(data: &'a [u8]) -> Result<Self, DecodingError> {
        Self::new(data, data.len() as u64)
    }
}

impl<R> Iterator for CodewordReader<R>
where
    R: Read,
{
    type Item = Result<Codeword, DecodingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if self.count < self.whole_codewords {
            let codeword = self.next_packed();
            if codeword.is_err() {
                self.finish();
            }
            return Some(codeword);
        }

        let tail = self
            .padded_tail
            .then(|| u16::from_be_bytes(self.window));
        self.finish();
        tail.map(Ok)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, usize::try_from(self.remaining()).ok())
    }
}

impl<R> FusedIterator for CodewordReader<R> where R: Read {}
