use std::{
    io::{Read, Write},
    iter::FusedIterator,
    mem,
    path::Path,
};

use crate::{reader::CodewordReader, table::SymbolTable, Codeword, DEFAULT_TABLE_SIZE};

#[derive(Debug, thiserror::Error)]
pub enum DecodingError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("no codeword to decode")]
    EmptyInput,
    #[error("malformed input: {0}")]
    MalformedInput(Malformed),
    #[error("table size is {0}, it should be at least 256")]
    InvalidTableSize(usize),
}

/// What exactly is wrong with a malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Malformed {
    #[error("first codeword {0:#x} is not a single byte entry")]
    FirstCodeword(Codeword),
    #[error("source ended after {actual} bytes, {expected} were expected")]
    TruncatedSource { expected: u64, actual: u64 },
}

/// Anything the [Decoder] accepts as a codeword.
///
/// Plain codewords can't fail, while the ones coming out of a [CodewordReader] carry the read
/// errors along.
pub trait IntoCodeword {
    fn into_codeword(self) -> Result<Codeword, DecodingError>;
}

impl IntoCodeword for Codeword {
    #[inline]
    fn into_codeword(self) -> Result<Codeword, DecodingError> {
        Ok(self)
    }
}

impl IntoCodeword for &Codeword {
    #[inline]
    fn into_codeword(self) -> Result<Codeword, DecodingError> {
        Ok(*self)
    }
}

impl IntoCodeword for Result<Codeword, DecodingError> {
    #[inline]
    fn into_codeword(self) -> Result<Codeword, DecodingError> {
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Expanding,
    Done,
}

/// Expands a sequence of codewords, one decoded string per codeword.
///
/// The decoder is an [Iterator] over the decoded strings. Stopping early is fine, there is nothing
/// to clean up. After an error, the decoder stops.
pub struct Decoder<I> {
    codewords: I,
    table: SymbolTable,
    // The previously decoded string.
    string: Vec<u8>,
    scratch: Vec<u8>,
    state: State,
}

impl<I> Decoder<I>
where
    I: Iterator,
    I::Item: IntoCodeword,
{
    /// Creates a decoder with a table of [DEFAULT_TABLE_SIZE] entries.
    pub fn new(codewords: impl IntoIterator<IntoIter = I>) -> Self {
        Self::with_table(codewords, SymbolTable::default())
    }

    /// Creates a decoder with a table of `table_size` entries.
    ///
    /// # Errors
    ///
    /// Fails with [DecodingError::InvalidTableSize] if `table_size` is less than 256.
    pub fn with_table_size(
        codewords: impl IntoIterator<IntoIter = I>,
        table_size: usize,
    ) -> Result<Self, DecodingError> {
        let table = SymbolTable::new(table_size)?;
        Ok(Self::with_table(codewords, table))
    }

    /// Creates a decoder around an already built `table`.
    pub fn with_table(codewords: impl IntoIterator<IntoIter = I>, table: SymbolTable) -> Self {
        let codewords = codewords.into_iter();
        Self {
            codewords,
            table,
            string: Vec::new(),
            scratch: Vec::new(),
            state: State::Start,
        }
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    /// Decodes everything left, writing it into `into`.
    ///
    /// Returns the amount of bytes written.
    ///
    /// # Errors
    ///
    /// This function can fail on an [std::io::Error], on empty or malformed input.
    pub fn decode_to<W: Write>(mut self, into: W) -> Result<u64, DecodingError> {
        let mut into = into;
        let mut written = 0;

        while let Some(step) = self.advance() {
            step?;
            into.write_all(&self.string)?;
            written += self.string.len() as u64;
        }
        into.flush()?;

        Ok(written)
    }

    /// Decodes everything left into a new [Vec<u8>].
    pub fn decode_to_vec(self) -> Result<Vec<u8>, DecodingError> {
        let mut decoded = vec![];
        self.decode_to(&mut decoded)?;
        Ok(decoded)
    }

    fn advance(&mut self) -> Option<Result<(), DecodingError>> {
        let step = match self.state {
            State::Done => return None,
            State::Start => Some(self.start()),
            State::Expanding => self
                .codewords
                .next()
                .map(|codeword| self.expand(codeword)),
        };

        match step {
            Some(Ok(())) => {}
            Some(Err(_)) | None => self.state = State::Done,
        }
        step
    }

    fn start(&mut self) -> Result<(), DecodingError> {
        let codeword = self
            .codewords
            .next()
            .ok_or(DecodingError::EmptyInput)?
            .into_codeword()?;

        // The table is fresh, only single bytes can be found.
        let string = self
            .table
            .lookup(codeword)
            .ok_or(DecodingError::MalformedInput(Malformed::FirstCodeword(
                codeword,
            )))?;
        self.string.clear();
        self.string.extend_from_slice(string);

        self.state = State::Expanding;
        Ok(())
    }

    fn expand(&mut self, codeword: I::Item) -> Result<(), DecodingError> {
        let codeword = codeword.into_codeword()?;

        match self.table.lookup(codeword) {
            Some(found) => {
                // Learn the previous string followed by the first byte of this one.
                self.scratch.clear();
                self.scratch.extend_from_slice(found);
                self.string.push(self.scratch[0]);
                self.table.append(&self.string);
                mem::swap(&mut self.string, &mut self.scratch);
            }
            None => {
                // The codeword is the very entry we are about to learn: the previous string
                // followed by its own first byte.
                let first = self.string[0];
                self.string.push(first);
                self.table.append(&self.string);
            }
        }

        Ok(())
    }
}

impl<I> Iterator for Decoder<I>
where
    I: Iterator,
    I::Item: IntoCodeword,
{
    type Item = Result<Vec<u8>, DecodingError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
            .map(|step| step.map(|()| self.string.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            State::Done => (0, Some(0)),
            // An empty source still yields its error.
            State::Start => (1, self.codewords.size_hint().1.map(|upper| upper.max(1))),
            State::Expanding => (0, self.codewords.size_hint().1),
        }
    }
}

impl<I> FusedIterator for Decoder<I>
where
    I: Iterator,
    I::Item: IntoCodeword,
{
}

/// Decoder for files written by 12 bit LZW compressors.
pub struct FixedDecoder;

impl FixedDecoder {
    /// Decode 12 bit LZW, with a table of [DEFAULT_TABLE_SIZE] entries.
    ///
    /// # Arguments
    ///
    /// * `data` - The packed codewords.
    /// * `byte_len` - The length of `data`, in bytes. It decides where the codewords end.
    /// * `into` - The output where decoded data should be written.
    ///
    /// # Errors
    ///
    /// This function can fail on an [std::io::Error], on empty or malformed input.
    ///
    /// # Examples
    /// ```
    /// use lzw12::decoder::{DecodingError, FixedDecoder};
    ///
    /// fn main() -> Result<(), DecodingError> {
    ///     let data: [u8; 5] = [0x04, 0x11, 0x00, 0x01, 0x01];
    ///     let mut output = vec![];
    ///
    ///     FixedDecoder::decode(&data[..], data.len() as u64, &mut output)?;
    ///
    ///     assert_eq!(output, b"AAAAAA");
    ///     Ok(())
    /// }
    /// ```
    pub fn decode<R: Read, W: Write>(
        data: R,
        byte_len: u64,
        into: W,
    ) -> Result<u64, DecodingError> {
        Self::decode_with_table_size(data, byte_len, into, DEFAULT_TABLE_SIZE)
    }

    /// Decode 12 bit LZW, with a table of `table_size` entries.
    ///
    /// # Errors
    ///
    /// This function can fail on an [std::io::Error], on empty or malformed input, or if
    /// `table_size` is less than 256. The table size is checked before anything is read.
    pub fn decode_with_table_size<R: Read, W: Write>(
        data: R,
        byte_len: u64,
        into: W,
        table_size: usize,
    ) -> Result<u64, DecodingError> {
        let table = SymbolTable::new(table_size)?;
        let reader = CodewordReader::new(data, byte_len)?;
        Decoder::with_table(reader, table).decode_to(into)
    }

    /// Decode 12 bit LZW from memory.
    /// Convenient wrapper that creates a [Vec<u8>] under the hood.
    pub fn decode_to_vec(data: &[u8]) -> Result<Vec<u8>, DecodingError> {
        Self::decode_to_vec_with_table_size(data, DEFAULT_TABLE_SIZE)
    }

    pub fn decode_to_vec_with_table_size(
        data: &[u8],
        table_size: usize,
    ) -> Result<Vec<u8>, DecodingError> {
        let mut decoded = vec![];
        Self::decode_with_table_size(data, data.len() as u64, &mut decoded, table_size)?;
        Ok(decoded)
    }

    /// Decode the 12 bit LZW file at `path`. The whole file is packed codewords, there is no header.
    pub fn decode_file<P: AsRef<Path>, W: Write>(path: P, into: W) -> Result<u64, DecodingError> {
        Self::decode_file_with_table_size(path, into, DEFAULT_TABLE_SIZE)
    }

    pub fn decode_file_with_table_size<P: AsRef<Path>, W: Write>(
        path: P,
        into: W,
        table_size: usize,
    ) -> Result<u64, DecodingError> {
        let table = SymbolTable::new(table_size)?;
        let reader = CodewordReader::open(path)?;
        Decoder::with_table(reader, table).decode_to(into)
    }
}
