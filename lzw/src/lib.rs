//! Fixed 12 bit LZW decoder.
//!
//! This crate decodes the original LZW variation, where every codeword is 12 bits wide and the
//! symbol table starts over once it holds 4096 entries. There are no clear or end codes: the
//! length of the packed data is the only thing telling the reader where the stream ends.
//!
//! Decoding happens in two steps, both lazy:
//! * [CodewordReader] turns raw bytes into codewords.
//! * [Decoder] turns codewords into decoded strings, one string per codeword.
//!
//! It works with any [std::io::Read] and [std::io::Write].
//!
//! # Examples
//!
//! ```
//! use lzw12::decoder::{Decoder, DecodingError, FixedDecoder};
//!
//! fn main() -> Result<(), DecodingError> {
//!     let codewords: [u16; 5] = [0x41, 0x100, 0x101, 0x102, 0x103];
//!     let decoded = Decoder::new(codewords).decode_to_vec()?;
//!
//!     assert_eq!(decoded, b"AAAAAAAAAAAAAAA");
//!
//!     // 0x041 and 0x042 packed in three bytes, then 0x043 padded to 16 bits.
//!     let packed = [0x04, 0x10, 0x42, 0x00, 0x43];
//!     let decoded = FixedDecoder::decode_to_vec(&packed)?;
//!
//!     assert_eq!(decoded, b"ABC");
//!     Ok(())
//! }
//! ```

pub mod decoder;
pub mod reader;
pub mod table;

pub use decoder::{Decoder, DecodingError, FixedDecoder, IntoCodeword, Malformed};
pub use reader::CodewordReader;
pub use table::SymbolTable;

/// An index in the symbol table, as found in the compressed stream.
pub type Codeword = u16;

/// Width of a packed codeword.
pub const CODEWORD_BITS: u64 = 12;

/// Number of entries in a fresh symbol table: one per byte value.
pub const SINGLE_BYTE_ENTRIES: usize = 256;

/// The symbol table capacity used unless told otherwise. 12 bits address 4096 entries.
pub const DEFAULT_TABLE_SIZE: usize = 1 << CODEWORD_BITS;
