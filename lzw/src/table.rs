//! The symbol table of the decoder.

use crate::{decoder::DecodingError, Codeword, DEFAULT_TABLE_SIZE, SINGLE_BYTE_ENTRIES};

// Idea: have one big vec of u8. Store the strings there, and keep a vec of [start, end) for each word.
#[derive(Debug, Clone, Copy)]
struct Word {
    start: usize,
    end: usize,
}

/// Maps codewords to the strings they stand for.
///
/// Entries 0 to 255 are the single bytes of the same value. Anything after that is learned while
/// decoding, and discarded when the table runs out of room.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    capacity: usize,
    strings: Vec<u8>,
    words: Vec<Word>,
    resets: u64,
}

impl SymbolTable {
    /// Creates a table that can hold up to `capacity` entries.
    ///
    /// # Errors
    ///
    /// Fails with [DecodingError::InvalidTableSize] if `capacity` can't even hold the 256 single
    /// byte entries.
    pub fn new(capacity: usize) -> Result<Self, DecodingError> {
        if capacity < SINGLE_BYTE_ENTRIES {
            return Err(DecodingError::InvalidTableSize(capacity));
        }

        Ok(Self::build(capacity))
    }

    fn build(capacity: usize) -> Self {
        let strings = (0..=u8::MAX).collect();
        // Codewords can't address more than this, whatever the capacity.
        let mut words = Vec::with_capacity(capacity.min(DEFAULT_TABLE_SIZE));
        words.extend((0..SINGLE_BYTE_ENTRIES).map(|i| Word {
            start: i,
            end: i + 1,
        }));

        Self {
            capacity,
            strings,
            words,
            resets: 0,
        }
    }

    /// Drops every learned entry, leaving only the single byte ones.
    pub fn reset(&mut self) {
        self.strings.truncate(SINGLE_BYTE_ENTRIES);
        self.words.truncate(SINGLE_BYTE_ENTRIES);
        self.resets += 1;
    }

    /// Appends `entry` as the next codeword. A full table is reset first.
    pub fn append(&mut self, entry: &[u8]) {
        if self.words.len() >= self.capacity {
            self.reset();
        }

        let start = self.strings.len();
        self.strings.extend_from_slice(entry);
        self.words.push(Word {
            start,
            end: self.strings.len(),
        });
    }

    /// The string for `codeword`, or `None` if the table doesn't hold that entry yet.
    #[inline]
    pub fn lookup(&self, codeword: Codeword) -> Option<&[u8]> {
        self.words
            .get(codeword as usize)
            .map(|word| &self.strings[word.start..word.end])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Never true: the single byte entries survive resets.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// How many times the table was reset since it was created.
    pub fn resets(&self) -> u64 {
        self.resets
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::build(DEFAULT_TABLE_SIZE)
    }
}
