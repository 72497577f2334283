#![allow(dead_code)]

use std::{io::Cursor, path::PathBuf};

use bitstream_io::{BigEndian, BitRead, BitReader};
use indexmap::IndexMap;
use lzw12::Codeword;

/// Test-only encoder, producing codewords for a decoder with a table of `table_size` entries.
///
/// It tracks the decoder's table rather than keeping its own, so resets happen exactly where the
/// decoder expects them. Duplicated strings keep their first codeword, which is why the index
/// length and the table length are tracked separately.
pub struct ReferenceEncoder {
    table_size: usize,
    entries: IndexMap<Vec<u8>, Codeword>,
    len: usize,
}

impl ReferenceEncoder {
    pub fn new(table_size: usize) -> Self {
        let entries = (0..=u8::MAX).map(|i| (vec![i], i as Codeword)).collect();
        Self {
            table_size,
            entries,
            len: 256,
        }
    }

    fn append(&mut self, entry: Vec<u8>) {
        if self.len >= self.table_size {
            self.entries.truncate(256);
            self.len = 256;
        }

        let code = self.len as Codeword;
        self.entries.entry(entry).or_insert(code);
        self.len += 1;
    }

    pub fn encode(mut self, data: &[u8]) -> Vec<Codeword> {
        let mut codewords = vec![];
        let mut previous: Option<Vec<u8>> = None;
        let mut position = 0;

        while position < data.len() {
            // The one entry the decoder can resolve before learning it.
            let pending = previous
                .as_ref()
                .filter(|_| self.len < self.table_size)
                .map(|previous| {
                    let mut pending = previous.clone();
                    pending.push(previous[0]);
                    pending
                });

            let mut best = (data[position] as Codeword, 1);
            let mut length = 2;
            while position + length <= data.len() {
                let candidate = &data[position..position + length];
                if let Some(&code) = self.entries.get(candidate) {
                    best = (code, length);
                } else if pending.as_deref() == Some(candidate) {
                    best = (self.len as Codeword, length);
                } else if !pending
                    .as_deref()
                    .map_or(false, |pending| pending.starts_with(candidate))
                {
                    break;
                }
                length += 1;
            }

            let (code, length) = best;
            let string = data[position..position + length].to_vec();
            if let Some(mut entry) = previous.take() {
                entry.push(string[0]);
                self.append(entry);
            }

            codewords.push(code);
            previous = Some(string);
            position += length;
        }

        codewords
    }
}

/// Packs codewords two per three bytes, with an odd last codeword padded to 16 bits.
pub fn pack(codewords: &[Codeword]) -> Vec<u8> {
    let mut packed = Vec::with_capacity(codewords.len() * 3 / 2 + 2);

    let mut pairs = codewords.chunks_exact(2);
    for pair in &mut pairs {
        let (first, second) = (pair[0], pair[1]);
        packed.push((first >> 4) as u8);
        packed.push(((first & 0x0f) << 4 | second >> 8) as u8);
        packed.push(second as u8);
    }
    if let [last] = pairs.remainder() {
        packed.extend_from_slice(&last.to_be_bytes());
    }

    packed
}

/// Unpacks `data` the slow way, with a generic bit reader.
pub fn unpack(data: &[u8]) -> Vec<Codeword> {
    let total_bits = data.len() * 8;
    let packed = (total_bits / 12).saturating_sub(1);
    let padded_tail = total_bits % 12 != 0 && total_bits >= 16;

    let mut reader = BitReader::endian(Cursor::new(data), BigEndian);
    let mut codewords: Vec<Codeword> = (0..packed)
        .map(|_| reader.read::<u16>(12).expect("Enough bits for every packed codeword"))
        .collect();

    if padded_tail {
        let start = packed * 12 / 8;
        codewords.push(u16::from_be_bytes([data[start], data[start + 1]]));
    }

    codewords
}

pub fn asset(file_name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("Root folder not found")
        .join("test-assets")
        .join(file_name)
}
