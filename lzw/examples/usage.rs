use anyhow::Result;
use lzw12::{CodewordReader, Decoder, FixedDecoder};

const LOREM_IPSUM: &[u8] = include_bytes!("../../test-assets/lorem_ipsum.txt");
const LOREM_IPSUM_ENCODED: &[u8] = include_bytes!("../../test-assets/lorem_ipsum.z");

fn main() -> Result<()> {
    let decompressed = FixedDecoder::decode_to_vec(LOREM_IPSUM_ENCODED)?;

    assert_eq!(decompressed, LOREM_IPSUM);

    // Or one string at a time.
    let reader = CodewordReader::from_slice(LOREM_IPSUM_ENCODED)?;
    let mut longest = vec![];
    for string in Decoder::new(reader) {
        let string = string?;
        if string.len() > longest.len() {
            longest = string;
        }
    }

    println!(
        "Longest decoded string: {:?}",
        String::from_utf8_lossy(&longest)
    );

    Ok(())
}
