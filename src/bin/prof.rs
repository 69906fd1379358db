use fgk_flex::compress;
use fgk_flex::decompress;

/// text-like input, lowercase letters and spaces dominate
fn get_test_data(len: usize) -> Vec<u8> {
    let mut state: u32 = 0x9e37_79b9;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            match state % 10 {
                0..=1 => b' ',
                2..=8 => b'a' + (state >> 8) as u8 % 26,
                _ => (state >> 16) as u8,
            }
        })
        .collect()
}

fn main() -> fgk_flex::Result<()> {
    let input = get_test_data(66_000);
    let mut len = 0;
    for _ in 0..10 {
        let compressed = compress(&input)?;
        len += compressed.len();
        let decompressed = decompress(&compressed)?;
        assert_eq!(decompressed.len(), input.len());
    }
    println!("{:?}", len);
    Ok(())
}
