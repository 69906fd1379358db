/*!

Bitstream handles the writing and reading of single bits and small bit groups. Bits are
written and read in forward order, MSB-first, so the first bit written is the highest bit
of the first byte.

The end of the stream is marked by a single `1` bit after the last data bit, followed by
zero padding up to the byte boundary. The reader finds the exact number of data bits from
the last byte, no length needs to be stored elsewhere.

Some bit hacks are appplied here, it can be helpful to understand these
Bit Operations:

number of bits  >> 3 == number of bytes
number of bits  & 7 == bits in the last, incomplete byte

*/

mod error;

pub use error::BitstreamError;

pub type BitContainer = u64;
pub const BIT_CONTAINER_BYTES: usize = core::mem::size_of::<BitContainer>();
pub const NUM_BITS_IN_BIT_CONTAINER: u32 = BIT_CONTAINER_BYTES as u32 * 8;

/// upper limit for a single `add_bits`/`read_bits` call
pub const MAX_BITS_PER_CALL: u32 = 32;

/// mask of the lowest `nb_bits` bits, works up to 63 bits
#[inline]
fn bit_mask(nb_bits: u32) -> BitContainer {
    debug_assert!(nb_bits < NUM_BITS_IN_BIT_CONTAINER);
    (1 << nb_bits) - 1
}

#[test]
fn test_bit_mask() {
    assert_eq!(bit_mask(0), 0);
    assert_eq!(bit_mask(1), 0b1);
    assert_eq!(bit_mask(3), 0b111);
    assert_eq!(bit_mask(32), u32::MAX as u64);
}

/// Writes bits MSB-first into a growing byte buffer.
///
/// Pending bits live in the low end of `bit_container`, complete bytes are flushed after
/// every add. After a flush at most 7 bits are pending.
#[derive(Debug, Clone, Default)]
pub struct BitCstream {
    data: Vec<u8>,
    bit_container: BitContainer,
    bit_pos: u32,
}

impl BitCstream {
    pub fn new() -> Self {
        BitCstream::default()
    }

    /// Adds the lowest `nb_bits` bits of `value`, highest of them first. Higher bits of
    /// `value` are ignored.
    #[inline]
    pub fn add_bits(&mut self, value: u32, nb_bits: u32) {
        debug_assert!(nb_bits <= MAX_BITS_PER_CALL);
        self.bit_container =
            (self.bit_container << nb_bits) | (value as BitContainer & bit_mask(nb_bits));
        self.bit_pos += nb_bits;
        self.flush_bits();
    }

    #[inline]
    pub fn add_bit(&mut self, bit: bool) {
        self.add_bits(bit as u32, 1);
    }

    /// number of data bits added so far
    #[inline]
    pub fn num_bits(&self) -> usize {
        self.data.len() * 8 + self.bit_pos as usize
    }

    #[inline]
    fn flush_bits(&mut self) {
        while self.bit_pos >= 8 {
            self.bit_pos -= 8;
            self.data.push((self.bit_container >> self.bit_pos) as u8);
        }
        self.bit_container &= bit_mask(self.bit_pos);
    }

    /// Adds the end mark, pads the last byte and returns the compressed data.
    pub fn finish_stream(mut self) -> Vec<u8> {
        self.add_bit(true);
        if self.bit_pos > 0 {
            let padding = 8 - self.bit_pos;
            self.data.push((self.bit_container << padding) as u8);
        }
        self.data
    }
}

/// Reads a stream written by [`BitCstream`], front to back.
#[derive(Debug, Clone)]
pub struct BitDStream<'a> {
    input: &'a [u8],
    /// next bit to read, 0 is the MSB of the first byte
    bit_pos: usize,
    /// position of the end mark, equal to the number of data bits
    end_pos: usize,
}

impl<'a> BitDStream<'a> {
    pub fn new(input: &'a [u8]) -> Result<Self, BitstreamError> {
        let last_byte = match input.last() {
            Some(&byte) if byte != 0 => byte,
            _ => return Err(BitstreamError::MissingEndMark),
        };
        // the end mark is the lowest set bit of the last byte
        let end_pos = input.len() * 8 - 1 - last_byte.trailing_zeros() as usize;
        Ok(BitDStream {
            input,
            bit_pos: 0,
            end_pos,
        })
    }

    /// `None` once all data bits are consumed
    #[inline]
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.bit_pos >= self.end_pos {
            return None;
        }
        let byte = self.input[self.bit_pos >> 3];
        let bit = (byte >> (7 - (self.bit_pos & 7))) & 1 == 1;
        self.bit_pos += 1;
        Some(bit)
    }

    /// Reads `nb_bits` bits as a number, first bit read is the highest.
    pub fn read_bits(&mut self, nb_bits: u32) -> Result<u32, BitstreamError> {
        debug_assert!(nb_bits <= MAX_BITS_PER_CALL);
        let available = self.bits_remaining();
        if nb_bits as usize > available {
            return Err(BitstreamError::UnexpectedEnd {
                requested: nb_bits as usize,
                available,
            });
        }
        let mut value: BitContainer = 0;
        let mut remaining = nb_bits;
        while remaining > 0 {
            let bit_in_byte = (self.bit_pos & 7) as u32;
            let take = remaining.min(8 - bit_in_byte);
            let byte = self.input[self.bit_pos >> 3] as BitContainer;
            let bits = (byte >> (8 - bit_in_byte - take)) & bit_mask(take);
            value = (value << take) | bits;
            self.bit_pos += take as usize;
            remaining -= take;
        }
        Ok(value as u32)
    }

    #[inline]
    pub fn bits_remaining(&self) -> usize {
        self.end_pos - self.bit_pos
    }

    /// number of bits consumed so far
    #[inline]
    pub fn position(&self) -> usize {
        self.bit_pos
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.bit_pos >= self.end_pos
    }
}
