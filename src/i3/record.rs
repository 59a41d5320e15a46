//! Single molecule record.

use byteorder::{ByteOrder, LittleEndian};

use super::format::{Field, OBJECT_DATA_SIZE, RECORD_SIZE};

/// One fixed-size detection record.
///
/// Stored as raw 32-bit words so integer slots round-trip bit-exact;
/// the typed accessors reinterpret a word as `f32` or `i32`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Record {
    words: [u32; OBJECT_DATA_SIZE],
}

impl Record {
    /// Create a record with every word zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode from the little-endian on-disk representation.
    pub fn from_bytes(bytes: &[u8; RECORD_SIZE]) -> Self {
        let mut words = [0u32; OBJECT_DATA_SIZE];
        LittleEndian::read_u32_into(bytes, &mut words);
        Self { words }
    }

    /// Encode to the little-endian on-disk representation.
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut bytes = [0u8; RECORD_SIZE];
        LittleEndian::write_u32_into(&self.words, &mut bytes);
        bytes
    }

    #[inline]
    pub fn word(&self, field: Field) -> u32 {
        self.words[field.index()]
    }

    #[inline]
    pub fn set_word(&mut self, field: Field, value: u32) {
        self.words[field.index()] = value;
    }

    /// Read a slot as a float.
    #[inline]
    pub fn float(&self, field: Field) -> f32 {
        f32::from_bits(self.word(field))
    }

    /// Write a slot as a float.
    #[inline]
    pub fn set_float(&mut self, field: Field, value: f32) {
        self.set_word(field, value.to_bits());
    }

    /// Read a slot as a signed integer.
    #[inline]
    pub fn int(&self, field: Field) -> i32 {
        self.word(field) as i32
    }

    /// Write a slot as a signed integer.
    #[inline]
    pub fn set_int(&mut self, field: Field, value: i32) {
        self.set_word(field, value as u32);
    }

    // Shorthands for the slots the traversal touches.

    #[inline]
    pub fn visited(&self) -> i32 {
        self.int(Field::Visited)
    }

    #[inline]
    pub fn set_visited(&mut self, stamp: i32) {
        self.set_int(Field::Visited, stamp);
    }

    #[inline]
    pub fn category(&self) -> i32 {
        self.int(Field::Cat)
    }

    #[inline]
    pub fn is_noise(&self) -> bool {
        self.category() < 0
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.float(Field::Height)
    }

    #[inline]
    pub fn frame(&self) -> i32 {
        self.int(Field::Frame)
    }

    #[inline]
    pub fn track_id(&self) -> i32 {
        self.int(Field::Fiti)
    }

    /// Next record in the track, or `None` at the end of the chain.
    #[inline]
    pub fn link(&self) -> Option<u32> {
        let link = self.int(Field::Link);
        (link > 0).then_some(link as u32)
    }
}
