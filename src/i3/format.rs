//! Insight3 format constants and field layout.

/// Size of the file header in bytes. Records start right after it.
pub const DATA: usize = 16;

/// Offset of the molecule count (u32 LE) in the header.
pub const MOLECULES: usize = 12;

/// Number of 32-bit fields per record.
pub const OBJECT_DATA_SIZE: usize = 18;

/// Size of one field in bytes.
pub const DATUM_SIZE: usize = 4;

/// Size of one record in bytes.
pub const RECORD_SIZE: usize = OBJECT_DATA_SIZE * DATUM_SIZE;

/// Word appended after the last record of an output list.
pub const END_MARKER: u32 = 0;

/// Byte offset of the record at `index`.
///
/// This is the only place record positions are computed.
#[inline]
pub const fn record_offset(index: u32) -> u64 {
    DATA as u64 + RECORD_SIZE as u64 * index as u64
}

/// Named slots of a record, in file order.
///
/// `VISITED`, `CAT`, `FITI`, `FRAME`, `TLEN` and `LINK` hold 32-bit integers,
/// every other slot holds an IEEE-754 single.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Field {
    /// Original x position.
    Xo = 0,
    /// Original y position.
    Yo = 1,
    /// Drift corrected x position.
    X = 2,
    /// Drift corrected y position.
    Y = 3,
    /// Fit height.
    Height = 4,
    /// Fit area.
    Area = 5,
    /// Fit width.
    Width = 6,
    /// Traversal generation stamp.
    Visited = 7,
    /// Peak aspect ratio.
    Aspect = 8,
    /// Fit background.
    Background = 9,
    /// Sum minus baseline over the peak pixels.
    Sum = 10,
    /// Category; negative values mark noise.
    Cat = 11,
    /// Owning track id.
    Fiti = 12,
    /// Frame number.
    Frame = 13,
    /// Track length.
    Tlen = 14,
    /// Index of the next record in the track, non-positive at the end.
    Link = 15,
    /// Original z position.
    Zo = 16,
    /// Drift corrected z position.
    Z = 17,
}

impl Field {
    /// All fields in file order.
    pub const ALL: [Field; OBJECT_DATA_SIZE] = [
        Field::Xo,
        Field::Yo,
        Field::X,
        Field::Y,
        Field::Height,
        Field::Area,
        Field::Width,
        Field::Visited,
        Field::Aspect,
        Field::Background,
        Field::Sum,
        Field::Cat,
        Field::Fiti,
        Field::Frame,
        Field::Tlen,
        Field::Link,
        Field::Zo,
        Field::Z,
    ];

    /// Slot position inside a record.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether the slot is read as a signed integer rather than a float.
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Field::Visited | Field::Cat | Field::Fiti | Field::Frame | Field::Tlen | Field::Link
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_offset() {
        assert_eq!(RECORD_SIZE, 72);
        assert_eq!(record_offset(0), 16);
        assert_eq!(record_offset(1), 88);
        // Large lists need the 64-bit product.
        assert_eq!(record_offset(u32::MAX), 16 + 72 * u32::MAX as u64);
    }

    #[test]
    fn test_field_order() {
        for (i, field) in Field::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
        assert!(Field::Link.is_integer());
        assert!(!Field::Sum.is_integer());
        assert!(!Field::Height.is_integer());
    }
}
