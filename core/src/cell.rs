use serde::{Deserialize, Serialize};

const COUNT_MASK: u8 = 0x0f;
const MINE_BIT: u8 = 1 << 5;
const FLAG_BIT: u8 = 1 << 6;
const REVEAL_BIT: u8 = 1 << 7;

/// One grid position packed into a byte.
///
/// Bits 0-3 hold the adjacent mine count (0-8), bit 5 marks a mine, bit 6 a
/// flag and bit 7 a revealed cell. Setters return an updated copy.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell(u8);

impl Cell {
    pub const EMPTY: Self = Self(0);

    pub const fn new(mine: bool, flagged: bool, revealed: bool, adjacent_count: u8) -> Self {
        Self::EMPTY
            .with_mine(mine)
            .with_flagged(flagged)
            .with_revealed(revealed)
            .with_adjacent_count(adjacent_count)
    }

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_mine(self) -> bool {
        self.0 & MINE_BIT != 0
    }

    pub const fn is_flagged(self) -> bool {
        self.0 & FLAG_BIT != 0
    }

    pub const fn is_revealed(self) -> bool {
        self.0 & REVEAL_BIT != 0
    }

    pub const fn adjacent_count(self) -> u8 {
        self.0 & COUNT_MASK
    }

    /// Neither revealed nor flagged, the only state a reveal can open.
    pub const fn is_hidden(self) -> bool {
        !self.is_revealed() && !self.is_flagged()
    }

    /// Safe cell with no mine around it, flood fill expands through these.
    pub const fn is_empty_safe(self) -> bool {
        !self.is_mine() && self.adjacent_count() == 0
    }

    pub const fn with_mine(self, mine: bool) -> Self {
        self.with_bit(MINE_BIT, mine)
    }

    pub const fn with_flagged(self, flagged: bool) -> Self {
        self.with_bit(FLAG_BIT, flagged)
    }

    pub const fn with_revealed(self, revealed: bool) -> Self {
        self.with_bit(REVEAL_BIT, revealed)
    }

    pub const fn with_adjacent_count(self, count: u8) -> Self {
        Self((self.0 & !COUNT_MASK) | (count & COUNT_MASK))
    }

    const fn with_bit(self, bit: u8, value: bool) -> Self {
        if value {
            Self(self.0 | bit)
        } else {
            Self(self.0 & !bit)
        }
    }
}

impl core::fmt::Debug for Cell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cell")
            .field("mine", &self.is_mine())
            .field("flagged", &self.is_flagged())
            .field("revealed", &self.is_revealed())
            .field("adjacent_count", &self.adjacent_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_survive_encoding() {
        for bits in 0..16u8 {
            let (mine, flagged, revealed) = (bits & 1 != 0, bits & 2 != 0, bits & 4 != 0);
            for count in 0..=8 {
                let cell = Cell::new(mine, flagged, revealed, count);
                assert_eq!(cell.is_mine(), mine);
                assert_eq!(cell.is_flagged(), flagged);
                assert_eq!(cell.is_revealed(), revealed);
                assert_eq!(cell.adjacent_count(), count);
            }
        }
    }

    #[test]
    fn setters_leave_other_fields_alone() {
        let cell = Cell::new(false, false, false, 3);

        let flagged = cell.with_flagged(true);
        assert_eq!(cell, Cell::new(false, false, false, 3));
        assert_eq!(flagged, Cell::new(false, true, false, 3));

        let revealed = flagged.with_revealed(true).with_flagged(false);
        assert_eq!(revealed, Cell::new(false, false, true, 3));
        assert_eq!(revealed.with_mine(true).adjacent_count(), 3);
    }

    #[test]
    fn layout_matches_byte_format() {
        assert_eq!(Cell::new(true, false, false, 0).bits(), 0x20);
        assert_eq!(Cell::new(false, true, false, 0).bits(), 0x40);
        assert_eq!(Cell::new(false, false, true, 8).bits(), 0x88);
        assert_eq!(Cell::from_bits(0xe5), Cell::new(true, true, true, 5));
    }

    #[test]
    fn hidden_and_empty_safe() {
        assert!(Cell::EMPTY.is_hidden());
        assert!(Cell::EMPTY.is_empty_safe());
        assert!(!Cell::EMPTY.with_flagged(true).is_hidden());
        assert!(!Cell::EMPTY.with_mine(true).is_empty_safe());
        assert!(!Cell::EMPTY.with_adjacent_count(1).is_empty_safe());
    }
}
