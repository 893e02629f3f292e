use crate::core_api::{CoreError, CoreErrorCode};

pub const SLOT_COUNT: usize = 10;
pub const SLOT_BASE_OFFSET: usize = 0x310;
pub const SLOT_STRIDE: usize = 0x28_0010;

pub const NAME_BASE_OFFSET: usize = 0x190_1D0E;
pub const NAME_STRIDE: usize = 0x24C;
pub const NAME_FIELD_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Borrows the covered bytes, or `None` if the range runs past `bytes`.
    pub fn slice<'a>(&self, bytes: &'a [u8]) -> Option<&'a [u8]> {
        bytes.get(self.start..self.end)
    }
}

const fn slot_range(index: usize) -> ByteRange {
    let start = SLOT_BASE_OFFSET + index * SLOT_STRIDE;
    ByteRange::new(start, start + SLOT_STRIDE)
}

const fn name_range(index: usize) -> ByteRange {
    let start = NAME_BASE_OFFSET + index * NAME_STRIDE;
    ByteRange::new(start, start + NAME_FIELD_LEN)
}

/// Character slot windows, in slot order.
pub const SLOT_RANGES: [ByteRange; SLOT_COUNT] = [
    slot_range(0),
    slot_range(1),
    slot_range(2),
    slot_range(3),
    slot_range(4),
    slot_range(5),
    slot_range(6),
    slot_range(7),
    slot_range(8),
    slot_range(9),
];

/// Character name fields. These live in the profile summary block after the
/// last slot, not inside the slot windows.
pub const NAME_RANGES: [ByteRange; SLOT_COUNT] = [
    name_range(0),
    name_range(1),
    name_range(2),
    name_range(3),
    name_range(4),
    name_range(5),
    name_range(6),
    name_range(7),
    name_range(8),
    name_range(9),
];

#[derive(Debug, Clone)]
pub struct SlotTable {
    pub slots: [ByteRange; SLOT_COUNT],
    pub names: [ByteRange; SLOT_COUNT],
}

impl Default for SlotTable {
    fn default() -> Self {
        Self {
            slots: SLOT_RANGES,
            names: NAME_RANGES,
        }
    }
}

impl SlotTable {
    /// Smallest file length that covers every slot window and name field.
    pub fn required_len(&self) -> usize {
        self.slots
            .iter()
            .chain(self.names.iter())
            .map(|range| range.end)
            .max()
            .unwrap_or(0)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let mut expected = self.slots[0].start;
        for (index, slot) in self.slots.iter().enumerate() {
            if slot.start != expected {
                return Err(CoreError::new(
                    CoreErrorCode::Layout,
                    format!(
                        "slot table gap/overlap around slot {index}: expected start {expected:#x}, got {:#x}",
                        slot.start
                    ),
                ));
            }
            if slot.end <= slot.start {
                return Err(CoreError::new(
                    CoreErrorCode::Layout,
                    format!(
                        "invalid slot range {index}: {:#x}..{:#x}",
                        slot.start, slot.end
                    ),
                ));
            }
            expected = slot.end;
        }

        if let Some((index, _)) = self
            .names
            .iter()
            .enumerate()
            .find(|(_, name)| name.len() != NAME_FIELD_LEN)
        {
            return Err(CoreError::new(
                CoreErrorCode::Layout,
                format!("name field {index} is not {NAME_FIELD_LEN} bytes wide"),
            ));
        }

        Ok(())
    }

    /// Checks that `file_len` bytes cover the whole table.
    pub fn check_file_len(&self, file_len: usize) -> Result<(), CoreError> {
        let required = self.required_len();
        if file_len < required {
            return Err(CoreError::truncated(format!(
                "save file is {file_len} bytes but the slot table needs at least {required} bytes"
            )));
        }
        Ok(())
    }
}
