//! Save container validation, slot extraction and character names.

use crate::core_api::{CoreError, CoreErrorCode};
use crate::layout::{SLOT_COUNT, SlotTable};

pub const SIGNATURE: [u8; 4] = *b"BND4";

pub fn validate_signature(bytes: &[u8]) -> Result<(), CoreError> {
    match bytes.get(..SIGNATURE.len()) {
        Some(head) if head == SIGNATURE => Ok(()),
        Some(head) => Err(CoreError::new(
            CoreErrorCode::InvalidSignature,
            format!("not a BND4 save file: signature is {head:02X?}, expected {SIGNATURE:02X?}"),
        )),
        None => Err(CoreError::new(
            CoreErrorCode::InvalidSignature,
            format!("not a BND4 save file: only {} bytes", bytes.len()),
        )),
    }
}

/// A validated, borrowed save file.
#[derive(Debug, Clone, Copy)]
pub struct SaveFile<'a> {
    bytes: &'a [u8],
}

impl<'a> SaveFile<'a> {
    pub fn parse(bytes: &'a [u8]) -> Result<Self, CoreError> {
        validate_signature(bytes)?;
        let table = SlotTable::default();
        table.validate()?;
        table.check_file_len(bytes.len())?;
        Ok(Self { bytes })
    }

    pub fn slot(&self, index: usize) -> Result<&'a [u8], CoreError> {
        let table = SlotTable::default();
        let range = table.slots.get(index).ok_or_else(|| invalid_slot(index))?;
        range.slice(self.bytes).ok_or_else(|| {
            CoreError::truncated(format!(
                "slot {index} runs past end of file ({} bytes)",
                self.bytes.len()
            ))
        })
    }

    pub fn slots(&self) -> Result<[&'a [u8]; SLOT_COUNT], CoreError> {
        let mut out: [&'a [u8]; SLOT_COUNT] = [&[]; SLOT_COUNT];
        for (index, view) in out.iter_mut().enumerate() {
            *view = self.slot(index)?;
        }
        Ok(out)
    }

    pub fn character_name(&self, index: usize) -> Result<String, CoreError> {
        let table = SlotTable::default();
        let range = table.names.get(index).ok_or_else(|| invalid_slot(index))?;
        let field = range.slice(self.bytes).ok_or_else(|| {
            CoreError::truncated(format!("name field for slot {index} runs past end of file"))
        })?;
        Ok(decode_name_field(field))
    }
}

/// Splits a whole save file into its ten slot views.
pub fn slice(bytes: &[u8]) -> Result<[&[u8]; SLOT_COUNT], CoreError> {
    SaveFile::parse(bytes)?.slots()
}

/// Decodes the character name stored for `slot`.
pub fn decode_name(bytes: &[u8], slot: usize) -> Result<String, CoreError> {
    SaveFile::parse(bytes)?.character_name(slot)
}

/// UTF-16LE, NUL padded. Bad code units decode to U+FFFD.
pub fn decode_name_field(field: &[u8]) -> String {
    let (text, _had_errors) = encoding_rs::UTF_16LE.decode_without_bom_handling(field);
    let end = text.find('\0').unwrap_or(text.len());
    text[..end].to_string()
}

fn invalid_slot(index: usize) -> CoreError {
    CoreError::invalid_slot(index, SLOT_COUNT)
}
