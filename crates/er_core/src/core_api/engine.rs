use tracing::{debug, info};

use crate::inventory;
use crate::layout::SLOT_COUNT;
use crate::save::SaveFile;

use super::catalog::Catalog;
use super::cross_ref::cross_reference;
use super::error::CoreError;
use super::types::{CrossReference, DecodeOutcome, DecodedSlot, SlotSummary};

#[derive(Debug, Default, Clone, Copy)]
pub struct Engine;

/// An opened save. Borrows the caller's buffer; every call decodes from it
/// afresh.
#[derive(Debug, Clone, Copy)]
pub struct Session<'a> {
    save: SaveFile<'a>,
}

impl Engine {
    pub fn new() -> Self {
        Self
    }

    pub fn open_bytes<'a>(&self, bytes: &'a [u8]) -> Result<Session<'a>, CoreError> {
        let save = SaveFile::parse(bytes)?;
        info!(len = bytes.len(), "opened save file");
        Ok(Session { save })
    }
}

impl<'a> Session<'a> {
    pub fn slot_names(&self) -> Result<Vec<SlotSummary>, CoreError> {
        (0..SLOT_COUNT)
            .map(|index| -> Result<SlotSummary, CoreError> {
                Ok(SlotSummary {
                    index,
                    name: self.save.character_name(index)?,
                })
            })
            .collect()
    }

    /// First slot with a character name.
    pub fn first_occupied_slot(&self) -> Result<Option<usize>, CoreError> {
        Ok(self
            .slot_names()?
            .into_iter()
            .find(|summary| !summary.is_empty())
            .map(|summary| summary.index))
    }

    pub fn decode_slot(&self, index: usize) -> Result<DecodeOutcome, CoreError> {
        let slot = self.save.slot(index)?;
        let character_name = self.save.character_name(index)?;

        match inventory::read_slot(slot) {
            Ok((ids, layout)) => Ok(DecodeOutcome::Decoded(DecodedSlot {
                slot: index,
                character_name,
                layout,
                ids,
            })),
            Err(reason) => {
                debug!(slot = index, %reason, "slot has no inventory data");
                Ok(DecodeOutcome::NoInventory {
                    slot: index,
                    character_name,
                    reason,
                })
            }
        }
    }

    pub fn decode_all(&self) -> Result<Vec<DecodeOutcome>, CoreError> {
        (0..SLOT_COUNT).map(|index| self.decode_slot(index)).collect()
    }

    /// Decodes `index` and checks it against `catalog`. A slot without
    /// inventory data counts as owning nothing.
    pub fn cross_reference(
        &self,
        index: usize,
        catalog: &Catalog,
    ) -> Result<(DecodeOutcome, CrossReference), CoreError> {
        let outcome = self.decode_slot(index)?;
        let result = cross_reference(outcome.ids(), catalog);
        Ok((outcome, result))
    }
}
