//! Network item stacks.
//!
//! ```text
//! id                signed varint   (0 = air, nothing else follows)
//! count             u16 LE
//! metadata          unsigned varint (u16 bit pattern of the damage value)
//! [has_net_id]      bool            only when metadata is included
//! [stack_net_id]    signed varint   only when has_net_id
//! block_runtime_id  signed varint
//! extra_data        unsigned varint length + opaque bytes
//! ```
//!
//! Recipe payloads always write items without the auxiliary metadata.

use crate::core::buffer::{PacketReader, PacketWriter};
use crate::error::{ProtocolError, Result};
use serde::{Deserialize, Serialize};

/// An item stack as it travels over the network.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Item {
    /// Network item id; `0` is air.
    pub id: i32,
    /// Damage value or variant.
    pub metadata: i16,
    pub count: u16,
    pub block_runtime_id: i32,
    /// Server-assigned stack id, only carried when auxiliary metadata is written.
    pub stack_net_id: Option<i32>,
    /// Opaque tag data (NBT, can-place-on lists), passed through untouched.
    pub extra_data: Vec<u8>,
}

impl Item {
    pub fn new(id: i32, metadata: i16, count: u16) -> Self {
        Self {
            id,
            metadata,
            count,
            ..Self::default()
        }
    }

    pub fn air() -> Self {
        Self::default()
    }

    pub fn is_air(&self) -> bool {
        self.id == 0
    }

    pub fn with_block_runtime_id(mut self, block_runtime_id: i32) -> Self {
        self.block_runtime_id = block_runtime_id;
        self
    }

    pub fn with_extra_data(mut self, extra_data: Vec<u8>) -> Self {
        self.extra_data = extra_data;
        self
    }
}

/// Resolves a bare item id (and damage value) into a full item.
///
/// Smelting recipes only carry the input's id on the wire; the decoder asks
/// the registry to turn it back into an [`Item`].
pub trait ItemRegistry: Send + Sync {
    fn item(&self, id: i32, metadata: i16) -> Item;
}

/// Registry that builds a single plain stack for any id.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultItemRegistry;

impl ItemRegistry for DefaultItemRegistry {
    fn item(&self, id: i32, metadata: i16) -> Item {
        Item::new(id, metadata, 1)
    }
}

impl PacketWriter {
    pub fn write_item(&mut self, item: &Item, include_metadata: bool) {
        self.write_var_i32(item.id);
        if item.is_air() {
            return;
        }

        self.write_u16_le(item.count);
        self.write_var_u32(u32::from(item.metadata as u16));

        if include_metadata {
            self.write_bool(item.stack_net_id.is_some());
            if let Some(net_id) = item.stack_net_id {
                self.write_var_i32(net_id);
            }
        }

        self.write_var_i32(item.block_runtime_id);
        self.write_byte_array(&item.extra_data);
    }
}

impl PacketReader<'_> {
    pub fn read_item(&mut self, include_metadata: bool) -> Result<Item> {
        let id = self.read_var_i32()?;
        if id == 0 {
            return Ok(Item::air());
        }

        let count = self.read_u16_le()?;
        let raw_metadata = self.read_var_u32()?;
        let metadata = u16::try_from(raw_metadata)
            .map_err(|_| ProtocolError::VarIntOverflow(u64::from(raw_metadata)))?
            as i16;

        let stack_net_id = if include_metadata && self.read_bool()? {
            Some(self.read_var_i32()?)
        } else {
            None
        };

        let block_runtime_id = self.read_var_i32()?;
        let extra_data = self.read_byte_array()?.to_vec();

        Ok(Item {
            id,
            metadata,
            count,
            block_runtime_id,
            stack_net_id,
            extra_data,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn test_air_is_single_byte() {
        let mut writer = PacketWriter::new();
        writer.write_item(&Item::air(), true);
        assert_eq!(writer.as_slice(), &[0x00]);
    }

    #[test]
    fn test_negative_metadata_survives() {
        let item = Item::new(280, -1, 4).with_block_runtime_id(77);
        let mut writer = PacketWriter::new();
        writer.write_item(&item, false);
        let bytes = writer.freeze();

        let decoded = PacketReader::new(&bytes).read_item(false).unwrap();
        assert_eq!(decoded, item);
    }

    #[test]
    fn test_metadata_toggle_controls_net_id() {
        let mut item = Item::new(5, 2, 64).with_extra_data(vec![0x0A, 0x00]);
        item.stack_net_id = Some(12);

        let mut with_meta = PacketWriter::new();
        with_meta.write_item(&item, true);
        let mut without_meta = PacketWriter::new();
        without_meta.write_item(&item, false);
        assert_eq!(with_meta.len(), without_meta.len() + 2);

        let bytes = with_meta.freeze();
        assert_eq!(PacketReader::new(&bytes).read_item(true).unwrap(), item);

        let bytes = without_meta.freeze();
        let decoded = PacketReader::new(&bytes).read_item(false).unwrap();
        assert_eq!(decoded.stack_net_id, None);
        assert_eq!(decoded.extra_data, item.extra_data);
    }

    #[test]
    fn test_registry_builds_single_stack() {
        let item = DefaultItemRegistry.item(42, 3);
        assert_eq!(item, Item::new(42, 3, 1));
    }
}
