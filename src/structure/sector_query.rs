use std::mem::size_of;

use crate::consts::{SectorId, SectorSlots, FILE_NAME_LENGTH, SECTOR_SLOTS};
use crate::util::error::{Error, Result};
use crate::util::serializable::{ByteSerializable, KnownSize};

const NULL_SECTOR: SectorId = 0;

/// Argument of the `GET_FILE_SECTORS` request.
///
/// Mirrors `struct { char filename[64]; u64 sectors[8]; }` as the driver sees it:
/// the name is zero terminated and padded, the sectors are filled in by the driver.
/// Integers use host byte order since the reader is the kernel of the same host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorQueryRecord {
    filename: [u8; FILE_NAME_LENGTH],
    sectors: SectorSlots,
}

impl SectorQueryRecord {
    /// Names longer than 63 bytes are cut, the last byte is always the terminator.
    pub fn new(name: &str) -> SectorQueryRecord {
        let mut filename = [0u8; FILE_NAME_LENGTH];
        let bytes = name.as_bytes();
        let length = bytes.len().min(FILE_NAME_LENGTH - 1);
        filename[..length].copy_from_slice(&bytes[..length]);

        SectorQueryRecord { filename, sectors: [NULL_SECTOR; SECTOR_SLOTS] }
    }

    /// The name up to its terminator.
    pub fn name(&self) -> &[u8] {
        let end = self.filename.iter().position(|&b| b == 0).unwrap_or(FILE_NAME_LENGTH);
        &self.filename[..end]
    }

    pub fn sectors(&self) -> &SectorSlots {
        &self.sectors
    }

    /// Slots up to the last nonzero one.
    ///
    /// A zero slot is either unused or sector 0; the record cannot tell them apart,
    /// so only trailing zeros are dropped here.
    pub fn reported_slots(&self) -> &[SectorId] {
        reported_slots(&self.sectors)
    }
}

pub fn reported_slots(sectors: &[SectorId]) -> &[SectorId] {
    let used = sectors.iter().rposition(|&s| s != NULL_SECTOR).map_or(0, |i| i + 1);
    &sectors[..used]
}

impl KnownSize for SectorQueryRecord {
    fn size_on_disk() -> usize {
        FILE_NAME_LENGTH + size_of::<SectorSlots>()
    }
}

impl ByteSerializable for SectorQueryRecord {
    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::<u8>::with_capacity(Self::size_on_disk());
        bytes.extend_from_slice(&self.filename);
        for sector in self.sectors.iter() {
            bytes.extend_from_slice(&sector.to_ne_bytes());
        }
        bytes
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::size_on_disk() {
            return Err(Error::Decode { expected: Self::size_on_disk(), actual: bytes.len() });
        }

        let (name_bytes, sector_bytes) = bytes.split_at(FILE_NAME_LENGTH);
        let mut filename = [0u8; FILE_NAME_LENGTH];
        filename.copy_from_slice(name_bytes);

        let mut sectors = [NULL_SECTOR; SECTOR_SLOTS];
        for (slot, chunk) in sectors.iter_mut().zip(sector_bytes.chunks_exact(size_of::<SectorId>())) {
            let mut raw = [0u8; size_of::<SectorId>()];
            raw.copy_from_slice(chunk);
            *slot = SectorId::from_ne_bytes(raw);
        }

        Ok(SectorQueryRecord { filename, sectors })
    }
}
