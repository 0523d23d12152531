pub(crate) const FILE_NAME_LENGTH: usize = 64;
pub(crate) const SECTOR_SLOTS: usize = 8;
pub(crate) const SECTOR_SIZE: u64 = 512;
pub(crate) const PAYLOAD_SIZE: usize = 1024;

pub(crate) const DEFAULT_MOUNT_POINT: &str = "/mnt";
pub(crate) const DEFAULT_DEVICE: &str = "/dev/loop0";

pub type SectorId = u64;
pub type SectorSlots = [SectorId; SECTOR_SLOTS];
