use std::fmt;
use std::mem::size_of;
use std::str::FromStr;

use crate::consts::FILE_NAME_LENGTH;
use crate::driver::RequestCode;

pub mod sectors;
pub mod verify;

const LEGACY_BASE: RequestCode = 0x123400;

const IOCTL_MAGIC: RequestCode = b'm' as RequestCode;
const IOC_NONE: RequestCode = 0;
const IOC_WRITE: RequestCode = 1;
const IOC_READ: RequestCode = 2;

const IOC_NRSHIFT: u32 = 0;
const IOC_TYPESHIFT: u32 = 8;
const IOC_SIZESHIFT: u32 = 16;
const IOC_DIRSHIFT: u32 = 30;

fn ioc(direction: RequestCode, number: RequestCode, size: usize) -> RequestCode {
    (direction << IOC_DIRSHIFT)
        | ((size as RequestCode) << IOC_SIZESHIFT)
        | (IOCTL_MAGIC << IOC_TYPESHIFT)
        | (number << IOC_NRSHIFT)
}

/// How the driver numbers its requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestScheme {
    /// Plain `0x1234xx` numbers.
    Legacy,
    /// `_IO`/`_IOR`/`_IOWR` with magic `'m'`, as declared in the driver header.
    Ioctl,
}

impl FromStr for RequestScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "legacy" => Ok(RequestScheme::Legacy),
            "ioctl" => Ok(RequestScheme::Ioctl),
            _ => Err(format!("unknown request scheme '{}', expected legacy or ioctl", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    None,
    Read,
    ReadWrite,
}

/// The control requests the driver understands. Only `GetFileSectors` is sent by this tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRequest {
    ResetAllFiles,
    EraseFs,
    GetMetaInfo,
    GetFileSectors,
}

impl ControlRequest {
    pub const ALL: [ControlRequest; 4] = [
        ControlRequest::ResetAllFiles,
        ControlRequest::EraseFs,
        ControlRequest::GetMetaInfo,
        ControlRequest::GetFileSectors,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ControlRequest::ResetAllFiles => "RESET_ALL_FILES",
            ControlRequest::EraseFs => "ERASE_FS",
            ControlRequest::GetMetaInfo => "GET_META_INFO",
            ControlRequest::GetFileSectors => "GET_FILE_SECTORS",
        }
    }

    fn number(&self) -> RequestCode {
        match self {
            ControlRequest::ResetAllFiles => 0,
            ControlRequest::EraseFs => 1,
            ControlRequest::GetMetaInfo => 2,
            ControlRequest::GetFileSectors => 3,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            ControlRequest::ResetAllFiles | ControlRequest::EraseFs => Direction::None,
            ControlRequest::GetMetaInfo => Direction::Read,
            ControlRequest::GetFileSectors => Direction::ReadWrite,
        }
    }

    pub fn code(&self, scheme: RequestScheme) -> RequestCode {
        match scheme {
            RequestScheme::Legacy => LEGACY_BASE + self.number(),
            RequestScheme::Ioctl => match self.direction() {
                Direction::None => ioc(IOC_NONE, self.number(), 0),
                Direction::Read => ioc(IOC_READ, self.number(), size_of::<*const u8>()),
                // the header's struct ends in a flexible array, so only the name counts
                Direction::ReadWrite => ioc(IOC_READ | IOC_WRITE, self.number(), FILE_NAME_LENGTH),
            },
        }
    }
}

impl fmt::Display for ControlRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
