use std::path::Path;

use log::{debug, info};

use crate::consts::SectorSlots;
use crate::driver::block_device::BlockDevice;
use crate::driver::ControlDevice;
use crate::ops::{ControlRequest, RequestScheme};
use crate::structure::SectorQueryRecord;
use crate::util::error::{Error, Result};
use crate::util::serializable::ByteSerializable;

/// Asks the driver which sectors back `filename`.
///
/// All eight slots are returned as the driver left them; a zero slot may be unused
/// or may be sector 0.
pub fn query_sectors<D: ControlDevice>(
    device: &mut D,
    filename: &str,
    scheme: RequestScheme,
) -> Result<SectorQueryRecord> {
    let request = ControlRequest::GetFileSectors;
    let record = SectorQueryRecord::new(filename);
    let mut buffer = record.to_bytes();
    let code = request.code(scheme);

    debug!("sending {} ({:#x}) for {:?}", request, code, String::from_utf8_lossy(record.name()));
    device
        .control(code, Some(&mut buffer))
        .map_err(|source| Error::Request { request: request.name(), source })?;

    SectorQueryRecord::from_bytes(&buffer)
}

/// Opens `device_path`, runs one query and closes the device again.
pub fn query_sectors_at(device_path: &Path, filename: &str, scheme: RequestScheme) -> Result<SectorSlots> {
    let mut device = BlockDevice::open(device_path)?;
    info!("querying sectors of {:?} on {}", filename, device.path().display());
    let record = query_sectors(&mut device, filename, scheme)?;
    Ok(*record.sectors())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io;
    use std::os::raw::c_int;
    use std::rc::Rc;

    use crate::consts::{FILE_NAME_LENGTH, SECTOR_SLOTS};
    use crate::driver::RequestCode;

    /// Answers like the driver would, and counts how often it is closed.
    struct FakeDevice {
        answer: io::Result<Vec<u64>>,
        seen: Option<(RequestCode, Vec<u8>)>,
        closed: Rc<Cell<u32>>,
    }

    impl FakeDevice {
        fn new(answer: io::Result<Vec<u64>>, closed: Rc<Cell<u32>>) -> FakeDevice {
            FakeDevice { answer, seen: None, closed }
        }
    }

    impl ControlDevice for FakeDevice {
        fn control(&mut self, code: RequestCode, argument: Option<&mut [u8]>) -> io::Result<c_int> {
            let buffer = argument.expect("GET_FILE_SECTORS needs an argument");
            self.seen = Some((code, buffer.to_vec()));

            match &self.answer {
                Ok(sectors) => {
                    for (i, sector) in sectors.iter().enumerate() {
                        let offset = FILE_NAME_LENGTH + i * 8;
                        buffer[offset..offset + 8].copy_from_slice(&sector.to_ne_bytes());
                    }
                    Ok(0)
                }
                Err(err) => Err(io::Error::from_raw_os_error(err.raw_os_error().unwrap_or(libc::EIO))),
            }
        }
    }

    impl Drop for FakeDevice {
        fn drop(&mut self) {
            self.closed.set(self.closed.get() + 1);
        }
    }

    #[test]
    fn sends_encoded_record_and_decodes_answer() {
        let closed = Rc::new(Cell::new(0));
        let mut device = FakeDevice::new(Ok(vec![100, 101, 205]), closed.clone());

        let record = query_sectors(&mut device, "notes.txt", RequestScheme::Legacy).unwrap();

        let (code, sent) = device.seen.take().unwrap();
        assert_eq!(code, 0x123403);
        assert_eq!(sent, SectorQueryRecord::new("notes.txt").to_bytes());
        assert_eq!(&sent[..10], b"notes.txt\0");
        assert!(sent[64..].iter().all(|&b| b == 0));

        assert_eq!(record.sectors(), &[100, 101, 205, 0, 0, 0, 0, 0]);
        assert_eq!(record.sectors().len(), SECTOR_SLOTS);
        assert_eq!(record.reported_slots(), &[100, 101, 205]);

        drop(device);
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn uses_selected_scheme() {
        let closed = Rc::new(Cell::new(0));
        let mut device = FakeDevice::new(Ok(vec![]), closed);

        query_sectors(&mut device, "a", RequestScheme::Ioctl).unwrap();
        assert_eq!(device.seen.take().unwrap().0, 0xc040_6d03);
    }

    #[test]
    fn rejected_request_is_reported_and_device_closed_once() {
        let closed = Rc::new(Cell::new(0));
        {
            let mut device = FakeDevice::new(Err(io::Error::from_raw_os_error(libc::ENOENT)), closed.clone());
            match query_sectors(&mut device, "missing.txt", RequestScheme::Legacy) {
                Err(Error::Request { request, source }) => {
                    assert_eq!(request, "GET_FILE_SECTORS");
                    assert_eq!(source.raw_os_error(), Some(libc::ENOENT));
                }
                other => panic!("unexpected result: {:?}", other),
            }
        }
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn missing_device_is_an_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let device = dir.path().join("loop0");
        match query_sectors_at(&device, "notes.txt", RequestScheme::Legacy) {
            Err(Error::Open { path, .. }) => assert_eq!(path, device),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn device_without_driver_is_a_request_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        match query_sectors_at(file.path(), "notes.txt", RequestScheme::Legacy) {
            Err(Error::Request { request, .. }) => assert_eq!(request, "GET_FILE_SECTORS"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
