use std::fs::{File, OpenOptions};
use std::io;
use std::os::raw::c_int;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

use log::debug;

use crate::driver::{ControlDevice, RequestCode};
use crate::util::error::{Error, Result};

/// A device node opened read-only. The descriptor is closed when this is dropped.
pub struct BlockDevice {
    file: File,
    path: PathBuf,
}

impl BlockDevice {
    pub fn open(path: &Path) -> Result<BlockDevice> {
        let file = OpenOptions::new()
            .read(true)
            .open(path)
            .map_err(|e| Error::open(path, e))?;
        debug!("opened {} as fd {}", path.display(), file.as_raw_fd());
        Ok(BlockDevice { file, path: path.to_path_buf() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ControlDevice for BlockDevice {
    fn control(&mut self, code: RequestCode, argument: Option<&mut [u8]>) -> io::Result<c_int> {
        let pointer = match argument {
            Some(buffer) => buffer.as_mut_ptr() as *mut libc::c_void,
            None => std::ptr::null_mut(),
        };

        // The buffer outlives the call and the driver writes at most its length.
        let result = unsafe { libc::ioctl(self.file.as_raw_fd(), code as _, pointer) };
        if result < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(result)
    }
}

impl Drop for BlockDevice {
    fn drop(&mut self) {
        debug!("closing {}", self.path.display());
    }
}
