use std::io;
use std::os::raw::c_int;

pub(crate) mod block_device;

pub type RequestCode = u64;

/// Something that accepts out-of-band control requests.
pub trait ControlDevice {
    /// Issues `code` with `argument` as the in/out buffer; `None` sends a null argument.
    fn control(&mut self, code: RequestCode, argument: Option<&mut [u8]>) -> io::Result<c_int>;
}
