use std::io::{self, Write};

use crate::consts::{SectorId, SECTOR_SIZE};
use crate::ops::verify::{EntryReport, Outcome};
use crate::ops::{ControlRequest, RequestScheme};
use crate::structure::reported_slots;
use crate::util::error::Error;
use crate::util::format::{pretty_size_from_bytes, sector_list};

/// Human readable progress lines on `out`.
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Reporter<W> {
        Reporter { out }
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn start(&mut self) -> io::Result<()> {
        writeln!(self.out, "[*] Starting tests...")
    }

    pub fn verify_started(&mut self) -> io::Result<()> {
        writeln!(self.out, "[+] Testing read/write on all files...")
    }

    pub fn entry(&mut self, report: &EntryReport) -> io::Result<()> {
        let name = report.name.to_string_lossy();
        match &report.outcome {
            Outcome::Ok => writeln!(self.out, "[OK] {}", name),
            Outcome::Fail(err) => writeln!(self.out, "[FAIL] {}: {}", name, err),
        }
    }

    pub fn verify_summary(&mut self, reports: &[EntryReport]) -> io::Result<()> {
        let passed = reports.iter().filter(|r| r.outcome.is_ok()).count();
        writeln!(self.out, "[+] {} passed, {} failed", passed, reports.len() - passed)
    }

    pub fn error(&mut self, context: &str, err: &Error) -> io::Result<()> {
        writeln!(self.out, "[ERROR] {}: {}", context, err)
    }

    pub fn calling(&mut self) -> io::Result<()> {
        writeln!(self.out, "Calling IOCTL...")
    }

    pub fn sectors(&mut self, sectors: &[SectorId]) -> io::Result<()> {
        writeln!(self.out, "Sectors: {}", sector_list(sectors))?;
        let used = reported_slots(sectors).len() as u64;
        writeln!(
            self.out,
            "[+] {} sector slot(s) in use (~{})",
            used,
            pretty_size_from_bytes(used * SECTOR_SIZE)
        )
    }

    pub fn codes(&mut self, scheme: RequestScheme) -> io::Result<()> {
        for request in ControlRequest::ALL.iter() {
            writeln!(self.out, "{:<18} {:#010x}", request.name(), request.code(scheme))?;
        }
        Ok(())
    }
}
