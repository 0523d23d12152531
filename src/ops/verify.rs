use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rand::Rng;

use crate::util::error::{Error, Result};

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

#[derive(Debug)]
pub enum Outcome {
    Ok,
    Fail(Error),
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok)
    }
}

#[derive(Debug)]
pub struct EntryReport {
    pub name: OsString,
    pub outcome: Outcome,
}

/// Writes a random payload to every entry of a directory and reads it back.
///
/// This overwrites whatever the entries held.
pub struct Verifier<R: Rng> {
    payload_size: usize,
    rng: R,
}

impl<R: Rng> Verifier<R> {
    pub fn new(payload_size: usize, rng: R) -> Verifier<R> {
        Verifier { payload_size, rng }
    }

    pub fn payload(&mut self) -> Vec<u8> {
        (0..self.payload_size)
            .map(|_| LETTERS[self.rng.gen_range(0..LETTERS.len())])
            .collect()
    }

    /// Checks every entry; only a failure to list `directory` is returned as an error.
    pub fn verify(&mut self, directory: &Path) -> Result<Vec<EntryReport>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(directory).map_err(|e| Error::open(directory, e))? {
            let entry = entry.map_err(|e| Error::io(directory, e))?;
            names.push(entry.file_name());
        }
        names.sort();

        warn!("overwriting {} entries in {}", names.len(), directory.display());

        let reports = names
            .into_iter()
            .map(|name| {
                let path = directory.join(&name);
                let outcome = match self.check_entry(&path) {
                    Ok(()) => Outcome::Ok,
                    Err(err) => {
                        debug!("{} failed with errno {}", path.display(), err.error_num());
                        Outcome::Fail(err)
                    }
                };
                EntryReport { name, outcome }
            })
            .collect::<Vec<_>>();

        info!("checked {} entries", reports.len());
        Ok(reports)
    }

    fn check_entry(&mut self, path: &Path) -> Result<()> {
        let data = self.payload();

        debug!("writing {} bytes to {}", data.len(), path.display());
        {
            let mut file = File::create(path).map_err(|e| Error::open(path, e))?;
            file.write_all(&data).map_err(|e| Error::io(path, e))?;
        }

        debug!("reading back {}", path.display());
        let mut read = Vec::with_capacity(data.len());
        {
            let mut file = File::open(path).map_err(|e| Error::open(path, e))?;
            file.read_to_end(&mut read).map_err(|e| Error::io(path, e))?;
        }

        compare(path, &data, &read)
    }
}

fn compare(path: &Path, written: &[u8], read: &[u8]) -> Result<()> {
    if written == read {
        return Ok(());
    }

    let first_difference = written
        .iter()
        .zip(read.iter())
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| written.len().min(read.len()));

    Err(Error::Mismatch {
        path: PathBuf::from(path),
        written: written.len(),
        read: read.len(),
        first_difference,
    })
}
