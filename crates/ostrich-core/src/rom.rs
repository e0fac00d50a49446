use std::path::{Path, PathBuf};

use thiserror::Error;

/// Smallest payload that still contains a full cartridge header (0x0100..0x0150).
pub const MIN_ROM_LEN: usize = 0x0150;

const TITLE_START: usize = 0x0134;
const TITLE_END: usize = 0x0144;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RomLoadError {
    #[error("ROM is {actual} bytes, smaller than the {min}-byte header region")]
    TooSmall { actual: usize, min: usize },
}

/// A ROM image as handed to a machine, kept verbatim with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rom {
    bytes: Vec<u8>,
    path: PathBuf,
}

impl Rom {
    pub fn new(bytes: Vec<u8>, path: PathBuf) -> Result<Self, RomLoadError> {
        if bytes.len() < MIN_ROM_LEN {
            return Err(RomLoadError::TooSmall {
                actual: bytes.len(),
                min: MIN_ROM_LEN,
            });
        }
        Ok(Self { bytes, path })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cartridge title from the header, up to the first NUL. Non-printable bytes are dropped.
    pub fn title(&self) -> String {
        self.bytes[TITLE_START..TITLE_END]
            .iter()
            .take_while(|&&b| b != 0)
            .filter(|b| b.is_ascii_graphic() || **b == b' ')
            .map(|&b| b as char)
            .collect::<String>()
            .trim()
            .to_string()
    }
}
