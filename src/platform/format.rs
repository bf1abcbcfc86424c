use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use super::Platform;
use crate::runtime::Runtime;

/// Executable container format, as far as the first bytes tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryFormat {
    Elf,
    MachO,
    Pe,
    /// Scripts, truncated files and anything goblin does not recognize.
    Other,
}

impl BinaryFormat {
    /// Classify a 16-byte file header.
    pub fn from_header(header: &[u8; 16]) -> Self {
        match goblin::peek_bytes(header) {
            Ok(goblin::Hint::Elf(_)) => BinaryFormat::Elf,
            Ok(goblin::Hint::Mach(_)) | Ok(goblin::Hint::MachFat(_)) => BinaryFormat::MachO,
            Ok(goblin::Hint::PE) => BinaryFormat::Pe,
            _ => BinaryFormat::Other,
        }
    }

    /// Whether a binary of this format certainly cannot run on `platform`.
    /// Unrecognized formats are never considered foreign.
    pub fn is_foreign_to(&self, platform: &Platform) -> bool {
        match self {
            BinaryFormat::Elf => platform.os == "darwin" || platform.is_windows(),
            BinaryFormat::MachO => platform.os != "darwin",
            BinaryFormat::Pe => !platform.is_windows(),
            BinaryFormat::Other => false,
        }
    }
}

/// Read the header of `path` and classify it.
pub fn read_format<R: Runtime + ?Sized>(runtime: &R, path: &Path) -> Result<BinaryFormat> {
    let mut file = runtime.open(path)?;

    let mut header = [0u8; 16];
    let mut filled = 0;
    while filled < header.len() {
        let n = file
            .read(&mut header[filled..])
            .with_context(|| format!("Failed to read header of {}", path.display()))?;
        if n == 0 {
            return Ok(BinaryFormat::Other);
        }
        filled += n;
    }

    Ok(BinaryFormat::from_header(&header))
}
