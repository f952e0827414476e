use std::fs::File;
use std::io::{
    BufRead,
    BufReader,
    Read,
    Seek,
    SeekFrom,
};
use std::path::Path;

use log::debug;

use crate::error::Result;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compression {
    None,
    Gz,
}

impl Compression {
    pub fn name(&self) -> &str {
        match self {
            Compression::None => "none",
            Compression::Gz => "gzip",
        }
    }

    /// Guesses the compression of `path` from its extension, falling back
    /// to the leading magic bytes of `handle`. The handle is rewound.
    pub fn detect(
        path: &Path,
        handle: &mut File,
    ) -> Result<Self> {
        if path.extension().is_some_and(|ext| ext == "gz") {
            return Ok(Compression::Gz);
        }
        let mut magic = [0u8; 2];
        let read = handle.read(&mut magic)?;
        handle.seek(SeekFrom::Start(0))?;
        if read == magic.len() && magic == GZIP_MAGIC {
            Ok(Compression::Gz)
        }
        else {
            Ok(Compression::None)
        }
    }

    #[cfg(feature = "compression")]
    pub fn get_decoder(
        &self,
        handle: File,
    ) -> Result<Box<dyn BufRead>> {
        match self {
            // Multi-member decoder: bgzip output is a chain of gzip members.
            Compression::Gz => {
                Ok(Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(
                    handle,
                ))))
            },
            Compression::None => Ok(Box::new(BufReader::new(handle))),
        }
    }

    #[cfg(not(feature = "compression"))]
    pub fn get_decoder(
        &self,
        handle: File,
    ) -> Result<Box<dyn BufRead>> {
        match self {
            Compression::Gz => {
                Err(crate::error::MethCompError::Io(std::io::Error::new(
                    std::io::ErrorKind::Unsupported,
                    "gzip input requires the `compression` feature",
                )))
            },
            Compression::None => Ok(Box::new(BufReader::new(handle))),
        }
    }
}

/// Opens a text input, transparently decompressing gzip.
pub fn open_input<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let mut handle = File::open(path)?;
    let compression = Compression::detect(path, &mut handle)?;
    debug!(
        "Opening {} (compression: {})",
        path.display(),
        compression.name()
    );
    compression.get_decoder(handle)
}
