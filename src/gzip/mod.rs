//! Gzip read-back.
//!
//! - [`GzipReader`] - Decompressing reader over a seekable gzip source
//! - [`ReadReset`] - A reader that can restart from the beginning

use std::io::{self, Read, Seek, SeekFrom};

use flate2::read::GzDecoder;
use tracing::trace;

use crate::error::IdentifyError;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// A reader that can be rewound to produce its content again.
pub trait ReadReset: Read {
    /// Restarts the reader so the next read returns the first byte again.
    fn reset(&mut self) -> io::Result<()>;
}

/// Decompresses a gzip stream from a seekable source.
///
/// [`reset`](ReadReset::reset) seeks the source back to where the gzip
/// stream began and starts decoding over, so the same reader can feed
/// several passes.
#[derive(Debug)]
pub struct GzipReader<R: Read + Seek> {
    decoder: Option<GzDecoder<R>>,
    origin: u64,
}

impl<R: Read + Seek> GzipReader<R> {
    /// Wraps `source`, checking for the gzip magic at its current position.
    /// That position is where [`reset`](ReadReset::reset) returns to.
    ///
    /// Fails with [`IdentifyError::InvalidArgument`] when the source is not
    /// gzip, and with [`IdentifyError::Io`] when it cannot be read.
    pub fn new(mut source: R) -> crate::Result<Self> {
        let origin = source.stream_position()?;
        let mut magic = [0u8; 2];
        source.read_exact(&mut magic).map_err(|err| match err.kind() {
            io::ErrorKind::UnexpectedEof => IdentifyError::InvalidArgument {
                message: "source is not gzip",
            },
            _ => IdentifyError::Io(err),
        })?;
        if magic != GZIP_MAGIC {
            return Err(IdentifyError::InvalidArgument {
                message: "source is not gzip",
            });
        }
        source.seek(SeekFrom::Start(origin))?;
        Ok(Self {
            decoder: Some(GzDecoder::new(source)),
            origin,
        })
    }

    /// Returns the underlying source.
    pub fn into_inner(mut self) -> Option<R> {
        self.decoder.take().map(GzDecoder::into_inner)
    }

    fn decoder(&mut self) -> io::Result<&mut GzDecoder<R>> {
        self.decoder
            .as_mut()
            .ok_or_else(|| IdentifyError::Closed { op: "read" }.into())
    }
}

impl<R: Read + Seek> Read for GzipReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.decoder()?.read(buf)
    }
}

impl<R: Read + Seek> ReadReset for GzipReader<R> {
    /// On a failed seek the current decode state is kept.
    fn reset(&mut self) -> io::Result<()> {
        let decoder = self
            .decoder
            .as_mut()
            .ok_or(IdentifyError::Closed { op: "reset" })?;
        decoder.get_mut().seek(SeekFrom::Start(self.origin))?;
        if let Some(decoder) = self.decoder.take() {
            self.decoder = Some(GzDecoder::new(decoder.into_inner()));
        }
        trace!("gzip reader rewound");
        Ok(())
    }
}
