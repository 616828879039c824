use std::{
    fs::File,
    io::{self, BufReader, Read, Seek, SeekFrom},
    path::{Path, PathBuf},
};

use flate2::read::GzDecoder;

use crate::error::{Result, SequenceError};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Random-access reads of a byte range.
///
/// Reads take `&self`, so one source can serve several readers at once as
/// long as the implementation keeps no shared cursor.
pub trait ByteSource {
    fn read_at(&self, offset: u64, len: usize) -> io::Result<Vec<u8>>;
}

impl ByteSource for [u8] {
    fn read_at(&self, offset: u64, len: usize) -> io::Result<Vec<u8>> {
        let start = usize::try_from(offset).map_err(|_| out_of_bounds(offset, len))?;
        let end = start
            .checked_add(len)
            .ok_or_else(|| out_of_bounds(offset, len))?;
        self.get(start..end)
            .map(<[u8]>::to_vec)
            .ok_or_else(|| out_of_bounds(offset, len))
    }
}

impl ByteSource for Vec<u8> {
    fn read_at(&self, offset: u64, len: usize) -> io::Result<Vec<u8>> {
        self.as_slice().read_at(offset, len)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &S {
    fn read_at(&self, offset: u64, len: usize) -> io::Result<Vec<u8>> {
        (**self).read_at(offset, len)
    }
}

fn out_of_bounds(offset: u64, len: usize) -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("read of {len} bytes at offset {offset} runs past the end of the source"),
    )
}

/// Reads exactly `len` bytes, turning a short answer from the source into a
/// malformed-corpus error rather than trusting it.
pub(crate) fn read_exact_at<S: ByteSource + ?Sized>(
    source: &S,
    offset: u64,
    len: usize,
) -> Result<Vec<u8>> {
    let bytes = source.read_at(offset, len)?;
    if bytes.len() != len {
        return Err(SequenceError::MalformedCorpus(format!(
            "source returned {} bytes for a {len}-byte read at offset {offset}",
            bytes.len()
        )));
    }
    Ok(bytes)
}

/// A file on disk, raw or gzip-compressed. Every read opens its own handle.
///
/// Gzip streams cannot seek, so a compressed read decodes everything before
/// `offset` and drops it.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    gzip: bool,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            gzip: false,
        }
    }

    pub fn gzip(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            gzip: true,
        }
    }

    /// Picks raw or gzip by looking at the first two bytes of the file.
    pub fn detect(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let mut magic = [0u8; 2];
        let n = File::open(&path)?.read(&mut magic)?;
        let gzip = n == 2 && magic == GZIP_MAGIC;
        tracing::debug!(path = %path.display(), gzip, "opened corpus file");
        Ok(Self { path, gzip })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_gzip(&self) -> bool {
        self.gzip
    }

    fn read_raw(&self, offset: u64, len: usize) -> io::Result<Vec<u8>> {
        let mut file = File::open(&self.path)?;
        let size = file.metadata()?.len();
        if offset.checked_add(len as u64).is_none_or(|end| end > size) {
            return Err(out_of_bounds(offset, len));
        }
        file.seek(SeekFrom::Start(offset))?;
        let mut buf = vec![0; len];
        file.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn read_gzip(&self, offset: u64, len: usize) -> io::Result<Vec<u8>> {
        let mut decoder = GzDecoder::new(BufReader::new(File::open(&self.path)?));
        let skipped = io::copy(&mut (&mut decoder).take(offset), &mut io::sink())?;
        if skipped < offset {
            return Err(out_of_bounds(offset, len));
        }
        // no size to check against; the buffer grows with what is decoded
        let mut buf = Vec::new();
        decoder.take(len as u64).read_to_end(&mut buf)?;
        if buf.len() < len {
            return Err(out_of_bounds(offset, len));
        }
        Ok(buf)
    }
}

impl ByteSource for FileSource {
    fn read_at(&self, offset: u64, len: usize) -> io::Result<Vec<u8>> {
        if self.gzip {
            self.read_gzip(offset, len)
        } else {
            self.read_raw(offset, len)
        }
    }
}
