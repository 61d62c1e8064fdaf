//! Block-storage collaborator.

use core::convert::Infallible;

use embedded_io::{ErrorType, Read, Seek, SeekFrom};

/// Where image files come from.
///
/// `open` returning `None` surfaces as [`RenderError::NotFound`]; handles
/// are closed by drop. Retry policy, if any, belongs to the implementation,
/// never to the renderer.
///
/// [`RenderError::NotFound`]: crate::RenderError::NotFound
pub trait Storage {
    type File: Read + Seek;

    fn open(&mut self, path: &str) -> Option<Self::File>;
}

/// Fixed set of named in-memory images, for flash-resident assets and host
/// tests.
pub struct SliceStorage<'a> {
    images: &'a [(&'a str, &'a [u8])],
}

impl<'a> SliceStorage<'a> {
    pub const fn new(images: &'a [(&'a str, &'a [u8])]) -> Self {
        SliceStorage { images }
    }
}

impl<'a> Storage for SliceStorage<'a> {
    type File = SliceFile<'a>;

    fn open(&mut self, path: &str) -> Option<SliceFile<'a>> {
        self.images
            .iter()
            .find(|(name, _)| *name == path)
            .map(|(_, data)| SliceFile::new(data))
    }
}

/// Read-only seekable file over a byte slice.
pub struct SliceFile<'a> {
    data: &'a [u8],
    position: u64,
}

impl<'a> SliceFile<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        SliceFile { data, position: 0 }
    }
}

impl ErrorType for SliceFile<'_> {
    type Error = Infallible;
}

impl Read for SliceFile<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Infallible> {
        let start = self.position.min(self.data.len() as u64) as usize;
        let n = (self.data.len() - start).min(buf.len());
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        self.position += n as u64;
        Ok(n)
    }
}

impl Seek for SliceFile<'_> {
    /// Seeking before the start clamps to 0; past the end is allowed and
    /// reads there return nothing.
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, Infallible> {
        self.position = match pos {
            SeekFrom::Start(offset) => offset,
            SeekFrom::End(offset) => (self.data.len() as u64).saturating_add_signed(offset),
            SeekFrom::Current(offset) => self.position.saturating_add_signed(offset),
        };
        Ok(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_stop_at_end_of_slice() {
        let mut file = SliceFile::new(&[1, 2, 3]);
        let mut buf = [0u8; 8];
        assert_eq!(file.read(&mut buf).unwrap(), 3);
        assert_eq!(file.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn seek_repositions_reads() {
        let mut file = SliceFile::new(&[10, 20, 30, 40]);
        file.seek(SeekFrom::Start(2)).unwrap();
        let mut buf = [0u8; 1];
        file.read(&mut buf).unwrap();
        assert_eq!(buf[0], 30);

        file.seek(SeekFrom::End(-1)).unwrap();
        file.read(&mut buf).unwrap();
        assert_eq!(buf[0], 40);
    }

    #[test]
    fn missing_name_opens_nothing() {
        let images = [("a.bmp", &[0u8; 1][..])];
        let mut storage = SliceStorage::new(&images);
        assert!(storage.open("a.bmp").is_some());
        assert!(storage.open("b.bmp").is_none());
    }
}
