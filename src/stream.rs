//! Row streaming over a bounded staging buffer.
//!
//! One image row can be far wider than the buffer; the streamer refills on
//! demand and never reads past the end of the current row, so a short read
//! at the row boundary cannot pull the next row's bytes in.

use embedded_io::{Read, Seek, SeekFrom};

use crate::error::RenderError;
use crate::header::BmpHeader;

/// Staging capacity in bytes. Fixed and independent of image size; rows
/// wider than this are staged in several refills.
pub(crate) const STAGING_CAPACITY: usize = 256;

pub(crate) struct RowStreamer<'f, F> {
    file: &'f mut F,
    data_offset: u64,
    stride: u64,
    staged: [u8; STAGING_CAPACITY],
    filled: usize,
    consumed: usize,
    /// Bytes of the current row not yet staged.
    row_remaining: u64,
    /// Absolute file position of the next refill, for error reporting.
    offset: u64,
}

impl<'f, F: Read + Seek> RowStreamer<'f, F> {
    pub(crate) fn new(file: &'f mut F, header: &BmpHeader) -> Self {
        RowStreamer {
            file,
            data_offset: u64::from(header.data_offset),
            stride: header.row_stride(),
            staged: [0; STAGING_CAPACITY],
            filled: 0,
            consumed: 0,
            row_remaining: 0,
            offset: 0,
        }
    }

    /// Seek to the start of a stored row and drop any staged bytes.
    pub(crate) fn begin_row(&mut self, source_row: u32) -> Result<(), RenderError> {
        let position = self.data_offset + u64::from(source_row) * self.stride;
        self.file
            .seek(SeekFrom::Start(position))
            .map_err(RenderError::io)?;
        self.offset = position;
        self.row_remaining = self.stride;
        self.filled = 0;
        self.consumed = 0;
        Ok(())
    }

    pub(crate) fn next_byte(&mut self) -> Result<u8, RenderError> {
        if self.consumed == self.filled {
            self.refill()?;
        }
        let byte = self.staged[self.consumed];
        self.consumed += 1;
        Ok(byte)
    }

    fn refill(&mut self) -> Result<(), RenderError> {
        let want = self.row_remaining.min(STAGING_CAPACITY as u64) as usize;
        if want == 0 {
            // The decoder asked for more bytes than the row stride holds.
            return Err(RenderError::TruncatedRead {
                offset: self.offset,
            });
        }
        let got = self
            .file
            .read(&mut self.staged[..want])
            .map_err(RenderError::io)?;
        if got == 0 {
            return Err(RenderError::TruncatedRead {
                offset: self.offset,
            });
        }
        self.filled = got;
        self.consumed = 0;
        self.row_remaining -= got as u64;
        self.offset += got as u64;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{PixelDecoder, RawPixel};
    use crate::header::{BmpHeader, COMPRESSION_RGB};
    use crate::storage::SliceFile;

    fn header(width: u32, height: u32, depth: u16) -> BmpHeader {
        BmpHeader {
            file_size: 0,
            data_offset: 0,
            header_size: 40,
            width,
            height,
            top_down: false,
            planes: 1,
            depth,
            compression: COMPRESSION_RGB,
        }
    }

    #[test]
    fn four_bit_row_consumes_two_bytes_of_its_padded_stride() {
        // width 3 at depth 4: 2 pixel bytes, stride padded to 4.
        let data = [0x12, 0x30, 0x00, 0x00, 0xAB, 0xC0, 0x00, 0x00];
        let mut file = SliceFile::new(&data);
        let header = header(3, 2, 4);
        let mut streamer = RowStreamer::new(&mut file, &header);
        let mut decoder = PixelDecoder::new(4);

        for (row, expected) in [[1u8, 2, 3], [0xA, 0xB, 0xC]].iter().enumerate() {
            streamer.begin_row(row as u32).unwrap();
            decoder.begin_row();
            for &index in expected {
                assert_eq!(decoder.next(&mut streamer).unwrap(), RawPixel::Index(index));
            }
            // Three pixels are 12 bits; only the two pixel bytes were pulled.
            assert_eq!(streamer.consumed, 2);
        }
    }

    #[test]
    fn rows_wider_than_the_staging_buffer_refill() {
        // One 640-byte row of an 8-bit image, values cycling 0..=255.
        let mut data = [0u8; 640];
        for (i, byte) in data.iter_mut().enumerate() {
            *byte = i as u8;
        }
        let mut file = SliceFile::new(&data);
        let header = header(640, 1, 8);
        let mut streamer = RowStreamer::new(&mut file, &header);

        streamer.begin_row(0).unwrap();
        for i in 0..640u32 {
            assert_eq!(streamer.next_byte().unwrap(), i as u8);
        }
    }

    #[test]
    fn short_source_reports_truncation_at_the_failing_offset() {
        let data = [0xFFu8; 6]; // stride 12, only half a row present
        let mut file = SliceFile::new(&data);
        let header = header(4, 1, 24);
        let mut streamer = RowStreamer::new(&mut file, &header);

        streamer.begin_row(0).unwrap();
        for _ in 0..6 {
            streamer.next_byte().unwrap();
        }
        assert!(matches!(
            streamer.next_byte(),
            Err(RenderError::TruncatedRead { offset: 6 })
        ));
    }

    #[test]
    fn begin_row_discards_stale_staged_bytes() {
        let data = [0x11, 0x00, 0x00, 0x00, 0x22, 0x00, 0x00, 0x00];
        let mut file = SliceFile::new(&data);
        let header = header(1, 2, 8);
        let mut streamer = RowStreamer::new(&mut file, &header);

        streamer.begin_row(1).unwrap();
        assert_eq!(streamer.next_byte().unwrap(), 0x22);
        streamer.begin_row(0).unwrap();
        assert_eq!(streamer.next_byte().unwrap(), 0x11);
    }
}
