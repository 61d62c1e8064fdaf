//! BMP file header parsing.
//!
//! The BMP header is a fixed-offset layout, not a sequential record: the
//! parser seeks to each absolute field position rather than trusting
//! whatever padding precedes it.

use embedded_io::{Read, Seek, SeekFrom};

use crate::error::RenderError;

const OFF_FILE_SIZE: u64 = 2;
const OFF_DATA_OFFSET: u64 = 10;
const OFF_HEADER_SIZE: u64 = 14;
const OFF_WIDTH: u64 = 18;
const OFF_HEIGHT: u64 = 22;
const OFF_PLANES: u64 = 26;
const OFF_DEPTH: u64 = 28;
const OFF_COMPRESSION: u64 = 30;

/// `BI_RGB`
pub(crate) const COMPRESSION_RGB: u32 = 0;
/// `BI_BITFIELDS`
pub(crate) const COMPRESSION_BITFIELDS: u32 = 3;

/// Validated BMP geometry, with the height sign already folded into
/// [`top_down`](Self::top_down).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    pub file_size: u32,
    /// Absolute offset of the first pixel row.
    pub data_offset: u32,
    /// Size of the info header; the color table starts at `14 + header_size`.
    pub header_size: u32,
    pub width: u32,
    /// Absolute height in rows.
    pub height: u32,
    /// Stored top row first (negative height in the file); no flip needed.
    pub top_down: bool,
    pub planes: u16,
    /// Bits per pixel, one of 1, 2, 4, 8, 16, 24, 32.
    pub depth: u16,
    /// 0 (`BI_RGB`) or 3 (`BI_BITFIELDS`).
    pub compression: u32,
}

impl BmpHeader {
    /// Parse and validate the header of a seekable source.
    ///
    /// Fails with [`RenderError::InvalidFormat`] when the signature is not
    /// `BM`, [`RenderError::UnsupportedPlanes`] when the plane count is not
    /// 1, and [`RenderError::UnsupportedEncoding`] for any bit depth or
    /// compression outside the supported set. Leaves the source position
    /// unspecified.
    pub fn parse<F: Read + Seek>(file: &mut F) -> Result<Self, RenderError> {
        let mut signature = [0u8; 2];
        file.seek(SeekFrom::Start(0)).map_err(RenderError::io)?;
        file.read_exact(&mut signature)
            .map_err(|_| RenderError::InvalidFormat)?;
        if signature != *b"BM" {
            return Err(RenderError::InvalidFormat);
        }

        let file_size = read_u32_at(file, OFF_FILE_SIZE)?;
        let data_offset = read_u32_at(file, OFF_DATA_OFFSET)?;
        let header_size = read_u32_at(file, OFF_HEADER_SIZE)?;
        let width = read_u32_at(file, OFF_WIDTH)?;
        let raw_height = read_u32_at(file, OFF_HEIGHT)? as i32;
        let planes = read_u16_at(file, OFF_PLANES)?;
        let depth = read_u16_at(file, OFF_DEPTH)?;
        let compression = read_u32_at(file, OFF_COMPRESSION)?;

        if planes != 1 {
            return Err(RenderError::UnsupportedPlanes(planes));
        }
        if !matches!(depth, 1 | 2 | 4 | 8 | 16 | 24 | 32)
            || !matches!(compression, COMPRESSION_RGB | COMPRESSION_BITFIELDS)
        {
            return Err(RenderError::UnsupportedEncoding { depth, compression });
        }

        let (height, top_down) = if raw_height < 0 {
            (raw_height.unsigned_abs(), true)
        } else {
            (raw_height as u32, false)
        };

        Ok(BmpHeader {
            file_size,
            data_offset,
            header_size,
            width,
            height,
            top_down,
            planes,
            depth,
            compression,
        })
    }

    /// Byte length of one stored row, padded to the 4-byte boundary the
    /// format requires.
    pub fn row_stride(&self) -> u64 {
        (u64::from(self.width) * u64::from(self.depth) + 31) / 32 * 4
    }
}

fn read_u16_at<F: Read + Seek>(file: &mut F, offset: u64) -> Result<u16, RenderError> {
    let mut bytes = [0u8; 2];
    file.seek(SeekFrom::Start(offset)).map_err(RenderError::io)?;
    file.read_exact(&mut bytes)
        .map_err(|e| RenderError::read_exact(e, offset))?;
    Ok(u16::from_le_bytes(bytes))
}

fn read_u32_at<F: Read + Seek>(file: &mut F, offset: u64) -> Result<u32, RenderError> {
    let mut bytes = [0u8; 4];
    file.seek(SeekFrom::Start(offset)).map_err(RenderError::io)?;
    file.read_exact(&mut bytes)
        .map_err(|e| RenderError::read_exact(e, offset))?;
    Ok(u32::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(width: u32, depth: u16) -> BmpHeader {
        BmpHeader {
            file_size: 0,
            data_offset: 54,
            header_size: 40,
            width,
            height: 1,
            top_down: false,
            planes: 1,
            depth,
            compression: COMPRESSION_RGB,
        }
    }

    #[test]
    fn stride_is_padded_to_four_bytes() {
        for depth in [1u16, 2, 4, 8, 16, 24, 32] {
            for width in 1..=33u32 {
                let stride = header(width, depth).row_stride();
                assert_eq!(stride % 4, 0, "width {width} depth {depth}");
                assert!(
                    stride >= (u64::from(width) * u64::from(depth)).div_ceil(8),
                    "width {width} depth {depth}"
                );
            }
        }
    }

    #[test]
    fn stride_matches_known_cases() {
        assert_eq!(header(3, 4).row_stride(), 4); // 2 bytes of pixels, padded
        assert_eq!(header(4, 24).row_stride(), 12);
        assert_eq!(header(5, 24).row_stride(), 16);
        assert_eq!(header(8, 1).row_stride(), 4);
    }
}
