//! Palette table for indexed depths.

use embedded_io::{Read, Seek, SeekFrom};

use crate::error::RenderError;
use crate::header::BmpHeader;
use crate::pixel::Rgb565;

const PALETTE_CAPACITY: usize = 256;

/// Up to 256 colors already converted to the target format, indexed by
/// decoded pixel value. Immutable once loaded; entries the source never
/// populated read black, so lookup is total over every index a supported
/// depth can produce.
pub(crate) struct Palette {
    colors: [Rgb565; PALETTE_CAPACITY],
}

impl Palette {
    pub(crate) const fn empty() -> Self {
        Palette {
            colors: [Rgb565::BLACK; PALETTE_CAPACITY],
        }
    }

    /// Caller-supplied table, overriding the file's color table.
    pub(crate) fn from_colors(colors: &[Rgb565]) -> Self {
        let mut palette = Palette::empty();
        let n = colors.len().min(PALETTE_CAPACITY);
        palette.colors[..n].copy_from_slice(&colors[..n]);
        palette
    }

    /// Load the file's own color table: 4-byte BGRX entries between the end
    /// of the info header and the pixel data. Truncated tables load what is
    /// there; the entry count never exceeds what the depth can index.
    pub(crate) fn from_file<F: Read + Seek>(
        file: &mut F,
        header: &BmpHeader,
    ) -> Result<Self, RenderError> {
        let table_start = 14 + u64::from(header.header_size);
        let table_end = u64::from(header.data_offset);
        let available = (table_end.saturating_sub(table_start) / 4) as usize;
        let entries = (1usize << header.depth).min(available);

        let mut palette = Palette::empty();
        file.seek(SeekFrom::Start(table_start))
            .map_err(RenderError::io)?;
        let mut offset = table_start;
        for slot in palette.colors.iter_mut().take(entries) {
            let mut entry = [0u8; 4];
            file.read_exact(&mut entry)
                .map_err(|e| RenderError::read_exact(e, offset))?;
            let [b, g, r, _reserved] = entry;
            *slot = Rgb565::from_rgb888(r, g, b);
            offset += 4;
        }
        Ok(palette)
    }

    pub(crate) fn get(&self, index: u8) -> Rgb565 {
        self.colors[usize::from(index)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::COMPRESSION_RGB;
    use crate::storage::SliceFile;

    #[test]
    fn file_table_entries_are_bgrx_and_land_converted() {
        // 14-byte file header + 40-byte info header, then two entries:
        // pure blue and pure red.
        let mut data = [0u8; 54 + 8];
        data[54..58].copy_from_slice(&[0xFF, 0x00, 0x00, 0x00]);
        data[58..62].copy_from_slice(&[0x00, 0x00, 0xFF, 0x00]);
        let header = BmpHeader {
            file_size: 0,
            data_offset: 62,
            header_size: 40,
            width: 1,
            height: 1,
            top_down: false,
            planes: 1,
            depth: 1,
            compression: COMPRESSION_RGB,
        };

        let mut file = SliceFile::new(&data);
        let palette = Palette::from_file(&mut file, &header).unwrap();
        assert_eq!(palette.get(0), Rgb565(0x001F));
        assert_eq!(palette.get(1), Rgb565(0xF800));
        // Beyond the table: unpopulated entries read black.
        assert_eq!(palette.get(2), Rgb565::BLACK);
    }

    #[test]
    fn external_table_overrides_nothing_past_its_length() {
        let palette = Palette::from_colors(&[Rgb565::WHITE]);
        assert_eq!(palette.get(0), Rgb565::WHITE);
        assert_eq!(palette.get(1), Rgb565::BLACK);
    }
}
