//! # bmpstream
//!
//! Streaming Windows-BMP renderer for memory-constrained pixel displays.
//!
//! The whole pipeline runs over a fixed few-hundred-byte staging buffer:
//! block storage → header parse → row streaming → pixel decode → RGB565 →
//! display sink. An image many times larger than the device's RAM renders
//! row by row, re-seeking the source for each row so bottom-up files come
//! out in top-down emission order.
//!
//! ## Supported encodings
//!
//! Uncompressed (`BI_RGB`) and bitfields (`BI_BITFIELDS`) BMPs at 1, 2, 4
//! and 8 bits per pixel (palette indexed), 16 bits (5-5-5 under `BI_RGB`,
//! 5-6-5 under `BI_BITFIELDS`), 24 bits, and 32 bits (alpha discarded).
//! Every pixel is truncated to the RGB565 target; 5-6-5 sources pass
//! through bit-identical.
//!
//! ## Non-goals
//!
//! RLE-compressed BMPs, BMP writing, other image formats, and any
//! quantization or dithering beyond direct channel truncation. Unsupported
//! input fails the whole render; the panel is never left half-drawn.
//!
//! ## Collaborators
//!
//! The block storage ([`Storage`], with `embedded-io` file handles), the
//! panel ([`DisplaySink`], including the paged-refresh contract of
//! buffer-starved e-paper drivers), the keep-alive hook ([`Watchdog`]),
//! cancellation ([`Stop`]) and the `log` facade are all supplied by the
//! caller; this crate only decodes and pushes pixels.
//!
//! ## Usage
//!
//! ```no_run
//! use bmpstream::{DisplaySink, Rgb565, SliceStorage, Window, render};
//!
//! # struct Panel;
//! # impl DisplaySink for Panel {
//! #     fn width(&self) -> u16 { 250 }
//! #     fn height(&self) -> u16 { 122 }
//! #     fn set_window(&mut self, _: Window) {}
//! #     fn clear(&mut self, _: Rgb565) {}
//! #     fn draw_pixel(&mut self, _: u16, _: u16, _: Rgb565) {}
//! # }
//! # let mut panel = Panel;
//! let splash: &[u8] = &[]; // e.g. include_bytes!("splash.bmp")
//! let images = [("splash.bmp", splash)];
//! let mut storage = SliceStorage::new(&images);
//!
//! render(&mut storage, &mut panel, "splash.bmp", 0, 0)?;
//! # Ok::<(), bmpstream::RenderError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

mod decode;
mod display;
mod error;
mod header;
mod limits;
mod palette;
mod pixel;
mod render;
mod storage;
mod stream;

// Re-exports
pub use display::{ColorMode, DisplaySink, Watchdog, Window};
pub use enough::{Stop, Unstoppable};
pub use error::RenderError;
pub use header::BmpHeader;
pub use limits::Limits;
pub use pixel::Rgb565;
pub use render::{RenderRequest, render};
pub use storage::{SliceFile, SliceStorage, Storage};
