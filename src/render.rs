//! Render orchestration: clipping, the page loop, and error cleanup.

use embedded_io::{Read, Seek};
use enough::{Stop, Unstoppable};

use crate::decode::PixelDecoder;
use crate::display::{ColorMode, DisplaySink, Watchdog, Window};
use crate::error::RenderError;
use crate::header::{BmpHeader, COMPRESSION_RGB};
use crate::limits::Limits;
use crate::palette::Palette;
use crate::pixel::{ColorConverter, PackedLayout, Rgb565};
use crate::storage::Storage;
use crate::stream::RowStreamer;

/// Render the image at `path` with the panel origin `(x, y)` and default
/// options. See [`RenderRequest`] for the configurable form.
pub fn render<S: Storage, D: DisplaySink>(
    storage: &mut S,
    display: &mut D,
    path: &str,
    x: i16,
    y: i16,
) -> Result<(), RenderError> {
    RenderRequest::new(path)
        .at(x, y)
        .render(storage, display, &Unstoppable)
}

/// A configured render, built up and then consumed by
/// [`render`](Self::render).
///
/// ```no_run
/// # use bmpstream::{ColorMode, Limits, RenderRequest, Unstoppable};
/// # fn demo<S: bmpstream::Storage, D: bmpstream::DisplaySink>(
/// #     storage: &mut S, display: &mut D,
/// # ) -> Result<(), bmpstream::RenderError> {
/// RenderRequest::new("logo.bmp")
///     .at(16, 8)
///     .full_window(false)
///     .color_mode(ColorMode::Monochrome)
///     .with_limits(Limits { max_pixels: Some(1 << 20), ..Limits::default() })
///     .render(storage, display, &Unstoppable)
/// # }
/// ```
pub struct RenderRequest<'a> {
    path: &'a str,
    x: i16,
    y: i16,
    full_window: bool,
    overwrite: bool,
    color_mode: ColorMode,
    palette: Option<&'a [Rgb565]>,
    limits: Limits,
    watchdog: Option<&'a mut dyn Watchdog>,
}

impl<'a> RenderRequest<'a> {
    pub fn new(path: &'a str) -> Self {
        RenderRequest {
            path,
            x: 0,
            y: 0,
            full_window: true,
            overwrite: true,
            color_mode: ColorMode::default(),
            palette: None,
            limits: Limits::default(),
            watchdog: None,
        }
    }

    /// Panel origin of the image's top-left corner.
    pub fn at(mut self, x: i16, y: i16) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// `false` windows the sink to just the drawn region, for panels with
    /// partial refresh. Sink configuration only; decode is unaffected.
    pub fn full_window(mut self, full: bool) -> Self {
        self.full_window = full;
        self
    }

    /// `false` skips the background clear and composites over whatever the
    /// panel already shows.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = mode;
        self
    }

    /// Use a pre-converted palette for indexed depths instead of the
    /// file's own color table.
    pub fn with_palette(mut self, palette: &'a [Rgb565]) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Reject images larger than these bounds before any pixel I/O.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Keep-alive hook, ticked once per decoded row.
    pub fn with_watchdog(mut self, watchdog: &'a mut dyn Watchdog) -> Self {
        self.watchdog = Some(watchdog);
        self
    }

    /// Run the render. Any error is terminal for this image: the source
    /// handle is dropped and, if pixels were already drawn, the panel is
    /// cleared rather than left half-rendered.
    pub fn render<S: Storage, D: DisplaySink>(
        self,
        storage: &mut S,
        display: &mut D,
        stop: &dyn Stop,
    ) -> Result<(), RenderError> {
        log::info!("rendering '{}'", self.path);
        let result = self.run(storage, display, stop);
        match &result {
            Ok(()) => log::info!("render complete"),
            Err(err) => log::warn!("render aborted: {err}"),
        }
        result
    }

    fn run<S: Storage, D: DisplaySink>(
        mut self,
        storage: &mut S,
        display: &mut D,
        stop: &dyn Stop,
    ) -> Result<(), RenderError> {
        let mut file = storage.open(self.path).ok_or(RenderError::NotFound)?;
        let header = BmpHeader::parse(&mut file)?;
        self.limits.check(header.width, header.height)?;

        // Clip against the panel. An origin off the panel is a no-op, as is
        // an image whose visible region is empty.
        let (dest_w, dest_h) = (display.width(), display.height());
        if self.x < 0 || self.y < 0 || self.x as u16 >= dest_w || self.y as u16 >= dest_h {
            return Ok(());
        }
        let (x, y) = (self.x as u16, self.y as u16);
        let draw_w = header.width.min(u32::from(dest_w - x)) as u16;
        let draw_h = header.height.min(u32::from(dest_h - y)) as u16;

        let palette = match self.palette {
            _ if header.depth > 8 => Palette::empty(),
            Some(colors) => Palette::from_colors(colors),
            None => Palette::from_file(&mut file, &header)?,
        };
        let converter = ColorConverter {
            packed: if header.compression == COMPRESSION_RGB {
                PackedLayout::Rgb555
            } else {
                PackedLayout::Rgb565
            },
            palette: &palette,
        };

        display.set_color_mode(self.color_mode);
        display.set_window(if self.full_window {
            Window::Full
        } else {
            Window::Region {
                x,
                y,
                width: draw_w,
                height: draw_h,
            }
        });
        if self.overwrite {
            display.clear(Rgb565::WHITE);
        }

        let mut streamer = RowStreamer::new(&mut file, &header);
        let mut decoder = PixelDecoder::new(header.depth);

        // Paged panels request the pixel stream once per page; each pass
        // re-seeks the source and replays the identical stream.
        display.first_page();
        loop {
            if let Err(err) = draw_page(
                &mut streamer,
                &mut decoder,
                &converter,
                display,
                &header,
                (x, y),
                (draw_w, draw_h),
                &mut self.watchdog,
                stop,
            ) {
                display.clear(Rgb565::WHITE);
                return Err(err);
            }
            if !display.next_page() {
                break;
            }
        }
        Ok(())
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_page<F: Read + Seek, D: DisplaySink>(
    streamer: &mut RowStreamer<'_, F>,
    decoder: &mut PixelDecoder,
    converter: &ColorConverter<'_>,
    display: &mut D,
    header: &BmpHeader,
    (x, y): (u16, u16),
    (draw_w, draw_h): (u16, u16),
    watchdog: &mut Option<&mut dyn Watchdog>,
    stop: &dyn Stop,
) -> Result<(), RenderError> {
    for row in 0..draw_h {
        stop.check()?;
        if let Some(watchdog) = watchdog.as_mut() {
            watchdog.tick();
        }

        // Bottom-up files store the topmost visible row last; re-seeking
        // per row yields rows in top-down emission order either way.
        let source_row = if header.top_down {
            u32::from(row)
        } else {
            header.height - 1 - u32::from(row)
        };
        streamer.begin_row(source_row)?;
        decoder.begin_row();

        for col in 0..draw_w {
            let raw = decoder.next(streamer)?;
            display.draw_pixel(x + col, y + row, converter.convert(raw));
        }
    }
    Ok(())
}
