//! Display-side collaborators: the sink trait, its capability descriptors,
//! and the keep-alive hook.

use crate::pixel::Rgb565;

/// Destination window for a render, in panel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Window {
    /// The whole panel.
    Full,
    /// A sub-region; partial refresh on panels that support it.
    Region { x: u16, y: u16, width: u16, height: u16 },
}

/// Panel color capability, chosen by the caller and handed to the sink as a
/// configuration hint. Decode output is RGB565 either way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum ColorMode {
    #[default]
    Color,
    Monochrome,
}

/// The panel the renderer draws into.
///
/// Full-framebuffer drivers need only the required methods: pixels arrive
/// through `draw_pixel` and the default `next_page` presents once and ends
/// the render. Buffer-starved panels (e-paper drivers that hold a fraction
/// of the frame) override `first_page`/`next_page` and return `true` from
/// `next_page` while passes remain; the renderer then re-reads the source
/// and replays the identical pixel stream for every page. That trade-off
/// costs re-reads, never correctness.
pub trait DisplaySink {
    fn width(&self) -> u16;
    fn height(&self) -> u16;
    fn set_window(&mut self, window: Window);

    /// Configuration hint only; ignored by drivers without a mode switch.
    fn set_color_mode(&mut self, mode: ColorMode) {
        let _ = mode;
    }

    fn clear(&mut self, color: Rgb565);
    fn draw_pixel(&mut self, x: u16, y: u16, color: Rgb565);

    /// Start of the paged-refresh loop.
    fn first_page(&mut self) {}

    /// Present what was drawn. Return `true` to request the full pixel
    /// stream again for the next page.
    fn next_page(&mut self) -> bool {
        false
    }
}

/// External keep-alive hook, ticked at least once per decoded row so a long
/// render does not trip a hardware watchdog.
pub trait Watchdog {
    fn tick(&mut self);
}

impl Watchdog for () {
    fn tick(&mut self) {}
}

impl<F: FnMut()> Watchdog for F {
    fn tick(&mut self) {
        self()
    }
}
