#![no_main]
use bmpstream::{DisplaySink, Limits, RenderRequest, Rgb565, SliceStorage, Window};
use libfuzzer_sys::fuzz_target;

/// Panel that only checks the renderer's coordinate discipline.
struct BoundsSink;

impl DisplaySink for BoundsSink {
    fn width(&self) -> u16 {
        64
    }

    fn height(&self) -> u16 {
        64
    }

    fn set_window(&mut self, _window: Window) {}

    fn clear(&mut self, _color: Rgb565) {}

    fn draw_pixel(&mut self, x: u16, y: u16, _color: Rgb565) {
        assert!(x < 64 && y < 64, "pixel ({x},{y}) is off the panel");
    }
}

fuzz_target!(|data: &[u8]| {
    // Rendering arbitrary bytes must never panic and never emit an
    // out-of-bounds pixel. Limits keep degenerate headers from turning
    // into minute-long renders.
    let images = [("fuzz.bmp", data)];
    let mut storage = SliceStorage::new(&images);
    let mut sink = BoundsSink;
    let _ = RenderRequest::new("fuzz.bmp")
        .with_limits(Limits {
            max_pixels: Some(1 << 16),
            ..Limits::default()
        })
        .render(&mut storage, &mut sink, &enough::Unstoppable);
});
