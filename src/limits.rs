use crate::error::RenderError;

/// Dimension guards checked against the parsed header before any pixel I/O.
///
/// All fields default to `None` (no limit). The decode path itself uses no
/// heap and a fixed staging buffer, so these bound render *time* on huge
/// inputs, not memory.
#[derive(Clone, Copy, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
}

impl Limits {
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), RenderError> {
        let exceeded = self.max_width.is_some_and(|max| width > max)
            || self.max_height.is_some_and(|max| height > max)
            || self
                .max_pixels
                .is_some_and(|max| u64::from(width) * u64::from(height) > max);
        if exceeded {
            return Err(RenderError::LimitExceeded { width, height });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_limits_accept_anything() {
        assert!(Limits::default().check(u32::MAX, u32::MAX).is_ok());
    }

    #[test]
    fn pixel_count_limit_catches_thin_huge_images() {
        let limits = Limits {
            max_pixels: Some(10_000),
            ..Limits::default()
        };
        assert!(limits.check(100, 100).is_ok());
        assert!(matches!(
            limits.check(2, 50_000),
            Err(RenderError::LimitExceeded { .. })
        ));
    }
}
