//! Time to pixel mapping for timeline editing surfaces

/// Smallest and largest zoom factors
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 3.0;
/// Zoom change per zoom-in/zoom-out step
pub const ZOOM_STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineScale {
    /// Width of the full timeline at zoom 1
    pub base_pixel_width: f64,
    pub zoom: f64,
}

impl Default for TimelineScale {
    fn default() -> Self {
        Self {
            base_pixel_width: 800.0,
            zoom: 1.0,
        }
    }
}

impl TimelineScale {
    pub fn new(base_pixel_width: f64, zoom: f64) -> Self {
        let mut scale = Self {
            base_pixel_width,
            zoom: 1.0,
        };
        scale.set_zoom(zoom);
        scale
    }

    /// Horizontal offset of `time` on a timeline of length `duration`
    pub fn time_to_pixels(&self, time: f64, duration: f64) -> f64 {
        (time / duration) * self.base_pixel_width * self.zoom
    }

    /// Inverse of [`time_to_pixels`](Self::time_to_pixels)
    pub fn pixels_to_time(&self, pixels: f64, duration: f64) -> f64 {
        pixels / (self.base_pixel_width * self.zoom) * duration
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }
}
