//! Pointer sampling.
//!
//! Keeps only the latest pointer position, normalized to [-1, 1] per axis
//! with y inverted so up is positive (screen rows grow downward).
//! Intermediate events are overwritten; there is no queue and no smoothing.

/// One normalized pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// [-1, 1], left to right.
    pub x: f64,
    /// [-1, 1], bottom to top.
    pub y: f64,
}

/// Latest-sample-only pointer state. `None` until the first event arrives.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerSampler {
    sample: Option<PointerSample>,
}

impl PointerSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer position given as a terminal cell within a
    /// `width` x `height` grid. Cell centers are used so the sample spans
    /// the full [-1, 1] range symmetrically. Degenerate sizes are ignored.
    pub fn record_cell(&mut self, column: u16, row: u16, width: u16, height: u16) {
        if width == 0 || height == 0 {
            return;
        }

        let x = (column as f64 + 0.5) / width as f64 * 2.0 - 1.0;
        let y = -((row as f64 + 0.5) / height as f64 * 2.0 - 1.0);
        self.sample = Some(PointerSample { x, y });
    }

    /// The last-known sample, if the pointer has been seen at all.
    pub fn latest(&self) -> Option<PointerSample> {
        self.sample
    }
}
