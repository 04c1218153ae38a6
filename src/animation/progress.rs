//! Per-group progress that chases the mode target

use crate::mode::TreeMode;

/// Fraction of the remaining distance covered each frame, strictly inside (0, 1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproachRate(f32);

impl ApproachRate {
    /// `None` unless `0 < rate < 1`
    pub fn new(rate: f32) -> Option<Self> {
        if rate > 0.0 && rate < 1.0 {
            Some(Self(rate))
        } else {
            None
        }
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

/// First-order exponential approach toward 0 or 1.
///
/// `current += (target - current) * rate` once per frame. With the target
/// in `{0, 1}` and the rate in `(0, 1)` the value never leaves `[0, 1]`,
/// and a target flip continues smoothly from wherever it currently is.
#[derive(Debug, Clone, Copy)]
pub struct ProgressController {
    current: f32,
    rate: ApproachRate,
}

impl ProgressController {
    pub fn new(rate: ApproachRate) -> Self {
        Self { current: 0.0, rate }
    }

    /// Advance one frame toward the mode's target and return the new progress
    pub fn update(&mut self, mode: TreeMode) -> f32 {
        self.step_toward(mode.target())
    }

    pub fn step_toward(&mut self, target: f32) -> f32 {
        self.current += (target - self.current) * self.rate.get();
        self.current
    }

    pub fn progress(&self) -> f32 {
        self.current
    }

    pub fn rate(&self) -> ApproachRate {
        self.rate
    }

    /// Jump straight to a progress value, e.g. to start a scene already assembled
    pub fn snap_to(&mut self, progress: f32) {
        self.current = progress.clamp(0.0, 1.0);
    }

    pub fn is_settled(&self, mode: TreeMode, epsilon: f32) -> bool {
        (mode.target() - self.current).abs() <= epsilon
    }
}
