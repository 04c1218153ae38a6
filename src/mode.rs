//! The scene-wide scatter/tree mode and the signal that carries it

use std::sync::atomic::{AtomicU8, Ordering};
use serde::{Deserialize, Serialize};

/// Which layout every animation group is heading toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeMode {
    Scattered,
    #[default]
    TreeShape,
}

impl TreeMode {
    /// Progress value this mode pulls toward
    pub fn target(self) -> f32 {
        match self {
            TreeMode::Scattered => 0.0,
            TreeMode::TreeShape => 1.0,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            TreeMode::Scattered => TreeMode::TreeShape,
            TreeMode::TreeShape => TreeMode::Scattered,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TreeMode::Scattered => "scattered",
            TreeMode::TreeShape => "tree shape",
        }
    }

    fn to_bits(self) -> u8 {
        match self {
            TreeMode::Scattered => 0,
            TreeMode::TreeShape => 1,
        }
    }

    fn from_bits(bits: u8) -> Self {
        if bits == 0 {
            TreeMode::Scattered
        } else {
            TreeMode::TreeShape
        }
    }
}

/// Mode cell written by the UI and read by every group once per frame.
///
/// Replaced atomically; readers only ever see a whole mode, possibly one
/// frame stale.
#[derive(Debug)]
pub struct ModeSignal(AtomicU8);

impl ModeSignal {
    pub fn new(mode: TreeMode) -> Self {
        Self(AtomicU8::new(mode.to_bits()))
    }

    pub fn get(&self) -> TreeMode {
        TreeMode::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub fn set(&self, mode: TreeMode) {
        self.0.store(mode.to_bits(), Ordering::Relaxed);
    }

    /// Flip the mode and return the new value
    pub fn toggle(&self) -> TreeMode {
        let previous = self.0.fetch_xor(1, Ordering::Relaxed);
        TreeMode::from_bits(previous ^ 1)
    }
}

impl Default for ModeSignal {
    fn default() -> Self {
        Self::new(TreeMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets() {
        assert_eq!(TreeMode::Scattered.target(), 0.0);
        assert_eq!(TreeMode::TreeShape.target(), 1.0);
    }

    #[test]
    fn test_signal_toggle_round_trip() {
        let signal = ModeSignal::new(TreeMode::Scattered);
        assert_eq!(signal.toggle(), TreeMode::TreeShape);
        assert_eq!(signal.get(), TreeMode::TreeShape);
        assert_eq!(signal.toggle(), TreeMode::Scattered);
        signal.set(TreeMode::TreeShape);
        assert_eq!(signal.get(), TreeMode::TreeShape);
    }

    #[test]
    fn test_mode_yaml_names() {
        let mode: TreeMode = serde_yaml::from_str("scattered").unwrap();
        assert_eq!(mode, TreeMode::Scattered);
        let mode: TreeMode = serde_yaml::from_str("tree_shape").unwrap();
        assert_eq!(mode, TreeMode::TreeShape);
    }
}
