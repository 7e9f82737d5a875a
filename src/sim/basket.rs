//! The player's basket
//!
//! Horizontal position driven by tilt samples, vertical position anchored to
//! the bottom of the screen. Position is re-clamped after every mutation so
//! the basket rectangle never leaves the screen.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::clamp_to_span;
use crate::consts::*;

/// Basket size state (only one non-normal state at a time)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SizeState {
    #[default]
    Normal,
    Enlarged,
    Shrunk,
}

impl SizeState {
    /// Scale relative to normal dimensions
    pub fn scale(self) -> f32 {
        match self {
            SizeState::Normal => 1.0,
            SizeState::Enlarged => ENLARGED_SCALE,
            SizeState::Shrunk => SHRUNK_SCALE,
        }
    }
}

/// Outcome of an enlarge/shrink pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTransition {
    /// Opposite state cancelled out, basket back to normal
    Reverted,
    /// Basket entered the requested state
    Entered,
    /// Basket was already in the requested state
    Refreshed,
}

/// Five-way visual lean bucket (rendering only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lean {
    FarLeft,
    Left,
    Center,
    Right,
    FarRight,
}

impl Lean {
    /// Bucket a relative position in `[0, 1]`
    pub fn from_relative(relative_x: f32) -> Self {
        if relative_x < 0.2 {
            Lean::FarLeft
        } else if relative_x < 0.4 {
            Lean::Left
        } else if relative_x < 0.6 {
            Lean::Center
        } else if relative_x < 0.8 {
            Lean::Right
        } else {
            Lean::FarRight
        }
    }
}

/// The player's basket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    /// Left edge
    pub x: f32,
    /// Width in the normal size state
    pub normal_width: f32,
    /// Height in the normal size state
    pub normal_height: f32,
    pub size: SizeState,
    screen_width: f32,
    screen_height: f32,
    bottom_margin: f32,
}

impl Basket {
    /// Create a normal-size basket centered horizontally
    pub fn new(
        normal_width: f32,
        normal_height: f32,
        screen_width: f32,
        screen_height: f32,
        bottom_margin: f32,
    ) -> Self {
        let mut basket = Self {
            x: (screen_width - normal_width) / 2.0,
            normal_width,
            normal_height,
            size: SizeState::Normal,
            screen_width,
            screen_height,
            bottom_margin,
        };
        basket.clamp();
        basket
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.normal_width * self.size.scale()
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.normal_height * self.size.scale()
    }

    /// Top edge (bottom edge stays at a fixed margin above the screen bottom)
    #[inline]
    pub fn y(&self) -> f32 {
        self.screen_height - self.bottom_margin - self.height()
    }

    /// Rightmost allowed left-edge position for the current size
    #[inline]
    pub fn max_x(&self) -> f32 {
        (self.screen_width - self.width()).max(0.0)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width() / 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y(), self.width(), self.height())
    }

    /// Visual lean bucket from the relative horizontal position
    pub fn lean(&self) -> Lean {
        let relative = self.x / self.max_x().max(1.0);
        Lean::from_relative(relative)
    }

    /// Apply one tilt sample
    pub fn apply_tilt(&mut self, sample: f32) {
        if !sample.is_finite() {
            return;
        }
        self.x += sample * TILT_SCALE;
        self.clamp();
    }

    /// ENLARGE pickup
    pub fn enlarge(&mut self) -> SizeTransition {
        self.transition(SizeState::Enlarged, SizeState::Shrunk)
    }

    /// SHRINK pickup
    pub fn shrink(&mut self) -> SizeTransition {
        self.transition(SizeState::Shrunk, SizeState::Enlarged)
    }

    /// Restore normal dimensions; returns the state that was reverted
    pub fn revert(&mut self) -> Option<SizeState> {
        match self.size {
            SizeState::Normal => None,
            previous => {
                self.set_size(SizeState::Normal);
                Some(previous)
            }
        }
    }

    fn transition(&mut self, target: SizeState, opposite: SizeState) -> SizeTransition {
        if self.size == opposite {
            self.set_size(SizeState::Normal);
            SizeTransition::Reverted
        } else if self.size == target {
            SizeTransition::Refreshed
        } else {
            self.set_size(target);
            SizeTransition::Entered
        }
    }

    fn set_size(&mut self, size: SizeState) {
        self.size = size;
        self.clamp();
    }

    fn clamp(&mut self) {
        self.x = clamp_to_span(self.x, self.screen_width - self.width());
    }
}
