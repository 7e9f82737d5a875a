//! Rendering collaborator interface
//!
//! The simulation never draws. The driver forwards object lifecycle, basket
//! and HUD changes to a `Renderer`; failures are reported and ignored.

use glam::Vec2;

use crate::error::CollaboratorError;
use crate::sim::{Lean, ObjectKind};

/// Basket geometry as shown on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasketView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub lean: Lean,
}

/// Sink for everything visible on screen
pub trait Renderer {
    /// A new falling object appeared
    fn create_object(&mut self, id: u32, kind: ObjectKind, pos: Vec2) -> Result<(), CollaboratorError>;
    /// A live object moved
    fn position_object(&mut self, id: u32, pos: Vec2) -> Result<(), CollaboratorError>;
    /// An object left the play field
    fn remove_object(&mut self, id: u32) -> Result<(), CollaboratorError>;
    /// Basket position, size or lean changed
    fn update_basket(&mut self, basket: BasketView) -> Result<(), CollaboratorError>;
    /// Score or lives changed
    fn update_hud(&mut self, score: u32, lives: u32) -> Result<(), CollaboratorError>;
}

/// Sprite name for a falling object
pub fn object_sprite(kind: ObjectKind) -> &'static str {
    match kind {
        ObjectKind::Positive => "positive",
        ObjectKind::Positive2 => "positive2",
        ObjectKind::Positive3 => "positive3",
        ObjectKind::Positive4 => "positive4",
        ObjectKind::Positive5 => "positive5",
        ObjectKind::LifeBoost => "life_boost",
        ObjectKind::Negative => "negative",
        ObjectKind::Enlarge => "enlarge",
        ObjectKind::Shrink => "shrink",
        ObjectKind::Random => "random",
        ObjectKind::Magnet => "magnet",
    }
}

/// Sprite name for the basket's lean bucket
pub fn basket_sprite(lean: Lean) -> &'static str {
    match lean {
        Lean::FarLeft => "basket_left2",
        Lean::Left => "basket_left",
        Lean::Center => "basket",
        Lean::Right => "basket_right",
        Lean::FarRight => "basket_right2",
    }
}

/// Headless renderer that traces draw calls to the log
#[derive(Debug, Default)]
pub struct LogRenderer {
    live: usize,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Objects currently on screen
    pub fn live_objects(&self) -> usize {
        self.live
    }
}

impl Renderer for LogRenderer {
    fn create_object(&mut self, id: u32, kind: ObjectKind, pos: Vec2) -> Result<(), CollaboratorError> {
        self.live += 1;
        log::trace!("create #{id} {} at ({:.0}, {:.0})", object_sprite(kind), pos.x, pos.y);
        Ok(())
    }

    fn position_object(&mut self, _id: u32, _pos: Vec2) -> Result<(), CollaboratorError> {
        Ok(())
    }

    fn remove_object(&mut self, id: u32) -> Result<(), CollaboratorError> {
        if self.live == 0 {
            return Err(CollaboratorError::UnknownObject { id });
        }
        self.live -= 1;
        log::trace!("remove #{id}");
        Ok(())
    }

    fn update_basket(&mut self, basket: BasketView) -> Result<(), CollaboratorError> {
        log::trace!(
            "basket {} at x={:.0} ({:.0}x{:.0})",
            basket_sprite(basket.lean),
            basket.x,
            basket.width,
            basket.height
        );
        Ok(())
    }

    fn update_hud(&mut self, score: u32, lives: u32) -> Result<(), CollaboratorError> {
        log::debug!("Score: {score}  Lives: {lives}");
        Ok(())
    }
}
