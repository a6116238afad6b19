//! Hover tilt for project cards.
//!
//! Pointer moves are coalesced to one transform per animation frame: the
//! first move after a frame asks the shell for a frame, later moves only
//! replace the remembered pointer position.

use folio_ui::Point;

use crate::constants::tilt::{
    HOVER_PERSPECTIVE_PX, MAX_ROTATION_DEG, RELEASE_TRANSITION, REST_PERSPECTIVE_PX,
    TRACKING_TRANSITION,
};

/// Rotation `(x, y)` in degrees for a pointer at `pos` on a `width` x `height` card.
pub fn tilt_angles(pos: Point, width: f32, height: f32) -> (f32, f32) {
    if width <= 0.0 || height <= 0.0 {
        return (0.0, 0.0);
    }
    let x_rotation = MAX_ROTATION_DEG * ((pos.y - height / 2.0) / height);
    let y_rotation = -MAX_ROTATION_DEG * ((pos.x - width / 2.0) / width);
    (x_rotation, y_rotation)
}

fn hover_transform(x_rotation: f32, y_rotation: f32) -> String {
    format!(
        "perspective({}px) rotateX({}deg) rotateY({}deg)",
        HOVER_PERSPECTIVE_PX, x_rotation, y_rotation
    )
}

fn rest_transform() -> String {
    format!(
        "perspective({}px) rotateX(0deg) rotateY(0deg)",
        REST_PERSPECTIVE_PX
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PointerSample {
    pos: Point,
    width: f32,
    height: f32,
}

/// Tilt state of one card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardTilt {
    frame_pending: bool,
    latest: Option<PointerSample>,
    transform: String,
    transition: &'static str,
}

impl Default for CardTilt {
    fn default() -> Self {
        Self {
            frame_pending: false,
            latest: None,
            transform: rest_transform(),
            transition: RELEASE_TRANSITION,
        }
    }
}

impl CardTilt {
    /// Pointer entered the card: follow it without easing.
    pub fn enter(&mut self) {
        self.transition = TRACKING_TRANSITION;
    }

    /// Pointer moved. Returns `true` when the caller must schedule a frame.
    pub fn pointer_moved(&mut self, pos: Point, width: f32, height: f32) -> bool {
        self.latest = Some(PointerSample { pos, width, height });
        if self.frame_pending {
            return false;
        }
        self.frame_pending = true;
        true
    }

    /// Animation frame fired: apply the latest pointer position.
    ///
    /// Frames that arrive after `leave` are ignored.
    pub fn frame(&mut self) -> bool {
        if !self.frame_pending {
            return false;
        }
        self.frame_pending = false;
        let Some(sample) = self.latest else {
            return false;
        };
        let (x, y) = tilt_angles(sample.pos, sample.width, sample.height);
        self.transform = hover_transform(x, y);
        true
    }

    /// Pointer left: drop any pending frame and ease back to rest.
    pub fn leave(&mut self) {
        self.frame_pending = false;
        self.latest = None;
        self.transition = RELEASE_TRANSITION;
        self.transform = rest_transform();
    }

    pub fn transform(&self) -> &str {
        &self.transform
    }

    pub fn transition(&self) -> &'static str {
        self.transition
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frame_pending
    }
}
