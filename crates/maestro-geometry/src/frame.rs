//! Frame behaviour requested by the read modifiers.

use crate::{Alignment, Point, Rect, Size};

/// How a reading modifier wants the host to size the decorated view's frame.
///
/// `Fill` only changes the frame; the size that gets read is still the
/// content's own size. Use the parent read path to read the container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FrameBehavior {
    #[default]
    Default,
    Fill,
}

/// Frame request handed to the host together with the modified view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameRequest {
    pub behavior: FrameBehavior,
    pub alignment: Alignment,
}

impl FrameRequest {
    pub const fn new(behavior: FrameBehavior, alignment: Alignment) -> Self {
        Self {
            behavior,
            alignment,
        }
    }

    /// Resolves the frame the host should give content of `content` size when
    /// `available` space is on offer, together with the content's placement.
    pub fn resolve(&self, available: Size, content: Size) -> (Size, Point) {
        match self.behavior {
            FrameBehavior::Default => (content, Point::ZERO),
            FrameBehavior::Fill => (available, self.alignment.offset(available, content)),
        }
    }

    /// Same as [`resolve`](Self::resolve) but returns the content rect inside the frame.
    pub fn content_rect(&self, available: Size, content: Size) -> Rect {
        let (_, origin) = self.resolve(available, content);
        Rect::from_origin_size(origin, content)
    }
}

impl Default for FrameRequest {
    fn default() -> Self {
        Self::new(FrameBehavior::Default, Alignment::CENTER)
    }
}
