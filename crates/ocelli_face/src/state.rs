//! The shared record every animation steps against

use crate::expression::ExpressionFlags;
use crate::eye::Eyes;
use crate::scene::Scene;
use ocelli_paint::Size;

#[derive(Debug)]
pub struct FaceState {
    pub eyes: Eyes,
    pub flags: ExpressionFlags,
    pub scene: Scene,
}

impl FaceState {
    pub fn new(size: Size) -> Self {
        Self {
            eyes: Eyes::layout(size),
            flags: ExpressionFlags::default(),
            scene: Scene::new(),
        }
    }
}
