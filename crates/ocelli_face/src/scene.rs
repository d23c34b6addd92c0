//! Scene arena
//!
//! Draw nodes live in a slotmap with parent links: a root, one container per
//! eye, and at most one lid-mask child per container. A mask inherits its
//! container's vertical offset through the parent link, so nodding and
//! breathing move lids and dots together. Masks are addressed by eye side,
//! never by a retained key.

use crate::eye::EyeSide;
use crate::lid::LidShape;
use ocelli_animation::AnimationError;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct NodeId;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeKind {
    Root,
    Container(EyeSide),
    LidMask(LidShape),
}

#[derive(Clone, Debug)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
    /// Vertical offset relative to the parent
    pub offset_y: f32,
}

#[derive(Debug)]
pub struct Scene {
    nodes: SlotMap<NodeId, Node>,
    containers: [NodeId; 2],
    masks: [Option<NodeId>; 2],
}

fn slot(side: EyeSide) -> usize {
    match side {
        EyeSide::Left => 0,
        EyeSide::Right => 1,
    }
}

impl Scene {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node {
            parent: None,
            kind: NodeKind::Root,
            offset_y: 0.0,
        });
        let mut container = |side| {
            nodes.insert(Node {
                parent: Some(root),
                kind: NodeKind::Container(side),
                offset_y: 0.0,
            })
        };
        let containers = [container(EyeSide::Left), container(EyeSide::Right)];
        Self {
            nodes,
            containers,
            masks: [None, None],
        }
    }

    /// Container node of an eye
    pub fn container(&self, side: EyeSide) -> NodeId {
        self.containers[slot(side)]
    }

    fn container_mut(&mut self, side: EyeSide) -> Result<&mut Node, AnimationError> {
        self.nodes
            .get_mut(self.containers[slot(side)])
            .ok_or(AnimationError::MissingTarget {
                animation: "scene",
                target: "eye container",
            })
    }

    /// Vertical offset of an eye container
    pub fn container_offset(&self, side: EyeSide) -> f32 {
        self.nodes
            .get(self.containers[slot(side)])
            .map_or(0.0, |node| node.offset_y)
    }

    pub fn set_container_offset(
        &mut self,
        side: EyeSide,
        offset_y: f32,
    ) -> Result<(), AnimationError> {
        self.container_mut(side)?.offset_y = offset_y;
        Ok(())
    }

    /// Set both containers to the same offset
    pub fn set_offsets(&mut self, offset_y: f32) -> Result<(), AnimationError> {
        for side in EyeSide::BOTH {
            self.set_container_offset(side, offset_y)?;
        }
        Ok(())
    }

    /// Accumulated vertical offset of a node through its parents
    pub fn world_offset(&self, id: NodeId) -> f32 {
        let mut offset = 0.0;
        let mut cursor = Some(id);
        while let Some(node) = cursor.and_then(|id| self.nodes.get(id)) {
            offset += node.offset_y;
            cursor = node.parent;
        }
        offset
    }

    pub fn mask(&self, side: EyeSide) -> Option<LidShape> {
        let id = self.masks[slot(side)]?;
        match self.nodes.get(id)?.kind {
            NodeKind::LidMask(shape) => Some(shape),
            _ => None,
        }
    }

    /// Set the lid shape of an eye, creating the mask node on first need.
    pub fn set_mask(&mut self, side: EyeSide, shape: LidShape) {
        if let Some(node) = self.masks[slot(side)].and_then(|id| self.nodes.get_mut(id)) {
            node.kind = NodeKind::LidMask(shape);
            return;
        }
        let id = self.nodes.insert(Node {
            parent: Some(self.containers[slot(side)]),
            kind: NodeKind::LidMask(shape),
            offset_y: 0.0,
        });
        self.masks[slot(side)] = Some(id);
    }

    /// Set the same lid shape on both eyes
    pub fn set_masks(&mut self, shape: LidShape) {
        for side in EyeSide::BOTH {
            self.set_mask(side, shape);
        }
    }

    /// Update existing masks only; eyes without a mask stay unmasked.
    pub fn update_masks(&mut self, shape: LidShape) {
        for side in EyeSide::BOTH {
            if self.masks[slot(side)].is_some() {
                self.set_mask(side, shape);
            }
        }
    }

    /// Destroy both lid masks
    pub fn clear_masks(&mut self) {
        for mask in &mut self.masks {
            if let Some(id) = mask.take() {
                self.nodes.remove(id);
            }
        }
    }

    pub fn mask_count(&self) -> usize {
        self.masks.iter().flatten().count()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
