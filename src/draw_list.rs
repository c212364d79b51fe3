//! Per-frame draw queue between the scene composer and the GPU pass.

use glam::Mat4;

use crate::color::Color;
use crate::primitives::{FillMode, Primitive};

/// One primitive draw with its final model-view transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
    /// Part name, for logs and tests.
    pub label: &'static str,
    pub primitive: Primitive,
    pub fill: FillMode,
    /// Object space to view space.
    pub model_view: Mat4,
    pub color: Color,
}

/// Receives draw calls from a scene traversal.
pub trait DrawSink {
    fn draw(&mut self, command: DrawCommand);
}

/// A [`DrawSink`] that records every command for later submission.
///
/// Cleared and refilled once per frame; the allocation is kept.
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawCommand> {
        self.commands.iter()
    }

    /// Commands whose label matches `label`, in draw order.
    pub fn labelled<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a DrawCommand> + 'a {
        self.commands.iter().filter(move |c| c.label == label)
    }
}

impl DrawSink for DrawList {
    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a DrawCommand;
    type IntoIter = std::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
