//! Stack-based local-to-world transform accumulator.
//!
//! [`TransformStack`] holds one *current* matrix plus a LIFO of saved
//! snapshots. Every composition call right-multiplies the current matrix, so
//! operations apply to geometry in the reverse of the order they are issued:
//!
//! ```
//! use tank_scene::{Axis, TransformStack, Vec3};
//!
//! let mut stack = TransformStack::new();
//! {
//!     let mut part = stack.scope();
//!     part.translate(Vec3::new(1.0, 0.0, 0.0));
//!     part.rotate(Axis::Z, 90.0);
//!     part.scale(Vec3::new(0.2, 3.0, 0.2));
//!     // draw with part.current() ...
//! }
//! assert_eq!(stack.depth(), 0);
//! ```
//!
//! # Underflow
//!
//! Popping an empty stack is a contract violation. Debug builds panic through
//! `debug_assert!`; release builds log the violation and leave the current
//! transform untouched.

use std::ops::{Deref, DerefMut};

use glam::{Mat4, Vec3};

/// A principal axis for [`TransformStack::rotate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Elementary rotation matrix about this axis.
    pub fn rotation(self, degrees: f32) -> Mat4 {
        let radians = degrees.to_radians();
        match self {
            Axis::X => Mat4::from_rotation_x(radians),
            Axis::Y => Mat4::from_rotation_y(radians),
            Axis::Z => Mat4::from_rotation_z(radians),
        }
    }
}

/// Current transform plus the saved snapshots that `pop` restores.
#[derive(Clone, Debug)]
pub struct TransformStack {
    current: Mat4,
    saved: Vec<Mat4>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self {
            current: Mat4::IDENTITY,
            saved: Vec::with_capacity(8),
        }
    }
}

impl TransformStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new traversal rooted at `root` (usually the view matrix).
    ///
    /// Any snapshots left over from an unbalanced traversal are discarded.
    pub fn reset(&mut self, root: Mat4) {
        if !self.saved.is_empty() {
            log::error!(
                "transform stack reset with {} unmatched push(es)",
                self.saved.len()
            );
            debug_assert!(self.saved.is_empty(), "unbalanced transform stack");
            self.saved.clear();
        }
        self.current = root;
    }

    /// The transform currently in effect.
    pub fn current(&self) -> Mat4 {
        self.current
    }

    /// Number of saved snapshots.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Saves the current transform.
    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// Restores the transform saved by the matching [`push`](Self::push).
    pub fn pop(&mut self) {
        match self.saved.pop() {
            Some(previous) => self.current = previous,
            None => {
                debug_assert!(false, "transform stack underflow");
                log::error!("transform stack underflow; keeping current transform");
            }
        }
    }

    /// Pushes and returns a guard that pops when dropped.
    ///
    /// The guard derefs to the stack, so composition calls and nested scopes
    /// work through it directly.
    pub fn scope(&mut self) -> TransformScope<'_> {
        self.push();
        TransformScope { stack: self }
    }

    /// Right-multiplies by a translation.
    pub fn translate(&mut self, offset: Vec3) -> &mut Self {
        self.current *= Mat4::from_translation(offset);
        self
    }

    /// Right-multiplies by a rotation of `degrees` about `axis`.
    pub fn rotate(&mut self, axis: Axis, degrees: f32) -> &mut Self {
        self.current *= axis.rotation(degrees);
        self
    }

    /// Right-multiplies by a non-uniform scale.
    pub fn scale(&mut self, factors: Vec3) -> &mut Self {
        self.current *= Mat4::from_scale(factors);
        self
    }

    /// Rotates about `center` instead of the local origin.
    pub fn pivot(&mut self, center: Vec3, axis: Axis, degrees: f32) -> &mut Self {
        self.translate(center).rotate(axis, degrees).translate(-center)
    }
}

/// Guard returned by [`TransformStack::scope`].
pub struct TransformScope<'a> {
    stack: &'a mut TransformStack,
}

impl Deref for TransformScope<'_> {
    type Target = TransformStack;

    fn deref(&self) -> &TransformStack {
        self.stack
    }
}

impl DerefMut for TransformScope<'_> {
    fn deref_mut(&mut self) -> &mut TransformStack {
        self.stack
    }
}

impl Drop for TransformScope<'_> {
    fn drop(&mut self) {
        self.stack.pop();
    }
}
