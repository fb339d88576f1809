//! Pointer events and the exclusive capture slot

use egui::{Modifiers, Pos2};
use uuid::Uuid;

use crate::tools::ToolCapabilities;

/// Identity a consumer writes into the [`PointerCapture`] slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(Uuid);

impl ControlId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ControlId {
    fn default() -> Self {
        Self::new()
    }
}

/// Phase of a pointer gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Drag,
    Up,
}

impl PointerKind {
    /// The tool capability that handles this phase
    pub fn capability(self) -> ToolCapabilities {
        match self {
            PointerKind::Down => ToolCapabilities::POINTER_DOWN,
            PointerKind::Drag => ToolCapabilities::POINTER_DRAG,
            PointerKind::Up => ToolCapabilities::POINTER_UP,
        }
    }
}

/// A pointer event in window space.
///
/// Handlers call [`PointerEvent::use_event`] to stop the host from passing
/// the event on to surrounding widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Pos2,
    pub modifiers: Modifiers,
    used: bool,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, position: Pos2) -> Self {
        Self {
            kind,
            position,
            modifiers: Modifiers::NONE,
            used: false,
        }
    }

    pub fn down(position: Pos2) -> Self {
        Self::new(PointerKind::Down, position)
    }

    pub fn drag(position: Pos2) -> Self {
        Self::new(PointerKind::Drag, position)
    }

    pub fn up(position: Pos2) -> Self {
        Self::new(PointerKind::Up, position)
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Mark the event as consumed
    pub fn use_event(&mut self) {
        self.used = true;
    }

    pub fn is_used(&self) -> bool {
        self.used
    }
}

/// Exclusive pointer ownership for the duration of a gesture.
///
/// Owned by the host and lent to every consumer that handles pointer input,
/// so at most one control holds it at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerCapture {
    holder: Option<ControlId>,
}

impl PointerCapture {
    pub fn is_free(&self) -> bool {
        self.holder.is_none()
    }

    pub fn holder(&self) -> Option<ControlId> {
        self.holder
    }

    pub fn is_held_by(&self, id: ControlId) -> bool {
        self.holder == Some(id)
    }

    /// Held by someone other than `id`
    pub fn is_held_by_other(&self, id: ControlId) -> bool {
        self.holder.is_some_and(|holder| holder != id)
    }

    /// Take the slot if it is free
    pub fn try_acquire(&mut self, id: ControlId) -> bool {
        if self.holder.is_none() {
            self.holder = Some(id);
            true
        } else {
            false
        }
    }

    /// Give the slot back. Only the holder can release it.
    pub fn release(&mut self, id: ControlId) -> bool {
        if self.is_held_by(id) {
            self.holder = None;
            true
        } else {
            false
        }
    }

    /// Clear the slot regardless of holder, e.g. when the window loses focus
    pub fn force_release(&mut self) {
        self.holder = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_is_exclusive() {
        let first = ControlId::new();
        let second = ControlId::new();
        let mut capture = PointerCapture::default();

        assert!(capture.try_acquire(first));
        assert!(!capture.try_acquire(second));
        assert!(capture.is_held_by_other(second));
        assert!(!capture.release(second));
        assert!(capture.release(first));
        assert!(capture.is_free());
    }

    #[test]
    fn test_use_event() {
        let mut event = PointerEvent::down(Pos2::new(1.0, 2.0)).with_modifiers(Modifiers::SHIFT);
        assert!(event.modifiers.shift);
        assert!(!event.is_used());
        event.use_event();
        assert!(event.is_used());
    }
}
