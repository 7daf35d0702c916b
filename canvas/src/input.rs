//! Input model: pointer buttons, hit targets, menus, and the gesture state machine.
//!
//! The host resolves what is under the pointer (page background, a panel, or
//! an object) and reports it as a [`Target`]. `InputState` is the gesture being
//! tracked between pointer-down and pointer-up; it carries everything needed to
//! turn later pointer positions into document updates, so no per-gesture
//! listeners have to be attached or detached.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::{STATUS_READY, ZOOM_DEFAULT};
use crate::doc::{ObjectId, PanelId};
use crate::geometry::{Point, Size};

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button.
    Middle,
    /// Right mouse button (or two-finger tap); opens the context menu.
    Secondary,
}

/// What the pointer landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The page background.
    Page,
    /// A panel on the current page.
    Panel(PanelId),
    /// An object inside a panel on the current page.
    Object { panel: PanelId, id: ObjectId },
}

/// What kind of element a drag moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Panel,
    /// An object, with the panel that owns it.
    Object { panel: PanelId },
}

/// Everything captured at pointer-down that a drag frame needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragDescriptor {
    pub kind: DragKind,
    /// Id of the panel or object being moved.
    pub id: uuid::Uuid,
    /// Device position of the pointer at drag start.
    pub start: Point,
    /// Target x in percent at drag start.
    pub initial_x: f64,
    /// Target y in percent at drag start.
    pub initial_y: f64,
    /// Container size at zoom 1.0 (page box for panels, panel box for objects).
    pub reference: Size,
}

/// A right-click menu anchored at a device position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextMenu {
    pub x: f64,
    pub y: f64,
    pub target: Target,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A panel or object follows the pointer.
    Dragging(DragDescriptor),
    /// The rotation knob is being turned for a panel or object.
    TurningKnob {
        target: Target,
        /// Device position of the knob center.
        center: Point,
    },
}

/// Persistent UI state visible to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub selected_panel: Option<PanelId>,
    /// Only meaningful while `selected_panel` is set.
    pub selected_object: Option<ObjectId>,
    pub context_menu: Option<ContextMenu>,
    pub main_menu_open: bool,
    pub zoom: f64,
    /// One-line status shown to the user.
    pub status: String,
    /// An image request is in flight.
    pub generating: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            selected_panel: None,
            selected_object: None,
            context_menu: None,
            main_menu_open: false,
            zoom: ZOOM_DEFAULT,
            status: STATUS_READY.into(),
            generating: false,
        }
    }
}
