//! Shared defaults and limits for the canvas crate.

// ── Pages ───────────────────────────────────────────────────────

/// Background color for new pages, panels and speech bubbles.
pub const WHITE: &str = "#ffffff";

/// Default border and text color.
pub const BLACK: &str = "#000000";

/// Background for objects that should not paint one.
pub const TRANSPARENT: &str = "transparent";

/// Second gradient stop for new pages.
pub const GRADIENT_SECOND_STOP: &str = "#e2e8f0";

// ── Panels ──────────────────────────────────────────────────────

pub const PANEL_X: f64 = 10.0;
pub const PANEL_Y: f64 = 10.0;
pub const PANEL_WIDTH: f64 = 30.0;
pub const PANEL_HEIGHT: f64 = 30.0;
pub const PANEL_BORDER_WIDTH: f64 = 2.0;

// ── Objects ─────────────────────────────────────────────────────

pub const OBJECT_X: f64 = 20.0;
pub const OBJECT_Y: f64 = 20.0;
pub const OBJECT_WIDTH: f64 = 50.0;
pub const OBJECT_HEIGHT: f64 = 50.0;
pub const OBJECT_Z_INDEX: i64 = 10;
pub const OBJECT_BORDER_WIDTH: f64 = 1.0;
pub const OBJECT_FONT_SIZE: f64 = 16.0;

/// Content given to new text, narration and speech-bubble objects.
pub const NEW_TEXT: &str = "New Text";

// ── Edits ───────────────────────────────────────────────────────

/// Offset in percent applied on both axes to duplicated panels and objects.
pub const DUPLICATE_OFFSET_PCT: f64 = 5.0;

// ── Zoom ────────────────────────────────────────────────────────

pub const ZOOM_DEFAULT: f64 = 0.8;
pub const ZOOM_MIN: f64 = 0.1;
pub const ZOOM_MAX: f64 = 3.0;
pub const ZOOM_STEP: f64 = 0.1;

// ── Status line ─────────────────────────────────────────────────

pub const STATUS_READY: &str = "Ready";
pub const STATUS_GENERATING: &str = "Generating image...";
pub const STATUS_GENERATED: &str = "Image generated!";
pub const STATUS_GENERATION_FAILED: &str = "Generation failed";

/// Blocking notice shown when an object is added with no panel selected.
pub const NOTICE_SELECT_PANEL: &str = "Select a panel first!";

/// Notice shown when an edit targets a locked object.
pub const NOTICE_OBJECT_LOCKED: &str = "Unlock the object first!";
