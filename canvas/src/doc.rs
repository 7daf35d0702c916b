//! Document model: the project tree and typed field updates.
//!
//! A `Project` owns an ordered list of `Page`s, each page owns an ordered list
//! of `Panel`s (sequence order is paint order), and each panel owns its
//! `CanvasObject`s (paint order by `z_index`). Panel coordinates are percent
//! of the page box; object coordinates are percent of the owning panel box.
//! Neither is clamped.
//!
//! Pages and panels sit behind `Arc` so an edit can clone the project cheaply
//! and replace only the branch it touches (see [`crate::edit`]). Sparse edits
//! arrive as one update struct per entity kind (`PanelUpdate`,
//! `ObjectUpdate`, `PageUpdate`, `ProjectUpdate`) so unknown fields cannot be
//! smuggled in.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{
    BLACK, GRADIENT_SECOND_STOP, NEW_TEXT, OBJECT_BORDER_WIDTH, OBJECT_FONT_SIZE, OBJECT_HEIGHT, OBJECT_WIDTH,
    OBJECT_X, OBJECT_Y, OBJECT_Z_INDEX, PANEL_BORDER_WIDTH, PANEL_HEIGHT, PANEL_WIDTH, PANEL_X, PANEL_Y, TRANSPARENT,
    WHITE,
};
use crate::dial::normalize_degrees_360;

pub type ProjectId = Uuid;
pub type PageId = Uuid;
pub type PanelId = Uuid;
pub type ObjectId = Uuid;

// =============================================================================
// PROJECT TYPE
// =============================================================================

/// The kind of document being composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    ComicBook,
    Book,
    GreetingCard,
    PlayingCards,
    GameDeck,
    BusinessCard,
}

impl ProjectType {
    pub const ALL: [Self; 6] = [
        Self::ComicBook,
        Self::Book,
        Self::GreetingCard,
        Self::PlayingCards,
        Self::GameDeck,
        Self::BusinessCard,
    ];

    /// Stable identifier used on the wire and on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ComicBook => "comic-book",
            Self::Book => "book",
            Self::GreetingCard => "greeting-card",
            Self::PlayingCards => "playing-cards",
            Self::GameDeck => "game-deck",
            Self::BusinessCard => "business-card",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ComicBook => "Comic Book",
            Self::Book => "Book",
            Self::GreetingCard => "Greeting Card",
            Self::PlayingCards => "Playing Cards",
            Self::GameDeck => "Game Deck",
            Self::BusinessCard => "Business Card",
        }
    }

    /// Number of blank pages a new project of this type starts with.
    #[must_use]
    pub fn default_pages(self) -> usize {
        match self {
            Self::ComicBook => 4,
            Self::Book => 1,
            Self::GreetingCard | Self::PlayingCards | Self::BusinessCard => 2,
            Self::GameDeck => 10,
        }
    }

    /// Page width to height ratio.
    #[must_use]
    pub fn page_aspect(self) -> (f64, f64) {
        match self {
            Self::ComicBook => (3.0, 4.0),
            Self::Book => (2.0, 3.0),
            Self::GreetingCard => (5.0, 7.0),
            Self::PlayingCards | Self::GameDeck => (2.5, 3.5),
            Self::BusinessCard => (3.5, 2.0),
        }
    }

    /// Named panel presets offered for this project type.
    #[must_use]
    pub fn panel_templates(self) -> &'static [&'static str] {
        match self {
            Self::ComicBook => &["Standard 4-Panel", "Dynamic Action", "Wide Single", "Classic 6-Panel Grid"],
            Self::Book => &["Front Cover", "Back Cover", "Full Wrap", "Inner Sleeve"],
            Self::GreetingCard => &["Vertical Fold", "Horizontal Fold", "Single Flat"],
            Self::PlayingCards => &["Poker Face", "TCG Layout", "Minimalist"],
            Self::GameDeck => &["Standard Card", "Ability Card", "Boss Card"],
            Self::BusinessCard => &["Standard Horizontal", "Vertical Pro", "Modern Slim"],
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown project type: {s}"))
    }
}

// =============================================================================
// OBJECT KIND
// =============================================================================

/// The kind of a leaf object placed inside a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// Raster image referenced by `image_url`.
    Image,
    /// Free text.
    Text,
    /// Dialogue balloon with an optional tail.
    SpeechBubble,
    /// Caption box.
    Narration,
}

impl ObjectKind {
    pub const ALL: [Self; 4] = [Self::Image, Self::Text, Self::SpeechBubble, Self::Narration];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Text => "text",
            Self::SpeechBubble => "speech_bubble",
            Self::Narration => "narration",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == normalized)
            .ok_or_else(|| format!("unknown object kind: {s}"))
    }
}

// =============================================================================
// GRADIENT
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    None,
    Linear,
    Radial,
}

impl GradientKind {
    pub const ALL: [Self; 3] = [Self::None, Self::Linear, Self::Radial];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Linear => "linear",
            Self::Radial => "radial",
        }
    }
}

impl fmt::Display for GradientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GradientKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown gradient type: {s}"))
    }
}

/// Page background gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Gradient {
    #[serde(rename = "type")]
    pub kind: GradientKind,
    pub color1: String,
    pub color2: String,
    /// Direction of a linear gradient in degrees.
    pub angle: f64,
}

impl Default for Gradient {
    fn default() -> Self {
        Self { kind: GradientKind::None, color1: WHITE.into(), color2: GRADIENT_SECOND_STOP.into(), angle: 0.0 }
    }
}

// =============================================================================
// CANVAS OBJECT
// =============================================================================

/// A leaf visual element positioned within a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CanvasObject {
    pub id: ObjectId,
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    /// Left edge in percent of the owning panel width.
    pub x: f64,
    /// Top edge in percent of the owning panel height.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Clockwise rotation in degrees.
    pub rotation: f64,
    pub opacity: f64,
    /// Stacking order within the panel; higher paints on top.
    pub z_index: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flipped_h: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flipped_v: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    /// Speech-bubble tail tip, percent of the object box.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tail_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tail_y: Option<f64>,
}

impl CanvasObject {
    /// Create an object with a fresh id and the defaults for `kind`.
    #[must_use]
    pub fn new(kind: ObjectKind) -> Self {
        let (content, image_url) = match kind {
            ObjectKind::Image => (String::new(), Some(String::new())),
            ObjectKind::Text | ObjectKind::SpeechBubble | ObjectKind::Narration => (NEW_TEXT.to_string(), None),
        };
        let background = if kind == ObjectKind::SpeechBubble { WHITE } else { TRANSPARENT };
        Self {
            id: Uuid::new_v4(),
            kind,
            x: OBJECT_X,
            y: OBJECT_Y,
            width: OBJECT_WIDTH,
            height: OBJECT_HEIGHT,
            rotation: 0.0,
            opacity: 1.0,
            z_index: OBJECT_Z_INDEX,
            content: Some(content),
            image_url,
            background_color: Some(background.into()),
            border_color: Some(BLACK.into()),
            border_width: Some(OBJECT_BORDER_WIDTH),
            font_family: None,
            font_size: Some(OBJECT_FONT_SIZE),
            color: Some(BLACK.into()),
            flipped_h: None,
            flipped_v: None,
            locked: None,
            tail_x: None,
            tail_y: None,
        }
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked.unwrap_or(false)
    }

    /// Merge a sparse update. A locked object only accepts a change to `locked`.
    pub fn apply(&mut self, update: &ObjectUpdate) {
        if self.is_locked() {
            if let Some(locked) = update.locked {
                self.locked = Some(locked);
            }
            return;
        }
        if let Some(x) = update.x {
            self.x = x;
        }
        if let Some(y) = update.y {
            self.y = y;
        }
        if let Some(w) = update.width {
            self.width = w;
        }
        if let Some(h) = update.height {
            self.height = h;
        }
        if let Some(r) = update.rotation {
            self.rotation = normalize_degrees_360(r);
        }
        if let Some(o) = update.opacity {
            self.opacity = o.clamp(0.0, 1.0);
        }
        if let Some(z) = update.z_index {
            self.z_index = z;
        }
        if let Some(ref content) = update.content {
            self.content = Some(content.clone());
        }
        if let Some(ref url) = update.image_url {
            self.image_url = Some(url.clone());
        }
        if let Some(ref c) = update.background_color {
            self.background_color = Some(c.clone());
        }
        if let Some(ref c) = update.border_color {
            self.border_color = Some(c.clone());
        }
        if let Some(w) = update.border_width {
            self.border_width = Some(w.max(0.0));
        }
        if let Some(ref family) = update.font_family {
            self.font_family = Some(family.clone());
        }
        if let Some(size) = update.font_size {
            self.font_size = Some(size);
        }
        if let Some(ref c) = update.color {
            self.color = Some(c.clone());
        }
        if let Some(flip) = update.flipped_h {
            self.flipped_h = Some(flip);
        }
        if let Some(flip) = update.flipped_v {
            self.flipped_v = Some(flip);
        }
        if let Some(locked) = update.locked {
            self.locked = Some(locked);
        }
        if let Some(tx) = update.tail_x {
            self.tail_x = Some(tx);
        }
        if let Some(ty) = update.tail_y {
            self.tail_y = Some(ty);
        }
    }
}

/// Sparse update for a canvas object. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub opacity: Option<f64>,
    pub z_index: Option<i64>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub background_color: Option<String>,
    pub border_color: Option<String>,
    pub border_width: Option<f64>,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub color: Option<String>,
    pub flipped_h: Option<bool>,
    pub flipped_v: Option<bool>,
    pub locked: Option<bool>,
    pub tail_x: Option<f64>,
    pub tail_y: Option<f64>,
}

impl ObjectUpdate {
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Default::default() }
    }

    #[must_use]
    pub fn rotation(degrees: f64) -> Self {
        Self { rotation: Some(degrees), ..Default::default() }
    }

    #[must_use]
    pub fn image(url: impl Into<String>) -> Self {
        Self { image_url: Some(url.into()), ..Default::default() }
    }
}

// =============================================================================
// PANEL
// =============================================================================

/// A rectangular region of a page that contains objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Panel {
    pub id: PanelId,
    pub name: String,
    /// Left edge in percent of the page width.
    pub x: f64,
    /// Top edge in percent of the page height.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub background_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    pub border_color: String,
    pub border_width: f64,
    pub opacity: f64,
    pub objects: Vec<CanvasObject>,
    /// Whether the explorer shows this panel folded.
    #[serde(default)]
    pub collapsed: bool,
}

impl Panel {
    /// Create an empty panel with a fresh id and default geometry.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            x: PANEL_X,
            y: PANEL_Y,
            width: PANEL_WIDTH,
            height: PANEL_HEIGHT,
            rotation: 0.0,
            background_color: WHITE.into(),
            background_image: None,
            border_color: BLACK.into(),
            border_width: PANEL_BORDER_WIDTH,
            opacity: 1.0,
            objects: Vec::new(),
            collapsed: false,
        }
    }

    #[must_use]
    pub fn object(&self, id: &ObjectId) -> Option<&CanvasObject> {
        self.objects.iter().find(|o| o.id == *id)
    }

    /// Objects in explorer order: highest `z_index` first, ties in insertion order.
    #[must_use]
    pub fn explorer_order(&self) -> Vec<&CanvasObject> {
        let mut objs: Vec<&CanvasObject> = self.objects.iter().collect();
        objs.sort_by(|a, b| b.z_index.cmp(&a.z_index));
        objs
    }

    /// Objects in paint order: lowest `z_index` first, ties in insertion order.
    #[must_use]
    pub fn render_order(&self) -> Vec<&CanvasObject> {
        let mut objs: Vec<&CanvasObject> = self.objects.iter().collect();
        objs.sort_by_key(|o| o.z_index);
        objs
    }

    pub fn apply(&mut self, update: &PanelUpdate) {
        if let Some(ref name) = update.name {
            self.name = name.clone();
        }
        if let Some(x) = update.x {
            self.x = x;
        }
        if let Some(y) = update.y {
            self.y = y;
        }
        if let Some(w) = update.width {
            self.width = w;
        }
        if let Some(h) = update.height {
            self.height = h;
        }
        if let Some(r) = update.rotation {
            self.rotation = normalize_degrees_360(r);
        }
        if let Some(ref c) = update.background_color {
            self.background_color = c.clone();
        }
        if let Some(ref image) = update.background_image {
            self.background_image = image.clone();
        }
        if let Some(ref c) = update.border_color {
            self.border_color = c.clone();
        }
        if let Some(w) = update.border_width {
            self.border_width = w.max(0.0);
        }
        if let Some(o) = update.opacity {
            self.opacity = o.clamp(0.0, 1.0);
        }
        if let Some(collapsed) = update.collapsed {
            self.collapsed = collapsed;
        }
    }
}

/// Sparse update for a panel. `background_image: Some(None)` clears the image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelUpdate {
    pub name: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub background_color: Option<String>,
    pub background_image: Option<Option<String>>,
    pub border_color: Option<String>,
    pub border_width: Option<f64>,
    pub opacity: Option<f64>,
    pub collapsed: Option<bool>,
}

impl PanelUpdate {
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Default::default() }
    }

    #[must_use]
    pub fn rotation(degrees: f64) -> Self {
        Self { rotation: Some(degrees), ..Default::default() }
    }

    #[must_use]
    pub fn background_image(url: impl Into<String>) -> Self {
        Self { background_image: Some(Some(url.into())), ..Default::default() }
    }
}

// =============================================================================
// PAGE
// =============================================================================

/// Top-level document unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Page {
    pub id: PageId,
    pub name: String,
    pub background_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient: Option<Gradient>,
    /// Paint order is sequence order.
    pub panels: Vec<Arc<Panel>>,
}

impl Page {
    /// Create a blank white page with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            background_color: WHITE.into(),
            background_image: None,
            gradient: Some(Gradient::default()),
            panels: Vec::new(),
        }
    }

    #[must_use]
    pub fn panel(&self, id: &PanelId) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == *id).map(AsRef::as_ref)
    }

    pub fn apply(&mut self, update: &PageUpdate) {
        if let Some(ref name) = update.name {
            self.name = name.clone();
        }
        if let Some(ref c) = update.background_color {
            self.background_color = c.clone();
        }
        if let Some(ref image) = update.background_image {
            self.background_image = image.clone();
        }
        if let Some(ref gradient) = update.gradient {
            self.gradient = gradient.clone();
        }
    }
}

/// Sparse update for a page. Doubled options clear the field with `Some(None)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageUpdate {
    pub name: Option<String>,
    pub background_color: Option<String>,
    pub background_image: Option<Option<String>>,
    pub gradient: Option<Option<Gradient>>,
}

impl PageUpdate {
    #[must_use]
    pub fn background_image(url: impl Into<String>) -> Self {
        Self { background_image: Some(Some(url.into())), ..Default::default() }
    }
}

// =============================================================================
// PROJECT
// =============================================================================

/// One entry of the generation prompt log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PromptRecord {
    pub prompt: String,
    pub negative: String,
    pub style: String,
}

/// The whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ProjectType,
    pub pages: Vec<Arc<Page>>,
    /// Always a valid index into `pages`.
    pub current_page_index: usize,
    #[serde(default)]
    pub prompts: Vec<PromptRecord>,
}

impl Project {
    /// Create a project with the type's default number of blank pages.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ProjectType) -> Self {
        let pages = (1..=kind.default_pages().max(1))
            .map(|n| Arc::new(Page::new(format!("Page {n}"))))
            .collect();
        Self { id: Uuid::new_v4(), name: name.into(), kind, pages, current_page_index: 0, prompts: Vec::new() }
    }

    #[must_use]
    pub fn current_page(&self) -> Option<&Page> {
        self.pages.get(self.current_page_index).map(AsRef::as_ref)
    }

    /// Look up a panel on the current page.
    #[must_use]
    pub fn panel(&self, id: &PanelId) -> Option<&Panel> {
        self.current_page().and_then(|page| page.panel(id))
    }

    /// Look up an object inside a panel on the current page.
    #[must_use]
    pub fn object(&self, panel_id: &PanelId, object_id: &ObjectId) -> Option<&CanvasObject> {
        self.panel(panel_id).and_then(|panel| panel.object(object_id))
    }

    pub fn apply(&mut self, update: &ProjectUpdate) {
        if let Some(ref name) = update.name {
            self.name = name.clone();
        }
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
    }
}

/// Sparse update for project-level settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub kind: Option<ProjectType>,
}
