use tracing::debug;

use crate::consts::{
    NOTICE_OBJECT_LOCKED, NOTICE_SELECT_PANEL, STATUS_GENERATED, STATUS_GENERATING, STATUS_GENERATION_FAILED,
    STATUS_READY,
};
use crate::dial::knob_angle;
use crate::doc::{
    CanvasObject, ObjectId, ObjectKind, ObjectUpdate, PageId, PageUpdate, Panel, PanelId, PanelUpdate, Project, ProjectType,
    ProjectUpdate,
};
use crate::edit::DocError;
use crate::geometry::{Point, Size, clamp_zoom, percent_delta, round_to_tenth, zoom_in, zoom_out};
use crate::input::{Button, ContextMenu, DragDescriptor, DragKind, InputState, Target, UiState};
use crate::snapshot::{self, SnapshotError};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Notifications returned from handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A new project snapshot replaced the previous one.
    ProjectChanged,
    /// The selected panel and/or object changed.
    SelectionChanged { panel: Option<PanelId>, object: Option<ObjectId> },
    ContextMenuOpened(ContextMenu),
    /// Every open menu was closed.
    MenusClosed,
    /// A condition the user must acknowledge before continuing.
    Notice(String),
    /// The status line changed.
    Status(String),
}

/// Where a generated image goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// A new image object in the selected panel.
    NewObject,
    /// The selected panel's background.
    PanelBackground,
    /// The current page's background.
    PageBackground,
}

impl Destination {
    #[must_use]
    pub fn needs_panel(self) -> bool {
        matches!(self, Self::NewObject | Self::PanelBackground)
    }
}

/// Target of an in-flight image request, captured when it was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationTicket {
    pub destination: Destination,
    pub panel: Option<PanelId>,
    pub page: PageId,
}

/// Why an image request could not be issued.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("an image request is already in flight")]
    Busy,
    #[error("no panel selected")]
    NoPanelSelected,
    #[error("project has no current page")]
    NoPage,
}

/// Selection and interaction controller.
///
/// Owns the current project snapshot, the selection, menus, zoom and the
/// input state machine. Every edit goes through a pure [`Project`] operation
/// and the resulting snapshot replaces the old one wholesale.
pub struct EngineCore {
    pub project: Project,
    pub ui: UiState,
    pub input: InputState,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(Project::new("Untitled Comic", ProjectType::ComicBook))
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(project: Project) -> Self {
        Self { project, ui: UiState::default(), input: InputState::default() }
    }

    // --- Internal bookkeeping ---

    /// Swap in `next` if it differs from the current snapshot.
    fn commit(&mut self, next: Project, actions: &mut Vec<Action>) {
        if next == self.project {
            return;
        }
        self.replace_project(next, actions);
    }

    fn replace_project(&mut self, next: Project, actions: &mut Vec<Action>) {
        self.project = next;
        actions.push(Action::ProjectChanged);
        self.repair_selection(actions);
    }

    fn set_selection(&mut self, panel: Option<PanelId>, object: Option<ObjectId>, actions: &mut Vec<Action>) {
        let object = if panel.is_some() { object } else { None };
        if self.ui.selected_panel == panel && self.ui.selected_object == object {
            return;
        }
        self.ui.selected_panel = panel;
        self.ui.selected_object = object;
        actions.push(Action::SelectionChanged { panel, object });
    }

    /// Drop selection entries that no longer resolve on the current page.
    fn repair_selection(&mut self, actions: &mut Vec<Action>) {
        let mut panel = self.ui.selected_panel;
        let mut object = self.ui.selected_object;
        if let Some(id) = panel {
            match self.project.panel(&id) {
                None => {
                    panel = None;
                    object = None;
                }
                Some(p) => {
                    if object.is_some_and(|oid| p.object(&oid).is_none()) {
                        object = None;
                    }
                }
            }
        }
        self.set_selection(panel, object, actions);
    }

    fn set_status(&mut self, status: impl Into<String>, actions: &mut Vec<Action>) {
        let status = status.into();
        if self.ui.status != status {
            self.ui.status.clone_from(&status);
            actions.push(Action::Status(status));
        }
    }

    fn close_menus(&mut self, actions: &mut Vec<Action>) {
        if self.ui.context_menu.is_some() || self.ui.main_menu_open {
            self.ui.context_menu = None;
            self.ui.main_menu_open = false;
            actions.push(Action::MenusClosed);
        }
    }

    /// Apply the selection side effect of clicking `target`.
    fn select_target(&mut self, target: Target, actions: &mut Vec<Action>) {
        match target {
            Target::Page => {}
            Target::Panel(id) => self.set_selection(Some(id), None, actions),
            Target::Object { panel, id } => self.set_selection(Some(panel), Some(id), actions),
        }
    }

    // --- Queries ---

    /// The selected panel and object ids.
    #[must_use]
    pub fn selection(&self) -> (Option<PanelId>, Option<ObjectId>) {
        (self.ui.selected_panel, self.ui.selected_object)
    }

    #[must_use]
    pub fn selected_panel(&self) -> Option<&Panel> {
        self.ui
            .selected_panel
            .and_then(|id| self.project.panel(&id))
    }

    #[must_use]
    pub fn selected_object(&self) -> Option<&CanvasObject> {
        let panel = self.selected_panel()?;
        self.ui
            .selected_object
            .and_then(|id| panel.object(&id))
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.ui.zoom
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.ui.status
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.input, InputState::Dragging(_))
    }

    // --- Selection ---

    /// Select a panel (or nothing), clearing any object selection.
    pub fn select_panel(&mut self, panel: Option<PanelId>) -> Vec<Action> {
        let mut actions = Vec::new();
        let panel = panel.filter(|id| self.project.panel(id).is_some());
        self.set_selection(panel, None, &mut actions);
        actions
    }

    /// Select an object and the panel that owns it. Stale ids are ignored.
    pub fn select_object(&mut self, panel: PanelId, object: ObjectId) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.project.object(&panel, &object).is_some() {
            self.set_selection(Some(panel), Some(object), &mut actions);
        }
        actions
    }

    // --- Pointer input ---

    /// Handle a pointer-down over `target`.
    ///
    /// `container` is the rendered pixel size of the element a drag moves
    /// within: the page box for panels, the owning panel box for objects.
    pub fn on_pointer_down(&mut self, target: Target, screen: Point, button: Button, container: Size) -> Vec<Action> {
        match button {
            Button::Secondary => self.open_context_menu(target, screen),
            Button::Middle => Vec::new(),
            Button::Primary => {
                let mut actions = Vec::new();
                if self.ui.context_menu.is_some() {
                    self.ui.context_menu = None;
                    actions.push(Action::MenusClosed);
                }
                self.input = InputState::Idle;
                match target {
                    Target::Page => self.set_selection(None, None, &mut actions),
                    Target::Panel(id) => self.start_panel_drag(id, screen, container, &mut actions),
                    Target::Object { panel, id } => self.start_object_drag(panel, id, screen, container, &mut actions),
                }
                actions
            }
        }
    }

    fn start_panel_drag(&mut self, id: PanelId, screen: Point, container: Size, actions: &mut Vec<Action>) {
        let Some(panel) = self.project.panel(&id) else {
            debug!(%id, "engine: drag target panel not found");
            return;
        };
        self.input = InputState::Dragging(DragDescriptor {
            kind: DragKind::Panel,
            id,
            start: screen,
            initial_x: panel.x,
            initial_y: panel.y,
            reference: container.unzoomed(self.ui.zoom),
        });
        self.set_selection(Some(id), None, actions);
        self.set_status("Dragging panel", actions);
    }

    fn start_object_drag(
        &mut self,
        panel: PanelId,
        id: ObjectId,
        screen: Point,
        container: Size,
        actions: &mut Vec<Action>,
    ) {
        let Some(obj) = self.project.object(&panel, &id) else {
            debug!(%panel, %id, "engine: drag target object not found");
            return;
        };
        let locked = obj.is_locked();
        let descriptor = DragDescriptor {
            kind: DragKind::Object { panel },
            id,
            start: screen,
            initial_x: obj.x,
            initial_y: obj.y,
            reference: container.unzoomed(self.ui.zoom),
        };
        self.set_selection(Some(panel), Some(id), actions);
        if locked {
            debug!(%id, "engine: object locked; not dragging");
            return;
        }
        self.input = InputState::Dragging(descriptor);
        self.set_status("Dragging object", actions);
    }

    /// Handle a pointer-move anywhere in the window.
    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        match self.input {
            InputState::Idle => {}
            InputState::Dragging(drag) => self.drag_to(drag, screen, &mut actions),
            InputState::TurningKnob { target, center } => {
                let angle = knob_angle(center, screen);
                self.set_rotation(target, angle, &mut actions);
            }
        }
        actions
    }

    fn drag_to(&mut self, drag: DragDescriptor, screen: Point, actions: &mut Vec<Action>) {
        let zoom = self.ui.zoom;
        let dx = percent_delta(screen.x - drag.start.x, drag.reference.width, zoom);
        let dy = percent_delta(screen.y - drag.start.y, drag.reference.height, zoom);
        let x = round_to_tenth(drag.initial_x + dx);
        let y = round_to_tenth(drag.initial_y + dy);
        let next = match drag.kind {
            DragKind::Panel => self
                .project
                .update_panel(&drag.id, &PanelUpdate::position(x, y)),
            DragKind::Object { panel } => self
                .project
                .update_object(&panel, &drag.id, &ObjectUpdate::position(x, y)),
        };
        self.commit(next, actions);
    }

    fn set_rotation(&mut self, target: Target, degrees: f64, actions: &mut Vec<Action>) {
        let next = match target {
            Target::Page => return,
            Target::Panel(id) => self
                .project
                .update_panel(&id, &PanelUpdate::rotation(degrees)),
            Target::Object { panel, id } => self
                .project
                .update_object(&panel, &id, &ObjectUpdate::rotation(degrees)),
        };
        self.commit(next, actions);
    }

    /// Handle a pointer-up anywhere in the window; ends any gesture.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        let was_dragging = self.is_dragging();
        self.input = InputState::Idle;
        if was_dragging {
            self.set_status(STATUS_READY, &mut actions);
        }
        actions
    }

    /// A primary click that landed outside every menu.
    pub fn on_document_click(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.close_menus(&mut actions);
        actions
    }

    /// Start turning the rotation knob for a panel or object.
    pub fn begin_knob(&mut self, target: Target, center: Point) -> Vec<Action> {
        let allowed = match target {
            Target::Page => false,
            Target::Panel(id) => self.project.panel(&id).is_some(),
            Target::Object { panel, id } => self
                .project
                .object(&panel, &id)
                .is_some_and(|o| !o.is_locked()),
        };
        if allowed {
            self.input = InputState::TurningKnob { target, center };
        } else {
            debug!(?target, "engine: knob target unavailable");
        }
        Vec::new()
    }

    // --- Menus ---

    /// Open the context menu for `target` at a device position.
    pub fn open_context_menu(&mut self, target: Target, screen: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        let menu = ContextMenu { x: screen.x, y: screen.y, target };
        self.ui.main_menu_open = false;
        self.ui.context_menu = Some(menu);
        actions.push(Action::ContextMenuOpened(menu));
        self.select_target(target, &mut actions);
        actions
    }

    /// Open or close the main navigation menu.
    pub fn toggle_main_menu(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.ui.main_menu_open {
            self.close_menus(&mut actions);
        } else {
            self.ui.context_menu = None;
            self.ui.main_menu_open = true;
        }
        actions
    }

    // --- Zoom ---

    pub fn set_zoom(&mut self, zoom: f64) {
        self.ui.zoom = clamp_zoom(zoom);
    }

    pub fn zoom_in(&mut self) {
        self.ui.zoom = zoom_in(self.ui.zoom);
    }

    pub fn zoom_out(&mut self) {
        self.ui.zoom = zoom_out(self.ui.zoom);
    }

    // --- Pages ---

    pub fn add_page(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        let next = self.project.add_page();
        self.commit(next, &mut actions);
        self.set_status("Page added", &mut actions);
        actions
    }

    /// Switch pages, clearing panel and object selection.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::PageOutOfRange`] for an invalid index; nothing changes.
    pub fn select_page(&mut self, index: usize) -> Result<Vec<Action>, DocError> {
        let next = self.project.set_current_page(index)?;
        let mut actions = Vec::new();
        self.input = InputState::Idle;
        self.set_selection(None, None, &mut actions);
        self.commit(next, &mut actions);
        Ok(actions)
    }

    /// Remove a page and repair the current page index.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::LastPage`] when only one page remains.
    pub fn delete_page(&mut self, index: usize) -> Result<Vec<Action>, DocError> {
        let next = self.project.delete_page(index)?;
        let mut actions = Vec::new();
        self.input = InputState::Idle;
        self.commit(next, &mut actions);
        self.set_status("Page deleted", &mut actions);
        Ok(actions)
    }

    pub fn update_page(&mut self, update: &PageUpdate) -> Vec<Action> {
        let mut actions = Vec::new();
        let next = self.project.update_page(update);
        self.commit(next, &mut actions);
        actions
    }

    pub fn update_project(&mut self, update: &ProjectUpdate) -> Vec<Action> {
        let mut actions = Vec::new();
        let next = self.project.update_project(update);
        self.commit(next, &mut actions);
        actions
    }

    // --- Panels ---

    /// Add a panel to the current page and select it.
    pub fn add_panel(&mut self, template: Option<&str>) -> (Option<PanelId>, Vec<Action>) {
        let mut actions = Vec::new();
        let (next, id) = self.project.add_panel(template);
        self.commit(next, &mut actions);
        if let Some(id) = id {
            self.set_selection(Some(id), None, &mut actions);
            self.set_status("Panel added", &mut actions);
        }
        (id, actions)
    }

    pub fn update_panel(&mut self, panel: &PanelId, update: &PanelUpdate) -> Vec<Action> {
        let mut actions = Vec::new();
        let next = self.project.update_panel(panel, update);
        self.commit(next, &mut actions);
        actions
    }

    pub fn delete_panel(&mut self, panel: &PanelId) -> Vec<Action> {
        let mut actions = Vec::new();
        let existed = self.project.panel(panel).is_some();
        let next = self.project.delete_panel(panel);
        self.commit(next, &mut actions);
        if existed {
            self.set_status("Panel deleted", &mut actions);
        }
        actions
    }

    /// Duplicate a panel and select the copy.
    pub fn duplicate_panel(&mut self, panel: &PanelId) -> (Option<PanelId>, Vec<Action>) {
        let mut actions = Vec::new();
        let (next, id) = self.project.duplicate_panel(panel);
        self.commit(next, &mut actions);
        if let Some(id) = id {
            self.set_selection(Some(id), None, &mut actions);
            self.set_status("Panel duplicated", &mut actions);
        }
        (id, actions)
    }

    pub fn move_panel(&mut self, panel: &PanelId, to_index: usize) -> Vec<Action> {
        let mut actions = Vec::new();
        let next = self.project.move_panel(panel, to_index);
        self.commit(next, &mut actions);
        actions
    }

    // --- Objects ---

    /// Add an object to the selected panel and select it.
    ///
    /// With no panel selected this raises a [`Action::Notice`] and changes nothing.
    pub fn add_object(&mut self, kind: ObjectKind, overrides: &ObjectUpdate) -> (Option<ObjectId>, Vec<Action>) {
        let mut actions = Vec::new();
        let panel = self.ui.selected_panel;
        match self
            .project
            .add_object(panel.as_ref(), kind, overrides)
        {
            Err(e) => {
                debug!(error = %e, "engine: add_object rejected");
                actions.push(Action::Notice(NOTICE_SELECT_PANEL.into()));
                (None, actions)
            }
            Ok((next, id)) => {
                self.commit(next, &mut actions);
                if let Some(id) = id {
                    self.set_selection(panel, Some(id), &mut actions);
                    self.set_status(format!("{kind} added"), &mut actions);
                }
                (id, actions)
            }
        }
    }

    pub fn update_object(&mut self, panel: &PanelId, object: &ObjectId, update: &ObjectUpdate) -> Vec<Action> {
        let mut actions = Vec::new();
        let next = self.project.update_object(panel, object, update);
        self.commit(next, &mut actions);
        actions
    }

    pub fn delete_object(&mut self, panel: &PanelId, object: &ObjectId) -> Vec<Action> {
        let mut actions = Vec::new();
        let existed = self.project.object(panel, object).is_some();
        let next = self.project.delete_object(panel, object);
        self.commit(next, &mut actions);
        if existed {
            self.set_status("Object deleted", &mut actions);
        }
        actions
    }

    /// Duplicate an object and select the copy.
    pub fn duplicate_object(&mut self, panel: &PanelId, object: &ObjectId) -> (Option<ObjectId>, Vec<Action>) {
        let mut actions = Vec::new();
        let (next, id) = self.project.duplicate_object(panel, object);
        self.commit(next, &mut actions);
        if let Some(id) = id {
            self.set_selection(Some(*panel), Some(id), &mut actions);
            self.set_status("Object duplicated", &mut actions);
        }
        (id, actions)
    }

    pub fn bring_object_to_front(&mut self, panel: &PanelId, object: &ObjectId) -> Vec<Action> {
        let mut actions = Vec::new();
        let next = self.project.bring_object_to_front(panel, object);
        self.commit(next, &mut actions);
        actions
    }

    pub fn send_object_to_back(&mut self, panel: &PanelId, object: &ObjectId) -> Vec<Action> {
        let mut actions = Vec::new();
        let next = self.project.send_object_to_back(panel, object);
        self.commit(next, &mut actions);
        actions
    }

    // --- Image generation ---

    /// Claim the busy flag and capture where the image will land.
    ///
    /// The status change is reported through the returned actions whether or
    /// not the request may start. Fails with [`GenerationError::Busy`] while
    /// another request is in flight and [`GenerationError::NoPanelSelected`]
    /// for a panel-bound destination without a selected panel.
    pub fn begin_generation(
        &mut self,
        destination: Destination,
    ) -> (Result<GenerationTicket, GenerationError>, Vec<Action>) {
        let mut actions = Vec::new();
        if self.ui.generating {
            return (Err(GenerationError::Busy), actions);
        }
        let panel = self.ui.selected_panel;
        if destination.needs_panel() && panel.is_none() {
            self.set_status("Select a panel first", &mut actions);
            return (Err(GenerationError::NoPanelSelected), actions);
        }
        let Some(page) = self.project.current_page().map(|p| p.id) else {
            self.set_status(STATUS_GENERATION_FAILED, &mut actions);
            return (Err(GenerationError::NoPage), actions);
        };
        self.ui.generating = true;
        self.set_status(STATUS_GENERATING, &mut actions);
        (Ok(GenerationTicket { destination, panel, page }), actions)
    }

    /// Release the busy flag and apply the image, if any, to the ticket's target.
    ///
    /// The target page is found by id, so pages added or removed while the
    /// request was in flight do not redirect the image. A target that no
    /// longer resolves reports "Generation failed" and changes nothing.
    /// Returns the id of the object created for [`Destination::NewObject`].
    pub fn finish_generation(
        &mut self,
        ticket: GenerationTicket,
        image: Option<String>,
    ) -> (Option<ObjectId>, Vec<Action>) {
        self.ui.generating = false;
        let mut actions = Vec::new();
        let Some(image) = image else {
            self.set_status(STATUS_GENERATION_FAILED, &mut actions);
            return (None, actions);
        };
        let Some((next, created)) = self.place_generated(&ticket, image) else {
            self.set_status(STATUS_GENERATION_FAILED, &mut actions);
            return (None, actions);
        };
        let on_target_page = self
            .project
            .current_page()
            .is_some_and(|p| p.id == ticket.page);
        self.commit(next, &mut actions);
        if let (Some(id), Some(panel)) = (created, ticket.panel) {
            if on_target_page {
                self.set_selection(Some(panel), Some(id), &mut actions);
            }
        }
        self.set_status(STATUS_GENERATED, &mut actions);
        (created, actions)
    }

    /// Build the snapshot with the image placed at the ticket's target, or
    /// `None` if the page or panel is gone.
    fn place_generated(&self, ticket: &GenerationTicket, image: String) -> Option<(Project, Option<ObjectId>)> {
        let Some(page_index) = self.project.pages.iter().position(|p| p.id == ticket.page) else {
            debug!(page = %ticket.page, "engine: generation target page gone");
            return None;
        };
        // Edit the ticket's page in place, then restore the user's page.
        let current = self.project.current_page_index;
        let Ok(on_page) = self.project.set_current_page(page_index) else {
            return None;
        };
        let panel_resolves = ticket
            .panel
            .is_some_and(|panel| on_page.panel(&panel).is_some());

        let (edited, created) = match ticket.destination {
            Destination::PageBackground => (on_page.update_page(&PageUpdate::background_image(image)), None),
            Destination::PanelBackground | Destination::NewObject if !panel_resolves => {
                debug!(panel = ?ticket.panel, "engine: generation target panel gone");
                return None;
            }
            Destination::PanelBackground => {
                let panel = ticket.panel?;
                (on_page.update_panel(&panel, &PanelUpdate::background_image(image)), None)
            }
            Destination::NewObject => {
                match on_page.add_object(ticket.panel.as_ref(), ObjectKind::Image, &ObjectUpdate::image(image)) {
                    Ok((next, Some(id))) => (next, Some(id)),
                    Ok((_, None)) => return None,
                    Err(e) => {
                        debug!(error = %e, "engine: generated image has no panel");
                        return None;
                    }
                }
            }
        };
        let next = edited.set_current_page(current).unwrap_or(edited);
        Some((next, created))
    }

    /// Replace an image object's picture with a background-free version.
    ///
    /// A locked object is left alone and the host gets a notice.
    pub fn apply_removed_background(&mut self, panel: &PanelId, object: &ObjectId, image: String) -> Vec<Action> {
        let mut actions = Vec::new();
        let Some(target) = self
            .project
            .object(panel, object)
            .filter(|o| o.kind == ObjectKind::Image)
        else {
            debug!(%panel, %object, "engine: background removal target is not an image");
            return actions;
        };
        if target.is_locked() {
            debug!(%panel, %object, "engine: background removal target is locked");
            actions.push(Action::Notice(NOTICE_OBJECT_LOCKED.into()));
            self.set_status("Object is locked", &mut actions);
            return actions;
        }
        let next = self
            .project
            .update_object(panel, object, &ObjectUpdate::image(image));
        self.commit(next, &mut actions);
        self.set_status("Background removed", &mut actions);
        actions
    }

    /// Append an entry to the project's prompt log.
    pub fn record_prompt(&mut self, prompt: &str, negative: &str, style: &str) -> Vec<Action> {
        let mut actions = Vec::new();
        let next = self.project.record_prompt(prompt, negative, style);
        self.commit(next, &mut actions);
        actions
    }

    /// Report a status message from the host (gateway failures and the like).
    pub fn report(&mut self, status: impl Into<String>) -> Vec<Action> {
        let mut actions = Vec::new();
        self.set_status(status, &mut actions);
        actions
    }

    // --- Snapshots ---

    /// Replace the project with a parsed snapshot. On failure the current
    /// project is kept and the status line reports the error.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the text is not a valid project.
    pub fn load_snapshot(&mut self, text: &str) -> Result<Vec<Action>, SnapshotError> {
        let mut actions = Vec::new();
        match snapshot::from_json(text) {
            Err(e) => {
                self.set_status(format!("Load failed: {e}"), &mut actions);
                Err(e)
            }
            Ok(project) => {
                self.input = InputState::Idle;
                self.ui.context_menu = None;
                self.set_selection(None, None, &mut actions);
                self.replace_project(project, &mut actions);
                self.set_status("Project loaded", &mut actions);
                Ok(actions)
            }
        }
    }

    /// Serialize the current project.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Encode`] if serialization fails.
    pub fn save_snapshot(&self) -> Result<String, SnapshotError> {
        snapshot::to_json(&self.project)
    }
}
