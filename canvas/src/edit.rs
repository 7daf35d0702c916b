//! Pure edit operations over a [`Project`] snapshot.
//!
//! Every operation borrows the current snapshot and returns a new one; the
//! input is never touched. Only the page and panel on the edited path are
//! re-allocated (`Arc::make_mut`), so sibling pages and panels keep their
//! identity across edits.
//!
//! Lookup misses are not errors: an operation naming a page, panel or object
//! that does not exist returns a snapshot equal to its input. The only
//! reported failures are caller preconditions ([`DocError`]).

#[cfg(test)]
#[path = "edit_test.rs"]
mod edit_test;

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::consts::DUPLICATE_OFFSET_PCT;
use crate::doc::{
    CanvasObject, ObjectId, ObjectKind, ObjectUpdate, Page, PageUpdate, Panel, PanelId, PanelUpdate, Project,
    ProjectUpdate, PromptRecord,
};

/// Preconditions an edit can reject.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocError {
    /// An object was added without a target panel.
    #[error("no panel selected")]
    NoPanelSelected,
    /// A page switch named an index past the end of the page list.
    #[error("page index {index} out of range ({len} pages)")]
    PageOutOfRange { index: usize, len: usize },
    /// The only remaining page cannot be removed.
    #[error("cannot delete the last page")]
    LastPage,
}

impl Project {
    // --- Internal path editing ---

    fn panel_index(&self, panel_id: &PanelId) -> Option<usize> {
        self.current_page()?
            .panels
            .iter()
            .position(|p| p.id == *panel_id)
    }

    /// Clone the snapshot and hand out the current page for mutation.
    fn edit_current_page<R>(&self, f: impl FnOnce(&mut Page) -> R) -> (Self, Option<R>) {
        let mut next = self.clone();
        let index = next.current_page_index;
        let result = next.pages.get_mut(index).map(|page| f(Arc::make_mut(page)));
        (next, result)
    }

    /// Clone the snapshot and hand out one panel of the current page for mutation.
    fn edit_panel<R>(&self, panel_id: &PanelId, f: impl FnOnce(&mut Panel) -> R) -> (Self, Option<R>) {
        let Some(index) = self.panel_index(panel_id) else {
            debug!(%panel_id, "edit: panel not found");
            return (self.clone(), None);
        };
        let (next, result) = self.edit_current_page(|page| page.panels.get_mut(index).map(|p| f(Arc::make_mut(p))));
        (next, result.flatten())
    }

    /// Clone the snapshot and hand out one object for mutation.
    fn edit_object<R>(
        &self,
        panel_id: &PanelId,
        object_id: &ObjectId,
        f: impl FnOnce(&mut CanvasObject) -> R,
    ) -> (Self, Option<R>) {
        if self.object(panel_id, object_id).is_none() {
            debug!(%panel_id, %object_id, "edit: object not found");
            return (self.clone(), None);
        }
        let (next, result) = self.edit_panel(panel_id, |panel| {
            panel
                .objects
                .iter_mut()
                .find(|o| o.id == *object_id)
                .map(f)
        });
        (next, result.flatten())
    }

    // --- Pages ---

    /// Append a blank page. The current page does not change.
    #[must_use]
    pub fn add_page(&self) -> Self {
        let mut next = self.clone();
        let page = Page::new(format!("Page {}", next.pages.len() + 1));
        next.pages.push(Arc::new(page));
        next
    }

    /// Switch the active page.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::PageOutOfRange`] if `index` is not a valid page index.
    pub fn set_current_page(&self, index: usize) -> Result<Self, DocError> {
        if index >= self.pages.len() {
            return Err(DocError::PageOutOfRange { index, len: self.pages.len() });
        }
        let mut next = self.clone();
        next.current_page_index = index;
        Ok(next)
    }

    /// Remove the page at `index`, keeping `current_page_index` on the same
    /// page when possible and on its successor (or the new last page) when the
    /// current page itself is removed. An out-of-range index is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::LastPage`] when the project has a single page.
    pub fn delete_page(&self, index: usize) -> Result<Self, DocError> {
        if index >= self.pages.len() {
            debug!(index, "edit: page not found");
            return Ok(self.clone());
        }
        if self.pages.len() <= 1 {
            return Err(DocError::LastPage);
        }
        let mut next = self.clone();
        next.pages.remove(index);
        if index < next.current_page_index {
            next.current_page_index -= 1;
        }
        next.current_page_index = next.current_page_index.min(next.pages.len() - 1);
        Ok(next)
    }

    /// Merge fields into the current page.
    #[must_use]
    pub fn update_page(&self, update: &PageUpdate) -> Self {
        self.edit_current_page(|page| page.apply(update)).0
    }

    // --- Panels ---

    /// Append a panel with default geometry to the current page.
    ///
    /// `template` names one of the project type's presets. Presets share the
    /// default geometry; unknown names are accepted and logged.
    #[must_use]
    pub fn add_panel(&self, template: Option<&str>) -> (Self, Option<PanelId>) {
        if let Some(name) = template {
            if !self.kind.panel_templates().contains(&name) {
                debug!(template = name, kind = %self.kind, "edit: template not offered for project type");
            }
        }
        let (next, id) = self.edit_current_page(|page| {
            let panel = Panel::new(format!("Panel {}", page.panels.len() + 1));
            let id = panel.id;
            page.panels.push(Arc::new(panel));
            id
        });
        (next, id)
    }

    /// Merge fields into a panel on the current page.
    #[must_use]
    pub fn update_panel(&self, panel_id: &PanelId, update: &PanelUpdate) -> Self {
        self.edit_panel(panel_id, |panel| panel.apply(update)).0
    }

    /// Remove a panel and every object it contains.
    #[must_use]
    pub fn delete_panel(&self, panel_id: &PanelId) -> Self {
        let Some(index) = self.panel_index(panel_id) else {
            debug!(%panel_id, "edit: panel not found");
            return self.clone();
        };
        self.edit_current_page(|page| page.panels.remove(index)).0
    }

    /// Copy a panel (with fresh ids for it and its objects), offset by the
    /// duplicate offset, and append it to the current page.
    #[must_use]
    pub fn duplicate_panel(&self, panel_id: &PanelId) -> (Self, Option<PanelId>) {
        let Some(source) = self.panel(panel_id) else {
            debug!(%panel_id, "edit: panel not found");
            return (self.clone(), None);
        };
        let mut copy = source.clone();
        copy.id = Uuid::new_v4();
        copy.x += DUPLICATE_OFFSET_PCT;
        copy.y += DUPLICATE_OFFSET_PCT;
        for obj in &mut copy.objects {
            obj.id = Uuid::new_v4();
        }
        let id = copy.id;
        let (next, pushed) = self.edit_current_page(|page| page.panels.push(Arc::new(copy)));
        (next, pushed.map(|()| id))
    }

    /// Move a panel within the paint order of the current page. `to_index` is
    /// clamped to the panel list.
    #[must_use]
    pub fn move_panel(&self, panel_id: &PanelId, to_index: usize) -> Self {
        let Some(from) = self.panel_index(panel_id) else {
            debug!(%panel_id, "edit: panel not found");
            return self.clone();
        };
        self.edit_current_page(|page| {
            let panel = page.panels.remove(from);
            let to = to_index.min(page.panels.len());
            page.panels.insert(to, panel);
        })
        .0
    }

    // --- Objects ---

    /// Add an object to a panel of the current page.
    ///
    /// `overrides` is merged over the kind's defaults. A `panel_id` that does
    /// not resolve is a no-op and returns `None` for the id.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::NoPanelSelected`] when `panel_id` is `None`.
    pub fn add_object(
        &self,
        panel_id: Option<&PanelId>,
        kind: ObjectKind,
        overrides: &ObjectUpdate,
    ) -> Result<(Self, Option<ObjectId>), DocError> {
        let panel_id = panel_id.ok_or(DocError::NoPanelSelected)?;
        let mut obj = CanvasObject::new(kind);
        obj.apply(overrides);
        let id = obj.id;
        let (next, pushed) = self.edit_panel(panel_id, |panel| panel.objects.push(obj));
        Ok((next, pushed.map(|()| id)))
    }

    /// Merge fields into an object.
    #[must_use]
    pub fn update_object(&self, panel_id: &PanelId, object_id: &ObjectId, update: &ObjectUpdate) -> Self {
        self.edit_object(panel_id, object_id, |obj| obj.apply(update))
            .0
    }

    /// Remove an object from its panel.
    #[must_use]
    pub fn delete_object(&self, panel_id: &PanelId, object_id: &ObjectId) -> Self {
        if self.object(panel_id, object_id).is_none() {
            debug!(%panel_id, %object_id, "edit: object not found");
            return self.clone();
        }
        self.edit_panel(panel_id, |panel| panel.objects.retain(|o| o.id != *object_id))
            .0
    }

    /// Copy an object with a fresh id, offset it, and append it to the same panel.
    #[must_use]
    pub fn duplicate_object(&self, panel_id: &PanelId, object_id: &ObjectId) -> (Self, Option<ObjectId>) {
        let Some(source) = self.object(panel_id, object_id) else {
            debug!(%panel_id, %object_id, "edit: object not found");
            return (self.clone(), None);
        };
        let mut copy = source.clone();
        copy.id = Uuid::new_v4();
        copy.x += DUPLICATE_OFFSET_PCT;
        copy.y += DUPLICATE_OFFSET_PCT;
        let id = copy.id;
        let (next, pushed) = self.edit_panel(panel_id, |panel| panel.objects.push(copy));
        (next, pushed.map(|()| id))
    }

    /// Raise an object above all of its siblings. Locked objects restack too.
    #[must_use]
    pub fn bring_object_to_front(&self, panel_id: &PanelId, object_id: &ObjectId) -> Self {
        self.restack(panel_id, object_id, |siblings| siblings.iter().max().map(|top| top.saturating_add(1)))
    }

    /// Lower an object beneath all of its siblings. Locked objects restack too.
    #[must_use]
    pub fn send_object_to_back(&self, panel_id: &PanelId, object_id: &ObjectId) -> Self {
        self.restack(panel_id, object_id, |siblings| siblings.iter().min().map(|bottom| bottom.saturating_sub(1)))
    }

    /// Set an object's z-index from its siblings' z-indices. Without siblings
    /// this is a no-op. The z-index is written directly, bypassing the lock.
    fn restack(
        &self,
        panel_id: &PanelId,
        object_id: &ObjectId,
        pick: impl FnOnce(&[i64]) -> Option<i64>,
    ) -> Self {
        let Some(panel) = self.panel(panel_id) else {
            debug!(%panel_id, "edit: panel not found");
            return self.clone();
        };
        let siblings: Vec<i64> = panel
            .objects
            .iter()
            .filter(|o| o.id != *object_id)
            .map(|o| o.z_index)
            .collect();
        let Some(z_index) = pick(&siblings) else {
            return self.clone();
        };
        self.edit_object(panel_id, object_id, |obj| obj.z_index = z_index)
            .0
    }

    // --- Project ---

    /// Merge project-level settings.
    #[must_use]
    pub fn update_project(&self, update: &ProjectUpdate) -> Self {
        let mut next = self.clone();
        next.apply(update);
        next
    }

    /// Append an entry to the prompt log.
    #[must_use]
    pub fn record_prompt(&self, prompt: &str, negative: &str, style: &str) -> Self {
        let mut next = self.clone();
        next.prompts.push(PromptRecord { prompt: prompt.into(), negative: negative.into(), style: style.into() });
        next
    }
}
