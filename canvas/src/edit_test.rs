#![allow(clippy::float_cmp)]

use std::sync::Arc;

use uuid::Uuid;

use super::*;
use crate::doc::{ObjectKind, ObjectUpdate, PageUpdate, PanelUpdate, ProjectType, ProjectUpdate};

// =============================================================
// Helpers
// =============================================================

fn comic() -> Project {
    Project::new("Test", ProjectType::ComicBook)
}

fn with_panel() -> (Project, PanelId) {
    let (project, id) = comic().add_panel(None);
    (project, id.unwrap())
}

fn with_object(kind: ObjectKind) -> (Project, PanelId, ObjectId) {
    let (project, panel) = with_panel();
    let (project, obj) = project
        .add_object(Some(&panel), kind, &ObjectUpdate::default())
        .unwrap();
    (project, panel, obj.unwrap())
}

fn panel_ids(project: &Project) -> Vec<PanelId> {
    project
        .current_page()
        .unwrap()
        .panels
        .iter()
        .map(|p| p.id)
        .collect()
}

// =============================================================
// Purity
// =============================================================

#[test]
fn edits_leave_input_untouched() {
    let (before, panel) = with_panel();
    let copy = before.clone();
    let _ = before.update_panel(&panel, &PanelUpdate::position(60.0, 60.0));
    let _ = before.delete_panel(&panel);
    assert_eq!(before, copy);
}

#[test]
fn unknown_ids_are_noops() {
    let (project, panel, obj) = with_object(ObjectKind::Text);
    let ghost = Uuid::new_v4();

    assert_eq!(project.update_panel(&ghost, &PanelUpdate::position(1.0, 1.0)), project);
    assert_eq!(project.delete_panel(&ghost), project);
    assert_eq!(project.move_panel(&ghost, 0), project);
    assert_eq!(project.update_object(&panel, &ghost, &ObjectUpdate::position(1.0, 1.0)), project);
    assert_eq!(project.update_object(&ghost, &obj, &ObjectUpdate::position(1.0, 1.0)), project);
    assert_eq!(project.delete_object(&panel, &ghost), project);
    assert_eq!(project.bring_object_to_front(&ghost, &obj), project);

    let (same, id) = project.duplicate_panel(&ghost);
    assert_eq!(same, project);
    assert!(id.is_none());
    let (same, id) = project.duplicate_object(&panel, &ghost);
    assert_eq!(same, project);
    assert!(id.is_none());
}

#[test]
fn untouched_pages_and_panels_keep_identity() {
    let (project, first) = with_panel();
    let (project, second) = project.add_panel(None);
    let second = second.unwrap();

    let next = project.update_panel(&first, &PanelUpdate::position(50.0, 50.0));

    let old_page = &project.pages[0];
    let new_page = &next.pages[0];
    assert!(!Arc::ptr_eq(old_page, new_page));
    assert!(Arc::ptr_eq(&old_page.panels[1], &new_page.panels[1]));
    assert!(!Arc::ptr_eq(&old_page.panels[0], &new_page.panels[0]));
    assert_eq!(new_page.panels[1].id, second);
    for i in 1..project.pages.len() {
        assert!(Arc::ptr_eq(&project.pages[i], &next.pages[i]));
    }
}

// =============================================================
// Pages
// =============================================================

#[test]
fn add_page_appends_without_switching() {
    let project = comic();
    let next = project.add_page();
    assert_eq!(next.pages.len(), 5);
    assert_eq!(next.pages[4].name, "Page 5");
    assert_eq!(next.current_page_index, 0);
}

#[test]
fn set_current_page_rejects_out_of_range() {
    let project = comic();
    assert_eq!(project.set_current_page(2).unwrap().current_page_index, 2);
    assert_eq!(project.set_current_page(4), Err(DocError::PageOutOfRange { index: 4, len: 4 }));
}

#[test]
fn delete_page_before_current_shifts_index() {
    let project = comic().set_current_page(2).unwrap();
    let current_id = project.pages[2].id;
    let next = project.delete_page(0).unwrap();
    assert_eq!(next.pages.len(), 3);
    assert_eq!(next.current_page_index, 1);
    assert_eq!(next.pages[next.current_page_index].id, current_id);
}

#[test]
fn delete_current_last_page_moves_to_new_last() {
    let project = comic().set_current_page(3).unwrap();
    let next = project.delete_page(3).unwrap();
    assert_eq!(next.current_page_index, 2);
}

#[test]
fn delete_page_after_current_keeps_index() {
    let project = comic().set_current_page(1).unwrap();
    let next = project.delete_page(3).unwrap();
    assert_eq!(next.current_page_index, 1);
}

#[test]
fn delete_only_page_is_rejected() {
    let project = Project::new("Card", ProjectType::Book);
    assert_eq!(project.pages.len(), 1);
    assert_eq!(project.delete_page(0), Err(DocError::LastPage));
}

#[test]
fn delete_page_out_of_range_is_noop() {
    let project = comic();
    assert_eq!(project.delete_page(9).unwrap(), project);
}

#[test]
fn update_page_touches_current_page_only() {
    let project = comic().set_current_page(1).unwrap();
    let update = PageUpdate { background_color: Some("#123456".into()), ..Default::default() };
    let next = project.update_page(&update);
    assert_eq!(next.pages[1].background_color, "#123456");
    assert_eq!(next.pages[0], project.pages[0]);
}

// =============================================================
// Panels
// =============================================================

#[test]
fn add_panel_names_sequentially() {
    let (project, _) = with_panel();
    let (project, _) = project.add_panel(Some("Wide Single"));
    let names: Vec<_> = project
        .current_page()
        .unwrap()
        .panels
        .iter()
        .map(|p| p.name.clone())
        .collect();
    assert_eq!(names, vec!["Panel 1", "Panel 2"]);
}

#[test]
fn add_panel_with_unknown_template_still_adds() {
    let (project, id) = comic().add_panel(Some("Triptych"));
    assert!(project.panel(&id.unwrap()).is_some());
}

#[test]
fn delete_panel_removes_its_objects() {
    let (project, panel, obj) = with_object(ObjectKind::Text);
    let next = project.delete_panel(&panel);
    assert!(next.panel(&panel).is_none());
    assert!(next.object(&panel, &obj).is_none());
    assert!(next.current_page().unwrap().panels.is_empty());
}

#[test]
fn duplicate_panel_offsets_and_refreshes_ids() {
    let (project, panel, obj) = with_object(ObjectKind::Narration);
    let (next, copy) = project.duplicate_panel(&panel);
    let copy = next.panel(&copy.unwrap()).unwrap();
    let source = next.panel(&panel).unwrap();

    assert_ne!(copy.id, source.id);
    assert_eq!((copy.x, copy.y), (source.x + 5.0, source.y + 5.0));
    assert_eq!(copy.objects.len(), 1);
    assert_ne!(copy.objects[0].id, obj);
    assert_eq!(copy.objects[0].kind, ObjectKind::Narration);
}

#[test]
fn move_panel_reorders_and_clamps() {
    let (project, a) = with_panel();
    let (project, b) = project.add_panel(None);
    let (project, c) = project.add_panel(None);
    let (b, c) = (b.unwrap(), c.unwrap());

    let next = project.move_panel(&c, 0);
    assert_eq!(panel_ids(&next), vec![c, a, b]);

    let next = project.move_panel(&a, 99);
    assert_eq!(panel_ids(&next), vec![b, c, a]);
}

// =============================================================
// Objects
// =============================================================

#[test]
fn add_object_without_panel_is_rejected() {
    let project = comic();
    let result = project.add_object(None, ObjectKind::Text, &ObjectUpdate::default());
    assert_eq!(result, Err(DocError::NoPanelSelected));
}

#[test]
fn add_object_to_missing_panel_returns_no_id() {
    let project = comic();
    let (next, id) = project
        .add_object(Some(&Uuid::new_v4()), ObjectKind::Text, &ObjectUpdate::default())
        .unwrap();
    assert!(id.is_none());
    assert_eq!(next, project);
}

#[test]
fn add_object_merges_overrides() {
    let (project, panel) = with_panel();
    let overrides = ObjectUpdate { content: Some("Hi".into()), x: Some(70.0), ..Default::default() };
    let (next, id) = project
        .add_object(Some(&panel), ObjectKind::SpeechBubble, &overrides)
        .unwrap();
    let obj = next.object(&panel, &id.unwrap()).unwrap();
    assert_eq!(obj.content.as_deref(), Some("Hi"));
    assert_eq!(obj.x, 70.0);
    assert_eq!(obj.y, 20.0);
}

#[test]
fn duplicate_object_offsets_with_fresh_id() {
    let (project, panel, obj) = with_object(ObjectKind::Text);
    let (next, copy) = project.duplicate_object(&panel, &obj);
    let copy = copy.unwrap();
    assert_ne!(copy, obj);
    let dup = next.object(&panel, &copy).unwrap();
    assert_eq!((dup.x, dup.y), (25.0, 25.0));
    assert_eq!(next.panel(&panel).unwrap().objects.len(), 2);
}

#[test]
fn delete_object_removes_only_target() {
    let (project, panel, obj) = with_object(ObjectKind::Text);
    let (project, other) = project.duplicate_object(&panel, &obj);
    let next = project.delete_object(&panel, &obj);
    assert!(next.object(&panel, &obj).is_none());
    assert!(next.object(&panel, &other.unwrap()).is_some());
}

#[test]
fn locked_object_can_still_be_deleted() {
    let (project, panel, obj) = with_object(ObjectKind::Image);
    let project = project.update_object(&panel, &obj, &ObjectUpdate { locked: Some(true), ..Default::default() });
    let next = project.delete_object(&panel, &obj);
    assert!(next.object(&panel, &obj).is_none());
}

#[test]
fn front_and_back_relative_to_siblings() {
    let (project, panel, low) = with_object(ObjectKind::Text);
    let overrides = ObjectUpdate { z_index: Some(30), ..Default::default() };
    let (project, high) = project
        .add_object(Some(&panel), ObjectKind::Text, &overrides)
        .unwrap();
    let high = high.unwrap();

    let next = project.bring_object_to_front(&panel, &low);
    assert_eq!(next.object(&panel, &low).unwrap().z_index, 31);

    let next = project.send_object_to_back(&panel, &high);
    assert_eq!(next.object(&panel, &high).unwrap().z_index, 9);
}

#[test]
fn front_without_siblings_is_noop() {
    let (project, panel, obj) = with_object(ObjectKind::Text);
    assert_eq!(project.bring_object_to_front(&panel, &obj), project);
    assert_eq!(project.send_object_to_back(&panel, &obj), project);
}

#[test]
fn locked_objects_still_restack() {
    let locked = ObjectUpdate { locked: Some(true), ..Default::default() };
    let (project, panel) = with_panel();
    let (project, a) = project
        .add_object(Some(&panel), ObjectKind::Image, &locked)
        .unwrap();
    let a = a.unwrap();
    let sibling = ObjectUpdate { z_index: Some(20), ..Default::default() };
    let (project, _) = project
        .add_object(Some(&panel), ObjectKind::Text, &sibling)
        .unwrap();

    let next = project.bring_object_to_front(&panel, &a);
    let obj = next.object(&panel, &a).unwrap();
    assert_eq!(obj.z_index, 21);
    assert!(obj.is_locked());

    let next = next.send_object_to_back(&panel, &a);
    assert_eq!(next.object(&panel, &a).unwrap().z_index, 19);
}

#[test]
fn restack_saturates_at_z_index_limits() {
    let (project, panel, obj) = with_object(ObjectKind::Text);
    let top = ObjectUpdate { z_index: Some(i64::MAX), ..Default::default() };
    let (project, _) = project
        .add_object(Some(&panel), ObjectKind::Text, &top)
        .unwrap();
    let bottom = ObjectUpdate { z_index: Some(i64::MIN), ..Default::default() };
    let (project, _) = project
        .add_object(Some(&panel), ObjectKind::Text, &bottom)
        .unwrap();
    let project = crate::snapshot::from_json(&crate::snapshot::to_json(&project).unwrap()).unwrap();

    let next = project.bring_object_to_front(&panel, &obj);
    assert_eq!(next.object(&panel, &obj).unwrap().z_index, i64::MAX);

    let next = project.send_object_to_back(&panel, &obj);
    assert_eq!(next.object(&panel, &obj).unwrap().z_index, i64::MIN);
}

// =============================================================
// Project
// =============================================================

#[test]
fn update_project_renames_and_retypes() {
    let update = ProjectUpdate { name: Some("Deck".into()), kind: Some(ProjectType::GameDeck) };
    let next = comic().update_project(&update);
    assert_eq!(next.name, "Deck");
    assert_eq!(next.kind, ProjectType::GameDeck);
    assert_eq!(next.pages.len(), 4);
}

#[test]
fn record_prompt_appends() {
    let next = comic()
        .record_prompt("a cat", "", "Noir Manga")
        .record_prompt("a dog", "blurry", "Default");
    assert_eq!(next.prompts.len(), 2);
    assert_eq!(next.prompts[1].negative, "blurry");
}
