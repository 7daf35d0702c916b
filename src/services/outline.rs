//! Plain-text outline of a project: pages, panels, and objects in explorer
//! order (topmost first).

use canvas::doc::{CanvasObject, GradientKind, ObjectId, Page, Panel, PanelId, Project};

const PREVIEW_CHARS: usize = 24;

type Selection = (Option<PanelId>, Option<ObjectId>);

/// Render the whole project. The current page is marked `*`, the selected
/// panel and object `>`.
#[must_use]
pub fn render(project: &Project, selection: Selection) -> String {
    let pages = project.pages.len();
    let mut lines = vec![format!(
        "{} ({}, {pages} page{})",
        project.name,
        project.kind,
        if pages == 1 { "" } else { "s" }
    )];
    for (index, page) in project.pages.iter().enumerate() {
        let current = index == project.current_page_index;
        let selection = if current { selection } else { (None, None) };
        page_lines(&mut lines, index, page, current, selection);
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn page_lines(lines: &mut Vec<String>, index: usize, page: &Page, current: bool, selection: Selection) {
    let marker = if current { '*' } else { ' ' };
    let mut extras = Vec::new();
    if page.background_image.is_some() {
        extras.push("background image".to_string());
    }
    if let Some(gradient) = page
        .gradient
        .as_ref()
        .filter(|g| g.kind != GradientKind::None)
    {
        extras.push(format!("{} gradient", gradient.kind));
    }
    let extras = if extras.is_empty() { String::new() } else { format!(" [{}]", extras.join(", ")) };
    lines.push(format!("{marker} {index}: {}{extras}", page.name));
    for panel in &page.panels {
        panel_lines(lines, panel, selection);
    }
}

fn panel_lines(lines: &mut Vec<String>, panel: &Panel, selection: Selection) {
    let selected = selection.0 == Some(panel.id);
    let marker = if selected { '>' } else { ' ' };
    let rotation =
        if panel.rotation.abs() < f64::EPSILON { String::new() } else { format!(" rot {:.0}", panel.rotation) };
    lines.push(format!(
        "  {marker} {} {} @ ({:.1}, {:.1}) {:.1}x{:.1}{rotation}",
        panel.name, panel.id, panel.x, panel.y, panel.width, panel.height
    ));
    for obj in panel.explorer_order() {
        let marker = if selected && selection.1 == Some(obj.id) { '>' } else { ' ' };
        let lock = if obj.is_locked() { " locked" } else { "" };
        lines.push(format!("    {marker} {} {} z{}{lock}{}", obj.kind, obj.id, obj.z_index, preview(obj)));
    }
}

fn preview(obj: &CanvasObject) -> String {
    if let Some(url) = obj.image_url.as_deref() {
        return if url.is_empty() { " (empty)".into() } else { format!(" ({} chars)", url.len()) };
    }
    match obj.content.as_deref() {
        Some(text) if !text.is_empty() => {
            let clipped: String = text.chars().take(PREVIEW_CHARS).collect();
            let ellipsis = if text.chars().count() > PREVIEW_CHARS { "..." } else { "" };
            format!(" \"{clipped}{ellipsis}\"")
        }
        _ => String::new(),
    }
}

#[cfg(test)]
#[path = "outline_test.rs"]
mod tests;
