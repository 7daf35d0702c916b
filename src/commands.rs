//! Command-line surface: argument types and command dispatch.
//!
//! Every command except `new`, `import` and `styles` opens the project file,
//! drives the controller, and saves the file back only if the controller
//! reported a changed document (or `--page` switched pages). Ids of created
//! panels and objects go to stdout; the controller's status line goes to
//! stderr.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use canvas::doc::{
    Gradient, GradientKind, ObjectId, ObjectKind, ObjectUpdate, PageUpdate, PanelId, PanelUpdate, Project,
    ProjectType, ProjectUpdate,
};
use canvas::edit::DocError;
use canvas::engine::{Action, Destination, EngineCore};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

use crate::gateway::{self, AspectRatio, ImageGateway};
use crate::services::genni::{self, ART_STYLES, DEFAULT_STYLE, GenerateRequest, GenniError};
use crate::services::outline;
use crate::services::persistence::{self, PersistenceError, bundle_file_name};
use crate::state::{AppState, log_actions};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Doc(#[from] DocError),
    #[error(transparent)]
    Genni(#[from] GenniError),
    /// The controller asked the user to do something first.
    #[error("{0}")]
    Notice(String),
    #[error("image gateway not configured; set GEMINI_API_KEY or IMAGE_API_KEY_ENV")]
    GatewayUnavailable,
    #[error("no panel {0} on the current page")]
    UnknownPanel(PanelId),
    #[error("no object {object} in panel {panel}")]
    UnknownObject { panel: PanelId, object: ObjectId },
}

// =============================================================================
// ARGUMENTS
// =============================================================================

#[derive(Parser, Debug)]
#[command(name = "storyboard", about = "Lay out comics, books and cards with AI-generated art")]
pub struct Cli {
    /// Project file to operate on.
    #[arg(long, short, env = "STORYBOARD_FILE", default_value = "storyboard.json", global = true)]
    pub file: PathBuf,

    /// Switch to this page (0-based) before running the command.
    #[arg(long, global = true)]
    pub page: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project file.
    New {
        #[arg(default_value = "Untitled Comic")]
        name: String,
        #[arg(long = "type", default_value = "comic-book")]
        kind: ProjectType,
        /// Replace an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Print the project outline.
    Show,
    /// List the art styles available to `generate`.
    Styles,
    /// Copy a bundle or another project file into the project file.
    Import {
        source: PathBuf,
        /// Replace an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Write a copy of the project under its bundle file name.
    Bundle {
        /// Target directory; defaults to the project file's directory.
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Rename the project or change its type.
    UpdateProject {
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type")]
        kind: Option<ProjectType>,
    },
    AddPage,
    SelectPage {
        index: usize,
    },
    DeletePage {
        index: usize,
    },
    /// Change the current page's name or background.
    UpdatePage(PageFields),
    AddPanel {
        /// Layout preset name for the project type.
        #[arg(long)]
        template: Option<String>,
    },
    UpdatePanel {
        panel: PanelId,
        #[command(flatten)]
        fields: PanelFields,
    },
    DuplicatePanel {
        panel: PanelId,
    },
    DeletePanel {
        panel: PanelId,
    },
    /// Move a panel within the page's paint order.
    MovePanel {
        panel: PanelId,
        to: usize,
    },
    AddObject {
        panel: PanelId,
        /// image, text, speech-bubble or narration.
        kind: ObjectKind,
        #[command(flatten)]
        fields: ObjectFields,
    },
    UpdateObject {
        panel: PanelId,
        object: ObjectId,
        #[command(flatten)]
        fields: ObjectFields,
    },
    DuplicateObject {
        panel: PanelId,
        object: ObjectId,
    },
    DeleteObject {
        panel: PanelId,
        object: ObjectId,
    },
    BringToFront {
        panel: PanelId,
        object: ObjectId,
    },
    SendToBack {
        panel: PanelId,
        object: ObjectId,
    },
    /// Generate an image with the configured gateway.
    Generate {
        prompt: String,
        #[arg(long, default_value = DEFAULT_STYLE)]
        style: String,
        /// Recorded in the prompt log.
        #[arg(long, default_value = "")]
        negative: String,
        #[arg(long, default_value = "1:1")]
        aspect: AspectRatio,
        #[arg(long, value_enum, default_value_t = GenTarget::Object)]
        to: GenTarget,
        /// Panel for `object` and `panel-bg` targets.
        #[arg(long)]
        panel: Option<PanelId>,
    },
    /// Remove the background of an image object.
    RemoveBg {
        panel: PanelId,
        object: ObjectId,
    },
}

impl Command {
    fn needs_gateway(&self) -> bool {
        matches!(self, Self::Generate { .. } | Self::RemoveBg { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenTarget {
    /// A new image object in the panel.
    Object,
    /// The panel background.
    PanelBg,
    /// The current page background.
    PageBg,
}

impl From<GenTarget> for Destination {
    fn from(target: GenTarget) -> Self {
        match target {
            GenTarget::Object => Self::NewObject,
            GenTarget::PanelBg => Self::PanelBackground,
            GenTarget::PageBg => Self::PageBackground,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct PageFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub background_color: Option<String>,
    #[arg(long, conflicts_with = "clear_background_image")]
    pub background_image: Option<String>,
    #[arg(long)]
    pub clear_background_image: bool,
    /// none, linear or radial.
    #[arg(long, conflicts_with = "clear_gradient")]
    pub gradient: Option<GradientKind>,
    #[arg(long, requires = "gradient")]
    pub color1: Option<String>,
    #[arg(long, requires = "gradient")]
    pub color2: Option<String>,
    #[arg(long, requires = "gradient", allow_negative_numbers = true)]
    pub angle: Option<f64>,
    #[arg(long)]
    pub clear_gradient: bool,
}

impl PageFields {
    #[must_use]
    pub fn into_update(self) -> PageUpdate {
        let background_image = match (self.background_image, self.clear_background_image) {
            (Some(url), _) => Some(Some(url)),
            (None, true) => Some(None),
            (None, false) => None,
        };
        let gradient = match self.gradient {
            Some(kind) => {
                let base = Gradient::default();
                Some(Some(Gradient {
                    kind,
                    color1: self.color1.unwrap_or(base.color1),
                    color2: self.color2.unwrap_or(base.color2),
                    angle: self.angle.unwrap_or(base.angle),
                }))
            }
            None if self.clear_gradient => Some(None),
            None => None,
        };
        PageUpdate { name: self.name, background_color: self.background_color, background_image, gradient }
    }
}

#[derive(Args, Debug, Default)]
pub struct PanelFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    pub x: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub y: Option<f64>,
    #[arg(long)]
    pub width: Option<f64>,
    #[arg(long)]
    pub height: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub rotation: Option<f64>,
    #[arg(long)]
    pub opacity: Option<f64>,
    #[arg(long)]
    pub background_color: Option<String>,
    #[arg(long, conflicts_with = "clear_background_image")]
    pub background_image: Option<String>,
    #[arg(long)]
    pub clear_background_image: bool,
    #[arg(long)]
    pub border_color: Option<String>,
    #[arg(long)]
    pub border_width: Option<f64>,
    #[arg(long)]
    pub collapsed: Option<bool>,
}

impl PanelFields {
    #[must_use]
    pub fn into_update(self) -> PanelUpdate {
        let background_image = match (self.background_image, self.clear_background_image) {
            (Some(url), _) => Some(Some(url)),
            (None, true) => Some(None),
            (None, false) => None,
        };
        PanelUpdate {
            name: self.name,
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            rotation: self.rotation,
            background_color: self.background_color,
            background_image,
            border_color: self.border_color,
            border_width: self.border_width,
            opacity: self.opacity,
            collapsed: self.collapsed,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct ObjectFields {
    #[arg(long, allow_negative_numbers = true)]
    pub x: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub y: Option<f64>,
    #[arg(long)]
    pub width: Option<f64>,
    #[arg(long)]
    pub height: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub rotation: Option<f64>,
    #[arg(long)]
    pub opacity: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub z_index: Option<i64>,
    #[arg(long)]
    pub content: Option<String>,
    #[arg(long)]
    pub image_url: Option<String>,
    #[arg(long)]
    pub background_color: Option<String>,
    #[arg(long)]
    pub border_color: Option<String>,
    #[arg(long)]
    pub border_width: Option<f64>,
    #[arg(long)]
    pub font_family: Option<String>,
    #[arg(long)]
    pub font_size: Option<f64>,
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long)]
    pub flip_h: Option<bool>,
    #[arg(long)]
    pub flip_v: Option<bool>,
    #[arg(long)]
    pub locked: Option<bool>,
    #[arg(long, allow_negative_numbers = true)]
    pub tail_x: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub tail_y: Option<f64>,
}

impl ObjectFields {
    #[must_use]
    pub fn into_update(self) -> ObjectUpdate {
        ObjectUpdate {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            rotation: self.rotation,
            opacity: self.opacity,
            z_index: self.z_index,
            content: self.content,
            image_url: self.image_url,
            background_color: self.background_color,
            border_color: self.border_color,
            border_width: self.border_width,
            font_family: self.font_family,
            font_size: self.font_size,
            color: self.color,
            flipped_h: self.flip_h,
            flipped_v: self.flip_v,
            locked: self.locked,
            tail_x: self.tail_x,
            tail_y: self.tail_y,
        }
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Run one parsed command.
///
/// # Errors
///
/// Returns [`CliError`] for file, document, gateway and lookup failures.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    let Cli { file, page, command } = cli;
    match command {
        Command::New { name, kind, force } => run_new(&file, name, kind, force).await,
        Command::Import { source, force } => run_import(&file, &source, force).await,
        Command::Styles => {
            for style in &ART_STYLES {
                println!("{:<14} {}", style.name, style.modifier);
            }
            Ok(())
        }
        command => {
            let gateway = if command.needs_gateway() { load_gateway() } else { None };
            let mut state = AppState::open(&file, gateway).await?;
            if let Some(index) = page {
                log_actions(&state.engine.select_page(index)?);
            }
            let changed = execute(&mut state, command).await?;
            if changed || page.is_some() {
                state.save().await?;
            }
            eprintln!("{}", state.engine.status());
            Ok(())
        }
    }
}

async fn run_new(path: &Path, name: String, kind: ProjectType, force: bool) -> Result<(), CliError> {
    let project = Project::new(name, kind);
    write_project(path, &project, force).await?;
    info!(path = %path.display(), kind = %kind, pages = project.pages.len(), "project created");
    println!("{}", project.id);
    Ok(())
}

async fn run_import(path: &Path, source: &Path, force: bool) -> Result<(), CliError> {
    let project = persistence::load_project(source).await?;
    write_project(path, &project, force).await?;
    info!(from = %source.display(), to = %path.display(), name = %project.name, "project imported");
    println!("{}", project.id);
    Ok(())
}

async fn write_project(path: &Path, project: &Project, force: bool) -> Result<(), PersistenceError> {
    if force {
        persistence::save_project(path, project).await
    } else {
        persistence::create_project(path, project).await
    }
}

fn load_gateway() -> Option<Arc<dyn ImageGateway>> {
    match gateway::from_env() {
        Ok(gateway) => Some(gateway),
        Err(e) => {
            warn!(error = %e, code = e.code(), "image gateway not configured; AI commands disabled");
            None
        }
    }
}

/// Apply one command to an open project. Returns whether the document changed.
///
/// # Errors
///
/// Returns [`CliError`] if the command cannot be applied.
pub async fn execute(state: &mut AppState, command: Command) -> Result<bool, CliError> {
    let engine = &mut state.engine;
    match command {
        Command::New { .. } | Command::Import { .. } | Command::Styles => Ok(false),
        Command::Show => {
            print!("{}", outline::render(&engine.project, engine.selection()));
            Ok(false)
        }
        Command::Bundle { dir } => {
            let dir = dir.unwrap_or_else(|| parent_dir(&state.path));
            let target = dir.join(bundle_file_name(&engine.project.name));
            persistence::save_project(&target, &engine.project).await?;
            println!("{}", target.display());
            Ok(false)
        }
        Command::UpdateProject { name, kind } => edited(engine.update_project(&ProjectUpdate { name, kind })),
        Command::AddPage => edited(engine.add_page()),
        Command::SelectPage { index } => edited(engine.select_page(index)?),
        Command::DeletePage { index } => edited(engine.delete_page(index)?),
        Command::UpdatePage(fields) => edited(engine.update_page(&fields.into_update())),
        Command::AddPanel { template } => {
            let (id, actions) = engine.add_panel(template.as_deref());
            print_id(id);
            edited(actions)
        }
        Command::UpdatePanel { panel, fields } => {
            require_panel(engine, panel)?;
            edited(engine.update_panel(&panel, &fields.into_update()))
        }
        Command::DuplicatePanel { panel } => {
            require_panel(engine, panel)?;
            let (id, actions) = engine.duplicate_panel(&panel);
            print_id(id);
            edited(actions)
        }
        Command::DeletePanel { panel } => {
            require_panel(engine, panel)?;
            edited(engine.delete_panel(&panel))
        }
        Command::MovePanel { panel, to } => {
            require_panel(engine, panel)?;
            edited(engine.move_panel(&panel, to))
        }
        Command::AddObject { panel, kind, fields } => {
            require_panel(engine, panel)?;
            log_actions(&engine.select_panel(Some(panel)));
            let (id, actions) = engine.add_object(kind, &fields.into_update());
            print_id(id);
            edited(actions)
        }
        Command::UpdateObject { panel, object, fields } => {
            let locked = require_object(engine, panel, object)?;
            let update = fields.into_update();
            if locked && update != (ObjectUpdate { locked: update.locked, ..Default::default() }) {
                warn!(%object, "object is locked; only --locked applies");
            }
            edited(engine.update_object(&panel, &object, &update))
        }
        Command::DuplicateObject { panel, object } => {
            require_object(engine, panel, object)?;
            let (id, actions) = engine.duplicate_object(&panel, &object);
            print_id(id);
            edited(actions)
        }
        Command::DeleteObject { panel, object } => {
            require_object(engine, panel, object)?;
            edited(engine.delete_object(&panel, &object))
        }
        Command::BringToFront { panel, object } => {
            require_object(engine, panel, object)?;
            edited(engine.bring_object_to_front(&panel, &object))
        }
        Command::SendToBack { panel, object } => {
            require_object(engine, panel, object)?;
            edited(engine.send_object_to_back(&panel, &object))
        }
        Command::Generate { prompt, style, negative, aspect, to, panel } => {
            let gateway = state.gateway.clone().ok_or(CliError::GatewayUnavailable)?;
            if let Some(panel) = panel {
                require_panel(engine, panel)?;
                log_actions(&engine.select_panel(Some(panel)));
            }
            let request = GenerateRequest { prompt, negative, style, aspect, destination: to.into() };
            let (id, actions) = genni::generate(engine, gateway.as_ref(), &request).await?;
            print_id(id);
            edited(actions)
        }
        Command::RemoveBg { panel, object } => {
            let gateway = state.gateway.clone().ok_or(CliError::GatewayUnavailable)?;
            require_object(engine, panel, object)?;
            edited(genni::remove_background(engine, gateway.as_ref(), &panel, &object).await?)
        }
    }
}

/// Fail on a notice; otherwise report whether the project changed.
fn edited(actions: Vec<Action>) -> Result<bool, CliError> {
    log_actions(&actions);
    let mut changed = false;
    for action in actions {
        match action {
            Action::Notice(message) => return Err(CliError::Notice(message)),
            Action::ProjectChanged => changed = true,
            _ => {}
        }
    }
    Ok(changed)
}

fn require_panel(engine: &EngineCore, panel: PanelId) -> Result<(), CliError> {
    match engine.project.panel(&panel) {
        Some(_) => Ok(()),
        None => Err(CliError::UnknownPanel(panel)),
    }
}

/// Returns whether the object is locked.
fn require_object(engine: &EngineCore, panel: PanelId, object: ObjectId) -> Result<bool, CliError> {
    require_panel(engine, panel)?;
    engine
        .project
        .object(&panel, &object)
        .map(canvas::doc::CanvasObject::is_locked)
        .ok_or(CliError::UnknownObject { panel, object })
}

fn print_id(id: Option<uuid::Uuid>) {
    if let Some(id) = id {
        println!("{id}");
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
#[path = "commands_test.rs"]
mod tests;
