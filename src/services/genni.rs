//! Genni: AI image generation and background removal.
//!
//! DESIGN
//! ======
//! Each operation claims the controller's busy flag (generation only),
//! awaits the gateway, then hands the result back to the controller, which
//! applies it to the target captured when the request was issued. The
//! controller is `&mut` across the await; the CLI drives one command at a
//! time, so nothing else can observe the half-finished state.
//!
//! ERROR HANDLING
//! ==============
//! Generation failures leave the document untouched and set the status line
//! to "Generation failed". Background removal is deliberately asymmetric: a
//! gateway error keeps the original image (applied as if it were the result),
//! while an answer without an image reports "Background removal failed".

use canvas::consts::STATUS_GENERATION_FAILED;
use canvas::doc::{ObjectId, ObjectKind, PanelId};
use canvas::engine::{Action, Destination, EngineCore, GenerationError};
use tracing::{info, warn};

use crate::gateway::{AspectRatio, GatewayError, ImageGateway};

/// Instruction sent with every background-removal request.
pub const REMOVE_BACKGROUND_INSTRUCTION: &str =
    "Please remove the background of this image and return only the subject on a pure transparent or white background.";

// =============================================================================
// ART STYLES
// =============================================================================

/// A named prompt prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtStyle {
    pub name: &'static str,
    pub modifier: &'static str,
}

pub const DEFAULT_STYLE: &str = "Default";

pub const ART_STYLES: [ArtStyle; 6] = [
    ArtStyle { name: DEFAULT_STYLE, modifier: "" },
    ArtStyle {
        name: "Vintage Comic",
        modifier: "classic 1960s comic book style, dotted halftone, bold ink lines, vibrant colors",
    },
    ArtStyle {
        name: "Noir Manga",
        modifier: "high contrast black and white manga style, dramatic shadows, clean line art",
    },
    ArtStyle { name: "Water Color", modifier: "soft watercolor illustration, painterly, ethereal, textured paper" },
    ArtStyle {
        name: "Cyberpunk",
        modifier: "futuristic neon aesthetic, high-tech, gritty urban atmosphere, glow effects",
    },
    ArtStyle {
        name: "Oil Painting",
        modifier: "heavy brush strokes, textured oil on canvas, classical masterpiece style",
    },
];

/// Look up a style by name, ignoring case.
#[must_use]
pub fn art_style(name: &str) -> Option<&'static ArtStyle> {
    ART_STYLES
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
}

/// The prompt prefix for a style; unknown names fall back to no prefix.
#[must_use]
pub fn style_modifier(name: &str) -> &'static str {
    match art_style(name) {
        Some(style) => style.modifier,
        None => {
            warn!(style = name, "genni: unknown art style; using none");
            ""
        }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum GenniError {
    /// The controller refused to start a request.
    #[error(transparent)]
    Refused(#[from] GenerationError),

    #[error("prompt is empty")]
    EmptyPrompt,

    /// The object does not exist, is not an image, or has no picture yet.
    #[error("object is not an image with content")]
    NotAnImage,

    #[error("image gateway failed: {0}")]
    Gateway(#[from] GatewayError),

    /// The gateway answered without an image.
    #[error("no image returned")]
    NoImage,

    #[error("object is locked")]
    Locked,

    /// The page or panel the image was requested for was removed meanwhile.
    #[error("generation target no longer exists")]
    TargetGone,
}

// =============================================================================
// GENERATION
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub prompt: String,
    /// Logged with the prompt; not sent to the model.
    pub negative: String,
    pub style: String,
    pub aspect: AspectRatio,
    pub destination: Destination,
}

impl GenerateRequest {
    #[must_use]
    pub fn new(prompt: impl Into<String>, destination: Destination) -> Self {
        Self {
            prompt: prompt.into(),
            negative: String::new(),
            style: DEFAULT_STYLE.into(),
            aspect: AspectRatio::default(),
            destination,
        }
    }
}

/// Generate an image and place it at the request's destination.
///
/// Returns the created object id for [`Destination::NewObject`] along with
/// the controller's actions.
///
/// # Errors
///
/// Returns [`GenniError::Refused`] if the controller is busy or needs a
/// panel, [`GenniError::EmptyPrompt`] for a blank prompt, and
/// [`GenniError::Gateway`] or [`GenniError::NoImage`] when no image came
/// back. In the last two cases the controller has already recorded the
/// failure in its status line.
pub async fn generate(
    engine: &mut EngineCore,
    gateway: &dyn ImageGateway,
    request: &GenerateRequest,
) -> Result<(Option<ObjectId>, Vec<Action>), GenniError> {
    if request.prompt.trim().is_empty() {
        return Err(GenniError::EmptyPrompt);
    }
    let (ticket, mut actions) = engine.begin_generation(request.destination);
    crate::state::log_actions(&actions);
    let ticket = ticket?;
    let modifier = style_modifier(&request.style);
    info!(destination = ?request.destination, style = %request.style, aspect = %request.aspect, "genni: generating");

    match gateway
        .generate_image(&request.prompt, modifier, request.aspect)
        .await
    {
        Ok(Some(image)) => {
            let (created, placed) = engine.finish_generation(ticket, Some(image));
            actions.extend(placed);
            if engine.status() == STATUS_GENERATION_FAILED {
                warn!(destination = ?request.destination, "genni: generation target no longer exists");
                return Err(GenniError::TargetGone);
            }
            actions.extend(engine.record_prompt(&request.prompt, &request.negative, &request.style));
            Ok((created, actions))
        }
        Ok(None) => {
            warn!("genni: gateway returned no image");
            engine.finish_generation(ticket, None);
            Err(GenniError::NoImage)
        }
        Err(e) => {
            warn!(error = %e, code = e.code(), retryable = e.retryable(), "genni: generation failed");
            engine.finish_generation(ticket, None);
            Err(GenniError::Gateway(e))
        }
    }
}

// =============================================================================
// BACKGROUND REMOVAL
// =============================================================================

/// Replace an image object's picture with a background-free version.
///
/// # Errors
///
/// Returns [`GenniError::NotAnImage`] if the target is missing, not an
/// image, or empty, [`GenniError::Locked`] for a locked object, and
/// [`GenniError::NoImage`] when the gateway answered without an image.
pub async fn remove_background(
    engine: &mut EngineCore,
    gateway: &dyn ImageGateway,
    panel: &PanelId,
    object: &ObjectId,
) -> Result<Vec<Action>, GenniError> {
    let target = engine
        .project
        .object(panel, object)
        .filter(|o| o.kind == ObjectKind::Image)
        .ok_or(GenniError::NotAnImage)?;
    if target.is_locked() {
        return Err(GenniError::Locked);
    }
    let source = target
        .image_url
        .clone()
        .filter(|url| !url.is_empty())
        .ok_or(GenniError::NotAnImage)?;

    let mut actions = engine.report("Removing background...");
    let result = match gateway
        .edit_image(&source, REMOVE_BACKGROUND_INSTRUCTION)
        .await
    {
        Ok(image) => image,
        Err(e) => {
            warn!(error = %e, code = e.code(), %object, "genni: background removal failed; keeping original");
            Some(source)
        }
    };

    match result {
        Some(image) => {
            actions.extend(engine.apply_removed_background(panel, object, image));
            Ok(actions)
        }
        None => {
            engine.report("Background removal failed");
            Err(GenniError::NoImage)
        }
    }
}

#[cfg(test)]
#[path = "genni_test.rs"]
mod tests;
