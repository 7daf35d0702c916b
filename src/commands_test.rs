use canvas::doc::ProjectType;

use super::*;

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["storyboard"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

fn state_in(dir: &tempfile::TempDir) -> AppState {
    let path = dir.path().join("story.json");
    AppState::new(Project::new("My Story", ProjectType::ComicBook), path, None)
}

fn first_panel(state: &mut AppState) -> PanelId {
    let (panel, _) = state.engine.add_panel(None);
    panel.unwrap()
}

// =============================================================================
// PARSING
// =============================================================================

#[test]
fn file_defaults_and_global_page() {
    let cli = parse(&["show", "--page", "2"]);
    assert_eq!(cli.file, PathBuf::from("storyboard.json"));
    assert_eq!(cli.page, Some(2));
    assert!(matches!(cli.command, Command::Show));
}

#[test]
fn new_parses_project_type() {
    let cli = parse(&["-f", "deck.json", "new", "Deck", "--type", "playing-cards"]);
    match cli.command {
        Command::New { name, kind, force } => {
            assert_eq!(name, "Deck");
            assert_eq!(kind, ProjectType::PlayingCards);
            assert!(!force);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn object_fields_accept_negative_numbers() {
    let panel = uuid::Uuid::new_v4();
    let cli = parse(&["add-object", &panel.to_string(), "speech-bubble", "--x", "-12.5", "--rotation", "-90"]);
    match cli.command {
        Command::AddObject { panel: parsed, kind, fields } => {
            assert_eq!(parsed, panel);
            assert_eq!(kind, ObjectKind::SpeechBubble);
            let update = fields.into_update();
            assert_eq!(update.x, Some(-12.5));
            assert_eq!(update.rotation, Some(-90.0));
            assert_eq!(update.y, None);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn generate_defaults() {
    let cli = parse(&["generate", "a cat"]);
    match cli.command {
        Command::Generate { prompt, style, negative, aspect, to, panel } => {
            assert_eq!(prompt, "a cat");
            assert_eq!(style, DEFAULT_STYLE);
            assert!(negative.is_empty());
            assert_eq!(aspect, AspectRatio::Square);
            assert_eq!(to, GenTarget::Object);
            assert!(panel.is_none());
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn generate_target_maps_to_destination() {
    let cli = parse(&["generate", "sky", "--to", "page-bg", "--aspect", "16:9"]);
    match cli.command {
        Command::Generate { to, aspect, .. } => {
            assert_eq!(Destination::from(to), Destination::PageBackground);
            assert_eq!(aspect, AspectRatio::Wide);
        }
        other => panic!("unexpected command {other:?}"),
    }
    assert_eq!(Destination::from(GenTarget::PanelBg), Destination::PanelBackground);
}

#[test]
fn conflicting_background_flags_are_rejected() {
    let argv = ["storyboard", "update-page", "--background-image", "x", "--clear-background-image"];
    assert!(Cli::try_parse_from(argv).is_err());
    let argv = ["storyboard", "update-page", "--color1", "#000"];
    assert!(Cli::try_parse_from(argv).is_err());
}

#[test]
fn only_ai_commands_need_the_gateway() {
    assert!(parse(&["generate", "x"]).command.needs_gateway());
    assert!(!parse(&["show"]).command.needs_gateway());
    assert!(!parse(&["add-page"]).command.needs_gateway());
}

// =============================================================================
// FIELD CONVERSION
// =============================================================================

#[test]
fn page_fields_fill_gradient_defaults() {
    let fields = PageFields { gradient: Some(GradientKind::Linear), angle: Some(45.0), ..Default::default() };
    let update = fields.into_update();
    let gradient = update.gradient.unwrap().unwrap();
    assert_eq!(gradient.kind, GradientKind::Linear);
    assert_eq!(gradient.color1, Gradient::default().color1);
    assert!((gradient.angle - 45.0).abs() < f64::EPSILON);
    assert_eq!(update.background_image, None);
}

#[test]
fn clear_flags_map_to_explicit_none() {
    let page = PageFields { clear_background_image: true, clear_gradient: true, ..Default::default() }.into_update();
    assert_eq!(page.background_image, Some(None));
    assert_eq!(page.gradient, Some(None));

    let panel = PanelFields { clear_background_image: true, ..Default::default() }.into_update();
    assert_eq!(panel.background_image, Some(None));
    assert_eq!(PanelFields::default().into_update(), PanelUpdate::default());
}

#[test]
fn object_flip_flags_map_to_flipped_fields() {
    let update = ObjectFields { flip_h: Some(true), locked: Some(false), ..Default::default() }.into_update();
    assert_eq!(update.flipped_h, Some(true));
    assert_eq!(update.flipped_v, None);
    assert_eq!(update.locked, Some(false));
}

// =============================================================================
// EXECUTION
// =============================================================================

#[test]
fn edited_reports_change_and_fails_on_notice() {
    assert!(edited(vec![Action::Status("x".into()), Action::ProjectChanged]).unwrap());
    assert!(!edited(vec![Action::MenusClosed]).unwrap());
    let err = edited(vec![Action::Notice("pick a panel".into())]).unwrap_err();
    assert!(matches!(err, CliError::Notice(m) if m == "pick a panel"));
}

#[tokio::test]
async fn add_object_selects_the_named_panel() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = state_in(&dir);
    let panel = first_panel(&mut state);
    state.engine.select_panel(None);

    let changed = execute(
        &mut state,
        Command::AddObject { panel, kind: ObjectKind::Text, fields: ObjectFields::default() },
    )
    .await
    .unwrap();
    assert!(changed);
    let (selected_panel, selected_object) = state.engine.selection();
    assert_eq!(selected_panel, Some(panel));
    assert!(selected_object.is_some());
}

#[tokio::test]
async fn unknown_ids_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = state_in(&dir);
    let panel = first_panel(&mut state);
    let missing = uuid::Uuid::new_v4();

    let err = execute(&mut state, Command::DeletePanel { panel: missing }).await.unwrap_err();
    assert!(matches!(err, CliError::UnknownPanel(id) if id == missing));

    let err = execute(&mut state, Command::DeleteObject { panel, object: missing }).await.unwrap_err();
    assert!(matches!(err, CliError::UnknownObject { object, .. } if object == missing));
}

#[tokio::test]
async fn locked_object_only_takes_lock_changes() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = state_in(&dir);
    let panel = first_panel(&mut state);
    let locked = ObjectUpdate { locked: Some(true), ..ObjectUpdate::position(5.0, 5.0) };
    let (object, _) = state.engine.add_object(ObjectKind::Image, &locked);
    let object = object.unwrap();

    let fields = ObjectFields { x: Some(50.0), ..Default::default() };
    execute(&mut state, Command::UpdateObject { panel, object, fields }).await.unwrap();
    let x = state.engine.project.object(&panel, &object).unwrap().x;
    assert!((x - 5.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn delete_last_page_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");
    let mut state = AppState::new(Project::new("Book", ProjectType::Book), path, None);
    let err = execute(&mut state, Command::DeletePage { index: 0 }).await.unwrap_err();
    assert!(matches!(err, CliError::Doc(DocError::LastPage)));
}

#[tokio::test]
async fn generate_without_gateway_fails_before_touching_engine() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = state_in(&dir);
    let panel = first_panel(&mut state);
    let status = state.engine.status().to_string();

    let command = parse(&["generate", "a cat", "--panel", &panel.to_string()]).command;
    let err = execute(&mut state, command).await.unwrap_err();
    assert!(matches!(err, CliError::GatewayUnavailable));
    assert_eq!(state.engine.status(), status);
}

#[tokio::test]
async fn show_and_bundle_leave_project_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = state_in(&dir);
    let before = state.engine.project.clone();

    assert!(!execute(&mut state, Command::Show).await.unwrap());
    assert!(!execute(&mut state, Command::Bundle { dir: None }).await.unwrap());
    assert_eq!(state.engine.project, before);

    let bundle = dir.path().join("My_Story_bundle.json");
    let saved = persistence::load_project(&bundle).await.unwrap();
    assert_eq!(saved, before);
}

#[tokio::test]
async fn run_new_refuses_existing_file_unless_forced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("story.json");
    run_new(&path, "One".into(), ProjectType::Book, false).await.unwrap();

    let err = run_new(&path, "Two".into(), ProjectType::Book, false).await.unwrap_err();
    assert!(matches!(err, CliError::Persistence(PersistenceError::Exists(_))));

    run_new(&path, "Two".into(), ProjectType::Book, true).await.unwrap();
    assert_eq!(persistence::load_project(&path).await.unwrap().name, "Two");
}

#[test]
fn parent_dir_of_bare_file_is_cwd() {
    assert_eq!(parent_dir(Path::new("story.json")), PathBuf::from("."));
    assert_eq!(parent_dir(Path::new("/tmp/a/story.json")), PathBuf::from("/tmp/a"));
}

#[tokio::test]
async fn import_copies_a_bundle_into_the_project_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = state_in(&dir);
    first_panel(&mut state);
    execute(&mut state, Command::Bundle { dir: None }).await.unwrap();

    let target = dir.path().join("copy.json");
    let bundle = dir.path().join("My_Story_bundle.json");
    run_import(&target, &bundle, false).await.unwrap();
    assert_eq!(persistence::load_project(&target).await.unwrap(), state.engine.project);

    let err = run_import(&target, &dir.path().join("missing.json"), true).await.unwrap_err();
    assert!(matches!(err, CliError::Persistence(PersistenceError::Io { .. })));
}

#[tokio::test]
async fn edits_that_change_nothing_are_not_saved() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = state_in(&dir);
    let panel = first_panel(&mut state);

    let fields = PanelFields::default();
    assert!(!execute(&mut state, Command::UpdatePanel { panel, fields }).await.unwrap());
    let fields = PanelFields { name: Some("Intro".into()), ..Default::default() };
    assert!(execute(&mut state, Command::UpdatePanel { panel, fields }).await.unwrap());
}

#[tokio::test]
async fn locked_object_moves_to_front() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = state_in(&dir);
    let panel = first_panel(&mut state);
    let locked = ObjectUpdate { locked: Some(true), ..Default::default() };
    let (object, _) = state.engine.add_object(ObjectKind::Image, &locked);
    let object = object.unwrap();
    let above = ObjectUpdate { z_index: Some(20), ..Default::default() };
    state.engine.add_object(ObjectKind::Text, &above);

    assert!(execute(&mut state, Command::BringToFront { panel, object }).await.unwrap());
    assert_eq!(state.engine.project.object(&panel, &object).unwrap().z_index, 21);
}
