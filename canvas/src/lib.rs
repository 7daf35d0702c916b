//! Editing core for paged layout documents (comics, books, cards).
//!
//! This crate owns everything between raw pointer input and the document
//! snapshot: the project tree and its pure edit operations, the percentage
//! geometry used by drags, the interaction state machine, and the JSON
//! snapshot codec. Rendering, export and the image service are left to the
//! host, which feeds input events to [`engine::EngineCore`] and observes the
//! resulting [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Selection and interaction controller ([`engine::EngineCore`]) |
//! | [`doc`] | Project, page, panel and object types plus typed field updates |
//! | [`edit`] | Pure snapshot-to-snapshot edit operations |
//! | [`geometry`] | Points, sizes, percent deltas and zoom helpers |
//! | [`dial`] | Rotation knob angle math |
//! | [`input`] | Pointer buttons, targets, drag descriptors and the input state machine |
//! | [`snapshot`] | Validated JSON load/save |
//! | [`consts`] | Default geometry, colors and limits |

pub mod consts;
pub mod dial;
pub mod doc;
pub mod edit;
pub mod engine;
pub mod geometry;
pub mod input;
pub mod snapshot;
