//! Room-sketch canvas engine for the home-design intake wizard.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It turns
//! pointer strokes into walls and freehand paths, inserts room templates,
//! keeps one lettered label per measured wall, and tracks the user's length
//! entries along with the derived perimeter and area. The host page wires DOM
//! events to the engine and receives a [`engine::Completion`] after every
//! content change.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`shape`] | Shape variants, transforms and the in-memory shape store |
//! | [`stroke`] | Stroke normalization (straight wall vs freehand) |
//! | [`template`] | Arc, circle, half-circle, rectangle and quick-room templates |
//! | [`ledger`] | Wall measurement ledger, perimeter and area |
//! | [`label`] | Label placement from live bounding boxes |
//! | [`history`] | Canvas snapshots recorded after each edit |
//! | [`hit`] | Eraser and pointer hit-testing |
//! | [`input`] | Tools, brush state and the gesture state machine |
//! | [`render`] | Scene rendering to a 2D context |
//! | [`geom`] | Points and bounding boxes |
//! | [`units`] | Centimetre/inch units and length conversion |
//! | [`error`] | Crate error type |
//! | [`consts`] | Shared numeric constants (canvas size, grid, offsets) |

pub mod consts;
pub mod engine;
pub mod error;
pub mod geom;
pub mod hit;
pub mod history;
pub mod input;
pub mod label;
pub mod ledger;
pub mod render;
pub mod shape;
pub mod stroke;
pub mod template;
pub mod units;
