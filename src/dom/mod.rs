//! In-process dashboard document
//!
//! A retained element tree standing in for the browser DOM. The static layout and
//! every header listener are created once by [`skeleton::build_document`]; renders
//! only swap the children of known containers, so listeners bound at setup time
//! are never duplicated.

mod document;
mod element;
pub mod ids;
pub mod skeleton;

pub use document::{Document, DomEvent};
pub use element::{escape, Element, EventKind, Listener};
