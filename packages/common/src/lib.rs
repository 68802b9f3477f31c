//! Shared building blocks for the mailgen crates: the export node tree, a
//! visitor over it, and the screen geometry the host reports.

pub mod error;
pub mod geometry;
pub mod visitor;
pub mod vdom;

pub use error::*;
pub use geometry::*;
pub use visitor::*;
pub use vdom::VNode;
