//! The pane containers
//!
//! Each pane owns its children as boxed [`crate::LayoutNode`] trait objects
//! and implements the trait itself, so panes nest freely. A pane's `layout`
//! reads the current configuration and child constraints fresh every call;
//! panes keep no cached measurements between passes.

pub mod anchorpane;
pub mod borderpane;
pub mod boxpane;
pub mod constraints;
pub mod flowpane;
pub mod gridpane;
pub mod tilepane;
