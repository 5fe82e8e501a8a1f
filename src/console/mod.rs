//! Console Module
//!
//! The controller tying the other modules together:
//! - Description loading and the operation index
//! - The active selection and its form
//! - Call submission and result presentation

pub mod controller;

// Re-export commonly used types and functions
pub use controller::{present, render_menu, Console, Selection};
