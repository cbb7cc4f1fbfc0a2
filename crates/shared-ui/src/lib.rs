//! Dioxus component kit for the marketplace admin console.
//!
//! Each component lives in `components/<name>/` with its stylesheet beside it,
//! linked through `asset!` when the component renders.

pub mod components;

pub use components::*;
