//! Event types and observers.
//!
//! Submodules:
//! - [`animation`] – animation transitions, by request or by completion
//! - [`toggledebug`] – show or hide the debug overlay
pub mod animation;
pub mod toggledebug;
