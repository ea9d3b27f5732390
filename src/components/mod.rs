//! ECS components for entities.
//!
//! Submodules overview:
//! - [`animation`] – active animation, playback progress and the per-tick request
//! - [`drawnregion`] – screen area covered by the last blit, for erasing
//! - [`inputcontrolled`] – markers for the keyboard-driven character
//! - [`mapposition`] – screen position in mode 0 bytes and lines

pub mod animation;
pub mod drawnregion;
pub mod inputcontrolled;
pub mod mapposition;
