#![warn(missing_docs)]
//! First-person views of grid mazes, drawn by ray casting.
//!
//! The same march is available in two forms that agree on what each column sees:
//! [`raycast::sequential::Raycaster`] casts one ray per column in order, and
//! [`raycast::parallel::FrameRenderer`] shades every pixel independently across rayon's threads.

pub mod camera;
pub mod color;
pub mod constants;
pub mod frame;
pub mod grid;
pub mod minimap;
pub mod raycast;
pub mod session;
pub mod settings;
pub mod util;
