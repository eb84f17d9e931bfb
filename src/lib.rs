//! Story Engine — linear visual-novel playback for games.
//!
//! Plays a branch-free sequence of scenes and dialog lines with a timed
//! typewriter reveal, forward/backward navigation via `next`/`back`, and
//! host-supplied side-effect hooks fired on scene and dialog entry. The
//! render surface and the passage of time are both injected, so the engine
//! runs headless in tests and behind any display layer in production.

pub mod core;
pub mod schema;
