pub mod hooks;
pub mod player;
pub mod render;
pub mod typewriter;
