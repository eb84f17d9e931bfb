/// Render boundary: the surface the player draws into.
///
/// The engine calls out through this trait and never the reverse; a
/// display layer (terminal, DOM, game UI) implements it, and tests use a
/// recording implementation. All indices are positions in the story the
/// player was built with.
use crate::schema::story::Subject;

pub trait Renderer {
    /// Make `scene` the visible scene, hiding all others.
    fn show_scene(&mut self, scene: usize);

    /// Make `dialog` the visible dialog container within `scene`, hiding
    /// its siblings.
    fn show_dialog(&mut self, scene: usize, dialog: usize);

    /// Replace the displayed text of a dialog with `text`. Called once per
    /// revealed character during a typewriter reveal, with the empty
    /// prefix on reveal start and the full text on force-completion.
    fn set_revealed_text(&mut self, scene: usize, dialog: usize, text: &str);

    /// Highlight `subject` as the current speaker, or clear any highlight
    /// and blank the speaker name when `None`.
    fn set_active_subject(&mut self, scene: usize, subject: Option<&Subject>);
}

/// A renderer that draws nothing. For hosts that only want navigation
/// state and hooks, and for headless playback in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn show_scene(&mut self, _scene: usize) {}
    fn show_dialog(&mut self, _scene: usize, _dialog: usize) {}
    fn set_revealed_text(&mut self, _scene: usize, _dialog: usize, _text: &str) {}
    fn set_active_subject(&mut self, _scene: usize, _subject: Option<&Subject>) {}
}
