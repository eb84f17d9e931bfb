/// Typewriter controller: timed character-by-character reveal of one
/// dialog's text.
///
/// Time is pushed in by the host through `tick` rather than pulled from a
/// timer facility, so reveals are deterministic under test and need no
/// background thread. There is never more than one reveal in flight: the
/// controller owns exactly one accumulator and one state tag, and `start`
/// overwrites both, which is what cancels an abandoned reveal.
use std::time::Duration;

use crate::core::render::Renderer;

/// Where a reveal is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// No text has been handed over yet.
    Idle,
    /// A reveal is in progress; characters are still arriving.
    Running,
    /// The full text has been emitted.
    Completed,
}

#[derive(Debug)]
pub struct Typewriter {
    state: RevealState,
    text: String,
    total_chars: usize,
    revealed: usize,
    interval: Duration,
    accumulated: Duration,
    /// `(scene, dialog)` the reveal renders into.
    position: (usize, usize),
}

impl Typewriter {
    pub fn new() -> Self {
        Self {
            state: RevealState::Idle,
            text: String::new(),
            total_chars: 0,
            revealed: 0,
            interval: Duration::ZERO,
            accumulated: Duration::ZERO,
            position: (0, 0),
        }
    }

    /// Begin revealing `text` into the dialog at `position`, one character
    /// per `interval_ms`. Any reveal still running is abandoned; its
    /// remaining steps can never fire because the state they would have
    /// read no longer exists. The display is reset to the empty prefix
    /// immediately.
    pub fn start(
        &mut self,
        text: &str,
        interval_ms: u64,
        position: (usize, usize),
        renderer: &mut dyn Renderer,
    ) {
        self.text = text.to_string();
        self.total_chars = self.text.chars().count();
        self.revealed = 0;
        self.interval = Duration::from_millis(interval_ms);
        self.accumulated = Duration::ZERO;
        self.position = position;

        renderer.set_revealed_text(position.0, position.1, "");
        self.state = if self.total_chars == 0 {
            RevealState::Completed
        } else {
            RevealState::Running
        };
    }

    /// Advance the reveal by `elapsed` wall-clock time, emitting one
    /// progressively longer prefix per full interval. No-op unless a
    /// reveal is running.
    pub fn tick(&mut self, elapsed: Duration, renderer: &mut dyn Renderer) {
        if self.state != RevealState::Running {
            return;
        }

        self.accumulated += elapsed;
        while self.accumulated >= self.interval && self.revealed < self.total_chars {
            self.accumulated -= self.interval;
            self.revealed += 1;
            let (scene, dialog) = self.position;
            renderer.set_revealed_text(scene, dialog, self.prefix());
        }

        if self.revealed == self.total_chars {
            self.state = RevealState::Completed;
        }
    }

    /// True iff characters are still arriving. The navigation state
    /// machine checks this before deciding whether `next` skips or moves.
    pub fn is_running(&self) -> bool {
        self.state == RevealState::Running
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Resolve a running reveal to its end state: emit the full text in
    /// one shot and stop. Idempotent; does nothing observable when idle
    /// or already complete.
    pub fn force_complete(&mut self, renderer: &mut dyn Renderer) {
        if self.state != RevealState::Running {
            return;
        }
        self.revealed = self.total_chars;
        self.accumulated = Duration::ZERO;
        let (scene, dialog) = self.position;
        renderer.set_revealed_text(scene, dialog, &self.text);
        self.state = RevealState::Completed;
    }

    /// The revealed-so-far prefix, sliced on a char boundary.
    fn prefix(&self) -> &str {
        match self.text.char_indices().nth(self.revealed) {
            Some((i, _)) => &self.text[..i],
            None => &self.text,
        }
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new()
    }
}
