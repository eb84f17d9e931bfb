/// The navigation state machine and top-level playback facade.
///
/// Owns `(scene_index, dialog_index)` and mediates every move through the
/// story: forward/backward transitions, scene and dialog entry hooks, and
/// coordination with the typewriter. Built via `StoryPlayer::builder()`.
use std::time::Duration;
use tracing::debug;

use crate::core::hooks::{HookFn, HookRegistry};
use crate::core::render::Renderer;
use crate::core::typewriter::Typewriter;
use crate::schema::story::{HookId, Story, StoryError};

pub struct StoryPlayer<R: Renderer> {
    story: Story,
    renderer: R,
    hooks: HookRegistry,
    scene_index: usize,
    dialog_index: usize,
    typewriter: Typewriter,
}

/// Builder for constructing a validated `StoryPlayer`.
pub struct StoryPlayerBuilder<R: Renderer> {
    story: Story,
    renderer: R,
    hooks: HookRegistry,
}

impl<R: Renderer> StoryPlayer<R> {
    pub fn builder(story: Story, renderer: R) -> StoryPlayerBuilder<R> {
        StoryPlayerBuilder {
            story,
            renderer,
            hooks: HookRegistry::new(),
        }
    }

    /// Render the opening position. Scene 0 and dialog 0 become current
    /// here, so their entry hooks fire now, not at construction.
    pub fn start(&mut self) {
        debug!(story = %self.story.id, "starting playback");
        self.render(true);
    }

    /// Advance. While a reveal is running this only resolves the reveal
    /// to its end state; the index never changes on the same call. At the
    /// last dialog of the last scene it does nothing.
    pub fn next(&mut self) {
        if self.typewriter.is_running() {
            self.typewriter.force_complete(&mut self.renderer);
            return;
        }

        let scene_dialogs = self.story.scenes[self.scene_index].dialogs.len();
        if self.dialog_index + 1 < scene_dialogs {
            self.dialog_index += 1;
            debug!(scene = self.scene_index, dialog = self.dialog_index, "next dialog");
            self.render(false);
        } else if self.scene_index + 1 < self.story.scenes.len() {
            self.scene_index += 1;
            self.dialog_index = 0;
            debug!(scene = self.scene_index, "next scene");
            self.render(true);
        }
        // Past the last dialog of the last scene: silent no-op.
    }

    /// Rewind. A running reveal is force-completed first but never counts
    /// as the skip gesture: back always moves when it can. At the first
    /// dialog of the first scene it does nothing.
    pub fn back(&mut self) {
        self.typewriter.force_complete(&mut self.renderer);

        if self.dialog_index > 0 {
            self.dialog_index -= 1;
            debug!(scene = self.scene_index, dialog = self.dialog_index, "previous dialog");
            self.render(false);
        } else if self.scene_index > 0 {
            self.scene_index -= 1;
            self.dialog_index = self.story.scenes[self.scene_index].dialogs.len() - 1;
            debug!(scene = self.scene_index, dialog = self.dialog_index, "previous scene");
            self.render(true);
        }
    }

    /// Feed elapsed time to the reveal in progress, if any.
    pub fn tick(&mut self, elapsed: Duration) {
        self.typewriter.tick(elapsed, &mut self.renderer);
    }

    /// Current `(scene_index, dialog_index)`.
    pub fn position(&self) -> (usize, usize) {
        (self.scene_index, self.dialog_index)
    }

    /// True while the current dialog's text is still arriving.
    pub fn is_revealing(&self) -> bool {
        self.typewriter.is_running()
    }

    pub fn story(&self) -> &Story {
        &self.story
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Redraw for the current indices. Entry hooks fire here and only
    /// here: the scene hook when the move crossed a scene boundary, the
    /// dialog hook on every index change. Order matches the command
    /// contract: scene visibility, scene hook, active subject, dialog
    /// visibility, reveal start, dialog hook, all before the command
    /// returns.
    fn render(&mut self, scene_changed: bool) {
        if scene_changed {
            self.renderer.show_scene(self.scene_index);
            if let Some(hook) = &self.story.scenes[self.scene_index].on_enter {
                self.hooks.fire(hook);
            }
        }

        let scene = &self.story.scenes[self.scene_index];
        let dialog = &scene.dialogs[self.dialog_index];

        // A dangling subject_id resolves to no active subject.
        let subject = dialog.subject_id.as_ref().and_then(|id| scene.subject(id));
        self.renderer.set_active_subject(self.scene_index, subject);

        self.renderer.show_dialog(self.scene_index, self.dialog_index);

        self.typewriter.start(
            &dialog.text,
            self.story.reveal_interval_ms,
            (self.scene_index, self.dialog_index),
            &mut self.renderer,
        );

        if let Some(hook) = &dialog.on_enter {
            self.hooks.fire(hook);
        }
    }
}

impl<R: Renderer> StoryPlayerBuilder<R> {
    /// Register the callback for a hook token used in the story data.
    pub fn hook(mut self, id: impl Into<String>, hook: HookFn) -> Self {
        self.hooks.register(HookId(id.into()), hook);
        self
    }

    /// Validate the story and construct the player at position `(0, 0)`.
    /// A malformed story fails here, before anything renders.
    pub fn build(self) -> Result<StoryPlayer<R>, StoryError> {
        self.story.validate()?;
        Ok(StoryPlayer {
            story: self.story,
            renderer: self.renderer,
            hooks: self.hooks,
            scene_index: 0,
            dialog_index: 0,
            typewriter: Typewriter::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::NullRenderer;
    use crate::schema::story::{Dialog, Scene};

    fn dialog(text: &str) -> Dialog {
        Dialog {
            text: text.to_string(),
            subject_id: None,
            on_enter: None,
        }
    }

    fn two_scene_story() -> Story {
        Story {
            id: "test".to_string(),
            reveal_interval_ms: 50,
            scenes: vec![
                Scene {
                    on_enter: None,
                    background: None,
                    subjects: Vec::new(),
                    dialogs: vec![dialog("one"), dialog("two")],
                },
                Scene {
                    on_enter: None,
                    background: None,
                    subjects: Vec::new(),
                    dialogs: vec![dialog("three")],
                },
            ],
        }
    }

    #[test]
    fn build_rejects_malformed_story() {
        let story = Story {
            id: String::new(),
            reveal_interval_ms: 50,
            scenes: Vec::new(),
        };
        assert!(StoryPlayer::builder(story, NullRenderer).build().is_err());
    }

    #[test]
    fn build_starts_at_origin_without_rendering() {
        let player = StoryPlayer::builder(two_scene_story(), NullRenderer)
            .build()
            .unwrap();
        assert_eq!(player.position(), (0, 0));
        assert!(!player.is_revealing());
    }

    #[test]
    fn start_begins_first_reveal() {
        let mut player = StoryPlayer::builder(two_scene_story(), NullRenderer)
            .build()
            .unwrap();
        player.start();
        assert_eq!(player.position(), (0, 0));
        assert!(player.is_revealing());
    }

    #[test]
    fn next_while_revealing_stays_put() {
        let mut player = StoryPlayer::builder(two_scene_story(), NullRenderer)
            .build()
            .unwrap();
        player.start();
        player.next();
        assert_eq!(player.position(), (0, 0));
        assert!(!player.is_revealing());

        player.next();
        assert_eq!(player.position(), (0, 1));
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut player = StoryPlayer::builder(two_scene_story(), NullRenderer)
            .build()
            .unwrap();
        player.start();
        player.back();
        assert_eq!(player.position(), (0, 0));

        for _ in 0..10 {
            player.next();
        }
        assert_eq!(player.position(), (1, 0));
    }
}
