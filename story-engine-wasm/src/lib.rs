//! WASM bindings for story-engine — powers browser embeddings.
//!
//! The viewer takes a story definition as JSON, and the page drives it
//! with `next`/`back`/`tick` and polls the current view state back out.
//! Hook firings are queued as plain tokens for the page to drain and
//! dispatch however it likes; arbitrary code never runs inside the
//! engine.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::prelude::*;

use story_engine::core::player::StoryPlayer;
use story_engine::core::render::Renderer;
use story_engine::schema::story::{Story, Subject};

/// Captures the latest render-boundary state for polling from JS.
#[derive(Default)]
struct SnapshotRenderer {
    scene: usize,
    dialog: usize,
    revealed_text: String,
    subject_name: Option<String>,
}

impl Renderer for SnapshotRenderer {
    fn show_scene(&mut self, scene: usize) {
        self.scene = scene;
    }

    fn show_dialog(&mut self, _scene: usize, dialog: usize) {
        self.dialog = dialog;
    }

    fn set_revealed_text(&mut self, _scene: usize, _dialog: usize, text: &str) {
        self.revealed_text = text.to_string();
    }

    fn set_active_subject(&mut self, _scene: usize, subject: Option<&Subject>) {
        self.subject_name = subject.map(|s| s.name.clone());
    }
}

/// The view state handed across the boundary as one JSON object.
#[derive(serde::Serialize)]
struct Snapshot<'a> {
    scene: usize,
    dialog: usize,
    revealed_text: &'a str,
    subject_name: Option<&'a str>,
    background: Option<&'a str>,
    is_revealing: bool,
    at_start: bool,
    at_end: bool,
}

#[wasm_bindgen]
pub struct StoryViewer {
    player: StoryPlayer<SnapshotRenderer>,
    hook_events: Rc<RefCell<Vec<String>>>,
}

#[wasm_bindgen]
impl StoryViewer {
    /// Build a viewer from a JSON story definition. Fails on malformed
    /// JSON or a structurally invalid story.
    #[wasm_bindgen(constructor)]
    pub fn new(story_json: &str) -> Result<StoryViewer, JsValue> {
        let story: Story =
            serde_json::from_str(story_json).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let hook_events: Rc<RefCell<Vec<String>>> = Rc::default();

        // Every hook token in the story gets queued for the page to
        // dispatch; unknown-token warnings never apply here.
        let mut tokens: Vec<String> = story
            .scenes
            .iter()
            .flat_map(|scene| {
                scene
                    .on_enter
                    .iter()
                    .chain(scene.dialogs.iter().filter_map(|d| d.on_enter.as_ref()))
                    .map(|id| id.0.clone())
                    .collect::<Vec<_>>()
            })
            .collect();
        tokens.sort();
        tokens.dedup();

        let mut builder = StoryPlayer::builder(story, SnapshotRenderer::default());
        for token in tokens {
            let queue = Rc::clone(&hook_events);
            let queued = token.clone();
            builder = builder.hook(token, Box::new(move || {
                queue.borrow_mut().push(queued.clone());
                Ok(())
            }));
        }

        let player = builder
            .build()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(StoryViewer {
            player,
            hook_events,
        })
    }

    pub fn start(&mut self) {
        self.player.start();
    }

    pub fn next(&mut self) {
        self.player.next();
    }

    pub fn back(&mut self) {
        self.player.back();
    }

    /// Advance the typewriter by `elapsed_ms` (e.g. from
    /// requestAnimationFrame deltas).
    pub fn tick(&mut self, elapsed_ms: f64) {
        if elapsed_ms <= 0.0 {
            return;
        }
        self.player.tick(Duration::from_secs_f64(elapsed_ms / 1000.0));
    }

    pub fn is_revealing(&self) -> bool {
        self.player.is_revealing()
    }

    pub fn scene_index(&self) -> usize {
        self.player.position().0
    }

    pub fn dialog_index(&self) -> usize {
        self.player.position().1
    }

    pub fn revealed_text(&self) -> String {
        self.player.renderer().revealed_text.clone()
    }

    pub fn active_subject_name(&self) -> Option<String> {
        self.player.renderer().subject_name.clone()
    }

    /// Hook tokens fired since the last drain, oldest first, as a JSON
    /// array of strings.
    pub fn drain_hook_events(&mut self) -> String {
        let events: Vec<String> = self.hook_events.borrow_mut().drain(..).collect();
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    /// The whole view state as one JSON object.
    pub fn snapshot(&self) -> String {
        let (scene, dialog) = self.player.position();
        let story = self.player.story();
        let renderer = self.player.renderer();
        let last_scene = story.scenes.len() - 1;
        let last_dialog = story.scenes[last_scene].dialogs.len() - 1;

        let snapshot = Snapshot {
            scene,
            dialog,
            revealed_text: &renderer.revealed_text,
            subject_name: renderer.subject_name.as_deref(),
            background: story.scenes[scene].background.as_deref(),
            is_revealing: self.player.is_revealing(),
            at_start: (scene, dialog) == (0, 0),
            at_end: (scene, dialog) == (last_scene, last_dialog),
        };
        serde_json::to_string(&snapshot).unwrap_or_else(|_| "{}".to_string())
    }
}
