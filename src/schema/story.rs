/// Story model: scenes, subjects, dialogs. Pure data, immutable after load.
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoryError {
    #[error("story has no scenes")]
    EmptyStory,
    #[error("scene {scene} has no dialogs")]
    EmptyScene { scene: usize },
    #[error("reveal_interval_ms must be positive")]
    ZeroInterval,
    #[error("scene {scene} declares subject '{id}' more than once")]
    DuplicateSubject { scene: usize, id: SubjectId },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Newtype wrapper for subject ids. Unique within a scene, not globally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub String);

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Newtype wrapper for hook tokens. The host registers a callback under
/// each token it uses; the engine never interprets the token itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HookId(pub String);

impl std::fmt::Display for HookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named character that can be highlighted as the current speaker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
}

/// One line of narrative text, optionally attributed to a subject.
///
/// `text` is opaque to the engine; a rich-text payload passes through
/// untouched. A `subject_id` with no matching subject in the scene is
/// legal and resolves to "no active subject".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dialog {
    pub text: String,
    #[serde(default)]
    pub subject_id: Option<SubjectId>,
    #[serde(default)]
    pub on_enter: Option<HookId>,
}

/// A background plus a subject set plus an ordered dialog sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub on_enter: Option<HookId>,
    /// Display-only asset locator; no engine behavior depends on it.
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    pub dialogs: Vec<Dialog>,
}

impl Scene {
    /// Look up a subject by id. `None` for a dangling reference.
    pub fn subject(&self, id: &SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|s| &s.id == id)
    }
}

fn default_interval() -> u64 {
    50
}

/// Top-level story container, built once by a loader and read-only from
/// then on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    /// Opaque identifier, informational only.
    #[serde(default)]
    pub id: String,
    /// Typewriter speed for the whole story, in milliseconds per character.
    #[serde(default = "default_interval")]
    pub reveal_interval_ms: u64,
    pub scenes: Vec<Scene>,
}

impl Story {
    /// Load a story definition from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Story, StoryError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a story definition from a RON string.
    pub fn parse_ron(input: &str) -> Result<Story, StoryError> {
        let story: Story = ron::from_str(input)?;
        Ok(story)
    }

    /// Check the structural invariants the player depends on: at least one
    /// scene, at least one dialog per scene, a positive reveal interval,
    /// and per-scene subject id uniqueness. A story that fails here must
    /// not reach playback.
    pub fn validate(&self) -> Result<(), StoryError> {
        if self.scenes.is_empty() {
            return Err(StoryError::EmptyStory);
        }
        if self.reveal_interval_ms == 0 {
            return Err(StoryError::ZeroInterval);
        }
        for (i, scene) in self.scenes.iter().enumerate() {
            if scene.dialogs.is_empty() {
                return Err(StoryError::EmptyScene { scene: i });
            }
            let mut seen = HashSet::new();
            for subject in &scene.subjects {
                if !seen.insert(&subject.id) {
                    return Err(StoryError::DuplicateSubject {
                        scene: i,
                        id: subject.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
