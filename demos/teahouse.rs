/// Teahouse — a small two-scene story built in code, played headless.
///
/// Shows the declarative construction path, hook registration, and the
/// tick-driven reveal without any display surface.
use std::io::Write;
use std::time::Duration;

use story_engine::core::player::StoryPlayer;
use story_engine::core::render::Renderer;
use story_engine::schema::story::{Dialog, HookId, Scene, Story, Subject, SubjectId};

/// Prints reveals as they arrive, one dialog per line.
#[derive(Default)]
struct LinePrinter {
    speaker: Option<String>,
    printed: usize,
}

impl Renderer for LinePrinter {
    fn show_scene(&mut self, scene: usize) {
        println!("--- scene {} ---", scene + 1);
    }

    fn show_dialog(&mut self, _scene: usize, _dialog: usize) {
        match &self.speaker {
            Some(name) => print!("{name}: "),
            None => print!("* "),
        }
        self.printed = 0;
    }

    fn set_revealed_text(&mut self, _scene: usize, _dialog: usize, text: &str) {
        if text.is_empty() {
            self.printed = 0;
            return;
        }
        print!("{}", &text[self.printed..]);
        let _ = std::io::stdout().flush();
        self.printed = text.len();
    }

    fn set_active_subject(&mut self, _scene: usize, subject: Option<&Subject>) {
        self.speaker = subject.map(|s| s.name.clone());
    }
}

fn main() {
    let story = Story {
        id: "teahouse".to_string(),
        reveal_interval_ms: 20,
        scenes: vec![
            Scene {
                on_enter: Some(HookId("rain_ambience".to_string())),
                background: Some("bg/teahouse_evening.png".to_string()),
                subjects: vec![Subject {
                    id: SubjectId("mei".to_string()),
                    name: "Mei".to_string(),
                }],
                dialogs: vec![
                    Dialog {
                        text: "The rain had not let up all evening.".to_string(),
                        subject_id: None,
                        on_enter: None,
                    },
                    Dialog {
                        text: "You came back. I wasn't sure you would.".to_string(),
                        subject_id: Some(SubjectId("mei".to_string())),
                        on_enter: None,
                    },
                ],
            },
            Scene {
                on_enter: None,
                background: None,
                subjects: Vec::new(),
                dialogs: vec![Dialog {
                    text: "In the back room, the kettle was already singing.".to_string(),
                    subject_id: None,
                    on_enter: None,
                }],
            },
        ],
    };

    let mut player = StoryPlayer::builder(story, LinePrinter::default())
        .hook("rain_ambience", Box::new(|| {
            println!("(hook) rain ambience starts");
            Ok(())
        }))
        .build()
        .expect("story is well-formed");

    player.start();

    // Headless playback: let each reveal run out, then advance.
    loop {
        while player.is_revealing() {
            player.tick(Duration::from_millis(20));
        }
        println!();
        let before = player.position();
        player.next();
        if player.position() == before {
            break;
        }
    }
    println!("(end of story at {:?})", player.position());
}
