/// Preview — terminal playback shell for testing story definitions.
///
/// Usage: preview --story <path.ron>
///
/// Controls:
///   enter  — next (skips the reveal if one is running)
///   b      — back
///   q      — quit
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use story_engine::core::player::StoryPlayer;
use story_engine::core::render::Renderer;
use story_engine::schema::story::{Story, Subject};

/// Renders the story as scrolling terminal text. Reveal prefixes arrive
/// monotonically, so only the new suffix gets printed.
struct TermRenderer {
    speaker: Option<String>,
    printed: usize,
    backgrounds: Vec<Option<String>>,
}

impl Renderer for TermRenderer {
    fn show_scene(&mut self, scene: usize) {
        let bg = self.backgrounds.get(scene).cloned().flatten();
        println!();
        match bg {
            Some(bg) => println!("=== scene {} [{}] ===", scene + 1, bg),
            None => println!("=== scene {} ===", scene + 1),
        }
    }

    fn show_dialog(&mut self, _scene: usize, _dialog: usize) {
        println!();
        match &self.speaker {
            Some(name) => print!("{name}: "),
            None => print!("  "),
        }
        let _ = io::stdout().flush();
        self.printed = 0;
    }

    fn set_revealed_text(&mut self, _scene: usize, _dialog: usize, text: &str) {
        if text.len() > self.printed {
            print!("{}", &text[self.printed..]);
            let _ = io::stdout().flush();
            self.printed = text.len();
        } else if text.is_empty() {
            self.printed = 0;
        }
    }

    fn set_active_subject(&mut self, _scene: usize, subject: Option<&Subject>) {
        self.speaker = subject.map(|s| s.name.clone());
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut story_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--story" if i + 1 < args.len() => {
                i += 1;
                story_path = Some(args[i].clone());
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let Some(story_path) = story_path else {
        print_usage();
        std::process::exit(1);
    };

    let story = match Story::load_from_ron(Path::new(&story_path)) {
        Ok(story) => story,
        Err(e) => {
            eprintln!("failed to load story: {e}");
            std::process::exit(1);
        }
    };

    let renderer = TermRenderer {
        speaker: None,
        printed: 0,
        backgrounds: story.scenes.iter().map(|s| s.background.clone()).collect(),
    };

    let mut player = match StoryPlayer::builder(story, renderer).build() {
        Ok(player) => player,
        Err(e) => {
            eprintln!("invalid story: {e}");
            std::process::exit(1);
        }
    };

    player.start();
    animate(&mut player);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        match line.trim() {
            "" => player.next(),
            "b" => player.back(),
            "q" | "quit" => break,
            other => {
                println!("unknown command '{other}' (enter=next, b=back, q=quit)");
                continue;
            }
        }
        animate(&mut player);
    }
}

/// Drive the reveal with real elapsed time until it finishes.
fn animate<R: Renderer>(player: &mut StoryPlayer<R>) {
    let mut last = Instant::now();
    while player.is_revealing() {
        std::thread::sleep(Duration::from_millis(5));
        let now = Instant::now();
        player.tick(now - last);
        last = now;
    }
    println!();
}

fn print_usage() {
    println!("Usage: preview --story <path.ron>");
    println!();
    println!("Plays a story definition in the terminal.");
    println!("Controls: enter=next, b=back, q=quit");
}
