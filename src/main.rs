use anyhow::{bail, Result};
use std::env;
use std::io::{self, BufReader};

use fingerspell::config::Config;
use fingerspell::recognize::RecognitionSession;
use fingerspell::sink::TextBuffer;
use fingerspell::source::{LandmarkSource, ReplaySource};

const CONFIG_PATH: &str = "config.toml";

fn main() -> Result<()> {
    let path = match env::args().nth(1) {
        Some(p) => p,
        None => bail!("usage: fingerspell <capture.jsonl | ->"),
    };

    let config = Config::load_or_default(CONFIG_PATH);

    println!("Fingerspell ({})", env!("GIT_VERSION"));
    println!(
        "Stabilizer: hold={} frames, commit threshold={}",
        config.stabilizer.required_hold, config.stabilizer.commit_threshold
    );
    println!("Input: {}", if path == "-" { "stdin" } else { path.as_str() });
    println!();

    let mut source: Box<dyn LandmarkSource> = if path == "-" {
        Box::new(ReplaySource::new(BufReader::new(io::stdin().lock())))
    } else {
        Box::new(ReplaySource::open(&path)?)
    };

    let mut session = RecognitionSession::from_config(&config);
    let mut buffer = TextBuffer::new();
    let mut frame_count: u64 = 0;

    while let Some(frame) = source.next_frame()? {
        frame_count += 1;
        let report = session.process(&frame, &mut buffer);

        if let Some(letter) = report.committed {
            println!("[{:>6}] {}", frame_count, letter);
        }
        if config.app.echo_status {
            eprintln!("[{:>6}] {}", frame_count, report.status);
        }
    }

    println!();
    println!("Frames: {}", frame_count);
    println!("Text: {}", buffer.as_str());

    Ok(())
}
