//! キャプチャの各フレームを安定化なしで分類し、ルール調整用に
//! 伸展パターンと分類結果を列挙する。

use anyhow::{bail, Result};
use std::env;

use fingerspell::config::Config;
use fingerspell::hand::{mean_displacement, Hand, HandGeometry};
use fingerspell::recognize::GestureClassifier;
use fingerspell::source::{LandmarkSource, ReplaySource};

const CONFIG_PATH: &str = "config.toml";

fn main() -> Result<()> {
    let path = match env::args().nth(1) {
        Some(p) => p,
        None => bail!("usage: frame_probe <capture.jsonl>"),
    };

    let config = Config::load_or_default(CONFIG_PATH);
    let classifier = GestureClassifier::from_config(&config.classifier);
    let mut source = ReplaySource::open(&path)?;

    let mut prev_hand: Option<Hand> = None;
    let mut frame_count: u64 = 0;

    println!("frame  TIMRP  letter  conf   displacement");
    while let Some(frame) = source.next_frame()? {
        frame_count += 1;

        let hand = match frame.hand() {
            Some(h) => h,
            None => {
                println!("{:>5}  -----  -       -      -", frame_count);
                prev_hand = None;
                continue;
            }
        };

        let geometry = HandGeometry::extract(hand);
        let displacement = prev_hand.as_ref().map(|p| mean_displacement(p, hand));
        let classification = classifier.classify(Some(&geometry), displacement);

        println!(
            "{:>5}  {}  {}       {:.2}   {}",
            frame_count,
            geometry.extension.bits(),
            classification.letter.unwrap_or('?'),
            classification.confidence,
            displacement
                .map(|d| format!("{:.4}", d))
                .unwrap_or_else(|| "-".to_string()),
        );

        prev_hand = Some(hand.clone());
    }

    Ok(())
}
