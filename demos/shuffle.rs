//! Terminal demo of the strip shuffle: run with `cargo run --example shuffle`.

use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use scramble::prelude::*;

struct TerminalLine;

impl RenderSink for TerminalLine {
    fn display(&self, text: &str) {
        print!("\r{text}");
        let _ = io::stdout().flush();
    }
}

fn main() {
    env_logger::init();

    let ticker = Rc::new(ManualTicker::new());
    let animator = ShuffleAnimator::new(
        "PORTFOLIO LOADING COMPLETE",
        ShuffleConfig::default()
            .direction(ShuffleDirection::Left)
            .shuffle_times(4)
            .stagger(0.03),
        Rc::new(TerminalLine),
        ticker.clone(),
        Box::new(ThreadRandom::new()),
    );

    animator.play();

    let step = Duration::from_millis(16);
    while animator.is_playing() {
        std::thread::sleep(step);
        ticker.advance(step);
    }
    println!();
}
