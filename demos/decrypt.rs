//! Terminal demo of the decrypt reveal: run with `cargo run --example decrypt`.

use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use scramble::prelude::*;

/// Renders each frame over the same terminal line.
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
    let animator = RevealAnimator::new(
        "ACCESS GRANTED TO THE MAINFRAME",
        RevealConfig::default()
            .sequential(true)
            .direction(RevealDirection::Center)
            .interval(Duration::from_millis(40)),
        Rc::new(TerminalLine),
        ticker.clone(),
        Box::new(ThreadRandom::new()),
    );

    animator.start();

    let step = Duration::from_millis(16);
    while animator.is_running() {
        std::thread::sleep(step);
        ticker.advance(step);
    }
    println!();
}
