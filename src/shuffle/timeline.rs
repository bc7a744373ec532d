use crate::animation::Tween;
use crate::platform::RandomSource;

use super::ShuffleConfig;

/// Glyphs the shuffle rolls through before settling on the original.
pub const SHUFFLE_CHARSET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*";

/// Which side a strip's roll travels from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ShuffleDirection {
    Left,
    #[default]
    Right,
}

/// How strip start times are staggered across the text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StaggerMode {
    /// All strips stagger from time zero in document order.
    Together,
    /// Odd-numbered strips roll first; the even group starts at 70% of the
    /// odd group's total duration.
    #[default]
    EvenOdd,
}

enum TimelineCell {
    Space(char),
    Strip(Strip),
}

/// One animated character: a short roll of random glyphs ending on the
/// original, scrolled through by an eased tween.
struct Strip {
    glyphs: Vec<char>,
    tween: Tween,
}

impl Strip {
    /// Steps between the first visible glyph and the settled original.
    fn steps(&self) -> usize {
        self.glyphs.len() - 1
    }

    fn glyph_at(&self, elapsed_secs: f32, direction: ShuffleDirection) -> char {
        let progress = self.tween.progress(elapsed_secs).clamp(0.0, 1.0);
        let steps = self.steps();
        let travelled = (progress * steps as f32).round() as usize;
        let index = match direction {
            // Right: the original leads the strip, the roll trails it.
            ShuffleDirection::Right => steps - travelled.min(steps),
            // Left: the roll leads, the original closes the strip.
            ShuffleDirection::Left => travelled.min(steps),
        };
        self.glyphs[index]
    }
}

/// A fully built shuffle run: every non-space character has a strip with its
/// own stagger delay, and sampling at any elapsed time yields one frame.
pub struct ShuffleTimeline {
    cells: Vec<TimelineCell>,
    direction: ShuffleDirection,
    looping: bool,
    loop_delay_secs: f32,
    total_secs: f32,
}

impl ShuffleTimeline {
    /// Roll fresh glyphs for `text` and lay out the stagger schedule.
    pub fn build(text: &str, config: &ShuffleConfig, rng: &mut dyn RandomSource) -> Self {
        let charset: Vec<char> = SHUFFLE_CHARSET.chars().collect();
        let rolls = config.shuffle_times.max(1) as usize;

        let chars: Vec<char> = text.chars().collect();
        let strip_count = chars.iter().filter(|&&c| c != ' ').count();
        let delays = stagger_delays(strip_count, config);

        let mut strip_index = 0;
        let cells = chars
            .into_iter()
            .map(|c| {
                if c == ' ' {
                    return TimelineCell::Space(c);
                }
                let mut glyphs = Vec::with_capacity(rolls + 1);
                match config.direction {
                    ShuffleDirection::Right => {
                        glyphs.push(c);
                        for _ in 0..rolls {
                            glyphs.push(charset[rng.pick_index(charset.len())]);
                        }
                    }
                    ShuffleDirection::Left => {
                        for _ in 0..rolls {
                            glyphs.push(charset[rng.pick_index(charset.len())]);
                        }
                        glyphs.push(c);
                    }
                }
                let tween = Tween::new(config.duration_secs, config.ease.clone())
                    .delay(delays[strip_index]);
                strip_index += 1;
                TimelineCell::Strip(Strip { glyphs, tween })
            })
            .collect::<Vec<_>>();

        let total_secs = cells
            .iter()
            .filter_map(|cell| match cell {
                TimelineCell::Strip(strip) => Some(strip.tween.end_secs()),
                TimelineCell::Space(_) => None,
            })
            .fold(0.0f32, f32::max);

        Self {
            cells,
            direction: config.direction,
            looping: config.looping,
            loop_delay_secs: config.loop_delay_secs.max(0.0),
            total_secs,
        }
    }

    /// Time at which every strip has settled, in seconds.
    pub fn duration_secs(&self) -> f32 {
        self.total_secs
    }

    /// One displayed frame at `elapsed_secs` since playback started.
    /// Looping timelines wrap around after the loop delay has passed.
    pub fn frame(&self, elapsed_secs: f32) -> String {
        let at = self.effective_elapsed(elapsed_secs);
        self.cells
            .iter()
            .map(|cell| match cell {
                TimelineCell::Space(c) => *c,
                TimelineCell::Strip(strip) => strip.glyph_at(at, self.direction),
            })
            .collect()
    }

    /// Whether playback has run its course. Looping timelines never finish.
    pub fn finished(&self, elapsed_secs: f32) -> bool {
        !self.looping && elapsed_secs >= self.total_secs
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn effective_elapsed(&self, elapsed_secs: f32) -> f32 {
        if !self.looping {
            return elapsed_secs;
        }
        let cycle = self.total_secs + self.loop_delay_secs;
        if cycle <= 0.0 {
            return elapsed_secs;
        }
        elapsed_secs.rem_euclid(cycle)
    }
}

/// Per-strip start delays in document order of the non-space characters.
fn stagger_delays(strip_count: usize, config: &ShuffleConfig) -> Vec<f32> {
    let stagger = config.stagger_secs.max(0.0);
    match config.mode {
        StaggerMode::Together => (0..strip_count).map(|i| i as f32 * stagger).collect(),
        StaggerMode::EvenOdd => {
            let odd_count = strip_count / 2;
            let even_start = if odd_count > 0 {
                let odd_total = config.duration_secs + (odd_count - 1) as f32 * stagger;
                odd_total * 0.7
            } else {
                0.0
            };
            (0..strip_count)
                .map(|i| {
                    let rank = (i / 2) as f32;
                    if i % 2 == 1 {
                        rank * stagger
                    } else {
                        even_start + rank * stagger
                    }
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::TimingFunction;
    use crate::platform::SeededRandom;

    fn config() -> ShuffleConfig {
        ShuffleConfig::default()
            .ease(TimingFunction::Linear)
            .stagger(0.04)
            .duration(0.4)
    }

    #[test]
    fn test_converges_to_original_text() {
        let mut rng = SeededRandom::new(5);
        for direction in [ShuffleDirection::Left, ShuffleDirection::Right] {
            let timeline =
                ShuffleTimeline::build("SHUFFLE ME", &config().direction(direction), &mut rng);
            let end = timeline.duration_secs() + 0.01;
            assert_eq!(timeline.frame(end), "SHUFFLE ME");
            assert!(timeline.finished(end));
        }
    }

    #[test]
    fn test_spaces_are_never_rolled() {
        let mut rng = SeededRandom::new(8);
        let timeline = ShuffleTimeline::build("AB CD", &config(), &mut rng);
        let mut t = 0.0;
        while t < timeline.duration_secs() {
            let frame = timeline.frame(t);
            assert_eq!(frame.chars().nth(2), Some(' '));
            assert_eq!(frame.chars().count(), 5);
            t += 0.016;
        }
    }

    #[test]
    fn test_frame_glyphs_come_from_charset_or_original() {
        let mut rng = SeededRandom::new(13);
        let timeline = ShuffleTimeline::build("okay", &config(), &mut rng);
        let frame = timeline.frame(0.0);
        for (shown, original) in frame.chars().zip("okay".chars()) {
            assert!(shown == original || SHUFFLE_CHARSET.contains(shown));
        }
    }

    #[test]
    fn test_together_stagger_orders_settling() {
        let mut rng = SeededRandom::new(2);
        let cfg = config().mode(StaggerMode::Together).stagger(0.1);
        let timeline = ShuffleTimeline::build("XY", &cfg, &mut rng);
        // First strip settles at 0.4, second at 0.5.
        let mid = timeline.frame(0.45);
        assert_eq!(mid.chars().next(), Some('X'));
        assert!((timeline.duration_secs() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_evenodd_even_group_starts_late() {
        let cfg = config().mode(StaggerMode::EvenOdd).stagger(0.04);
        // Four strips: odds (1, 3) first, evens (0, 2) offset by 70% of the
        // odd group's total.
        let delays = stagger_delays(4, &cfg);
        let odd_total = 0.4 + 0.04;
        let even_start = odd_total * 0.7;
        assert_eq!(delays[1], 0.0);
        assert!((delays[3] - 0.04).abs() < 1e-6);
        assert!((delays[0] - even_start).abs() < 1e-6);
        assert!((delays[2] - (even_start + 0.04)).abs() < 1e-6);
    }

    #[test]
    fn test_looping_timeline_never_finishes_and_wraps() {
        let mut rng = SeededRandom::new(3);
        let cfg = config().looping(true).loop_delay(0.1);
        let timeline = ShuffleTimeline::build("LOOP", &cfg, &mut rng);
        let total = timeline.duration_secs();
        assert!(!timeline.finished(total * 10.0));
        // Inside the loop-delay tail every strip has settled.
        assert_eq!(timeline.frame(total + 0.05), "LOOP");
        // After the wrap the roll starts over.
        let wrapped = timeline.frame(total + 0.1 + 0.001);
        assert_eq!(wrapped.len(), 4);
    }

    #[test]
    fn test_empty_text() {
        let mut rng = SeededRandom::new(1);
        let timeline = ShuffleTimeline::build("", &config(), &mut rng);
        assert!(timeline.is_empty());
        assert_eq!(timeline.frame(0.0), "");
        assert!(timeline.finished(0.0));
        assert_eq!(timeline.duration_secs(), 0.0);
    }
}
