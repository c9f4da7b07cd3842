use anyhow::{Context, Result};
use hunt_core::{
    HuntRound, PositionGenerator, RandomPositionGenerator, Reveal, RoundOutcome, RoundSnapshot,
};
use std::thread;
use std::time::Duration;

use crate::input::Input;
use crate::render::Frontend;

const FOUND_NOTE: &str = "You found the treasure! A new one has been hidden.";

/// What happens once a round runs out of attempts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ExitPolicy {
    /// How long the final message stays up.
    pub delay: Duration,
    /// Start over instead of stopping.
    pub restart: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Continue(RoundOutcome),
    Finished(Reveal),
    Quit,
}

pub struct App<G = RandomPositionGenerator> {
    round: HuntRound<G>,
    policy: ExitPolicy,
}

impl<G: PositionGenerator> App<G> {
    pub fn new(round: HuntRound<G>, policy: ExitPolicy) -> Self {
        Self { round, policy }
    }

    pub fn round(&self) -> &HuntRound<G> {
        &self.round
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        self.round.snapshot()
    }

    pub fn handle(&mut self, input: &Input) -> hunt_core::Result<Step> {
        let outcome = match input {
            Input::Quit => return Ok(Step::Quit),
            Input::Move(direction) => self.round.move_player(*direction)?,
            Input::Token(token) => self.round.move_token(token)?,
        };

        Ok(match outcome {
            RoundOutcome::Exhausted(reveal) => Step::Finished(reveal),
            outcome => Step::Continue(outcome),
        })
    }

    /// Drives the game until the player quits, the input runs dry, or the round is over and the
    /// policy says to stop.
    pub fn run<F, I>(&mut self, frontend: &mut F, inputs: I) -> Result<()>
    where
        F: Frontend,
        I: IntoIterator<Item = Result<Input>>,
    {
        frontend.draw(&self.snapshot(), None).context("could not draw frame")?;

        for input in inputs {
            let input = input?;
            let note = match self.handle(&input) {
                Ok(Step::Quit) => {
                    log::info!("Player quit");
                    return Ok(());
                }
                Ok(Step::Continue(RoundOutcome::Success)) => Some(FOUND_NOTE),
                Ok(Step::Continue(_)) => None,
                Ok(Step::Finished(reveal)) => {
                    log::info!("Round over, estimated distance {}", reveal.estimate);
                    frontend.announce(&reveal).context("could not show final message")?;
                    thread::sleep(self.policy.delay);
                    if !self.policy.restart {
                        return Ok(());
                    }
                    self.round.restart();
                    None
                }
                Err(err) => {
                    log::warn!("Rejected {:?}: {}", input, err);
                    frontend.reject(&err).context("could not report error")?;
                    continue;
                }
            };
            frontend.draw(&self.snapshot(), note).context("could not draw frame")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::input_for_line;
    use crate::render::JsonRenderer;
    use hunt_core::{Direction, HuntConfig, HuntError, RoundLayout, RoundPhase, ScriptedPositions};

    fn app(attempts: u16, policy: ExitPolicy, next: &[(u16, u16)]) -> App<ScriptedPositions> {
        let config = HuntConfig::new(5, attempts).unwrap();
        let layout = RoundLayout::new(5, (0, 0), (2, 3)).unwrap();
        let round =
            HuntRound::with_layout(config, layout, ScriptedPositions::new(next.to_vec(), 5))
                .unwrap();
        App::new(round, policy)
    }

    fn no_delay(restart: bool) -> ExitPolicy {
        ExitPolicy {
            delay: Duration::ZERO,
            restart,
        }
    }

    fn tokens(items: &[&str]) -> Vec<Result<Input>> {
        items
            .iter()
            .filter_map(|item| input_for_line(item))
            .map(Ok)
            .collect()
    }

    fn frames(renderer: JsonRenderer<Vec<u8>>) -> Vec<serde_json::Value> {
        String::from_utf8(renderer.into_inner())
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn handle_maps_outcomes_to_steps() {
        let mut app = app(2, no_delay(false), &[]);

        assert_eq!(
            app.handle(&Input::Move(Direction::Down)),
            Ok(Step::Continue(RoundOutcome::Continuing))
        );
        assert!(matches!(
            app.handle(&Input::Move(Direction::Down)),
            Ok(Step::Finished(reveal)) if reveal.target == (2, 3)
        ));
        assert_eq!(
            app.handle(&Input::Move(Direction::Down)),
            Err(HuntError::InvalidState)
        );
        assert_eq!(app.handle(&Input::Quit), Ok(Step::Quit));
    }

    #[test]
    fn run_stops_after_exhaustion() {
        let mut app = app(2, no_delay(false), &[]);
        let mut renderer = JsonRenderer::new(Vec::new());

        app.run(&mut renderer, tokens(&["s", "s", "s"])).unwrap();

        let frames = frames(renderer);
        // Initial frame, one miss, then the reveal; the third token is never read.
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[1]["frame"]["attempts_remaining"], 1);
        assert_eq!(frames[2]["reveal"]["target"], serde_json::json!([2, 3]));
        assert!(
            frames[2]["message"]
                .as_str()
                .unwrap()
                .starts_with("Game over! The treasure was at row 2 and column 3.")
        );
        assert_eq!(app.round().phase(), RoundPhase::AttemptsExhausted);
    }

    #[test]
    fn run_restarts_when_asked() {
        let mut app = app(1, no_delay(true), &[(4, 4), (1, 1)]);
        let mut renderer = JsonRenderer::new(Vec::new());

        app.run(&mut renderer, tokens(&["right", "quit"])).unwrap();

        let frames = frames(renderer);
        assert_eq!(frames.len(), 3);
        assert!(frames[1].get("reveal").is_some());
        assert_eq!(frames[2]["frame"]["target"], serde_json::json!([4, 4]));
        assert_eq!(frames[2]["frame"]["phase"], "Playing");
        assert_eq!(app.round().attempts_remaining(), 1);
    }

    #[test]
    fn run_reports_bad_tokens_and_keeps_going() {
        let mut app = app(10, no_delay(false), &[(0, 0), (4, 4)]);
        let mut renderer = JsonRenderer::new(Vec::new());

        app.run(&mut renderer, tokens(&["jump", "d", "d", "s", "s", "d"])).unwrap();

        let frames = frames(renderer);
        assert!(frames[1]["error"].as_str().unwrap().starts_with("Invalid input"));
        let last = frames.last().unwrap();
        assert_eq!(last["note"], FOUND_NOTE);
        assert_eq!(last["frame"]["rounds_won"], 1);
        assert_eq!(last["frame"]["attempts_remaining"], 10);
    }
}
