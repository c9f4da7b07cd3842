use crate::*;

/// Round state machine: owns the grid size, both positions and the attempt counter.
///
/// A successful move silently starts a new round on the same instance; running out of attempts
/// leaves it in [`RoundPhase::AttemptsExhausted`] until [`HuntRound::restart`] is called.
#[derive(Clone, Debug)]
pub struct HuntRound<G = RandomPositionGenerator> {
    config: HuntConfig,
    generator: G,
    layout: RoundLayout,
    attempts: Attempts,
    phase: RoundPhase,
    rounds_won: u32,
    reveal: Option<Reveal>,
}

impl HuntRound<RandomPositionGenerator> {
    /// Random round on a `size` grid with the default attempt budget.
    pub fn new(size: Coord) -> Result<Self> {
        Self::with_config(HuntConfig::new(size, DEFAULT_ATTEMPTS)?)
    }

    pub fn with_config(config: HuntConfig) -> Result<Self> {
        Self::with_generator(config, RandomPositionGenerator::from_entropy())
    }

    pub fn with_seed(config: HuntConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomPositionGenerator::new(seed))
    }
}

impl<G: PositionGenerator> HuntRound<G> {
    pub fn with_generator(config: HuntConfig, mut generator: G) -> Result<Self> {
        config.validate()?;
        let layout = RoundLayout::generate(config.size, &mut generator);
        Self::with_layout(config, layout, generator)
    }

    /// Starts from a known placement; `generator` is only used for the rounds that follow.
    pub fn with_layout(config: HuntConfig, layout: RoundLayout, generator: G) -> Result<Self> {
        config.validate()?;
        layout.validate(config.size)?;
        log::debug!(
            "New hunt on a {0}x{0} grid: target {1:?}, player {2:?}",
            config.size,
            layout.target,
            layout.player
        );

        Ok(Self {
            config,
            generator,
            layout,
            attempts: config.attempts,
            phase: RoundPhase::Playing,
            rounds_won: 0,
            reveal: None,
        })
    }

    pub fn config(&self) -> HuntConfig {
        self.config
    }

    pub fn size(&self) -> Coord {
        self.config.size
    }

    pub fn player(&self) -> Coord2 {
        self.layout.player
    }

    pub fn target(&self) -> Coord2 {
        self.layout.target
    }

    pub fn attempts_remaining(&self) -> Attempts {
        self.attempts
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn rounds_won(&self) -> u32 {
        self.rounds_won
    }

    /// Only checked on the next move, a fresh spawn on the target does not count as a win yet.
    pub fn player_on_target(&self) -> bool {
        self.layout.player_on_target()
    }

    /// Set once the attempts run out, cleared by [`HuntRound::restart`].
    pub fn reveal(&self) -> Option<Reveal> {
        self.reveal
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            size: self.config.size,
            player: self.layout.player,
            target: self.layout.target,
            attempts_remaining: self.attempts,
            attempts_budget: self.config.attempts,
            phase: self.phase,
            player_on_target: self.player_on_target(),
            rounds_won: self.rounds_won,
        }
    }

    pub fn move_player(&mut self, direction: Direction) -> Result<RoundOutcome> {
        self.check_playing()?;

        let from = self.layout.player;
        self.layout.player = step_clamped(from, direction, self.config.size);
        log::trace!("Moved {} from {:?} to {:?}", direction, from, self.layout.player);

        if self.layout.player_on_target() {
            self.rounds_won = self.rounds_won.saturating_add(1);
            log::debug!("Target found after {} misses", self.config.attempts - self.attempts);
            self.start_round();
            return Ok(RoundOutcome::Success);
        }

        self.attempts = self.attempts.saturating_sub(1);
        if self.attempts > 0 {
            return Ok(RoundOutcome::Continuing);
        }

        let reveal = self.exhaust();
        Ok(RoundOutcome::Exhausted(reveal))
    }

    /// Parses a direction token (`up`, `w`, ...) and moves.
    pub fn move_token(&mut self, token: &str) -> Result<RoundOutcome> {
        let direction = token.parse()?;
        self.move_player(direction)
    }

    /// Begins a brand new round from any phase, as if the instance had just been created.
    pub fn restart(&mut self) {
        self.rounds_won = 0;
        self.start_round();
    }

    fn start_round(&mut self) {
        self.layout = RoundLayout::generate(self.config.size, &mut self.generator);
        self.attempts = self.config.attempts;
        self.phase = RoundPhase::Playing;
        self.reveal = None;
        log::debug!(
            "New round: target {:?}, player {:?}",
            self.layout.target,
            self.layout.player
        );
    }

    fn exhaust(&mut self) -> Reveal {
        let (player_row, player_col) = self.layout.player;
        let (target_row, target_col) = self.layout.target;
        let (player_row, player_col) = (f64::from(player_row), f64::from(player_col));

        let row_estimate = estimate_detailed(player_row, f64::from(target_row), player_col);
        let col_estimate = estimate_detailed(player_col, f64::from(target_col), player_row);

        let reveal = Reveal {
            target: self.layout.target,
            player: self.layout.player,
            estimate: row_estimate.value.saturating_add(col_estimate.value),
            row_estimate,
            col_estimate,
        };
        self.phase = RoundPhase::AttemptsExhausted;
        self.reveal = Some(reveal);
        log::debug!(
            "Out of attempts at {:?}, estimated distance {}",
            reveal.player,
            reveal.estimate
        );
        reveal
    }

    fn check_playing(&self) -> Result<()> {
        if self.phase.is_finished() {
            Err(HuntError::InvalidState)
        } else {
            Ok(())
        }
    }
}
