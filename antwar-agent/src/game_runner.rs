//! Game runner - executes single games between two players

use anyhow::{anyhow, Context};
use antwar_core::{
    apply_move_with, apply_placement, legal_moves, start_play, GameError, GameResult, GameState,
    Move, Phase, PlayerId,
};

use crate::config::RunnerConfig;
use crate::player::Player;

/// Outcome of a single game
#[derive(Clone, Debug)]
pub struct GameOutcome {
    /// Final game result (`Ongoing` when the turn limit was hit)
    pub result: GameResult,
    /// Completed turns
    pub turns: u32,
    /// Actions applied during play
    pub actions: usize,
    pub final_state: GameState,
}

impl GameOutcome {
    /// Get winner (None for draw)
    pub fn winner(&self) -> Option<PlayerId> {
        self.result.winner()
    }

    /// Check if game is a draw (ongoing at turn limit)
    pub fn is_draw(&self) -> bool {
        self.result == GameResult::Ongoing
    }
}

/// Drives two players through setup and play
#[derive(Clone, Debug, Default)]
pub struct GameRunner {
    config: RunnerConfig,
}

impl GameRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Play one game; `first` is player one and moves first. Both players
    /// are told the outcome, a draw counting as not won.
    pub fn play_game(&self, first: &mut dyn Player, second: &mut dyn Player) -> anyhow::Result<GameOutcome> {
        let mut players: [&mut dyn Player; 2] = [first, second];
        let mut state = GameState::new();

        for phase in [Phase::SetupPhase1, Phase::SetupPhase2] {
            state.phase = phase;
            for id in [PlayerId::One, PlayerId::Two] {
                state.whose_turn = id;
                let player = &mut players[id.index()];
                let coords = player
                    .choose_placement(&state)
                    .with_context(|| format!("{} failed to place in {:?}", player.name(), phase))?;
                apply_placement(&mut state, id, &coords)
                    .with_context(|| format!("{} placed invalidly in {:?}", player.name(), phase))?;
            }
        }
        start_play(&mut state);

        let mut turns = 0;
        let mut actions = 0;
        while state.result() == GameResult::Ongoing && turns < self.config.max_turns {
            let id = state.whose_turn;
            let player = &mut *players[id.index()];
            let mv = player.choose_move(&state);
            if !legal_moves(&state).contains(&mv) {
                return Err(GameError::IllegalMove { player: id, mv })
                    .with_context(|| format!("{} chose an illegal move on turn {}", player.name(), turns));
            }

            let mut attack_error = None;
            let next = apply_move_with(&state, &mv, |current, attacker, targets| {
                match player.choose_attack_target(current, attacker, targets) {
                    Ok(target) if targets.contains(&target) => target,
                    Ok(target) => {
                        attack_error = Some(anyhow!("attack target {:?} is not in range", target));
                        targets[0]
                    }
                    Err(err) => {
                        attack_error = Some(err.into());
                        targets[0]
                    }
                }
            });
            if let Some(err) = attack_error {
                return Err(err.context(format!("{} failed to choose an attack", player.name())));
            }

            if mv == Move::End {
                turns += 1;
            }
            actions += 1;
            state = next;
        }

        let result = state.result();
        if result != GameResult::Ongoing {
            state.phase = Phase::Finished;
        }
        let winner = result.winner();
        players[0].report_outcome(winner == Some(PlayerId::One));
        players[1].report_outcome(winner == Some(PlayerId::Two));

        tracing::info!(
            first = players[0].name(),
            second = players[1].name(),
            ?winner,
            turns,
            actions,
            "game finished"
        );

        Ok(GameOutcome {
            result,
            turns,
            actions,
            final_state: state,
        })
    }
}
