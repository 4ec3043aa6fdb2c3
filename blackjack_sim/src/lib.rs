//! Simulation harness and boundary collaborators for the blackjack core:
//! weight-table agents, console rendering, and a parallel multi-table
//! simulator. Every table runs in its own thread with its own shoe and
//! generator, so fixed seeds stay reproducible no matter how many
//! simulations run at once.

pub mod agent;
pub mod console;
pub mod write;

pub use agent::{AgentWeights, WeightedAgent, WEIGHT_COUNT};
pub use console::{ConsoleView, PromptStrategy};

use blackjack_core::{BlackjackError, BlackjackTable, Outcome, ParticipantId};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt::Display;
use std::io::Write;
use std::sync::mpsc;
use std::thread;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Game(#[from] BlackjackError),
    #[error("failed to send summary to the writer thread: {0}")]
    Send(String),
    #[error(transparent)]
    Write(#[from] std::io::Error),
}

/// Outcome tallies for one simulated agent.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    pub label: String,
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
    pub rounds: u32,
}

impl SimulationSummary {
    /// Net rounds won, the fitness figure an optimizer would rank agents by.
    pub fn net(&self) -> i64 {
        self.wins as i64 - self.losses as i64
    }

    /// Folds another summary for the same agent into this one.
    pub fn absorb(&mut self, other: &SimulationSummary) {
        self.wins += other.wins;
        self.losses += other.losses;
        self.pushes += other.pushes;
        self.rounds += other.rounds;
    }
}

impl Display for SimulationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const WIDTH: usize = 80;
        const TEXT_WIDTH: usize = "rounds pushed".len() + 20;
        const NUM_WIDTH: usize = WIDTH - TEXT_WIDTH;
        writeln!(f, "agent: {}", self.label)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "rounds won", self.wins)?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}",
            "rounds pushed", self.pushes
        )?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}",
            "rounds lost", self.losses
        )?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}",
            "rounds played", self.rounds
        )?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$.4}",
            "win percentage",
            self.wins as f32 / self.rounds.max(1) as f32
        )
    }
}

/// One agent playing alone at one independently seeded table.
pub struct AgentSimulation {
    table: BlackjackTable,
    seat: ParticipantId,
    label: String,
    wins: u32,
    losses: u32,
    pushes: u32,
    rounds: u32,
}

impl AgentSimulation {
    /// Associated function to seat `agent` at a fresh table. `seed` drives
    /// the table's shoe; the agent carries its own generator.
    pub fn new(
        agent: WeightedAgent,
        label: impl Into<String>,
        decks: usize,
        seed: u64,
        reshuffle_at: f32,
    ) -> Result<Self, BlackjackError> {
        let mut table = BlackjackTable::new(decks, seed, reshuffle_at)?;
        let seat = table.deal_in(Box::new(agent));
        Ok(AgentSimulation {
            table,
            seat,
            label: label.into(),
            wins: 0,
            losses: 0,
            pushes: 0,
            rounds: 0,
        })
    }

    /// Plays `rounds` rounds, tallying the agent's outcome after each from
    /// the table's live results map.
    pub fn run(&mut self, rounds: u32) -> Result<(), BlackjackError> {
        for _ in 0..rounds {
            self.table.play_round()?;
            match self.table.results()[&self.seat] {
                Outcome::Win => self.wins += 1,
                Outcome::Loss => self.losses += 1,
                Outcome::Push => self.pushes += 1,
            }
            self.rounds += 1;
        }
        log::debug!("{}: {} rounds played", self.label, self.rounds);
        Ok(())
    }

    pub fn summary(&self) -> SimulationSummary {
        SimulationSummary {
            label: self.label.clone(),
            wins: self.wins,
            losses: self.losses,
            pushes: self.pushes,
            rounds: self.rounds,
        }
    }
}

/// Runs each simulation for `rounds` rounds on its own thread, funneling
/// summaries through a channel to a dedicated writer thread.
pub fn run_parallel(
    simulations: Vec<AgentSimulation>,
    rounds: u32,
    file_out: Box<dyn Write + Send + 'static>,
) -> Result<Vec<SimulationSummary>, SimulationError> {
    let (sender, receiver) = mpsc::channel::<(Option<SimulationSummary>, usize)>();
    let ids: HashSet<usize> = (1..=simulations.len()).collect();
    let write_handle = thread::spawn(move || write::write_summaries(receiver, ids, file_out));

    let mut handles = vec![];
    for (id, mut simulation) in simulations.into_iter().enumerate() {
        let id = id + 1;
        let sender = sender.clone();
        let handle = thread::spawn(move || -> Result<SimulationSummary, SimulationError> {
            simulation.run(rounds)?;
            let summary = simulation.summary();
            sender
                .send((Some(summary.clone()), id))
                .map_err(|e| SimulationError::Send(e.to_string()))?;
            sender
                .send((None, id))
                .map_err(|e| SimulationError::Send(e.to_string()))?;
            Ok(summary)
        });
        handles.push(handle);
    }
    drop(sender);

    let mut summaries = vec![];
    for handle in handles {
        summaries.push(handle.join().expect("simulation thread panicked")?);
    }
    write_handle.join().expect("writer thread panicked")?;
    Ok(summaries)
}
