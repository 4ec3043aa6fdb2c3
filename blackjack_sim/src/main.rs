use blackjack_core::{BlackjackTable, Outcome};
use blackjack_sim::{
    run_parallel, AgentSimulation, ConsoleView, PromptStrategy, WeightedAgent,
};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "blackjack_sim", about = "Simulate blackjack rounds for automated agents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Watch randomly seeded agents play rendered rounds
    Watch {
        #[arg(long, default_value_t = 3)]
        players: usize,
        #[arg(long, default_value_t = 2)]
        decks: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 5)]
        rounds: u32,
        /// Shoe penetration at which a reshuffle happens between rounds
        #[arg(long, default_value_t = 0.75)]
        penetration: f32,
    },
    /// Sit at the table yourself and play against the dealer
    Play {
        #[arg(long, default_value_t = 1)]
        decks: usize,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 3)]
        rounds: u32,
    },
    /// Evaluate a batch of random agents in parallel
    Simulate {
        #[arg(long, default_value_t = 8)]
        agents: usize,
        #[arg(long, default_value_t = 6)]
        decks: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 1000)]
        rounds: u32,
        #[arg(long, default_value_t = 0.75)]
        penetration: f32,
        /// Write summaries to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Save the best-performing agent's weight table as JSON
        #[arg(long)]
        save_weights: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Watch {
            players,
            decks,
            seed,
            rounds,
            penetration,
        } => watch(players, decks, seed, rounds, penetration),
        Command::Play {
            decks,
            seed,
            rounds,
        } => play(decks, seed.unwrap_or_else(rand::random), rounds),
        Command::Simulate {
            agents,
            decks,
            seed,
            rounds,
            penetration,
            out,
            save_weights,
        } => simulate(agents, decks, seed, rounds, penetration, out, save_weights),
    }
}

fn watch(
    players: usize,
    decks: usize,
    seed: u64,
    rounds: u32,
    penetration: f32,
) -> Result<(), Box<dyn Error>> {
    let mut table = BlackjackTable::watched(decks, seed, penetration, ConsoleView::stdout())?;
    let mut seats = vec![];
    for n in 0..players {
        let agent = WeightedAgent::random(seed.wrapping_add(1 + n as u64));
        seats.push(table.deal_in(Box::new(agent)));
    }
    for _ in 0..rounds {
        table.play_round()?;
        for seat in &seats {
            println!("{seat} {}", describe(table.results()[seat]));
        }
        println!();
    }
    Ok(())
}

fn play(decks: usize, seed: u64, rounds: u32) -> Result<(), Box<dyn Error>> {
    log::info!("table seed {seed}");
    let mut table = BlackjackTable::watched(decks, seed, 0.5, ConsoleView::stdout())?;
    let prompt = PromptStrategy::new(io::BufReader::new(io::stdin()), io::stdout());
    let seat = table.deal_in(Box::new(prompt));
    for _ in 0..rounds {
        table.play_round()?;
        println!("You {}\n", describe(table.results()[&seat]));
    }
    Ok(())
}

fn simulate(
    agents: usize,
    decks: usize,
    seed: u64,
    rounds: u32,
    penetration: f32,
    out: Option<PathBuf>,
    save_weights: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let mut simulations = vec![];
    let mut weights = vec![];
    for n in 0..agents as u64 {
        let agent = WeightedAgent::random(seed.wrapping_add(n));
        weights.push(agent.weights());
        simulations.push(AgentSimulation::new(
            agent,
            format!("agent-{n}"),
            decks,
            seed.wrapping_add(n),
            penetration,
        )?);
    }

    let writer: Box<dyn Write + Send> = match &out {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout()),
    };
    let summaries = run_parallel(simulations, rounds, writer)?;

    let best = summaries
        .iter()
        .enumerate()
        .max_by_key(|(_, s)| s.net())
        .expect("at least one simulation");
    log::info!(
        "best agent {} won {} of {} rounds",
        best.1.label,
        best.1.wins,
        best.1.rounds
    );
    if let Some(path) = save_weights {
        serde_json::to_writer_pretty(File::create(path)?, &weights[best.0])?;
    }
    Ok(())
}

fn describe(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Win => "won the round.",
        Outcome::Loss => "lost the round.",
        Outcome::Push => "pushed with the dealer.",
    }
}
