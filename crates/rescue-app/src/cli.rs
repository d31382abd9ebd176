use crate::controller::GameController;
use rescue_bot::{GreedyPolicy, Policy, SweepPolicy};
use std::fmt;
use std::sync::OnceLock;

/// Safety cap for automated games so a pathological policy cannot spin.
const MAX_SEARCHES_PER_GAME: u32 = 1_000;

pub enum CliOutcome {
    Handled,
    NotHandled,
}

/// Options parsed for the interactive front-end.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaunchOptions {
    pub seed: Option<u64>,
}

static LAUNCH: OnceLock<LaunchOptions> = OnceLock::new();

pub fn launch_options() -> LaunchOptions {
    LAUNCH.get().copied().unwrap_or_default()
}

#[derive(Debug)]
pub enum CliError {
    UnknownCommand(String),
    MissingArgument(&'static str),
    InvalidNumber(String),
    InvalidPolicy(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::UnknownCommand(cmd) => write!(f, "Unknown command: {cmd}"),
            CliError::MissingArgument(arg) => write!(f, "Missing argument: {arg}"),
            CliError::InvalidNumber(value) => write!(f, "Invalid number: {value}"),
            CliError::InvalidPolicy(value) => {
                write!(f, "Invalid policy: {value} (expected 'greedy' or 'sweep')")
            }
        }
    }
}

fn policy_from_name(name: &str) -> Result<Box<dyn Policy>, CliError> {
    match name.to_ascii_lowercase().as_str() {
        "greedy" | "default" => Ok(Box::new(GreedyPolicy)),
        "sweep" | "rotation" => Ok(Box::new(SweepPolicy::default())),
        other => Err(CliError::InvalidPolicy(other.to_string())),
    }
}

fn parse_number<T: std::str::FromStr>(
    value: Option<&String>,
    flag: &'static str,
) -> Result<T, CliError> {
    let raw = value.ok_or(CliError::MissingArgument(flag))?;
    raw.parse()
        .map_err(|_| CliError::InvalidNumber(raw.clone()))
}

pub fn run_cli() -> Result<CliOutcome, CliError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut iter = args.iter();

    match iter.next().map(String::as_str) {
        None => Ok(CliOutcome::NotHandled),
        Some("--seed") => {
            let seed = parse_number(iter.next(), "--seed")?;
            let _ = LAUNCH.set(LaunchOptions { seed: Some(seed) });
            Ok(CliOutcome::NotHandled)
        }
        Some("simulate") => {
            run_simulate(&mut iter)?;
            Ok(CliOutcome::Handled)
        }
        Some("version") | Some("--version") => {
            println!(
                "{} {} ({})",
                rescue_core::AppInfo::name(),
                rescue_core::AppInfo::version(),
                rescue_core::AppInfo::codename()
            );
            Ok(CliOutcome::Handled)
        }
        Some("help") | Some("--help") => {
            print_usage();
            Ok(CliOutcome::Handled)
        }
        Some(other) => Err(CliError::UnknownCommand(other.to_string())),
    }
}

fn print_usage() {
    println!("usage: capesearch [--seed N]");
    println!("       capesearch simulate [--games N] [--seed N] [--policy greedy|sweep]");
    println!("       capesearch version");
    println!();
    println!("Without a subcommand, starts the interactive search console.");
}

fn run_simulate(iter: &mut std::slice::Iter<'_, String>) -> Result<(), CliError> {
    let mut games: u32 = 20;
    let mut seed: Option<u64> = None;
    let mut policy_name = String::from("greedy");

    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--games" => games = parse_number(iter.next(), "--games")?,
            "--seed" => seed = Some(parse_number(iter.next(), "--seed")?),
            "--policy" => {
                policy_name = iter
                    .next()
                    .ok_or(CliError::MissingArgument("--policy"))?
                    .clone();
            }
            other => return Err(CliError::UnknownCommand(other.to_string())),
        }
    }

    let mut policy = policy_from_name(&policy_name)?;
    let mut controller = GameController::new_with_seed(seed);
    println!(
        "Simulating {games} games with policy '{}' (seed {})",
        policy.name(),
        controller.seed()
    );

    let mut rescued = 0u32;
    let mut total_searches = 0u64;
    let mut unresolved = 0u32;

    for _ in 0..games {
        let mut searches = 0u32;
        while searches < MAX_SEARCHES_PER_GAME {
            match controller.auto_search(policy.as_mut()) {
                Some((_, outcome)) => {
                    searches += 1;
                    if outcome.is_found() {
                        rescued += 1;
                        break;
                    }
                }
                None => break,
            }
        }
        if !controller.view().game_over {
            unresolved += 1;
        }
        total_searches += u64::from(searches);
        controller.reset();
    }

    let mean = total_searches as f64 / f64::from(games.max(1));
    println!("Rescued {rescued}/{games} games; mean searches {mean:.2}; unresolved {unresolved}");
    Ok(())
}
