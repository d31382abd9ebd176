use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rand::{RngCore, SeedableRng, rngs::StdRng};
use rescue_bot::{GreedyPolicy, Policy, PolicyContext, SweepPolicy};
use rescue_core::game::session::GameSession;
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::analytics::{AnalyticsCollector, AnalyticsError};
use crate::config::{BenchmarkConfig, PolicyConfig, PolicyKind, ResolvedOutputs};

/// Primary entry point for orchestrating simulation runs.
pub struct SimulationRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub games_played: usize,
    pub policies: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub plot_path: Option<PathBuf>,
}

/// Outcome of a single policy game, as recorded by analytics.
#[derive(Debug, Clone, Copy)]
pub struct GameResult {
    pub rescued: bool,
    pub searches: u32,
}

#[derive(Debug, Clone, Copy)]
struct GameOutcome {
    rescued: bool,
    searches: u32,
    actual_area: u8,
    final_belief: [f64; 3],
}

#[derive(Debug, Serialize)]
struct GameRow<'a> {
    run_id: &'a str,
    policy: &'a str,
    game_index: usize,
    seed: u64,
    actual_area: u8,
    rescued: bool,
    searches: u32,
    final_belief: [f64; 3],
}

impl SimulationRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        if config.policies.is_empty() {
            return Err(RunnerError::NoPolicies);
        }
        Ok(Self { config, outputs })
    }

    /// Execute the simulation, streaming JSONL rows to disk.
    ///
    /// Every policy plays the same per-game seed, so contenders face
    /// identical hidden scenarios and search-condition draws.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;
        if !self.outputs.plots_dir.as_os_str().is_empty() {
            fs::create_dir_all(&self.outputs.plots_dir)?;
        }

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.games.seed.unwrap_or(0));
        let mut rows_written = 0usize;
        let mut analytics = AnalyticsCollector::new(&self.config);

        for game_index in 0..self.config.games.count {
            let base_seed = rng.next_u64();

            for policy_cfg in &self.config.policies {
                let outcome = self.play_game(policy_cfg, base_seed);
                analytics.record_game(
                    &policy_cfg.name,
                    GameResult {
                        rescued: outcome.rescued,
                        searches: outcome.searches,
                    },
                )?;

                let row = GameRow {
                    run_id: &self.config.run_id,
                    policy: &policy_cfg.name,
                    game_index,
                    seed: base_seed,
                    actual_area: outcome.actual_area,
                    rescued: outcome.rescued,
                    searches: outcome.searches,
                    final_belief: outcome.final_belief,
                };
                let line = serde_json::to_string(&row)?;
                writeln!(writer, "{line}")?;
                rows_written += 1;
            }
        }

        writer.flush()?;

        let summary = analytics.finalize()?;
        summary.write_markdown(&self.outputs.summary_md)?;

        let plot_path = if self.outputs.plots_dir.as_os_str().is_empty() {
            None
        } else {
            match summary.render_plot(&self.outputs.plots_dir) {
                Ok(path) => Some(path),
                Err(err) => {
                    event!(Level::WARN, error = %err, "plot rendering skipped");
                    None
                }
            }
        };

        Ok(RunSummary {
            games_played: self.config.games.count,
            policies: self.config.policies.len(),
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            plot_path,
        })
    }

    fn play_game(&self, policy_cfg: &PolicyConfig, seed: u64) -> GameOutcome {
        let mut policy = instantiate(policy_cfg.kind);
        let mut session = GameSession::with_seed(seed);
        let mut searches = 0u32;
        let mut rescued = false;

        while searches < self.config.games.max_searches {
            let area = {
                let ctx = PolicyContext {
                    belief: session.belief(),
                    record: session.record(),
                };
                policy.choose_area(&ctx)
            };
            match session.conduct_search(area) {
                Ok(outcome) => {
                    searches += 1;
                    if outcome.is_found() {
                        rescued = true;
                        break;
                    }
                }
                Err(_) => break,
            }
        }

        event!(
            Level::DEBUG,
            policy = %policy_cfg.name,
            seed,
            searches,
            rescued,
            "game finished"
        );

        GameOutcome {
            rescued,
            searches,
            actual_area: session.ground_truth().area_actual().number(),
            final_belief: session.belief().probabilities(),
        }
    }
}

fn instantiate(kind: PolicyKind) -> Box<dyn Policy> {
    match kind {
        PolicyKind::Greedy => Box::new(GreedyPolicy),
        PolicyKind::Sweep => Box::new(SweepPolicy::default()),
    }
}

fn ensure_parent(parent: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = parent {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("no policies configured")]
    NoPolicies,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
    #[error("failed to serialize result row: {0}")]
    Serialize(#[from] serde_json::Error),
}
