use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;

use crate::config::BenchmarkConfig;
use crate::runner::GameResult;

const CONFIDENCE_Z: f64 = 1.96; // 95% CI

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("policy '{0}' not present in configuration")]
    UnknownPolicy(String),
    #[error("baseline policy '{0}' recorded no games")]
    EmptyBaseline(String),
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to render plot: {0}")]
    Plot(String),
}

/// Accumulates per-policy results while the runner streams games through.
pub struct AnalyticsCollector {
    baseline: Option<String>,
    policies: HashMap<String, PolicyAccumulator>,
    order: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
struct PolicyAccumulator {
    games: usize,
    rescued: usize,
    total_searches: u64,
}

impl AnalyticsCollector {
    pub fn new(config: &BenchmarkConfig) -> Self {
        let mut policies = HashMap::new();
        let mut order = Vec::new();
        for policy in &config.policies {
            policies.insert(policy.name.clone(), PolicyAccumulator::default());
            order.push(policy.name.clone());
        }
        Self {
            baseline: config.metrics.baseline.clone(),
            policies,
            order,
        }
    }

    pub fn record_game(&mut self, policy: &str, result: GameResult) -> Result<(), AnalyticsError> {
        let acc = self
            .policies
            .get_mut(policy)
            .ok_or_else(|| AnalyticsError::UnknownPolicy(policy.to_string()))?;
        acc.games += 1;
        acc.total_searches += u64::from(result.searches);
        if result.rescued {
            acc.rescued += 1;
        }
        Ok(())
    }

    pub fn finalize(self) -> Result<AnalyticsSummary, AnalyticsError> {
        let baseline_acc = match &self.baseline {
            Some(name) => {
                let acc = self.policies[name.as_str()];
                if acc.games == 0 {
                    return Err(AnalyticsError::EmptyBaseline(name.clone()));
                }
                Some(acc)
            }
            None => None,
        };

        let normal = Normal::new(0.0, 1.0).expect("standard normal parameters are valid");
        let mut reports = Vec::with_capacity(self.order.len());

        for name in &self.order {
            let acc = self.policies[name.as_str()];
            let games = acc.games.max(1) as f64;
            let rescue_rate = acc.rescued as f64 / games;
            let rate_ci = CONFIDENCE_Z * (rescue_rate * (1.0 - rescue_rate) / games).sqrt();
            let mean_searches = acc.total_searches as f64 / games;

            let (delta_vs_baseline, rate_p_value) = match baseline_acc {
                Some(base) if self.baseline.as_deref() != Some(name.as_str()) => {
                    let base_games = base.games as f64;
                    let base_mean = base.total_searches as f64 / base_games;
                    let base_rate = base.rescued as f64 / base_games;
                    let delta = mean_searches - base_mean;
                    let p_value = two_proportion_p_value(
                        &normal,
                        rescue_rate,
                        games,
                        base_rate,
                        base_games,
                    );
                    (Some(delta), p_value)
                }
                _ => (None, None),
            };

            reports.push(PolicyReport {
                name: name.clone(),
                games: acc.games,
                rescued: acc.rescued,
                rescue_rate,
                rate_ci,
                mean_searches,
                delta_vs_baseline,
                rate_p_value,
            });
        }

        Ok(AnalyticsSummary {
            baseline: self.baseline,
            reports,
        })
    }
}

/// Two-sided z-test on the difference of two rescue rates; `None` when the
/// pooled variance degenerates.
fn two_proportion_p_value(
    normal: &Normal,
    rate_a: f64,
    games_a: f64,
    rate_b: f64,
    games_b: f64,
) -> Option<f64> {
    let pooled = (rate_a * games_a + rate_b * games_b) / (games_a + games_b);
    let variance = pooled * (1.0 - pooled) * (1.0 / games_a + 1.0 / games_b);
    if variance <= 0.0 {
        return None;
    }
    let z = (rate_a - rate_b) / variance.sqrt();
    Some(2.0 * (1.0 - normal.cdf(z.abs())))
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyReport {
    pub name: String,
    pub games: usize,
    pub rescued: usize,
    pub rescue_rate: f64,
    pub rate_ci: f64,
    pub mean_searches: f64,
    pub delta_vs_baseline: Option<f64>,
    pub rate_p_value: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub baseline: Option<String>,
    pub reports: Vec<PolicyReport>,
}

impl AnalyticsSummary {
    pub fn write_markdown(&self, path: &Path) -> Result<(), AnalyticsError> {
        let mut out = String::from("# Rescue simulation summary\n\n");
        if let Some(baseline) = &self.baseline {
            out.push_str(&format!("Baseline policy: `{baseline}`\n\n"));
        }
        out.push_str(
            "| Policy | Games | Rescued | Rescue rate (95% CI) | Mean searches | Δ searches vs baseline | p (rate) |\n",
        );
        out.push_str("|---|---|---|---|---|---|---|\n");
        for report in &self.reports {
            let delta = report
                .delta_vs_baseline
                .map(|d| format!("{d:+.2}"))
                .unwrap_or_else(|| "-".to_string());
            let p_value = report
                .rate_p_value
                .map(|p| format!("{p:.3}"))
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!(
                "| {} | {} | {} | {:.3} ± {:.3} | {:.2} | {} | {} |\n",
                report.name,
                report.games,
                report.rescued,
                report.rescue_rate,
                report.rate_ci,
                report.mean_searches,
                delta,
                p_value,
            ));
        }

        fs::write(path, out).map_err(|source| AnalyticsError::Io {
            context: "writing summary markdown",
            source,
        })
    }

    pub fn render_plot(&self, dir: impl AsRef<Path>) -> Result<PathBuf, AnalyticsError> {
        let dir = dir.as_ref();
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).map_err(|source| AnalyticsError::Io {
                context: "creating plots directory",
                source,
            })?;
        }

        let output_path = dir.join("mean_searches.png");
        let reports = self.reports.clone();

        let prev_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(|_| {}));

        let plot_attempt = std::panic::catch_unwind(move || {
            let backend_path = output_path.clone();
            let root = BitMapBackend::new(&backend_path, (800, 480)).into_drawing_area();
            root.fill(&WHITE)
                .map_err(|e| AnalyticsError::Plot(e.to_string()))?;

            let y_max = reports
                .iter()
                .map(|report| report.mean_searches)
                .fold(1.0f64, f64::max);

            let mut chart = ChartBuilder::on(&root)
                .margin(20)
                .caption(
                    "Mean searches per game (lower is better)",
                    ("sans-serif", 22),
                )
                .set_label_area_size(LabelAreaPosition::Left, 50)
                .set_label_area_size(LabelAreaPosition::Bottom, 60)
                .build_cartesian_2d(0..reports.len(), 0.0..(y_max * 1.15))
                .map_err(|e| AnalyticsError::Plot(e.to_string()))?;

            chart
                .configure_mesh()
                .disable_mesh()
                .y_desc("Mean searches")
                .x_desc("Policy")
                .x_label_formatter(&|idx| {
                    reports
                        .get(*idx)
                        .map(|report| report.name.clone())
                        .unwrap_or_default()
                })
                .draw()
                .map_err(|e| AnalyticsError::Plot(e.to_string()))?;

            chart
                .draw_series(reports.iter().enumerate().map(|(idx, report)| {
                    Rectangle::new(
                        [(idx, 0.0), (idx + 1, report.mean_searches)],
                        BLUE.mix(0.4).filled(),
                    )
                }))
                .map_err(|e| AnalyticsError::Plot(e.to_string()))?;

            root.present()
                .map_err(|e| AnalyticsError::Plot(e.to_string()))?;
            Ok(output_path)
        });

        std::panic::set_hook(prev_hook);

        match plot_attempt {
            Ok(result) => result,
            Err(_) => Err(AnalyticsError::Plot("plot backend panicked".into())),
        }
    }
}
