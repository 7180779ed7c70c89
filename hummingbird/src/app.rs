//! # Runner Application Logic
//!
//! Builds a [`HummingbirdEnv`] from the command line (optionally layered over
//! a JSON config file), drives it with the selected policy and reports what
//! each episode achieved.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ml::{EnvConfig, HummingbirdEnv, IdlePolicy, Policy, RandomPolicy, SeekPolicy};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyKind {
    /// Fly straight at the nearest flower
    Seek,
    Random,
    Idle,
}

#[derive(Debug, Parser)]
#[command(name = "hummingbird", about = "Run hummingbird arena episodes headless")]
pub struct Args {
    /// Number of episodes to run
    #[arg(long, default_value_t = 3)]
    pub episodes: u32,
    /// Overrides the seed from the config file
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = PolicyKind::Seek)]
    pub policy: PolicyKind,
    /// Run in gameplay mode: no flower resets, no rewards, no step budget
    #[arg(long)]
    pub gameplay: bool,
    /// Step cap per episode; overrides the training budget and bounds gameplay episodes
    #[arg(long)]
    pub max_steps: Option<u32>,
    /// JSON file with an `EnvConfig`
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// What one episode achieved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpisodeSummary {
    pub steps: u32,
    pub nectar: f32,
    pub reward: f32,
    pub flowers_left: usize,
}

/// Merge the config file (if any) with command-line overrides.
///
/// # Errors
///
/// Fails if the config file cannot be read or is invalid.
pub fn load_config(args: &Args) -> Result<EnvConfig> {
    let mut config = match &args.config {
        Some(path) => EnvConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EnvConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if args.gameplay {
        config.agent.training_mode = false;
    }
    if let Some(max_steps) = args.max_steps {
        config.agent.max_steps = max_steps;
    }
    config.validate()?;
    Ok(config)
}

/// Log filter from `RUST_LOG`-style directives, `info` when unset or unparsable.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn make_policy(kind: PolicyKind, seed: u64) -> Box<dyn Policy> {
    match kind {
        PolicyKind::Seek => Box::new(SeekPolicy::default()),
        PolicyKind::Random => Box::new(RandomPolicy::new(seed)),
        PolicyKind::Idle => Box::new(IdlePolicy),
    }
}

/// Run one episode, capped at `step_cap` ticks.
pub fn run_episode(env: &mut HummingbirdEnv, policy: &mut dyn Policy, step_cap: u32) -> EpisodeSummary {
    env.begin_episode();
    let mut summary = EpisodeSummary::default();
    while summary.steps < step_cap {
        let action = policy.act(&env.policy_context());
        let result = env.step_action(&action);
        summary.steps += 1;
        summary.nectar += result.nectar_received;
        summary.reward += result.reward;
        if result.done {
            break;
        }
    }
    summary.flowers_left = env.area().flowers_with_nectar();
    summary
}

/// Run the configured episodes and log a summary of each.
///
/// # Errors
///
/// Returns configuration and arena construction errors.
pub fn run(args: &Args) -> Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .init();

    let config = load_config(args)?;
    let step_cap = if config.agent.training_mode && config.agent.max_steps > 0 {
        config.agent.max_steps
    } else {
        args.max_steps.unwrap_or(5000)
    };
    let seed = config.seed;
    tracing::info!(
        policy = ?args.policy,
        episodes = args.episodes,
        training = config.agent.training_mode,
        step_cap,
        seed,
        "starting hummingbird runner"
    );

    let mut env = HummingbirdEnv::new(config).context("building environment")?;
    let mut policy = make_policy(args.policy, seed);

    let start = Instant::now();
    let mut total_nectar = 0.0;
    for episode in 1..=args.episodes {
        let summary = run_episode(&mut env, policy.as_mut(), step_cap);
        total_nectar += summary.nectar;
        tracing::info!(
            episode,
            steps = summary.steps,
            nectar = summary.nectar,
            reward = summary.reward,
            flowers_left = summary.flowers_left,
            "episode finished"
        );
    }

    tracing::info!(
        episodes = args.episodes,
        total_nectar,
        elapsed_ms = start.elapsed().as_millis(),
        "run complete"
    );
    Ok(())
}
