//! Command-line interface for the hard-disk perfect sampler.
//!
//! Parses the two positional reference-driver arguments (activity, then
//! disc radius), draws one exact sample from the hard-disk model on the
//! unit torus, and renders one point per line.

use std::io::{self, Write};

use clap::Parser;
use hardcore_core::{SamplerBuilder, SamplerError, SamplerErrorCode};
use hardcore_graphs_disk::{HardDiskGraph, HardDiskGraphError, Point};
use rand::{SeedableRng, rngs::SmallRng};
use thiserror::Error;

const DEFAULT_ACTIVITY: f64 = 35.0;
const DEFAULT_RADIUS: f64 = 0.1;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "hard-disk-perfect-sampler",
    about = "Draw an exact hard-core sample of discs on the unit torus."
)]
pub struct Cli {
    /// Target activity of the hard-core model.
    #[arg(default_value_t = DEFAULT_ACTIVITY)]
    pub activity: f64,

    /// Disc radius; points closer than twice this value conflict.
    #[arg(default_value_t = DEFAULT_RADIUS)]
    pub radius: f64,

    /// Seed for the random generator; defaults to entropy.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Errors surfaced while executing the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Hard-disk graph construction failed.
    #[error(transparent)]
    Graph(#[from] HardDiskGraphError),
    /// The sampler rejected its configuration or its graph.
    #[error(transparent)]
    Sampler(#[from] SamplerError),
}

impl CliError {
    /// Retrieve the stable sampler error code, when one applies.
    #[must_use]
    pub fn sampler_code(&self) -> Option<SamplerErrorCode> {
        match self {
            Self::Sampler(err) => Some(err.code()),
            Self::Graph(_) => None,
        }
    }
}

/// Outcome of one sampler invocation.
#[derive(Debug, Clone)]
pub struct SampleSummary {
    /// Activity the sample was drawn at.
    pub activity: f64,
    /// Disc radius of the model.
    pub radius: f64,
    /// The retained points, a `2r`-separated set on the torus.
    pub points: Vec<Point>,
}

/// Executes the command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the radius or activity is rejected.
///
/// # Examples
/// ```
/// use hardcore_cli::cli::{Cli, run_cli};
///
/// let cli = Cli { activity: 5.0, radius: 0.1, seed: Some(7) };
/// let summary = run_cli(cli)?;
/// assert!(summary.points.iter().all(|p| (0.0..1.0).contains(&p.x)));
/// # Ok::<(), hardcore_cli::cli::CliError>(())
/// ```
pub fn run_cli(cli: Cli) -> Result<SampleSummary, CliError> {
    let graph = HardDiskGraph::try_new(cli.radius)?;
    let sampler = SamplerBuilder::new().with_activity(cli.activity).build()?;
    let points = match cli.seed {
        Some(seed) => sampler.run(&graph, &mut SmallRng::seed_from_u64(seed))?,
        None => sampler.run(&graph, &mut SmallRng::from_entropy())?,
    };
    Ok(SampleSummary {
        activity: cli.activity,
        radius: cli.radius,
        points,
    })
}

/// Renders `summary` to `writer`, one `"<x> <y>"` line per point.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// use hardcore_cli::cli::{SampleSummary, render_points};
/// use hardcore_graphs_disk::Point;
///
/// let summary = SampleSummary {
///     activity: 1.0,
///     radius: 0.1,
///     points: vec![Point { x: 0.25, y: 0.5 }],
/// };
/// let mut buffer = Vec::new();
/// render_points(&summary, &mut buffer)?;
/// assert_eq!(buffer, b"0.25 0.5\n");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn render_points(summary: &SampleSummary, mut writer: impl Write) -> io::Result<()> {
    for point in &summary.points {
        writeln!(writer, "{} {}", point.x, point.y)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).expect("arguments must parse")
    }

    #[test]
    fn defaults_match_the_reference_driver() {
        let cli = parse(&["hard-disk-perfect-sampler"]);
        assert_eq!(cli.activity, DEFAULT_ACTIVITY);
        assert_eq!(cli.radius, DEFAULT_RADIUS);
        assert!(cli.seed.is_none());
    }

    #[rstest]
    #[case(&["hard-disk-perfect-sampler", "20"], 20.0, DEFAULT_RADIUS)]
    #[case(&["hard-disk-perfect-sampler", "20", "0.05"], 20.0, 0.05)]
    fn positional_arguments_override_defaults(
        #[case] args: &[&str],
        #[case] activity: f64,
        #[case] radius: f64,
    ) {
        let cli = parse(args);
        assert_eq!(cli.activity, activity);
        assert_eq!(cli.radius, radius);
    }

    #[test]
    fn non_numeric_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["hard-disk-perfect-sampler", "dense"]).is_err());
    }

    #[test]
    fn run_cli_rejects_invalid_radius() {
        let cli = Cli {
            activity: 1.0,
            radius: -0.1,
            seed: Some(0),
        };
        let err = run_cli(cli).expect_err("negative radius must fail");
        assert!(matches!(err, CliError::Graph(_)));
        assert!(err.sampler_code().is_none());
    }

    #[test]
    fn run_cli_rejects_invalid_activity() {
        let cli = Cli {
            activity: f64::NAN,
            radius: 0.1,
            seed: Some(0),
        };
        let err = run_cli(cli).expect_err("NaN activity must fail");
        assert_eq!(err.sampler_code(), Some(SamplerErrorCode::InvalidActivity));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let cli = Cli {
            activity: 8.0,
            radius: 0.1,
            seed: Some(99),
        };
        let first = run_cli(cli.clone()).expect("run must succeed");
        let second = run_cli(cli).expect("run must succeed");
        assert_eq!(first.points, second.points);
    }

    #[test]
    fn rendered_points_round_trip_as_floats() {
        let cli = Cli {
            activity: 10.0,
            radius: 0.1,
            seed: Some(3),
        };
        let summary = run_cli(cli).expect("run must succeed");
        let mut buffer = Vec::new();
        render_points(&summary, &mut buffer).expect("rendering must succeed");
        let text = String::from_utf8(buffer).expect("output is UTF-8");
        let mut count = 0;
        for line in text.lines() {
            let mut fields = line.split(' ');
            let x: f64 = fields.next().expect("x field").parse().expect("x parses");
            let y: f64 = fields.next().expect("y field").parse().expect("y parses");
            assert!(fields.next().is_none());
            assert!((0.0..1.0).contains(&x) && (0.0..1.0).contains(&y));
            count += 1;
        }
        assert_eq!(count, summary.points.len());
    }
}
