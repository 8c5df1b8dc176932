use std::fmt::Write;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use invjoin::{ClosureStrategy, InversionSet, PairRep};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "INVJOIN_LOG";

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        std::process::exit(1);
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "invjoin",
    about = "Compute the JOIN closure of inversion pairs grouped modulo n."
)]
struct Cli {
    /// Modulus partitioning the integers into groups.
    #[arg(short, long, value_name = "N", allow_negative_numbers = true)]
    modulus: i64,
    /// Closure algorithm: `fixpoint` or `propagation`.
    #[arg(short, long, default_value_t = ClosureStrategy::Fixpoint)]
    strategy: ClosureStrategy,
    /// Inversion pairs written `a,b`.
    #[arg(value_name = "A,B", value_parser = parse_pair, allow_hyphen_values = true)]
    pairs: Vec<(i64, i64)>,
}

fn parse_pair(s: &str) -> Result<(i64, i64)> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| anyhow!("expected a pair `a,b`, got {s:?}"))?;
    let a = a
        .trim()
        .parse()
        .with_context(|| format!("invalid left value in {s:?}"))?;
    let b = b
        .trim()
        .parse()
        .with_context(|| format!("invalid right value in {s:?}"))?;
    Ok((a, b))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut set = InversionSet::new(cli.pairs, cli.modulus)
        .context("failed to set up the inversion set")?
        .with_strategy(cli.strategy);

    print!("{}", report(&mut set)?);
    Ok(())
}

/// Every view of the pipeline, one titled section each.
fn report(set: &mut InversionSet) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "Adjacency matrix:")?;
    writeln!(out, "{}", set.build_adjacency().edges())?;

    writeln!(out, "\nClosure ({}):", set.strategy())?;
    writeln!(out, "{}", set.compute_closure().display())?;

    writeln!(out, "\nJOIN matrix (* on the diagonal marks a cycle):")?;
    writeln!(out, "{}", set.compute_closure().join_matrix())?;

    writeln!(out, "\nStar nodes: {}", set.star_nodes())?;

    writeln!(out, "\nLifted:")?;
    for pair in lifted_pairs(set) {
        writeln!(out, "{pair}")?;
    }

    writeln!(out, "\nJOIN:")?;
    let pairs = set.compute_canonical_pairs();
    if !pairs.is_empty() {
        writeln!(out, "{pairs}")?;
    }
    Ok(out)
}

/// For each reachable `(a, g)` with `a != g`, the first member of `g` above
/// `a`, starred when `g` reaches itself.
fn lifted_pairs(set: &mut InversionSet) -> Vec<PairRep> {
    let modulus = set.modulus();
    let stars = set.star_nodes().clone();
    set.compute_closure()
        .cells()
        .iter()
        .filter(|(a, g, cell)| a != g && !cell.is_empty())
        .filter_map(|(a, g, _)| {
            let b = modulus.lift_above(a.value(), g)?;
            Some(PairRep {
                a,
                b,
                star: stars.contains(g),
            })
        })
        .collect()
}
