use std::io::BufRead;

use anyhow::Context;
use clap::Parser;
use pbw::utils::{self, RationalPbwBasis};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Compute in the universal enveloping algebra of a Lie algebra"
)]
struct Args {
    /// The Lie algebra, optionally with an order, e.g. `sl2` or `sl2@reversed`
    algebra: String,
    /// Expressions to evaluate. If none are given, they are read from stdin, one per line
    expressions: Vec<String>,
    /// Print the quadratic Casimir element
    #[arg(long)]
    casimir: bool,
}

fn evaluate(pbw: &RationalPbwBasis, expression: &str) -> anyhow::Result<()> {
    let result = pbw
        .evaluate(expression)
        .with_context(|| format!("Failed to evaluate {expression}"))?;
    println!("{}", pbw.element_to_string(&result));
    Ok(())
}

fn main() -> anyhow::Result<()> {
    utils::init_logging()?;
    let args = Args::parse();

    let pbw = utils::construct(args.algebra.as_str())?;
    tracing::info!(algebra = %pbw, "loaded");

    if args.casimir {
        println!("{}", pbw.element_to_string(&pbw.casimir_element()?));
    }

    if !args.expressions.is_empty() {
        for expression in &args.expressions {
            evaluate(&pbw, expression)?;
        }
    } else if !args.casimir {
        for line in std::io::stdin().lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            if let Err(e) = evaluate(&pbw, &line) {
                eprintln!("{e:#}");
            }
        }
    }
    Ok(())
}
