//! Generate command - sample validated rounds

use anyhow::Result;
use clap::Parser;
use rand::{SeedableRng, random, rngs::StdRng};

use crate::{
    cli::output::{print_kv, print_section},
    concept::format_sequence,
    curriculum::Phase,
    round::{DEFAULT_RETRY_BUDGET, RoundFactory},
};

#[derive(Parser, Debug)]
#[command(about = "Generate validated rounds", allow_negative_numbers = true)]
pub struct GenerateArgs {
    /// Concept level (1-4)
    #[arg(long, short = 'c', default_value_t = 1)]
    pub concept_level: usize,

    /// Strategy level (path depth, at least 1)
    #[arg(long, short = 's', default_value_t = 1)]
    pub strategy_level: usize,

    /// Phase whose coverage rule applies (training, test, transfer)
    #[arg(long, short = 'p', default_value = "training")]
    pub phase: Phase,

    /// Number of rounds to generate
    #[arg(long, short = 'n', default_value_t = 1)]
    pub count: usize,

    /// Generate/validate attempts per round
    #[arg(long, default_value_t = DEFAULT_RETRY_BUDGET)]
    pub retry_budget: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print rounds as JSON lines
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: GenerateArgs) -> Result<()> {
    let factory = RoundFactory::default().with_retry_budget(args.retry_budget);
    let mut rng = StdRng::seed_from_u64(args.seed.unwrap_or_else(random));

    if !args.json {
        print_section(&format!(
            "Rounds at concept {} / strategy {} ({})",
            args.concept_level, args.strategy_level, args.phase
        ));
    }

    for index in 0..args.count {
        let round = factory.create(
            args.concept_level,
            args.strategy_level,
            args.phase,
            &mut rng,
        )?;

        if args.json {
            println!("{}", serde_json::to_string(&round)?);
            continue;
        }

        println!("\nRound {}", index + 1);
        print_kv("start", &round.start.to_string());
        print_kv("target", &round.target.to_string());
        print_kv(
            "path A",
            &format!(
                "{} -> {}",
                format_sequence(&round.path_a.sequence),
                round.path_a.end
            ),
        );
        print_kv(
            "path B",
            &format!(
                "{} -> {}",
                format_sequence(&round.path_b.sequence),
                round.path_b.end
            ),
        );
        print_kv("target path", &round.target_path.to_string());
    }

    Ok(())
}
