//! Curriculum command - show the round schedule for an orientation

use anyhow::Result;
use clap::Parser;

use super::resolve_orientation;
use crate::{
    cli::output::{print_kv, print_section, print_subsection},
    curriculum::{Curriculum, Phase},
};

#[derive(Parser, Debug)]
#[command(about = "Show the curriculum for an orientation")]
pub struct CurriculumArgs {
    /// Orientation (concept or strategy); overrides any CT parameter
    #[arg(long, short = 'o')]
    pub orientation: Option<String>,

    /// Host parameter as KEY=VALUE (repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Print the curriculum as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: CurriculumArgs) -> Result<()> {
    let orientation = resolve_orientation(args.orientation.as_deref(), &args.params)?;
    let curriculum = Curriculum::build(orientation);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&curriculum)?);
        return Ok(());
    }

    print_section(&format!("Curriculum: {orientation}"));
    print_kv("description", orientation.description());
    print_kv("rounds", &curriculum.len().to_string());

    let mut current: Option<Phase> = None;
    for (index, entry) in curriculum.entries().enumerate() {
        let phase = curriculum.phase_of(index);
        if current != Some(phase) {
            print_subsection(&format!(
                "Phase {}: {} ({} rounds)",
                phase.number(),
                phase,
                curriculum.phase_len(phase)
            ));
            current = Some(phase);
        }
        println!(
            "  {:>3}  concept {}  strategy {}",
            index + 1,
            entry.concept_level,
            entry.strategy_level
        );
    }

    Ok(())
}
