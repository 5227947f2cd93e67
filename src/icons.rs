//! Decorative icon assignment
//!
//! Each session draws icons for the five concept symbols from a fixed pool,
//! plus a second, disjoint set used for transfer rounds. Icons never affect
//! generation or scoring.

use std::collections::BTreeMap;

use rand::{Rng, seq::index};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    concept::{ConceptSymbol, format_sequence},
    curriculum::Phase,
};

/// Number of icons available to a session
pub const ICON_POOL_SIZE: usize = 12;

/// Default pool: `room_1` .. `room_12`
pub fn default_icon_pool() -> Vec<String> {
    (1..=ICON_POOL_SIZE).map(|n| format!("room_{n}")).collect()
}

/// Symbol-to-icon mappings sampled for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconAssignment {
    pub training: BTreeMap<ConceptSymbol, String>,
    pub transfer: BTreeMap<ConceptSymbol, String>,
}

impl IconAssignment {
    /// Sample from the default pool
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Result<Self> {
        Self::sample_from(&default_icon_pool(), rng)
    }

    /// Sample two disjoint mappings from `pool`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot supply two disjoint sets.
    pub fn sample_from<R: Rng + ?Sized>(pool: &[String], rng: &mut R) -> Result<Self> {
        let needed = 2 * ConceptSymbol::COUNT;
        if pool.len() < needed {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "icon pool has {} icons, at least {needed} are required",
                    pool.len()
                ),
            });
        }

        let first: Vec<usize> = index::sample(rng, pool.len(), ConceptSymbol::COUNT).into_vec();
        let remaining: Vec<&String> = pool
            .iter()
            .enumerate()
            .filter(|(i, _)| !first.contains(i))
            .map(|(_, icon)| icon)
            .collect();
        let second = index::sample(rng, remaining.len(), ConceptSymbol::COUNT).into_vec();

        let training = ConceptSymbol::ALL
            .iter()
            .zip(first)
            .map(|(&symbol, i)| (symbol, pool[i].clone()))
            .collect();
        let transfer = ConceptSymbol::ALL
            .iter()
            .zip(second)
            .map(|(&symbol, i)| (symbol, remaining[i].clone()))
            .collect();

        Ok(Self { training, transfer })
    }

    /// Icon drawn for `symbol` in a round of `phase`
    pub fn icon_for(&self, symbol: ConceptSymbol, phase: Phase) -> &str {
        let mapping = if phase.uses_transfer_icons() {
            &self.transfer
        } else {
            &self.training
        };
        mapping.get(&symbol).map(String::as_str).unwrap_or("")
    }

    /// Icons for every step of a path
    pub fn icons_for(&self, sequence: &[ConceptSymbol], phase: Phase) -> Vec<String> {
        sequence
            .iter()
            .map(|&symbol| self.icon_for(symbol, phase).to_string())
            .collect()
    }

    /// Compact description, e.g. `ABCDE -> room_3, room_9, ...`
    pub fn describe(&self, phase: Phase) -> String {
        let icons = self.icons_for(&ConceptSymbol::ALL, phase);
        format!("{} -> {}", format_sequence(&ConceptSymbol::ALL), icons.join(", "))
    }
}
