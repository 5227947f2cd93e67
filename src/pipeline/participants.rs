//! Simulated participants

use rand::{Rng, SeedableRng, random, rngs::StdRng};

use crate::{
    Result,
    concept::{ConceptSymbol, ConceptTable},
    ports::{Participant, RoundView},
    round::PathLabel,
};

/// Picks a path uniformly at random (chance baseline)
pub struct RandomParticipant {
    name: String,
    rng: StdRng,
}

impl RandomParticipant {
    /// Create a new random participant
    pub fn new(name: String) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a new random participant with a deterministic seed
    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Participant for RandomParticipant {
    fn choose_path(&mut self, _view: &RoundView) -> Result<PathLabel> {
        Ok(coin_flip(&mut self.rng))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

/// Knows every transform and always takes the path that reaches the target
pub struct OracleParticipant {
    name: String,
    table: ConceptTable,
}

impl OracleParticipant {
    pub fn new(name: String) -> Self {
        Self {
            name,
            table: ConceptTable::standard(),
        }
    }
}

impl Participant for OracleParticipant {
    fn choose_path(&mut self, view: &RoundView) -> Result<PathLabel> {
        let reaches =
            |path: PathLabel| self.table.fold(view.start, view.sequence(path)) == view.target;
        Ok(if reaches(PathLabel::A) || !reaches(PathLabel::B) {
            PathLabel::A
        } else {
            PathLabel::B
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Knows only the concepts up to `known_level`.
///
/// Unknown symbols are assumed to leave the score unchanged. When exactly
/// one path's estimate hits the target that path is taken; otherwise the
/// participant guesses.
pub struct BoundedParticipant {
    name: String,
    table: ConceptTable,
    known_level: usize,
    rng: StdRng,
}

impl BoundedParticipant {
    pub fn new(name: String, known_level: usize) -> Self {
        Self {
            name,
            table: ConceptTable::standard(),
            known_level,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    pub fn known_level(&self) -> usize {
        self.known_level
    }

    /// Score this participant believes a sequence ends on
    pub fn estimate(&self, start: i32, sequence: &[ConceptSymbol]) -> i32 {
        sequence.iter().fold(start, |score, &symbol| {
            if symbol.ordinal() <= self.known_level {
                self.table.apply(symbol, score, start)
            } else {
                score
            }
        })
    }
}

impl Participant for BoundedParticipant {
    fn choose_path(&mut self, view: &RoundView) -> Result<PathLabel> {
        let hits: Vec<PathLabel> = PathLabel::BOTH
            .into_iter()
            .filter(|&path| self.estimate(view.start, view.sequence(path)) == view.target)
            .collect();

        Ok(match hits.as_slice() {
            [only] => *only,
            _ => coin_flip(&mut self.rng),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

fn coin_flip<R: Rng + ?Sized>(rng: &mut R) -> PathLabel {
    if rng.random_bool(0.5) {
        PathLabel::A
    } else {
        PathLabel::B
    }
}
