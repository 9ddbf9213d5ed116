//! Action selection policies

use pokeact_battle::{ACTION_SPACE, ActionCode, BattleFacts, LegalityMask, Mode, decode};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Picks an action code for a decision point.
///
/// Returning `None` means the policy has no usable opinion; the agent then
/// takes the engine's fallback and counts it.
pub trait Policy: Send {
    fn select(&mut self, facts: &BattleFacts, mask: &LegalityMask) -> Option<ActionCode>;

    /// Name used in logs
    fn name(&self) -> &str {
        "policy"
    }
}

/// Baseline that picks uniformly among the legal actions
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    /// Seeded for reproducible runs, or from entropy
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl Policy for RandomPolicy {
    fn select(&mut self, _facts: &BattleFacts, mask: &LegalityMask) -> Option<ActionCode> {
        let legal: Vec<ActionCode> = mask.legal_actions().collect();
        legal.choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Action codes 0-9 ordered by descending score
///
/// Ties keep the lower action code first; NaN scores sort last.
pub fn rank_actions(scores: &[f32; ACTION_SPACE]) -> Vec<ActionCode> {
    let mut order: Vec<usize> = (0..ACTION_SPACE).collect();
    order.sort_by(|&a, &b| match (scores[a].is_nan(), scores[b].is_nan()) {
        (false, true) => std::cmp::Ordering::Less,
        (true, false) => std::cmp::Ordering::Greater,
        _ => scores[b].total_cmp(&scores[a]),
    });
    order.into_iter().map(ActionCode::from_index).collect()
}

/// Policy driven by an external scorer, e.g. a value network's output
///
/// Walks the actions from best to worst score and keeps the first one that
/// resolves to a real move or switch.
pub struct ScoredPolicy<F> {
    scorer: F,
}

impl<F> ScoredPolicy<F>
where
    F: FnMut(&BattleFacts) -> [f32; ACTION_SPACE] + Send,
{
    pub fn new(scorer: F) -> Self {
        Self { scorer }
    }
}

impl<F> Policy for ScoredPolicy<F>
where
    F: FnMut(&BattleFacts) -> [f32; ACTION_SPACE] + Send,
{
    fn select(&mut self, facts: &BattleFacts, _mask: &LegalityMask) -> Option<ActionCode> {
        let scores = (self.scorer)(facts);
        rank_actions(&scores)
            .into_iter()
            .find(|&action| matches!(decode(action, facts, Mode::Strict), Ok(command) if !command.is_default()))
    }

    fn name(&self) -> &str {
        "scored"
    }
}
