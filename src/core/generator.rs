use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::model::{Assignment, Participant, Roster};
use crate::utils::error::{Result, SantaError};

pub const DEFAULT_MAX_TRIES: usize = 25;

/// Draws a random giver → recipient bijection over a roster, honoring the
/// exclusion relation: nobody is assigned themselves or anyone on their
/// exclusion list, and everyone gives and receives exactly once.
///
/// The draw samples a single gift-giving cycle: starting from the most
/// constrained participant, it repeatedly picks a uniformly random feasible
/// next recipient from the remaining pool. A dead end (no feasible recipient
/// left, or a forbidden closing edge back to the start) abandons the attempt
/// and redraws from scratch; `max_tries` bounds the number of attempts.
///
/// The random source is an explicit parameter. Seed it for reproducible
/// draws.
#[derive(Debug, Clone)]
pub struct Generator {
    max_tries: usize,
}

impl Default for Generator {
    fn default() -> Self {
        Generator {
            max_tries: DEFAULT_MAX_TRIES,
        }
    }
}

impl Generator {
    pub fn new(max_tries: usize) -> Self {
        Generator {
            max_tries: max_tries.max(1),
        }
    }

    pub fn generate<R: Rng>(&self, roster: &Roster, rng: &mut R) -> Result<Assignment> {
        self.check_preconditions(roster)?;

        // If the most constrained participant has nobody they may give to,
        // no amount of redrawing will help.
        let first = &roster.participants()[0];
        if roster
            .feasible_recipients(roster.participants(), first)
            .is_empty()
        {
            tracing::debug!(participant = %first, "participant has no feasible recipients");
            return Err(SantaError::Unsatisfiable { attempts: 0 });
        }

        for attempt in 1..=self.max_tries {
            match self.draw_cycle(roster, rng) {
                Some(cycle) => {
                    let assignment = Assignment::from_cycle(&cycle);
                    validate_assignment(&assignment, roster)?;
                    tracing::debug!(attempt, "found a valid assignment");
                    return Ok(assignment);
                }
                None => tracing::debug!(attempt, "dead end, redrawing"),
            }
        }

        Err(SantaError::Unsatisfiable {
            attempts: self.max_tries,
        })
    }

    fn check_preconditions(&self, roster: &Roster) -> Result<()> {
        if roster.len() < 2 {
            return Err(SantaError::InvalidInput {
                message: format!("need at least two participants, got {}", roster.len()),
            });
        }

        if let Some((giver, excluded)) = roster.dangling_exclusion() {
            return Err(SantaError::InvalidInput {
                message: format!(
                    "exclusion of '{}' references unknown participant '{}'",
                    giver, excluded
                ),
            });
        }

        Ok(())
    }

    /// One attempt at a full cycle. Starts from the most constrained
    /// participant (the roster keeps them first) and extends with a random
    /// feasible pick from the remaining pool. Returns `None` on a dead end.
    fn draw_cycle<R: Rng>(&self, roster: &Roster, rng: &mut R) -> Option<Vec<Participant>> {
        let participants = roster.participants();
        let first = participants[0].clone();
        let mut pool: Vec<Participant> = participants[1..].to_vec();
        let mut cycle = Vec::with_capacity(participants.len());
        cycle.push(first.clone());

        let mut current = first.clone();
        while !pool.is_empty() {
            let options = roster.feasible_recipients(&pool, &current);
            let next = options.choose(rng)?.clone();
            pool.retain(|p| *p != next);
            cycle.push(next.clone());
            current = next;
        }

        // The last giver closes the loop back to the start; that edge must
        // be allowed too.
        if roster.forbids(&current, &first) {
            None
        } else {
            Some(cycle)
        }
    }
}

/// Checks a candidate against all three assignment invariants: no
/// self-assignment, no excluded recipient, and a bijection over the full
/// participant set.
pub fn validate_assignment(assignment: &Assignment, roster: &Roster) -> Result<()> {
    if assignment.len() != roster.len() {
        return Err(SantaError::ProcessingError {
            message: format!(
                "assignment covers {} participants, roster has {}",
                assignment.len(),
                roster.len()
            ),
        });
    }

    let mut recipients_seen = std::collections::HashSet::new();
    for (giver, recipient) in assignment.pairs() {
        if giver == recipient {
            return Err(SantaError::ProcessingError {
                message: format!("'{}' is assigned to themselves", giver),
            });
        }
        if roster.forbids(giver, recipient) {
            return Err(SantaError::ProcessingError {
                message: format!("'{}' is assigned excluded recipient '{}'", giver, recipient),
            });
        }
        if !roster.contains(recipient) {
            return Err(SantaError::ProcessingError {
                message: format!("recipient '{}' is not on the roster", recipient),
            });
        }
        if !recipients_seen.insert(recipient) {
            return Err(SantaError::ProcessingError {
                message: format!("'{}' receives more than once", recipient),
            });
        }
    }

    for participant in roster.participants() {
        if assignment.recipient_for(participant).is_none() {
            return Err(SantaError::ProcessingError {
                message: format!("'{}' has no recipient", participant),
            });
        }
    }

    Ok(())
}
