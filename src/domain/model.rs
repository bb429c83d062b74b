use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use crate::utils::error::{Result, SantaError};
use crate::utils::validation::validate_participant_name;

/// Opaque identifier for one person in the exchange. Unique within a run;
/// uniqueness is compared case-insensitively when a roster is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Participant(String);

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Participant(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn casefold(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Participant {
    fn from(name: &str) -> Self {
        Participant(name.to_string())
    }
}

impl From<String> for Participant {
    fn from(name: String) -> Self {
        Participant(name)
    }
}

/// Raw roster row as it comes out of configuration: a name plus the people
/// this person must not give a gift to. An empty list and a missing list in
/// the source both end up as an empty `excludes` here.
#[derive(Debug, Clone, Default)]
pub struct RosterEntry {
    pub name: String,
    pub excludes: Vec<String>,
}

impl RosterEntry {
    pub fn new(name: impl Into<String>, excludes: &[&str]) -> Self {
        RosterEntry {
            name: name.into(),
            excludes: excludes.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Participant set plus exclusion relation for one run.
///
/// The participant list is kept ordered by ascending count of feasible
/// recipients, so the drawing always starts from the most constrained
/// person. Exclusion sets are stored only for participants that have any.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    participants: Vec<Participant>,
    exclusions: HashMap<Participant, HashSet<Participant>>,
}

impl Roster {
    pub fn new() -> Self {
        Roster::default()
    }

    /// Builds a validated roster from configuration entries: at least two
    /// participants, no duplicate names (case-insensitive), every excluded
    /// name present in the participant set, names usable as file names.
    pub fn from_entries(entries: &[RosterEntry]) -> Result<Self> {
        if entries.len() < 2 {
            return Err(SantaError::InvalidInput {
                message: format!(
                    "need at least two participants, got {}",
                    entries.len()
                ),
            });
        }

        let mut roster = Roster::new();
        for entry in entries {
            validate_participant_name("participants.name", &entry.name)?;
            if !roster.register(&entry.name, &entry.excludes) {
                return Err(SantaError::InvalidInput {
                    message: format!("duplicate participant name '{}'", entry.name),
                });
            }
        }

        if let Some((giver, excluded)) = roster.dangling_exclusion() {
            return Err(SantaError::InvalidInput {
                message: format!(
                    "exclusion of '{}' references unknown participant '{}'",
                    giver, excluded
                ),
            });
        }

        Ok(roster)
    }

    /// Adds a participant, optionally with exclusions. Returns `false` when
    /// someone by that name (ignoring case) is already registered.
    ///
    /// Exclusions naming not-yet-registered people are tolerated here; they
    /// are flagged by the generator if still dangling at draw time.
    pub fn register(&mut self, name: &str, excludes: &[String]) -> bool {
        let participant = Participant::new(name);
        let folded = participant.casefold();
        if self.participants.iter().any(|p| p.casefold() == folded) {
            tracing::warn!("someone by the name of '{}' is already registered", name);
            return false;
        }

        if !excludes.is_empty() {
            let set: HashSet<Participant> =
                excludes.iter().map(|e| Participant::new(e.clone())).collect();
            self.exclusions.insert(participant.clone(), set);
        }
        self.participants.push(participant);
        self.sort_by_feasibility();
        true
    }

    /// Removes the named participant and their exclusion set. With `cascade`,
    /// also scrubs them from every remaining exclusion set.
    pub fn remove(&mut self, name: &str, cascade: bool) {
        let target = Participant::new(name);
        self.participants.retain(|p| *p != target);
        self.exclusions.remove(&target);

        if cascade {
            self.exclusions.retain(|_, set| {
                set.remove(&target);
                !set.is_empty()
            });
        }
        self.sort_by_feasibility();
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn contains(&self, participant: &Participant) -> bool {
        self.participants.iter().any(|p| p == participant)
    }

    pub fn forbids(&self, giver: &Participant, recipient: &Participant) -> bool {
        self.exclusions
            .get(giver)
            .is_some_and(|set| set.contains(recipient))
    }

    /// Members of `pool` the giver may be assigned: not the giver themselves
    /// and not on the giver's exclusion list. Pool order is preserved so that
    /// seeded draws stay reproducible.
    pub fn feasible_recipients(
        &self,
        pool: &[Participant],
        giver: &Participant,
    ) -> Vec<Participant> {
        pool.iter()
            .filter(|p| *p != giver && !self.forbids(giver, p))
            .cloned()
            .collect()
    }

    /// All (giver, excluded) pairs in the exclusion relation.
    pub fn exclusion_pairs(&self) -> impl Iterator<Item = (&Participant, &Participant)> {
        self.exclusions
            .iter()
            .flat_map(|(giver, set)| set.iter().map(move |e| (giver, e)))
    }

    /// First exclusion referencing a name outside the participant set, if any.
    pub fn dangling_exclusion(&self) -> Option<(&Participant, &Participant)> {
        self.exclusion_pairs()
            .find(|(_, excluded)| !self.contains(excluded))
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    // Most constrained participant first. Stable, so ties keep their
    // registration order and seeded draws stay reproducible.
    fn sort_by_feasibility(&mut self) {
        let all = self.participants.clone();
        let counts: HashMap<Participant, usize> = all
            .iter()
            .map(|p| (p.clone(), self.feasible_recipients(&all, p).len()))
            .collect();
        self.participants.sort_by_key(|p| counts[p]);
    }
}

/// Total giver → recipient bijection over the roster, stored in a
/// deterministically ordered map.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    pairs: BTreeMap<Participant, Participant>,
}

impl Assignment {
    /// Folds a gift-giving cycle into giver → recipient pairs; the last
    /// participant gives to the first.
    pub fn from_cycle(cycle: &[Participant]) -> Self {
        let mut pairs = BTreeMap::new();
        if cycle.len() >= 2 {
            for pair in cycle.windows(2) {
                pairs.insert(pair[0].clone(), pair[1].clone());
            }
            pairs.insert(cycle[cycle.len() - 1].clone(), cycle[0].clone());
        }
        Assignment { pairs }
    }

    pub fn recipient_for(&self, giver: &Participant) -> Option<&Participant> {
        self.pairs.get(giver)
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&Participant, &Participant)> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Rendered output artifact for one giver. The body reveals only this
/// giver's recipient.
#[derive(Debug, Clone)]
pub struct Letter {
    pub giver: Participant,
    pub body: String,
}

impl Letter {
    pub fn file_name(&self) -> String {
        format!("{}.txt", self.giver)
    }
}
