//! Session invariants checked after every committed move in debug builds.
//!
//! Each property is a unit type, so a test can check one alone or a tuple of
//! them through [`InvariantSet`]. [`SessionInvariants`] is the set the
//! controller asserts.

use super::controller::GameSession;
use super::Side;

/// A property of the session that every committed move must preserve.
pub trait Invariant<S> {
    /// Returns true if `state` has the property.
    fn holds(state: &S) -> bool;

    /// Message reported when the property is broken.
    fn description() -> &'static str;
}

/// A broken session property, named by its description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Message of the broken invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Wraps the message of a broken invariant.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Several invariants checked in one pass, written as a tuple type.
pub trait InvariantSet<S> {
    /// Checks every member and reports all that are broken, in tuple order.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

/// Appends a violation for `I` if it does not hold.
fn record<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

fn into_result(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        record::<S, I1>(state, &mut violations);
        record::<S, I2>(state, &mut violations);
        into_result(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        record::<S, I1>(state, &mut violations);
        record::<S, I2>(state, &mut violations);
        record::<S, I3>(state, &mut violations);
        into_result(violations)
    }
}

/// Invariant: sequence numbers are 0, 1, 2, ... in history order.
pub struct ContiguousSequenceInvariant;

impl Invariant<GameSession> for ContiguousSequenceInvariant {
    fn holds(session: &GameSession) -> bool {
        session
            .move_history()
            .iter()
            .enumerate()
            .all(|(i, mv)| mv.sequence_number() == i)
    }

    fn description() -> &'static str {
        "Sequence numbers match history positions"
    }
}

/// Invariant: movers alternate White, Black, White, ...
pub struct AlternatingMoverInvariant;

impl Invariant<GameSession> for AlternatingMoverInvariant {
    fn holds(session: &GameSession) -> bool {
        session
            .move_history()
            .iter()
            .enumerate()
            .all(|(i, mv)| mv.mover() == Side::for_sequence_number(i))
    }

    fn description() -> &'static str {
        "Movers alternate starting with White"
    }
}

/// Invariant: the side to move follows from the history length.
pub struct TurnMatchesHistoryInvariant;

impl Invariant<GameSession> for TurnMatchesHistoryInvariant {
    fn holds(session: &GameSession) -> bool {
        *session.current_turn() == Side::for_sequence_number(session.move_history().len())
    }

    fn description() -> &'static str {
        "Side to move matches history length"
    }
}

/// Everything the controller asserts after a commit.
pub type SessionInvariants = (
    ContiguousSequenceInvariant,
    AlternatingMoverInvariant,
    TurnMatchesHistoryInvariant,
);
