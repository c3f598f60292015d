/// Worker state definitions for tracking pool progress
///
/// Every worker cycles Idle -> Fetching -> Parsing -> Emitting -> Idle until the job
/// queue is exhausted or cancellation is observed, then moves to Done.
use std::fmt;

/// Represents the current state of one pool worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerState {
    /// Waiting for the next job (or about to pull one)
    Idle,

    /// Fetching the page document over HTTP
    Fetching,

    /// Extracting stories from the fetched document
    Parsing,

    /// Sending the page result to the aggregator
    Emitting,

    /// Worker has exited its loop (terminal)
    Done,
}

impl WorkerState {
    /// Returns true if this is the terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if the worker is in the middle of a page job
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Fetching | Self::Parsing | Self::Emitting)
    }

    /// Returns true if moving from `self` to `next` is a legal transition
    ///
    /// Fetching may also jump back to Idle (page failed or cancelled before parsing)
    /// and any non-terminal state may move to Done when cancellation is observed.
    pub fn can_transition_to(&self, next: WorkerState) -> bool {
        use WorkerState::*;

        match (self, next) {
            (Done, _) => false,
            (_, Done) => true,
            (Idle, Fetching) => true,
            (Fetching, Parsing) | (Fetching, Emitting) | (Fetching, Idle) => true,
            (Parsing, Emitting) => true,
            (Emitting, Idle) => true,
            _ => false,
        }
    }

    /// Short lowercase name used in log output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Fetching => "fetching",
            Self::Parsing => "parsing",
            Self::Emitting => "emitting",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_cycle() {
        let cycle = [
            WorkerState::Idle,
            WorkerState::Fetching,
            WorkerState::Parsing,
            WorkerState::Emitting,
            WorkerState::Idle,
        ];
        for pair in cycle.windows(2) {
            assert!(
                pair[0].can_transition_to(pair[1]),
                "{} -> {} should be legal",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_failed_fetch_skips_parsing() {
        assert!(WorkerState::Fetching.can_transition_to(WorkerState::Emitting));
        assert!(WorkerState::Fetching.can_transition_to(WorkerState::Idle));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!WorkerState::Idle.can_transition_to(WorkerState::Parsing));
        assert!(!WorkerState::Idle.can_transition_to(WorkerState::Emitting));
        assert!(!WorkerState::Parsing.can_transition_to(WorkerState::Fetching));
        assert!(!WorkerState::Emitting.can_transition_to(WorkerState::Fetching));
    }

    #[test]
    fn test_done_is_terminal() {
        assert!(WorkerState::Done.is_terminal());
        assert!(!WorkerState::Done.can_transition_to(WorkerState::Idle));
        assert!(WorkerState::Fetching.can_transition_to(WorkerState::Done));
        assert!(WorkerState::Idle.can_transition_to(WorkerState::Done));
    }

    #[test]
    fn test_is_busy() {
        assert!(!WorkerState::Idle.is_busy());
        assert!(WorkerState::Fetching.is_busy());
        assert!(WorkerState::Parsing.is_busy());
        assert!(WorkerState::Emitting.is_busy());
        assert!(!WorkerState::Done.is_busy());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", WorkerState::Fetching), "fetching");
        assert_eq!(format!("{}", WorkerState::Done), "done");
    }
}
