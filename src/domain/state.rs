/// What a philosopher is doing right now.
///
/// Every philosopher cycles `Thinking -> Hungry -> Eating -> Thinking`. Only the
/// philosopher's own task changes its state; the [`StateTable`](crate::table::StateTable)
/// reads it for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PhilosopherState {
    /// Holds no forks and sleeps for a random think duration.
    #[default]
    Thinking,
    /// Holds no forks yet and is waiting for both of them.
    Hungry,
    /// Holds both adjacent forks.
    Eating,
}

impl PhilosopherState {
    /// Human-readable name used by the live table.
    pub fn label(self) -> &'static str {
        match self {
            PhilosopherState::Thinking => "Thinking",
            PhilosopherState::Hungry => "Hungry",
            PhilosopherState::Eating => "Eating",
        }
    }

    /// Compact encoding for the lock-free state cells.
    pub(crate) fn to_u8(self) -> u8 {
        self as u8
    }

    pub(crate) fn from_u8(raw: u8) -> Self {
        match raw {
            1 => PhilosopherState::Hungry,
            2 => PhilosopherState::Eating,
            _ => PhilosopherState::Thinking,
        }
    }
}

impl std::fmt::Display for PhilosopherState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // `pad` so width/alignment flags like `{:<8}` apply
        f.pad(self.label())
    }
}
