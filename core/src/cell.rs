use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Revealed,
    Flagged,
    Questioned,
}

impl CellState {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }

    /// Cells a flood-fill or chord is allowed to open.
    pub const fn is_openable(self) -> bool {
        matches!(self, Self::Hidden | Self::Questioned)
    }

    /// Next state in the marking cycle Hidden -> Flagged -> Questioned -> Hidden, along with the change it causes to
    /// the flag counter. Revealed cells cannot be marked.
    pub const fn next_mark(self) -> Option<(Self, i8)> {
        use CellState::*;
        match self {
            Hidden => Some((Flagged, 1)),
            Flagged => Some((Questioned, -1)),
            Questioned => Some((Hidden, 0)),
            Revealed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_cycle_has_period_three() {
        let mut state = CellState::Hidden;
        let mut flags = 0;
        for _ in 0..3 {
            let (next, delta) = state.next_mark().unwrap();
            state = next;
            flags += delta;
        }
        assert_eq!(state, CellState::Hidden);
        assert_eq!(flags, 0);
    }

    #[test]
    fn revealed_cannot_be_marked() {
        assert_eq!(CellState::Revealed.next_mark(), None);
    }
}
