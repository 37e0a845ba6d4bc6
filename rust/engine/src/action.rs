use serde::{Deserialize, Serialize};

use crate::board::Cell;
use crate::effects::HexMode;
use crate::tiles::Face;

/// Every input the engine accepts, in serializable form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    SelectWheel { wheel: usize },
    PlaceOnCell { cell: Cell },
    /// Select + place in one step
    Place { wheel: usize, cell: Cell },
    ResolveWard { target: Cell },
    ResolveHex { mode: HexMode, cell: Cell },
    ResolveEclipse { kind: Face },
    CancelLast,
    CancelAll,
    Reroll,
    Validate,
    ApplyOmen { cell: Cell },
    DeclineOmen,
}

impl Action {
    /// True for the action that hands control to the other player.
    pub fn ends_turn(&self) -> bool {
        matches!(self, Action::Validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_form_is_tagged() {
        let a = Action::ResolveHex {
            mode: HexMode::Trap,
            cell: 3,
        };
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, r#"{"type":"resolve_hex","mode":"trap","cell":3}"#);
        let back: Action = serde_json::from_str(r#"{"type":"validate"}"#).unwrap();
        assert_eq!(back, Action::Validate);
    }
}
