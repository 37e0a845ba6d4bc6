use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two seats at the table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum PlayerId {
    /// First seat (P1)
    One,
    /// Second seat (P2)
    Two,
}

impl PlayerId {
    pub fn other(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// Index into per-player arrays (0 or 1).
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    pub fn both() -> [PlayerId; 2] {
        [PlayerId::One, PlayerId::Two]
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::One => write!(f, "P1"),
            PlayerId::Two => write!(f, "P2"),
        }
    }
}

/// Face shown by a wheel slot, and the kind of a tile on the board.
///
/// `Eclipse` is a wildcard: a tile placed from an eclipse face is resolved
/// to one of the three basic kinds before combat ever sees it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Face {
    /// Beats Hex
    Atk,
    /// Beats Ward
    Hex,
    /// Beats Atk
    Ward,
    /// Wildcard, beats nothing until resolved
    Eclipse,
}

impl Face {
    /// The three kinds that take part in combat.
    pub const BASIC: [Face; 3] = [Face::Atk, Face::Hex, Face::Ward];

    /// Rock-paper-scissors relation: ATK > HEX > WARD > ATK.
    pub fn beats(self, other: Face) -> bool {
        matches!(
            (self, other),
            (Face::Atk, Face::Hex) | (Face::Hex, Face::Ward) | (Face::Ward, Face::Atk)
        )
    }

    pub fn is_eclipse(self) -> bool {
        self == Face::Eclipse
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Face::Atk => "ATK",
            Face::Hex => "HEX",
            Face::Ward => "WARD",
            Face::Eclipse => "ECLIPSE",
        };
        f.write_str(s)
    }
}

impl FromStr for Face {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "atk" | "a" => Ok(Face::Atk),
            "hex" | "h" => Ok(Face::Hex),
            "ward" | "w" => Ok(Face::Ward),
            "eclipse" | "e" => Ok(Face::Eclipse),
            other => Err(format!("unknown face '{}'", other)),
        }
    }
}

/// A delayed flip armed by a Hex on an enemy tile.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CurseMark {
    /// Player who cast the curse (and receives the tile if it fires)
    pub by: PlayerId,
    /// Turn serial at which the curse becomes due
    pub trigger_at: u32,
}

/// A tile occupying one board cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub owner: PlayerId,
    pub kind: Face,
    pub shields: u8,
    pub curse: Option<CurseMark>,
}

impl Tile {
    pub fn new(owner: PlayerId, kind: Face) -> Self {
        Self {
            owner,
            kind,
            shields: 0,
            curse: None,
        }
    }

    pub fn is_shielded(&self) -> bool {
        self.shields > 0
    }

    /// Ward blessing: one more shield, and any curse is lifted.
    pub fn bless(&mut self) {
        self.shields = self.shields.saturating_add(1);
        self.curse = None;
    }
}

/// A hidden trap planted by a Hex on an empty cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Trap {
    pub cell: usize,
    pub owner: PlayerId,
}

/// What caused an ownership change.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlipSource {
    Rps,
    Trap,
    Curse,
    Omen,
}

/// A single change of a tile's owner.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Flip {
    pub cell: usize,
    pub from: PlayerId,
    pub to: PlayerId,
    pub source: FlipSource,
}
