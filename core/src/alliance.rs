//! Alliance identification for large-scale duties.
//!
//! A duty groups players into up to six labeled parties (A through F). The
//! game only exposes the labels of the *other* parties, so the local party's
//! letter is deduced by elimination: whichever letter is missing from the
//! observed set.

use serde::{Deserialize, Serialize};

/// One of the six possible alliance parties, or `None` when the player is
/// untracked (solo content, unresolved labels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Alliance {
    #[default]
    None,
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Alliance {
    /// Parse a party label string as the game renders it ("Alliance A").
    /// Anything else, including an unpopulated label, maps to `None`.
    pub fn from_label(label: &str) -> Alliance {
        match label {
            "Alliance A" => Alliance::A,
            "Alliance B" => Alliance::B,
            "Alliance C" => Alliance::C,
            "Alliance D" => Alliance::D,
            "Alliance E" => Alliance::E,
            "Alliance F" => Alliance::F,
            _ => Alliance::None,
        }
    }
}

impl std::fmt::Display for Alliance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            Alliance::None => "None",
            Alliance::A => "A",
            Alliance::B => "B",
            Alliance::C => "C",
            Alliance::D => "D",
            Alliance::E => "E",
            Alliance::F => "F",
        };
        f.write_str(letter)
    }
}

/// How many parties the current duty splits players into besides nothing at
/// all: none (light/full party content), three parties of eight, or six
/// parties of four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AllianceSize {
    #[default]
    None,
    ThreeParty,
    SixParty,
}

impl AllianceSize {
    /// Decode the group manager's raw alliance flags byte.
    pub fn from_flags(flags: u8) -> AllianceSize {
        match flags {
            1 => AllianceSize::ThreeParty,
            3 => AllianceSize::SixParty,
            _ => AllianceSize::None,
        }
    }

    /// Number of alliance-list slots each party occupies.
    pub fn slots_per_party(&self) -> usize {
        match self {
            AllianceSize::None => 0,
            AllianceSize::ThreeParty => 8,
            AllianceSize::SixParty => 4,
        }
    }
}

/// Deduce the local party's letter from the other parties' observed labels.
///
/// Three-party duties expose two other labels, six-party duties five. Any
/// combination outside the expected patterns (duplicates, gaps, unparsed
/// labels) resolves to `Alliance::None` rather than guessing.
pub fn deduce_party_alliance(size: AllianceSize, others: &[Alliance; 5]) -> Alliance {
    type A = Alliance;

    match size {
        AllianceSize::ThreeParty => match (others[0], others[1]) {
            (A::A, A::B) => A::C,
            (A::A, A::C) => A::B,
            (A::B, A::C) => A::A,
            (_, _) => A::None,
        },
        AllianceSize::SixParty => {
            match (others[0], others[1], others[2], others[3], others[4]) {
                (A::A, A::B, A::C, A::D, A::E) => A::F,
                (A::A, A::B, A::C, A::D, A::F) => A::E,
                (A::A, A::B, A::C, A::E, A::F) => A::D,
                (A::A, A::B, A::D, A::E, A::F) => A::C,
                (A::A, A::C, A::D, A::E, A::F) => A::B,
                (A::B, A::C, A::D, A::E, A::F) => A::A,
                (_, _, _, _, _) => A::None,
            }
        }
        AllianceSize::None => A::None,
    }
}

/// Which alliance a member of the alliance list belongs to, given its slot
/// index. Slot spacing depends on the duty's party layout.
pub fn alliance_for_slot(size: AllianceSize, index: usize, others: &[Alliance; 5]) -> Alliance {
    match size {
        AllianceSize::None => Alliance::None,
        AllianceSize::ThreeParty => match index / 8 {
            0 => others[0],
            1 => others[1],
            _ => Alliance::None,
        },
        AllianceSize::SixParty => match index / 4 {
            0 => others[0],
            1 => others[1],
            2 => others[2],
            3 => others[3],
            4 => others[4],
            _ => Alliance::None,
        },
    }
}
