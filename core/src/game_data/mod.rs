//! Static territory data
//!
//! Maps territory ids to place names and intended-use classification. The
//! intended use drives both trackability (is this instanced content worth
//! recording) and the alliance layout of the duty.

use phf::phf_map;

use crate::alliance::AllianceSize;

/// The game's intended-use classification for a territory.
///
/// Values follow the client's own numbering; only a subset matters for
/// tracking, the rest exist so unknown content classifies instead of erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerritoryUse {
    Unknown,
    Overworld,
    InnRoom,
    Dungeon,
    VariantDungeon,
    AllianceRaid,
    Trial,
    HousingWard,
    Raid1,
    Raid2,
    AlliancePvp,
    MsqSoloDuty,
    DeepDungeon,
    MapPortal,
    HolidayDuty,
    CrystallineConflict,
    RivalWings,
    Eureka,
    MaskedCarnivale,
    OceanFishing,
    Bozja,
    DelubrumReginae,
    DelubrumReginaeSavage,
    CriterionDungeon,
    CriterionDungeonSavage,
}

impl TerritoryUse {
    /// Decode the sheet's raw intended-use byte.
    pub fn from_id(id: u8) -> TerritoryUse {
        match id {
            1 | 9 => TerritoryUse::Overworld,
            2 => TerritoryUse::InnRoom,
            3 => TerritoryUse::Dungeon,
            4 => TerritoryUse::VariantDungeon,
            8 => TerritoryUse::AllianceRaid,
            10 => TerritoryUse::Trial,
            13 => TerritoryUse::HousingWard,
            16 => TerritoryUse::Raid1,
            17 => TerritoryUse::Raid2,
            18 => TerritoryUse::AlliancePvp,
            28 | 37 => TerritoryUse::CrystallineConflict,
            29 => TerritoryUse::MsqSoloDuty,
            31 => TerritoryUse::DeepDungeon,
            33 => TerritoryUse::MapPortal,
            34 => TerritoryUse::HolidayDuty,
            39 => TerritoryUse::RivalWings,
            41 => TerritoryUse::Eureka,
            45 => TerritoryUse::MaskedCarnivale,
            46 => TerritoryUse::OceanFishing,
            48 => TerritoryUse::Bozja,
            52 => TerritoryUse::DelubrumReginae,
            53 => TerritoryUse::DelubrumReginaeSavage,
            57 => TerritoryUse::CriterionDungeon,
            58 => TerritoryUse::CriterionDungeonSavage,
            _ => TerritoryUse::Unknown,
        }
    }

    /// Whether duties in this territory should be recorded at all.
    pub fn should_track(&self) -> bool {
        matches!(
            self,
            TerritoryUse::Dungeon
                | TerritoryUse::VariantDungeon
                | TerritoryUse::AllianceRaid
                | TerritoryUse::Trial
                | TerritoryUse::Raid1
                | TerritoryUse::Raid2
                | TerritoryUse::AlliancePvp
                | TerritoryUse::CrystallineConflict
                | TerritoryUse::DeepDungeon
                | TerritoryUse::MapPortal
                | TerritoryUse::HolidayDuty
                | TerritoryUse::RivalWings
                | TerritoryUse::Eureka
                | TerritoryUse::MaskedCarnivale
                | TerritoryUse::Bozja
                | TerritoryUse::DelubrumReginae
                | TerritoryUse::DelubrumReginaeSavage
                | TerritoryUse::CriterionDungeon
                | TerritoryUse::CriterionDungeonSavage
        )
    }

    /// Whether this content splits players into labeled alliance parties.
    pub fn has_alliance(&self) -> bool {
        matches!(
            self,
            TerritoryUse::AllianceRaid | TerritoryUse::AlliancePvp | TerritoryUse::RivalWings
        )
    }

    /// Alliance layout for duties in this territory. Fixed for the lifetime of
    /// a duty; recorded on the duty at creation.
    pub fn alliance_size(&self) -> AllianceSize {
        match self {
            TerritoryUse::AllianceRaid => AllianceSize::ThreeParty,
            TerritoryUse::AlliancePvp | TerritoryUse::RivalWings => AllianceSize::SixParty,
            _ => AllianceSize::None,
        }
    }
}

/// A resolved territory: the opaque id plus the display and classification
/// data the tracker needs from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Territory {
    pub id: u16,
    pub place_name: String,
    pub intended_use: TerritoryUse,
}

impl Territory {
    pub fn new(id: u16, place_name: impl Into<String>, intended_use: TerritoryUse) -> Self {
        Self {
            id,
            place_name: place_name.into(),
            intended_use,
        }
    }
}

struct TerritoryDef {
    place_name: &'static str,
    use_id: u8,
}

/// Map of territory id -> place name and intended-use byte.
static TERRITORY_DATA: phf::Map<u16, TerritoryDef> = phf_map! {
    // Overworld / city zones (never tracked)
    129u16 => TerritoryDef { place_name: "Limsa Lominsa Lower Decks", use_id: 1 },
    132u16 => TerritoryDef { place_name: "New Gridania", use_id: 1 },
    // Dungeons
    837u16 => TerritoryDef { place_name: "Holminster Switch", use_id: 3 },
    1036u16 => TerritoryDef { place_name: "Sastasha", use_id: 3 },
    1059u16 => TerritoryDef { place_name: "The Tower of Zot", use_id: 3 },
    // Trials
    845u16 => TerritoryDef { place_name: "The Dancing Plague", use_id: 10 },
    // Raids
    849u16 => TerritoryDef { place_name: "Eden's Gate: Resurrection", use_id: 16 },
    // Alliance raids
    174u16 => TerritoryDef { place_name: "Labyrinth of the Ancients", use_id: 8 },
    372u16 => TerritoryDef { place_name: "Syrcus Tower", use_id: 8 },
    734u16 => TerritoryDef { place_name: "The Royal City of Rabanastre", use_id: 8 },
    776u16 => TerritoryDef { place_name: "The Ridorana Lighthouse", use_id: 8 },
    826u16 => TerritoryDef { place_name: "The Orbonne Monastery", use_id: 8 },
    827u16 => TerritoryDef { place_name: "The Copied Factory", use_id: 8 },
    917u16 => TerritoryDef { place_name: "The Puppets' Bunker", use_id: 8 },
    966u16 => TerritoryDef { place_name: "The Tower at Paradigm's Breach", use_id: 8 },
    // Large-scale PvP
    431u16 => TerritoryDef { place_name: "Seal Rock", use_id: 18 },
    619u16 => TerritoryDef { place_name: "Astragalos", use_id: 39 },
    // Field operations
    561u16 => TerritoryDef { place_name: "The Palace of the Dead", use_id: 31 },
    920u16 => TerritoryDef { place_name: "Bozjan Southern Front", use_id: 48 },
};

/// Resolve a territory id against the static table.
pub fn lookup_territory(id: u16) -> Option<Territory> {
    TERRITORY_DATA.get(&id).map(|def| Territory {
        id,
        place_name: def.place_name.to_string(),
        intended_use: TerritoryUse::from_id(def.use_id),
    })
}

/// Iterate the full territory table in id order.
pub fn known_territories() -> Vec<Territory> {
    let mut territories: Vec<Territory> = TERRITORY_DATA
        .entries()
        .map(|(&id, def)| Territory {
            id,
            place_name: def.place_name.to_string(),
            intended_use: TerritoryUse::from_id(def.use_id),
        })
        .collect();
    territories.sort_by_key(|t| t.id);
    territories
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alliance_raids_track_as_three_party() {
        let territory = lookup_territory(827).unwrap();
        assert_eq!(territory.place_name, "The Copied Factory");
        assert_eq!(territory.intended_use, TerritoryUse::AllianceRaid);
        assert!(territory.intended_use.should_track());
        assert!(territory.intended_use.has_alliance());
        assert_eq!(
            territory.intended_use.alliance_size(),
            AllianceSize::ThreeParty,
        );
    }

    #[test]
    fn rival_wings_is_six_party() {
        let territory = lookup_territory(619).unwrap();
        assert_eq!(
            territory.intended_use.alliance_size(),
            AllianceSize::SixParty,
        );
    }

    #[test]
    fn overworld_is_not_tracked() {
        let territory = lookup_territory(129).unwrap();
        assert!(!territory.intended_use.should_track());
        assert_eq!(territory.intended_use.alliance_size(), AllianceSize::None);
    }

    #[test]
    fn unknown_ids_are_absent() {
        assert!(lookup_territory(1).is_none());
    }

    #[test]
    fn unknown_use_byte_classifies_as_unknown() {
        assert_eq!(TerritoryUse::from_id(200), TerritoryUse::Unknown);
        assert!(!TerritoryUse::from_id(200).should_track());
    }
}
