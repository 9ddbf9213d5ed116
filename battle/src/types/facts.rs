//! Per-decision battle snapshot consulted by the legality engine

use pokeact_protocol::{BattleRequest, ParseError, SidePokemon};

/// Move id the server sends while the active pokemon must recharge
pub const RECHARGE: &str = "recharge";

/// Move id the server sends when no other move can be selected
pub const STRUGGLE: &str = "struggle";

/// A member of the player's party
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartySlot {
    /// Species name as reported (may be an alternate forme, e.g. "Minior-Red")
    pub species: String,

    /// Whether this pokemon has fainted
    pub fainted: bool,

    /// Whether this pokemon is the active combatant
    pub active: bool,
}

impl PartySlot {
    /// A healthy, benched party member
    pub fn new(species: impl Into<String>) -> Self {
        Self {
            species: species.into(),
            fainted: false,
            active: false,
        }
    }

    fn from_side(pokemon: &SidePokemon) -> Self {
        Self {
            species: pokemon.species().to_string(),
            fainted: pokemon.is_fainted(),
            active: pokemon.active,
        }
    }
}

/// A move known by the active pokemon
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveSlot {
    /// Move ID (lowercase, no spaces)
    pub id: String,

    /// Remaining PP
    pub pp: u32,

    /// Whether the server reports this move as disabled
    pub disabled: bool,

    /// Listed without pp: the pokemon is committed to this move
    pub locked: bool,
}

impl MoveSlot {
    pub fn new(id: impl Into<String>, pp: u32) -> Self {
        Self {
            id: id.into(),
            pp,
            disabled: false,
            locked: false,
        }
    }

    /// A move the pokemon is locked into (e.g. Outrage), as sent without pp
    pub fn locked(id: impl Into<String>) -> Self {
        Self {
            locked: true,
            ..Self::new(id, 0)
        }
    }

    /// Whether this is the recharge turn placeholder
    pub fn is_recharge(&self) -> bool {
        self.id == RECHARGE
    }

    /// Whether this is a no-choice attack: recharge, struggle, or a move
    /// the server listed without pp
    pub fn is_locked(&self) -> bool {
        self.locked || self.id == RECHARGE || self.id == STRUGGLE
    }

    /// Whether the move can be selected on a normal turn
    pub fn is_usable(&self) -> bool {
        (self.pp > 0 || self.locked) && !self.disabled
    }
}

/// Read-only facts about our side at a decision point
///
/// Built fresh from the authoritative request every turn; nothing here is
/// carried over between decisions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleFacts {
    /// Party in team listing order (switch slots index into this)
    pub team: Vec<PartySlot>,

    /// Active pokemon's move listing as reported (move slots index into this)
    pub moves: Vec<MoveSlot>,

    /// Party members the server currently reports as switch targets
    pub available_switches: Vec<PartySlot>,

    /// Whether an active pokemon has been resolved yet
    pub has_active: bool,

    /// Whether the server demands a switch this decision
    pub force_switch: bool,

    /// Whether the active pokemon is (or may be) trapped
    pub trapped: bool,

    /// Whether the active pokemon must spend this turn recharging
    pub must_recharge: bool,

    /// Whether a fainted party member is waiting to be revived
    pub reviving: bool,
}

impl BattleFacts {
    /// Build facts from a Showdown `|request|`
    pub fn from_request(request: &BattleRequest) -> Result<Self, ParseError> {
        let side = request
            .side
            .as_ref()
            .ok_or_else(|| ParseError::MissingField("side".to_string()))?;

        let team: Vec<PartySlot> = side.pokemon.iter().map(PartySlot::from_side).collect();

        let active = request.active_pokemon();
        let moves: Vec<MoveSlot> = active
            .map(|a| {
                a.moves
                    .iter()
                    .map(|m| MoveSlot {
                        id: m.id.clone(),
                        pp: m.pp.unwrap_or(0),
                        disabled: m.disabled,
                        locked: m.is_locked(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let must_recharge = moves.len() == 1 && moves[0].is_recharge();

        Ok(Self {
            has_active: team.iter().any(|p| p.active) || active.is_some(),
            available_switches: request
                .available_switches()
                .into_iter()
                .map(PartySlot::from_side)
                .collect(),
            force_switch: request.is_force_switch(),
            trapped: active.is_some_and(|a| !a.can_switch()),
            must_recharge,
            reviving: side.pokemon.iter().any(|p| p.reviving),
            team,
            moves,
        })
    }

    /// Index of the active pokemon in the team, if any
    pub fn active_index(&self) -> Option<usize> {
        self.team.iter().position(|p| p.active)
    }

    /// The only available move is a locked-in attack
    pub fn struggle_only(&self) -> bool {
        self.moves.len() == 1 && self.moves[0].is_locked()
    }

    /// The move that must be used this turn, with its slot, when the
    /// battle leaves no choice
    pub fn forced_move(&self) -> Option<(usize, &MoveSlot)> {
        if self.must_recharge {
            let slot = self
                .moves
                .iter()
                .position(MoveSlot::is_recharge)
                .unwrap_or(0);
            return self.moves.get(slot).map(|m| (slot, m));
        }
        if self.struggle_only() {
            return Some((0, &self.moves[0]));
        }
        None
    }

    /// First fainted party member in team order, while reviving
    pub fn revival_target(&self) -> Option<(usize, &PartySlot)> {
        if !self.reviving {
            return None;
        }
        self.team.iter().enumerate().find(|(_, p)| p.fainted)
    }

    /// Whether the facts report any usable move or switch at all
    pub fn has_options(&self) -> bool {
        self.forced_move().is_some()
            || self.moves.iter().any(MoveSlot::is_usable)
            || self.team.iter().any(|p| !p.fainted && !p.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_request() {
        let request = BattleRequest::parse(&json!({
            "rqid": 9,
            "active": [{
                "moves": [
                    {"move": "Tackle", "id": "tackle", "pp": 0, "maxpp": 56},
                    {"move": "Growl", "id": "growl", "pp": 10, "maxpp": 64},
                    {"move": "Ember", "id": "ember", "pp": 5, "maxpp": 40, "disabled": true}
                ],
                "trapped": true
            }],
            "side": {
                "name": "Ash",
                "id": "p1",
                "pokemon": [
                    {"ident": "p1: Charmander", "details": "Charmander, L84, M", "condition": "120/200", "active": true},
                    {"ident": "p1: Minior", "details": "Minior-Red, L80", "condition": "250/250"},
                    {"ident": "p1: Pidgey", "details": "Pidgey, L90, F", "condition": "0 fnt"}
                ]
            }
        }))
        .unwrap();

        let facts = BattleFacts::from_request(&request).unwrap();

        assert!(facts.has_active);
        assert!(facts.trapped);
        assert!(!facts.force_switch);
        assert!(!facts.must_recharge);
        assert!(!facts.reviving);
        assert_eq!(facts.team.len(), 3);
        assert_eq!(facts.active_index(), Some(0));
        assert_eq!(facts.team[1].species, "Minior-Red");
        assert!(facts.team[2].fainted);
        assert_eq!(
            facts.moves[2],
            MoveSlot { id: "ember".into(), pp: 5, disabled: true, locked: false }
        );
        assert_eq!(facts.available_switches, vec![PartySlot::new("Minior-Red")]);
    }

    #[test]
    fn test_from_request_recharge() {
        let request = BattleRequest::parse(&json!({
            "active": [{"moves": [{"move": "Recharge", "id": "recharge"}]}],
            "side": {"name": "Ash", "id": "p1", "pokemon": [
                {"ident": "p1: Snorlax", "details": "Snorlax", "condition": "300/400", "active": true}
            ]}
        }))
        .unwrap();

        let facts = BattleFacts::from_request(&request).unwrap();

        assert!(facts.must_recharge);
        assert!(facts.struggle_only());
        assert_eq!(facts.forced_move().map(|(slot, m)| (slot, m.id.as_str())), Some((0, RECHARGE)));
    }

    #[test]
    fn test_from_request_locked_move() {
        let request = BattleRequest::parse(&json!({
            "active": [{"moves": [{"move": "Outrage", "id": "outrage"}], "trapped": true}],
            "side": {"name": "Ash", "id": "p1", "pokemon": [
                {"ident": "p1: Dragonite", "details": "Dragonite, L74, M", "condition": "180/290", "active": true},
                {"ident": "p1: Lapras", "details": "Lapras, L85, F", "condition": "300/300"}
            ]}
        }))
        .unwrap();

        let facts = BattleFacts::from_request(&request).unwrap();

        assert!(!facts.must_recharge);
        assert!(facts.trapped);
        assert_eq!(facts.moves, vec![MoveSlot::locked("outrage")]);
        assert!(facts.struggle_only());
        assert_eq!(facts.forced_move().map(|(slot, m)| (slot, m.id.as_str())), Some((0, "outrage")));
    }

    #[test]
    fn test_from_request_reviving() {
        let request = BattleRequest::parse(&json!({
            "forceSwitch": [true],
            "side": {"name": "Ash", "id": "p1", "pokemon": [
                {"ident": "p1: Pawmot", "details": "Pawmot", "condition": "200/250", "active": true, "reviving": true},
                {"ident": "p1: Eevee", "details": "Eevee", "condition": "0 fnt"}
            ]}
        }))
        .unwrap();

        let facts = BattleFacts::from_request(&request).unwrap();

        assert!(facts.reviving);
        assert!(facts.force_switch);
        assert_eq!(facts.revival_target().map(|(i, p)| (i, p.species.as_str())), Some((1, "Eevee")));
    }

    #[test]
    fn test_from_request_without_side() {
        let request = BattleRequest::parse(&json!({"wait": true})).unwrap();

        assert!(BattleFacts::from_request(&request).is_err());
    }

    #[test]
    fn test_forced_move_prefers_recharge_entry() {
        let facts = BattleFacts {
            must_recharge: true,
            moves: vec![MoveSlot::new("hyperbeam", 3), MoveSlot::new(RECHARGE, 0)],
            ..Default::default()
        };

        let (slot, forced) = facts.forced_move().unwrap();
        assert_eq!(slot, 1);
        assert!(forced.is_recharge());
    }

    #[test]
    fn test_struggle_only() {
        let facts = BattleFacts {
            moves: vec![MoveSlot::new(STRUGGLE, 0)],
            ..Default::default()
        };

        assert!(facts.struggle_only());
        assert!(facts.has_options());
        assert!(!BattleFacts::default().has_options());
    }
}
