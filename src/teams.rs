use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Conference
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Conference {
    East,
    West,
}

impl std::fmt::Display for Conference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Conference::East => write!(f, "east"),
            Conference::West => write!(f, "west"),
        }
    }
}

impl std::str::FromStr for Conference {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "east" => Ok(Conference::East),
            "west" => Ok(Conference::West),
            _ => Err(format!("unknown conference: {s}")),
        }
    }
}

// ---------------------------------------------------------------------------
// TeamInfo / Registry
// ---------------------------------------------------------------------------

/// Display metadata for one team. Colors are the team's primary and outline
/// hex colors, picked for visibility in the rendered charts.
#[derive(Debug, Clone)]
pub struct TeamInfo {
    pub name: &'static str,
    pub color: &'static str,
    pub color2: &'static str,
    pub conference: Conference,
}

/// Immutable team table, built once at process start. Iteration order is the
/// table's declaration order (East block first), which is also the stable
/// tie-break order the aggregators use.
pub struct Registry {
    teams: Vec<(&'static str, TeamInfo)>,
    index: HashMap<&'static str, usize>,
}

macro_rules! team {
    ($id:literal, $name:literal, $color:literal, $color2:literal, $conf:expr) => {
        (
            $id,
            TeamInfo { name: $name, color: $color, color2: $color2, conference: $conf },
        )
    };
}

impl Registry {
    pub fn new() -> Self {
        use Conference::{East, West};
        let teams = vec![
            // Eastern Conference
            team!("atl", "Hawks", "#E03A3E", "#C1D32F", East),
            team!("bos", "Celtics", "#007A33", "#BA9653", East),
            team!("bkn", "Nets", "#000000", "#A1A1A4", East),
            team!("cha", "Hornets", "#1D1160", "#00788C", East),
            team!("chi", "Bulls", "#CE1141", "#000000", East),
            team!("cle", "Cavaliers", "#FFB81C", "#6F263D", East),
            team!("det", "Pistons", "#C8102E", "#1D42BA", East),
            team!("ind", "Pacers", "#FDBB30", "#002D62", East),
            team!("mia", "Heat", "#98002E", "#000000", East),
            team!("mil", "Bucks", "#00471B", "#552582", East),
            team!("ny", "Knicks", "#F58426", "#006BB6", East),
            team!("orl", "Magic", "#0077C0", "#C4CED4", East),
            team!("phi", "76ers", "#006BB6", "#ED174C", East),
            team!("tor", "Raptors", "#CE1141", "#5D2E8C", East),
            team!("wsh", "Wizards", "#002B5C", "#E31837", East),
            // Western Conference
            team!("dal", "Mavericks", "#B8C4CA", "#00538C", West),
            team!("den", "Nuggets", "#0E2240", "#FEC524", West),
            team!("gs", "Warriors", "#FFC72C", "#1D428A", West),
            team!("hou", "Rockets", "#CE1141", "#C4CED4", West),
            team!("lac", "Clippers", "#C8102E", "#1D428A", West),
            team!("lal", "Lakers", "#FDB927", "#552583", West),
            team!("mem", "Grizzlies", "#5D76A9", "#12173F", West),
            team!("min", "Wolves", "#236192", "#0C2340", West),
            team!("no", "Pelicans", "#0C2340", "#85714D", West),
            team!("okc", "Thunder", "#007AC1", "#EF3B24", West),
            team!("phx", "Suns", "#E56020", "#1D1160", West),
            team!("por", "Blazers", "#000000", "#E03A3E", West),
            team!("sac", "Kings", "#5A2D81", "#63727A", West),
            team!("sa", "Spurs", "#C4CED4", "#000000", West),
            team!("utah", "Jazz", "#00471B", "#F9A01B", West),
        ];
        let index = teams
            .iter()
            .enumerate()
            .map(|(i, (id, _))| (*id, i))
            .collect();
        Self { teams, index }
    }

    pub fn get(&self, id: &str) -> Option<&TeamInfo> {
        self.index.get(id).map(|&i| &self.teams[i].1)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All teams in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &TeamInfo)> {
        self.teams.iter().map(|(id, info)| (*id, info))
    }

    /// Team ids of one conference, in declaration order.
    pub fn conference_teams(&self, conference: Conference) -> Vec<&'static str> {
        self.teams
            .iter()
            .filter(|(_, info)| info.conference == conference)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirty_teams_split_evenly() {
        let registry = Registry::new();
        assert_eq!(registry.len(), 30);
        assert_eq!(registry.conference_teams(Conference::East).len(), 15);
        assert_eq!(registry.conference_teams(Conference::West).len(), 15);
    }

    #[test]
    fn lookup_resolves_known_and_rejects_unknown() {
        let registry = Registry::new();
        assert_eq!(registry.get("mem").unwrap().name, "Grizzlies");
        assert_eq!(registry.get("mem").unwrap().conference, Conference::West);
        assert!(registry.get("sea").is_none());
    }

    #[test]
    fn iteration_order_is_declaration_order() {
        let registry = Registry::new();
        let first: Vec<&str> = registry.iter().take(2).map(|(id, _)| id).collect();
        assert_eq!(first, vec!["atl", "bos"]);
    }
}
