use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{SPEED_WINDOW_DEFAULT, SPEED_WINDOW_EXPLORER};

/// Play-style profile picked once at the start of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Builder,
    Explorer,
    Scholar,
}

impl Persona {
    pub const ALL: [Self; 3] = [Self::Builder, Self::Explorer, Self::Scholar];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Builder => "builder",
            Self::Explorer => "explorer",
            Self::Scholar => "scholar",
        }
    }

    #[must_use]
    pub const fn profile(self) -> &'static PersonaProfile {
        match self {
            Self::Builder => &BUILDER,
            Self::Explorer => &EXPLORER,
            Self::Scholar => &SCHOLAR,
        }
    }

    /// Builder's tools: asking for hints never costs points.
    #[must_use]
    pub const fn hint_penalty_exempt(self) -> bool {
        matches!(self, Self::Builder)
    }

    /// Scholar's wisdom: the first miss on a problem is shielded.
    #[must_use]
    pub const fn shields_first_miss(self) -> bool {
        matches!(self, Self::Scholar)
    }

    /// Seconds within which a correct answer earns the speed bonus.
    #[must_use]
    pub const fn speed_window(self) -> u32 {
        match self {
            Self::Explorer => SPEED_WINDOW_EXPLORER,
            Self::Builder | Self::Scholar => SPEED_WINDOW_DEFAULT,
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Persona {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "builder" => Ok(Self::Builder),
            "explorer" => Ok(Self::Explorer),
            "scholar" => Ok(Self::Scholar),
            _ => Err(()),
        }
    }
}

impl From<Persona> for String {
    fn from(value: Persona) -> Self {
        value.as_str().to_string()
    }
}

/// Display metadata for the hero selection screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonaProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub power: &'static str,
    pub desc: &'static str,
}

const BUILDER: PersonaProfile = PersonaProfile {
    id: "builder",
    name: "Builder",
    power: "Tools",
    desc: "Problems about construction, materials and workers.",
};

const EXPLORER: PersonaProfile = PersonaProfile {
    id: "explorer",
    name: "Explorer",
    power: "Swift Boots",
    desc: "Problems about maps, journeys and fuel.",
};

const SCHOLAR: PersonaProfile = PersonaProfile {
    id: "scholar",
    name: "Scholar",
    power: "Wisdom",
    desc: "Problems about experiments, tables and logic.",
};

/// Speed window for an optional persona; sessions without a hero use the default.
#[must_use]
pub fn speed_window_for(persona: Option<Persona>) -> u32 {
    persona.map_or(SPEED_WINDOW_DEFAULT, Persona::speed_window)
}
