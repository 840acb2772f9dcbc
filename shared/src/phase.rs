use std::fmt;

use serde::{Deserialize, Deserializer};

/// Game-flow phase reported by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FlowPhase {
    #[default]
    None,
    Lobby,
    Matchmaking,
    ReadyCheck,
    ChampSelect,
    InProgress,
    PreEndOfGame,
    EndOfGame,
    /// Any phase the engine does not act on.
    Other(String),
}

impl FlowPhase {
    pub fn as_str(&self) -> &str {
        match self {
            FlowPhase::None => "None",
            FlowPhase::Lobby => "Lobby",
            FlowPhase::Matchmaking => "Matchmaking",
            FlowPhase::ReadyCheck => "ReadyCheck",
            FlowPhase::ChampSelect => "ChampSelect",
            FlowPhase::InProgress => "InProgress",
            FlowPhase::PreEndOfGame => "PreEndOfGame",
            FlowPhase::EndOfGame => "EndOfGame",
            FlowPhase::Other(name) => name,
        }
    }
}

impl From<&str> for FlowPhase {
    fn from(value: &str) -> Self {
        match value {
            "None" => Self::None,
            "Lobby" => Self::Lobby,
            "Matchmaking" => Self::Matchmaking,
            "ReadyCheck" => Self::ReadyCheck,
            "ChampSelect" => Self::ChampSelect,
            "InProgress" => Self::InProgress,
            "PreEndOfGame" => Self::PreEndOfGame,
            "EndOfGame" => Self::EndOfGame,
            other => Self::Other(other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for FlowPhase {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(FlowPhase::from(raw.as_str()))
    }
}

impl fmt::Display for FlowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_opaque_phases() {
        assert_eq!(FlowPhase::from("ChampSelect"), FlowPhase::ChampSelect);
        assert_eq!(
            FlowPhase::from("WaitingForStats"),
            FlowPhase::Other("WaitingForStats".into())
        );

        let phase: FlowPhase = serde_json::from_str("\"ReadyCheck\"").unwrap();
        assert_eq!(phase, FlowPhase::ReadyCheck);
        assert_eq!(FlowPhase::Other("Reconnect".into()).to_string(), "Reconnect");
    }
}
