use serde::{Deserialize, Serialize};

/// The closed set of entity kinds that can be spawned.
///
/// Configuration files spell these in SCREAMING_SNAKE_CASE (`ZOMBIE`,
/// `SKELETON`, ...); an unknown name is rejected when the configuration is
/// loaded, never at spawn time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    Zombie,
    Skeleton,
    Spider,
    Creeper,
    Enderman,
    Witch,
    Slime,
    Blaze,
}

impl EntityKind {
    /// Configuration spelling of this kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Zombie => "ZOMBIE",
            Self::Skeleton => "SKELETON",
            Self::Spider => "SPIDER",
            Self::Creeper => "CREEPER",
            Self::Enderman => "ENDERMAN",
            Self::Witch => "WITCH",
            Self::Slime => "SLIME",
            Self::Blaze => "BLAZE",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error produced when parsing a name outside the closed kind set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity kind `{0}`")]
pub struct UnknownKind(pub String);

impl std::str::FromStr for EntityKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ZOMBIE" => Ok(Self::Zombie),
            "SKELETON" => Ok(Self::Skeleton),
            "SPIDER" => Ok(Self::Spider),
            "CREEPER" => Ok(Self::Creeper),
            "ENDERMAN" => Ok(Self::Enderman),
            "WITCH" => Ok(Self::Witch),
            "SLIME" => Ok(Self::Slime),
            "BLAZE" => Ok(Self::Blaze),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parse_known_kinds() {
        assert_eq!(EntityKind::from_str("ZOMBIE").unwrap(), EntityKind::Zombie);
        assert_eq!(EntityKind::from_str("BLAZE").unwrap(), EntityKind::Blaze);
    }

    #[test]
    fn parse_rejects_unknown_kind() {
        let err = EntityKind::from_str("PHOENIX").unwrap_err();
        assert_eq!(err, UnknownKind("PHOENIX".to_string()));
        assert!(err.to_string().contains("PHOENIX"));
    }

    #[test]
    fn display_round_trips_through_parse() {
        let kind = EntityKind::Skeleton;
        assert_eq!(EntityKind::from_str(&kind.to_string()).unwrap(), kind);
    }
}
