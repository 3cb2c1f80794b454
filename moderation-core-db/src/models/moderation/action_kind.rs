use heapless::String as HeaplessString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// # Documentation
/// - Kind tag of a moderation log entry.
/// - Open-ended: tags the engine does not know are preserved as `Other`.
/// - Two values carry engine semantics: `ActiveBanBolo` is the pending
///   auto-flag created on a repeat-offense crossing and `Ban` is the
///   terminal kind it completes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    Note,
    Warning,
    Ban,
    ActiveBanBolo,
    Other(HeaplessString<48>),
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::Note => write!(f, "Note"),
            ActionKind::Warning => write!(f, "Warning"),
            ActionKind::Ban => write!(f, "Ban"),
            ActionKind::ActiveBanBolo => write!(f, "Active Ban Bolo"),
            ActionKind::Other(tag) => write!(f, "{tag}"),
        }
    }
}

impl FromStr for ActionKind {
    type Err = ();

    /// Never fails: unknown tags become `Other`, truncated to the bounded
    /// tag length.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Note" => ActionKind::Note,
            "Warning" => ActionKind::Warning,
            "Ban" => ActionKind::Ban,
            "Active Ban Bolo" => ActionKind::ActiveBanBolo,
            other => ActionKind::Other(crate::utils::bounded(other)),
        })
    }
}

impl Serialize for ActionKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ActionKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        ActionKind::from_str(&value)
            .map_err(|_| serde::de::Error::custom(format!("Invalid ActionKind: {value}")))
    }
}
