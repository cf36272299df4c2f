use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::{fmt, str::FromStr};

/// A document addressed by `(partition_key, id)` in its collection.
pub trait Record: Serialize + DeserializeOwned {
    fn id(&self) -> &str;
    fn partition_key(&self) -> &str;
}

/// Users are keyed and partitioned by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub pseudo: String,
    pub email: String,
}

impl User {
    pub fn new(pseudo: String, email: String) -> Self {
        Self {
            id: email.clone(),
            pseudo,
            email,
        }
    }
}

impl Record for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn partition_key(&self) -> &str {
        &self.email
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice {
    Oui,
    Non,
}

impl Choice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Choice::Oui => "Oui",
            Choice::Non => "Non",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidChoice;

impl FromStr for Choice {
    type Err = InvalidChoice;

    // Exact match only, "oui" is not a valid choice.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Oui" => Ok(Choice::Oui),
            "Non" => Ok(Choice::Non),
            _ => Err(InvalidChoice),
        }
    }
}

/// One record per `(user, choice)` pair: the id embeds the choice, so a user
/// may hold both an "Oui" and a "Non" vote. Re-voting the same choice
/// overwrites the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: String,
    pub user_id: String,
    pub choice: Choice,
}

impl Vote {
    pub fn new(user_id: String, choice: Choice) -> Self {
        Self {
            id: format!("{user_id}-{choice}"),
            user_id,
            choice,
        }
    }
}

impl Record for Vote {
    fn id(&self) -> &str {
        &self.id
    }

    fn partition_key(&self) -> &str {
        &self.user_id
    }
}

/// A record as returned by the store, carrying the `_ts` write stamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stored<T> {
    #[serde(flatten)]
    pub record: T,
    #[serde(rename = "_ts", default)]
    pub ts: i64,
}
