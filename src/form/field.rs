/// The seven response fields a user can choose to display, and the ordered
/// selection of them that drives rendering.
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A recognized field of the BFHL response.
///
/// Declaration order is render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    IsSuccess,
    UserId,
    Email,
    RollNumber,
    Numbers,
    Alphabets,
    HighestAlphabet,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::IsSuccess,
        Field::UserId,
        Field::Email,
        Field::RollNumber,
        Field::Numbers,
        Field::Alphabets,
        Field::HighestAlphabet,
    ];

    /// Wire name, as used in the response body and in filter selections.
    pub fn name(self) -> &'static str {
        match self {
            Self::IsSuccess => "is_success",
            Self::UserId => "user_id",
            Self::Email => "email",
            Self::RollNumber => "roll_number",
            Self::Numbers => "numbers",
            Self::Alphabets => "alphabets",
            Self::HighestAlphabet => "highest_alphabet",
        }
    }

    /// Human label used in rendered output and in the picker.
    pub fn label(self) -> &'static str {
        match self {
            Self::IsSuccess => "Is Success",
            Self::UserId => "User ID",
            Self::Email => "Email",
            Self::RollNumber => "Roll Number",
            Self::Numbers => "Numbers",
            Self::Alphabets => "Alphabets",
            Self::HighestAlphabet => "Highest Alphabet",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for a filter name outside the recognized set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field '{0}' (expected one of: is_success, user_id, email, roll_number, numbers, alphabets, highest_alphabet)")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Field::ALL
            .into_iter()
            .find(|f| f.name() == needle)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Ordered set of selected fields.
///
/// Keeps the order in which fields were picked (that is the order of the tag
/// list) and never holds the same field twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSelection(Vec<Field>);

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every field, in render order.
    pub fn all() -> Self {
        Field::ALL.into_iter().collect()
    }

    /// Parse a list of wire names. Fails on the first unknown name.
    pub fn parse<I, S>(names: I) -> Result<Self, UnknownField>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|n| n.as_ref().parse::<Field>())
            .collect()
    }

    pub fn insert(&mut self, field: Field) -> bool {
        if self.0.contains(&field) {
            return false;
        }
        self.0.push(field);
        true
    }

    /// Remove the field with the given wire name. Unknown or absent names are
    /// ignored.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|f| f.name() != name);
        self.0.len() != before
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.iter().copied()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(Field::name).collect()
    }
}

impl FromIterator<Field> for FilterSelection {
    fn from_iter<T: IntoIterator<Item = Field>>(iter: T) -> Self {
        let mut selection = Self::new();
        for field in iter {
            selection.insert(field);
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_round_trip_through_from_str() {
        for field in Field::ALL {
            assert_eq!(field.name().parse::<Field>(), Ok(field));
        }
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = "nickname".parse::<Field>().unwrap_err();
        assert_eq!(err, UnknownField("nickname".to_string()));
        assert!(err.to_string().contains("nickname"));
    }

    #[test]
    fn selection_preserves_pick_order_and_dedups() {
        let selection =
            FilterSelection::parse(["email", "numbers", "email", "is_success"]).unwrap();
        assert_eq!(selection.names(), vec!["email", "numbers", "is_success"]);
        assert_eq!(selection.len(), 3);
    }

    #[test]
    fn remove_present_field() {
        let mut selection = FilterSelection::parse(["numbers", "email"]).unwrap();
        assert!(selection.remove("numbers"));
        assert_eq!(selection.names(), vec!["email"]);
    }

    #[test]
    fn remove_absent_or_unknown_is_noop() {
        let mut selection = FilterSelection::parse(["email"]).unwrap();
        assert!(!selection.remove("x"));
        assert!(!selection.remove("numbers"));
        assert_eq!(selection.names(), vec!["email"]);
    }

    #[test]
    fn selection_serializes_as_name_list() {
        let selection = FilterSelection::parse(["alphabets", "user_id"]).unwrap();
        let json = serde_json::to_string(&selection).unwrap();
        assert_eq!(json, r#"["alphabets","user_id"]"#);
    }

    #[test]
    fn all_lists_every_field_in_order() {
        assert_eq!(FilterSelection::all().iter().collect::<Vec<_>>(), Field::ALL);
    }
}
