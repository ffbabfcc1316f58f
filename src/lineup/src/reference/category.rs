//! Equipment categories

use serde::{Deserialize, Serialize};

use super::{normalize_name, ParseError};

/// Number of slots in a lineup (one per category)
pub const CATEGORY_COUNT: usize = 7;

/// Equipment category; each contributes exactly one lineup slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Character,
    Racket,
    Grip,
    Shoe,
    Wristband,
    Nutrition,
    Workout,
}

impl Category {
    /// All categories in lineup slot order
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Character,
        Category::Racket,
        Category::Grip,
        Category::Shoe,
        Category::Wristband,
        Category::Nutrition,
        Category::Workout,
    ];

    /// Slot position of this category within a lineup
    pub fn slot(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Character => "Character",
            Category::Racket => "Racket",
            Category::Grip => "Grip",
            Category::Shoe => "Shoe",
            Category::Wristband => "Wristband",
            Category::Nutrition => "Nutrition",
            Category::Workout => "Workout",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

impl std::str::FromStr for Category {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_name(s);
        // Plurals are accepted since that is how the screens label them
        let key = key.strip_suffix('s').unwrap_or(&key);
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(key))
            .ok_or_else(|| ParseError::UnknownCategory(s.to_string()))
    }
}

/// Character sub-type. Only used for browsing, never for scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterKind {
    Legends,
    Champions,
}

impl std::fmt::Display for CharacterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Legends => write!(f, "Legends"),
            Self::Champions => write!(f, "Champions"),
        }
    }
}

impl std::str::FromStr for CharacterKind {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "legends" | "legend" => Ok(Self::Legends),
            "champions" | "champion" => Ok(Self::Champions),
            _ => Err(ParseError::UnknownCharacterKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_order() {
        assert_eq!(Category::Character.slot(), 0);
        assert_eq!(Category::Workout.slot(), 6);
        for (i, c) in Category::ALL.iter().enumerate() {
            assert_eq!(c.slot(), i);
        }
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("racket".parse::<Category>(), Ok(Category::Racket));
        assert_eq!("Rackets".parse::<Category>(), Ok(Category::Racket));
        assert_eq!("WRISTBAND".parse::<Category>(), Ok(Category::Wristband));
        assert_eq!("shoes".parse::<Category>(), Ok(Category::Shoe));
        assert!("hat".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_deserialize_matches_table_names() {
        let c: Category = serde_json::from_str("\"Nutrition\"").unwrap();
        assert_eq!(c, Category::Nutrition);
    }

    #[test]
    fn test_character_kind_from_str() {
        assert_eq!("legends".parse::<CharacterKind>(), Ok(CharacterKind::Legends));
        assert_eq!("Champion".parse::<CharacterKind>(), Ok(CharacterKind::Champions));
        assert!("heroes".parse::<CharacterKind>().is_err());
    }
}
