use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Web,
    Mobile,
    Ai,
    GameDev,
    DevOps,
    DataScience,
    Blockchain,
    UiUx,
    Cybersecurity,
    ECommerce,
    OpenSource,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Web,
        Category::Mobile,
        Category::Ai,
        Category::GameDev,
        Category::DevOps,
        Category::DataScience,
        Category::Blockchain,
        Category::UiUx,
        Category::Cybersecurity,
        Category::ECommerce,
        Category::OpenSource,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Web => "Web",
            Category::Mobile => "Mobile",
            Category::Ai => "AI",
            Category::GameDev => "Game Dev",
            Category::DevOps => "DevOps",
            Category::DataScience => "Data Science",
            Category::Blockchain => "Blockchain",
            Category::UiUx => "UI/UX",
            Category::Cybersecurity => "Cybersecurity",
            Category::ECommerce => "E-commerce",
            Category::OpenSource => "Open Source",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.label() == wanted)
            .ok_or_else(|| DomainError::ValidationError(format!("Unknown category: {}", wanted)))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
