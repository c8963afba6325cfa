//! Content-hazard flags set by automated analysis or manual tagging.

use serde::{Deserialize, Serialize};

/// One named content-hazard indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentFlag {
    Violence,
    SexualContent,
    Nudity,
    Language,
    DrugUse,
    Gambling,
    Horror,
    Discrimination,
}

impl ContentFlag {
    pub const ALL: [ContentFlag; 8] = [
        ContentFlag::Violence,
        ContentFlag::SexualContent,
        ContentFlag::Nudity,
        ContentFlag::Language,
        ContentFlag::DrugUse,
        ContentFlag::Gambling,
        ContentFlag::Horror,
        ContentFlag::Discrimination,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentFlag::Violence => "violence",
            ContentFlag::SexualContent => "sexualContent",
            ContentFlag::Nudity => "nudity",
            ContentFlag::Language => "language",
            ContentFlag::DrugUse => "drugUse",
            ContentFlag::Gambling => "gambling",
            ContentFlag::Horror => "horror",
            ContentFlag::Discrimination => "discrimination",
        }
    }
}

impl std::fmt::Display for ContentFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The full set of content flags for one piece of content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentFlags {
    pub violence: bool,
    pub sexual_content: bool,
    pub nudity: bool,
    pub language: bool,
    pub drug_use: bool,
    pub gambling: bool,
    pub horror: bool,
    pub discrimination: bool,
}

impl ContentFlags {
    /// No flags raised
    pub fn none() -> Self {
        Self::default()
    }

    /// Flags with exactly the given indicators raised.
    pub fn from_flags(flags: impl IntoIterator<Item = ContentFlag>) -> Self {
        flags.into_iter().fold(Self::default(), |acc, flag| acc.with(flag))
    }

    /// Raise one flag
    pub fn with(mut self, flag: ContentFlag) -> Self {
        *self.slot(flag) = true;
        self
    }

    pub fn is_set(&self, flag: ContentFlag) -> bool {
        match flag {
            ContentFlag::Violence => self.violence,
            ContentFlag::SexualContent => self.sexual_content,
            ContentFlag::Nudity => self.nudity,
            ContentFlag::Language => self.language,
            ContentFlag::DrugUse => self.drug_use,
            ContentFlag::Gambling => self.gambling,
            ContentFlag::Horror => self.horror,
            ContentFlag::Discrimination => self.discrimination,
        }
    }

    /// Raised flags, in declaration order.
    pub fn raised(&self) -> Vec<ContentFlag> {
        ContentFlag::ALL
            .into_iter()
            .filter(|flag| self.is_set(*flag))
            .collect()
    }

    pub fn is_clean(&self) -> bool {
        self.raised().is_empty()
    }

    fn slot(&mut self, flag: ContentFlag) -> &mut bool {
        match flag {
            ContentFlag::Violence => &mut self.violence,
            ContentFlag::SexualContent => &mut self.sexual_content,
            ContentFlag::Nudity => &mut self.nudity,
            ContentFlag::Language => &mut self.language,
            ContentFlag::DrugUse => &mut self.drug_use,
            ContentFlag::Gambling => &mut self.gambling,
            ContentFlag::Horror => &mut self.horror,
            ContentFlag::Discrimination => &mut self.discrimination,
        }
    }
}
