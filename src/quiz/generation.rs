use std::fmt;

use serde::{Deserialize, Serialize};

/// Smallest batch the generate form accepts.
pub const MIN_PROBLEMS: u32 = 1;
/// Largest batch the generate form accepts.
pub const MAX_PROBLEMS: u32 = 20;

pub fn clamp_problem_count(count: u32) -> u32 {
    count.clamp(MIN_PROBLEMS, MAX_PROBLEMS)
}

/// Problem families the backend knows how to generate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    TimeSpeedDistance,
    WorkTime,
    PipesCisterns,
    ProfitLossDiscount,
    RatioMixturesSharing,
    AgeProblems,
    BoatsStreams,
    AllocationLogicalMath,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Self::TimeSpeedDistance,
        Self::WorkTime,
        Self::PipesCisterns,
        Self::ProfitLossDiscount,
        Self::RatioMixturesSharing,
        Self::AgeProblems,
        Self::BoatsStreams,
        Self::AllocationLogicalMath,
    ];

    /// User-facing name; also the value sent to the backend.
    pub fn label(self) -> &'static str {
        match self {
            Self::TimeSpeedDistance => "Time-Speed-Distance",
            Self::WorkTime => "Work & Time",
            Self::PipesCisterns => "Pipes & Cisterns",
            Self::ProfitLossDiscount => "Profit/Loss & Discount",
            Self::RatioMixturesSharing => "Ratio/Mixtures & Sharing",
            Self::AgeProblems => "Age Problems",
            Self::BoatsStreams => "Boats & Streams",
            Self::AllocationLogicalMath => "Allocation & Logical Math",
        }
    }

    /// Value the generation backend's category enum accepts, when it has one.
    pub fn backend_value(self) -> Option<&'static str> {
        match self {
            Self::TimeSpeedDistance => Some("Time, Speed & Distance"),
            Self::WorkTime => Some("Work & Time"),
            Self::PipesCisterns => Some("Pipes & Cisterns"),
            Self::AgeProblems => Some("Age Problems"),
            Self::RatioMixturesSharing => Some("Mixture & Alligation"),
            Self::ProfitLossDiscount | Self::BoatsStreams | Self::AllocationLogicalMath => None,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(label))
    }
}

/// Category choice in the generate form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategorySelection {
    Single(Category),
    #[default]
    Mixed,
}

impl CategorySelection {
    pub const MIXED_LABEL: &'static str = "Mixed (All Categories)";
    const MIXED_WIRE: &'static str = "mixed";

    pub fn options() -> impl Iterator<Item = CategorySelection> {
        Category::ALL
            .into_iter()
            .map(CategorySelection::Single)
            .chain(std::iter::once(CategorySelection::Mixed))
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Single(category) => category.label(),
            Self::Mixed => Self::MIXED_LABEL,
        }
    }

    pub fn wire_value(self) -> &'static str {
        match self {
            Self::Single(category) => category.label(),
            Self::Mixed => Self::MIXED_WIRE,
        }
    }

    /// Concrete categories covered by the selection.
    pub fn categories(self) -> Vec<Category> {
        match self {
            Self::Single(category) => vec![category],
            Self::Mixed => Category::ALL.to_vec(),
        }
    }
}

impl fmt::Display for CategorySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<String> for CategorySelection {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case(Self::MIXED_WIRE)
            || trimmed.eq_ignore_ascii_case(Self::MIXED_LABEL)
        {
            return Ok(Self::Mixed);
        }
        Category::from_label(trimmed)
            .map(Self::Single)
            .ok_or_else(|| format!("unknown category {value:?}"))
    }
}

impl From<CategorySelection> for String {
    fn from(value: CategorySelection) -> Self {
        value.wire_value().to_string()
    }
}

/// Requested EASY/MEDIUM/HARD split.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyDistribution {
    #[serde(rename = "EASY")]
    pub easy: u32,
    #[serde(rename = "MEDIUM")]
    pub medium: u32,
    #[serde(rename = "HARD")]
    pub hard: u32,
}

impl Default for DifficultyDistribution {
    fn default() -> Self {
        Self {
            easy: 4,
            medium: 5,
            hard: 3,
        }
    }
}

impl DifficultyDistribution {
    pub fn total(&self) -> u32 {
        self.easy
            .saturating_add(self.medium)
            .saturating_add(self.hard)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationConfigError {
    #[error("Number of problems must be between {MIN_PROBLEMS} and {MAX_PROBLEMS} (got {0})")]
    CountOutOfRange(u32),
    #[error("Difficulty mix must request at least one problem")]
    EmptyDifficultyMix,
}

/// What the user asked the backend to produce.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationConfig {
    pub num_problems: u32,
    pub category: CategorySelection,
    pub difficulty: Option<DifficultyDistribution>,
}

impl GenerationConfig {
    pub fn new(
        num_problems: u32,
        category: CategorySelection,
        difficulty: Option<DifficultyDistribution>,
    ) -> Result<Self, GenerationConfigError> {
        if !(MIN_PROBLEMS..=MAX_PROBLEMS).contains(&num_problems) {
            return Err(GenerationConfigError::CountOutOfRange(num_problems));
        }
        if difficulty.is_some_and(|mix| mix.total() == 0) {
            return Err(GenerationConfigError::EmptyDifficultyMix);
        }
        Ok(Self {
            num_problems,
            category,
            difficulty,
        })
    }

    /// Body for `POST /api/generate`.
    ///
    /// Carries the single `category` label and a `categories` list holding
    /// only values from the backend's category enum. Categories without a
    /// backend value are left out; an empty list is omitted entirely.
    pub fn to_request(&self) -> GenerateRequest {
        GenerateRequest {
            num_problems: self.num_problems,
            category: self.category.wire_value().to_string(),
            categories: self
                .category
                .categories()
                .into_iter()
                .filter_map(Category::backend_value)
                .map(str::to_string)
                .collect(),
            difficulty_distribution: self.difficulty,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GenerateRequest {
    pub num_problems: u32,
    pub category: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty_distribution: Option<DifficultyDistribution>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mixed_request_lists_backend_enum_values() {
        const BACKEND_CATEGORIES: [&str; 5] = [
            "Time, Speed & Distance",
            "Work & Time",
            "Pipes & Cisterns",
            "Age Problems",
            "Mixture & Alligation",
        ];
        let config = GenerationConfig::new(12, CategorySelection::Mixed, None).unwrap();
        let body = serde_json::to_value(config.to_request()).unwrap();
        assert_eq!(body["num_problems"], json!(12));
        assert_eq!(body["category"], json!("mixed"));
        let categories: Vec<&str> = body["categories"]
            .as_array()
            .unwrap()
            .iter()
            .map(|value| value.as_str().unwrap())
            .collect();
        assert_eq!(categories.len(), BACKEND_CATEGORIES.len());
        assert!(
            categories
                .iter()
                .all(|category| BACKEND_CATEGORIES.contains(category))
        );
        assert!(body.get("difficulty_distribution").is_none());
    }

    #[test]
    fn category_without_backend_value_omits_list() {
        let config = GenerationConfig::new(
            3,
            CategorySelection::Single(Category::BoatsStreams),
            None,
        )
        .unwrap();
        let body = serde_json::to_value(config.to_request()).unwrap();
        assert_eq!(body["category"], json!("Boats & Streams"));
        assert!(body.get("categories").is_none());
    }

    #[test]
    fn difficulty_total_saturates() {
        let huge = DifficultyDistribution {
            easy: 4_000_000_000,
            medium: 4_000_000_000,
            hard: 1,
        };
        assert_eq!(huge.total(), u32::MAX);
    }

    #[test]
    fn single_category_request_with_difficulty_mix() {
        let config = GenerationConfig::new(
            5,
            CategorySelection::Single(Category::PipesCisterns),
            Some(DifficultyDistribution::default()),
        )
        .unwrap();
        let body = serde_json::to_value(config.to_request()).unwrap();
        assert_eq!(body["category"], json!("Pipes & Cisterns"));
        assert_eq!(body["categories"], json!(["Pipes & Cisterns"]));
        assert_eq!(
            body["difficulty_distribution"],
            json!({"EASY": 4, "MEDIUM": 5, "HARD": 3})
        );
    }

    #[test]
    fn rejects_counts_outside_form_bounds() {
        assert_eq!(
            GenerationConfig::new(0, CategorySelection::Mixed, None),
            Err(GenerationConfigError::CountOutOfRange(0))
        );
        assert!(GenerationConfig::new(21, CategorySelection::Mixed, None).is_err());
        assert!(GenerationConfig::new(20, CategorySelection::Mixed, None).is_ok());
        assert_eq!(clamp_problem_count(0), 1);
        assert_eq!(clamp_problem_count(99), 20);
    }

    #[test]
    fn rejects_empty_difficulty_mix() {
        let empty = DifficultyDistribution {
            easy: 0,
            medium: 0,
            hard: 0,
        };
        assert_eq!(
            GenerationConfig::new(3, CategorySelection::Mixed, Some(empty)),
            Err(GenerationConfigError::EmptyDifficultyMix)
        );
    }

    #[test]
    fn selection_parses_labels_and_mixed_aliases() {
        assert_eq!(
            CategorySelection::try_from("work & time".to_string()),
            Ok(CategorySelection::Single(Category::WorkTime))
        );
        assert_eq!(
            CategorySelection::try_from("Mixed (All Categories)".to_string()),
            Ok(CategorySelection::Mixed)
        );
        assert!(CategorySelection::try_from("Geometry".to_string()).is_err());
        assert_eq!(CategorySelection::options().count(), 9);
    }
}
