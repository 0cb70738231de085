use crate::config::GenerationDefaults;
use crate::quiz::{
    CategorySelection, DifficultyDistribution, GenerationConfig, GenerationConfigError,
    clamp_problem_count,
};

/// Generate form inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
    pub num_problems: u32,
    pub category: CategorySelection,
    pub use_difficulty_mix: bool,
    pub difficulty: DifficultyDistribution,
}

impl FormState {
    pub fn from_defaults(defaults: &GenerationDefaults) -> Self {
        Self {
            num_problems: clamp_problem_count(defaults.default_num_problems),
            category: defaults.default_category,
            use_difficulty_mix: defaults.use_difficulty_mix,
            difficulty: defaults.difficulty,
        }
    }

    pub fn to_config(&self) -> Result<GenerationConfig, GenerationConfigError> {
        GenerationConfig::new(
            self.num_problems,
            self.category,
            self.use_difficulty_mix.then_some(self.difficulty),
        )
    }

    /// Write the form back into the persisted defaults.
    pub fn store_defaults(&self, defaults: &mut GenerationDefaults) {
        defaults.default_num_problems = self.num_problems;
        defaults.default_category = self.category;
        defaults.use_difficulty_mix = self.use_difficulty_mix;
        defaults.difficulty = self.difficulty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::Category;

    #[test]
    fn difficulty_mix_is_sent_only_when_enabled() {
        let mut form = FormState::from_defaults(&GenerationDefaults::default());
        assert_eq!(form.to_config().unwrap().difficulty, None);
        form.use_difficulty_mix = true;
        assert_eq!(
            form.to_config().unwrap().difficulty,
            Some(DifficultyDistribution::default())
        );
    }

    #[test]
    fn stores_form_back_into_defaults() {
        let mut form = FormState::from_defaults(&GenerationDefaults::default());
        form.num_problems = 7;
        form.category = CategorySelection::Single(Category::AgeProblems);
        let mut defaults = GenerationDefaults::default();
        form.store_defaults(&mut defaults);
        assert_eq!(defaults.default_num_problems, 7);
        assert_eq!(FormState::from_defaults(&defaults), form);
    }
}
