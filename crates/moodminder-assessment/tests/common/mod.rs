#![allow(dead_code)]

use moodminder_assessment::catalog::{Catalog, Question};
use moodminder_assessment::config::ClassifierSettings;
use moodminder_assessment::MoodAssessor;
use moodminder_core::models::condition::Condition;
use moodminder_core::models::responses::Responses;

pub const BUILTIN_LEN: usize = 42;

pub fn question(id: u32, category: &str, weight: f64, condition: Option<Condition>) -> Question {
    Question {
        id,
        prompt: format!("Question {id}?"),
        options: ["Never", "Rarely", "Sometimes", "Often", "Always"]
            .iter()
            .map(|o| o.to_string())
            .collect(),
        category: category.to_string(),
        weight,
        condition,
    }
}

pub fn builtin() -> Catalog {
    Catalog::builtin().expect("builtin catalog loads")
}

pub fn assessor() -> MoodAssessor {
    MoodAssessor::with_catalog(builtin(), &ClassifierSettings::Range).expect("assessor builds")
}

pub fn uniform(value: u8) -> Responses {
    Responses::Sequence(vec![value; BUILTIN_LEN])
}
