// src/resumes/validators.rs

use super::models::ResumeCreate;
use crate::common::{ValidationResult, Validator};

pub struct ResumeValidator;

impl Validator<ResumeCreate> for ResumeValidator {
    fn validate(&self, data: &ResumeCreate) -> ValidationResult {
        let mut result = ValidationResult::new();
        if data.content.trim().is_empty() {
            result.add_error("content", "Resume content is required");
        }
        result
    }
}
