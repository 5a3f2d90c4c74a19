// src/auth/validators.rs

use super::models::UserCreate;
use crate::common::{ValidationResult, Validator};

pub struct SignupValidator;

impl Validator<UserCreate> for SignupValidator {
    fn validate(&self, data: &UserCreate) -> ValidationResult {
        let mut result = ValidationResult::new();

        let email = data.email.trim();
        if email.is_empty() {
            result.add_error("email", "Email is required");
        } else if email.len() > 255 {
            result.add_error("email", "Email must be at most 255 characters");
        } else if !email.contains('@') {
            result.add_error("email", "Email must contain '@'");
        }

        if data.password.is_empty() {
            result.add_error("password", "Password is required");
        }

        result
    }
}
