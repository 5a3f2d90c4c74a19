// src/resumes/mod.rs

pub mod handlers;
pub mod models;
pub mod routes;
pub mod validators;


pub use models::*;
pub use routes::resumes_routes;
