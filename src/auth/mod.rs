//! # Auth Module
//!
//! This module handles account and credential concerns:
//! - Signup with Argon2-hashed passwords
//! - Password login issuing HS256 bearer tokens
//! - The `CurrentUser` extractor guarding protected routes

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod password;
pub mod routes;
pub mod tokens;
pub mod validators;


pub use extractors::CurrentUser;
pub use models::User;
pub use routes::auth_routes;
