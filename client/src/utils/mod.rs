//! # Utility Functions
//!
//! ## Modules
//!
//! - **[`validation`]**: Sign-in and sign-up input checks (email, password, name)
//!
//! ## Related Modules
//!
//! - [`shared::utils`]: Upload URL helpers
//! - [`crate::core`]: Core abstractions and error types

pub mod validation;
