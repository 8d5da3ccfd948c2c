//! Declaration engine: claims, the escalation rule, legal-claim
//! enumeration for assisted mode and free-text parsing for free mode.

pub mod parser;
pub mod progression;

pub use parser::parse_declaration;
pub use progression::{generate_valid_declarations, validate_progression, Claim};
