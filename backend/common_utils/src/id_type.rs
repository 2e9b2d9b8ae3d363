//! Identifier generation.

use nanoid::nanoid;

use crate::consts;

/// Generate an opaque alphanumeric identifier for a new session.
pub fn generate_session_id() -> String {
    nanoid!({ consts::ID_LENGTH }, &consts::ALPHABETS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_alphanumeric_and_sized() {
        let id = generate_session_id();
        assert_eq!(id.len(), consts::ID_LENGTH);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(generate_session_id(), generate_session_id());
    }
}
