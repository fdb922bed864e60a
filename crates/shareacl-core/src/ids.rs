//! Prefixed random id generation for permissions created locally.

use crate::errors::AclError;

/// Prefix for permission ids minted by [`crate::MemoryAcl`].
pub const PREFIX_PERMISSION: &str = "perm";

/// Generate an id of the form `{prefix}-xxxxxxxx` (8 lowercase hex chars).
///
/// # Errors
///
/// Returns [`AclError::Other`] if the OS random source is unavailable.
pub fn generate_id(prefix: &str) -> Result<String, AclError> {
    let mut bytes = [0u8; 4];
    getrandom::fill(&mut bytes)
        .map_err(|e| anyhow::anyhow!("failed to generate {prefix} id: {e}"))?;
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!("{prefix}-{hex}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_id_correct_format() {
        let id = generate_id(PREFIX_PERMISSION).unwrap();
        let (prefix, hex) = id.split_once('-').unwrap();
        assert_eq!(prefix, "perm");
        assert_eq!(hex.len(), 8);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn generate_id_uniqueness() {
        let ids: std::collections::HashSet<String> =
            (0..64).map(|_| generate_id("perm").unwrap()).collect();
        assert_eq!(ids.len(), 64);
    }
}
