/// Strips markup from user-supplied display text before it is stored.
///
/// Uses ammonia's whitelist, so harmless formatting survives while scripts
/// and event-handler attributes are removed. Surrounding whitespace is trimmed.
pub fn clean_text(input: &str) -> String {
    ammonia::clean(input).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_is_removed_from_name() {
        assert_eq!(clean_text("Asha<script>alert(1)</script>"), "Asha");
    }

    #[test]
    fn test_plain_name_is_kept() {
        assert_eq!(clean_text("  Ravi Kumar "), "Ravi Kumar");
    }
}
