use crate::MAX_IDENT_LEN;

// Rust keywords, strict and reserved, 2024 edition.
const WORDS: &[&str] = &[
    "Self", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv",
    "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Idents the generator itself places in wrapper code.
const GENERATED: &[&str] = &["base"];

/// Ensure an identifier is non-empty, well-formed and not a reserved keyword.
pub(crate) fn validate_ident(ident: &str) -> Result<(), String> {
    if ident.is_empty() {
        return Err("ident is empty".to_string());
    }
    if ident.len() > MAX_IDENT_LEN {
        return Err(format!(
            "ident '{ident}' exceeds max length {MAX_IDENT_LEN}"
        ));
    }

    // reserved?
    is_reserved(ident)?;

    let mut chars = ident.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c == '_' || c.is_ascii_alphabetic());
    if !valid_start || !chars.all(|c| c == '_' || c.is_ascii_alphanumeric()) {
        return Err(format!("ident '{ident}' is not a valid identifier"));
    }

    Ok(())
}

/// Idents that would clash with names the wrapper itself introduces.
pub(crate) fn validate_field_ident(ident: &str) -> Result<(), String> {
    validate_ident(ident)?;
    if GENERATED.contains(&ident) {
        return Err(format!("the field name '{ident}' is used by generated code"));
    }

    Ok(())
}

fn is_reserved(word: &str) -> Result<(), String> {
    if WORDS.contains(&word) {
        return Err(format!("the word '{word}' is reserved"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_reserved_words() {
        assert!(validate_ident("").is_err(), "empty identifiers should fail");
        assert!(
            validate_ident("impl").is_err(),
            "reserved keywords should be rejected"
        );
        assert!(validate_ident("9lives").is_err());
        assert!(validate_ident("has-dash").is_err());
    }

    #[test]
    fn accepts_non_reserved_identifier() {
        assert!(validate_ident("custom_ident").is_ok());
        assert!(validate_ident("_speaker2").is_ok());
    }

    #[test]
    fn generated_names_are_off_limits_for_fields() {
        assert!(validate_field_ident("base").is_err());
        assert!(validate_field_ident("speaker").is_ok());
    }
}
