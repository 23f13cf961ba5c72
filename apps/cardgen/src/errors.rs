use thiserror::Error;

/// Domain-level error type for loading records and building the deck.
///
/// None of these are transient: every variant means either a malformed input
/// record or two internal tables that have drifted apart. Callers propagate
/// them; nothing in the pipeline retries.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("Malformed trait payload in '{name}': text must be a value or a list of values")]
    MalformedTrait { name: String },

    #[error("Malformed trait group '{group}': expected an object or a list of objects")]
    MalformedTraitGroup { group: String },

    #[error("Unknown content block kind: '{0}'")]
    UnknownBlockKind(String),

    #[error("Invalid '{kind}' content block: {reason}")]
    InvalidBlock { kind: String, reason: String },

    #[error("No entry for '{key}' in lookup table '{table}'")]
    UnknownLookup { table: &'static str, key: String },

    #[error("Card '{title}' reached pagination without a size class")]
    Unclassified { title: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_lookup_message_names_table_and_key() {
        let err = DeckError::UnknownLookup {
            table: "size",
            key: "X".to_string(),
        };
        assert_eq!(err.to_string(), "No entry for 'X' in lookup table 'size'");
    }

    #[test]
    fn test_unknown_block_kind_message() {
        let err = DeckError::UnknownBlockKind("banner".to_string());
        assert!(err.to_string().contains("banner"));
    }
}
