//! Command catalogue.
//!
//! The table is authored once and frozen on first access. Lookups that miss are
//! a normal outcome and return `None`.

mod table;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;
use step_model::{StepFields, StepVariant};
use tracing::debug;

/// A user-selectable command and the step it produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    pub key: &'static str,
    pub label: &'static str,
    pub produces: StepVariant,
    pub default_fields: StepFields,
    /// Whether the command acts on a specific element (and gets locators).
    pub element_scoped: bool,
}

static COMMANDS: Lazy<Vec<Command>> = Lazy::new(table::authored_commands);

static INDEX: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    COMMANDS
        .iter()
        .enumerate()
        .map(|(idx, command)| (command.key, idx))
        .collect()
});

pub fn lookup(key: &str) -> Option<&'static Command> {
    let found = INDEX.get(key).map(|&idx| &COMMANDS[idx]);
    if found.is_none() {
        debug!(key, "command lookup miss");
    }
    found
}

/// Every command, in authored order.
pub fn all() -> &'static [Command] {
    COMMANDS.as_slice()
}

pub fn by_variant(variant: StepVariant) -> impl Iterator<Item = &'static Command> {
    all().iter().filter(move |command| command.produces == variant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use step_model::{MouseButton, TextInputMode, COMMON_FIELDS};

    #[test]
    fn keys_are_unique() {
        let keys: HashSet<_> = all().iter().map(|c| c.key).collect();
        assert_eq!(keys.len(), all().len());
        assert_eq!(INDEX.len(), all().len());
    }

    #[test]
    fn defaults_only_name_fields_of_their_variant() {
        for command in all() {
            let allowed = command.produces.payload_fields();
            for field in command.default_fields.present_fields() {
                assert!(
                    allowed.contains(&field) || COMMON_FIELDS.contains(&field),
                    "{} sets '{}' which {} does not carry",
                    command.key,
                    field,
                    command.produces
                );
            }
        }
    }

    #[test]
    fn no_command_produces_undetermined() {
        assert_eq!(by_variant(StepVariant::Undetermined).count(), 0);
    }

    #[test]
    fn lookup_hits_and_misses() {
        let clear = lookup("clearValue").unwrap();
        assert_eq!(clear.produces, StepVariant::TypeText);
        assert_eq!(clear.default_fields.text.as_deref(), Some(""));
        assert_eq!(clear.default_fields.input_mode, Some(TextInputMode::Clear));

        let right = lookup("rightClick").unwrap();
        assert_eq!(right.default_fields.button, Some(MouseButton::Right));
        assert!(right.element_scoped);

        assert!(lookup("unknownKey").is_none());
        assert!(lookup("ClearValue").is_none());
    }

    #[test]
    fn by_variant_groups_navigation() {
        let keys: Vec<_> = by_variant(StepVariant::Navigate).map(|c| c.key).collect();
        assert_eq!(keys, vec!["url", "back", "forward", "refresh"]);
    }

    #[test]
    fn command_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(lookup("pause").unwrap()).unwrap();
        assert_eq!(value["produces"], "pause");
        assert_eq!(value["elementScoped"], false);
        assert_eq!(value["defaultFields"]["durationMs"], 1000);
    }
}
