//! Slash-command parsing.
//!
//! A slash command is one of the creation paths for a block: typing
//! `/heading 2` in an empty paragraph inserts a level-2 heading. Commands
//! match a type name exactly first, then fall back to a case-insensitive
//! label prefix, so `/head` and `/quote` both work. A numeric argument maps
//! onto the matched type's obvious numeric prop; any other argument becomes
//! initial content.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::catalog::{BlockCatalog, BlockDescriptor};
use crate::document::Props;

#[allow(clippy::expect_used)]
static COMMAND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/([A-Za-z0-9][A-Za-z0-9_-]*)(?:\s+(\S.*))?$").expect("command pattern is valid")
});

/// A parsed slash command: the block type to insert and its initial props.
#[derive(Debug, Clone, PartialEq)]
pub struct SlashCommand {
    pub block_type: String,
    pub props: Props,
}

/// Parse a slash command against the catalog. Returns `None` for anything
/// that is not a command or names no known type.
pub fn parse(catalog: &BlockCatalog, input: &str) -> Option<SlashCommand> {
    let captures = COMMAND_RE.captures(input.trim())?;
    let name = captures.get(1)?.as_str().to_lowercase();
    let argument = captures.get(2).map(|m| m.as_str().trim());

    let descriptor = catalog
        .get(&name)
        .or_else(|| find_by_label_prefix(catalog, &name))?;

    let mut props = Props::new();
    if let Some(argument) = argument {
        match argument.parse::<u64>() {
            Ok(number) => {
                if let Some((prop, max)) = numeric_prop(descriptor) {
                    props.insert(prop.to_string(), Value::from(number.clamp(1, max)));
                }
            }
            Err(_) => {
                if descriptor.default_props.contains_key("content") {
                    props.insert("content".to_string(), Value::from(argument));
                }
            }
        }
    }

    Some(SlashCommand {
        block_type: descriptor.type_name.clone(),
        props,
    })
}

fn find_by_label_prefix<'a>(catalog: &'a BlockCatalog, name: &str) -> Option<&'a BlockDescriptor> {
    catalog
        .all()
        .find(|descriptor| descriptor.label.to_lowercase().starts_with(name))
}

/// The numeric prop a bare number argument maps onto, with its upper bound.
fn numeric_prop(descriptor: &BlockDescriptor) -> Option<(&'static str, u64)> {
    match descriptor.type_name.as_str() {
        "heading" => Some(("level", 6)),
        "columns" => Some(("columns", 6)),
        "spacer" => Some(("height", 600)),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn catalog() -> BlockCatalog {
        BlockCatalog::with_standard_blocks()
    }

    #[test]
    fn exact_type_name_matches() {
        let command = parse(&catalog(), "/heading").unwrap();
        assert_eq!(command.block_type, "heading");
        assert!(command.props.is_empty());
    }

    #[test]
    fn numeric_argument_maps_to_level() {
        let command = parse(&catalog(), "/heading 3").unwrap();
        assert_eq!(command.props["level"], Value::from(3u64));

        // Clamped to the valid range.
        let command = parse(&catalog(), "/heading 9").unwrap();
        assert_eq!(command.props["level"], Value::from(6u64));
    }

    #[test]
    fn label_prefix_matches_case_insensitively() {
        let command = parse(&catalog(), "/Quo").unwrap();
        assert_eq!(command.block_type, "quote");
    }

    #[test]
    fn text_argument_becomes_content() {
        let command = parse(&catalog(), "/text Hello there").unwrap();
        assert_eq!(command.props["content"], Value::from("Hello there"));
    }

    #[test]
    fn columns_argument_maps_to_count() {
        let command = parse(&catalog(), "/columns 3").unwrap();
        assert_eq!(command.props["columns"], Value::from(3u64));
    }

    #[test]
    fn non_commands_and_unknown_names_are_none() {
        let catalog = catalog();
        assert!(parse(&catalog, "plain text").is_none());
        assert!(parse(&catalog, "/").is_none());
        assert!(parse(&catalog, "/warpdrive").is_none());
    }
}
