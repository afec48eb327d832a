//! The standard block library.

use serde_json::json;

use super::{BlockCatalog, BlockDescriptor, BlockSupports, FieldDefinition};
use crate::render::blocks as render;

const TEXT_SUPPORTS: BlockSupports = BlockSupports {
    text_formatting: true,
    alignment: true,
    column_count: false,
    custom_class: true,
    spacing: true,
};

const PLAIN_SUPPORTS: BlockSupports = BlockSupports {
    text_formatting: false,
    alignment: false,
    column_count: false,
    custom_class: true,
    spacing: true,
};

/// Register the standard block types: heading, text, list, quote, code,
/// image, button, divider, spacer, columns.
pub fn register_standard_blocks(catalog: &mut BlockCatalog) {
    catalog.register(
        BlockDescriptor::new("heading", "Heading", render::render_heading)
            .icon("heading")
            .category("text")
            .supports(TEXT_SUPPORTS)
            .default_prop("content", "")
            .default_prop("level", 2u64)
            .fields(vec![
                FieldDefinition::text("content", "Text"),
                FieldDefinition::number("level", "Level", Some(1), Some(6)).default_value(2),
            ]),
    );

    catalog.register(
        BlockDescriptor::new("text", "Text", render::render_text)
            .icon("paragraph")
            .category("text")
            .supports(TEXT_SUPPORTS)
            .default_prop("content", "")
            .fields(vec![FieldDefinition::textarea("content", "Text", 4)]),
    );

    catalog.register(
        BlockDescriptor::new("list", "List", render::render_list)
            .icon("list")
            .category("text")
            .supports(TEXT_SUPPORTS)
            .default_prop("style", "unordered")
            .default_prop("items", json!([]))
            .fields(vec![FieldDefinition::select(
                "style",
                "Style",
                vec![
                    ("unordered".to_string(), "Bulleted".to_string()),
                    ("ordered".to_string(), "Numbered".to_string()),
                ],
            )]),
    );

    catalog.register(
        BlockDescriptor::new("quote", "Quote", render::render_quote)
            .icon("quote")
            .category("text")
            .supports(TEXT_SUPPORTS)
            .default_prop("content", "")
            .default_prop("citation", "")
            .fields(vec![
                FieldDefinition::textarea("content", "Quote", 3),
                FieldDefinition::text("citation", "Citation"),
            ]),
    );

    catalog.register(
        BlockDescriptor::new("code", "Code", render::render_code)
            .icon("code")
            .category("text")
            .supports(PLAIN_SUPPORTS)
            .default_prop("content", "")
            .default_prop("language", "")
            .fields(vec![
                FieldDefinition::textarea("content", "Code", 8),
                FieldDefinition::text("language", "Language"),
            ]),
    );

    catalog.register(
        BlockDescriptor::new("image", "Image", render::render_image)
            .icon("image")
            .category("media")
            .supports(PLAIN_SUPPORTS)
            .default_prop("url", "")
            .default_prop("alt", "")
            .default_prop("caption", "")
            .fields(vec![
                FieldDefinition::url("url", "Image URL"),
                FieldDefinition::text("alt", "Alt text"),
                FieldDefinition::text("caption", "Caption"),
            ]),
    );

    catalog.register(
        BlockDescriptor::new("button", "Button", render::render_button)
            .icon("button")
            .category("design")
            .supports(BlockSupports {
                alignment: true,
                custom_class: true,
                spacing: true,
                ..BlockSupports::default()
            })
            .default_prop("label", "Click here")
            .default_prop("url", "#")
            .fields(vec![
                FieldDefinition::text("label", "Label"),
                FieldDefinition::url("url", "Link URL"),
            ]),
    );

    catalog.register(
        BlockDescriptor::new("divider", "Divider", render::render_divider)
            .icon("minus")
            .category("design")
            .supports(PLAIN_SUPPORTS),
    );

    catalog.register(
        BlockDescriptor::new("spacer", "Spacer", render::render_spacer)
            .icon("arrows-vertical")
            .category("design")
            .supports(PLAIN_SUPPORTS)
            .default_prop("height", 32u64)
            .fields(vec![
                FieldDefinition::number("height", "Height (px)", Some(1), Some(600))
                    .default_value(32),
            ]),
    );

    catalog.register(
        BlockDescriptor::new("columns", "Columns", render::render_columns)
            .icon("columns")
            .category("layout")
            .supports(BlockSupports {
                column_count: true,
                custom_class: true,
                spacing: true,
                ..BlockSupports::default()
            })
            .default_prop("columns", 2u64)
            .fields(vec![
                FieldDefinition::number("columns", "Columns", Some(1), Some(6)).default_value(2),
            ]),
    );
}
