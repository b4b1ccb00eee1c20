// src/api/decode.rs
//! Lenient decoding of Notion JSON into the block and entry model.
//!
//! Upstream payloads are loosely typed: any field may be missing even when
//! the kind implies it. Missing fields take their defaults. A field that is
//! present with the wrong shape turns that one block into
//! [`Block::Malformed`]; the rest of the list decodes normally.

use crate::error::AppError;
use crate::model::*;
use crate::types::{Annotations, BlockId, Color, Link, PageId, RichTextItem};
use serde_json::{Map, Value};

type Payload<'a> = Option<&'a Map<String, Value>>;

/// Why a payload could not be read.
type ShapeResult<T> = Result<T, String>;

/// Decodes a list of raw block records in order.
pub fn decode_blocks(values: &[Value]) -> Vec<Block> {
    values.iter().map(decode_block).collect()
}

/// Decodes one raw block record. Never fails: unknown kinds become
/// [`Block::Unsupported`] and unreadable payloads [`Block::Malformed`].
pub fn decode_block(value: &Value) -> Block {
    let id = BlockId::from_raw(value.get("id").and_then(Value::as_str).unwrap_or_default());
    let mut common = BlockCommon::new(id);
    common.has_children = value
        .get("has_children")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let Some(kind) = value.get("type").and_then(Value::as_str) else {
        return malformed(common, "unknown", "block has no type".to_string());
    };

    let payload = match payload_object(value.get(kind)) {
        Ok(payload) => payload,
        Err(reason) => return malformed(common, kind, reason),
    };

    let embedded = payload
        .and_then(|p| p.get("children"))
        .or_else(|| value.get("children"));
    match decode_children(embedded) {
        Ok(children) if !children.is_empty() => common = common.with_children(children),
        Ok(_) => {}
        Err(reason) => return malformed(common, kind, reason),
    }

    match decode_payload(kind, common.clone(), payload) {
        Some(Ok(block)) => block,
        Some(Err(reason)) => malformed(common, kind, reason),
        None => Block::Unsupported(UnsupportedBlock {
            common,
            block_type: kind.to_string(),
        }),
    }
}

fn malformed(common: BlockCommon, kind: &str, reason: String) -> Block {
    log::debug!("Block {} ({}) is malformed: {}", common.id, kind, reason);
    Block::Malformed(MalformedBlock {
        common,
        block_type: kind.to_string(),
        reason,
    })
}

/// `None` for kinds this site does not render.
fn decode_payload(kind: &str, common: BlockCommon, payload: Payload) -> Option<ShapeResult<Block>> {
    let block = match kind {
        "paragraph" => {
            text_content(payload).map(|content| Block::Paragraph(ParagraphBlock { common, content }))
        }
        "heading_1" => {
            text_content(payload).map(|content| Block::Heading1(HeadingBlock { common, content }))
        }
        "heading_2" => {
            text_content(payload).map(|content| Block::Heading2(HeadingBlock { common, content }))
        }
        "heading_3" => {
            text_content(payload).map(|content| Block::Heading3(HeadingBlock { common, content }))
        }
        "bulleted_list_item" => text_content(payload)
            .map(|content| Block::BulletedListItem(ListItemBlock { common, content })),
        "numbered_list_item" => text_content(payload)
            .map(|content| Block::NumberedListItem(ListItemBlock { common, content })),
        "to_do" => text_content(payload).map(|content| {
            Block::ToDo(ToDoBlock {
                common,
                content,
                checked: field(payload, "checked")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            })
        }),
        "toggle" => text_content(payload).map(|content| Block::Toggle(ToggleBlock { common, content })),
        "quote" => text_content(payload).map(|content| Block::Quote(QuoteBlock { common, content })),
        "callout" => text_content(payload).map(|content| {
            Block::Callout(CalloutBlock {
                common,
                icon: field(payload, "icon").and_then(decode_icon),
                content,
            })
        }),
        "code" => text_content(payload).map(|content| {
            Block::Code(CodeBlock {
                common,
                language: field(payload, "language")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                content,
            })
        }),
        "divider" => Ok(Block::Divider(DividerBlock { common })),
        "image" => decode_rich_text(field(payload, "caption")).map(|caption| {
            Block::Image(ImageBlock {
                common,
                source: payload.and_then(decode_file_object),
                caption,
            })
        }),
        "embed" => decode_rich_text(field(payload, "caption")).map(|caption| {
            Block::Embed(EmbedBlock {
                common,
                url: field(payload, "url")
                    .and_then(Value::as_str)
                    .filter(|url| !url.trim().is_empty())
                    .map(str::to_string),
                caption,
            })
        }),
        _ => return None,
    };
    Some(block)
}

fn payload_object(value: Option<&Value>) -> ShapeResult<Payload> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(format!("payload is {}, expected an object", json_type(other))),
    }
}

fn field<'a>(payload: Payload<'a>, name: &str) -> Option<&'a Value> {
    payload.and_then(|p| p.get(name)).filter(|v| !v.is_null())
}

fn text_content(payload: Payload) -> ShapeResult<TextBlockContent> {
    Ok(TextBlockContent {
        rich_text: decode_rich_text(field(payload, "rich_text"))?,
        color: field(payload, "color")
            .and_then(Value::as_str)
            .map(Color::parse_lenient)
            .unwrap_or_default(),
    })
}

fn decode_children(value: Option<&Value>) -> ShapeResult<Vec<Block>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(decode_blocks(items)),
        Some(other) => Err(format!("children is {}, expected an array", json_type(other))),
    }
}

fn decode_icon(value: &Value) -> Option<Icon> {
    let url_of = |key: &str| {
        value
            .get(key)
            .and_then(|v| v.get("url"))
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    match value.get("type").and_then(Value::as_str) {
        Some("external") => url_of("external").map(|url| Icon::External { url }),
        Some("file") => url_of("file").map(|url| Icon::File { url }),
        _ => value
            .get("emoji")
            .and_then(Value::as_str)
            .map(|emoji| Icon::Emoji(emoji.to_string())),
    }
}

/// Reads `{type, external: {url}}` or `{type, file: {url, expiry_time}}`.
fn decode_file_object(payload: &Map<String, Value>) -> Option<FileObject> {
    let url_in = |key: &str| {
        payload
            .get(key)
            .and_then(|v| v.get("url"))
            .and_then(Value::as_str)
            .filter(|url| !url.trim().is_empty())
            .map(str::to_string)
    };
    let external = || url_in("external").map(|url| FileObject::External { url });
    let hosted = || {
        url_in("file").map(|url| FileObject::Hosted {
            url,
            expiry_time: payload
                .get("file")
                .and_then(|f| f.get("expiry_time"))
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    };

    match payload.get("type").and_then(Value::as_str) {
        Some("external") => external(),
        Some(_) => hosted(),
        None => external().or_else(hosted),
    }
}

/// Decodes a rich-text array. Absent means empty; `null` runs are skipped.
pub fn decode_rich_text(value: Option<&Value>) -> ShapeResult<Vec<RichTextItem>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.iter().filter_map(decode_run).collect()),
        Some(other) => Err(format!("rich_text is {}, expected an array", json_type(other))),
    }
}

fn decode_run(value: &Value) -> Option<RichTextItem> {
    let run = value.as_object()?;
    let plain = run.get("plain_text").and_then(Value::as_str);
    let text = run.get("text").and_then(Value::as_object);

    let content = text
        .and_then(|t| t.get("content"))
        .and_then(Value::as_str)
        .or(plain)
        .unwrap_or_default();
    let link = text
        .and_then(|t| t.get("link"))
        .and_then(|link| link.get("url"))
        .and_then(Value::as_str)
        .or_else(|| run.get("href").and_then(Value::as_str))
        .map(|url| Link {
            url: url.to_string(),
        });

    Some(RichTextItem {
        content: content.to_string(),
        link,
        annotations: run
            .get("annotations")
            .map(decode_annotations)
            .unwrap_or_default(),
        plain_text: plain.unwrap_or(content).to_string(),
    })
}

fn decode_annotations(value: &Value) -> Annotations {
    let flag = |name: &str| value.get(name).and_then(Value::as_bool).unwrap_or(false);
    Annotations {
        bold: flag("bold"),
        italic: flag("italic"),
        strikethrough: flag("strikethrough"),
        underline: flag("underline"),
        code: flag("code"),
        color: value
            .get("color")
            .and_then(Value::as_str)
            .map(Color::parse_lenient)
            .unwrap_or_default(),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// --- Entries ---

/// Decodes a page object (a database row) into an [`Entry`].
///
/// Only the id is required; every property is optional.
pub fn decode_entry(value: &Value) -> Result<Entry, AppError> {
    let id = value
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::MalformedResponse("page object without an id".to_string()))?;

    let props = value.get("properties").and_then(Value::as_object);
    let text = |name: &str| props.and_then(|p| p.get(name)).and_then(property_text);

    Ok(Entry {
        id: PageId::from_raw(id),
        title: text("Name"),
        published: props
            .and_then(|p| p.get("Published"))
            .and_then(|p| p.get("date"))
            .and_then(|d| d.get("start"))
            .and_then(Value::as_str)
            .map(str::to_string),
        slug: text("Slug"),
        tags: props
            .and_then(|p| p.get("Tags"))
            .and_then(|t| t.get("multi_select"))
            .and_then(Value::as_array)
            .map(|options| options.iter().filter_map(decode_tag).collect())
            .unwrap_or_default(),
        description: text("Description"),
        summary: text("AI custom autofill"),
        url_slug: text("URL"),
        meaning: text("Meaning"),
        origin: text("Origin"),
        gender: text("Gender"),
        cover_url: value.get("cover").and_then(|cover| {
            let map = cover.as_object()?;
            decode_file_object(map).map(|file| file.url().to_string())
        }),
        icon_emoji: value
            .get("icon")
            .and_then(decode_icon)
            .and_then(|icon| icon.emoji().map(str::to_string)),
        last_edited: value
            .get("last_edited_time")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

/// Decodes a list of page objects, skipping rows without an id.
pub fn decode_entries(values: &[Value]) -> Vec<Entry> {
    values
        .iter()
        .filter_map(|value| match decode_entry(value) {
            Ok(entry) => Some(entry),
            Err(err) => {
                log::warn!("Skipping database row: {}", err);
                None
            }
        })
        .collect()
}

fn decode_tag(value: &Value) -> Option<Tag> {
    let name = value.get("name").and_then(Value::as_str)?;
    Some(Tag {
        name: name.to_string(),
        color: value
            .get("color")
            .and_then(Value::as_str)
            .map(Color::parse_lenient)
            .unwrap_or_default(),
    })
}

/// Text of a property regardless of its type: title and rich text are
/// flattened, selects give their option name, urls and plain strings pass
/// through. Empty text counts as absent.
fn property_text(property: &Value) -> Option<String> {
    let kind = property.get("type").and_then(Value::as_str);
    let text = match kind {
        Some("title") | Some("rich_text") => runs_text(property.get(kind?)?),
        Some("select") | Some("status") => property
            .get(kind?)
            .and_then(|s| s.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string),
        Some("url") | Some("email") | Some("phone_number") => {
            property.get(kind?).and_then(Value::as_str).map(str::to_string)
        }
        _ => property
            .get("title")
            .or_else(|| property.get("rich_text"))
            .and_then(runs_text)
            .or_else(|| {
                property
                    .get("select")
                    .and_then(|s| s.get("name"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            }),
    };
    text.filter(|t| !t.trim().is_empty())
}

fn runs_text(value: &Value) -> Option<String> {
    let runs = decode_rich_text(Some(value)).ok()?;
    Some(crate::types::plain_text_of(&runs))
}
