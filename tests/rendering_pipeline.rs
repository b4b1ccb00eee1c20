// tests/rendering_pipeline.rs
//! Decode-and-render tests driven by recorded API responses.

use minikadlar::api::decode::decode_blocks;
use minikadlar::rendering::{fallback::Disposition, render_block};
use minikadlar::{
    render_blocks, render_html, render_page, slugify, table_of_contents, Block, BlockCommon, RenderContext,
    RenderNode, RichTextItem,
};
use minikadlar::model::{ParagraphBlock, TextBlockContent, ToggleBlock};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

const PROXY: &str = "https://minikadlar-gallery.vercel.app/api/image";

fn ctx() -> RenderContext<'static> {
    RenderContext::new(PROXY)
}

fn fixture_blocks(raw: &str) -> Vec<Block> {
    let response: Value = serde_json::from_str(raw).expect("fixture is valid JSON");
    let results = response["results"].as_array().expect("results array");
    decode_blocks(results)
}

fn name_page() -> Vec<Block> {
    fixture_blocks(include_str!("../fixtures/api_responses/blocks_name_page.json"))
}

fn mixed_kinds() -> Vec<Block> {
    fixture_blocks(include_str!("../fixtures/api_responses/blocks_mixed_kinds.json"))
}

fn paragraph(text: &str) -> Block {
    Block::Paragraph(ParagraphBlock {
        common: BlockCommon::default(),
        content: TextBlockContent::new(vec![RichTextItem::plain_text(text)]),
    })
}

fn toggle(text: &str, children: Vec<Block>) -> Block {
    Block::Toggle(ToggleBlock {
        common: BlockCommon::default().with_children(children),
        content: TextBlockContent::new(vec![RichTextItem::plain_text(text)]),
    })
}

/// The `div.pl-4 mt-2` holding a toggle's children.
fn toggle_body(node: &RenderNode) -> &minikadlar::Element {
    let details = node.as_element().expect("toggle renders an element");
    assert_eq!(details.tag, "details");
    details
        .children
        .last()
        .and_then(RenderNode::as_element)
        .expect("toggle has a child container")
}

// =============================================================================
// End to end
// =============================================================================

#[test]
fn name_page_renders_four_top_level_nodes() {
    let blocks = name_page();
    let nodes = render_blocks(&blocks, &ctx());
    assert_eq!(nodes.len(), 4);

    let heading = nodes[0].as_element().unwrap();
    assert_eq!(heading.tag, "h1");
    assert_eq!(heading.get_attr("id"), Some("isim-anlami"));
    assert_eq!(heading.text_content(), "İsim Anlamı");

    assert_eq!(
        nodes[1].to_html(),
        "<p class=\"my-4\"><span class=\"font-bold\">Zeynep</span></p>"
    );

    let image_html = nodes[2].to_html();
    assert!(image_html.starts_with("<figure class=\"my-8\"><img src=\""));
    assert!(image_html.contains("key=foo.webp&amp;width=1200&amp;height=800"));
    assert!(!image_html.contains("width=10&"));

    let body = toggle_body(&nodes[3]);
    assert_eq!(body.children.len(), 1);
    assert_eq!(body.children[0].text_content(), "Ek bilgi");
}

#[test]
fn toc_anchors_match_heading_ids() {
    let blocks = name_page();
    let toc = table_of_contents(&blocks);
    assert_eq!(toc.len(), 1);
    assert_eq!(toc[0].anchor, "isim-anlami");

    let html = render_html(&render_blocks(&blocks, &ctx()));
    assert!(html.contains(&format!("id=\"{}\"", toc[0].anchor)));
}

#[test]
fn rendering_twice_is_byte_identical() {
    let blocks = name_page();
    let first = render_html(&render_blocks(&blocks, &ctx()));
    let second = render_html(&render_blocks(&blocks, &ctx()));
    assert_eq!(first, second);

    let mixed = mixed_kinds();
    assert_eq!(
        render_html(&render_blocks(&mixed, &ctx())),
        render_html(&render_blocks(&mixed, &ctx()))
    );
}

// =============================================================================
// Fallbacks
// =============================================================================

#[test]
fn each_block_keeps_its_slot_whatever_happens_to_it() {
    let nodes = render_blocks(&mixed_kinds(), &ctx());
    assert_eq!(nodes.len(), 6);

    assert_eq!(nodes[0].text_content(), "Önce");
    assert_eq!(
        Disposition::of(&nodes[1]),
        Some(Disposition::VisibleUnsupported)
    );
    assert_eq!(Disposition::of(&nodes[2]), Some(Disposition::VisibleError));
    assert_eq!(Disposition::of(&nodes[3]), None);
    assert_eq!(nodes[5].to_html(), "<hr class=\"my-8\">");
}

#[test]
fn unknown_kind_is_named_and_distinct_from_empty() {
    let nodes = render_blocks(&mixed_kinds(), &ctx());
    let unknown = nodes[1].to_html();
    assert!(unknown.contains("unknown_block_xyz"));
    assert_ne!(unknown, "");
    assert_ne!(unknown, nodes[2].to_html());
    assert_eq!(
        nodes[2].to_html(),
        "<div class=\"text-gray-500 my-4\">Bu içerik gösterilemiyor</div>"
    );
}

#[test]
fn image_without_key_uses_raw_url() {
    let nodes = render_blocks(&mixed_kinds(), &ctx());
    let img = nodes[3].as_element().unwrap().children[0]
        .as_element()
        .unwrap();
    assert_eq!(img.get_attr("src"), Some("https://files.example/raw/photo.png"));
}

#[test]
fn image_without_any_source_renders_nothing() {
    let blocks = decode_blocks(&[json!({
        "id": "x",
        "type": "image",
        "image": { "caption": [] }
    })]);
    let nodes = render_blocks(&blocks, &ctx());
    assert_eq!(Disposition::of(&nodes[0]), Some(Disposition::SilentEmpty));
    assert_eq!(render_html(&nodes), "");
}

#[test]
fn every_flag_of_a_run_shows_up() {
    let nodes = render_blocks(&mixed_kinds(), &ctx());
    assert_eq!(
        nodes[4].to_html(),
        "<blockquote class=\"border-l-4 border-gray-300 pl-4 py-2 my-6 italic\"><a href=\"https://minikadlar.com/isim/zeynep\" class=\"text-primary hover:underline font-bold italic underline text-red\">Vurgulu</a></blockquote>"
    );
}

#[test]
fn runs_without_annotations_render_unstyled() {
    let blocks = decode_blocks(&[json!({
        "id": "x",
        "type": "paragraph",
        "paragraph": { "rich_text": [ { "plain_text": "Sade" } ] }
    })]);
    assert_eq!(
        render_html(&render_blocks(&blocks, &ctx())),
        "<p class=\"my-4\"><span>Sade</span></p>"
    );
}

#[test]
fn embed_links_use_the_proxy_only_when_keyed() {
    let blocks = decode_blocks(&[
        json!({ "id": "e1", "type": "embed", "embed": { "url": "https://cdn.example/?key=clip.webp&width=10" } }),
        json!({ "id": "e2", "type": "embed", "embed": { "url": "https://example.com/harita" } }),
    ]);
    let nodes = render_blocks(&blocks, &ctx());
    let href = |node: &RenderNode| {
        node.as_element().unwrap().children[0]
            .as_element()
            .unwrap()
            .get_attr("href")
            .map(str::to_string)
    };

    assert_eq!(
        href(&nodes[0]).as_deref(),
        Some("https://minikadlar-gallery.vercel.app/api/image?key=clip.webp&width=1200&height=675")
    );
    assert_eq!(href(&nodes[1]).as_deref(), Some("https://example.com/harita"));
    assert_eq!(nodes[1].text_content(), "https://example.com/harita");
}

#[test]
fn nested_children_never_sit_inside_a_paragraph() {
    let blocks = decode_blocks(&[json!({
        "id": "p",
        "type": "paragraph",
        "has_children": true,
        "paragraph": {
            "rich_text": [ { "plain_text": "ana" } ],
            "children": [
                { "id": "c", "type": "paragraph", "paragraph": { "rich_text": [ { "plain_text": "alt" } ] } }
            ]
        }
    })]);
    let html = render_page(&blocks, &ctx());
    assert_eq!(
        html,
        "<p class=\"my-4\"><span>ana</span></p><div class=\"pl-4\"><p class=\"my-4\"><span>alt</span></p></div>"
    );
}

#[test]
fn pages_group_list_items_into_lists() {
    let item = |id: &str, kind: &str, text: &str| {
        json!({ "id": id, "type": kind, kind: { "rich_text": [ { "plain_text": text } ] } })
    };
    let blocks = decode_blocks(&[
        item("1", "bulleted_list_item", "Ada"),
        item("2", "bulleted_list_item", "Deniz"),
        item("3", "numbered_list_item", "Birinci"),
    ]);
    assert_eq!(
        render_page(&blocks, &ctx()),
        "<ul class=\"my-4 pl-6\"><li class=\"list-disc\"><span>Ada</span></li><li class=\"list-disc\"><span>Deniz</span></li></ul><ol class=\"my-4 pl-6\"><li class=\"list-decimal\"><span>Birinci</span></li></ol>"
    );
}

// =============================================================================
// Toggles
// =============================================================================

#[test]
fn toggle_with_no_children() {
    let node = render_block(&toggle("Boş", vec![]), &ctx());
    assert!(toggle_body(&node).children.is_empty());
}

#[test]
fn toggle_with_three_children_keeps_order() {
    let node = render_block(
        &toggle("Üç", vec![paragraph("bir"), paragraph("iki"), paragraph("üç")]),
        &ctx(),
    );
    let texts: Vec<String> = toggle_body(&node)
        .children
        .iter()
        .map(RenderNode::text_content)
        .collect();
    assert_eq!(texts, vec!["bir", "iki", "üç"]);
}

#[test]
fn toggles_nested_three_levels() {
    let tree = toggle(
        "1",
        vec![toggle("2", vec![toggle("3", vec![paragraph("en içte")])])],
    );
    let node = render_block(&tree, &ctx());

    let level2 = &toggle_body(&node).children[0];
    let level3 = &toggle_body(level2).children[0];
    let innermost = toggle_body(level3);
    assert_eq!(innermost.children.len(), 1);
    assert_eq!(innermost.children[0].text_content(), "en içte");

    let html = node.to_html();
    assert_eq!(html.matches("<details").count(), 3);
    assert_eq!(html.matches("</details>").count(), 3);
}

// =============================================================================
// Slugs
// =============================================================================

#[test]
fn turkish_slugs() {
    assert_eq!(slugify("Çiçek Öğüt"), "cicek-ogut");
    assert_eq!(slugify("İstanbul"), "istanbul");
    assert_eq!(slugify("  Şule   & Işıl  "), "sule-isil");
    assert_eq!(slugify("--Ğ--"), "g");
    assert_eq!(slugify(""), "");
}
