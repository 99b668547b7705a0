//! Phase 1 tests: content tree, keys, command literals and shapes.

use book_index::command::shape::{
    decode_entry_key, decode_expand, decode_page, decode_partial_key, decode_range_end,
    decode_range_start, decode_reference, is_page, is_range_end, is_range_start, is_reference,
};
use book_index::command::{Command, CommandKind, Literal, ParseCache};
use book_index::engine::ensure_id;
use book_index::format::{DocumentReader, DocumentWriter};
use book_index::types::{
    Element, Key, Node, PartialEntryKey, PartialKey, ReferenceKind, Root, SequenceCounter,
};

use tempfile::NamedTempFile;

fn span(text: &str) -> Node {
    Element::new("span").with_children([Node::text(text)]).into()
}

fn page_tree() -> Root {
    let body = Element::new("body").with_children([
        Element::new("p").with_children([Node::text("intro")]).into(),
        span("first"),
        span("second"),
    ]);
    Root::new(vec![Element::new("html").with_children([body.into()]).into()])
}

// ==================== Content Tree Tests ====================

#[test]
fn test_text_content_includes_descendants() {
    let element = Element::new("p").with_children([
        Node::text("自由"),
        Element::new("em").with_children([Node::text("利用")]).into(),
    ]);
    assert_eq!(element.text_content(), "自由利用");
}

#[test]
fn test_text_content_br_and_comments() {
    let element = Element::new("p").with_children([
        Node::text("line one"),
        Element::new("br").into(),
        Node::Comment(book_index::types::Comment {
            value: "hidden".to_string(),
        }),
        Node::text("line two"),
    ]);
    assert_eq!(element.text_content(), "line one\nline two");
}

#[test]
fn test_select_with_attribute_preorder() {
    let outer = Element::new("div")
        .with_property("data-index", "outer")
        .with_children([Element::new("span")
            .with_property("data-index", "inner")
            .into()]);
    let tree = Root::new(vec![
        outer.into(),
        Element::new("p").with_property("data-index", "last").into(),
    ]);
    let paths = tree.select_with_attribute("data-index");
    assert_eq!(paths, vec![vec![0], vec![0, 0], vec![1]]);
    assert_eq!(tree.element_at(&[0, 0]).unwrap().property("data-index"), Some("inner"));
}

#[test]
fn test_xpath_positions_only_when_ambiguous() {
    let tree = page_tree();
    assert_eq!(tree.xpath(&[0, 0, 0]).as_deref(), Some("/html/body/p"));
    assert_eq!(tree.xpath(&[0, 0, 1]).as_deref(), Some("/html/body/span[1]"));
    assert_eq!(tree.xpath(&[0, 0, 2]).as_deref(), Some("/html/body/span[2]"));
}

#[test]
fn test_xpath_rejects_text_nodes() {
    let tree = Root::new(vec![Node::text("loose")]);
    assert!(tree.xpath(&[0]).is_none());
    assert!(tree.xpath(&[]).is_none());
}

#[test]
fn test_ensure_id_assigns_xpath_once() {
    let mut tree = page_tree();
    let id = ensure_id(&mut tree, &[0, 0, 2]).unwrap();
    assert_eq!(id, "/html/body/span[2]");
    assert_eq!(
        tree.element_at(&[0, 0, 2]).unwrap().property("id"),
        Some("/html/body/span[2]")
    );
    // Second call returns the stored id.
    assert_eq!(ensure_id(&mut tree, &[0, 0, 2]).unwrap(), id);
}

#[test]
fn test_ensure_id_keeps_explicit_id() {
    let mut tree = Root::new(vec![Element::new("span").with_property("id", "term-1").into()]);
    assert_eq!(ensure_id(&mut tree, &[0]).unwrap(), "term-1");
}

#[test]
fn test_ensure_id_bad_path_is_fatal() {
    let mut tree = Root::new(vec![Node::text("only text")]);
    let err = ensure_id(&mut tree, &[0]).unwrap_err();
    assert!(matches!(err, book_index::IndexError::AnchorPath(ref p) if p == &vec![0]));
}

#[test]
fn test_document_json_shape() {
    let json = r#"{"type":"root","children":[
        {"type":"element","tagName":"span","properties":{"data-index":".,[し,自由利用]"},
         "children":[{"type":"text","value":"自由利用"}]}]}"#;
    let tree = DocumentReader::read_from_str(json).unwrap();
    let span = tree.element_at(&[0]).unwrap();
    assert_eq!(span.tag_name, "span");
    assert_eq!(span.property("data-index"), Some(".,[し,自由利用]"));
    assert_eq!(span.text_content(), "自由利用");
}

#[test]
fn test_document_reads_parsed_html() {
    let json = r#"{"type":"root","children":[
        {"type":"doctype"},
        {"type":"element","tagName":"p",
         "properties":{"className":["lead","note"],"hidden":true,"tabIndex":-1},
         "children":[
            {"type":"raw","value":"<wbr>"},
            {"type":"element","tagName":"span","properties":{"data-index":".,[g,m]"},
             "children":[{"type":"text","value":"term"}]}]}]}"#;
    let mut tree = DocumentReader::read_from_str(json).unwrap();
    assert_eq!(tree.children[0], Node::Doctype);

    let p = tree.element_at(&[1]).unwrap();
    assert_eq!(p.class_name().as_deref(), Some("lead note"));
    assert_eq!(p.property("hidden"), None);
    assert_eq!(p.text_content(), "term");
    assert_eq!(tree.select_with_attribute("data-index"), vec![vec![1, 1]]);
    assert_eq!(ensure_id(&mut tree, &[1, 1]).unwrap(), "/p/span");

    let mut out = Vec::new();
    DocumentWriter::new().write_to(&tree, &mut out).unwrap();
    let back = DocumentReader::read_from(&mut out.as_slice()).unwrap();
    assert_eq!(back, tree);
    assert_eq!(back.element_at(&[1]).unwrap().properties["hidden"], true);
}

#[test]
fn test_class_attribute_forms() {
    let built = Element::new("li").with_class("a").with_class("b");
    assert_eq!(built.class_name().as_deref(), Some("a b"));
    let raw = Element::new("li").with_property("class", "x  y");
    assert_eq!(raw.class_name().as_deref(), Some("x y"));
    assert_eq!(Element::new("li").class_name(), None);
}

#[test]
fn test_document_file_roundtrip() {
    let tree = page_tree();
    let tmp = NamedTempFile::new().unwrap();
    DocumentWriter::pretty().write_to_file(&tree, tmp.path()).unwrap();
    let back = DocumentReader::read_from_file(tmp.path()).unwrap();
    assert_eq!(back, tree);
}

#[test]
fn test_document_invalid_json() {
    let err = DocumentReader::read_from_str("{\"type\":\"root\",").unwrap_err();
    assert!(matches!(err, book_index::IndexError::Json(_)));
}

// ==================== Key Tests ====================

#[test]
fn test_key_unresolved_addresses_any_sort_key() {
    let query = Key::unresolved("自由利用");
    assert!(query.addresses(&Key::resolved("自由利用", "じゆうりよう")));
    assert!(query.addresses(&Key::unresolved("自由利用")));
    assert!(!query.addresses(&Key::unresolved("著作権")));
}

#[test]
fn test_key_resolved_requires_equal_sort_key() {
    let query = Key::resolved("自由利用", "じゆうりよう");
    assert!(query.addresses(&Key::resolved("自由利用", "じゆうりよう")));
    assert!(!query.addresses(&Key::resolved("自由利用", "じゆう")));
    assert!(!query.addresses(&Key::unresolved("自由利用")));
}

#[test]
fn test_key_materialize() {
    let mut key = Key::unresolved("著作権");
    assert!(!key.is_resolved());
    assert_eq!(key.effective_sort_key(), "著作権");
    key.materialize();
    assert_eq!(key.sort_key.as_deref(), Some("著作権"));

    let mut explicit = Key::resolved("著作権", "ちょさくけん");
    explicit.materialize();
    assert_eq!(explicit.sort_key.as_deref(), Some("ちょさくけん"));
}

#[test]
fn test_partial_key_normalization() {
    let anchor = Element::new("span").with_children([Node::text("知的財産権")]);

    let key = PartialKey::Anchor.to_key(&anchor);
    assert_eq!(key.text(), "知的財産権");
    assert!(key.sort_key.is_none());

    let key = PartialKey::Reading("ちてきざいさんけん".into()).to_key(&anchor);
    assert_eq!(key.text(), "知的財産権");
    assert_eq!(key.sort_key.as_deref(), Some("ちてきざいさんけん"));

    let key = PartialKey::Text("著作権".into()).to_key(&anchor);
    assert_eq!(key.text(), "著作権");
    assert!(key.sort_key.is_none());

    let key = PartialKey::Explicit {
        text: "著作権".into(),
        sort_key: "ちょさくけん".into(),
    }
    .to_key(&anchor);
    assert_eq!(key, Key::resolved("著作権", "ちょさくけん"));
}

#[test]
fn test_sequence_ids_are_fixed_width_and_ordered() {
    let mut counter = SequenceCounter::new();
    let first = counter.next_id();
    let second = counter.next_id();
    assert_eq!(first.as_str(), "0000000000000001");
    assert_eq!(first.as_str().len(), 16);
    assert!(first < second);

    let mut later = SequenceCounter::starting_after(9);
    assert_eq!(later.next_id().as_str(), "0000000000000010");
}

// ==================== Literal Tests ====================

#[test]
fn test_literal_parse_flow_sequence() {
    let lit = Literal::parse(".,[し,[自由利用,じゆうりよう]]").unwrap();
    let items = lit.as_seq().unwrap();
    assert_eq!(items[0].as_str(), Some("."));
    let key = items[1].as_seq().unwrap();
    assert_eq!(key[0].as_str(), Some("し"));
    assert_eq!(
        key[1],
        Literal::Seq(vec![
            Literal::Str("自由利用".into()),
            Literal::Str("じゆうりよう".into())
        ])
    );
}

#[test]
fn test_literal_null_forms() {
    let lit = Literal::parse("idx,[null,~]").unwrap();
    let key = lit.as_seq().unwrap()[1].as_seq().unwrap();
    assert!(key[0].is_null());
    assert!(key[1].is_null());
}

#[test]
fn test_literal_other_scalars() {
    let lit = Literal::parse("1,true").unwrap();
    assert_eq!(lit, Literal::Seq(vec![Literal::Other, Literal::Other]));
}

#[test]
fn test_literal_parse_error() {
    assert!(Literal::parse("[").is_err());
    assert!(Literal::parse(".,[し").is_err());
}

#[test]
fn test_parse_cache_memoizes_successes_only() {
    let mut cache = ParseCache::new();
    assert!(cache.is_empty());
    cache.get_or_parse(".,[a,b]").unwrap();
    cache.get_or_parse(".,[a,b]").unwrap();
    assert_eq!(cache.len(), 1);
    assert!(cache.get_or_parse("[").is_err());
    assert_eq!(cache.len(), 1);
    cache.clear();
    assert!(cache.is_empty());
}

// ==================== Shape Tests ====================

fn lit(input: &str) -> Literal {
    Literal::parse(input).unwrap()
}

#[test]
fn test_partial_key_shapes() {
    assert_eq!(decode_partial_key(&Literal::Null), Some(PartialKey::Anchor));
    assert_eq!(
        decode_partial_key(&Literal::Str("し".into())),
        Some(PartialKey::Text("し".into()))
    );
    let items = lit("[null,よみ],[語,ご],[a,b,c]");
    let items = items.as_seq().unwrap();
    assert_eq!(
        decode_partial_key(&items[0]),
        Some(PartialKey::Reading("よみ".into()))
    );
    assert_eq!(
        decode_partial_key(&items[1]),
        Some(PartialKey::Explicit {
            text: "語".into(),
            sort_key: "ご".into()
        })
    );
    assert_eq!(decode_partial_key(&items[2]), None);
}

#[test]
fn test_entry_key_lengths() {
    let items = lit("[g,m],[g,m,s],[g],[g,m,s,x]");
    let items = items.as_seq().unwrap();
    assert!(decode_entry_key(&items[0]).unwrap().sub.is_none());
    assert!(decode_entry_key(&items[1]).unwrap().sub.is_some());
    assert!(decode_entry_key(&items[2]).is_none());
    assert!(decode_entry_key(&items[3]).is_none());
}

#[test]
fn test_page_shapes() {
    let page = decode_page(&lit(".,[し,自由利用]")).unwrap();
    assert_eq!(page.index_id, ".");
    assert!(!page.important);
    assert_eq!(
        page.entry_key,
        PartialEntryKey::main_entry(
            PartialKey::Text("し".into()),
            PartialKey::Text("自由利用".into())
        )
    );

    let important = decode_page(&lit("page!,.,[し,null]")).unwrap();
    assert!(important.important);
    assert_eq!(important.entry_key.main, PartialKey::Anchor);

    assert!(decode_page(&lit("page,.,[し,null]")).is_none());
    assert!(!is_page(&lit(".,notakey")));
}

#[test]
fn test_range_shapes() {
    let start = decode_range_start(&lit("range!,.,[し,null],r0")).unwrap();
    assert!(start.important);
    assert_eq!(start.range_id, "r0");
    assert!(is_range_start(&lit("range,.,[し,null],r0")));
    assert!(!is_range_start(&lit("ranged,.,[し,null],r0")));

    assert_eq!(decode_range_end(&lit("/range,r0")).unwrap().range_id, "r0");
    assert!(!is_range_end(&lit("/range")));
}

#[test]
fn test_reference_shapes() {
    let see = decode_reference(&lit("see,.,[ち,著作権],[ち,知的財産権]")).unwrap();
    assert_eq!(see.kind, ReferenceKind::See);
    let also = decode_reference(&lit("seeAlso,.,[ち,著作権],[ち,知的財産権,期間]")).unwrap();
    assert_eq!(also.kind, ReferenceKind::SeeAlso);
    assert!(also.target.sub.is_some());
    assert!(!is_reference(&lit("seealso,.,[ち,著作権],[ち,知的財産権]")));
}

#[test]
fn test_expand_shape() {
    assert_eq!(decode_expand(&lit("expand,.")).unwrap().index_id, ".");
    assert!(decode_expand(&lit("expand")).is_none());
}

#[test]
fn test_dispatch_priority() {
    // A page command whose index id is "range" still reads as a page.
    let cmd = Command::recognize(&lit("range,[g,m]")).unwrap();
    assert_eq!(cmd.kind(), CommandKind::Page);

    let cmd = Command::recognize(&lit("range,.,[g,m],r1")).unwrap();
    assert_eq!(cmd.kind(), CommandKind::RangeStart);

    let cmd = Command::recognize(&lit("/range,r1")).unwrap();
    assert_eq!(cmd.kind(), CommandKind::RangeEnd);

    let cmd = Command::recognize(&lit("see,.,[g,m],[g,n]")).unwrap();
    assert_eq!(cmd.kind(), CommandKind::Reference);

    assert!(Command::recognize(&lit("expand,.")).is_none());
    assert!(Command::recognize(&lit("hello")).is_none());
}

#[test]
fn test_command_kind_names() {
    assert_eq!(CommandKind::Page.name(), "page");
    assert_eq!(CommandKind::RangeEnd.name(), "/range");
    assert!(CommandKind::Expand.test(&lit("expand,.")));
    assert!(matches!(
        CommandKind::Expand.decode(&lit("expand,idx")),
        Some(Command::Expand(_))
    ));
}
