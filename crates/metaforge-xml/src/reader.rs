//! Parse XML text into an [`Element`] tree.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::{Element, Error, Misc, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parse XML bytes into the document's root element.
///
/// The bytes must be UTF-8; a leading byte-order mark is skipped.
pub fn parse_bytes(xml: &[u8]) -> Result<Element> {
    let xml = xml.strip_prefix(UTF8_BOM).unwrap_or(xml);
    let xml_str = std::str::from_utf8(xml).map_err(Error::Utf8)?;
    parse_str(xml_str)
}

/// Parse XML text into the document's root element.
///
/// # Example
///
/// ```
/// let root = metaforge_xml::parse_str(r#"<?xml version="1.0"?>
/// <CPedModelInfo__InitDataList>
///   <InitDatas>
///     <Item><Name>a_f_m_beach_01</Name></Item>
///   </InitDatas>
/// </CPedModelInfo__InitDataList>"#).unwrap();
///
/// assert_eq!(root.tag, "CPedModelInfo__InitDataList");
/// let item = root.find_path("InitDatas/Item/Name").unwrap();
/// assert_eq!(item.text, "a_f_m_beach_01");
/// ```
pub fn parse_str(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut prolog = Vec::new();
    let mut epilog = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            Error::Syntax(format!("{} (at byte {})", e, reader.buffer_position()))
        })?;

        match event {
            Event::Start(e) => {
                stack.push(start_element(&e)?);
            }
            Event::Empty(e) => {
                let node = start_element(&e)?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::End(_) => {
                if let Some(node) = stack.pop() {
                    attach(&mut stack, &mut root, node)?;
                }
            }
            Event::Text(e) => {
                if let Some(node) = stack.last_mut() {
                    let text = e.unescape().map_err(|e| Error::Syntax(e.to_string()))?;
                    push_text(node, &text);
                }
            }
            Event::CData(e) => {
                if let Some(node) = stack.last_mut() {
                    let text = std::str::from_utf8(&e)?;
                    push_text(node, text);
                }
            }
            Event::Comment(e) => {
                let misc = Misc::Comment(std::str::from_utf8(&e)?.to_owned());
                place_misc(&mut stack, root.is_some(), &mut prolog, &mut epilog, misc);
            }
            Event::PI(e) => {
                let misc = Misc::Instruction(std::str::from_utf8(&e)?.to_owned());
                place_misc(&mut stack, root.is_some(), &mut prolog, &mut epilog, misc);
            }
            Event::Eof => break,
            _ => {} // Declaration, doctype
        }
    }

    if !stack.is_empty() {
        return Err(Error::Syntax(format!(
            "unexpected end of document with {} unclosed element(s)",
            stack.len()
        )));
    }

    let mut root = root.ok_or(Error::NoRoot)?;
    root.prolog = prolog;
    root.epilog = epilog;
    Ok(root)
}

/// Keep a comment or instruction with the open element, or outside the root.
fn place_misc(stack: &mut [Element], after_root: bool, prolog: &mut Vec<Misc>, epilog: &mut Vec<Misc>, misc: Misc) {
    match stack.last_mut() {
        Some(node) => node.misc.push((node.children.len(), misc)),
        None if after_root => epilog.push(misc),
        None => prolog.push(misc),
    }
}

/// Build an element from a start (or self-closing) tag.
fn start_element(e: &BytesStart<'_>) -> Result<Element> {
    let tag = std::str::from_utf8(e.name().as_ref())?.to_owned();
    let mut node = Element::new(tag);

    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::Syntax(e.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::Syntax(e.to_string()))?
            .into_owned();
        node.attributes.push((key, value));
    }

    Ok(node)
}

/// Attach a finished element to its parent, or make it the root.
fn attach(stack: &mut [Element], root: &mut Option<Element>, node: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Ok(());
    }
    if root.is_some() {
        return Err(Error::Syntax(format!(
            "multiple root elements (second root <{}>)",
            node.tag
        )));
    }
    *root = Some(node);
    Ok(())
}

fn push_text(node: &mut Element, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if !node.text.is_empty() {
        node.text.push(' ');
    }
    node.text.push_str(text);
}
