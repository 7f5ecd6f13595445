//! Pretty XML serialization for [`Element`] trees.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::{Element, Error, Misc, Result};

/// Indentation settings for serialized documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XmlStyle {
    /// Byte used for indentation.
    pub indent_char: u8,
    /// Number of indent bytes per nesting level.
    pub indent_size: usize,
}

impl Default for XmlStyle {
    fn default() -> Self {
        Self {
            indent_char: b' ',
            indent_size: 2,
        }
    }
}

/// Serialize a document to a UTF-8 string with an XML declaration.
pub fn to_xml_string(root: &Element, style: XmlStyle) -> Result<String> {
    let bytes = to_xml_bytes(root, style)?;
    String::from_utf8(bytes).map_err(|e| Error::Write(e.to_string()))
}

/// Serialize a document into an in-memory buffer.
pub fn to_xml_bytes(root: &Element, style: XmlStyle) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    write_document(root, &mut output, style)?;
    Ok(output)
}

/// Write a document (declaration, root element and a trailing newline).
pub fn write_document<W: Write>(root: &Element, writer: W, style: XmlStyle) -> Result<()> {
    let mut xml_writer = Writer::new_with_indent(writer, style.indent_char, style.indent_size);

    xml_writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(|e| Error::Write(e.to_string()))?;

    for misc in &root.prolog {
        write_misc(&mut xml_writer, misc)?;
    }
    write_element(&mut xml_writer, root)?;
    for misc in &root.epilog {
        write_misc(&mut xml_writer, misc)?;
    }

    xml_writer.get_mut().write_all(b"\n")?;
    Ok(())
}

/// Write a single element and its children.
fn write_element<W: Write>(writer: &mut Writer<W>, node: &Element) -> Result<()> {
    let mut elem = BytesStart::new(node.tag.as_str());
    for (key, value) in &node.attributes {
        elem.push_attribute((key.as_str(), value.as_str()));
    }

    if node.children.is_empty() && node.text.is_empty() && node.misc.is_empty() {
        writer
            .write_event(Event::Empty(elem))
            .map_err(|e| Error::Write(e.to_string()))?;
        return Ok(());
    }

    writer
        .write_event(Event::Start(elem))
        .map_err(|e| Error::Write(e.to_string()))?;

    if !node.text.is_empty() {
        writer
            .write_event(Event::Text(BytesText::new(&node.text)))
            .map_err(|e| Error::Write(e.to_string()))?;
    }

    let mut misc = node.misc.iter().peekable();
    for (index, child) in node.children.iter().enumerate() {
        while let Some((_, m)) = misc.next_if(|(position, _)| *position <= index) {
            write_misc(writer, m)?;
        }
        write_element(writer, child)?;
    }
    for (_, m) in misc {
        write_misc(writer, m)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(node.tag.as_str())))
        .map_err(|e| Error::Write(e.to_string()))?;

    Ok(())
}

fn write_misc<W: Write>(writer: &mut Writer<W>, misc: &Misc) -> Result<()> {
    let event = match misc {
        Misc::Comment(text) => Event::Comment(BytesText::from_escaped(text.as_str())),
        Misc::Instruction(content) => Event::PI(BytesPI::new(content.as_str())),
    };
    writer
        .write_event(event)
        .map_err(|e| Error::Write(e.to_string()))
}
