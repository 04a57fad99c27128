//! XML text to [`Document`] via `quick-xml` events

use super::{CodecOptions, XmlDeclaration};
use crate::error::{Error, Result};
use crate::tree::{Document, NodeId, NodeKind};
use quick_xml::Reader;
use quick_xml::events::{BytesDecl, BytesStart, Event};
use std::borrow::Cow;

pub(super) fn read_document(source: &str, options: &CodecOptions) -> Result<Document> {
    let mut reader = Reader::from_str(source);
    let mut doc = Document::empty();
    let mut stack: Vec<NodeId> = vec![doc.document_node()];

    loop {
        let position = reader.buffer_position();
        let event = reader
            .read_event()
            .map_err(|e| Error::parse(reader.buffer_position(), e.to_string()))?;

        let parent = *stack.last().unwrap_or(&doc.document_node());
        let at_top_level = stack.len() == 1;

        match event {
            Event::Decl(decl) => {
                if !at_top_level || doc.node_count() > 1 {
                    return Err(Error::parse(position, "misplaced XML declaration"));
                }
                doc.set_declaration(Some(read_declaration(&decl, position)?));
            }
            Event::DocType(text) => {
                doc.set_doctype(Some(decode(&text).trim().to_string()));
            }
            Event::Start(start) => {
                let id = create_element(&mut doc, &start, options, position)?;
                attach(&mut doc, parent, id, position)?;
                stack.push(id);
            }
            Event::Empty(start) => {
                let id = create_element(&mut doc, &start, options, position)?;
                attach(&mut doc, parent, id, position)?;
            }
            Event::End(_) => {
                if at_top_level {
                    return Err(Error::parse(position, "unexpected closing tag"));
                }
                stack.pop();
            }
            Event::Text(text) => {
                let content = text
                    .unescape()
                    .map_err(|e| Error::parse(position, e.to_string()))?;
                if content.trim().is_empty() && (options.remove_blank_text || at_top_level) {
                    continue;
                }
                if at_top_level {
                    return Err(Error::parse(position, "text outside the root element"));
                }
                let id = doc.create_text(&content);
                attach(&mut doc, parent, id, position)?;
            }
            Event::CData(cdata) => {
                if at_top_level {
                    return Err(Error::parse(position, "CDATA outside the root element"));
                }
                // The tree has no CDATA kind; the section's content is kept as text.
                let id = doc.create_text(&decode(&cdata));
                attach(&mut doc, parent, id, position)?;
            }
            Event::Comment(comment) => {
                let id = doc.create_comment(&decode(&comment));
                attach(&mut doc, parent, id, position)?;
            }
            Event::PI(pi) => {
                let raw = decode(&pi);
                let (target, data) = match raw.split_once(char::is_whitespace) {
                    Some((target, data)) => (target.to_string(), data.trim_start().to_string()),
                    None => (raw.to_string(), String::new()),
                };
                let id = doc
                    .create_processing_instruction(&target, &data)
                    .map_err(|e| Error::parse(position, e.to_string()))?;
                attach(&mut doc, parent, id, position)?;
            }
            Event::Eof => break,
        }
    }

    if stack.len() > 1 {
        let open = stack
            .last()
            .and_then(|id| doc.get(*id))
            .map(|n| n.name().to_string())
            .unwrap_or_default();
        return Err(Error::parse(
            reader.buffer_position(),
            format!("unclosed element <{open}>"),
        ));
    }
    if doc.root_element().is_none() {
        return Err(Error::parse(reader.buffer_position(), "no root element"));
    }

    tracing::trace!(nodes = doc.node_count(), "Parsed XML document");
    Ok(doc)
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

fn read_declaration(decl: &BytesDecl<'_>, position: usize) -> Result<XmlDeclaration> {
    let to_string = |value: Cow<'_, [u8]>| decode(&value).into_owned();
    let version = decl
        .version()
        .map(to_string)
        .map_err(|e| Error::parse(position, e.to_string()))?;
    let encoding = decl
        .encoding()
        .transpose()
        .map_err(|e| Error::parse(position, e.to_string()))?
        .map(to_string);
    let standalone = decl
        .standalone()
        .transpose()
        .map_err(|e| Error::parse(position, e.to_string()))?
        .map(to_string);
    Ok(XmlDeclaration {
        version,
        encoding,
        standalone,
    })
}

fn create_element(
    doc: &mut Document,
    start: &BytesStart<'_>,
    options: &CodecOptions,
    position: usize,
) -> Result<NodeId> {
    let qualified = decode(start.name().as_ref()).into_owned();
    let name = if options.strip_namespaces {
        local_name(&qualified).to_string()
    } else {
        qualified
    };
    let id = doc
        .create_element(&name)
        .map_err(|e| Error::parse(position, e.to_string()))?;

    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::parse(position, e.to_string()))?;
        let qualified = decode(attr.key.as_ref());
        let is_namespace_decl = qualified == "xmlns" || qualified.starts_with("xmlns:");
        let key = if options.strip_namespaces {
            if is_namespace_decl {
                continue;
            }
            local_name(&qualified).to_string()
        } else {
            qualified.into_owned()
        };
        let value = attr
            .unescape_value()
            .map_err(|e| Error::parse(position, e.to_string()))?;

        // Two prefixed attributes can share a local name; the first one wins.
        let already_set = doc.get(id).is_some_and(|n| n.has_attribute(&key));
        if !already_set {
            doc.set_attribute(id, &key, &value)
                .map_err(|e| Error::parse(position, e.to_string()))?;
        }
    }

    Ok(id)
}

/// The part after the prefix of a `prefix:local` name.
///
/// Names that are not of that exact shape, such as `a::b`, are kept whole.
fn local_name(qualified: &str) -> &str {
    match qualified.split_once(':') {
        Some((prefix, local)) if !prefix.is_empty() && !local.is_empty() && !local.contains(':') => {
            local
        }
        _ => qualified,
    }
}

fn attach(doc: &mut Document, parent: NodeId, child: NodeId, position: usize) -> Result<()> {
    let child_is_element = doc
        .get(child)
        .is_some_and(|n| n.kind() == NodeKind::Element);
    if parent == doc.document_node() && child_is_element && doc.root_element().is_some() {
        return Err(Error::parse(position, "multiple root elements"));
    }
    doc.append_child(parent, child)
        .map_err(|e| Error::parse(position, e.to_string()))
}
