//! [`Document`] to XML text via the `quick-xml` writer

use super::{CodecOptions, XmlDeclaration};
use crate::error::{Error, Result};
use crate::tree::{Document, NodeKind, NodeRef};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

pub(super) fn write_document(document: &Document, options: &CodecOptions) -> Result<String> {
    let mut writer = if options.indent > 0 {
        Writer::new_with_indent(Vec::new(), b' ', options.indent)
    } else {
        Writer::new(Vec::new())
    };

    let declaration = document.declaration().cloned().unwrap_or_default();
    write_declaration(&mut writer, &declaration)?;

    if let Some(doctype) = document.doctype() {
        emit(&mut writer, Event::DocType(BytesText::from_escaped(doctype)))?;
    }

    if let Some(doc_node) = document.get(document.document_node()) {
        for child in doc_node.children() {
            write_node(&mut writer, child)?;
        }
    }

    let mut output = String::from_utf8(writer.into_inner()).map_err(|e| Error::Render {
        message: e.to_string(),
    })?;
    output.push('\n');
    Ok(output)
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer.write_event(event).map_err(|e| Error::Render {
        message: e.to_string(),
    })
}

fn write_declaration(writer: &mut Writer<Vec<u8>>, declaration: &XmlDeclaration) -> Result<()> {
    let decl = BytesDecl::new(
        &declaration.version,
        declaration.encoding.as_deref(),
        declaration.standalone.as_deref(),
    );
    emit(writer, Event::Decl(decl))
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: NodeRef<'_>) -> Result<()> {
    match node.kind() {
        NodeKind::Element => {
            let mut start = BytesStart::new(node.name());
            for (key, value) in node.attributes() {
                start.push_attribute((key, value));
            }
            if node.child_ids().is_empty() {
                return emit(writer, Event::Empty(start));
            }
            emit(writer, Event::Start(start))?;
            for child in node.children() {
                write_node(writer, child)?;
            }
            emit(writer, Event::End(BytesEnd::new(node.name())))
        }
        NodeKind::Text => emit(writer, Event::Text(BytesText::new(node.text().unwrap_or("")))),
        NodeKind::Comment => emit(
            writer,
            Event::Comment(BytesText::from_escaped(node.text().unwrap_or(""))),
        ),
        NodeKind::ProcessingInstruction => {
            let data = node.text().unwrap_or("");
            let content = if data.is_empty() {
                node.name().to_string()
            } else {
                format!("{} {}", node.name(), data)
            };
            emit(writer, Event::PI(BytesText::from_escaped(content)))
        }
        NodeKind::Document | NodeKind::Attribute => Err(Error::Render {
            message: format!("{:?} node in element content", node.kind()),
        }),
    }
}
