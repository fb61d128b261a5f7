/// XML event driver and tree builder for .ui documents
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::transpiler::ast::{Document, NodeId};
use crate::transpiler::error::TransformError;

/// Builds a [`Document`] from start/characters/end notifications.
pub struct TreeBuilder {
    document: Document,
    current: NodeId,
}

impl TreeBuilder {
    pub fn new() -> Self {
        let document = Document::new();
        let current = document.root();
        TreeBuilder { document, current }
    }

    /// Open a child of the current node and descend into it
    pub fn start_element(&mut self, tag: &str, attributes: IndexMap<String, String>) {
        self.current = self.document.append_child(self.current, tag, attributes);
    }

    pub fn characters(&mut self, text: &str) {
        self.document.node_mut(self.current).text.push_str(text);
    }

    /// Close the current node and ascend to its parent
    pub fn end_element(&mut self, tag: &str) -> Result<(), TransformError> {
        let parent = self
            .document
            .parent(self.current)
            .ok_or_else(|| TransformError::UnbalancedElement(tag.to_string()))?;

        // Indentation between child elements is not a value
        let node = self.document.node_mut(self.current);
        if node.has_children() && node.text.trim().is_empty() {
            node.text.clear();
        }

        self.current = parent;
        Ok(())
    }

    pub fn finish(self) -> Result<Document, TransformError> {
        if self.current != self.document.root() {
            let tag = self.document.node(self.current).tag.clone();
            return Err(TransformError::UnclosedElement(tag));
        }
        Ok(self.document)
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Parser<'a> {
    data: &'a [u8],
}

impl<'a> Parser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data }
    }

    pub fn parse(&self) -> Result<Document, TransformError> {
        let mut reader = Reader::from_reader(self.data);
        reader.config_mut().trim_text(false);
        reader.config_mut().expand_empty_elements = true;

        let mut builder = TreeBuilder::new();
        let mut buf = Vec::new();

        loop {
            let position = reader.buffer_position() as u64;
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| xml_error(position, e))?;

            match event {
                Event::Start(e) => {
                    let tag = utf8(position, e.name().into_inner())?.to_string();
                    let attributes = read_attributes(position, &e)?;
                    builder.start_element(&tag, attributes);
                }
                Event::End(e) => {
                    let tag = utf8(position, e.name().into_inner())?;
                    builder.end_element(tag)?;
                }
                Event::Text(e) => {
                    let text = e.unescape().map_err(|err| xml_error(position, err))?;
                    builder.characters(&text);
                }
                Event::CData(e) => {
                    builder.characters(utf8(position, &e)?);
                }
                Event::Eof => break,
                _ => (),
            }
            buf.clear();
        }

        builder.finish()
    }
}

fn read_attributes(
    position: u64,
    element: &BytesStart,
) -> Result<IndexMap<String, String>, TransformError> {
    let mut attributes = IndexMap::new();
    for attr in element.attributes() {
        let attr = attr.map_err(|e| xml_error(position, e))?;
        let key = utf8(position, attr.key.as_ref())?.to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| xml_error(position, e))?
            .into_owned();
        attributes.insert(key, value);
    }
    Ok(attributes)
}

fn utf8(position: u64, bytes: &[u8]) -> Result<&str, TransformError> {
    std::str::from_utf8(bytes).map_err(|e| xml_error(position, e))
}

fn xml_error(position: u64, err: impl std::fmt::Display) -> TransformError {
    TransformError::Xml {
        position,
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transpiler::ast::NodeKind;

    #[test]
    fn test_parse_builds_tree_in_document_order() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
<ui version="4.0">
 <widget class="QWidget" name="Form">
  <property name="windowTitle">
   <string>Hello &amp; welcome</string>
  </property>
  <widget class="QPushButton" name="button"/>
 </widget>
</ui>
"#;
        let doc = Parser::new(xml).parse().unwrap();
        let root = doc.root();

        let ui = doc.first_child(root).unwrap();
        assert_eq!(doc.node(ui).tag, "ui");
        assert_eq!(doc.node(ui).attr("version"), Some("4.0"));
        assert_eq!(doc.node(ui).text, "");

        let form = doc.find_child(ui, "widget").unwrap();
        assert_eq!(doc.name(form), "Form");
        let children = doc.children(form);
        assert_eq!(children.len(), 2);
        assert_eq!(doc.kind(children[0]), NodeKind::Property);
        assert_eq!(doc.value_text(children[0]), Some("Hello & welcome"));
        assert_eq!(doc.class(children[1]), Some("QPushButton"));
        assert_eq!(doc.parent(children[1]), Some(form));
    }

    #[test]
    fn test_leaf_whitespace_is_kept() {
        let doc = Parser::new(b"<ui><string>  padded  </string></ui>").parse().unwrap();
        let ui = doc.first_child(doc.root()).unwrap();
        assert_eq!(doc.value_text(ui), Some("  padded  "));
    }

    #[test]
    fn test_malformed_xml_fails() {
        let err = Parser::new(b"<ui><widget></ui>").parse().unwrap_err();
        assert!(matches!(err, TransformError::Xml { .. }), "got {:?}", err);
    }

    #[test]
    fn test_unclosed_document_fails() {
        let err = Parser::new(b"<ui><widget>").parse().unwrap_err();
        assert!(
            matches!(err, TransformError::UnclosedElement(_) | TransformError::Xml { .. }),
            "got {:?}",
            err
        );
    }

    #[test]
    fn test_builder_rejects_end_past_root() {
        let mut builder = TreeBuilder::new();
        builder.start_element("ui", IndexMap::new());
        builder.end_element("ui").unwrap();

        let err = builder.end_element("ui").unwrap_err();
        assert!(matches!(err, TransformError::UnbalancedElement(ref tag) if tag == "ui"));
    }

    #[test]
    fn test_builder_accumulates_characters() {
        let mut builder = TreeBuilder::new();
        builder.start_element("string", IndexMap::new());
        builder.characters("multi");
        builder.characters("part");
        builder.end_element("string").unwrap();

        let doc = builder.finish().unwrap();
        let node = doc.first_child(doc.root()).unwrap();
        assert_eq!(doc.node(node).text, "multipart");
    }
}
