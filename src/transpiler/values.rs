/// Renders property values (`<string>`, `<enum>`, `<rect>`, ...) as Swift expressions
use crate::transpiler::ast::{Document, NodeId};
use crate::transpiler::error::{parse_int, TransformError};
use crate::transpiler::strings::LocalizationTable;

pub struct ValueRenderer {
    localize: bool,
    table_name: String,
    strings: LocalizationTable,
}

impl ValueRenderer {
    /// `table_name` is the `.strings` table the generated lookups read from.
    pub fn new(localize: bool, table_name: &str) -> Self {
        ValueRenderer {
            localize,
            table_name: table_name.to_string(),
            strings: LocalizationTable::new(),
        }
    }

    pub fn strings(&self) -> &LocalizationTable {
        &self.strings
    }

    pub fn into_strings(self) -> LocalizationTable {
        self.strings
    }

    /// Render the value node `value`. `key` is the localization key used if the value is a
    /// translatable string (the owning field's name).
    pub fn render(
        &mut self,
        doc: &Document,
        value: NodeId,
        key: &str,
    ) -> Result<String, TransformError> {
        let node = doc.node(value);
        match node.tag.as_str() {
            "string" => {
                let translatable = self.localize
                    && node.attr("notr") != Some("true")
                    && !node.text.is_empty();
                if translatable {
                    Ok(self.localized(doc, value, key))
                } else {
                    Ok(quote(&node.text))
                }
            }
            "pixmap" => Ok(quote(&node.text)),
            "enum" => Ok(enum_case(&node.text)),
            "set" => Ok(set_cases(&node.text)),
            "bool" | "number" => Ok(node.text.clone()),
            "rect" => render_rect(doc, value),
            "size" => render_size(doc, value),
            // palette, iconset, font, ... are not modelled
            _ => Ok(node.tag.clone()),
        }
    }

    fn localized(&mut self, doc: &Document, value: NodeId, key: &str) -> String {
        let node = doc.node(value);
        let mut comment = node.attr("comment").unwrap_or("").to_string();
        if let Some(extra) = node.attr("extracomment") {
            comment.push_str(", ");
            comment.push_str(extra);
        }

        let key = self.strings.register(key, &node.text, &comment);
        let literal = if needs_block_literal(&node.text) {
            format!("\n\"\"\"\n{}\n\"\"\"", node.text)
        } else {
            format!("\"{}\"", node.text)
        };

        format!(
            "NSLocalizedString(\"{}\", tableName: \"{}\", bundle: Bundle.lang, value: {}, comment: \"{}\")",
            key, self.table_name, literal, comment
        )
    }
}

fn needs_block_literal(text: &str) -> bool {
    text.contains('\n') || text.contains('"')
}

/// Swift string literal; multi-line literal when the text has newlines or quotes
pub fn quote(text: &str) -> String {
    if needs_block_literal(text) {
        format!("\"\"\"\n{}\n\"\"\"", text)
    } else {
        format!("\"{}\"", text)
    }
}

/// `Qt::AlignCenter` -> `.AlignCenter`
pub fn enum_case(value: &str) -> String {
    let case = value.rsplit("::").next().unwrap_or(value);
    format!(".{}", case)
}

/// `Qt::AlignLeft|Qt::AlignTop` -> `[.AlignLeft, .AlignTop]`
pub fn set_cases(value: &str) -> String {
    let cases: Vec<String> = value.split('|').map(enum_case).collect();
    if cases.len() > 1 {
        format!("[{}]", cases.join(", "))
    } else {
        cases.into_iter().next().unwrap_or_default()
    }
}

fn render_rect(doc: &Document, value: NodeId) -> Result<String, TransformError> {
    let (mut x, mut y, mut width, mut height) = (0, 0, 0, 0);
    for child in doc.children(value) {
        let node = doc.node(*child);
        match node.tag.as_str() {
            "x" => x = parse_int("x", &node.text)?,
            "y" => y = parse_int("y", &node.text)?,
            "width" => width = parse_int("width", &node.text)?,
            "height" => height = parse_int("height", &node.text)?,
            other => log::warn!("unknown rect component <{}>", other),
        }
    }
    Ok(format!(
        "QRect(x: {}, y: {}, width: {}, height: {})",
        x, y, width, height
    ))
}

fn render_size(doc: &Document, value: NodeId) -> Result<String, TransformError> {
    let (mut width, mut height) = (0, 0);
    for child in doc.children(value) {
        let node = doc.node(*child);
        match node.tag.as_str() {
            "width" => width = parse_int("width", &node.text)?,
            "height" => height = parse_int("height", &node.text)?,
            other => log::warn!("unknown size component <{}>", other),
        }
    }
    Ok(format!("QSize(width: {}, height: {})", width, height))
}
