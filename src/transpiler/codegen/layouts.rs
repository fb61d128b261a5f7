/// Layouts, spacers and placement into layout cells
use super::CodeGenerator;
use crate::transpiler::ast::{Node, NodeId, NodeKind};
use crate::transpiler::error::{parse_int, TransformError};
use crate::transpiler::values::enum_case;

/// Comma-separated per-index layout attributes and the setter each one maps to:
/// (attribute, method, index label, value label)
const INDEXED_SETTERS: [(&str, &str, &str, &str); 5] = [
    ("stretch", "setStretch", "index", "stretch"),
    ("rowminimumheight", "setRowMinimumHeight", "row", "minSize"),
    ("columnminimumwidth", "setColumnMinimumWidth", "column", "minSize"),
    ("rowstretch", "setRowStretch", "row", "stretch"),
    ("columnstretch", "setColumnStretch", "column", "stretch"),
];

/// Trailing arguments (and closing paren) of an `add(widget:|layout:|item:` call for a
/// layout cell.
///
/// Grid cells with a span use the five-argument form, defaulting a missing span to 1;
/// plain grid cells use `row:column:`; box layout cells have no coordinates.
pub fn cell_arguments(item: &Node) -> String {
    match (item.attr("row"), item.attr("column")) {
        (Some(row), Some(column)) => {
            let row_span = item.attr("rowspan");
            let column_span = item.attr("colspan");
            if row_span.is_some() || column_span.is_some() {
                format!(
                    ", fromRow: {}, fromColumn: {}, rowSpan: {}, columnSpan: {})",
                    row,
                    column,
                    row_span.unwrap_or("1"),
                    column_span.unwrap_or("1")
                )
            } else {
                format!(", row: {}, column: {})", row, column)
            }
        }
        _ => ")".to_string(),
    }
}

impl<'a> CodeGenerator<'a> {
    pub(super) fn emit_layout(&mut self, id: NodeId) -> Result<(), TransformError> {
        let doc = self.doc;
        let class = doc
            .class(id)
            .ok_or_else(|| TransformError::missing_attribute("layout", "class"))?;
        let name = doc.name(id);
        let parent = if doc.parent_kind(id) == Some(NodeKind::Widget) {
            self.owner_name(id)
        } else {
            "nil"
        };

        self.statement(format!("{} = {}(parent: {})", name, class, parent));
        self.statement(format!("{}.objectName = \"{}\"", name, name));
        let margins = self.contents_margins(id)?.unwrap_or_else(|| {
            format!(
                "{}.contentsMargins = QMargins(left: 0, top: 0, right: 0, bottom: 0)",
                name
            )
        });
        self.statement(margins);

        self.emit_children(id)?;

        let node = doc.node(id);
        for (attribute, method, index_label, value_label) in INDEXED_SETTERS {
            let Some(list) = node.attr(attribute) else {
                continue;
            };
            for (index, value) in parse_list(attribute, list)?.into_iter().enumerate() {
                if let Some(value) = value.filter(|value| *value != 0) {
                    self.statement(format!(
                        "{}.{}({}: {}, {}: {})",
                        name, method, index_label, index, value_label, value
                    ));
                }
            }
        }

        self.attach_to_cell(id, "layout");
        Ok(())
    }

    pub(super) fn emit_spacer(&mut self, id: NodeId) -> Result<(), TransformError> {
        let doc = self.doc;
        let name = doc.name(id);

        let property = |wanted: &str| {
            doc.children(id).iter().copied().find(|child| {
                doc.kind(*child) == NodeKind::Property && doc.name(*child) == wanted
            })
        };

        let orientation = property("orientation")
            .and_then(|p| doc.value_text(p))
            .map(enum_case)
            .unwrap_or_default();
        let (mut horizontal, mut vertical) = match orientation.as_str() {
            ".Horizontal" => (".Expanding".to_string(), ".Minimum".to_string()),
            ".Vertical" => (".Minimum".to_string(), ".Expanding".to_string()),
            _ => (String::new(), String::new()),
        };

        // An explicit size type overrides the policy along the spacer's own axis
        if let Some(size_type) = property("sizeType").and_then(|p| doc.value_text(p)) {
            match orientation.as_str() {
                ".Horizontal" => horizontal = enum_case(size_type.trim()),
                ".Vertical" => vertical = enum_case(size_type.trim()),
                _ => {}
            }
        }

        let (mut width, mut height) = (0, 0);
        if let Some(size) = property("sizeHint").and_then(|p| doc.first_child(p)) {
            for child in doc.children(size) {
                let node = doc.node(*child);
                match node.tag.as_str() {
                    "width" => width = parse_int("width", &node.text)?,
                    "height" => height = parse_int("height", &node.text)?,
                    _ => {}
                }
            }
        }

        self.statement(format!(
            "{} = QSpacerItem(width: {}, height: {}, horizontalPolicy: {}, verticalPolicy: {})",
            name, width, height, horizontal, vertical
        ));
        self.attach_to_cell(id, "item");
        Ok(())
    }

    /// `layout.add(<label>: name, ...)` when `id` sits in a layout `<item>`
    fn attach_to_cell(&mut self, id: NodeId, label: &str) {
        let doc = self.doc;
        let Some(item) = doc.parent(id) else {
            return;
        };
        if doc.kind(item) != NodeKind::Item {
            return;
        }
        if let Some(layout) = doc.parent(item) {
            self.statement(format!(
                "{}.add({}: {}{}",
                doc.name(layout),
                label,
                doc.name(id),
                cell_arguments(doc.node(item))
            ));
        }
    }
}

/// One entry per comma-separated position; empty positions are `None`
fn parse_list(attribute: &str, list: &str) -> Result<Vec<Option<i64>>, TransformError> {
    list.split(',')
        .map(|value| {
            if value.trim().is_empty() {
                Ok(None)
            } else {
                parse_int(attribute, value).map(Some)
            }
        })
        .collect()
}
