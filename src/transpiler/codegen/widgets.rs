/// Widget, action and widget-attribute emission
use super::layouts::cell_arguments;
use super::CodeGenerator;
use crate::transpiler::ast::{NodeId, NodeKind};
use crate::transpiler::declarations::{ANONYMOUS_LAYOUT, LINE_CLASS, STATUS_BAR_CLASS};
use crate::transpiler::error::TransformError;
use crate::transpiler::values::{enum_case, quote};

const MAIN_WINDOW: &str = "QMainWindow";
const MENU_BAR: &str = "QMenuBar";
const MENU: &str = "QMenu";
const TOOL_BAR: &str = "QToolBar";
const DOCK_WIDGET: &str = "QDockWidget";
const SCROLL_AREA: &str = "QScrollArea";
const TAB_WIDGET: &str = "QTabWidget";

/// Swift case for a `dockWidgetArea` attribute value
pub fn dock_area(code: &str) -> Option<&'static str> {
    match code.trim().parse::<i64>().ok()? {
        0 => Some(".No"),
        1 => Some(".Left"),
        2 => Some(".Right"),
        4 => Some(".Top"),
        8 => Some(".Bottom"),
        15 => Some(".All"),
        _ => None,
    }
}

impl<'a> CodeGenerator<'a> {
    pub(super) fn emit_widget(&mut self, id: NodeId) -> Result<(), TransformError> {
        let doc = self.doc;
        let class = doc
            .class(id)
            .ok_or_else(|| TransformError::missing_attribute("widget", "class"))?;
        if class == LINE_CLASS {
            return Ok(());
        }
        let name = doc.name(id);
        let parent_name = self
            .parent_widget(id)
            .map(|widget| doc.name(widget))
            .unwrap_or("nil");

        // 1. Construct. Scroll areas and tab widgets take ownership when the child is attached.
        match doc.parent_class(id) {
            Some(SCROLL_AREA) | Some(TAB_WIDGET) => {
                self.statement(format!("{} = {}()", name, class));
            }
            _ if class == STATUS_BAR_CLASS => {
                self.statement(format!("let {} = {}(parent: {})", name, class, parent_name));
            }
            _ => {
                self.statement(format!("{} = {}(parent: {})", name, class, parent_name));
            }
        }
        self.statement(format!("{}.objectName = \"{}\"", name, name));

        // 2. Children and attachment to the parent
        let owner = self.owner_name(id);
        match class {
            MENU_BAR => {
                self.emit_children(id)?;
                self.statement(format!("{}.menuBar = {}", owner, name));
            }
            STATUS_BAR_CLASS => {
                self.emit_children(id)?;
                self.statement(format!("{}.statusBar = {}", owner, name));
            }
            MENU => {
                self.menus.insert(name.to_string());
                self.emit_children(id)?;
            }
            TOOL_BAR => self.emit_tool_bar(id, owner)?,
            DOCK_WIDGET => self.emit_dock_widget(id, owner)?,
            _ => {
                self.emit_children(id)?;
                self.attach_widget(id);
            }
        }

        // 3. Margins after the children
        if let Some(margins) = self.contents_margins(id)? {
            self.statement(margins);
        }
        Ok(())
    }

    /// The widget passed as `parent:` when constructing `id`.
    ///
    /// Children of a dock widget are constructed without a parent; the dock adopts them
    /// through its `widget` property.
    fn parent_widget(&self, id: NodeId) -> Option<NodeId> {
        let doc = self.doc;
        let parent = doc.parent(id)?;
        if doc.class(parent) == Some(DOCK_WIDGET) {
            return None;
        }
        let mut current = parent;
        while doc.kind(current) != NodeKind::Widget {
            current = doc.parent(current)?;
        }
        Some(current)
    }

    fn attach_widget(&mut self, id: NodeId) {
        let doc = self.doc;
        let name = doc.name(id);
        let Some(parent) = doc.parent(id) else {
            return;
        };

        if doc.kind(parent) == NodeKind::Item {
            if let Some(layout) = doc.parent(parent) {
                self.statement(format!(
                    "{}.add(widget: {}{}",
                    doc.name(layout),
                    name,
                    cell_arguments(doc.node(parent))
                ));
            }
            return;
        }

        let owner = doc.name(parent);
        match doc.class(parent) {
            Some(DOCK_WIDGET) => self.statement(format!("{}.widget = {}", owner, name)),
            Some(MAIN_WINDOW) => self.statement(format!("{}.centralWidget = {}", owner, name)),
            Some(SCROLL_AREA) => self.statement(format!("{}.setWidget({})", owner, name)),
            Some(TAB_WIDGET) => {
                let title = self.tab_title.clone();
                self.statement(format!("{}.addTab({}, label: {})", owner, name, title));
            }
            _ => {}
        }
    }

    fn emit_tool_bar(&mut self, id: NodeId, owner: &str) -> Result<(), TransformError> {
        let doc = self.doc;
        let mut area = String::new();
        for child in doc.children(id) {
            if doc.kind(*child) == NodeKind::Attribute && doc.name(*child) == "toolBarArea" {
                let value = doc.value_text(*child).unwrap_or("").trim();
                area = enum_case(value.strip_suffix("ToolBarArea").unwrap_or(value));
            }
        }

        for child in doc.children(id) {
            if doc.kind(*child) != NodeKind::Attribute {
                self.emit_node(*child)?;
            }
        }

        self.statement(format!(
            "{}.add(toolBar: {}, area: {})",
            owner,
            doc.name(id),
            area
        ));
        Ok(())
    }

    fn emit_dock_widget(&mut self, id: NodeId, owner: &str) -> Result<(), TransformError> {
        let doc = self.doc;
        let mut code = "";
        for child in doc.children(id) {
            if doc.kind(*child) == NodeKind::Attribute && doc.name(*child) == "dockWidgetArea" {
                code = doc.value_text(*child).unwrap_or("");
            }
        }

        for child in doc.children(id) {
            if doc.kind(*child) != NodeKind::Attribute {
                self.emit_node(*child)?;
            }
        }

        let area = dock_area(code).unwrap_or_else(|| {
            log::warn!(
                "unknown dock area '{}' for dock widget '{}'",
                code.trim(),
                doc.name(id)
            );
            ""
        });
        self.statement(format!(
            "{}.add(dockWidget: {}, area: {})",
            owner,
            doc.name(id),
            area
        ));
        Ok(())
    }

    pub(super) fn emit_action(&mut self, id: NodeId) -> Result<(), TransformError> {
        let owner = self.owner_name(id);
        self.statement(format!(
            "{} = QAction(parent: {})",
            self.doc.name(id),
            owner
        ));
        self.emit_children(id)
    }

    pub(super) fn emit_add_action(&mut self, id: NodeId) -> Result<(), TransformError> {
        let action = self
            .doc
            .node(id)
            .attr("name")
            .ok_or_else(|| TransformError::missing_attribute("addaction", "name"))?;
        let owner = self.owner_name(id);

        if action == "separator" {
            self.statement(format!("{}.addSeparator()", owner));
        } else if self.menus.contains(action) {
            self.statement(format!("{}.add(action: {}.menuAction())", owner, action));
        } else {
            self.statement(format!("{}.add(action: {})", owner, action));
        }
        Ok(())
    }

    pub(super) fn emit_zorder(&mut self, id: NodeId) {
        let doc = self.doc;
        let value = doc.node(id).text.trim();
        let target = if value == ANONYMOUS_LAYOUT {
            // Designer writes the placeholder name; use the generated one
            doc.parent(id)
                .and_then(|parent| {
                    doc.children(parent)
                        .iter()
                        .map(|sibling| doc.name(*sibling))
                        .find(|name| name.starts_with(ANONYMOUS_LAYOUT))
                })
                .unwrap_or("")
        } else {
            value
        };
        self.statement(format!("{}.raise()", target));
    }

    pub(super) fn emit_attribute(&mut self, id: NodeId) {
        let doc = self.doc;
        let owner = self.owner_name(id);
        match (doc.node(id).attr("name"), doc.value_text(id)) {
            (Some("buttonGroup"), Some(group)) => {
                self.statement(format!("{}.addButton({})", group.trim(), owner));
            }
            (Some("title"), title) => {
                self.tab_title = quote(title.unwrap_or(""));
            }
            _ => self.emit_fallback(id),
        }
    }
}
