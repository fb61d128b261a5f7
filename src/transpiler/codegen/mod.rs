/// Code generator for Swift/Qlift output
///
/// Walks the prepared document and writes one class per form: field declarations, slot
/// stubs and a constructor that builds the widget tree. Statement order inside the
/// constructor is fixed: button groups, actions, everything else, the form's own margins,
/// then signal/slot connections.
mod layouts;
mod widgets;

use std::collections::HashSet;

use crate::transpiler::ast::{Document, NodeId, NodeKind};
use crate::transpiler::declarations::Form;
use crate::transpiler::error::{parse_int, TransformError};
use crate::transpiler::strings::LocalizationTable;
use crate::transpiler::values::{quote, ValueRenderer};

pub use layouts::cell_arguments;
pub use widgets::dock_area;

const MARGIN_PROPERTIES: [&str; 4] = ["leftMargin", "topMargin", "rightMargin", "bottomMargin"];

pub struct CodeGenerator<'a> {
    doc: &'a Document,
    localize: bool,
    values: ValueRenderer,
    /// Widgets emitted so far whose class is QMenu; `addaction` refers to them via `menuAction()`
    menus: HashSet<String>,
    /// Literal for the last `title` attribute seen, consumed by `QTabWidget.addTab`
    tab_title: String,
    indent_level: usize,
    output: String,
}

impl<'a> CodeGenerator<'a> {
    /// `table_name` names the `.strings` table used by localized lookups.
    pub fn new(doc: &'a Document, table_name: &str, localize: bool) -> Self {
        CodeGenerator {
            doc,
            localize,
            values: ValueRenderer::new(localize, table_name),
            menus: HashSet::new(),
            tab_title: quote(""),
            indent_level: 0,
            output: String::new(),
        }
    }

    /// Strings registered while generating, in registration order
    pub fn into_strings(self) -> LocalizationTable {
        self.values.into_strings()
    }

    pub fn generate(&mut self, form: &Form) -> Result<String, TransformError> {
        let doc = self.doc;

        // Imports
        self.output.push_str("import Qlift\n");
        if self.localize {
            self.output.push_str("import class Foundation.Bundle\n");
            self.output.push_str("import func Foundation.NSLocalizedString\n");
        }
        self.output.push_str("\n\n");

        // Class and fields
        self.output
            .push_str(&format!("class {}: {} {{\n", form.class_name, form.base_class));
        for declaration in &form.declarations {
            self.output.push_str(&format!(
                "    var {}: {}!\n",
                declaration.name, declaration.type_name
            ));
        }

        let groups = self.button_groups(form.ui)?;
        for group in &groups {
            self.output
                .push_str(&format!("    var {}: QButtonGroup!\n", group));
        }

        // Slot stubs
        if let Some(slots) = doc.find_child(form.ui, "slots") {
            self.output.push('\n');
            for slot in doc.children(slots) {
                let node = doc.node(*slot);
                if node.tag != "slot" {
                    continue;
                }
                self.output
                    .push_str(&format!("    open func {} {{}}\n", slot_signature(&node.text)));
            }
        }

        // Constructor
        self.output.push('\n');
        self.output.push_str(
            "    override init(parent: QWidget? = nil, flags: Qt.WindowFlags = .Widget) {\n",
        );
        self.output
            .push_str("        super.init(parent: parent, flags: flags)\n");
        self.indent_level = 2;

        for group in &groups {
            self.statement(format!("{} = QButtonGroup(parent: self)", group));
        }

        // 1. Actions
        for child in doc.children(form.root) {
            if doc.kind(*child) == NodeKind::Action {
                self.emit_node(*child)?;
            }
        }

        // 2. Everything except actions
        for child in doc.children(form.root) {
            if doc.kind(*child) != NodeKind::Action {
                self.emit_node(*child)?;
            }
        }

        // 3. Margins of the form itself
        if let Some(margins) = self.contents_margins(form.root)? {
            self.statement(margins);
        }

        // 4. Connections
        if let Some(connections) = doc.find_child(form.ui, "connections") {
            for connection in doc.children(connections) {
                if doc.kind(*connection) == NodeKind::Connection {
                    self.emit_connection(*connection, &form.class_name)?;
                }
            }
        }

        self.indent_level = 0;
        self.output.push_str("    }\n");
        self.output.push_str("}\n");

        Ok(std::mem::take(&mut self.output))
    }

    fn button_groups(&self, ui: NodeId) -> Result<Vec<String>, TransformError> {
        let doc = self.doc;
        let Some(groups) = doc.find_child(ui, "buttongroups") else {
            return Ok(Vec::new());
        };
        doc.children(groups)
            .iter()
            .map(|group| {
                doc.node(*group)
                    .attr("name")
                    .map(str::to_string)
                    .ok_or_else(|| TransformError::missing_attribute("buttongroup", "name"))
            })
            .collect()
    }

    fn emit_node(&mut self, id: NodeId) -> Result<(), TransformError> {
        match self.doc.kind(id) {
            NodeKind::Property => self.emit_property(id),
            NodeKind::AddAction => self.emit_add_action(id),
            NodeKind::Action => self.emit_action(id),
            NodeKind::Widget => self.emit_widget(id),
            NodeKind::Layout => self.emit_layout(id),
            NodeKind::Item => self.emit_children(id),
            NodeKind::Spacer => self.emit_spacer(id),
            NodeKind::ZOrder => {
                self.emit_zorder(id);
                Ok(())
            }
            NodeKind::Attribute => {
                self.emit_attribute(id);
                Ok(())
            }
            NodeKind::Connection | NodeKind::Other => {
                self.emit_fallback(id);
                Ok(())
            }
        }
    }

    fn emit_children(&mut self, id: NodeId) -> Result<(), TransformError> {
        for child in self.doc.children(id) {
            self.emit_node(*child)?;
        }
        Ok(())
    }

    /// Elements without a rule are written out as their description
    fn emit_fallback(&mut self, id: NodeId) {
        let description = self.doc.describe(id);
        self.statement(description);
    }

    fn emit_property(&mut self, id: NodeId) -> Result<(), TransformError> {
        let doc = self.doc;
        let name = doc
            .node(id)
            .attr("name")
            .ok_or_else(|| TransformError::missing_attribute("property", "name"))?;
        let owner = self.owner_name(id);

        match name {
            // Palettes and icons are not supported
            "palette" | "icon" => {}
            // Collected by contents_margins
            _ if MARGIN_PROPERTIES.contains(&name) => {}
            "sizePolicy" => {
                let policy = self.value_node(id, name)?;
                let node = doc.node(policy);
                let horizontal = node
                    .attr("hsizetype")
                    .ok_or_else(|| TransformError::missing_attribute("sizepolicy", "hsizetype"))?;
                let vertical = node
                    .attr("vsizetype")
                    .ok_or_else(|| TransformError::missing_attribute("sizepolicy", "vsizetype"))?;
                self.statement(format!(
                    "{}.sizePolicy = QSizePolicy(horizontal: .{}, vertical: .{})",
                    owner, horizontal, vertical
                ));
            }
            "pixmap" => {
                let value = self.render_value(id, name, owner)?;
                self.statement(format!("{}.setPixmap(QPixmap(fileName: {}))", owner, value));
            }
            "iconSize" => {
                let value = self.render_value(id, name, owner)?;
                self.statement(format!("{}.setIconSize({})", owner, value));
            }
            "autoFillBackground" => {
                let value = self.render_value(id, name, owner)?;
                self.statement(format!("{}.autoFillBackground = {}", owner, value));
            }
            "flat" => {
                let value = self.render_value(id, name, owner)?;
                self.statement(format!("{}.isFlat = {}", owner, value));
            }
            _ if doc.parent_kind(id) == Some(NodeKind::Item) => {
                // Property of the layout item itself: it belongs to the enclosing layout
                let layout = doc.grandparent(id).map(|g| doc.name(g)).unwrap_or("nil");
                let value = self.render_value(id, name, layout)?;
                self.statement(format!("{}.add(item: {})", layout, value));
            }
            _ => {
                let value = self.render_value(id, name, owner)?;
                self.statement(format!("{}.{} = {}", owner, name, value));
            }
        }
        Ok(())
    }

    fn emit_connection(&mut self, id: NodeId, class_name: &str) -> Result<(), TransformError> {
        let doc = self.doc;
        let part = |tag: &'static str| {
            doc.find_child(id, tag)
                .map(|child| doc.node(child).text.trim())
                .ok_or(TransformError::MissingElement(tag))
        };
        let sender = part("sender")?;
        let signal = part("signal")?;
        let receiver = part("receiver")?;
        let slot = part("slot")?;

        // The form itself is `self` inside its own constructor
        let sender_object = if sender == class_name { "self" } else { sender };
        let receiver_object = if receiver == class_name { "self" } else { receiver };
        self.statement(format!(
            "{}.connect{}(target: {}, to: {}.{})",
            sender_object,
            capitalize(strip_arguments(signal)),
            receiver_object,
            receiver,
            strip_arguments(slot)
        ));
        Ok(())
    }

    /// `setLeftMargin`-style properties of `id` folded into one `contentsMargins` statement.
    /// Sides that are not set are -1. `None` when no side is set.
    fn contents_margins(&self, id: NodeId) -> Result<Option<String>, TransformError> {
        let doc = self.doc;
        let mut margins = [-1i64; 4];
        let mut found = false;

        for child in doc.children(id) {
            if doc.kind(*child) != NodeKind::Property {
                continue;
            }
            let name = doc.name(*child);
            let Some(side) = MARGIN_PROPERTIES.iter().position(|m| *m == name) else {
                continue;
            };
            let text = doc
                .value_text(*child)
                .ok_or_else(|| TransformError::MissingValue(name.to_string()))?;
            margins[side] = parse_int(name, text)?;
            found = true;
        }

        if !found {
            return Ok(None);
        }
        Ok(Some(format!(
            "{}.contentsMargins = QMargins(left: {}, top: {}, right: {}, bottom: {})",
            doc.name(id),
            margins[0],
            margins[1],
            margins[2],
            margins[3]
        )))
    }

    fn value_node(&self, property: NodeId, name: &str) -> Result<NodeId, TransformError> {
        self.doc
            .first_child(property)
            .ok_or_else(|| TransformError::MissingValue(name.to_string()))
    }

    fn render_value(
        &mut self,
        property: NodeId,
        name: &str,
        key: &str,
    ) -> Result<String, TransformError> {
        let value = self.value_node(property, name)?;
        self.values.render(self.doc, value, key)
    }

    /// Name of the element that owns `id` (its parent)
    fn owner_name(&self, id: NodeId) -> &'a str {
        let doc = self.doc;
        doc.parent(id).map(|parent| doc.name(parent)).unwrap_or("nil")
    }

    fn statement(&mut self, code: impl AsRef<str>) {
        let indent = self.indent();
        self.output.push_str(&indent);
        self.output.push_str(code.as_ref());
        self.output.push('\n');
    }

    fn indent(&self) -> String {
        "    ".repeat(self.indent_level)
    }
}

/// `toggled(bool)` slots get a named parameter: `toggled(_ state: Bool)`
fn slot_signature(signature: &str) -> String {
    let signature = signature.trim();
    if signature.ends_with("(bool)") {
        format!("{}(_ state: Bool)", strip_arguments(signature))
    } else {
        signature.to_string()
    }
}

fn strip_arguments(signature: &str) -> &str {
    signature.split('(').next().unwrap_or(signature)
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transpiler::declarations::prepare;
    use crate::transpiler::parser::Parser;

    /// Generate the class for `xml` and return (code, strings)
    fn generate(xml: &str, localize: bool) -> (String, LocalizationTable) {
        let mut doc = Parser::new(xml.as_bytes()).parse().unwrap();
        let form = prepare(&mut doc).unwrap();
        let mut generator = CodeGenerator::new(&doc, "Form", localize);
        let code = generator.generate(&form).unwrap();
        (code, generator.into_strings())
    }

    fn body(xml: &str) -> String {
        generate(xml, false).0
    }

    #[test]
    fn test_class_skeleton() {
        let code = body(
            r#"<ui>
 <widget class="QDialog" name="Dialog"/>
 <slots>
  <signal>done()</signal>
  <slot>accept()</slot>
  <slot>setEnabledState(bool)</slot>
 </slots>
</ui>"#,
        );
        let expected = "import Qlift\n\n\nclass Dialog: QDialog {\n\n    open func accept() {}\n    open func setEnabledState(_ state: Bool) {}\n\n    override init(parent: QWidget? = nil, flags: Qt.WindowFlags = .Widget) {\n        super.init(parent: parent, flags: flags)\n    }\n}\n";
        assert_eq!(code, expected);
    }

    #[test]
    fn test_localized_imports() {
        let (code, _) = generate(r#"<ui><widget class="QWidget" name="Form"/></ui>"#, true);
        assert!(code.starts_with(
            "import Qlift\nimport class Foundation.Bundle\nimport func Foundation.NSLocalizedString\n\n\nclass Form: QWidget {\n"
        ));
    }

    #[test]
    fn test_actions_come_first_and_connections_last() {
        let code = body(
            r#"<ui>
 <widget class="QMainWindow" name="MainWindow">
  <property name="leftMargin"><number>4</number></property>
  <widget class="QWidget" name="centralwidget"/>
  <action name="actionQuit">
   <property name="text"><string>Quit</string></property>
  </action>
 </widget>
 <connections>
  <connection>
   <sender>actionQuit</sender>
   <signal>triggered()</signal>
   <receiver>MainWindow</receiver>
   <slot>close()</slot>
  </connection>
 </connections>
</ui>"#,
        );
        let statements: Vec<&str> = code
            .lines()
            .filter(|line| line.starts_with("        "))
            .map(str::trim)
            .collect();
        assert_eq!(
            statements,
            vec![
                "super.init(parent: parent, flags: flags)",
                "actionQuit = QAction(parent: self)",
                "actionQuit.text = \"Quit\"",
                "centralwidget = QWidget(parent: self)",
                "centralwidget.objectName = \"centralwidget\"",
                "self.centralWidget = centralwidget",
                "self.contentsMargins = QMargins(left: 4, top: -1, right: -1, bottom: -1)",
                "actionQuit.connectTriggered(target: self, to: MainWindow.close)",
            ]
        );
    }

    #[test]
    fn test_button_groups() {
        let code = body(
            r#"<ui>
 <widget class="QWidget" name="Form">
  <widget class="QRadioButton" name="radio">
   <attribute name="buttonGroup"><string notr="true">choices</string></attribute>
  </widget>
 </widget>
 <buttongroups><buttongroup name="choices"/></buttongroups>
</ui>"#,
        );
        assert!(code.contains("    var radio: QRadioButton!\n    var choices: QButtonGroup!\n"));
        assert!(code.contains(
            "        super.init(parent: parent, flags: flags)\n        choices = QButtonGroup(parent: self)\n"
        ));
        assert!(code.contains("        choices.addButton(radio)\n"));
    }

    #[test]
    fn test_special_properties() {
        let code = body(
            r#"<ui>
 <widget class="QWidget" name="Form">
  <widget class="QLabel" name="logo">
   <property name="sizePolicy">
    <sizepolicy hsizetype="Preferred" vsizetype="Fixed"><horstretch>0</horstretch></sizepolicy>
   </property>
   <property name="pixmap"><pixmap>:/logo.png</pixmap></property>
   <property name="autoFillBackground"><bool>true</bool></property>
   <property name="palette"><palette/></property>
   <property name="alignment"><set>Qt::AlignCenter</set></property>
  </widget>
  <widget class="QToolButton" name="tool">
   <property name="iconSize"><size><width>16</width><height>16</height></size></property>
   <property name="flat"><bool>false</bool></property>
  </widget>
 </widget>
</ui>"#,
        );
        assert!(code.contains("        logo.sizePolicy = QSizePolicy(horizontal: .Preferred, vertical: .Fixed)\n"));
        assert!(code.contains("        logo.setPixmap(QPixmap(fileName: \":/logo.png\"))\n"));
        assert!(code.contains("        logo.autoFillBackground = true\n"));
        assert!(code.contains("        logo.alignment = .AlignCenter\n"));
        assert!(!code.contains("palette"));
        assert!(code.contains("        tool.setIconSize(QSize(width: 16, height: 16))\n"));
        assert!(code.contains("        tool.isFlat = false\n"));
    }

    #[test]
    fn test_unknown_elements_fall_back_to_description() {
        let code = body(
            r#"<ui>
 <widget class="QWidget" name="Form">
  <widget class="QTableWidget" name="table">
   <attribute name="horizontalHeaderVisible"><bool>false</bool></attribute>
   <column/>
  </widget>
 </widget>
</ui>"#,
        );
        assert!(code.contains("        attribute: [bool: false]\n"));
        assert!(code.contains("        column: []\n"));
    }

    #[test]
    fn test_missing_property_value_fails() {
        let mut doc = Parser::new(
            br#"<ui><widget class="QWidget" name="Form"><property name="enabled"/></widget></ui>"#,
        )
        .parse()
        .unwrap();
        let form = prepare(&mut doc).unwrap();
        let err = CodeGenerator::new(&doc, "Form", false)
            .generate(&form)
            .unwrap_err();
        assert!(matches!(err, TransformError::MissingValue(ref name) if name == "enabled"));
    }

    #[test]
    fn test_slot_signature() {
        assert_eq!(slot_signature("onToggle(bool)"), "onToggle(_ state: Bool)");
        assert_eq!(slot_signature("onClick()"), "onClick()");
        assert_eq!(capitalize("textChanged"), "TextChanged");
        assert_eq!(strip_arguments("textChanged(QString)"), "textChanged");
    }
}
