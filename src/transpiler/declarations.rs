/// Declaration pass: finds the form's root widget and enumerates the generated fields
use crate::transpiler::ast::{Document, NodeId, NodeKind};
use crate::transpiler::error::TransformError;

/// Name Designer gives to the anonymous widgets it creates to hold free-standing layouts
pub const ANONYMOUS_LAYOUT: &str = "layoutWidget";

/// The root widget is referred to as `self` inside the generated class
pub const SELF_NAME: &str = "self";

pub const LINE_CLASS: &str = "Line";
pub const STATUS_BAR_CLASS: &str = "QStatusBar";
const SPACER_TYPE: &str = "QSpacerItem";
const ACTION_TYPE: &str = "QAction";

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub type_name: String,
}

/// The prepared form: where things are, what the class is called, which fields it has.
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub ui: NodeId,
    pub root: NodeId,
    pub class_name: String,
    pub base_class: String,
    pub declarations: Vec<Declaration>,
}

/// Hands out `widget1`, `layoutWidget2`, ... from one counter shared by every prefix
#[derive(Debug)]
pub struct AutoNamer {
    next: usize,
}

impl AutoNamer {
    pub fn new() -> Self {
        AutoNamer { next: 1 }
    }

    pub fn next_name(&mut self, prefix: &str) -> String {
        let name = format!("{}{}", prefix, self.next);
        self.next += 1;
        name
    }
}

impl Default for AutoNamer {
    fn default() -> Self {
        Self::new()
    }
}

/// Locate the root widget, rename it to `self` and declare every instance node.
pub fn prepare(doc: &mut Document) -> Result<Form, TransformError> {
    let ui = doc
        .find_child(doc.root(), "ui")
        .ok_or(TransformError::MissingElement("ui"))?;
    let root = doc
        .find_child(ui, "widget")
        .ok_or(TransformError::MissingElement("widget"))?;

    let base_class = doc
        .class(root)
        .filter(|class| !class.is_empty())
        .ok_or_else(|| TransformError::missing_attribute("widget", "class"))?
        .to_string();
    let class_name = doc
        .node(root)
        .attr("name")
        .filter(|name| !name.is_empty())
        .ok_or_else(|| TransformError::missing_attribute("widget", "name"))?
        .to_string();

    doc.node_mut(root)
        .attributes
        .insert("name".to_string(), SELF_NAME.to_string());

    let declarations = declare_fields(doc, root);
    log::debug!(
        "declared {} field(s) for {}: {}",
        declarations.len(),
        class_name,
        base_class
    );

    Ok(Form {
        ui,
        root,
        class_name,
        base_class,
        declarations,
    })
}

/// Name every widget/layout/spacer/action below `root` and list the fields, in document order.
///
/// Dividing lines are never referenced again and status bars are built into a local, so
/// neither gets a field (they still receive a name).
pub fn declare_fields(doc: &mut Document, root: NodeId) -> Vec<Declaration> {
    let mut namer = AutoNamer::new();
    let mut declarations = Vec::new();

    for id in doc.descendants(root) {
        let kind = doc.kind(id);
        if !kind.is_instance() {
            continue;
        }

        let type_name = match (doc.class(id), kind) {
            (Some(class), _) => class.to_string(),
            (None, NodeKind::Spacer) => SPACER_TYPE.to_string(),
            (None, NodeKind::Action) => ACTION_TYPE.to_string(),
            (None, _) => String::new(),
        };

        let name = assign_name(doc, id, &mut namer);

        if type_name == LINE_CLASS || type_name == STATUS_BAR_CLASS {
            continue;
        }
        declarations.push(Declaration { name, type_name });
    }

    declarations
}

fn assign_name(doc: &mut Document, id: NodeId, namer: &mut AutoNamer) -> String {
    let mut name = doc.name(id).to_string();
    if name.is_empty() {
        name = namer.next_name("widget");
    }
    if name == ANONYMOUS_LAYOUT {
        name = namer.next_name(ANONYMOUS_LAYOUT);
    }
    doc.node_mut(id)
        .attributes
        .insert("name".to_string(), name.clone());
    name
}
