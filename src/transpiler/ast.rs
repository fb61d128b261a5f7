/// Document tree for .ui files
///
/// Nodes live in one arena owned by [`Document`] and refer to each other by [`NodeId`].
/// Children are ordered as in the source document; the parent link is navigation only.
use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Element kinds the generator treats specially. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Widget,
    Layout,
    Spacer,
    Action,
    Item,
    Property,
    Attribute,
    AddAction,
    ZOrder,
    Connection,
    Other,
}

impl NodeKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "widget" => NodeKind::Widget,
            "layout" => NodeKind::Layout,
            "spacer" => NodeKind::Spacer,
            "action" => NodeKind::Action,
            "item" => NodeKind::Item,
            "property" => NodeKind::Property,
            "attribute" => NodeKind::Attribute,
            "addaction" => NodeKind::AddAction,
            "zorder" => NodeKind::ZOrder,
            "connection" => NodeKind::Connection,
            _ => NodeKind::Other,
        }
    }

    /// Kinds that become a field on the generated class
    pub fn is_instance(self) -> bool {
        matches!(
            self,
            NodeKind::Widget | NodeKind::Layout | NodeKind::Spacer | NodeKind::Action
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub tag: String,
    pub kind: NodeKind,
    pub attributes: IndexMap<String, String>,
    pub text: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Node {
    fn new(tag: &str, attributes: IndexMap<String, String>, parent: Option<NodeId>) -> Self {
        Node {
            tag: tag.to_string(),
            kind: NodeKind::from_tag(tag),
            attributes,
            text: String::new(),
            children: Vec::new(),
            parent,
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// The `name` attribute, or "" when absent
    pub fn name(&self) -> &str {
        self.attr("name").unwrap_or("")
    }

    pub fn class(&self) -> Option<&str> {
        self.attr("class")
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// An empty document holding only the synthetic `root` node
    pub fn new() -> Self {
        Document {
            nodes: vec![Node::new("root", IndexMap::new(), None)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn append_child(
        &mut self,
        parent: NodeId,
        tag: &str,
        attributes: IndexMap<String, String>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(tag, attributes, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn grandparent(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).and_then(|parent| self.parent(parent))
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).children.first().copied()
    }

    pub fn find_child(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|child| self.node(*child).tag == tag)
    }

    pub fn name(&self, id: NodeId) -> &str {
        self.node(id).name()
    }

    pub fn class(&self, id: NodeId) -> Option<&str> {
        self.node(id).class()
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    pub fn parent_kind(&self, id: NodeId) -> Option<NodeKind> {
        self.parent(id).map(|parent| self.kind(parent))
    }

    pub fn parent_class(&self, id: NodeId) -> Option<&str> {
        self.parent(id).and_then(|parent| self.class(parent))
    }

    /// Character data of the first child, e.g. the `10` in `<property><number>10</number>`
    pub fn value_text(&self, id: NodeId) -> Option<&str> {
        self.first_child(id).map(|child| self.node(child).text.as_str())
    }

    /// Debug-style rendering used for elements the generator has no rule for:
    /// `tag: text` for leaves, `tag: [child, child]` otherwise.
    pub fn describe(&self, id: NodeId) -> String {
        let node = self.node(id);
        if node.text.is_empty() {
            let children = node
                .children
                .iter()
                .map(|child| self.describe(*child))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}: [{}]", node.tag, children)
        } else {
            format!("{}: {}", node.tag, node.text)
        }
    }

    /// Pre-order walk of every descendant of `id`, in document order
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(id, &mut out);
        out
    }

    fn collect_descendants(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for child in self.children(id) {
            out.push(*child);
            self.collect_descendants(*child, out);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_append_child_links_parent() {
        let mut doc = Document::new();
        let root = doc.root();
        let widget = doc.append_child(root, "widget", attrs(&[("class", "QWidget"), ("name", "w")]));
        let layout = doc.append_child(widget, "layout", attrs(&[("class", "QVBoxLayout")]));

        assert_eq!(doc.parent(layout), Some(widget));
        assert_eq!(doc.grandparent(layout), Some(root));
        assert_eq!(doc.parent(root), None);
        assert_eq!(doc.children(widget), &[layout]);
        assert_eq!(doc.kind(widget), NodeKind::Widget);
        assert_eq!(doc.name(layout), "");
        assert_eq!(doc.class(widget), Some("QWidget"));
    }

    #[test]
    fn test_describe() {
        let mut doc = Document::new();
        let root = doc.root();
        let attribute = doc.append_child(root, "attribute", attrs(&[("name", "headerVisible")]));
        let value = doc.append_child(attribute, "bool", IndexMap::new());
        doc.node_mut(value).text.push_str("true");
        let empty = doc.append_child(root, "resources", IndexMap::new());

        assert_eq!(doc.describe(attribute), "attribute: [bool: true]");
        assert_eq!(doc.describe(empty), "resources: []");
    }

    #[test]
    fn test_descendants_are_preorder() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.append_child(root, "a", IndexMap::new());
        let b = doc.append_child(a, "b", IndexMap::new());
        let c = doc.append_child(root, "c", IndexMap::new());

        assert_eq!(doc.descendants(root), vec![a, b, c]);
    }

    #[test]
    fn test_instance_kinds() {
        assert!(NodeKind::from_tag("spacer").is_instance());
        assert!(NodeKind::from_tag("action").is_instance());
        assert!(!NodeKind::from_tag("item").is_instance());
        assert_eq!(NodeKind::from_tag("rect"), NodeKind::Other);
    }
}
