use crate::vdom::VNode;

/// Visitor pattern for traversing export trees immutably
///
/// This trait provides default implementations that walk the entire tree.
/// Override specific visit_* methods to perform custom actions on nodes.
pub trait Visitor: Sized {
    fn visit_node(&mut self, node: &VNode) {
        walk_node(self, node);
    }

    fn visit_element(&mut self, element: &VNode) {
        walk_element(self, element);
    }

    fn visit_text(&mut self, _content: &str) {
        // Leaf node, no children to walk
    }

    fn visit_comment(&mut self, _content: &str) {
        // Leaf node, no children to walk
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &VNode) {
    match node {
        VNode::Element { .. } => visitor.visit_element(node),
        VNode::Text { content } => visitor.visit_text(content),
        VNode::Comment { content } => visitor.visit_comment(content),
    }
}

pub fn walk_element<V: Visitor>(visitor: &mut V, element: &VNode) {
    for child in element.children() {
        visitor.visit_node(child);
    }
}

/// Collect every element id in document order
pub fn collect_ids(node: &VNode) -> Vec<String> {
    struct IdCollector(Vec<String>);

    impl Visitor for IdCollector {
        fn visit_element(&mut self, element: &VNode) {
            if let Some(id) = element.id() {
                self.0.push(id.to_string());
            }
            walk_element(self, element);
        }
    }

    let mut collector = IdCollector(Vec::new());
    collector.visit_node(node);
    collector.0
}
