//! # Export Node Tree
//!
//! A small virtual DOM used for both renderings of the email: the live
//! editing tree the host page mounts, and the final tree that is serialized
//! for export. Nodes are plain values, so every render produces an
//! independent structure that later edits cannot reach.

use crate::error::{CommonError, CommonResult};
use serde::{Deserialize, Serialize};

/// Virtual DOM node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML element
    Element {
        tag: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        classes: Vec<String>,
        /// Attributes in insertion order (serialization must be stable)
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        attributes: Vec<(String, String)>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<VNode>,
    },

    /// Text node
    Text { content: String },

    /// Comment node
    Comment { content: String },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn comment(content: impl Into<String>) -> Self {
        VNode::Comment {
            content: content.into(),
        }
    }

    pub fn with_id(mut self, new_id: impl Into<String>) -> Self {
        if let VNode::Element { ref mut id, .. } = self {
            *id = Some(new_id.into());
        }
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut classes, ..
        } = self
        {
            let class = class.into();
            if !classes.contains(&class) {
                classes.push(class);
            }
        }
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            VNode::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            VNode::Element { id, .. } => id.as_deref(),
            _ => None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, VNode::Element { .. })
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    /// Set an attribute, replacing an existing value in place
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        if let VNode::Element { attributes, .. } = self {
            let key = key.into();
            let value = value.into();
            match attributes.iter_mut().find(|(name, _)| *name == key) {
                Some(existing) => existing.1 = value,
                None => attributes.push((key, value)),
            }
        }
    }

    pub fn remove_attr(&mut self, key: &str) {
        if let VNode::Element { attributes, .. } = self {
            attributes.retain(|(name, _)| name != key);
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        match self {
            VNode::Element { classes, .. } => classes.iter().any(|c| c == class),
            _ => false,
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        if let VNode::Element { classes, .. } = self {
            classes.retain(|c| c != class);
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<VNode>> {
        match self {
            VNode::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Concatenated text of this node and all descendants
    pub fn text_content(&self) -> String {
        match self {
            VNode::Text { content } => content.clone(),
            VNode::Comment { .. } => String::new(),
            VNode::Element { children, .. } => {
                children.iter().map(VNode::text_content).collect()
            }
        }
    }

    pub fn find_by_id(&self, target: &str) -> Option<&VNode> {
        if self.id() == Some(target) {
            return Some(self);
        }
        self.children()
            .iter()
            .find_map(|child| child.find_by_id(target))
    }

    pub fn find_by_id_mut(&mut self, target: &str) -> Option<&mut VNode> {
        if self.id() == Some(target) {
            return Some(self);
        }
        match self {
            VNode::Element { children, .. } => children
                .iter_mut()
                .find_map(|child| child.find_by_id_mut(target)),
            _ => None,
        }
    }

    /// Insert `node` before the direct child with id `anchor_id`.
    ///
    /// Appends when no child carries the anchor id.
    pub fn insert_before(&mut self, anchor_id: &str, node: VNode) -> CommonResult<()> {
        let children = self.children_mut().ok_or(CommonError::NotAnElement)?;
        let index = children
            .iter()
            .position(|child| child.id() == Some(anchor_id))
            .unwrap_or(children.len());
        children.insert(index, node);
        Ok(())
    }

    pub fn clear_children(&mut self) {
        if let Some(children) = self.children_mut() {
            children.clear();
        }
    }
}
