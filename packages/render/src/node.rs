//! Render tree produced by every platform renderer.
//!
//! Platforms disagree on element kinds (`div` vs `Column` vs `VStack`) and
//! layout attributes, so the tree itself is platform-specific. [`describe`]
//! strips it down to the ordered [`Fragment`]s a user would actually see,
//! which must match across platforms.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "camelCase")]
pub enum RenderNode {
    /// Layout container
    Element {
        kind: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attributes: BTreeMap<String, String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<RenderNode>,
    },

    /// Styled run of text
    #[serde(rename_all = "camelCase")]
    Text { content: String, size: f64, bold: bool },

    /// Pressable control
    #[serde(rename_all = "camelCase")]
    Control {
        kind: String,
        label: String,
        size: f64,
        enabled: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<String>,
        /// Whether pressing follows `target` (preview) or only selects (edit)
        navigable: bool,
    },
}

impl RenderNode {
    pub fn element(kind: impl Into<String>) -> Self {
        RenderNode::Element {
            kind: kind.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>, size: f64) -> Self {
        RenderNode::Text {
            content: content.into(),
            size,
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        if let RenderNode::Text { ref mut bold, .. } = self {
            *bold = true;
        }
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let RenderNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_child(mut self, child: RenderNode) -> Self {
        if let RenderNode::Element { ref mut children, .. } = self {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<RenderNode>) -> Self {
        if let RenderNode::Element { ref mut children, .. } = self {
            children.extend(new_children);
        }
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            RenderNode::Element { attributes, .. } => attributes.get(key).map(String::as_str),
            _ => None,
        }
    }

    pub fn children(&self) -> &[RenderNode] {
        match self {
            RenderNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        match self {
            RenderNode::Element {
                kind,
                attributes,
                children,
            } => {
                write!(f, "{}{}", pad, kind)?;
                if !attributes.is_empty() {
                    let attrs: Vec<String> = attributes.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                    write!(f, " [{}]", attrs.join(", "))?;
                }
                writeln!(f)?;
                for child in children {
                    child.fmt_indented(f, depth + 1)?;
                }
                Ok(())
            }
            RenderNode::Text { content, size, bold } => {
                writeln!(f, "{}{:?} @{}{}", pad, content, size, if *bold { " bold" } else { "" })
            }
            RenderNode::Control {
                kind,
                label,
                enabled,
                target,
                ..
            } => {
                write!(f, "{}{}({:?})", pad, kind, label)?;
                match (enabled, target) {
                    (true, Some(target)) => writeln!(f, " -> {}", target),
                    _ => writeln!(f, " disabled"),
                }
            }
        }
    }
}

impl fmt::Display for RenderNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

/// What a user sees, independent of platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Fragment {
    Text {
        content: String,
        size: f64,
        #[serde(default)]
        bold: bool,
    },
    #[serde(rename_all = "camelCase")]
    Button {
        label: String,
        size: f64,
        enabled: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<String>,
    },
}

/// Flatten a render tree into its visible fragments, in reading order
pub fn describe(node: &RenderNode) -> Vec<Fragment> {
    let mut out = Vec::new();
    collect(node, &mut out);
    out
}

fn collect(node: &RenderNode, out: &mut Vec<Fragment>) {
    match node {
        RenderNode::Element { children, .. } => {
            for child in children {
                collect(child, out);
            }
        }
        RenderNode::Text { content, size, bold } => out.push(Fragment::Text {
            content: content.clone(),
            size: *size,
            bold: *bold,
        }),
        RenderNode::Control {
            label,
            size,
            enabled,
            target,
            ..
        } => out.push(Fragment::Button {
            label: label.clone(),
            size: *size,
            enabled: *enabled,
            target: target.clone(),
        }),
    }
}
