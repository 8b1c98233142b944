use super::*;

/// One inline error element to render next to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorMessage<'a> {
    pub id: &'a str,
    pub class_name: &'a str,
    pub text: &'a str,
}

/// Document access the validation engine relies on.
///
/// The engine never holds on to the document; every call receives the host
/// explicitly, so a fake document can stand in for a browser in tests. Commit
/// triggers are delivered by the host calling [`Validator::evaluate`] with one
/// of the engine's [`Binding`]s.
pub trait FormHost {
    type Node: Copy + Eq + fmt::Debug;

    fn query(&self, selector: &str) -> Result<Option<Self::Node>>;

    fn query_within(&self, container: Self::Node, selector: &str) -> Result<Option<Self::Node>>;

    /// `<input>` descendants of `container` in document order.
    fn inputs_within(&self, container: Self::Node) -> Vec<Self::Node>;

    fn has_attribute(&self, node: Self::Node, name: &str) -> bool;

    /// Current value, read live on every call.
    fn value(&self, node: Self::Node) -> Result<String>;

    fn set_disabled(&mut self, node: Self::Node, disabled: bool) -> Result<()>;

    /// Inserts the message element immediately before `field` in its parent.
    fn insert_message_before(
        &mut self,
        field: Self::Node,
        message: ErrorMessage<'_>,
    ) -> Result<()>;

    /// Detaches the element with `element_id`. Returns `false` when no such element exists.
    fn remove_message(&mut self, element_id: &str) -> Result<bool>;

    fn label(&self, node: Self::Node) -> String;
}

impl Dom {
    pub fn from_html(html: &str) -> Result<Self> {
        parse_html(html)
    }
}

impl FormHost for Dom {
    type Node = NodeId;

    fn query(&self, selector: &str) -> Result<Option<NodeId>> {
        self.query_selector(selector)
    }

    fn query_within(&self, container: NodeId, selector: &str) -> Result<Option<NodeId>> {
        self.query_selector_from(container, selector)
    }

    fn inputs_within(&self, container: NodeId) -> Vec<NodeId> {
        self.elements_by_tag_name(container, "input")
    }

    fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.has_attr(node, name)
    }

    fn value(&self, node: NodeId) -> Result<String> {
        Dom::value(self, node)
    }

    fn set_disabled(&mut self, node: NodeId, disabled: bool) -> Result<()> {
        Dom::set_disabled(self, node, disabled)
    }

    fn insert_message_before(&mut self, field: NodeId, message: ErrorMessage<'_>) -> Result<()> {
        let parent = self
            .parent(field)
            .ok_or_else(|| Error::Dom("error message target field is detached".into()))?;
        let span = self.create_detached_element("span");
        self.set_attr(span, "class", message.class_name)?;
        self.set_attr(span, "id", message.id)?;
        self.set_text_content(span, message.text)?;
        self.insert_before(parent, span, field)
    }

    fn remove_message(&mut self, element_id: &str) -> Result<bool> {
        let Some(node) = self.by_id(element_id) else {
            return Ok(false);
        };
        self.remove_node(node)?;
        Ok(true)
    }

    fn label(&self, node: NodeId) -> String {
        if let Some(id) = self.attr(node, "id") {
            if !id.is_empty() {
                return format!("#{id}");
            }
        }
        self.tag_name(node)
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| format!("node-{}", node.0))
    }
}
