//! Owned, namespace-aware XML element tree.

/// Clinical-document default namespace.
pub const HL7_NAMESPACE: &str = "urn:hl7-org:v3";

/// XML Schema instance namespace (`xsi`).
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// HL7 supplemental template namespace (`sdtc`).
pub const SDTC_NAMESPACE: &str = "urn:hl7-org:sdtc";

/// A node inside an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Child element
    Element(Element),
    /// Character data
    Text(String),
}

/// An XML attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Namespace URI, if the attribute is prefixed
    pub namespace: Option<String>,
    /// Local name
    pub name: String,
    /// Attribute value
    pub value: String,
}

/// An XML element with its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Namespace URI
    pub namespace: Option<String>,

    /// Local name
    pub name: String,

    /// Attributes in document order
    pub attributes: Vec<Attribute>,

    /// Child nodes in document order
    pub children: Vec<Node>,

    /// Text before the first child element, if any
    leading_text: Option<String>,
}

impl Element {
    /// Create an element in the clinical-document namespace.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_namespace(Some(HL7_NAMESPACE.to_string()), name)
    }

    /// Create an element in an arbitrary namespace.
    pub fn with_namespace(namespace: Option<String>, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            leading_text: None,
        }
    }

    /// Append an unprefixed attribute.
    pub fn push_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push(Attribute {
            namespace: None,
            name: name.into(),
            value: value.into(),
        });
    }

    /// Append a child node, keeping the leading text in sync.
    pub fn push(&mut self, node: Node) {
        if let Node::Text(ref text) = node {
            if !self.has_element_children() {
                self.leading_text
                    .get_or_insert_with(String::new)
                    .push_str(text);
            }
        }
        self.children.push(node);
    }

    /// Builder-style child element append.
    pub fn child_element(mut self, child: Element) -> Self {
        self.push(Node::Element(child));
        self
    }

    /// Builder-style text append.
    pub fn text_node(mut self, text: impl Into<String>) -> Self {
        self.push(Node::Text(text.into()));
        self
    }

    /// Builder-style attribute append.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_attribute(name, value);
        self
    }

    /// Whether this element is the clinical-document element `name`.
    pub fn is(&self, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == Some(HL7_NAMESPACE)
    }

    /// Text that appears before the first child element.
    pub fn text(&self) -> Option<&str> {
        self.leading_text.as_deref()
    }

    /// Concatenation of every descendant text node, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }

    /// Value of an unprefixed attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.is_none() && a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Direct child elements.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    fn has_element_children(&self) -> bool {
        self.children
            .iter()
            .any(|node| matches!(node, Node::Element(_)))
    }

    /// First direct child named `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.is(name))
    }

    /// Every direct child named `name`.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |e| e.is(name))
    }

    /// All descendant elements in document order, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![self.children.iter()],
        }
    }

    /// First descendant named `name`.
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.descendants().find(|e| e.is(name))
    }

    /// Every descendant named `name`, in document order.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.descendants().filter(move |e| e.is(name))
    }

    /// Every element reached by a descendant step followed by child steps.
    ///
    /// `["thead", "tr", "th"]` yields each `th` child of a `tr` child of any
    /// descendant `thead`.
    pub fn find_path<'a>(&'a self, path: &'a [&'a str]) -> Vec<&'a Element> {
        let Some((first, rest)) = path.split_first() else {
            return Vec::new();
        };

        let mut current: Vec<&Element> = self.find_all(*first).collect();
        for step in rest {
            current = current
                .into_iter()
                .flat_map(|e| e.children_named(*step))
                .collect();
        }
        current
    }

    /// First element reached by [`Element::find_path`].
    pub fn find_first_path<'a>(&'a self, path: &'a [&'a str]) -> Option<&'a Element> {
        self.find_path(path).into_iter().next()
    }
}

/// Depth-first, document-order iterator over descendant elements.
pub struct Descendants<'a> {
    stack: Vec<std::slice::Iter<'a, Node>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(iter) = self.stack.last_mut() {
            match iter.next() {
                Some(Node::Element(element)) => {
                    self.stack.push(element.children.iter());
                    return Some(element);
                }
                Some(Node::Text(_)) => continue,
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}
