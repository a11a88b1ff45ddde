//! SML elements and schema assertions.

use crate::{DocumentError, Result, SmlAttribute};

/// A named node inside an element: either an attribute or a child element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmlNode {
    /// A named attribute.
    Attribute(SmlAttribute),
    /// A nested element.
    Element(SmlElement),
}

impl SmlNode {
    /// The node name.
    pub fn name(&self) -> &str {
        match self {
            SmlNode::Attribute(attribute) => attribute.name(),
            SmlNode::Element(element) => element.name(),
        }
    }

    /// Returns the attribute, if this node is one.
    pub fn as_attribute(&self) -> Option<&SmlAttribute> {
        match self {
            SmlNode::Attribute(attribute) => Some(attribute),
            SmlNode::Element(_) => None,
        }
    }

    /// Returns the element, if this node is one.
    pub fn as_element(&self) -> Option<&SmlElement> {
        match self {
            SmlNode::Element(element) => Some(element),
            SmlNode::Attribute(_) => None,
        }
    }
}

/// A labeled element holding attributes and child elements in document order.
///
/// Name comparisons are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmlElement {
    name: String,
    nodes: Vec<SmlNode>,
}

impl SmlElement {
    /// Create an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
        }
    }

    /// Builder-style: append an attribute.
    pub fn with_attribute(mut self, attribute: SmlAttribute) -> Self {
        self.nodes.push(SmlNode::Attribute(attribute));
        self
    }

    /// Builder-style: append a child element.
    pub fn with_element(mut self, element: SmlElement) -> Self {
        self.nodes.push(SmlNode::Element(element));
        self
    }

    /// Append a node.
    pub fn push(&mut self, node: SmlNode) {
        self.nodes.push(node);
    }

    /// The element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check the element name.
    pub fn has_name(&self, name: &str) -> bool {
        self.name == name
    }

    /// Require the element to have the given name.
    pub fn assure_name(&self, name: &str) -> Result<()> {
        if !self.has_name(name) {
            return Err(DocumentError::UnexpectedElementName {
                expected: name.to_string(),
                found: self.name.clone(),
            });
        }
        Ok(())
    }

    /// All named nodes in document order.
    pub fn nodes(&self) -> &[SmlNode] {
        &self.nodes
    }

    /// All attributes in document order.
    pub fn attributes(&self) -> impl Iterator<Item = &SmlAttribute> {
        self.nodes.iter().filter_map(SmlNode::as_attribute)
    }

    /// Attributes with the given name, in document order.
    pub fn attributes_named<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a SmlAttribute> + use<'a, 'n> {
        self.attributes().filter(move |a| a.has_name(name))
    }

    /// All child elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &SmlElement> {
        self.nodes.iter().filter_map(SmlNode::as_element)
    }

    /// Child elements with the given name, in document order.
    pub fn elements_named<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a SmlElement> + use<'a, 'n> {
        self.elements().filter(move |e| e.has_name(name))
    }

    /// Number of child elements.
    pub fn element_count(&self) -> usize {
        self.elements().count()
    }

    /// Whether an attribute with this name exists.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes_named(name).next().is_some()
    }

    /// Whether a child element with this name exists.
    pub fn has_element(&self, name: &str) -> bool {
        self.elements_named(name).next().is_some()
    }

    /// The attribute with this name, if present. More than one is an error.
    pub fn optional_attribute(&self, name: &str) -> Result<Option<&SmlAttribute>> {
        let mut matches = self.attributes().filter(|a| a.has_name(name));
        let first = matches.next();
        if matches.next().is_some() {
            return Err(self.ambiguous(name));
        }
        Ok(first)
    }

    /// The attribute with this name. Absence or duplicates are errors.
    pub fn required_attribute(&self, name: &str) -> Result<&SmlAttribute> {
        self.optional_attribute(name)?
            .ok_or_else(|| DocumentError::MissingAttribute {
                element: self.name.clone(),
                attribute: name.to_string(),
            })
    }

    /// The child element with this name, if present. More than one is an error.
    pub fn optional_element(&self, name: &str) -> Result<Option<&SmlElement>> {
        let mut matches = self.elements().filter(|e| e.has_name(name));
        let first = matches.next();
        if matches.next().is_some() {
            return Err(self.ambiguous(name));
        }
        Ok(first)
    }

    /// The child element with this name. Absence or duplicates are errors.
    pub fn required_element(&self, name: &str) -> Result<&SmlElement> {
        self.optional_element(name)?
            .ok_or_else(|| DocumentError::MissingElement {
                element: self.name.clone(),
                child: name.to_string(),
            })
    }

    /// Fail on any attribute whose name is not in `allowed`.
    pub fn assure_attribute_names(&self, allowed: &[&str]) -> Result<()> {
        match self.attributes().find(|a| !allowed.contains(&a.name())) {
            Some(attribute) => Err(DocumentError::UnexpectedAttribute {
                element: self.name.clone(),
                attribute: attribute.name().to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Fail on any child element whose name is not in `allowed`.
    pub fn assure_element_names(&self, allowed: &[&str]) -> Result<()> {
        match self.elements().find(|e| !allowed.contains(&e.name())) {
            Some(child) => Err(DocumentError::UnexpectedElement {
                element: self.name.clone(),
                child: child.name().to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Fail if the element has any attribute.
    pub fn assure_no_attributes(&self) -> Result<()> {
        if self.attributes().next().is_some() {
            return Err(DocumentError::AttributesNotAllowed {
                element: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Fail if the element has any child element.
    pub fn assure_no_elements(&self) -> Result<()> {
        if self.elements().next().is_some() {
            return Err(DocumentError::ElementsNotAllowed {
                element: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Require exactly `count` child elements.
    pub fn assure_element_count(&self, count: usize) -> Result<()> {
        let found = self.element_count();
        if found != count {
            return Err(DocumentError::ElementCount {
                element: self.name.clone(),
                expected: count,
                found,
            });
        }
        Ok(())
    }

    fn ambiguous(&self, name: &str) -> DocumentError {
        DocumentError::Ambiguous {
            element: self.name.clone(),
            name: name.to_string(),
        }
    }
}
