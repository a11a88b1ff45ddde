//! SML document reading and writing.
//!
//! An SML document is a sequence of whitespace-separated-value lines. A line
//! with a single value opens an element, or closes the current one when the
//! value is the document's end keyword. A line with two or more values is an
//! attribute. The end keyword is whatever the last non-empty line holds,
//! usually `End`.
//!
//! ```
//! use trellis_sml::SmlDocument;
//!
//! let doc = SmlDocument::parse(
//!     "Button\n  Command Save\nEnd\n",
//! ).unwrap();
//! assert_eq!(doc.root().name(), "Button");
//! ```

use std::fmt::{self, Write as _};

use crate::{DocumentError, Result, SmlAttribute, SmlElement, SmlNode};

/// A parsed SML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmlDocument {
    root: SmlElement,
    end_keyword: Option<String>,
}

impl SmlDocument {
    /// Create a document around an existing root element.
    pub fn new(root: SmlElement) -> Self {
        Self {
            root,
            end_keyword: Some("End".to_string()),
        }
    }

    /// The root element.
    pub fn root(&self) -> &SmlElement {
        &self.root
    }

    /// Consume the document and return its root element.
    pub fn into_root(self) -> SmlElement {
        self.root
    }

    /// The keyword that closes elements (`None` when it is the null value).
    pub fn end_keyword(&self) -> Option<&str> {
        self.end_keyword.as_deref()
    }

    /// Parse SML text.
    #[tracing::instrument(skip_all, target = "trellis_sml::document", level = "debug")]
    pub fn parse(content: &str) -> Result<Self> {
        let lines = content
            .lines()
            .enumerate()
            .map(|(index, line)| split_line(line, index + 1).map(|values| (index + 1, values)))
            .collect::<Result<Vec<_>>>()?;

        let end_keyword = match lines.iter().rev().find(|(_, values)| !values.is_empty()) {
            Some((_, values)) if values.len() == 1 => values[0].clone(),
            Some((line, _)) => {
                return Err(DocumentError::syntax(*line, "invalid end keyword line"));
            }
            None => return Err(DocumentError::syntax(1, "document has no root element")),
        };

        let mut stack: Vec<SmlElement> = Vec::new();
        let mut root: Option<SmlElement> = None;

        for (line, mut values) in lines {
            if values.is_empty() {
                continue;
            }
            if root.is_some() {
                return Err(DocumentError::syntax(
                    line,
                    "only comments and empty lines may follow the root element",
                ));
            }

            if values.len() == 1 {
                let value = values.remove(0);
                if is_end_keyword(&value, &end_keyword) {
                    let Some(closed) = stack.pop() else {
                        return Err(DocumentError::syntax(line, "unexpected end keyword"));
                    };
                    match stack.last_mut() {
                        Some(parent) => parent.push(SmlNode::Element(closed)),
                        None => root = Some(closed),
                    }
                } else {
                    let Some(name) = value else {
                        return Err(DocumentError::syntax(line, "element name must not be null"));
                    };
                    stack.push(SmlElement::new(name));
                }
                continue;
            }

            let Some(name) = values.remove(0) else {
                return Err(DocumentError::syntax(line, "attribute name must not be null"));
            };
            let Some(parent) = stack.last_mut() else {
                return Err(DocumentError::syntax(line, "attribute outside of an element"));
            };
            parent.push(SmlNode::Attribute(SmlAttribute::new(name, values)));
        }

        if let Some(open) = stack.last() {
            return Err(DocumentError::syntax(
                content.lines().count().max(1),
                format!("element \"{}\" is not closed", open.name()),
            ));
        }

        let root = root.ok_or_else(|| DocumentError::syntax(1, "document has no root element"))?;
        tracing::debug!(target: "trellis_sml::document", root = root.name(), "parsed document");
        Ok(Self { root, end_keyword })
    }
}

impl fmt::Display for SmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = self.end_keyword.as_deref();
        write_element(f, &self.root, end, 0)
    }
}

fn is_end_keyword(value: &Option<String>, end_keyword: &Option<String>) -> bool {
    match (value, end_keyword) {
        (Some(value), Some(end)) => value.eq_ignore_ascii_case(end),
        (None, None) => true,
        _ => false,
    }
}

fn write_element(
    f: &mut fmt::Formatter<'_>,
    element: &SmlElement,
    end: Option<&str>,
    depth: usize,
) -> fmt::Result {
    write_indent(f, depth)?;
    write_value(f, Some(element.name()))?;
    f.write_char('\n')?;
    for node in element.nodes() {
        match node {
            SmlNode::Attribute(attribute) => {
                write_indent(f, depth + 1)?;
                write_value(f, Some(attribute.name()))?;
                for value in attribute.values() {
                    f.write_char(' ')?;
                    write_value(f, value.as_deref())?;
                }
                f.write_char('\n')?;
            }
            SmlNode::Element(child) => write_element(f, child, end, depth + 1)?,
        }
    }
    write_indent(f, depth)?;
    write_value(f, end)?;
    f.write_char('\n')
}

fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_char('\t')?;
    }
    Ok(())
}

fn write_value(f: &mut fmt::Formatter<'_>, value: Option<&str>) -> fmt::Result {
    let Some(value) = value else {
        return f.write_char('-');
    };
    let needs_quotes = value.is_empty()
        || value == "-"
        || value.chars().any(|c| c.is_whitespace() || c == '"' || c == '#');
    if !needs_quotes {
        return f.write_str(value);
    }
    f.write_char('"')?;
    for c in value.chars() {
        match c {
            '"' => f.write_str("\"\"")?,
            '\n' => f.write_str("\"/\"")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

/// Split one line into its values. `-` is null and `#` starts a comment.
fn split_line(line: &str, line_number: usize) -> Result<Vec<Option<String>>> {
    let mut values = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c == '#' {
            break;
        }

        if c == '"' {
            chars.next();
            let mut value = String::new();
            loop {
                match chars.next() {
                    None => return Err(DocumentError::syntax(line_number, "string not closed")),
                    Some('"') => match chars.peek() {
                        Some('"') => {
                            chars.next();
                            value.push('"');
                        }
                        Some('/') => {
                            chars.next();
                            if chars.next() != Some('"') {
                                return Err(DocumentError::syntax(
                                    line_number,
                                    "invalid string line break",
                                ));
                            }
                            value.push('\n');
                        }
                        Some(next) if !next.is_whitespace() && *next != '#' => {
                            return Err(DocumentError::syntax(
                                line_number,
                                "invalid character after string",
                            ));
                        }
                        _ => break,
                    },
                    Some(other) => value.push(other),
                }
            }
            values.push(Some(value));
            continue;
        }

        let mut value = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() || c == '#' {
                break;
            }
            if c == '"' {
                return Err(DocumentError::syntax(
                    line_number,
                    "invalid double quote in value",
                ));
            }
            value.push(c);
            chars.next();
        }
        values.push(if value == "-" { None } else { Some(value) });
    }

    Ok(values)
}
