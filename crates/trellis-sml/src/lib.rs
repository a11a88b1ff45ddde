//! SML document model for Trellis.
//!
//! This crate is the document-tree provider behind the Trellis markup. It
//! offers:
//!
//! - **Reading**: [`SmlDocument::parse`] turns SML text into an element tree
//! - **Lookup**: required/optional attribute and element access on [`SmlElement`]
//! - **Coercion**: typed string, integer, float, boolean and enum access on [`SmlAttribute`]
//! - **Schema assertions**: closed attribute/element name sets and count checks
//!
//! # Example
//!
//! ```
//! use trellis_sml::SmlDocument;
//!
//! let doc = SmlDocument::parse(
//!     "GridLayout\n\
//!        Child\n\
//!          Column 2 3\n\
//!          Row 0\n\
//!          Nothing\n\
//!          End\n\
//!        End\n\
//!      End",
//! )?;
//!
//! let child = doc.root().required_element("Child")?;
//! let column = child.required_attribute("Column")?;
//! assert_eq!(column.get_int(0)?, 2);
//! assert_eq!(column.get_int(1)?, 3);
//! # Ok::<(), trellis_sml::DocumentError>(())
//! ```

mod attribute;
mod document;
mod element;
mod error;

pub use attribute::SmlAttribute;
pub use document::SmlDocument;
pub use element::{SmlElement, SmlNode};
pub use error::{DocumentError, Result};
