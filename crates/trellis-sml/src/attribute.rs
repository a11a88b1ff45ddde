//! SML attributes and typed value coercion.

use crate::{DocumentError, Result};

/// A named attribute with one or more (possibly null) values.
///
/// Values are kept as text. The typed getters coerce on access and report
/// the attribute name and value index on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmlAttribute {
    name: String,
    values: Vec<Option<String>>,
}

impl SmlAttribute {
    /// Create a new attribute.
    pub fn new(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Create an attribute whose values are all non-null.
    pub fn with_strings<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, values.into_iter().map(|v| Some(v.into())).collect())
    }

    /// The attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check the attribute name (case-sensitive).
    pub fn has_name(&self, name: &str) -> bool {
        self.name == name
    }

    /// All values in document order.
    pub fn values(&self) -> &[Option<String>] {
        &self.values
    }

    /// Number of values.
    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    /// Require exactly `count` values.
    pub fn assure_value_count(&self, count: usize) -> Result<()> {
        self.assure_value_count_min_max(count, count)
    }

    /// Require between `min` and `max` values (inclusive).
    pub fn assure_value_count_min_max(&self, min: usize, max: usize) -> Result<()> {
        let found = self.values.len();
        if found < min || found > max {
            return Err(DocumentError::ValueCount {
                attribute: self.name.clone(),
                min,
                max,
                found,
            });
        }
        Ok(())
    }

    /// Value at `index`, which may be null.
    pub fn get_nullable_string(&self, index: usize) -> Result<Option<&str>> {
        match self.values.get(index) {
            Some(value) => Ok(value.as_deref()),
            None => Err(DocumentError::ValueCount {
                attribute: self.name.clone(),
                min: index + 1,
                max: usize::MAX,
                found: self.values.len(),
            }),
        }
    }

    /// Non-null value at `index`.
    pub fn get_string(&self, index: usize) -> Result<&str> {
        self.get_nullable_string(index)?
            .ok_or_else(|| self.invalid(index, "non-null string"))
    }

    /// Value at `index` parsed as a signed integer.
    pub fn get_int(&self, index: usize) -> Result<i64> {
        let text = self.get_string(index)?;
        text.parse::<i64>().map_err(|_| self.invalid(index, "integer"))
    }

    /// Value at `index` parsed as a float.
    pub fn get_float(&self, index: usize) -> Result<f64> {
        let text = self.get_string(index)?;
        text.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| self.invalid(index, "float"))
    }

    /// Value at `index` parsed as `true`/`false` (case-insensitive).
    pub fn get_bool(&self, index: usize) -> Result<bool> {
        let text = self.get_string(index)?;
        if text.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if text.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(self.invalid(index, "boolean"))
        }
    }

    /// Position of the value at `index` within `names` (exact match).
    pub fn get_enum(&self, names: &[&str], index: usize) -> Result<usize> {
        let text = self.get_string(index)?;
        names
            .iter()
            .position(|name| *name == text)
            .ok_or_else(|| self.invalid(index, "enumeration value"))
    }

    /// The only value, as a non-null string.
    pub fn as_string(&self) -> Result<&str> {
        self.assure_value_count(1)?;
        self.get_string(0)
    }

    /// The only value, as an integer.
    pub fn as_int(&self) -> Result<i64> {
        self.assure_value_count(1)?;
        self.get_int(0)
    }

    /// The only value, as a float.
    pub fn as_float(&self) -> Result<f64> {
        self.assure_value_count(1)?;
        self.get_float(0)
    }

    /// The only value, as a boolean.
    pub fn as_bool(&self) -> Result<bool> {
        self.assure_value_count(1)?;
        self.get_bool(0)
    }

    /// The only value, as an index into `names`.
    pub fn as_enum(&self, names: &[&str]) -> Result<usize> {
        self.assure_value_count(1)?;
        self.get_enum(names, 0)
    }

    fn invalid(&self, index: usize, expected: &'static str) -> DocumentError {
        DocumentError::InvalidValue {
            attribute: self.name.clone(),
            index,
            expected,
            value: self.values.get(index).cloned().flatten(),
        }
    }
}
