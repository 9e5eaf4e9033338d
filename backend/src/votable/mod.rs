//! VOTable document model.
//!
//! A [`VoTableDocument`] is a single-resource, single-table VOTable: a
//! description, ordered `INFO` entries, a fixed field schema and rows of
//! cells. It is built once per request and serialized by [`writer`].

pub mod writer;

#[cfg(test)]
pub(crate) mod test_support;

/// Media type of a VOTable response.
pub const VOTABLE_CONTENT_TYPE: &str = "application/x-votable+xml";

/// VOTable primitive datatypes used by the VO services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Double,
    Char,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Double => "double",
            DataType::Char => "char",
        }
    }
}

/// One `FIELD` declaration. Protocol constants, never derived from data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub datatype: DataType,
    pub arraysize: Option<&'static str>,
    pub ucd: &'static str,
    pub utype: Option<&'static str>,
    pub unit: Option<&'static str>,
}

impl FieldSpec {
    /// A double-precision column.
    pub const fn double(name: &'static str, ucd: &'static str, unit: &'static str) -> Self {
        Self {
            name,
            datatype: DataType::Double,
            arraysize: None,
            ucd,
            utype: None,
            unit: Some(unit),
        }
    }

    /// A variable-length string column.
    pub const fn text(name: &'static str, ucd: &'static str) -> Self {
        Self {
            name,
            datatype: DataType::Char,
            arraysize: Some("*"),
            ucd,
            utype: None,
            unit: None,
        }
    }

    pub const fn with_utype(mut self, utype: &'static str) -> Self {
        self.utype = Some(utype);
        self
    }
}

/// `INFO` element: name, value and optional text content.
#[derive(Debug, Clone, PartialEq)]
pub struct Info {
    pub name: String,
    pub value: String,
    pub content: Option<String>,
}

impl Info {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            content: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Double(f64),
    Text(String),
}

impl Cell {
    /// Text written inside the `TD` element.
    pub fn render(&self) -> String {
        match self {
            Cell::Double(v) => format_double(*v),
            Cell::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Double(v)
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

/// Shortest decimal that parses back to the same double.
///
/// Non-finite values use the VOTable spellings.
pub fn format_double(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "+Inf" } else { "-Inf" }.to_string()
    } else {
        v.to_string()
    }
}

/// Complete single-table VOTable.
#[derive(Debug, Clone, PartialEq)]
pub struct VoTableDocument {
    pub description: String,
    pub infos: Vec<Info>,
    pub fields: Vec<FieldSpec>,
    pub rows: Vec<Vec<Cell>>,
}

impl VoTableDocument {
    pub fn new(description: impl Into<String>, fields: &[FieldSpec]) -> Self {
        Self {
            description: description.into(),
            infos: Vec::new(),
            fields: fields.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn push_info(&mut self, info: Info) {
        self.infos.push(info);
    }

    /// Append a row. Cells follow field order.
    pub fn push_row(&mut self, cells: Vec<Cell>) {
        debug_assert_eq!(cells.len(), self.fields.len());
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
