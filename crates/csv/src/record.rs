//! Canonical fields and the string-keyed record shape rows map into.

use std::collections::BTreeMap;

/// Canonical catalog/cart fields a CSV column can map to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Id,
    Size,
    Brand,
    Model,
    Tread32nds,
    Quantity,
    Price,
    LineTotal,
    Notes,
}

impl Field {
    /// Canonical column name as written in export headers.
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Size => "size",
            Field::Brand => "brand",
            Field::Model => "model",
            Field::Tread32nds => "tread_32nds",
            Field::Quantity => "quantity",
            Field::Price => "price",
            Field::LineTotal => "line_total",
            Field::Notes => "notes",
        }
    }

    /// Maps a simplified header cell to its canonical field.
    ///
    /// The alias table covers the spellings seen in real spreadsheets
    /// ("Qty", "Tread (32nds)", "Cost"). Anything unrecognized returns
    /// `None` and that column is dropped from every record.
    pub fn from_alias(simplified: &str) -> Option<Field> {
        match simplified {
            "id" => Some(Field::Id),
            "size" => Some(Field::Size),
            "brand" => Some(Field::Brand),
            "model" => Some(Field::Model),
            "tread" | "tread32nds" | "32nds" | "treaddepth" => Some(Field::Tread32nds),
            "quantity" | "qty" | "count" => Some(Field::Quantity),
            "price" | "cost" => Some(Field::Price),
            "linetotal" => Some(Field::LineTotal),
            "notes" | "note" | "comment" => Some(Field::Notes),
            _ => None,
        }
    }
}

/// Column order of catalog exports and the import template.
pub const CATALOG_HEADER: [Field; 8] = [
    Field::Id,
    Field::Size,
    Field::Brand,
    Field::Model,
    Field::Tread32nds,
    Field::Quantity,
    Field::Price,
    Field::Notes,
];

/// Column order of cart/order exports (adds the extended line price).
pub const CART_HEADER: [Field; 8] = [
    Field::Id,
    Field::Size,
    Field::Brand,
    Field::Model,
    Field::Quantity,
    Field::Price,
    Field::LineTotal,
    Field::Notes,
];

/// Simplifies a raw header cell: lower-cased, every character outside
/// `[a-z0-9]` removed, so "Tread (32nds)" becomes "tread32nds".
pub fn simplify_header(cell: &str) -> String {
    cell.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// One parsed or to-be-serialized row, keyed by canonical field.
///
/// Values stay raw strings. Numeric coercion happens downstream where the
/// catalog schema is known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRecord {
    fields: BTreeMap<Field, String>,
}

impl CsvRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    /// Builder form of [`CsvRecord::set`], convenient in export code and tests.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.fields.iter().map(|(field, value)| (*field, value.as_str()))
    }
}
