//! Column kind inference.

/// What a column holds, judged from its present cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Every cell is missing.
    Empty,
    Integer,
    /// Numbers with at least one non-integer value.
    Float,
    /// `true` / `false` in any letter case.
    Boolean,
    /// Anything else. Only text columns are normalized.
    Text,
}

impl ColumnKind {
    pub fn is_text(self) -> bool {
        self == ColumnKind::Text
    }
}

/// Infers the kind of a column from its cells; missing cells are ignored.
pub fn infer_kind<'a, I>(cells: I) -> ColumnKind
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut kind = ColumnKind::Empty;
    for cell in cells.into_iter().flatten() {
        let this = cell_kind(cell);
        kind = match (kind, this) {
            (ColumnKind::Empty, k) => k,
            (a, b) if a == b => a,
            (ColumnKind::Integer, ColumnKind::Float) | (ColumnKind::Float, ColumnKind::Integer) => {
                ColumnKind::Float
            }
            _ => return ColumnKind::Text,
        };
        if kind == ColumnKind::Text {
            return kind;
        }
    }
    kind
}

fn cell_kind(cell: &str) -> ColumnKind {
    if cell.parse::<i64>().is_ok() {
        ColumnKind::Integer
    } else if cell.parse::<f64>().is_ok() {
        ColumnKind::Float
    } else if cell.eq_ignore_ascii_case("true") || cell.eq_ignore_ascii_case("false") {
        ColumnKind::Boolean
    } else {
        ColumnKind::Text
    }
}
