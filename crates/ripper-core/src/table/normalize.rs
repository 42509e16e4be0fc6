//! Title-case normalization of text columns.

use super::Table;

/// Title-cases `s`: a cased letter that follows an uncased character (or the
/// start of the string) is uppercased, every other cased letter is lowercased.
///
/// `"new york"` → `"New York"`, `"LOS ANGELES"` → `"Los Angeles"`,
/// `"o'neil"` → `"O'Neil"`, `"1st ave"` → `"1St Ave"`.
///
/// Word-initial letters take their titlecase form, which differs from the
/// uppercase one for a few letters: `"ßa"` → `"Ssa"`, `"ǆ"` → `"ǅ"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;
    for c in s.chars() {
        let cased = is_cased(c);
        if cased && prev_cased {
            out.extend(c.to_lowercase());
        } else if cased {
            push_titlecase(&mut out, c);
        } else {
            out.push(c);
        }
        prev_cased = cased;
    }
    out
}

fn is_cased(c: char) -> bool {
    c.is_lowercase() || c.is_uppercase() || matches!(c, 'ǅ' | 'ǈ' | 'ǋ' | 'ǲ')
}

/// Pushes the titlecase mapping of `c`. Only letters whose titlecase differs
/// from their uppercase are listed; the rest go through `to_uppercase`.
fn push_titlecase(out: &mut String, c: char) {
    let mapped = match c {
        'ß' => "Ss",
        'Ǆ' | 'ǅ' | 'ǆ' => "ǅ",
        'Ǉ' | 'ǈ' | 'ǉ' => "ǈ",
        'Ǌ' | 'ǋ' | 'ǌ' => "ǋ",
        'Ǳ' | 'ǲ' | 'ǳ' => "ǲ",
        'ﬀ' => "Ff",
        'ﬁ' => "Fi",
        'ﬂ' => "Fl",
        'ﬃ' => "Ffi",
        'ﬄ' => "Ffl",
        'ﬅ' | 'ﬆ' => "St",
        'և' => "Եւ",
        _ => {
            out.extend(c.to_uppercase());
            return;
        }
    };
    out.push_str(mapped);
}

/// Title-cases every present cell of every text column in place.
/// Returns the number of columns that were normalized.
pub fn normalize_text_columns(table: &mut Table) -> usize {
    let text_cols: Vec<usize> = (0..table.columns().len())
        .filter(|&i| table.column_kind(i).is_text())
        .collect();

    for row in table.rows_mut() {
        for &i in &text_cols {
            if let Some(cell) = row[i].as_mut() {
                *cell = title_case(cell);
            }
        }
    }
    text_cols.len()
}
