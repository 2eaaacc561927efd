//! Line-level inspection of generated WebIDL.
//!
//! Generated attributes occupy exactly one line each, so tests can find a
//! declaration by spelling and read its extended attributes without a
//! WebIDL parser.

const ATTRIBUTE_MARKER: &str = "] attribute [LegacyNullToEmptyString] UTF8String ";

/// Attribute declaration lines, in order.
#[must_use]
pub fn attribute_lines(idl: &str) -> Vec<&str> {
    idl.lines()
        .filter(|line| line.starts_with("  [") && line.contains(ATTRIBUTE_MARKER))
        .collect()
}

/// Declared name of an attribute line.
#[must_use]
pub fn spelling_of(line: &str) -> Option<&str> {
    let (_, rest) = line.split_once(ATTRIBUTE_MARKER)?;
    rest.strip_suffix(';')
}

/// Spellings of every attribute in `idl`, in order.
#[must_use]
pub fn spellings(idl: &str) -> Vec<&str> {
    attribute_lines(idl)
        .into_iter()
        .filter_map(spelling_of)
        .collect()
}

/// The declaration whose spelling is `spelling`.
#[must_use]
pub fn find_attribute<'a>(idl: &'a str, spelling: &str) -> Option<&'a str> {
    attribute_lines(idl)
        .into_iter()
        .find(|line| spelling_of(line) == Some(spelling))
}

/// Extended attributes of a declaration line.
///
/// Commas nested in parentheses, as in `BindingTemplate=(A, B)`, do not
/// split an entry.
#[must_use]
pub fn annotations_of(line: &str) -> Vec<String> {
    let Some(list) = line
        .trim_start()
        .strip_prefix('[')
        .and_then(|rest| rest.split_once(ATTRIBUTE_MARKER))
        .map(|(list, _)| list)
    else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    let mut current = String::new();
    let mut depth = 0_usize;
    for ch in list.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                entries.push(current.trim().to_owned());
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }
    if !current.trim().is_empty() {
        entries.push(current.trim().to_owned());
    }
    entries
}

/// `BindingAlias` names of a declaration line, in order.
#[must_use]
pub fn binding_aliases_of(line: &str) -> Vec<String> {
    annotations_of(line)
        .iter()
        .filter_map(|entry| {
            entry
                .strip_prefix("BindingAlias=\"")
                .and_then(|rest| rest.strip_suffix('"'))
                .map(str::to_owned)
        })
        .collect()
}
