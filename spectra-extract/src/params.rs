//! Line-oriented parameter-file parsing.
//!
//! Instrument parameter files (`acqu`, `pdata/1/proc`) are key=value text:
//! string values are wrapped in angle brackets, numeric values are plain
//! tokens on a space-delimited line.
//!
//! ```text
//! ##$SOLVENT= <CDCl3>
//! ##$NUC1= <1H>
//! ##$TD= 65536
//! ##$FTSIZE= 131072
//! ```

/// First line containing `key` and, when given, not containing `exclude`.
///
/// The exclusion guards keys that are substrings of longer keys on other
/// lines (`TD=` also occurs inside `NusTD=`).
pub fn line_with<'a>(contents: &'a str, key: &str, exclude: Option<&str>) -> Option<&'a str> {
    contents.lines().find(|line| {
        line.contains(key) && exclude.map(|ex| !line.contains(ex)).unwrap_or(true)
    })
}

/// Substring between the first `<` and the following `>`.
pub fn bracketed(line: &str) -> Option<&str> {
    let open = line.find('<')?;
    let rest = &line[open + 1..];
    let close = rest.find('>')?;
    Some(&rest[..close])
}

/// Last whitespace-delimited token.
pub fn last_token(line: &str) -> Option<&str> {
    line.split_whitespace().last()
}

/// Zero-based whitespace-delimited token.
pub fn nth_token(line: &str, n: usize) -> Option<&str> {
    line.split_whitespace().nth(n)
}
