//! String comparison with MUSH semantics.

/// Compares two strings ignoring ASCII case.
///
/// With `space_compress`, leading and trailing whitespace is ignored and any
/// run of internal whitespace compares equal to any other run.
#[must_use]
pub fn strings_equal(a: &str, b: &str, space_compress: bool) -> bool {
    if space_compress {
        let mut left = a.split_whitespace();
        let mut right = b.split_whitespace();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some(l), Some(r)) if l.eq_ignore_ascii_case(r) => {}
                _ => return false,
            }
        }
    } else {
        a.eq_ignore_ascii_case(b)
    }
}
