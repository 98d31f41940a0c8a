//! Wildcard matching for attribute locks.
//!
//! A pattern is either an ordering comparison (`>value`, `<value`) or a glob
//! where `*` matches any run of characters, `?` matches exactly one, and `\`
//! forces the next pattern character to match literally. Literal comparison
//! ignores ASCII case.

use std::cmp::Ordering;

/// One compiled glob element.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Glob {
    Star,
    One,
    Lit(char),
}

/// Matches `data` against `pattern`, honoring the `>`/`<` comparison forms.
///
/// `>N` passes when `N` is less than the data; `<N` when it is greater. If the
/// text after the operator starts with a digit or `-` both sides are compared
/// as integers, otherwise as byte strings.
#[must_use]
pub fn wild_match(pattern: &str, data: &str) -> bool {
    if let Some(rest) = pattern.strip_prefix('>') {
        return compare(rest, data) == Ordering::Less;
    }
    if let Some(rest) = pattern.strip_prefix('<') {
        return compare(rest, data) == Ordering::Greater;
    }
    quick_wild(pattern, data)
}

/// Plain glob match of `data` against `pattern`.
#[must_use]
pub fn quick_wild(pattern: &str, data: &str) -> bool {
    let Some(globs) = compile(pattern) else {
        return false;
    };
    let data: Vec<char> = data.chars().collect();

    let (mut p, mut d) = (0usize, 0usize);
    // Position of the last star seen and the data index it is currently absorbing up to.
    let mut backtrack: Option<(usize, usize)> = None;

    while d < data.len() {
        match globs.get(p) {
            Some(Glob::Star) => {
                backtrack = Some((p, d));
                p += 1;
                continue;
            }
            Some(Glob::One) => {
                p += 1;
                d += 1;
                continue;
            }
            Some(Glob::Lit(c)) if c.eq_ignore_ascii_case(&data[d]) => {
                p += 1;
                d += 1;
                continue;
            }
            _ => {}
        }
        match backtrack {
            Some((star, absorbed)) => {
                backtrack = Some((star, absorbed + 1));
                p = star + 1;
                d = absorbed + 1;
            }
            None => return false,
        }
    }

    globs[p..].iter().all(|g| *g == Glob::Star)
}

fn compile(pattern: &str) -> Option<Vec<Glob>> {
    let mut globs = Vec::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        let glob = match c {
            '*' => {
                if globs.last() == Some(&Glob::Star) {
                    continue;
                }
                Glob::Star
            }
            '?' => Glob::One,
            // A trailing escape never matches.
            '\\' => Glob::Lit(chars.next()?),
            c => Glob::Lit(c),
        };
        globs.push(glob);
    }
    Some(globs)
}

fn compare(pattern: &str, data: &str) -> Ordering {
    let numeric = pattern
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '-');
    if numeric {
        leading_int(pattern).cmp(&leading_int(data))
    } else {
        pattern.as_bytes().cmp(data.as_bytes())
    }
}

/// Parses the leading integer of `s` the way `strtol` does, yielding 0 when
/// there is none and saturating on overflow.
fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    if negative { -value } else { value }
}
