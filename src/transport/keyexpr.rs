// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Key expression matching.
//!
//! Keys are `/`-separated chunks. In an expression `*` matches exactly one
//! chunk and `**` matches zero or more chunks. A leading `/` is ignored on
//! both sides, so `/rt/rosout` and `rt/rosout` are the same key.

/// Check whether `key` matches the expression `expr`.
pub fn key_matches(expr: &str, key: &str) -> bool {
    let expr: Vec<&str> = chunks(expr).collect();
    let key: Vec<&str> = chunks(key).collect();
    matches_chunks(&expr, &key)
}

/// Validate an expression: no empty chunks, wildcards only as whole chunks.
pub fn is_valid(expr: &str) -> bool {
    let trimmed = expr.trim_start_matches('/');
    !trimmed.is_empty()
        && trimmed
            .split('/')
            .all(|c| !c.is_empty() && (c == "*" || c == "**" || !c.contains('*')))
}

fn chunks(s: &str) -> impl Iterator<Item = &str> {
    s.trim_start_matches('/').split('/')
}

fn matches_chunks(expr: &[&str], key: &[&str]) -> bool {
    match (expr.first(), key.first()) {
        (None, None) => true,
        (Some(&"**"), _) => {
            matches_chunks(&expr[1..], key) || (!key.is_empty() && matches_chunks(expr, &key[1..]))
        }
        (Some(&"*"), Some(_)) => matches_chunks(&expr[1..], &key[1..]),
        (Some(e), Some(k)) if e == k => matches_chunks(&expr[1..], &key[1..]),
        _ => false,
    }
}
