//! Naive forward byte-pattern search.
//!
//! Save files are a few dozen megabytes at most and every search is bounded
//! by a single slot window, so a plain window scan is all the decoder needs.

/// Returns the lowest offset at which `needle` occurs in `haystack`.
///
/// An empty needle never matches.
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Returns the offset of the first run of at least `len` consecutive zero
/// bytes.
pub fn find_zero_run(haystack: &[u8], len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let mut run_start = 0usize;
    let mut run_len = 0usize;
    for (i, &b) in haystack.iter().enumerate() {
        if b != 0 {
            run_len = 0;
            continue;
        }
        if run_len == 0 {
            run_start = i;
        }
        run_len += 1;
        if run_len == len {
            return Some(run_start);
        }
    }
    None
}
