//! Multi-statement schema script splitting.
//!
//! The embedded schema script holds several statements that must run as
//! separate commands (ATTACH, DDL, registry insert). Statements are
//! delimited by lines whose trimmed content is exactly the batch separator
//! token.

/// Line token that terminates a batch (matched against the trimmed line,
/// case-sensitive).
pub const BATCH_SEPARATOR: &str = "GO";

/// Split a schema script into independently executable batches.
///
/// Scans line by line; a separator line yields the accumulated lines as one
/// batch, concatenated without newlines, so each statement in the script
/// must sit on a single line. A non-empty accumulation left at end of input
/// is flushed as a final batch, so a script lacking a trailing separator
/// does not lose its last statement.
///
/// Lazy and single-pass; an empty script yields nothing.
pub fn split_batches(script: &str) -> impl Iterator<Item = String> + '_ {
    let mut lines = script.lines();
    let mut done = false;
    std::iter::from_fn(move || {
        if done {
            return None;
        }
        let mut sql = String::new();
        loop {
            match lines.next() {
                Some(line) if line.trim() == BATCH_SEPARATOR => return Some(sql),
                Some(line) => sql.push_str(line),
                None => {
                    done = true;
                    if sql.is_empty() {
                        return None;
                    }
                    return Some(sql);
                }
            }
        }
    })
}
