//! Byte-level scanners for host-language literals and comments.
//!
//! Each function takes the offset of the opening delimiter and returns where
//! the construct ends. Unterminated constructs run to the end of the input
//! (strings and regexes stop at the end of the line).

/// Returns the offset just past the string literal starting at `start`.
pub fn string_end(source: &str, start: usize) -> usize {
    let bytes = source.as_bytes();
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Returns the offset just past the template literal starting at `start`.
pub fn template_end(source: &str, start: usize) -> usize {
    let bytes = source.as_bytes();
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'`' => return i + 1,
            b'$' if bytes.get(i + 1) == Some(&b'{') => {
                i = closing_brace(source, i + 2).map_or(bytes.len(), |close| close + 1);
            }
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Returns the offset of the `}` matching an already consumed `{`.
///
/// Braces inside strings, template literals and comments are ignored.
pub fn closing_brace(source: &str, start: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut depth = 0usize;
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => i = string_end(source, i),
            b'`' => i = template_end(source, i),
            b'/' if bytes.get(i + 1) == Some(&b'/') => i = line_comment_end(source, i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = block_comment_end(source, i),
            b'{' => {
                depth += 1;
                i += 1;
            }
            b'}' if depth == 0 => return Some(i),
            b'}' => {
                depth -= 1;
                i += 1;
            }
            _ => i += 1,
        }
    }
    None
}

/// Returns the offset of the newline ending a `//` comment.
pub fn line_comment_end(source: &str, start: usize) -> usize {
    source[start..]
        .find('\n')
        .map_or(source.len(), |i| start + i)
}

/// Returns the offset just past the `*/` ending a block comment.
pub fn block_comment_end(source: &str, start: usize) -> usize {
    source[start + 2..]
        .find("*/")
        .map_or(source.len(), |i| start + 2 + i + 2)
}

/// Returns the offset just past a regex literal and its flags.
pub fn regex_end(source: &str, start: usize) -> usize {
    let bytes = source.as_bytes();
    let mut in_class = false;
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            // Not a regex after all; let the scanner carry on from here.
            b'\n' => return i,
            b'[' => {
                in_class = true;
                i += 1;
            }
            b']' => {
                in_class = false;
                i += 1;
            }
            b'/' if !in_class => {
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
                    i += 1;
                }
                return i;
            }
            _ => i += 1,
        }
    }
    bytes.len()
}
