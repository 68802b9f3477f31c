//! Paste sanitizing. Fields only ever store the plain-text flavor of
//! whatever the user pastes.

/// Strip markup from pasted content and decode the common entities.
///
/// Only a `<` that opens a tag closed by a later `>` counts as markup. Input
/// without any markup is already plain text: it keeps every character as
/// typed, entities included, and only has its line endings normalized to
/// `\n`.
pub fn plain_text(input: &str) -> String {
    if !has_markup(input) {
        return normalize_line_endings(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(c) = rest.chars().next() {
        let after = &rest[c.len_utf8()..];
        match c {
            '<' if opens_tag(after) => {
                rest = after.find('>').map_or("", |end| &after[end + 1..]);
            }
            '&' => {
                let (decoded, consumed) = entity_at(after);
                match decoded {
                    Some(decoded) => out.push(decoded),
                    None => out.push('&'),
                }
                rest = &after[consumed..];
            }
            '\r' => {
                out.push('\n');
                rest = after.strip_prefix('\n').unwrap_or(after);
            }
            c => {
                out.push(c);
                rest = after;
            }
        }
    }
    out
}

/// Plain text for a single-line input: every run of line breaks becomes one
/// space
pub fn single_line(input: &str) -> String {
    let text = plain_text(input);
    let mut out = String::with_capacity(text.len());
    let mut in_break = false;

    for c in text.chars() {
        if c == '\n' {
            if !in_break {
                out.push(' ');
            }
            in_break = true;
        } else {
            out.push(c);
            in_break = false;
        }
    }
    out
}

fn starts_tag(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '/' || c == '!'
}

/// Whether the text after a `<` is a terminated tag
fn opens_tag(after: &str) -> bool {
    after.chars().next().is_some_and(starts_tag) && after.contains('>')
}

fn has_markup(input: &str) -> bool {
    input
        .match_indices('<')
        .any(|(at, _)| opens_tag(&input[at + 1..]))
}

fn normalize_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

/// Decode the entity starting right after an `&`. Returns the character and
/// how many bytes it used; undecodable input uses none.
fn entity_at(after: &str) -> (Option<char>, usize) {
    let name_len = after
        .char_indices()
        .take_while(|(i, c)| *i <= 8 && (c.is_ascii_alphanumeric() || *c == '#'))
        .count();
    if after[name_len..].starts_with(';') {
        if let Some(decoded) = decode_entity(&after[..name_len]) {
            return (Some(decoded), name_len + 1);
        }
    }
    (None, 0)
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let code = entity.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(plain_text("Spring sale"), "Spring sale");
        assert_eq!(plain_text("a < b"), "a < b");
        assert_eq!(plain_text("Fish &amp; Chips"), "Fish &amp; Chips");
    }

    #[test]
    fn test_unterminated_angle_bracket_is_kept() {
        assert_eq!(plain_text("if a<b then c"), "if a<b then c");
        assert_eq!(
            plain_text("Use the <Enter key to save"),
            "Use the <Enter key to save"
        );
        assert_eq!(plain_text("<b>bold</b> then x<y"), "bold then x<y");
    }

    #[test]
    fn test_strips_markup() {
        assert_eq!(
            plain_text("<p style=\"color:red\">Hello <b>world</b></p>"),
            "Hello world"
        );
        assert_eq!(plain_text("<!-- x -->kept"), "kept");
    }

    #[test]
    fn test_decodes_entities_in_markup() {
        assert_eq!(plain_text("<b>Fish &amp; Chips</b>"), "Fish & Chips");
        assert_eq!(plain_text("<p>&lt;tag&gt; &#39;q&#x27;</p>"), "<tag> 'q'");
        assert_eq!(plain_text("<p>AT&T</p>"), "AT&T");
        assert_eq!(plain_text("<p>&bogus;</p>"), "&bogus;");
    }

    #[test]
    fn test_normalizes_line_endings() {
        assert_eq!(plain_text("a\r\nb\rc"), "a\nb\nc");
        assert_eq!(plain_text("<p>a</p>\r\n<p>b</p>"), "a\nb");
    }

    #[test]
    fn test_single_line_collapses_breaks() {
        assert_eq!(single_line("example.com/\r\n\r\npath"), "example.com/ path");
        assert_eq!(single_line("one\ntwo"), "one two");
    }
}
