//! Unicode-aware casing used when mapping free-text command names to identifiers.
//!
//! Works on `char`s, never bytes, so non-Latin command text keeps its code points.

/// Title-cases the first letter of every word and lower-cases the rest.
///
/// A word is a run of alphanumeric characters; apostrophes inside a word do not start a new one.
/// The first letter goes through the Unicode title-case mapping, so `ß` becomes `Ss` and `ǆ` becomes `ǅ`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;

    for c in s.chars() {
        if c.is_alphanumeric() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                push_titlecase(&mut out, c);
                in_word = true;
            }
        } else {
            out.push(c);
            in_word = in_word && is_word_joiner(c);
        }
    }

    out
}

/// Upper-cases the first character and lower-cases the remainder.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Maps a command name to the identifier of the command type handling it:
/// `generic_message` → `GenericmessageCommand`, `échange` → `ÉchangeCommand`.
pub fn command_class_name(command: &str) -> String {
    let lowered = command.to_lowercase().replace('_', " ");
    let joined: String = title_case(&lowered).split_whitespace().collect();
    format!("{}Command", capitalize_first(&joined))
}

/// Appends the full title-case mapping of `c`. Characters without their own title-case entry
/// fall back to upper-case.
fn push_titlecase(out: &mut String, c: char) {
    let mapped: String = unicode_case_mapping::to_titlecase(c)
        .into_iter()
        .filter(|&cp| cp != 0)
        .filter_map(char::from_u32)
        .collect();
    if mapped.is_empty() {
        out.extend(c.to_uppercase());
    } else {
        out.push_str(&mapped);
    }
}

fn is_word_joiner(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}')
}
