/// Decodes the HTML entities that appear in question-service text fields.
///
/// The service returns prompts and answers with entity-encoded punctuation
/// (`&quot;`, `&#039;`, `&amp;` and friends). Only the entities observed in
/// that feed plus numeric references are handled; anything unrecognized is
/// kept verbatim so malformed text stays visible instead of vanishing.
pub fn decode_entities(text: &str) -> String {
    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('&') {
        decoded.push_str(&rest[..start]);
        rest = &rest[start..];

        match rest[1..].find(';') {
            // Entity names are short; a distant semicolon means a bare ampersand.
            Some(end) if end <= 9 => {
                let entity = &rest[1..=end];
                match decode_one(entity) {
                    Some(replacement) => decoded.push_str(&replacement),
                    None => decoded.push_str(&rest[..end + 2]),
                }
                rest = &rest[end + 2..];
            }
            _ => {
                decoded.push('&');
                rest = &rest[1..];
            }
        }
    }

    decoded.push_str(rest);
    decoded
}

fn decode_one(entity: &str) -> Option<String> {
    let named = match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        "ldquo" => Some('\u{201C}'),
        "rdquo" => Some('\u{201D}'),
        "lsquo" => Some('\u{2018}'),
        "rsquo" => Some('\u{2019}'),
        "ndash" => Some('\u{2013}'),
        "mdash" => Some('\u{2014}'),
        "hellip" => Some('\u{2026}'),
        "eacute" => Some('\u{00E9}'),
        "uuml" => Some('\u{00FC}'),
        "ouml" => Some('\u{00F6}'),
        "deg" => Some('\u{00B0}'),
        _ => None,
    };

    if let Some(ch) = named {
        return Some(ch.to_string());
    }

    let code = entity.strip_prefix('#')?;
    let value = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => code.parse::<u32>().ok()?,
    };

    char::from_u32(value).map(|ch| ch.to_string())
}
