//! Diacritic folding for the normalize step.
//!
//! Equivalent to NFKD decomposition followed by dropping combining marks in
//! U+0300-U+036F, restricted to the Latin-1 Supplement, Latin Extended-A,
//! and fullwidth ranges. Anything outside those ranges that is not already
//! `[a-z0-9]` or whitespace becomes a space, which is what the subsequent
//! replace rule does to unfoldable characters anyway.

/// Append the folded form of `c` to `out`.
///
/// Expects lowercased input; `normalize` applies `to_lowercase` first.
pub(super) fn push_folded(out: &mut String, c: char) {
    match c {
        'a'..='z' | '0'..='9' => out.push(c),
        c if c.is_whitespace() => out.push(' '),
        // Combining marks are stripped, not spaced
        '\u{0300}'..='\u{036f}' => {}
        // Fullwidth digits and letters
        '\u{ff10}'..='\u{ff19}' => out.push((b'0' + (c as u32 - 0xff10) as u8) as char),
        '\u{ff41}'..='\u{ff5a}' => out.push((b'a' + (c as u32 - 0xff41) as u8) as char),
        _ => match fold_latin(c) {
            Some(folded) => out.push_str(folded),
            None => out.push(' '),
        },
    }
}

/// Decomposition table for lowercase Latin-1 Supplement and Latin
/// Extended-A. Characters with no ASCII decomposition (æ, ø, ß, đ, ł, œ,
/// þ, ...) are absent and fall through to the space rule.
fn fold_latin(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' | 'ª' => "a",
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'ď' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'ĥ' => "h",
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' => "i",
        'ĵ' => "j",
        'ķ' => "k",
        'ĺ' | 'ļ' | 'ľ' => "l",
        'ŀ' => "l ",
        'ñ' | 'ń' | 'ņ' | 'ň' => "n",
        'ŉ' => " n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ō' | 'ŏ' | 'ő' | 'º' => "o",
        'ŕ' | 'ŗ' | 'ř' => "r",
        'ś' | 'ŝ' | 'ş' | 'š' | 'ſ' => "s",
        'ţ' | 'ť' => "t",
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'ŵ' => "w",
        'ý' | 'ÿ' | 'ŷ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        'ĳ' => "ij",
        '¹' => "1",
        '²' => "2",
        '³' => "3",
        '¼' => "1 4",
        '½' => "1 2",
        '¾' => "3 4",
        _ => return None,
    };
    Some(folded)
}
