//! American Soundex phonetic encoding.
//!
//! No crate in the retrieval pack implements Soundex, so this is hand-rolled core domain
//! logic (the spec calls it out explicitly as one of "the hard part"'s components) rather
//! than ambient stack. Standard four-character code: first letter, then up to three digits
//! encoding the remaining consonant groups, padded with zeros.

/// Compute the Soundex code of `word`. Empty input yields the empty string.
pub fn soundex(word: &str) -> String {
    let chars: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    if chars.is_empty() {
        return String::new();
    }

    let first = chars[0].to_ascii_uppercase();
    let mut code = String::new();
    code.push(first);

    let mut last_digit = soundex_digit(first);
    for &ch in &chars[1..] {
        let upper = ch.to_ascii_uppercase();
        let digit = soundex_digit(upper);
        match digit {
            Some(d) if Some(d) != last_digit => {
                code.push(std::char::from_digit(d as u32, 10).unwrap());
                if code.len() == 4 {
                    break;
                }
            }
            _ => {}
        }
        // h and w do not break a run of otherwise-identical digits; vowels reset it.
        if !matches!(upper, 'H' | 'W') {
            last_digit = digit;
        }
    }

    while code.len() < 4 {
        code.push('0');
    }
    code
}

fn soundex_digit(c: char) -> Option<u8> {
    match c {
        'B' | 'F' | 'P' | 'V' => Some(1),
        'C' | 'G' | 'J' | 'K' | 'Q' | 'S' | 'X' | 'Z' => Some(2),
        'D' | 'T' => Some(3),
        'L' => Some(4),
        'M' | 'N' => Some(5),
        'R' => Some(6),
        _ => None, // vowels, H, W, Y
    }
}
