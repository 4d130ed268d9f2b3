/// Lookup table for the 52 basic Latin letters, indexed by ASCII code.
/// Each slot holds the lowercase form, or 0 for anything that is not a letter.
const FOLD: [u8; 128] = {
    let mut table = [0u8; 128];
    let mut c = b'a';
    while c <= b'z' {
        table[c as usize] = c;
        table[(c - b'a' + b'A') as usize] = c;
        c += 1;
    }
    table
};

/// Returns the lowercase form of `c` if it is one of `a`-`z` or `A`-`Z`.
///
/// Anything else, including accented and other Unicode letters, is `None`
/// and acts as a word boundary.
#[inline]
pub fn fold_letter(c: char) -> Option<char> {
    let code = c as u32;
    if code >= 128 {
        return None;
    }
    match FOLD[code as usize] {
        0 => None,
        lower => Some(lower as char),
    }
}

#[inline]
pub fn is_letter(c: char) -> bool {
    fold_letter(c).is_some()
}
