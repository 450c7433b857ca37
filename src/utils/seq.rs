use once_cell::sync::Lazy;

/// Complement of every byte of the ATGCN-and-gap alphabet. `N` and `-` map
/// to themselves, anything else maps to `N`.
static COMPLEMENT: Lazy<[u8; 256]> = Lazy::new(|| {
    let mut table = [b'N'; 256];
    table[b'A' as usize] = b'T';
    table[b'T' as usize] = b'A';
    table[b'G' as usize] = b'C';
    table[b'C' as usize] = b'G';
    table[b'-' as usize] = b'-';
    table
});

fn normalize_letter(letter: char) -> char {
    match letter.to_ascii_uppercase() {
        c @ ('A' | 'T' | 'G' | 'C') => c,
        _ => 'N',
    }
}

/// Normalizes text to the ATGCN alphabet: letters are uppercased, letters
/// outside ATGC become `N`, everything else (gaps, digits, whitespace) is
/// dropped.
pub fn to_atgcn(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_alphabetic)
        .map(normalize_letter)
        .collect()
}

/// Same as [`to_atgcn`], but gap markers survive.
pub fn to_atgcn_and_gap(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == '-')
        .map(|c| if c == '-' { c } else { normalize_letter(c) })
        .collect()
}

/// Per-letter complement of normalized text, order preserved.
pub fn complement(text: &str) -> String {
    text.bytes().map(|b| COMPLEMENT[b as usize] as char).collect()
}

/// Reverse complement of normalized text.
pub fn rev_comp(text: &str) -> String {
    text.bytes()
        .rev()
        .map(|b| COMPLEMENT[b as usize] as char)
        .collect()
}
