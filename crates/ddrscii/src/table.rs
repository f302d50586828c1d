//! DDRSCII character tables.
//!
//! The forward table maps a precomposed Unicode scalar to the bytes that
//! print it. Most entries are a single typewheel code; the accented vowels
//! at the end are two-byte strikes (dead-key diacritic first, then the base
//! letter on the same position).
//!
//! The inverse table is the transposition of the single-byte entries only,
//! so decoding never reconstructs the two-byte composed letters.

/// Device code for a space (one character advance).
pub const SPACE: u8 = 0x71;
/// Device code for backspace (one character back).
pub const BACKSPACE: u8 = 0x72;
/// Device code for carriage return with line feed.
pub const NEWLINE: u8 = 0x77;
/// Device code for carriage return without line feed.
pub const CARRIAGE_RETURN: u8 = 0x78;
/// Device code for a horizontal tab.
pub const TAB: u8 = 0x79;

const CODE_ENTRIES: &[(char, &[u8])] = &[
    ('_', &[0x01]),
    ('&', &[0x02]),
    ('¨', &[0x03]),
    ('%', &[0x04]),
    ('i', &[0x05]),
    ('£', &[0x06]),
    ('μ', &[0x07]),
    ('9', &[0x08]),
    ('8', &[0x09]),
    ('7', &[0x0A]),
    ('6', &[0x0B]),
    ('5', &[0x0C]),
    ('0', &[0x0D]),
    ('4', &[0x0E]),
    ('3', &[0x0F]),
    ('2', &[0x10]),
    ('1', &[0x11]),
    ('H', &[0x12]),
    (':', &[0x13]),
    ('D', &[0x14]),
    ('²', &[0x15]),
    ('M', &[0x16]),
    ('\'', &[0x17]),
    ('B', &[0x18]),
    ('^', &[0x19]),
    ('Q', &[0x1A]),
    ('*', &[0x1B]),
    ('G', &[0x1C]),
    ('(', &[0x1D]),
    ('O', &[0x1E]),
    (')', &[0x1F]),
    ('C', &[0x20]),
    ('I', &[0x21]),
    ('V', &[0x22]),
    ('³', &[0x23]),
    ('K', &[0x24]),
    ('+', &[0x25]),
    ('X', &[0x26]),
    ('|', &[0x27]),
    ('U', &[0x28]),
    ('´', &[0x29]),
    ('N', &[0x2A]),
    ('`', &[0x2B]),
    ('L', &[0x2C]),
    ('W', &[0x2D]),
    ('=', &[0x2E]),
    ('P', &[0x2F]),
    ('A', &[0x30]),
    ('Y', &[0x31]),
    ('J', &[0x32]),
    ('S', &[0x33]),
    ('E', &[0x34]),
    ('?', &[0x35]),
    ('R', &[0x36]),
    ('T', &[0x37]),
    ('Z', &[0x38]),
    ('°', &[0x39]),
    ('Ü', &[0x3A]),
    (';', &[0x3B]),
    ('Ö', &[0x3C]),
    ('§', &[0x3D]),
    ('F', &[0x3E]),
    ('Ä', &[0x3F]),
    ('/', &[0x40]),
    ('#', &[0x41]),
    ('!', &[0x42]),
    ('"', &[0x43]),
    ('é', &[0x44]),
    ('ç', &[0x45]),
    ('è', &[0x46]),
    ('ß', &[0x47]),
    ('$', &[0x48]),
    ('f', &[0x49]),
    ('m', &[0x4A]),
    ('j', &[0x4B]),
    ('w', &[0x4C]),
    ('l', &[0x4D]),
    ('b', &[0x4E]),
    ('v', &[0x4F]),
    ('k', &[0x50]),
    ('y', &[0x51]),
    ('q', &[0x52]),
    ('d', &[0x53]),
    ('z', &[0x54]),
    ('h', &[0x55]),
    ('t', &[0x56]),
    ('c', &[0x57]),
    ('s', &[0x58]),
    ('r', &[0x59]),
    ('e', &[0x5A]),
    ('p', &[0x5B]),
    ('n', &[0x5C]),
    ('u', &[0x5D]),
    ('o', &[0x5E]),
    ('x', &[0x5F]),
    ('g', &[0x60]),
    ('a', &[0x61]),
    ('-', &[0x62]),
    ('.', &[0x63]),
    (',', &[0x64]),
    ('ä', &[0x65]),
    ('ö', &[0x66]),
    ('ü', &[0x67]),
    (' ', &[SPACE]),
    ('\u{8}', &[BACKSPACE]),
    ('\n', &[NEWLINE]),
    ('\r', &[CARRIAGE_RETURN]),
    ('\t', &[TAB]),
    // Composed strikes: diacritic, then base letter.
    ('à', &[0x2B, 0x61]),
    ('â', &[0x19, 0x61]),
    ('ê', &[0x19, 0x5A]),
    ('ë', &[0x03, 0x5A]),
    ('î', &[0x19, 0x05]),
    ('ï', &[0x03, 0x05]),
    ('ô', &[0x19, 0x5E]),
    ('û', &[0x19, 0x5D]),
    ('ù', &[0x2B, 0x5D]),
];

const INVERSE: [Option<char>; 256] = build_inverse();

const fn build_inverse() -> [Option<char>; 256] {
    let mut inverse = [None; 256];
    let mut i = 0;
    while i < CODE_ENTRIES.len() {
        let (c, bytes) = CODE_ENTRIES[i];
        if bytes.len() == 1 {
            inverse[bytes[0] as usize] = Some(c);
        }
        i += 1;
    }
    inverse
}

/// The canonical DDRSCII code table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodeTable;

impl CodeTable {
    /// Bytes for a single precomposed scalar, if the device can print it.
    pub fn get(&self, c: char) -> Option<&'static [u8]> {
        CODE_ENTRIES
            .iter()
            .find(|(key, _)| *key == c)
            .map(|(_, bytes)| *bytes)
    }

    pub fn contains(&self, c: char) -> bool {
        self.get(c).is_some()
    }

    /// Reverse lookup of a single device byte.
    pub fn inverse(&self, byte: u8) -> Option<char> {
        INVERSE[usize::from(byte)]
    }

    pub fn entries(&self) -> impl Iterator<Item = (char, &'static [u8])> {
        CODE_ENTRIES.iter().copied()
    }

    /// Scalars whose encoding is exactly one byte.
    pub fn single_byte_entries(&self) -> impl Iterator<Item = (char, u8)> {
        CODE_ENTRIES.iter().filter_map(|(c, bytes)| match bytes {
            [byte] => Some((*c, *byte)),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        CODE_ENTRIES.len()
    }

    pub fn is_empty(&self) -> bool {
        CODE_ENTRIES.is_empty()
    }
}

/// Combining diacritics the device can strike on their own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombiningMarkTable;

impl CombiningMarkTable {
    pub fn get(&self, mark: char) -> Option<u8> {
        match mark {
            '\u{0300}' => Some(0x2B), // grave
            '\u{0301}' => Some(0x29), // acute
            '\u{0302}' => Some(0x19), // circumflex
            '\u{0308}' => Some(0x03), // diaeresis
            '\u{030A}' => Some(0x39), // ring above
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<char> = CodeTable.entries().map(|(c, _)| c).collect();
        assert_eq!(keys.len(), CodeTable.len());
    }

    #[test]
    fn test_no_empty_values() {
        assert!(CodeTable.entries().all(|(_, bytes)| !bytes.is_empty()));
    }

    #[test]
    fn test_single_byte_codes_are_distinct() {
        let codes: HashSet<u8> = CodeTable.single_byte_entries().map(|(_, b)| b).collect();
        assert_eq!(codes.len(), CodeTable.single_byte_entries().count());
    }

    #[test]
    fn test_inverse_is_transposition() {
        for (c, byte) in CodeTable.single_byte_entries() {
            assert_eq!(CodeTable.inverse(byte), Some(c), "byte 0x{byte:02X}");
        }
        assert_eq!(CodeTable.inverse(0x00), None);
        assert_eq!(CodeTable.inverse(0xFF), None);
    }

    #[test]
    fn test_composed_entries_are_two_bytes() {
        assert_eq!(CodeTable.get('â'), Some(&[0x19, 0x61][..]));
        assert_eq!(CodeTable.get('ë'), Some(&[0x03, 0x5A][..]));
        assert_eq!(CodeTable.get('é'), Some(&[0x44][..]));
    }

    #[test]
    fn test_control_codes() {
        assert_eq!(CodeTable.get(' '), Some(&[SPACE][..]));
        assert_eq!(CodeTable.get('\n'), Some(&[NEWLINE][..]));
        assert_eq!(CodeTable.get('\r'), Some(&[CARRIAGE_RETURN][..]));
        assert_eq!(CodeTable.get('\t'), Some(&[TAB][..]));
        assert_eq!(CodeTable.get('\u{8}'), Some(&[BACKSPACE][..]));
    }

    #[test]
    fn test_character_codes_stay_seven_bit() {
        assert!(CodeTable.entries().flat_map(|(_, b)| b.iter()).all(|b| *b < 0x80));
    }

    #[test]
    fn test_combining_marks_match_spacing_diacritics() {
        assert_eq!(CombiningMarkTable.get('\u{0301}'), CodeTable.get('´').map(|b| b[0]));
        assert_eq!(CombiningMarkTable.get('\u{0300}'), CodeTable.get('`').map(|b| b[0]));
        assert_eq!(CombiningMarkTable.get('\u{0302}'), CodeTable.get('^').map(|b| b[0]));
        assert_eq!(CombiningMarkTable.get('\u{0308}'), CodeTable.get('¨').map(|b| b[0]));
        assert_eq!(CombiningMarkTable.get('\u{030A}'), CodeTable.get('°').map(|b| b[0]));
        assert_eq!(CombiningMarkTable.get('\u{0303}'), None);
    }
}
