//! Left-to-right SICI tokenizer.
//!
//! A single pass over the character stream with no backtracking: each
//! stage greedily consumes while its character class holds, then hands
//! over to the next stage. Segment fields are populated through the
//! normal mutators so validation fires during parsing, not after.

use regex::Regex;

use crate::sici::Sici;

/// The version digit of a terminal `;D-c` marker, if the input ends
/// with one.
///
/// Strict mode uses this to refuse unsupported versions before any
/// tokenization happens; an input that ends in `;D-` without a check
/// character does not match.
pub(crate) fn terminal_version(raw: &str) -> Option<char> {
    Regex::new(r";([0-9])-.$")
        .ok()
        .and_then(|re| re.captures(raw))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
}

/// Tokenize `raw` into the aggregate's segments.
///
/// Short input is tolerated at every stage: a stage that finds nothing
/// to consume does nothing, and the control stage silently stops when
/// the stream runs dry. The trailing `-` and check character are never
/// consumed.
pub(crate) fn tokenize_into(sici: &mut Sici, raw: &str) {
    let chars: Vec<char> = raw.chars().collect();
    let mut cursor = Cursor::new(&chars);

    // ISSN stage: digits, 'X' and '-'.
    let issn = cursor.take_while(|c| c.is_ascii_digit() || c == 'X' || c == '-');
    if !issn.is_empty() {
        sici.item_mut().set_issn(issn);
    }

    // Chronology stage: parenthesized digits and slashes. The
    // parentheses are separators only, never stored; an empty pair
    // stores an empty-but-present chronology so serialization
    // reproduces it.
    if cursor.bump_if('(') {
        let chronology = cursor.take_while(|c| c.is_ascii_digit() || c == '/');
        cursor.bump_if(')');
        sici.item_mut().set_chronology(chronology);
    }

    // Enumeration stage: everything up to the contribution bracket.
    let enumeration = cursor.take_until('<');
    apply_enumeration(sici, &enumeration);

    // Contribution stage.
    if cursor.bump_if('<') {
        let buffer = cursor.take_until('>');
        cursor.bump_if('>');
        apply_contribution(sici, &buffer);
    }

    // Control stage: csi '.' dpi '.' mfi ';' version.
    if let Some(csi) = cursor.bump() {
        sici.control_mut().set_csi(csi.to_string());
    }
    cursor.bump();
    if let Some(dpi) = cursor.bump() {
        sici.control_mut().set_dpi(dpi.to_string());
    }
    cursor.bump();
    let mfi = cursor.take(2);
    if !mfi.is_empty() {
        sici.control_mut().set_mfi(mfi);
    }
    cursor.bump();
    if let Some(version) = cursor.bump() {
        sici.control_mut().set_version(version.to_string());
    }
}

/// Decompose the enumeration text into `VOL:ISSUE[:suppl]` when the
/// supplement marker is exactly `+` or `*`; otherwise store it raw.
fn apply_enumeration(sici: &mut Sici, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some((volume, rest)) = text.split_once(':')
        && !volume.is_empty()
    {
        let (issue, suppl) = match rest.split_once(':') {
            Some((issue, suppl)) => (issue, Some(suppl)),
            None => (rest, None),
        };
        let suppl_ok = matches!(suppl, None | Some("+") | Some("*"));
        if !issue.is_empty() && suppl_ok {
            sici.item_mut().set_volume(volume);
            sici.item_mut().set_issue(issue);
            if let Some(suppl) = suppl {
                sici.item_mut().set_suppl_or_idx(suppl);
            }
            return;
        }
    }
    sici.item_mut().set_enumeration(text);
}

/// Decompose the contribution buffer, first match wins:
/// `::LOCALNUM`, then `:TITLECODE[:LOCALNUM]`, then
/// `LOCATION:TITLECODE[:LOCALNUM]`, then a bare location.
fn apply_contribution(sici: &mut Sici, buffer: &str) {
    if buffer.is_empty() {
        return;
    }
    let contribution = sici.contribution_mut();
    if let Some(local_number) = buffer.strip_prefix("::") {
        contribution.set_local_number(local_number);
    } else if let Some(rest) = buffer.strip_prefix(':') {
        match rest.split_once(':') {
            Some((title_code, local_number)) => {
                contribution.set_title_code(title_code);
                contribution.set_local_number(local_number);
            }
            None => contribution.set_title_code(rest),
        }
    } else if let Some((location, rest)) = buffer.split_once(':') {
        contribution.set_location(location);
        match rest.split_once(':') {
            Some((title_code, local_number)) => {
                contribution.set_title_code(title_code);
                contribution.set_local_number(local_number);
            }
            None => contribution.set_title_code(rest),
        }
    } else {
        contribution.set_location(buffer);
    }
}

struct Cursor<'a> {
    chars: &'a [char],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(chars: &'a [char]) -> Self {
        Self { chars, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn bump_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn take_until(&mut self, stop: char) -> String {
        self.take_while(|c| c != stop)
    }

    fn take(&mut self, n: usize) -> String {
        let end = (self.pos + n).min(self.chars.len());
        let taken: String = self.chars[self.pos..end].iter().collect();
        self.pos = end;
        taken
    }
}

#[cfg(test)]
mod tests {
    use crate::mode::Mode;
    use crate::sici::Sici;

    use super::*;

    fn tokenized(raw: &str) -> Sici {
        let mut sici = Sici::new(Mode::Lax);
        tokenize_into(&mut sici, raw);
        sici
    }

    #[test]
    fn cursor_take_is_bounded() {
        let chars: Vec<char> = "ab".chars().collect();
        let mut cursor = Cursor::new(&chars);
        assert_eq!(cursor.take(5), "ab");
        assert_eq!(cursor.take(5), "");
        assert_eq!(cursor.bump(), None);
    }

    #[test]
    fn terminal_version_extraction() {
        assert_eq!(terminal_version("0066-4200(1990)25<>1.0.TX;2-I"), Some('2'));
        assert_eq!(terminal_version("0066-4200(1990)25<>1.0.TX;3-I"), Some('3'));
        assert_eq!(terminal_version("0066-4200(1990)25<>1.0.TX;2-"), None);
        assert_eq!(terminal_version(""), None);
    }

    #[test]
    fn issn_stage_is_greedy() {
        let sici = tokenized("0361-526X(2011)");
        assert_eq!(sici.item().issn(), Some("0361-526X"));
        assert_eq!(sici.item().chronology(), Some("2011"));
    }

    #[test]
    fn enumeration_decomposes_volume_and_issue() {
        let sici = tokenized("0361-526X(2011)17:3/4<>");
        assert_eq!(sici.item().volume(), Some("17"));
        assert_eq!(sici.item().issue(), Some("3/4"));
        assert_eq!(sici.item().suppl_or_idx(), None);
        assert_eq!(sici.item().enumeration(), None);
    }

    #[test]
    fn enumeration_with_supplement_marker() {
        let sici = tokenized("1234-5679(1996)10:2:+<>");
        assert_eq!(sici.item().volume(), Some("10"));
        assert_eq!(sici.item().issue(), Some("2"));
        assert_eq!(sici.item().suppl_or_idx(), Some("+"));
    }

    #[test]
    fn enumeration_with_unexpected_third_part_stays_raw() {
        let sici = tokenized("1234-5679(1996)10:2:9<>");
        assert_eq!(sici.item().volume(), None);
        assert_eq!(sici.item().enumeration(), Some("10:2:9"));
    }

    #[test]
    fn contribution_double_colon_is_a_lone_local_number() {
        let sici = tokenized("<::17>");
        assert_eq!(sici.contribution().local_number(), Some("17"));
        assert_eq!(sici.contribution().location(), None);
        assert_eq!(sici.contribution().title_code(), None);
    }

    #[test]
    fn contribution_single_colon_is_a_title_code() {
        let sici = tokenized("<:KTSW:9>");
        assert_eq!(sici.contribution().title_code(), Some("KTSW"));
        assert_eq!(sici.contribution().local_number(), Some("9"));
    }

    #[test]
    fn contribution_full_decomposition() {
        let sici = tokenized("<62:KTSW:9>");
        assert_eq!(sici.contribution().location(), Some("62"));
        assert_eq!(sici.contribution().title_code(), Some("KTSW"));
        assert_eq!(sici.contribution().local_number(), Some("9"));
    }

    #[test]
    fn contribution_bare_buffer_is_a_location() {
        let sici = tokenized("<62>");
        assert_eq!(sici.contribution().location(), Some("62"));
        assert_eq!(sici.contribution().title_code(), None);
    }

    #[test]
    fn control_stage_tolerates_truncation() {
        let sici = tokenized("<>2.1");
        assert_eq!(sici.control().explicit_csi(), Some("2"));
        assert_eq!(sici.control().dpi(), "1");
        // mfi and version fall back to their defaults
        assert_eq!(sici.control().mfi(), "ZU");
        assert_eq!(sici.control().version(), "2");
        assert!(sici.is_valid());
    }

    #[test]
    fn empty_chronology_parentheses_round_trip() {
        let sici = tokenized("1234-5679()<>");
        assert_eq!(sici.item().chronology(), Some(""));
        assert!(sici.item().to_string().contains("()"));
    }
}
