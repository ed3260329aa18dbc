use super::*;
use crate::AutomatonBuilder;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const KEYWORD: u16 = 2;
const IDENT: u16 = 3;

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

/// `ab` is a keyword, `[a-z]+` an identifier.
fn keyword_automaton() -> Automaton {
    let mut b = AutomatonBuilder::new();
    let a = b.add_state(Some(IDENT));
    let ab = b.add_state(Some(KEYWORD));
    let ident = b.add_state(Some(IDENT));
    b.on_byte(0, b'a', a);
    b.on_bytes(0, (b'b'..=b'z').collect::<Vec<_>>(), ident);
    b.on_byte(a, b'b', ab);
    b.on_bytes(a, (b'a'..=b'z').filter(|&c| c != b'b').collect::<Vec<_>>(), ident);
    b.on_bytes(ab, b'a'..=b'z', ident);
    b.on_bytes(ident, b'a'..=b'z', ident);
    Automaton::from_bytes(&b.to_bytes()).unwrap()
}

// === Longest Match ===

#[test]
fn keyword_wins_at_exact_length() {
    let automaton = keyword_automaton();
    assert_eq!(
        run_dfa(&automaton, &chars("ab cd"), 0),
        Some(TokenMatch {
            terminal: KEYWORD,
            length: 2
        })
    );
}

#[test]
fn longer_identifier_beats_keyword_prefix() {
    let automaton = keyword_automaton();
    assert_eq!(
        run_dfa(&automaton, &chars("abc"), 0),
        Some(TokenMatch {
            terminal: IDENT,
            length: 3
        })
    );
}

#[test]
fn walk_starts_at_given_index() {
    let automaton = keyword_automaton();
    assert_eq!(
        run_dfa(&automaton, &chars("ab xyz"), 3),
        Some(TokenMatch {
            terminal: IDENT,
            length: 3
        })
    );
}

#[test]
fn last_recognition_survives_failed_extension() {
    // "a" recognized, then "a1" has no transition
    let automaton = keyword_automaton();
    assert_eq!(
        run_dfa(&automaton, &chars("a1"), 0),
        Some(TokenMatch {
            terminal: IDENT,
            length: 1
        })
    );
}

// === No Match ===

#[test]
fn unknown_character_is_no_match() {
    let automaton = keyword_automaton();
    assert_eq!(run_dfa(&automaton, &chars("1ab"), 0), None);
}

#[test]
fn end_of_input_is_no_match() {
    let automaton = keyword_automaton();
    assert_eq!(run_dfa(&automaton, &chars("ab"), 2), None);
}

#[test]
fn zero_length_recognition_is_no_match() {
    let mut b = AutomatonBuilder::new();
    b.set_terminal(0, IDENT);
    let automaton = Automaton::from_bytes(&b.to_bytes()).unwrap();
    assert_eq!(run_dfa(&automaton, &chars("x"), 0), None);
}

// === Beyond Latin-1 ===

#[test]
fn bmp_character_uses_range_transition() {
    let mut b = AutomatonBuilder::new();
    let omega = b.add_state(Some(IDENT));
    b.on_char(0, 'Ω', omega);
    let automaton = Automaton::from_bytes(&b.to_bytes()).unwrap();
    assert_eq!(
        run_dfa(&automaton, &chars("Ω"), 0),
        Some(TokenMatch {
            terminal: IDENT,
            length: 1
        })
    );
}

#[test]
fn surrogate_pair_counts_as_one_character() {
    let mut b = AutomatonBuilder::new();
    let smile = b.add_state(Some(IDENT));
    let smile_x = b.add_state(Some(KEYWORD));
    b.on_char(0, '\u{1F600}', smile);
    b.on_byte(smile, b'x', smile_x);
    let automaton = Automaton::from_bytes(&b.to_bytes()).unwrap();
    assert_eq!(
        run_dfa(&automaton, &chars("\u{1F600}x"), 0),
        Some(TokenMatch {
            terminal: KEYWORD,
            length: 2
        })
    );
}

#[test]
fn surrogate_pair_needs_both_halves() {
    let mut b = AutomatonBuilder::new();
    let smile = b.add_state(Some(IDENT));
    b.on_char(0, '\u{1F600}', smile);
    let automaton = Automaton::from_bytes(&b.to_bytes()).unwrap();
    // same lead surrogate (0xD83D), different trail
    assert_eq!(run_dfa(&automaton, &chars("\u{1F601}"), 0), None);
}

#[test]
fn lead_state_alone_recognizes_nothing() {
    let mut b = AutomatonBuilder::new();
    let smile = b.add_state(Some(IDENT));
    b.on_char(0, '\u{1F600}', smile);
    let automaton = Automaton::from_bytes(&b.to_bytes()).unwrap();
    assert_eq!(run_dfa(&automaton, &chars("a"), 0), None);
}

// === Properties ===

proptest! {
    #[test]
    fn identifier_match_is_maximal_run(input in "[a-z0-9 ]{0,24}", start in 0usize..24) {
        let automaton = keyword_automaton();
        let input = chars(&input);
        let start = start.min(input.len());
        let run = input[start..].iter().take_while(|c| c.is_ascii_lowercase()).count();
        match run_dfa(&automaton, &input, start) {
            None => prop_assert_eq!(run, 0),
            Some(found) => {
                prop_assert_eq!(found.length, run);
                let is_keyword = run == 2 && input[start] == 'a' && input[start + 1] == 'b';
                prop_assert_eq!(found.terminal, if is_keyword { KEYWORD } else { IDENT });
            }
        }
    }
}
