//! Pattern parser for the narrow regex sublanguage.
//!
//! A pattern is parsed into a set of *pre-chains*: flat sequences of slots,
//! group definitions, and backreference markers. Groups stay separate until
//! [`crate::nfsm::Nfsm`] flattens them, so a backreference can alias the
//! defining slots.
//!
//! Supported syntax: literal letters from the alphabet, `.`, `[xyz]`,
//! `[^xyz]`, one level of `(..)`, `\1`..`\9`, top-level `|`, and the suffix
//! quantifiers `*`, `+`, `?`. Parentheses only act as capture groups when
//! unquantified; a quantified `(..)` merely scopes the alternation.

use crate::error::Error;
use crate::letterset::LetterSet;

/// One item of a pre-chain, before group flattening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Item {
    /// The set of letters one slot may hold.
    Slot(LetterSet),
    /// A group definition; the body is recorded so later backreferences can
    /// splice in the same slots.
    Group(Vec<LetterSet>),
    /// A 0-based reference to an earlier group in the same pre-chain.
    Backref(usize),
}

pub(crate) type PreChain = Vec<Item>;

/// Parse a whole pattern into its pre-chains. `length` bounds quantifier
/// expansion; chains that still miss the exact length are filtered by the
/// caller once groups are resolved.
pub(crate) fn prechains(
    pattern: &str,
    length: usize,
    alphabet: LetterSet,
) -> Result<Vec<PreChain>, Error> {
    parse_part(pattern.as_bytes(), length, alphabet)
}

fn parse_part(rx: &[u8], length: usize, alphabet: LetterSet) -> Result<Vec<PreChain>, Error> {
    if rx.is_empty() {
        return Ok(vec![PreChain::new()]);
    }

    // Alternation at the current paren level splits the pattern before
    // anything else is considered.
    let mut depth = 0i32;
    for (i, &byte) in rx.iter().enumerate() {
        match byte {
            b'(' => depth += 1,
            b')' => depth -= 1,
            b'|' if depth == 0 => {
                let mut chains = parse_part(&rx[..i], length, alphabet)?;
                chains.extend(parse_part(&rx[i + 1..], length, alphabet)?);
                return Ok(chains);
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(Error::UnbalancedParens);
    }

    // One atom. `end` is the index of its last byte.
    let mut group = false;
    let (atoms, end): (Vec<PreChain>, usize) = match rx[0] {
        b'.' => (vec![vec![Item::Slot(alphabet)]], 0),
        b'[' => {
            let close = rx
                .iter()
                .position(|&b| b == b']')
                .ok_or(Error::UnterminatedClass)?;
            let set = if rx.get(1) == Some(&b'^') {
                alphabet - class_set(&rx[2..close])?
            } else {
                class_set(&rx[1..close])?
            };
            (vec![vec![Item::Slot(set)]], close)
        }
        b'(' => {
            let close = rx
                .iter()
                .position(|&b| b == b')')
                .ok_or(Error::UnbalancedParens)?;
            group = true;
            (parse_part(&rx[1..close], length, alphabet)?, close)
        }
        b'\\' => match rx.get(1).copied() {
            Some(digit @ b'1'..=b'9') => {
                (vec![vec![Item::Backref((digit - b'1') as usize)]], 1)
            }
            _ => return Err(Error::BadEscape),
        },
        byte if alphabet.contains(char::from(byte)) => {
            (vec![vec![Item::Slot(LetterSet::letter(char::from(byte)))]], 0)
        }
        byte => return Err(Error::UnknownChar(char::from(byte))),
    };

    // A suffix quantifier consumes the atom; a quantified paren is not a
    // capture group.
    if let Some(&quantifier) = rx.get(end + 1) {
        if matches!(quantifier, b'*' | b'+' | b'?') {
            let rest = parse_part(&rx[end + 2..], length, alphabet)?;
            let mut out = Vec::new();
            match quantifier {
                b'*' | b'+' => {
                    for rep in repetitions(&atoms, length, quantifier == b'*') {
                        for tail in &rest {
                            let mut chain = rep.clone();
                            chain.extend(tail.iter().cloned());
                            out.push(chain);
                        }
                    }
                }
                _ => {
                    for tail in &rest {
                        for atom in &atoms {
                            out.push(tail.clone());
                            let mut chain = atom.clone();
                            chain.extend(tail.iter().cloned());
                            out.push(chain);
                        }
                    }
                }
            }
            return Ok(out);
        }
    }

    let rest = parse_part(&rx[end + 1..], length, alphabet)?;
    let mut out = Vec::new();
    for tail in &rest {
        for atom in &atoms {
            let mut chain = PreChain::with_capacity(atom.len() + tail.len());
            if group {
                chain.push(Item::Group(group_body(atom)?));
            } else {
                chain.extend(atom.iter().cloned());
            }
            chain.extend(tail.iter().cloned());
            out.push(chain);
        }
    }
    Ok(out)
}

/// Every concatenation of independently chosen atom-chains whose known width
/// still fits in `length` slots. Repetition counts are additionally capped at
/// `length`, so zero-width atoms (bare backreferences, empty groups) cannot
/// repeat unboundedly.
fn repetitions(atoms: &[PreChain], length: usize, allow_empty: bool) -> Vec<PreChain> {
    let mut out = Vec::new();
    if allow_empty {
        out.push(PreChain::new());
    }

    let mut frontier = vec![PreChain::new()];
    for _ in 0..length {
        let mut next = Vec::new();
        for prefix in &frontier {
            for atom in atoms {
                let mut candidate = prefix.clone();
                candidate.extend(atom.iter().cloned());
                if min_width(&candidate) <= length {
                    next.push(candidate);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        out.extend(next.iter().cloned());
        frontier = next;
    }
    out
}

/// The number of slots a pre-chain is known to occupy. Backreferences count
/// as zero; their width is only known once groups are resolved.
fn min_width(chain: &[Item]) -> usize {
    chain
        .iter()
        .map(|item| match item {
            Item::Slot(_) => 1,
            Item::Group(body) => body.len(),
            Item::Backref(_) => 0,
        })
        .sum()
}

fn class_set(letters: &[u8]) -> Result<LetterSet, Error> {
    let mut set = LetterSet::EMPTY;
    for &byte in letters {
        match byte {
            b'A'..=b'Z' => set |= LetterSet::letter(char::from(byte)),
            _ => return Err(Error::UnknownChar(char::from(byte))),
        }
    }
    Ok(set)
}

/// A group body must be a plain slot sequence; anything else means the
/// pattern nested groups or referenced one from inside a definition.
fn group_body(chain: &PreChain) -> Result<Vec<LetterSet>, Error> {
    chain
        .iter()
        .map(|item| match item {
            Item::Slot(set) => Ok(*set),
            _ => Err(Error::NestedGroup),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(letters: &str) -> LetterSet {
        LetterSet::letters(letters)
    }

    #[test]
    fn concatenation_is_a_flat_slot_sequence() {
        let chains = prechains("AB", 2, set("ABC")).unwrap();
        assert_eq!(
            chains,
            vec![vec![Item::Slot(set("A")), Item::Slot(set("B"))]]
        );
    }

    #[test]
    fn an_unquantified_paren_becomes_a_group_marker() {
        let chains = prechains(r"(AB)\1", 4, set("ABC")).unwrap();
        assert_eq!(
            chains,
            vec![vec![
                Item::Group(vec![set("A"), set("B")]),
                Item::Backref(0),
            ]]
        );
    }

    #[test]
    fn a_quantified_paren_is_not_a_group() {
        let chains = prechains("(A|B)*", 2, set("ABC")).unwrap();
        assert!(chains
            .iter()
            .all(|chain| chain.iter().all(|item| matches!(item, Item::Slot(_)))));
        // Independent choices per repetition: the two-slot chains cover all
        // four orderings.
        let pairs: Vec<&PreChain> = chains.iter().filter(|c| c.len() == 2).collect();
        assert_eq!(pairs.len(), 4);
    }

    #[test]
    fn star_expansion_prunes_overlong_sequences() {
        let chains = prechains("A*", 3, set("ABC")).unwrap();
        assert_eq!(chains.len(), 4);
        assert!(chains.iter().all(|chain| min_width(chain) <= 3));
    }

    #[test]
    fn construction_errors() {
        let alphabet = set("ABC");
        assert_eq!(prechains("(A", 1, alphabet), Err(Error::UnbalancedParens));
        assert_eq!(prechains("[AB", 1, alphabet), Err(Error::UnterminatedClass));
        assert_eq!(prechains("Z", 1, alphabet), Err(Error::UnknownChar('Z')));
        assert_eq!(prechains(r"A\x", 2, alphabet), Err(Error::BadEscape));
        assert_eq!(prechains(r"A\", 2, alphabet), Err(Error::BadEscape));
        assert_eq!(prechains(r"(\1)", 1, alphabet), Err(Error::NestedGroup));
    }
}
