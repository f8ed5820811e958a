//! Nondeterministic finite state machine matching strings of one fixed,
//! finite length.
//!
//! A compiled pattern is a disjunction of [`Chain`]s. Each chain is one
//! concrete skeleton the pattern can take over the line: a letter-set per
//! slot. `B[AC]+A*` at length 4 over the alphabet `ABC`, for example,
//! compiles to
//!
//! ```text
//! [{B}, {AC}, {AC}, {AC}]
//! [{B}, {AC}, {AC}, {A}]
//! [{B}, {AC}, {A}, {A}]
//! ```
//!
//! Constraining a slot intersects that position of every chain; a chain
//! whose slot empties is dropped. Backreferences are slots that share an
//! equivalence class, so narrowing one position narrows the other.

use log::debug;

use crate::error::Error;
use crate::letterset::LetterSet;
use crate::parse::{self, Item, PreChain};

/// One fixed-length matching skeleton.
///
/// Slots are indices into a small per-chain table of letter-set classes.
/// Backreferenced positions map to the same class, so `Clone` preserves the
/// aliasing and a class intersection is visible at every position that
/// shares it.
#[derive(Debug, Clone)]
pub struct Chain {
    slots: Vec<usize>,
    classes: Vec<LetterSet>,
}

impl Chain {
    /// Flatten a pre-chain: group bodies are recorded in order of appearance
    /// and spliced back in, class indices intact, wherever they are
    /// referenced.
    fn from_prechain(pre: &PreChain) -> Result<Chain, Error> {
        let mut slots = Vec::new();
        let mut classes = Vec::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();

        for item in pre {
            match item {
                Item::Slot(set) => {
                    slots.push(classes.len());
                    classes.push(*set);
                }
                Item::Group(body) => {
                    let mut ids = Vec::with_capacity(body.len());
                    for &set in body {
                        ids.push(classes.len());
                        slots.push(classes.len());
                        classes.push(set);
                    }
                    groups.push(ids);
                }
                Item::Backref(index) => {
                    let ids = groups
                        .get(*index)
                        .ok_or(Error::BadBackreference(index + 1))?;
                    slots.extend(ids.iter().copied());
                }
            }
        }

        Ok(Chain { slots, classes })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The letter-set currently allowed at slot `index`.
    pub fn slot(&self, index: usize) -> LetterSet {
        self.classes[self.slots[index]]
    }

    /// Whether two slots share one set, i.e. are tied by a backreference.
    pub fn aliased(&self, a: usize, b: usize) -> bool {
        self.slots[a] == self.slots[b]
    }

    /// Intersect slot `index` with `allowed`; reports whether the chain is
    /// still alive.
    fn constrain(&mut self, index: usize, allowed: LetterSet) -> bool {
        let class = self.slots[index];
        self.classes[class] &= allowed;
        !self.classes[class].is_empty()
    }

    fn has_empty_slot(&self) -> bool {
        self.slots.iter().any(|&class| self.classes[class].is_empty())
    }
}

/// Chains compare by the letter-sets visible at each slot; aliasing
/// structure is not part of equality.
impl PartialEq for Chain {
    fn eq(&self, other: &Chain) -> bool {
        self.len() == other.len() && (0..self.len()).all(|i| self.slot(i) == other.slot(i))
    }
}

impl Eq for Chain {}

/// A pattern compiled against a fixed line length and alphabet.
#[derive(Debug, Clone)]
pub struct Nfsm {
    pattern: String,
    length: usize,
    alphabet: LetterSet,
    chains: Vec<Chain>,
}

impl Nfsm {
    /// Compile `pattern`. Chains that cannot cover exactly `length` slots,
    /// or that already hold an empty slot, are discarded; a pattern that
    /// cannot match any string of this length simply compiles to an empty
    /// disjunction.
    pub fn new(pattern: &str, length: usize, alphabet: LetterSet) -> Result<Nfsm, Error> {
        let mut chains = Vec::new();
        for pre in parse::prechains(pattern, length, alphabet)? {
            let chain = Chain::from_prechain(&pre)?;
            if chain.len() == length && !chain.has_empty_slot() {
                chains.push(chain);
            }
        }

        debug!(
            "compiled {:?} into {} chains of length {}",
            pattern,
            chains.len(),
            length
        );

        Ok(Nfsm {
            pattern: pattern.to_owned(),
            length,
            alphabet,
            chains,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn alphabet(&self) -> LetterSet {
        self.alphabet
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Record outside knowledge that slot `index` holds one of `allowed`.
    /// Chains left with no possibility there are dropped.
    pub fn constrain_slot(&mut self, index: usize, allowed: LetterSet) {
        assert!(index < self.length, "slot {index} out of range");
        self.chains.retain_mut(|chain| chain.constrain(index, allowed));
    }

    /// The union, over surviving chains, of what slot `index` may hold.
    /// Empty when no chain survives.
    pub fn peek_slot(&self, index: usize) -> LetterSet {
        assert!(index < self.length, "slot {index} out of range");
        self.chains
            .iter()
            .fold(LetterSet::EMPTY, |set, chain| set | chain.slot(index))
    }

    /// Whether `text` matches the pattern under the constraints applied so
    /// far. Runs against a scratch copy; the state is untouched.
    pub fn matches(&self, text: &str) -> bool {
        if text.chars().count() != self.length {
            return false;
        }

        let mut probe = self.clone();
        for (i, letter) in text.chars().enumerate() {
            probe.constrain_slot(i, LetterSet::letter(letter));
        }
        !probe.chains.is_empty()
    }
}
