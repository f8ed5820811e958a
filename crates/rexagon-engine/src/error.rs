use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unbalanced parentheses in pattern")]
    UnbalancedParens,

    #[error("unterminated character class in pattern")]
    UnterminatedClass,

    #[error("{0:?} is not in the alphabet or a recognized metacharacter")]
    UnknownChar(char),

    #[error("expected a group number 1-9 after backslash")]
    BadEscape,

    #[error("\\{0} refers to a group the pattern never defines")]
    BadBackreference(usize),

    #[error("group definitions cannot nest or contain backreferences")]
    NestedGroup,

    #[error("expected {expected} patterns for this board, got {actual}")]
    PatternCount { expected: usize, actual: usize },
}
