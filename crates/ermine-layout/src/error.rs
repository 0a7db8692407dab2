#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Node indices must come from the same canonical order the caller used to build the node
    /// sequence; anything else is a precondition violation, not a recoverable case.
    #[error("edge #{edge} ({from} -> {to}) references a node outside 0..{node_count}")]
    EdgeOutOfRange {
        edge: usize,
        from: usize,
        to: usize,
        node_count: usize,
    },

    #[error("invalid layout option `{name}` = {value}: expected {expected}")]
    InvalidOption {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
