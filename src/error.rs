/// Error raised while compiling a pattern set or driving a search.
///
/// Compilation is all-or-nothing: any error from a dialect translator or an
/// engine compiler aborts the build and no [`Searcher`](crate::Searcher) is
/// produced. Hosts that want the traditional fatal-diagnostic behavior can
/// print the message and exit; nothing here aborts the process.
#[derive(Clone, Debug, thiserror::Error)]
pub enum Error {
    /// A pattern was rejected by a dialect translator or an engine compiler.
    #[error("{0}")]
    Syntax(String),
    /// A configuration no engine combination can honor, e.g. the `perl`
    /// dialect together with a non-newline line terminator.
    #[error("{0}")]
    Config(String),
    /// An engine failed while searching (backtracking or resource limits).
    #[error("{0}")]
    Engine(String),
}

impl Error {
    pub(crate) fn syntax(msg: impl ToString) -> Error {
        Error::Syntax(msg.to_string())
    }

    pub(crate) fn config(msg: impl ToString) -> Error {
        Error::Config(msg.to_string())
    }

    pub(crate) fn engine(msg: impl ToString) -> Error {
        Error::Engine(msg.to_string())
    }
}
