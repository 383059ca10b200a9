use snafu::Snafu;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning user input into a [`ResolvedConfiguration`].
///
/// [`ResolvedConfiguration`]: crate::ResolvedConfiguration
#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The combined selector string could not be parsed. `token` is the first malformed entry.
    #[snafu(display(
        "Failed to parse combined EFS driver label selectors '{}': '{}' is not of the form key{}value",
        input,
        token,
        key_value_delimiter
    ))]
    InvalidSelectorSyntax {
        input: String,
        token: String,
        key_value_delimiter: char,
    },

    /// A selector entry supplied as a map, e.g. when deserializing, that the parser could never
    /// have produced.
    #[snafu(display(
        "Invalid EFS driver label selector '{}' = '{}': the key must be non-empty and neither key \
         nor value may contain '{}' or '{}'",
        key,
        value,
        entry_delimiter,
        key_value_delimiter
    ))]
    InvalidSelectorEntry {
        key: String,
        value: String,
        entry_delimiter: char,
        key_value_delimiter: char,
    },

    /// A selector set must hold at least one entry.
    #[snafu(display("At least one EFS driver label selector is required"))]
    EmptySelectorSet,
}
