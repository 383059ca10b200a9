/*!

Parsing of the combined label selector string (`key1=value1,key2=value2`) that identifies the EFS
driver pods.

!*/

use crate::constants::{ENTRY_DELIMITER, EXPECTED_SELECTOR_TOKENS, KEY_VALUE_DELIMITER};
use crate::error::{self, Error, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Iter;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A validated set of label selectors. It always holds at least one entry, no entry has an empty
/// key, and no key or value contains `,` or `=`. Keys are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct LabelSelectorSet(BTreeMap<String, String>);

impl LabelSelectorSet {
    /// Parses `input` with the default delimiters (`,` between entries, `=` between key and
    /// value).
    pub fn parse(input: &str) -> Result<Self> {
        SelectorParser::default().parse(input)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> Iter<'_, String, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`. Provided because `len` is.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    /// Renders the set in Kubernetes label selector syntax, e.g. `app=efs-csi-node,tier=storage`.
    ///
    /// The output always uses `,` and `=`, whatever delimiters the input was parsed with. A set
    /// parsed by `SelectorParser::new(';', ':')` renders as `k=v,k=v`, not `k:v;k:v`.
    pub fn to_label_selector(&self) -> String {
        self.to_string()
    }
}

impl Display for LabelSelectorSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", ENTRY_DELIMITER)?;
            }
            write!(f, "{}{}{}", key, KEY_VALUE_DELIMITER, value)?;
        }
        Ok(())
    }
}

impl FromStr for LabelSelectorSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl<'a> IntoIterator for &'a LabelSelectorSet {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<BTreeMap<String, String>> for LabelSelectorSet {
    type Error = Error;

    fn try_from(map: BTreeMap<String, String>) -> Result<Self> {
        if map.is_empty() {
            return error::EmptySelectorSetSnafu.fail();
        }
        let is_delimiter = |c: char| c == ENTRY_DELIMITER || c == KEY_VALUE_DELIMITER;
        if let Some((key, value)) = map.iter().find(|(key, value)| {
            key.is_empty() || key.contains(is_delimiter) || value.contains(is_delimiter)
        }) {
            return error::InvalidSelectorEntrySnafu {
                key,
                value,
                entry_delimiter: ENTRY_DELIMITER,
                key_value_delimiter: KEY_VALUE_DELIMITER,
            }
            .fail();
        }
        Ok(Self(map))
    }
}

impl From<LabelSelectorSet> for BTreeMap<String, String> {
    fn from(set: LabelSelectorSet) -> Self {
        set.0
    }
}

/// Splits a combined selector string into a [`LabelSelectorSet`].
///
/// Every entry must split into exactly two parts on the key/value delimiter, so a key or value
/// that itself contains the delimiter is rejected. Parsing is all-or-nothing: the first malformed
/// entry fails the whole input. When a key repeats, the later value wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorParser {
    entry_delimiter: char,
    key_value_delimiter: char,
}

impl Default for SelectorParser {
    fn default() -> Self {
        Self::new(ENTRY_DELIMITER, KEY_VALUE_DELIMITER)
    }
}

impl SelectorParser {
    pub fn new(entry_delimiter: char, key_value_delimiter: char) -> Self {
        Self {
            entry_delimiter,
            key_value_delimiter,
        }
    }

    pub fn parse(&self, input: &str) -> Result<LabelSelectorSet> {
        let mut selectors = BTreeMap::new();
        // An empty input yields a single empty token, which fails the two-part check below.
        for token in input.split(self.entry_delimiter) {
            let parts: Vec<&str> = token.split(self.key_value_delimiter).collect();
            if parts.len() != EXPECTED_SELECTOR_TOKENS || parts[0].is_empty() {
                return error::InvalidSelectorSyntaxSnafu {
                    input,
                    token,
                    key_value_delimiter: self.key_value_delimiter,
                }
                .fail();
            }
            let (key, value) = (parts[0], parts[1]);
            if let Some(previous) = selectors.insert(key.to_string(), value.to_string()) {
                warn!(
                    "Label selector key '{}' given more than once, '{}' replaces '{}'",
                    key, value, previous
                );
            }
        }
        Ok(LabelSelectorSet(selectors))
    }
}
