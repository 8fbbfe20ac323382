use std::fmt;
use std::str::FromStr;

/// Identifies one precomputed slice of a region payload. The string form
/// `"<desired_class>|<top_n>"` is the key used in the payload's `selections`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectionKey {
    pub desired_class: String,
    pub top_n: u32,
}

impl SelectionKey {
    pub fn new(desired_class: impl Into<String>, top_n: u32) -> Self {
        Self {
            desired_class: desired_class.into(),
            top_n,
        }
    }
}

impl fmt::Display for SelectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.desired_class, self.top_n)
    }
}

impl FromStr for SelectionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Class names may themselves contain '|'; top_n never does.
        let (class, top_n) = s
            .rsplit_once('|')
            .ok_or_else(|| format!("selection key has no '|': {s}"))?;
        let top_n = top_n
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("invalid top_n in selection key: {s}"))?;
        Ok(Self::new(class, top_n))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/selection.rs"]
mod tests;
