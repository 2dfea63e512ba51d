//! Outcome of a lenient store read.

/// The result of reading a collection from the record store.
///
/// Reads never fail outright. Instead the caller learns whether the data
/// was there, was never written, or could not be read. Callers that want
/// the lenient "treat damage as empty" behaviour use
/// [`Loaded::into_value_or_default`]; stricter callers can match on
/// [`Loaded::Corrupt`].
///
/// # Example
///
/// ```
/// use attendance_engine::store::Loaded;
///
/// let found = Loaded::Found(vec![1, 2, 3]);
/// assert_eq!(found.into_value_or_default(), vec![1, 2, 3]);
///
/// let corrupt: Loaded<Vec<i32>> = Loaded::Corrupt {
///     location: "data/employees.json".to_string(),
///     reason: "expected value at line 1 column 1".to_string(),
/// };
/// assert!(corrupt.is_corrupt());
/// assert!(corrupt.into_value_or_default().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded<T> {
    /// The resource exists and decoded cleanly.
    Found(T),
    /// The resource has never been written.
    Missing,
    /// The resource exists but could not be read or decoded.
    Corrupt {
        /// Where the resource lives (a path for file stores).
        location: String,
        /// Why it could not be used.
        reason: String,
    },
}

impl<T> Loaded<T> {
    /// Returns true if the resource decoded cleanly.
    pub fn is_found(&self) -> bool {
        matches!(self, Loaded::Found(_))
    }

    /// Returns true if the resource was present but unusable.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Loaded::Corrupt { .. })
    }

    /// Returns the value if found.
    pub fn found(self) -> Option<T> {
        match self {
            Loaded::Found(value) => Some(value),
            _ => None,
        }
    }

    /// Transforms the found value.
    pub fn map<U, F>(self, f: F) -> Loaded<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Loaded::Found(value) => Loaded::Found(f(value)),
            Loaded::Missing => Loaded::Missing,
            Loaded::Corrupt { location, reason } => Loaded::Corrupt { location, reason },
        }
    }
}

impl<T: Default> Loaded<T> {
    /// Returns the found value, or the empty default when missing or corrupt.
    pub fn into_value_or_default(self) -> T {
        self.found().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corrupt() -> Loaded<Vec<u8>> {
        Loaded::Corrupt {
            location: "day.json".to_string(),
            reason: "truncated".to_string(),
        }
    }

    #[test]
    fn test_found_yields_value() {
        let loaded = Loaded::Found(vec![1u8]);
        assert!(loaded.is_found());
        assert!(!loaded.is_corrupt());
        assert_eq!(loaded.into_value_or_default(), vec![1u8]);
    }

    #[test]
    fn test_missing_degrades_to_empty() {
        let loaded: Loaded<Vec<u8>> = Loaded::Missing;
        assert!(!loaded.is_found());
        assert!(!loaded.is_corrupt());
        assert!(loaded.into_value_or_default().is_empty());
    }

    #[test]
    fn test_corrupt_is_distinguishable_but_degrades_to_empty() {
        let loaded = corrupt();
        assert!(loaded.is_corrupt());
        assert!(loaded.clone().found().is_none());
        assert!(loaded.into_value_or_default().is_empty());
    }

    #[test]
    fn test_map_preserves_variant() {
        assert_eq!(Loaded::Found(vec![1u8, 2]).map(|v| v.len()), Loaded::Found(2));
        assert_eq!(Loaded::<Vec<u8>>::Missing.map(|v| v.len()), Loaded::Missing);
        assert!(corrupt().map(|v| v.len()).is_corrupt());
    }
}
