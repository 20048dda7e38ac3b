//! KEY=VALUE argument resolution for the query client.
//!
//! Every raw argument must look like `-KEY=VALUE` or `--KEY=VALUE`. The
//! argument is split on the first `=`; anything else is malformed and fails
//! resolution before any mode logic runs. Repeated keys keep the last value.

use crate::error::ArgError;

/// Ordered key/value mapping built once from the raw argument list.
///
/// Insertion order is preserved; keys are unique with last-occurrence-wins
/// semantics. The mapping is read-only after resolution.
#[derive(Debug, Clone, Default)]
pub struct ArgMap {
    pairs: Vec<(String, String)>,
}

impl ArgMap {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert(&mut self, key: String, value: String) {
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }
}

/// Resolve the raw argument strings into an [`ArgMap`].
///
/// Fails on the first malformed argument; no partial mapping escapes.
pub fn resolve<I, S>(raw: I) -> Result<ArgMap, ArgError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut map = ArgMap::default();
    for arg in raw {
        let arg = arg.as_ref();
        let (key_part, value) = arg
            .split_once('=')
            .ok_or_else(|| ArgError::MissingSeparator(arg.to_string()))?;
        let key = if let Some(stripped) = key_part.strip_prefix("--") {
            stripped
        } else if let Some(stripped) = key_part.strip_prefix('-') {
            stripped
        } else {
            return Err(ArgError::MissingDashPrefix(arg.to_string()));
        };
        map.insert(key.to_string(), value.to_string());
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_dash_argument() {
        let map = resolve(["-index=movies"]).unwrap();
        assert_eq!(map.get("index"), Some("movies"));
    }

    #[test]
    fn test_double_dash_argument() {
        let map = resolve(["--index=movies"]).unwrap();
        assert_eq!(map.get("index"), Some("movies"));
    }

    #[test]
    fn test_value_may_contain_equals() {
        let map = resolve(["--query=a=b"]).unwrap();
        assert_eq!(map.get("query"), Some("a=b"));
    }

    #[test]
    fn test_empty_value() {
        let map = resolve(["--query="]).unwrap();
        assert_eq!(map.get("query"), Some(""));
    }

    #[test]
    fn test_last_occurrence_wins() {
        let map = resolve(["--index=books", "-index=movies"]).unwrap();
        assert_eq!(map.get("index"), Some("movies"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let map = resolve(["--b=1", "--a=2", "--c=3"]).unwrap();
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn test_missing_separator_fails() {
        let err = resolve(["--index"]).unwrap_err();
        assert!(matches!(err, ArgError::MissingSeparator(_)));
    }

    #[test]
    fn test_missing_dash_prefix_fails() {
        let err = resolve(["index=movies"]).unwrap_err();
        assert!(matches!(err, ArgError::MissingDashPrefix(_)));
    }

    #[test]
    fn test_later_malformed_argument_fails_whole_resolution() {
        assert!(resolve(["--index=movies", "nonsense"]).is_err());
    }

    #[test]
    fn test_unknown_keys_pass_through_unvalidated() {
        let map = resolve(["--colour=red"]).unwrap();
        assert_eq!(map.get("colour"), Some("red"));
        assert_eq!(map.get("index"), None);
    }
}
