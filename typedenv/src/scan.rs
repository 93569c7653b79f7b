//! Binding list evaluation against the environment

use std::env;
use std::fmt;
use std::fs;

use crate::adapter::{direct, Decode};
use crate::error::Error;
use crate::underlying::Destination;

/// What to do when a binding's variable is not set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Policy {
    /// Fail with [`Error::Missing`]
    Required,
    /// Decode this value instead
    Default(String),
    /// Leave the destination alone
    Lookup,
}

/// One declared `(key, policy, handler)` triple.
///
/// Bindings are evaluated by [`scan`] in the order they are declared.
pub struct Binding<'a> {
    key: String,
    policy: Policy,
    from_file: bool,
    handler: Box<dyn Decode + 'a>,
}

impl fmt::Debug for Binding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("key", &self.key)
            .field("policy", &self.policy)
            .field("from_file", &self.from_file)
            .finish_non_exhaustive()
    }
}

impl<'a> Binding<'a> {
    fn new(key: impl Into<String>, policy: Policy, handler: impl Decode + 'a) -> Self {
        Self {
            key: key.into(),
            policy,
            from_file: false,
            handler: Box::new(handler),
        }
    }

    /// Binding that fails the scan when `key` is not set
    pub fn required(key: impl Into<String>, handler: impl Decode + 'a) -> Self {
        Self::new(key, Policy::Required, handler)
    }

    /// Binding that decodes `default` when `key` is not set
    pub fn with_default(
        key: impl Into<String>,
        handler: impl Decode + 'a,
        default: impl Into<String>,
    ) -> Self {
        Self::new(key, Policy::Default(default.into()), handler)
    }

    /// Binding that is skipped when `key` is not set
    pub fn lookup(key: impl Into<String>, handler: impl Decode + 'a) -> Self {
        Self::new(key, Policy::Lookup, handler)
    }

    /// Also accept the value from the file named by `{key}_FILE`.
    ///
    /// The variable itself takes precedence; the file content is trimmed.
    #[must_use]
    pub fn from_file(mut self) -> Self {
        self.from_file = true;
        self
    }

    /// Environment variable name
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Policy applied when the variable is not set
    pub fn policy(&self) -> &Policy {
        &self.policy
    }
}

/// [`Binding::required`] with a [`direct`] handler
pub fn required_direct<'a, D>(key: impl Into<String>, target: &'a mut D) -> Binding<'a>
where
    D: Destination + ?Sized,
{
    Binding::required(key, direct(target))
}

/// [`Binding::with_default`] with a [`direct`] handler
pub fn default_direct<'a, D>(
    key: impl Into<String>,
    target: &'a mut D,
    default: impl Into<String>,
) -> Binding<'a>
where
    D: Destination + ?Sized,
{
    Binding::with_default(key, direct(target), default)
}

/// [`Binding::lookup`] with a [`direct`] handler
pub fn lookup_direct<'a, D>(key: impl Into<String>, target: &'a mut D) -> Binding<'a>
where
    D: Destination + ?Sized,
{
    Binding::lookup(key, direct(target))
}

/// Where a binding's value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Env,
    File,
    Default,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Origin::Env => "env",
            Origin::File => "file",
            Origin::Default => "default",
        })
    }
}

/// Evaluate `bindings` against the process environment.
///
/// See [`scan_with`] for the evaluation rules.
///
/// # Errors
///
/// Returns the first error raised by any binding, unchanged.
pub fn scan<'a>(bindings: impl IntoIterator<Item = Binding<'a>>) -> Result<(), Error> {
    scan_with(|key| env::var(key).ok(), bindings)
}

/// Evaluate `bindings` against the variables returned by `lookup`.
///
/// For each binding, in order:
///
/// 1. Look up the key, then `{key}_FILE` if the binding reads from files.
/// 2. When nothing is found, a required binding fails with
///    [`Error::Missing`] and a binding with a default uses it.
/// 3. An empty value is skipped, whether it was set in the environment or
///    came from the default. A variable that is present but empty therefore
///    satisfies a required binding without writing anything.
/// 4. Otherwise the handler decodes the value.
///
/// Evaluation stops at the first error. Bindings decoded before it keep
/// their values.
///
/// # Errors
///
/// Returns the first error raised by any binding, unchanged.
pub fn scan_with<'a, F>(
    mut lookup: F,
    bindings: impl IntoIterator<Item = Binding<'a>>,
) -> Result<(), Error>
where
    F: FnMut(&str) -> Option<String>,
{
    for mut binding in bindings {
        let found = get_value(&mut lookup, &binding.key, binding.from_file)?;
        let (value, origin) = match found {
            Some(found) => found,
            None => match &binding.policy {
                Policy::Required => {
                    tracing::debug!(key = %binding.key, "required variable is not set");
                    return Err(Error::missing(binding.key));
                }
                Policy::Default(default) => (default.clone(), Origin::Default),
                Policy::Lookup => {
                    tracing::debug!(key = %binding.key, "variable is not set");
                    continue;
                }
            },
        };

        if value.is_empty() {
            tracing::debug!(key = %binding.key, %origin, "skipping empty value");
            continue;
        }

        if let Err(e) = binding.handler.decode(&value) {
            tracing::debug!(key = %binding.key, %origin, error = %e, "failed to decode binding");
            return Err(e);
        }
        tracing::debug!(key = %binding.key, %origin, "binding decoded");
    }
    Ok(())
}

/// Get a variable's value with optional file-based fallback
///
/// Priority order:
/// 1. Direct variable (`key`)
/// 2. File named by `{key}_FILE` if `from_file` is true
fn get_value<F>(lookup: &mut F, key: &str, from_file: bool) -> Result<Option<(String, Origin)>, Error>
where
    F: FnMut(&str) -> Option<String>,
{
    if let Some(value) = lookup(key) {
        return Ok(Some((value, Origin::Env)));
    }

    if from_file {
        let file_var_name = format!("{key}_FILE");
        if let Some(file_path) = lookup(&file_var_name) {
            return fs::read_to_string(&file_path)
                .map(|s| Some((s.trim().to_string(), Origin::File)))
                .map_err(|e| Error::FileRead {
                    name: file_var_name,
                    path: file_path,
                    source: e,
                });
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{sequence, set};
    use std::collections::{HashMap, HashSet};

    fn env_of(pairs: &[(&str, &str)]) -> impl FnMut(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_required_present() {
        let mut foo = String::new();
        scan_with(env_of(&[("FOO", "123")]), [required_direct("FOO", &mut foo)]).unwrap();
        assert_eq!(foo, "123");
    }

    #[test]
    fn test_required_missing_stops_evaluation() {
        let mut first = 0_i32;
        let mut last = 0_i32;
        let err = scan_with(
            env_of(&[("FIRST", "1"), ("LAST", "3")]),
            [
                required_direct("FIRST", &mut first),
                required_direct("MIDDLE", &mut 0_i32),
                required_direct("LAST", &mut last),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, Error::Missing { ref name } if name == "MIDDLE"));
        assert_eq!(first, 1);
        assert_eq!(last, 0);
    }

    #[test]
    fn test_default_used_when_missing() {
        let mut piyo = 0_i64;
        scan_with(env_of(&[]), [default_direct("PIYO", &mut piyo, "33")]).unwrap();
        assert_eq!(piyo, 33);
    }

    #[test]
    fn test_default_ignored_when_present() {
        let mut piyo = 0_i64;
        scan_with(
            env_of(&[("PIYO", "7")]),
            [default_direct("PIYO", &mut piyo, "33")],
        )
        .unwrap();
        assert_eq!(piyo, 7);
    }

    #[test]
    fn test_lookup_missing_is_skipped() {
        let mut hoge: Vec<i32> = Vec::new();
        scan_with(env_of(&[]), [Binding::lookup("HOGE2", sequence(&mut hoge))]).unwrap();
        assert!(hoge.is_empty());
    }

    // An empty value counts as absent, even for required bindings.
    #[test]
    fn test_empty_value_skips_required_binding() {
        let mut value = 5_u32;
        scan_with(env_of(&[("EMPTY", "")]), [required_direct("EMPTY", &mut value)]).unwrap();
        assert_eq!(value, 5);
    }

    #[test]
    fn test_empty_value_skips_default() {
        let mut value = 5_u32;
        scan_with(
            env_of(&[("EMPTY", "")]),
            [default_direct("EMPTY", &mut value, "10")],
        )
        .unwrap();
        assert_eq!(value, 5);

        let mut optional: Option<u32> = None;
        scan_with(env_of(&[("EMPTY", "")]), [lookup_direct("EMPTY", &mut optional)]).unwrap();
        assert_eq!(optional, None);
    }

    #[test]
    fn test_empty_default_is_skipped() {
        let mut value = 5_u32;
        scan_with(env_of(&[]), [default_direct("UNSET", &mut value, "")]).unwrap();
        assert_eq!(value, 5);
    }

    #[test]
    fn test_parse_error_is_returned_unchanged() {
        let mut bar = false;
        let err = scan_with(env_of(&[("BAR", "maybe")]), [lookup_direct("BAR", &mut bar)])
            .unwrap_err();
        match err {
            Error::Parse { input, .. } => assert_eq!(input, "maybe"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_mixed_bindings() {
        let mut baz: Vec<String> = Vec::new();
        let mut hoge: Vec<i32> = Vec::new();
        let mut fuga: HashSet<i32> = HashSet::new();
        let mut fuga3: HashSet<String> = HashSet::new();
        scan_with(
            env_of(&[("BAZ", "abc,def"), ("BAZ2", "ghi:jklm")]),
            [
                Binding::required("BAZ", sequence(&mut baz)),
                Binding::with_default("HOGE", sequence(&mut hoge), "123,456"),
                Binding::with_default("HOGE", set(&mut fuga), "123,456"),
                Binding::lookup("BAZ2", set(&mut fuga3).separator(":")),
            ],
        )
        .unwrap();
        assert_eq!(baz, ["abc", "def"]);
        assert_eq!(hoge, [123, 456]);
        assert_eq!(fuga, [123, 456].into_iter().collect::<HashSet<_>>());
        assert_eq!(
            fuga3,
            ["ghi", "jklm"].map(String::from).into_iter().collect::<HashSet<_>>()
        );
    }

    #[test]
    fn test_binding_accessors() {
        let mut value = 0_u8;
        let binding = default_direct("LEVEL", &mut value, "3").from_file();
        assert_eq!(binding.key(), "LEVEL");
        assert_eq!(binding.policy(), &Policy::Default("3".to_string()));
        assert!(format!("{binding:?}").contains("from_file: true"));
    }
}
