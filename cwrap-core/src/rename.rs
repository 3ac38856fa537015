//! User-supplied rename hook applied to emitted identifiers.

/// A per-component rename applied before joining and case conversion.
///
/// Any `Fn(&str) -> String` closure is a `Rename`. Renames apply to
/// identifiers only; type spellings are never passed through one.
pub trait Rename {
    fn rename(&self, segment: &str) -> String;
}

impl<F> Rename for F
where
    F: Fn(&str) -> String,
{
    fn rename(&self, segment: &str) -> String {
        self(segment)
    }
}

/// The default rename: returns every segment unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl Rename for Identity {
    fn rename(&self, segment: &str) -> String {
        segment.to_string()
    }
}

/// Apply `transform` to every segment of `path`.
pub fn apply<R>(transform: &R, path: &[String]) -> Vec<String>
where
    R: Rename + ?Sized,
{
    path.iter().map(|segment| transform.rename(segment)).collect()
}
