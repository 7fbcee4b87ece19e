//! Ordered literal token substitution.

/// An ordered list of `(token, value)` pairs applied to template text.
///
/// Each pair replaces every occurrence of `token` in the current text with
/// `value`, scanning left to right without overlap. Pairs are applied in
/// insertion order, so a value containing a *later* token will itself be
/// substituted. Nothing is escaped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementSet {
    pairs: Vec<(String, String)>,
}

impl ReplacementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style append.
    pub fn with(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(token, value);
        self
    }

    pub fn push(&mut self, token: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((token.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(t, v)| (t.as_str(), v.as_str()))
    }

    /// Apply every pair to `text`, in order.
    ///
    /// Empty tokens are skipped: they would match between every character.
    pub fn apply(&self, text: &str) -> String {
        let mut out = text.to_owned();
        for (token, value) in self.iter() {
            if token.is_empty() || !out.contains(token) {
                continue;
            }
            out = out.replace(token, value);
        }
        out
    }
}

impl<T, V> FromIterator<(T, V)> for ReplacementSet
where
    T: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (T, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (token, value) in iter {
            set.push(token, value);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_every_occurrence() {
        let set = ReplacementSet::new().with("@NAME@", "Demo");
        assert_eq!(
            set.apply("project(@NAME@)\nadd_executable(@NAME@ main.cpp)"),
            "project(Demo)\nadd_executable(Demo main.cpp)"
        );
    }

    #[test]
    fn non_overlapping_tokens_render_exactly() {
        let set = ReplacementSet::new()
            .with("@PROJECT_NAME@", "Demo")
            .with("@EXECUTABLE_TARGET_NAME@", "DemoRuntime")
            .with("@EXECUTABLE_NAME@", "Demo");

        let out = set.apply(
            "project(@PROJECT_NAME@)\n\
             add_executable(@EXECUTABLE_TARGET_NAME@ src/main.cpp)\n\
             set_target_properties(@EXECUTABLE_TARGET_NAME@ PROPERTIES OUTPUT_NAME @EXECUTABLE_NAME@)\n",
        );

        assert_eq!(
            out,
            "project(Demo)\n\
             add_executable(DemoRuntime src/main.cpp)\n\
             set_target_properties(DemoRuntime PROPERTIES OUTPUT_NAME Demo)\n"
        );
    }

    #[test]
    fn pairs_apply_in_order() {
        // The value of the first pair contains the second token.
        let set = ReplacementSet::new().with("@A@", "@B@").with("@B@", "c");
        assert_eq!(set.apply("@A@"), "c");

        let reversed = ReplacementSet::new().with("@B@", "c").with("@A@", "@B@");
        assert_eq!(reversed.apply("@A@"), "@B@");
    }

    #[test]
    fn value_is_not_rescanned_for_its_own_token() {
        let set = ReplacementSet::new().with("@X@", "@X@@X@");
        assert_eq!(set.apply("@X@"), "@X@@X@");
    }

    #[test]
    fn scanning_is_left_to_right_without_overlap() {
        let set = ReplacementSet::new().with("aa", "b");
        assert_eq!(set.apply("aaa"), "ba");
    }

    #[test]
    fn empty_token_is_ignored() {
        let set = ReplacementSet::new().with("", "x");
        assert_eq!(set.apply("abc"), "abc");
    }

    #[test]
    fn text_without_tokens_is_unchanged() {
        let set = ReplacementSet::new().with("@NAME@", "Demo");
        assert_eq!(set.apply("cmake_minimum_required(VERSION 3.20)"), "cmake_minimum_required(VERSION 3.20)");
    }

    #[test]
    fn collects_from_pairs() {
        let set: ReplacementSet = [("@A@", "1"), ("@B@", "2")].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.apply("@A@@B@"), "12");
    }
}
