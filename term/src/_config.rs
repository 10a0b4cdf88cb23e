/// How two literals whose datatypes are unrelated are compared.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ComparisonMode {
    /// Every pair of terms is ordered: literals are grouped by datatype first.
    #[default]
    Permissive,
    /// Comparing literals of unrelated datatypes fails with
    /// [`Incomparable`](crate::Incomparable).
    ///
    /// Numeric datatypes are related to each other.
    Strict,
}

/// Settings that govern how terms are built and compared.
///
/// Configurations are plain values: every [`Literal`](crate::Literal)
/// is built with a configuration passed explicitly
/// (or [`TermConfig::default`]), so there is no global state to toggle.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TermConfig {
    normalize: bool,
    comparison: ComparisonMode,
}

impl TermConfig {
    /// The default configuration:
    /// lexical forms are normalized, comparison is permissive.
    pub const fn new() -> Self {
        TermConfig {
            normalize: true,
            comparison: ComparisonMode::Permissive,
        }
    }

    /// Whether well-formed literals of known datatypes
    /// are rewritten to their canonical lexical form.
    pub fn normalize(&self) -> bool {
        self.normalize
    }

    /// How unrelated literals are compared.
    pub fn comparison(&self) -> ComparisonMode {
        self.comparison
    }

    /// Change the [`normalize`](TermConfig::normalize) flag.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Change the [`comparison`](TermConfig::comparison) mode.
    pub fn with_comparison(mut self, comparison: ComparisonMode) -> Self {
        self.comparison = comparison;
        self
    }
}

impl Default for TermConfig {
    fn default() -> Self {
        Self::new()
    }
}
