//! Configuration for a compilation session.

/// Display name stamped on generated fragments by default.
pub const DEFAULT_GENERATED_SOURCE_NAME: &str = "<generated>";

/// Configuration for a compilation session.
///
/// Controls whether meta-functions run and how generated fragments are
/// recorded and traced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Whether the session driver dispatches attached meta-functions.
    pub apply_meta_functions: bool,

    /// Log the text of every generated fragment at `debug` level.
    pub trace_fragments: bool,

    /// Display name for generated fragments in the source map.
    pub generated_source_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            apply_meta_functions: true,
            trace_fragments: false,
            generated_source_name: DEFAULT_GENERATED_SOURCE_NAME.to_string(),
        }
    }
}

impl SessionConfig {
    /// Creates a configuration that also traces generated fragment text.
    #[must_use]
    pub fn verbose() -> Self {
        Self {
            trace_fragments: true,
            ..Self::default()
        }
    }

    /// Creates a configuration that parses but never runs meta-functions.
    #[must_use]
    pub fn parse_only() -> Self {
        Self {
            apply_meta_functions: false,
            ..Self::default()
        }
    }

    /// Builder method to enable/disable meta-function dispatch.
    #[must_use]
    pub fn with_apply_meta_functions(mut self, apply: bool) -> Self {
        self.apply_meta_functions = apply;
        self
    }

    /// Builder method to enable/disable fragment tracing.
    #[must_use]
    pub fn with_trace_fragments(mut self, trace: bool) -> Self {
        self.trace_fragments = trace;
        self
    }

    /// Builder method to set the generated-fragment display name.
    #[must_use]
    pub fn with_generated_source_name(mut self, name: impl Into<String>) -> Self {
        self.generated_source_name = name.into();
        self
    }
}
