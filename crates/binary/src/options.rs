//! Reader configuration.

/// Default bound on expression nesting while decoding.
///
/// Decoding recurses once per level; at this depth an unoptimized build
/// still fits in a 2 MiB thread stack.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Limits applied while reading a serialized tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Deepest nesting of nodes the reader accepts before failing with
    /// `Error::NestingTooDeep`.
    pub max_depth: usize,
}

impl ReaderOptions {
    /// Creates options with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(ReaderOptions::new().max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(ReaderOptions::new().with_max_depth(8).max_depth, 8);
    }
}
