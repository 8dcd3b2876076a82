//! Object path string handling
//!
//! Scene paths are `/`-delimited child names relative to some game object,
//! e.g. `"turret/barrel/muzzle"`. Empty segments (leading, trailing or
//! doubled separators) are skipped rather than treated as lookups.

/// Split an object path into its ordered segments
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_basic() {
        let parts: Vec<_> = segments("a/b/c").collect();
        assert_eq!(parts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_segments_skips_empty() {
        let parts: Vec<_> = segments("/a//b/").collect();
        assert_eq!(parts, vec!["a", "b"]);
        assert_eq!(segments("").count(), 0);
    }
}
