use std::path::Path;

/// On-disk map formats, detected from the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Canonical portable roaring-bitmap serialization.
    Roaring,
    /// Compact tree encoding of the 3-level sparse bitset.
    SparseBitset,
    /// Compact tree encoding of the 3-level sparse word array.
    SparseWordset,
}

impl Format {
    /// Detects the format from the file name. "wordset" is checked before
    /// "sparse" since it is the more specific token; unknown names default
    /// to roaring.
    pub fn detect(path: &Path) -> Format {
        let lower = path.to_string_lossy().to_lowercase();
        if lower.contains("roaring") {
            Format::Roaring
        } else if lower.contains("wordset") {
            Format::SparseWordset
        } else if lower.contains("sparse") {
            Format::SparseBitset
        } else {
            Format::Roaring
        }
    }

    /// The token embedded in file names so [`detect`](Self::detect) finds
    /// this format again.
    pub fn file_token(&self) -> &'static str {
        match self {
            Format::Roaring => "roaring",
            Format::SparseBitset => "sparse",
            Format::SparseWordset => "wordset",
        }
    }

    /// Parses a command-line format name.
    pub fn parse(name: &str) -> Option<Format> {
        match name {
            "roaring" => Some(Format::Roaring),
            "sparse" => Some(Format::SparseBitset),
            "wordset" => Some(Format::SparseWordset),
            _ => None,
        }
    }
}

/// Whether the file should pass through a gzip stream, by extension.
pub fn is_gzipped(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_token() {
        assert_eq!(Format::detect(Path::new("map_roaring.dat.gz")), Format::Roaring);
        assert_eq!(Format::detect(Path::new("map_sparse.dat.gz")), Format::SparseBitset);
        assert_eq!(Format::detect(Path::new("map_wordset.dat.gz")), Format::SparseWordset);
    }

    #[test]
    fn test_wordset_wins_over_sparse() {
        // Both tokens present: the more specific one decides.
        assert_eq!(
            Format::detect(Path::new("sparse_wordset_map.dat")),
            Format::SparseWordset
        );
    }

    #[test]
    fn test_unknown_defaults_to_roaring() {
        assert_eq!(Format::detect(Path::new("collision.dat")), Format::Roaring);
    }

    #[test]
    fn test_detect_is_case_insensitive() {
        assert_eq!(Format::detect(Path::new("Map_Roaring.DAT")), Format::Roaring);
    }

    #[test]
    fn test_gzip_by_extension() {
        assert!(is_gzipped(Path::new("map_roaring.dat.gz")));
        assert!(!is_gzipped(Path::new("map_roaring.dat")));
        assert!(!is_gzipped(Path::new("map_roaring.gz.dat")));
    }

    #[test]
    fn test_parse_roundtrips_tokens() {
        for format in [Format::Roaring, Format::SparseBitset, Format::SparseWordset] {
            assert_eq!(Format::parse(format.file_token()), Some(format));
        }
        assert_eq!(Format::parse("unknown"), None);
    }
}
