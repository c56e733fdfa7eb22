use md5::{Digest, Md5};

/// Stable taxon identifier: `<shortname>:taxon:<md5 hex>` of
/// `"<canonical name> <kingdom>"`. A missing kingdom is hashed as "".
pub fn compute_taxon_id(shortname: &str, canonical_name: &str, kingdom: &str) -> String {
    let mut s = String::with_capacity(canonical_name.len() + kingdom.len() + 1);
    s.push_str(canonical_name);
    s.push(' ');
    s.push_str(kingdom);

    let mut hasher = Md5::new();
    hasher.update(s.as_bytes());
    let digest = hasher.finalize();
    format!("{}:taxon:{}", shortname, hex::encode(digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            compute_taxon_id("x", "a", "b"),
            "x:taxon:0cc9cd4dd26c5137b675a0d819cb9ab0"
        );
        assert_eq!(
            compute_taxon_id("alien-plants", "Acer negundo", "Plantae"),
            "alien-plants:taxon:5b32da4319c5b3d8aa1e1da0e7b18918"
        );
    }

    #[test]
    fn test_same_inputs_same_id() {
        let a = compute_taxon_id("alien-plants", "Acer negundo", "Plantae");
        let b = compute_taxon_id("alien-plants", "Acer negundo", "Plantae");
        assert_eq!(a, b);
        assert!(a.starts_with("alien-plants:taxon:"));
        assert_eq!(a.len(), "alien-plants:taxon:".len() + 32);
    }

    #[test]
    fn test_any_input_change_changes_id() {
        let base = compute_taxon_id("ds", "Acer negundo", "Plantae");
        assert_ne!(base, compute_taxon_id("ds", "Acer negundo", "Animalia"));
        assert_ne!(base, compute_taxon_id("ds", "Acer negund", "Plantae"));
        assert_ne!(base, compute_taxon_id("other", "Acer negundo", "Plantae"));
    }

    #[test]
    fn test_missing_kingdom_is_empty_component() {
        let id = compute_taxon_id("ds", "Acer negundo", "");
        let expected = hex::encode(Md5::digest(b"Acer negundo "));
        assert_eq!(id, format!("ds:taxon:{}", expected));
    }
}
