use crate::shared::Result;

/// Maximum length for asset identifiers (security limit)
const MAX_ASSET_ID_LENGTH: usize = 512;

/// Maximum length for asset class tags (security limit)
const MAX_ASSET_CLASS_LENGTH: usize = 128;

/// NewType wrapper for an asset identifier with validation.
///
/// An AssetId is the stable, opaque identity of an asset: a relative,
/// slash-separated package path such as `textures/rock_01.tex`. Two ids are
/// equal iff they denote the same underlying asset. Ids are ordered so that
/// set and map iteration is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(id: String) -> Result<Self> {
        if id.is_empty() {
            anyhow::bail!("Asset id cannot be empty");
        }

        // Security: Length limit to prevent DoS
        if id.len() > MAX_ASSET_ID_LENGTH {
            anyhow::bail!(
                "Asset id is too long ({} bytes). Maximum allowed: {} bytes",
                id.len(),
                MAX_ASSET_ID_LENGTH
            );
        }

        // Security: Validate characters (alphanumeric, hyphens, underscores,
        // dots and forward slashes). This prevents injection attacks and
        // special characters that could cause issues when the id is mapped
        // to a file path.
        if !id
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.' || c == '/')
        {
            anyhow::bail!(
                "Asset id contains invalid characters. Only alphanumeric, hyphens, underscores, dots and slashes are allowed."
            );
        }

        // Security: Reject absolute paths and parent-directory traversal so
        // an id can never escape the content root.
        if id.starts_with('/') {
            anyhow::bail!("Asset id must be a relative path (must not start with '/')");
        }
        if id.split('/').any(|segment| segment.is_empty() || segment == "..") {
            anyhow::bail!("Asset id must not contain empty or '..' path segments");
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this id lives under the given path prefix.
    ///
    /// Matching is segment-aware: `textures` matches `textures/rock.tex`
    /// but not `textures_old/rock.tex`.
    pub fn is_under_path(&self, prefix: &str) -> bool {
        let prefix = prefix.trim_end_matches('/');
        if prefix.is_empty() {
            return true;
        }
        self.0 == prefix || self.0.starts_with(&format!("{}/", prefix))
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// NewType wrapper for an asset class/type tag with validation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetClass(String);

impl AssetClass {
    pub fn new(class: String) -> Result<Self> {
        if class.is_empty() {
            anyhow::bail!("Asset class cannot be empty");
        }

        if class.len() > MAX_ASSET_CLASS_LENGTH {
            anyhow::bail!(
                "Asset class is too long ({} bytes). Maximum allowed: {} bytes",
                class.len(),
                MAX_ASSET_CLASS_LENGTH
            );
        }

        if !class
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            anyhow::bail!(
                "Asset class contains invalid characters. Only alphanumeric, hyphens, underscores and dots are allowed."
            );
        }

        Ok(Self(class))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalog record for a single asset: identity, size, class and the
/// declared dependency/referencer edges as supplied by the external
/// catalog. The core never mutates these lists, it only filters them
/// against the current pool at graph-build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    id: AssetId,
    size_bytes: u64,
    class: AssetClass,
    depends_on: Vec<AssetId>,
    depended_on_by: Vec<AssetId>,
}

impl AssetRecord {
    pub fn new(
        id: AssetId,
        size_bytes: u64,
        class: AssetClass,
        depends_on: Vec<AssetId>,
        depended_on_by: Vec<AssetId>,
    ) -> Self {
        Self {
            id,
            size_bytes,
            class,
            depends_on,
            depended_on_by,
        }
    }

    pub fn id(&self) -> &AssetId {
        &self.id
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn class(&self) -> &AssetClass {
        &self.class
    }

    pub fn depends_on(&self) -> &[AssetId] {
        &self.depends_on
    }

    pub fn depended_on_by(&self) -> &[AssetId] {
        &self.depended_on_by
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id_valid() {
        let id = AssetId::new("textures/rock_01.tex".to_string()).unwrap();
        assert_eq!(id.as_str(), "textures/rock_01.tex");
        assert_eq!(id.to_string(), "textures/rock_01.tex");
    }

    #[test]
    fn test_asset_id_empty() {
        assert!(AssetId::new(String::new()).is_err());
    }

    #[test]
    fn test_asset_id_too_long() {
        let id = "a".repeat(MAX_ASSET_ID_LENGTH + 1);
        assert!(AssetId::new(id).is_err());
    }

    #[test]
    fn test_asset_id_invalid_characters() {
        assert!(AssetId::new("textures/rock 01".to_string()).is_err());
        assert!(AssetId::new("textures\\rock".to_string()).is_err());
        assert!(AssetId::new("textures;rm".to_string()).is_err());
    }

    #[test]
    fn test_asset_id_rejects_traversal() {
        assert!(AssetId::new("../outside.tex".to_string()).is_err());
        assert!(AssetId::new("textures/../../etc/passwd".to_string()).is_err());
        assert!(AssetId::new("/absolute/path.tex".to_string()).is_err());
        assert!(AssetId::new("textures//double.tex".to_string()).is_err());
    }

    #[test]
    fn test_asset_id_ordering_is_stable() {
        let a = AssetId::new("a.tex".to_string()).unwrap();
        let b = AssetId::new("b.tex".to_string()).unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_asset_id_is_under_path() {
        let id = AssetId::new("textures/rocks/rock_01.tex".to_string()).unwrap();
        assert!(id.is_under_path("textures"));
        assert!(id.is_under_path("textures/"));
        assert!(id.is_under_path("textures/rocks"));
        assert!(id.is_under_path("textures/rocks/rock_01.tex"));
        assert!(!id.is_under_path("textures/rock"));
        assert!(!id.is_under_path("materials"));
    }

    #[test]
    fn test_asset_class_valid() {
        let class = AssetClass::new("Texture2D".to_string()).unwrap();
        assert_eq!(class.as_str(), "Texture2D");
    }

    #[test]
    fn test_asset_class_invalid() {
        assert!(AssetClass::new(String::new()).is_err());
        assert!(AssetClass::new("Bad Class".to_string()).is_err());
    }

    #[test]
    fn test_asset_record_accessors() {
        let id = AssetId::new("materials/rock.mat".to_string()).unwrap();
        let dep = AssetId::new("textures/rock.tex".to_string()).unwrap();
        let referencer = AssetId::new("meshes/rock.mesh".to_string()).unwrap();
        let record = AssetRecord::new(
            id.clone(),
            4096,
            AssetClass::new("Material".to_string()).unwrap(),
            vec![dep.clone()],
            vec![referencer.clone()],
        );

        assert_eq!(record.id(), &id);
        assert_eq!(record.size_bytes(), 4096);
        assert_eq!(record.class().as_str(), "Material");
        assert_eq!(record.depends_on(), &[dep]);
        assert_eq!(record.depended_on_by(), &[referencer]);
    }
}
