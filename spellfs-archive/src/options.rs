//! Open flags and per-source loading policy.

use spellfs_core::name::extension;
use spellfs_lzw::LzwConfig;

/// Default cap on decode passes for one packed member.
pub const MAX_NESTED_DEPTH: usize = 4;

bitflags::bitflags! {
    /// Flags controlling how a container is opened.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OpenFlags: u32 {
        /// Read only the directory; payloads load on first access
        const NO_LOAD = 0b0000_0001;
        /// Unpack members with the `.LZ` extension
        const DELZ_LZ = 0b0000_0010;
        /// Unpack members with the `.LZ0` extension
        const DELZ_LZ0 = 0b0000_0100;
        /// Unpack both `.LZ` and `.LZ0` members
        const DELZ_ALL = Self::DELZ_LZ.bits() | Self::DELZ_LZ0.bits();
    }
}

/// Options for [`FsArchive::open`](crate::FsArchive::open) and
/// [`FsArchive::append`](crate::FsArchive::append).
///
/// Each opened file keeps its own copy, so members are always reloaded with
/// the policy of the file they came from.
///
/// # Example
///
/// ```rust
/// use spellfs_archive::{OpenFlags, OpenOptions};
///
/// let options = OpenOptions::new(OpenFlags::NO_LOAD | OpenFlags::DELZ_LZ)
///     .with_max_nested_depth(2);
/// assert!(options.wants_delz("TERRAIN.LZ"));
/// assert!(!options.wants_delz("TERRAIN.LZ0"));
/// assert!(!options.loads_eagerly());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenOptions {
    /// Loading and unpacking flags.
    pub flags: OpenFlags,
    /// Maximum decode passes per member (at least one).
    pub max_nested_depth: usize,
    /// Codec settings for the shared decoder.
    pub lzw: LzwConfig,
}

impl OpenOptions {
    /// Options with the given flags and default depth and codec settings.
    pub const fn new(flags: OpenFlags) -> Self {
        Self {
            flags,
            max_nested_depth: MAX_NESTED_DEPTH,
            lzw: LzwConfig::SPELLCROSS,
        }
    }

    /// Set the nested decode cap. Zero is treated as one.
    pub fn with_max_nested_depth(mut self, depth: usize) -> Self {
        self.max_nested_depth = depth.max(1);
        self
    }

    /// Set the codec configuration.
    pub fn with_lzw_config(mut self, config: LzwConfig) -> Self {
        self.lzw = config;
        self
    }

    /// Whether payloads are read while the directory is parsed.
    pub fn loads_eagerly(&self) -> bool {
        !self.flags.contains(OpenFlags::NO_LOAD)
    }

    /// Whether any unpacking was requested.
    pub fn wants_decoder(&self) -> bool {
        self.flags.intersects(OpenFlags::DELZ_ALL)
    }

    /// Whether a member with this name gets unpacked.
    ///
    /// The extension comparison ignores ASCII case, so `a.lz` is unpacked
    /// like `A.LZ`; the game's own loader only accepts the upper-case form.
    pub fn wants_delz(&self, name: &str) -> bool {
        let Some(ext) = extension(name) else {
            return false;
        };

        (self.flags.contains(OpenFlags::DELZ_LZ) && ext.eq_ignore_ascii_case(".LZ"))
            || (self.flags.contains(OpenFlags::DELZ_LZ0) && ext.eq_ignore_ascii_case(".LZ0"))
    }
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self::new(OpenFlags::empty())
    }
}

impl From<OpenFlags> for OpenOptions {
    fn from(flags: OpenFlags) -> Self {
        Self::new(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delz_all_is_union() {
        assert_eq!(OpenFlags::DELZ_ALL, OpenFlags::DELZ_LZ | OpenFlags::DELZ_LZ0);
        assert!(OpenOptions::new(OpenFlags::DELZ_LZ0).wants_decoder());
        assert!(!OpenOptions::new(OpenFlags::NO_LOAD).wants_decoder());
    }

    #[test]
    fn test_extension_policy() {
        let lz = OpenOptions::new(OpenFlags::DELZ_LZ);
        assert!(lz.wants_delz("MAP.LZ"));
        assert!(lz.wants_delz("map.lz"));
        assert!(!lz.wants_delz("MAP.LZ0"));
        assert!(!lz.wants_delz("MAP.LZW"));
        assert!(!lz.wants_delz("LZ"));
        assert!(!lz.wants_delz(".LZ"));

        let all = OpenOptions::new(OpenFlags::DELZ_ALL);
        assert!(all.wants_delz("A.LZ"));
        assert!(all.wants_delz("A.Lz0"));
        assert!(!all.wants_delz("A.TXT"));

        assert!(!OpenOptions::default().wants_delz("A.LZ"));
    }

    #[test]
    fn test_depth_floor() {
        let options = OpenOptions::default().with_max_nested_depth(0);
        assert_eq!(options.max_nested_depth, 1);
        assert_eq!(OpenOptions::default().max_nested_depth, MAX_NESTED_DEPTH);
    }

    #[test]
    fn test_from_flags() {
        let options: OpenOptions = OpenFlags::NO_LOAD.into();
        assert!(!options.loads_eagerly());
        assert!(OpenOptions::default().loads_eagerly());
    }
}
