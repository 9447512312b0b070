/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
}

impl BuildMetadata {
    pub fn summary(&self) -> String {
        format!(
            "carhire_cli {} ({} {} {}, built {})",
            self.version, self.git_hash, self.target, self.profile, self.timestamp
        )
    }
}

/// Returns the statically-embedded build metadata.
pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("CARHIRE_BUILD_HASH").unwrap_or("unknown"),
        timestamp: option_env!("CARHIRE_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target: option_env!("CARHIRE_BUILD_TARGET").unwrap_or("unknown"),
        profile: option_env!("CARHIRE_BUILD_PROFILE").unwrap_or("unknown"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_mentions_package_version() {
        let meta = current();
        assert!(meta.summary().contains(env!("CARGO_PKG_VERSION")));
    }
}
