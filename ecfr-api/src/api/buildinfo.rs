//! Build identity, shared by `/api/buildinfo` and the startup banner

use std::fmt;

use axum::response::Json;
use serde::Serialize;

/// Values stamped in by `build.rs`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_timestamp: &'static str,
    pub build_profile: &'static str,
}

impl BuildInfo {
    pub const fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            git_hash: env!("GIT_HASH"),
            build_timestamp: env!("BUILD_TIMESTAMP"),
            build_profile: env!("BUILD_PROFILE"),
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "v{} [{}] built {} ({})",
            self.version, self.git_hash, self.build_timestamp, self.build_profile
        )
    }
}

/// GET /api/buildinfo
pub async fn get_build_info() -> Json<BuildInfo> {
    Json(BuildInfo::current())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_leads_with_version() {
        let info = BuildInfo::current();
        let banner = info.to_string();
        assert!(banner.starts_with(&format!("v{} [", env!("CARGO_PKG_VERSION"))));
        assert!(banner.contains(info.git_hash));
        assert!(banner.ends_with(&format!("({})", info.build_profile)));
    }
}
