// src/profile.rs

//! The build profile threaded into every transform task invocation.
//!
//! Three effective modes:
//! - fast-dev  (`fast`, not `release`): no source maps, no minification.
//! - slow-dev  (not `fast`, not `release`): source maps, no minification.
//! - release   (`release`): minification, comment-marker stripping and
//!   vendor prefixing, no source maps — regardless of `fast`.
//!
//! Tasks never mutate the profile; the release pipeline constructs its own
//! copy with [`BuildProfile::release`].

use crate::config::model::BuildSection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildProfile {
    pub fast: bool,
    pub release: bool,
}

impl BuildProfile {
    pub fn from_config(build: &BuildSection) -> Self {
        Self {
            fast: build.fast,
            release: false,
        }
    }

    /// The same profile with optimization mode switched on.
    pub fn release(self) -> Self {
        Self {
            release: true,
            ..self
        }
    }

    /// Whether style/script tasks emit a source-map file next to their
    /// output.
    pub fn source_maps(&self) -> bool {
        !self.fast && !self.release
    }

    /// Whether the optional optimization sub-steps (minify, prefix, strip
    /// comment markers) run.
    pub fn optimize(&self) -> bool {
        self.release
    }

    pub fn mode_name(&self) -> &'static str {
        if self.release {
            "release"
        } else if self.fast {
            "fast-dev"
        } else {
            "slow-dev"
        }
    }
}

impl Default for BuildProfile {
    fn default() -> Self {
        Self {
            fast: true,
            release: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_gating_matrix() {
        let fast_dev = BuildProfile { fast: true, release: false };
        assert!(!fast_dev.source_maps());
        assert!(!fast_dev.optimize());

        let slow_dev = BuildProfile { fast: false, release: false };
        assert!(slow_dev.source_maps());
        assert!(!slow_dev.optimize());

        // Release optimizes and drops maps regardless of `fast`.
        for fast in [true, false] {
            let release = BuildProfile { fast, release: false }.release();
            assert!(!release.source_maps());
            assert!(release.optimize());
        }
    }
}
