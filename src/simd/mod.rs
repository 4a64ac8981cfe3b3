//! Capability probe for the accelerated generator.
//!
//! The accelerated strategy is available when the crate is built with the
//! `simd` feature and the CPU has a vector unit it can use. The probe result
//! is a plain value handed to the dispatcher; only the raw CPU feature checks
//! are cached.

#[cfg(target_arch = "x86_64")]
use std::sync::OnceLock;

// CPU feature detection cache
#[cfg(target_arch = "x86_64")]
static HAS_AVX2: OnceLock<bool> = OnceLock::new();

#[cfg(target_arch = "x86_64")]
static HAS_SSSE3: OnceLock<bool> = OnceLock::new();

/// Check if AVX2 is available (cached after first call)
#[cfg(target_arch = "x86_64")]
pub fn has_avx2() -> bool {
    *HAS_AVX2.get_or_init(|| is_x86_feature_detected!("avx2"))
}

/// Check if SSSE3 is available (cached after first call)
#[cfg(target_arch = "x86_64")]
pub fn has_ssse3() -> bool {
    *HAS_SSSE3.get_or_init(|| is_x86_feature_detected!("ssse3"))
}

#[cfg(not(target_arch = "x86_64"))]
pub fn has_avx2() -> bool {
    false
}

#[cfg(not(target_arch = "x86_64"))]
pub fn has_ssse3() -> bool {
    false
}

/// Check if NEON is available (aarch64 only)
#[cfg(target_arch = "aarch64")]
pub fn has_neon() -> bool {
    true // NEON is mandatory on aarch64
}

#[cfg(not(target_arch = "aarch64"))]
pub fn has_neon() -> bool {
    false
}

/// What this build and CPU can do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    /// Target architecture, e.g. `x86_64`
    pub arch: &'static str,
    /// Vector extensions detected on this CPU
    pub vector_features: Vec<&'static str>,
    /// Whether the `simd` feature was compiled in
    pub simd_compiled: bool,
}

impl Capabilities {
    /// Detect current build and CPU capabilities.
    pub fn probe() -> Self {
        let mut vector_features = Vec::new();
        if has_avx2() {
            vector_features.push("AVX2");
        }
        if has_ssse3() {
            vector_features.push("SSSE3");
        }
        if has_neon() {
            vector_features.push("NEON");
        }

        let capabilities = Capabilities {
            arch: std::env::consts::ARCH,
            vector_features,
            simd_compiled: cfg!(feature = "simd"),
        };
        tracing::debug!(
            arch = capabilities.arch,
            features = ?capabilities.vector_features,
            simd = capabilities.simd_compiled,
            "probed capabilities"
        );
        capabilities
    }

    /// A probe result with no acceleration, regardless of the host.
    pub fn unavailable() -> Self {
        Capabilities {
            arch: std::env::consts::ARCH,
            vector_features: Vec::new(),
            simd_compiled: false,
        }
    }

    pub fn accelerated_available(&self) -> bool {
        self.simd_compiled && !self.vector_features.is_empty()
    }

    /// Why the accelerated generator cannot run, if it cannot.
    pub fn unavailable_reason(&self) -> Option<String> {
        if !self.simd_compiled {
            Some("built without the `simd` feature".to_string())
        } else if self.vector_features.is_empty() {
            Some(format!("no supported vector unit on {}", self.arch))
        } else {
            None
        }
    }

    /// Format as display string.
    pub fn display(&self) -> String {
        let features = if self.vector_features.is_empty() {
            "none".to_string()
        } else {
            self.vector_features.join(", ")
        };
        let accelerated = if self.accelerated_available() {
            "available"
        } else {
            "unavailable"
        };
        format!(
            "arch: {}\nvector features: {}\nsimd feature: {}\naccelerated generator: {}",
            self.arch,
            features,
            if self.simd_compiled { "on" } else { "off" },
            accelerated
        )
    }
}
