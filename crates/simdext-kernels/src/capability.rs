//! SIMD capability detection.
//!
//! Runtime detection of the best available SIMD instruction set, and the
//! native lane width each level offers per element type.

use std::sync::OnceLock;

use crate::element::Element;

/// Detected SIMD capability level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SimdCapability {
    /// Scalar fallback (no SIMD)
    Scalar,
    /// SSE2 with 128-bit vectors (4 f32 / 2 f64 per vector)
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    Sse2,
    /// AVX2 with 256-bit vectors (8 f32 / 4 f64 per vector)
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    Avx2,
    /// AVX-512 with 512-bit vectors (16 f32 / 8 f64 per vector)
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    Avx512,
    /// NEON with 128-bit vectors (4 f32 / 2 f64 per vector)
    #[cfg(target_arch = "aarch64")]
    Neon,
}

static CACHED: OnceLock<SimdCapability> = OnceLock::new();

impl SimdCapability {
    /// Detect the best available SIMD capability at runtime.
    #[inline]
    pub fn detect() -> Self {
        detect_isa()
    }

    /// Process-wide detection result, computed on first use.
    #[inline]
    pub fn cached() -> Self {
        *CACHED.get_or_init(|| {
            let capability = Self::detect();
            log::debug!(
                "SIMD capability detected: {} (f32 lanes: {}, f64 lanes: {})",
                capability,
                capability.f32_lanes(),
                capability.f64_lanes()
            );
            capability
        })
    }

    /// Every capability that can execute on this host, weakest first.
    ///
    /// Always contains [`SimdCapability::Scalar`] and the detected level.
    pub fn available() -> Vec<Self> {
        let best = Self::cached();
        Self::all().into_iter().filter(|c| *c <= best).collect()
    }

    /// Every capability compiled for this target, weakest first.
    pub fn all() -> Vec<Self> {
        vec![
            SimdCapability::Scalar,
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            SimdCapability::Sse2,
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            SimdCapability::Avx2,
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            SimdCapability::Avx512,
            #[cfg(target_arch = "aarch64")]
            SimdCapability::Neon,
        ]
    }

    /// Whether this capability can execute on the current host.
    #[inline]
    pub fn is_available(&self) -> bool {
        *self <= Self::cached()
    }

    /// Check if this capability uses SIMD acceleration.
    #[inline]
    pub fn is_simd(&self) -> bool {
        !matches!(self, SimdCapability::Scalar)
    }

    /// Native register width in bytes (scalar counts as one 8-byte slot).
    #[inline]
    pub const fn register_bytes(&self) -> usize {
        match self {
            SimdCapability::Scalar => 8,
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            SimdCapability::Sse2 => 16,
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            SimdCapability::Avx2 => 32,
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            SimdCapability::Avx512 => 64,
            #[cfg(target_arch = "aarch64")]
            SimdCapability::Neon => 16,
        }
    }

    /// Native lanes per vector for element type `T`.
    #[inline]
    pub fn lanes<T: Element>(&self) -> usize {
        match self {
            SimdCapability::Scalar => 1,
            _ => self.register_bytes() / std::mem::size_of::<T>(),
        }
    }

    /// Native f32 lanes per vector.
    #[inline]
    pub fn f32_lanes(&self) -> usize {
        self.lanes::<f32>()
    }

    /// Native f64 lanes per vector.
    #[inline]
    pub fn f64_lanes(&self) -> usize {
        self.lanes::<f64>()
    }

    /// Parse a capability name.
    ///
    /// Accepts `"auto"` (the detected level) and the names returned by
    /// [`SimdCapability::name`]. Levels not compiled for this target yield
    /// `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "auto" => Some(Self::cached()),
            "scalar" => Some(SimdCapability::Scalar),
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            "sse2" => Some(SimdCapability::Sse2),
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            "avx2" => Some(SimdCapability::Avx2),
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            "avx512" => Some(SimdCapability::Avx512),
            #[cfg(target_arch = "aarch64")]
            "neon" => Some(SimdCapability::Neon),
            _ => None,
        }
    }

    /// Short name, accepted by [`SimdCapability::from_name`].
    pub fn name(&self) -> &'static str {
        match self {
            SimdCapability::Scalar => "scalar",
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            SimdCapability::Sse2 => "sse2",
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            SimdCapability::Avx2 => "avx2",
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            SimdCapability::Avx512 => "avx512",
            #[cfg(target_arch = "aarch64")]
            SimdCapability::Neon => "neon",
        }
    }

    /// Get a human-readable description of the capability.
    pub fn description(&self) -> &'static str {
        match self {
            SimdCapability::Scalar => "Scalar (no SIMD)",
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            SimdCapability::Sse2 => "SSE2 (128-bit)",
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            SimdCapability::Avx2 => "AVX2 (256-bit)",
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            SimdCapability::Avx512 => "AVX-512 (512-bit)",
            #[cfg(target_arch = "aarch64")]
            SimdCapability::Neon => "NEON (128-bit)",
        }
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn detect_isa() -> SimdCapability {
    if is_x86_feature_detected!("avx512f") {
        SimdCapability::Avx512
    } else if is_x86_feature_detected!("avx2") {
        SimdCapability::Avx2
    } else if is_x86_feature_detected!("sse2") {
        SimdCapability::Sse2
    } else {
        SimdCapability::Scalar
    }
}

#[cfg(target_arch = "aarch64")]
fn detect_isa() -> SimdCapability {
    SimdCapability::Neon
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
fn detect_isa() -> SimdCapability {
    SimdCapability::Scalar
}

impl Default for SimdCapability {
    fn default() -> Self {
        Self::cached()
    }
}

impl std::fmt::Display for SimdCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_detection() {
        let cap = SimdCapability::detect();
        let desc = cap.description();
        assert!(!desc.is_empty());

        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        assert!(matches!(
            cap,
            SimdCapability::Scalar
                | SimdCapability::Sse2
                | SimdCapability::Avx2
                | SimdCapability::Avx512
        ));
        #[cfg(target_arch = "x86_64")]
        assert!(cap.is_simd(), "SSE2 is baseline on x86_64");
        #[cfg(target_arch = "aarch64")]
        assert_eq!(cap, SimdCapability::Neon);
    }

    #[test]
    fn capability_default() {
        let cap = SimdCapability::default();
        assert_eq!(cap, SimdCapability::detect());
        assert_eq!(cap, SimdCapability::cached());
    }

    #[test]
    fn display_impl() {
        let cap = SimdCapability::detect();
        let s = format!("{}", cap);
        assert!(!s.is_empty());
    }

    #[test]
    fn available_includes_scalar_and_detected() {
        let available = SimdCapability::available();
        assert_eq!(available.first(), Some(&SimdCapability::Scalar));
        assert_eq!(available.last(), Some(&SimdCapability::detect()));
        assert!(available.iter().all(|c| c.is_available()));
    }

    #[test]
    fn lane_widths() {
        assert_eq!(SimdCapability::Scalar.f32_lanes(), 1);
        assert_eq!(SimdCapability::Scalar.f64_lanes(), 1);

        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            assert_eq!(SimdCapability::Sse2.f32_lanes(), 4);
            assert_eq!(SimdCapability::Sse2.f64_lanes(), 2);
            assert_eq!(SimdCapability::Avx2.f32_lanes(), 8);
            assert_eq!(SimdCapability::Avx2.f64_lanes(), 4);
            assert_eq!(SimdCapability::Avx512.f32_lanes(), 16);
            assert_eq!(SimdCapability::Avx512.f64_lanes(), 8);
        }
        #[cfg(target_arch = "aarch64")]
        {
            assert_eq!(SimdCapability::Neon.f32_lanes(), 4);
            assert_eq!(SimdCapability::Neon.f64_lanes(), 2);
        }
    }

    #[test]
    fn name_round_trip() {
        for cap in SimdCapability::all() {
            assert_eq!(SimdCapability::from_name(cap.name()), Some(cap));
        }
        assert_eq!(SimdCapability::from_name("AUTO"), Some(SimdCapability::cached()));
        assert_eq!(SimdCapability::from_name("altivec"), None);
    }
}
