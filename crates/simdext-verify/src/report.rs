//! Verification report generation.

use serde::{Deserialize, Serialize};

/// First lane where a kernel disagreed with its reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mismatch {
    /// Element count of the failing call.
    pub count: usize,
    /// Lane index within the call.
    pub index: usize,
    /// What the kernel was compared against (`"scalar"`, `"variable"`,
    /// `"sentinel"`).
    pub reference: String,
    /// Expected value, as IEEE-754 bits widened to `u64`.
    pub expected_bits: u64,
    /// Actual value, as IEEE-754 bits widened to `u64`.
    pub actual_bits: u64,
}

/// Outcome for one kernel on one capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseResult {
    /// Capability name (e.g. "avx2").
    pub capability: String,
    /// Kernel name as exported (e.g. "add_f32x3", "sub_f64").
    pub kernel: String,
    /// Number of calls checked.
    pub calls: usize,
    /// Whether every call matched.
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mismatch: Option<Mismatch>,
}

/// Summary statistics for a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total_cases: usize,
    pub passed_cases: usize,
    pub failed_cases: usize,
    pub total_calls: usize,
}

/// Complete verification report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Capability detected on the host.
    pub detected: String,
    /// Capabilities exercised.
    pub capabilities: Vec<String>,
    /// Whether every case passed.
    pub passed: bool,
    /// Per-kernel results.
    pub cases: Vec<CaseResult>,
    pub summary: VerificationSummary,
}

impl VerificationReport {
    /// Create an empty report.
    pub fn new(detected: &str) -> Self {
        Self {
            detected: detected.to_string(),
            capabilities: Vec::new(),
            passed: true,
            cases: Vec::new(),
            summary: VerificationSummary::default(),
        }
    }

    /// Add a case and update the summary.
    pub fn add_case(&mut self, case: CaseResult) {
        self.summary.total_cases += 1;
        self.summary.total_calls += case.calls;
        if case.passed {
            self.summary.passed_cases += 1;
        } else {
            self.summary.failed_cases += 1;
            self.passed = false;
        }
        self.cases.push(case);
    }

    /// Failing cases only.
    pub fn failures(&self) -> impl Iterator<Item = &CaseResult> {
        self.cases.iter().filter(|c| !c.passed)
    }

    /// Plain-text rendering for terminals.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Detected capability: {}\n", self.detected));
        out.push_str(&format!("Exercised: {}\n", self.capabilities.join(", ")));
        out.push_str(&format!(
            "Cases: {} passed, {} failed ({} kernel calls)\n",
            self.summary.passed_cases, self.summary.failed_cases, self.summary.total_calls
        ));

        for case in self.failures() {
            out.push_str(&format!("FAIL {:<8} {:<12}", case.capability, case.kernel));
            if let Some(m) = &case.mismatch {
                out.push_str(&format!(
                    " count={} lane={} vs {}: expected {:#x}, got {:#x}",
                    m.count, m.index, m.reference, m.expected_bits, m.actual_bits
                ));
            }
            out.push('\n');
        }

        out.push_str(&format!("Result: {}\n", if self.passed { "PASS" } else { "FAIL" }));
        out
    }

    /// `Err(Error::Failed)` when any case failed.
    pub fn ensure_passed(&self) -> crate::Result<()> {
        if self.passed {
            Ok(())
        } else {
            Err(crate::error::Error::Failed {
                failed: self.summary.failed_cases,
                total: self.summary.total_cases,
            })
        }
    }

    /// Pretty JSON rendering.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
