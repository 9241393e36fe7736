//! Check results surfaced to the host UI.

use serde::Serialize;

use crate::host::HostContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
}

/// Why a check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticReason {
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Description {
    pub short: String,
    pub long: String,
    /// Whether the host still has to translate `short` and `long`.
    pub localize: bool,
}

/// A problem the host shows to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub reason: DiagnosticReason,
    pub description: Description,
}

impl Diagnostic {
    /// Failed check, translated through the host.
    pub fn failed(ctx: &HostContext, reason: DiagnosticReason) -> Self {
        let (short, long) = match reason {
            DiagnosticReason::Missing => (
                "REDmod not installed",
                "REDmod deploy is turned on, but the REDmod tool could not be found in the \
                 game directory. REDmod is a free DLC: install it from the store you bought \
                 the game on, then rescan the game's tools.",
            ),
        };
        Self {
            severity: Severity::Warning,
            reason,
            description: Description {
                short: ctx.t(short),
                long: ctx.t(long),
                localize: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestHost;

    #[test]
    fn test_missing_diagnostic() {
        let host = TestHost::new();
        let diagnostic = Diagnostic::failed(&host.ctx(), DiagnosticReason::Missing);

        assert_eq!(diagnostic.severity, Severity::Warning);
        assert_eq!(diagnostic.description.short, "REDmod not installed");
        assert!(!diagnostic.description.long.is_empty());
        assert!(!diagnostic.description.localize);
    }

    #[test]
    fn test_diagnostic_serializes_lowercase() {
        let host = TestHost::new();
        let json = serde_json::to_value(Diagnostic::failed(&host.ctx(), DiagnosticReason::Missing))
            .unwrap();
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["reason"], "missing");
    }
}
