//! Syntactic safety check: the intended change must parse and must
//! not contain a disallowed operation. Grounded in the source generator's
//! `validate_mutation`, which scans generated code for `eval`, `exec`,
//! `__import__`, `compile` before it's allowed anywhere near C5; here the
//! scan runs over every user-authored text field a [`Mutation`] carries
//! rather than over generated source, since mutations are typed data, not
//! code.

use thiserror::Error;

use crate::mutation::Mutation;

/// A rejected mutation carries a typed reason, not a bare bool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SafetyViolation {
    #[error("mutation text contains a runtime-eval pattern: {0:?}")]
    RuntimeEval(String),
    #[error("mutation text contains an arbitrary-exec pattern: {0:?}")]
    ArbitraryExec(String),
    #[error("mutation text contains a filesystem-escape pattern: {0:?}")]
    FilesystemEscape(String),
    #[error("mutation is malformed: {0}")]
    Malformed(String),
}

const RUNTIME_EVAL_PATTERNS: [&str; 3] = ["eval(", "__import__", "compile("];
const ARBITRARY_EXEC_PATTERNS: [&str; 4] = ["exec(", "std::process::Command", "Command::new", "/bin/sh"];
const FILESYSTEM_ESCAPE_PATTERNS: [&str; 3] = ["../", "/etc/", "~/.ssh"];

/// Runs the syntactic safety check over `mutation`. Checks structural
/// well-formedness first (non-empty id, finite numeric deltas), then scans
/// every user-authored text field against the disallowed-operation lists.
pub fn check_safety(mutation: &Mutation) -> Result<(), SafetyViolation> {
    if mutation.id.trim().is_empty() {
        return Err(SafetyViolation::Malformed("empty mutation id".into()));
    }
    if !mutation.expected_delta_linf.is_finite() {
        return Err(SafetyViolation::Malformed(
            "expected_delta_linf must be finite".into(),
        ));
    }

    let text = mutation.kind.scannable_text();

    for pattern in RUNTIME_EVAL_PATTERNS {
        if text.contains(pattern) {
            return Err(SafetyViolation::RuntimeEval(pattern.to_string()));
        }
    }
    for pattern in ARBITRARY_EXEC_PATTERNS {
        if text.contains(pattern) {
            return Err(SafetyViolation::ArbitraryExec(pattern.to_string()));
        }
    }
    for pattern in FILESYSTEM_ESCAPE_PATTERNS {
        if text.contains(pattern) {
            return Err(SafetyViolation::FilesystemEscape(pattern.to_string()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::{MutationKind, ParameterTune};

    fn tune(path: &str) -> Mutation {
        Mutation {
            id: "m1".into(),
            kind: MutationKind::ParameterTune(ParameterTune {
                path: path.into(),
                old: 1.0,
                new: 1.1,
            }),
            requires_approval: false,
            expected_delta_linf: 0.01,
        }
    }

    #[test]
    fn clean_mutation_passes() {
        assert!(check_safety(&tune("caos.kappa")).is_ok());
    }

    #[test]
    fn eval_pattern_is_rejected() {
        let err = check_safety(&tune("eval(kappa)")).unwrap_err();
        assert!(matches!(err, SafetyViolation::RuntimeEval(_)));
    }

    #[test]
    fn filesystem_escape_is_rejected() {
        let err = check_safety(&tune("../../../etc/passwd")).unwrap_err();
        assert!(matches!(
            err,
            SafetyViolation::FilesystemEscape(_) | SafetyViolation::RuntimeEval(_)
        ));
    }

    #[test]
    fn empty_id_is_malformed() {
        let mut m = tune("caos.kappa");
        m.id = "".into();
        let err = check_safety(&m).unwrap_err();
        assert!(matches!(err, SafetyViolation::Malformed(_)));
    }

    #[test]
    fn non_finite_delta_is_malformed() {
        let mut m = tune("caos.kappa");
        m.expected_delta_linf = f64::NAN;
        let err = check_safety(&m).unwrap_err();
        assert!(matches!(err, SafetyViolation::Malformed(_)));
    }
}
