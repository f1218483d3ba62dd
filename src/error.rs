//! Rich diagnostic error types for the polylogos reasoning core.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]`
//! derives, providing error codes and help text so callers know exactly what
//! went wrong and how to fix it. The taxonomy follows the core's contract:
//! uninitialized engines and strictly-invalid input are the only errors a
//! caller sees; rule failures and rejected conclusions are absorbed per call.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the polylogos core.
///
/// Each variant wraps a subsystem-specific error, preserving the full
/// diagnostic chain (error codes, help text) through to the caller.
#[derive(Debug, Error, Diagnostic)]
pub enum PolyError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Rule(#[from] RuleError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Operator(#[from] OperatorError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Registry(#[from] RegistryError),
}

// ---------------------------------------------------------------------------
// Engine errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum EngineError {
    #[error("engine '{paradigm}' not initialized: call initialize() first")]
    #[diagnostic(
        code(poly::engine::not_initialized),
        help(
            "Every paradigm engine must be initialized before reasoning. \
             Call `engine.initialize()` once after construction; the call is \
             idempotent and cheap."
        )
    )]
    NotInitialized { paradigm: String },

    #[error("invalid input for '{paradigm}': {message}")]
    #[diagnostic(
        code(poly::engine::invalid_input),
        help(
            "The input text failed strict validation for this paradigm. \
             Provide plain text; most paradigms degrade gracefully instead of \
             returning this error."
        )
    )]
    InvalidInput { paradigm: String, message: String },

    #[error("invalid configuration: {message}")]
    #[diagnostic(
        code(poly::engine::invalid_config),
        help("Check the EngineConfig fields. {message}")
    )]
    InvalidConfig { message: String },
}

// ---------------------------------------------------------------------------
// Rule errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum RuleError {
    #[error("rule '{name}' has no antecedent patterns")]
    #[diagnostic(
        code(poly::rule::empty_antecedents),
        help(
            "A rule needs at least one antecedent pattern (e.g. \"P → Q\") to \
             be matchable. Add a pattern or remove the rule."
        )
    )]
    EmptyAntecedents { name: String },

    #[error("rule '{name}' has an empty consequent template")]
    #[diagnostic(
        code(poly::rule::empty_consequent),
        help("The consequent template is what the rule concludes. It cannot be empty.")
    )]
    EmptyConsequent { name: String },

    #[error("rule confidence {confidence} out of range for '{name}'")]
    #[diagnostic(
        code(poly::rule::confidence_range),
        help("Rule base confidences must lie in [0.0, 1.0].")
    )]
    ConfidenceOutOfRange { name: String, confidence: f64 },

    #[error("synthesis failed for rule '{name}': {message}")]
    #[diagnostic(
        code(poly::rule::synthesis_failed),
        help(
            "An individual rule failed to instantiate its consequent. The rule \
             is excluded from results; the call itself still succeeds."
        )
    )]
    SynthesisFailed { name: String, message: String },
}

// ---------------------------------------------------------------------------
// Operator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum OperatorError {
    #[error("operator strength {strength} out of range for '{name}'")]
    #[diagnostic(
        code(poly::operator::strength_range),
        help("Operator strengths must lie in [0.0, 1.0].")
    )]
    StrengthOutOfRange { name: String, strength: f64 },

    #[error("operator '{name}' has no symbol and no keywords")]
    #[diagnostic(
        code(poly::operator::undetectable),
        help(
            "An operator with neither a literal symbol nor any keyword \
             synonyms can never be detected in text. Add at least one."
        )
    )]
    Undetectable { name: String },

    #[error("unknown operator: {name}")]
    #[diagnostic(
        code(poly::operator::unknown),
        help("No operator with this name is registered in the paradigm's table.")
    )]
    Unknown { name: String },
}

// ---------------------------------------------------------------------------
// Registry errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum RegistryError {
    #[error("no engine registered for paradigm '{paradigm}'")]
    #[diagnostic(
        code(poly::registry::no_engine),
        help(
            "The registry has no engine for this paradigm. Register one with \
             `registry.register()`, or build the registry with `with_defaults()` \
             to get all eight."
        )
    )]
    NoEngine { paradigm: String },

    #[error("unknown paradigm name: {name}")]
    #[diagnostic(
        code(poly::registry::unknown_paradigm),
        help(
            "Valid paradigm names are: classical, fuzzy, modal, temporal, \
             probabilistic, quantum, decision, solver."
        )
    )]
    UnknownParadigm { name: String },
}

/// Convenience alias for functions returning polylogos results.
pub type PolyResult<T> = std::result::Result<T, PolyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_error_converts_to_poly_error() {
        let err = EngineError::NotInitialized {
            paradigm: "classical".into(),
        };
        let poly: PolyError = err.into();
        assert!(matches!(
            poly,
            PolyError::Engine(EngineError::NotInitialized { .. })
        ));
    }

    #[test]
    fn rule_error_converts_to_poly_error() {
        let err = RuleError::EmptyAntecedents {
            name: "modus_ponens".into(),
        };
        let poly: PolyError = err.into();
        assert!(matches!(poly, PolyError::Rule(RuleError::EmptyAntecedents { .. })));
    }

    #[test]
    fn error_display_messages_are_descriptive() {
        let err = EngineError::NotInitialized {
            paradigm: "temporal".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("temporal"));
        assert!(msg.contains("initialize"));
    }

    #[test]
    fn registry_error_names_paradigm() {
        let err = RegistryError::UnknownParadigm {
            name: "dialectical".into(),
        };
        assert!(format!("{err}").contains("dialectical"));
    }
}
