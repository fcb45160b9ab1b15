//! The rule/extractor pipeline shared by every credential processor.
//!
//! A processor is an ordered list of validation rules and an ordered list of
//! field extractors. Validation stops at the first failing rule; extraction
//! runs only after every rule has passed, against a fresh `Default` info
//! value. Rules and extractors receive the normalized string and an
//! [`EvalContext`] carrying the region tables and the date used as "today".
use std::ops::Range;

use chrono::NaiveDate;
use regex::Regex;

use crate::enums::{CredentialKind, ErrorKind};
use crate::error::{CheckDigitError, CredentialError};
use crate::record::ParsedRecord;
use crate::region::RegionSource;

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Trims surrounding whitespace and upper-cases ASCII letters.
///
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    text.trim().to_ascii_uppercase()
}

// ---------------------------------------------------------------------------
// Evaluation context
// ---------------------------------------------------------------------------

/// Everything a rule may consult besides the credential string itself.
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    pub regions: &'a dyn RegionSource,
    /// Birth dates after this day are rejected.
    pub today: NaiveDate,
}

impl<'a> EvalContext<'a> {
    pub fn new(regions: &'a dyn RegionSource, today: NaiveDate) -> Self {
        Self { regions, today }
    }
}

// ---------------------------------------------------------------------------
// Processor trait and chain
// ---------------------------------------------------------------------------

/// A validation rule. Returns the rejection reason on failure.
pub type Rule = fn(&EvalContext<'_>, &str) -> Result<(), CredentialError>;

/// Writes one or more fields of a validated credential into `R`.
pub type Extractor<R> = fn(&EvalContext<'_>, &str, &mut R);

/// Object-safe interface the façade dispatches through.
///
/// Both methods normalize their input first.
pub trait CredentialProcessor: Send + Sync {
    fn kind(&self) -> &CredentialKind;

    /// Runs the validation rules in order and reports the first failure.
    fn validate(&self, ctx: &EvalContext<'_>, text: &str) -> Result<(), CredentialError>;

    /// Validates, then decodes.
    fn parse(&self, ctx: &EvalContext<'_>, text: &str) -> Result<ParsedRecord, CredentialError>;
}

/// An ordered rule chain plus an ordered extractor chain for info type `R`.
pub struct Chain<R> {
    kind: CredentialKind,
    rules: Vec<Rule>,
    extractors: Vec<Extractor<R>>,
}

impl<R> Chain<R> {
    pub fn new(kind: CredentialKind) -> Self {
        Self {
            kind,
            rules: Vec::new(),
            extractors: Vec::new(),
        }
    }

    /// Appends a validation rule.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Appends a field extractor.
    #[must_use]
    pub fn extract(mut self, extractor: Extractor<R>) -> Self {
        self.extractors.push(extractor);
        self
    }

    fn run_rules(&self, ctx: &EvalContext<'_>, normalized: &str) -> Result<(), CredentialError> {
        let outcome = self
            .rules
            .iter()
            .try_for_each(|rule| rule(ctx, normalized));
        match &outcome {
            Ok(()) => tracing::trace!(kind = %self.kind, "credential accepted"),
            Err(err) => tracing::debug!(
                kind = %self.kind,
                code = err.kind.code(),
                fragment = %err.fragment,
                detail = %err.detail,
                "credential rejected"
            ),
        }
        outcome
    }
}

impl<R> Chain<R>
where
    R: Default,
{
    /// Validates `text` and decodes it into a fresh `R`.
    ///
    /// # Errors
    ///
    /// The first failing rule's [`CredentialError`].
    pub fn decode(&self, ctx: &EvalContext<'_>, text: &str) -> Result<R, CredentialError> {
        let normalized = normalize(text);
        self.run_rules(ctx, &normalized)?;
        let mut info = R::default();
        for extractor in &self.extractors {
            extractor(ctx, &normalized, &mut info);
        }
        Ok(info)
    }
}

impl<R> CredentialProcessor for Chain<R>
where
    R: Default + Into<ParsedRecord>,
{
    fn kind(&self) -> &CredentialKind {
        &self.kind
    }

    fn validate(&self, ctx: &EvalContext<'_>, text: &str) -> Result<(), CredentialError> {
        self.run_rules(ctx, &normalize(text))
    }

    fn parse(&self, ctx: &EvalContext<'_>, text: &str) -> Result<ParsedRecord, CredentialError> {
        self.decode(ctx, text).map(Into::into)
    }
}

// ---------------------------------------------------------------------------
// Helpers for rules and extractors
// ---------------------------------------------------------------------------

/// The byte range `range` of `text`, or `""` if it is out of bounds.
///
/// Rules after the format rule only ever see ASCII of a known length, so the
/// fallback is never hit in a correctly ordered chain.
pub fn field(text: &str, range: Range<usize>) -> &str {
    text.get(range).unwrap_or("")
}

/// The character at byte `index`, or NUL if out of bounds.
pub fn char_at(text: &str, index: usize) -> char {
    text.as_bytes().get(index).map_or('\0', |&b| char::from(b))
}

/// Rejects empty input, lengths outside `lengths` and grammar mismatches.
pub fn require_format(
    text: &str,
    lengths: &[usize],
    grammar: &Regex,
) -> Result<(), CredentialError> {
    if text.is_empty() {
        return Err(CredentialError::basic_format("empty input"));
    }
    let len = text.chars().count();
    if !lengths.contains(&len) {
        return Err(CredentialError::basic_format(format!(
            "length {len} is not one of {lengths:?}"
        )));
    }
    if !grammar.is_match(text) {
        return Err(CredentialError::basic_format(format!(
            "{text:?} does not match the expected pattern"
        )));
    }
    Ok(())
}

/// Compares a computed check character with the one present.
///
/// A payload the scheme cannot weigh is a rejection too, reported as
/// [`ErrorKind::CheckDigit`].
pub fn require_check_char(
    payload: &str,
    computed: Result<char, CheckDigitError>,
    actual: char,
) -> Result<(), CredentialError> {
    match computed {
        Ok(expected) if expected == actual => Ok(()),
        Ok(expected) => Err(CredentialError::new(
            ErrorKind::CheckDigit,
            format!("{payload}{actual}"),
            format!("check character should be {expected:?}, found {actual:?}"),
        )),
        Err(err) => Err(CredentialError::new(
            ErrorKind::CheckDigit,
            payload,
            format!("check character cannot be computed: {err}"),
        )),
    }
}

/// Builds a regex from a pattern that is known to be valid.
///
/// Compilation cannot fail for the literal patterns used by processors; the
/// fallback only keeps the crate free of panicking calls.
pub(crate) fn grammar(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|_| {
        // Matches nothing, so every input is rejected as malformed.
        Regex::new("[^\\s\\S]").unwrap_or_else(|_| unreachable!("regex engine broken"))
    })
}
