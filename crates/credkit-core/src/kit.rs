//! The credential kit: a registry from [`CredentialKind`] to its processor,
//! plus the region source every rule evaluates against.
//!
//! ```
//! use credkit_core::{CredentialKind, CredentialKit};
//!
//! let kit = CredentialKit::with_defaults();
//! assert_eq!(kit.valid(&CredentialKind::MainlandResidentId, "330105197810270025"), Ok(true));
//! assert_eq!(kit.valid(&CredentialKind::MainlandResidentId, "330105197810270024"), Ok(false));
//! ```
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use chrono::NaiveDate;

use crate::dates;
use crate::enums::CredentialKind;
use crate::error::{CredentialError, UnsupportedKind};
use crate::pipeline::{CredentialProcessor, EvalContext};
use crate::processors;
use crate::record::ParsedRecord;
use crate::region::{RegionSource, default_region_tables};

/// Dispatches validation and parsing to the processor registered for a kind.
///
/// Registration needs `&mut self`; once assembled the kit is `Send + Sync`
/// and can be shared behind `&` or [`Arc`].
pub struct CredentialKit {
    processors: HashMap<CredentialKind, Box<dyn CredentialProcessor>>,
    regions: Arc<dyn RegionSource>,
    /// Pinned "today"; `None` reads the local clock on every call.
    today: Option<NaiveDate>,
}

impl fmt::Debug for CredentialKit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialKit")
            .field("kinds", &self.kinds())
            .field("today", &self.today)
            .finish_non_exhaustive()
    }
}

impl Default for CredentialKit {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl CredentialKit {
    /// An empty kit over the bundled region tables.
    pub fn new() -> Self {
        Self {
            processors: HashMap::new(),
            regions: Arc::new(default_region_tables()),
            today: None,
        }
    }

    /// A kit with every built-in kind registered.
    pub fn with_defaults() -> Self {
        let mut kit = Self::new();
        kit.register_built_ins();
        kit
    }

    /// A kit with every built-in kind registered, evaluating region rules
    /// against `regions` instead of the bundled tables.
    ///
    /// The bundled tables are not loaded.
    pub fn with_regions(regions: Arc<dyn RegionSource>) -> Self {
        let mut kit = Self {
            processors: HashMap::new(),
            regions,
            today: None,
        };
        kit.register_built_ins();
        kit
    }

    /// Pins the date birth dates are compared against.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn register_built_ins(&mut self) {
        let built_ins: [Box<dyn CredentialProcessor>; 8] = [
            Box::new(processors::resident_id::processor()),
            Box::new(processors::hk_mo_travel_permit::processor()),
            Box::new(processors::tw_travel_permit::processor()),
            Box::new(processors::hk_mo_residence_permit::processor()),
            Box::new(processors::tw_residence_permit::processor()),
            Box::new(processors::foreign_permanent_residence::processor()),
            Box::new(processors::passport_mrz::processor()),
            Box::new(processors::social_credit_code::processor()),
        ];
        for processor in built_ins {
            self.processors.insert(processor.kind().clone(), processor);
        }
    }

    /// Registers `processor` under `kind`, returning the processor it
    /// replaces, if any.
    pub fn register(
        &mut self,
        kind: CredentialKind,
        processor: Box<dyn CredentialProcessor>,
    ) -> Option<Box<dyn CredentialProcessor>> {
        tracing::debug!(kind = %kind, "registering credential processor");
        self.processors.insert(kind, processor)
    }

    /// Registered kinds, built-ins first in their canonical order, then
    /// extensions sorted by code.
    pub fn kinds(&self) -> Vec<CredentialKind> {
        let mut kinds: Vec<CredentialKind> = CredentialKind::BUILT_IN
            .iter()
            .filter(|kind| self.processors.contains_key(*kind))
            .cloned()
            .collect();
        let mut extensions: Vec<CredentialKind> = self
            .processors
            .keys()
            .filter(|kind| !kind.is_built_in())
            .cloned()
            .collect();
        extensions.sort_by(|a, b| a.code().cmp(b.code()));
        kinds.extend(extensions);
        kinds
    }

    pub fn is_registered(&self, kind: &CredentialKind) -> bool {
        self.processors.contains_key(kind)
    }

    fn processor(
        &self,
        kind: &CredentialKind,
    ) -> Result<&dyn CredentialProcessor, UnsupportedKind> {
        match self.processors.get(kind) {
            Some(processor) => Ok(processor.as_ref()),
            None => Err(UnsupportedKind(kind.clone())),
        }
    }

    fn context(&self) -> EvalContext<'_> {
        EvalContext::new(
            &*self.regions,
            self.today.unwrap_or_else(dates::today),
        )
    }

    /// Whether `text` is a valid credential of `kind`.
    ///
    /// # Errors
    ///
    /// [`UnsupportedKind`] if no processor is registered for `kind`.
    pub fn valid(&self, kind: &CredentialKind, text: &str) -> Result<bool, UnsupportedKind> {
        Ok(self.check(kind, text)?.is_ok())
    }

    /// Decodes `text`, or `None` if it is not a valid credential of `kind`.
    ///
    /// # Errors
    ///
    /// [`UnsupportedKind`] if no processor is registered for `kind`.
    pub fn parse(
        &self,
        kind: &CredentialKind,
        text: &str,
    ) -> Result<Option<ParsedRecord>, UnsupportedKind> {
        let processor = self.processor(kind)?;
        Ok(processor.parse(&self.context(), text).ok())
    }

    /// Validates `text` and reports why it was rejected.
    ///
    /// # Errors
    ///
    /// [`UnsupportedKind`] if no processor is registered for `kind`. The inner
    /// result carries the first failing rule's [`CredentialError`].
    pub fn check(
        &self,
        kind: &CredentialKind,
        text: &str,
    ) -> Result<Result<(), CredentialError>, UnsupportedKind> {
        let processor = self.processor(kind)?;
        Ok(processor.validate(&self.context(), text))
    }

    /// Like [`parse`](Self::parse), keeping the rejection reason.
    ///
    /// # Errors
    ///
    /// [`UnsupportedKind`] if no processor is registered for `kind`.
    pub fn decode(
        &self,
        kind: &CredentialKind,
        text: &str,
    ) -> Result<Result<ParsedRecord, CredentialError>, UnsupportedKind> {
        let processor = self.processor(kind)?;
        Ok(processor.parse(&self.context(), text))
    }
}

static DEFAULT_KIT: LazyLock<CredentialKit> = LazyLock::new(CredentialKit::with_defaults);

/// The process-wide kit behind [`valid`], [`parse`] and [`check`].
pub fn default_kit() -> &'static CredentialKit {
    &DEFAULT_KIT
}

/// [`CredentialKit::valid`] on the default kit.
///
/// # Errors
///
/// [`UnsupportedKind`] for extension kinds, which the default kit never
/// registers.
pub fn valid(kind: &CredentialKind, text: &str) -> Result<bool, UnsupportedKind> {
    DEFAULT_KIT.valid(kind, text)
}

/// [`CredentialKit::parse`] on the default kit.
///
/// # Errors
///
/// [`UnsupportedKind`] for extension kinds.
pub fn parse(kind: &CredentialKind, text: &str) -> Result<Option<ParsedRecord>, UnsupportedKind> {
    DEFAULT_KIT.parse(kind, text)
}

/// [`CredentialKit::check`] on the default kit.
///
/// # Errors
///
/// [`UnsupportedKind`] for extension kinds.
pub fn check(
    kind: &CredentialKind,
    text: &str,
) -> Result<Result<(), CredentialError>, UnsupportedKind> {
    DEFAULT_KIT.check(kind, text)
}
