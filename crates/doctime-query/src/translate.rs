//! # Path Translators
//!
//! Queries are written against the in-memory API of the time types
//! (`zdt.ToInstant()`, `odt.LocalDateTime`), but the store filters on the
//! stored JSON shape. A translator maps one recognized member or method to
//! the stored field it reads:
//!
//! ```text
//! x.Stamp.ToInstant()          ─▶  "Stamp"           (Instant)
//! x.Stamp.LocalDateTime        ─▶  "Stamp.DateTime"  (LocalDateTime)
//! x.ZonedDateTime.ToInstant()  ─▶  "ZonedDateTime"   (Instant)
//! ```
//!
//! An offset date-time determines its instant, and a zoned value is stored
//! around one, so instant conversions pass the receiver's path through
//! unchanged.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{QueryError, Result};
use crate::expr::{Expr, ValueType};
use crate::path::{join, PathExpression, PathResolver};

/// Sub-field read for the local clock of an offset date-time.
pub const LOCAL_DATE_TIME_SUFFIX: &str = "DateTime";

const TO_INSTANT: &str = "ToInstant";
const LOCAL_DATE_TIME: &str = "LocalDateTime";

// =============================================================================
// Signatures
// =============================================================================

/// Whether a member is a property or a parameterless method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Property,
    Method,
}

/// Identifies a member by the type declaring it, its name and its kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberSignature {
    pub declaring_type: ValueType,
    pub name: String,
    pub kind: MemberKind,
}

impl MemberSignature {
    pub fn property(declaring_type: ValueType, name: &str) -> Self {
        Self {
            declaring_type,
            name: name.to_string(),
            kind: MemberKind::Property,
        }
    }

    pub fn method(declaring_type: ValueType, name: &str) -> Self {
        Self {
            declaring_type,
            name: name.to_string(),
            kind: MemberKind::Method,
        }
    }

    /// Signature of the member a node accesses, if it accesses one.
    pub fn of(expr: &Expr) -> Option<Self> {
        match expr {
            Expr::Member { target, name, .. } => {
                Some(Self::property(target.value_type()?, name))
            }
            Expr::Call { target, method, .. } => Some(Self::method(target.value_type()?, method)),
            _ => None,
        }
    }
}

// =============================================================================
// Translators
// =============================================================================

/// A recognized member access and the stored path it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Translator {
    /// `OffsetDateTime.ToInstant()`
    OffsetDateTimeToInstant,
    /// `OffsetDateTime.LocalDateTime`
    OffsetDateTimeLocalDateTime,
    /// `ZonedDateTime.ToInstant()`
    ZonedDateTimeToInstant,
}

impl Translator {
    pub const ALL: [Translator; 3] = [
        Translator::OffsetDateTimeToInstant,
        Translator::OffsetDateTimeLocalDateTime,
        Translator::ZonedDateTimeToInstant,
    ];

    /// The member this translator handles.
    pub fn signature(self) -> MemberSignature {
        match self {
            Translator::OffsetDateTimeToInstant => {
                MemberSignature::method(ValueType::OffsetDateTime, TO_INSTANT)
            }
            Translator::OffsetDateTimeLocalDateTime => {
                MemberSignature::property(ValueType::OffsetDateTime, LOCAL_DATE_TIME)
            }
            Translator::ZonedDateTimeToInstant => {
                MemberSignature::method(ValueType::ZonedDateTime, TO_INSTANT)
            }
        }
    }

    /// Rewrites `expr` into the stored path it reads.
    ///
    /// # Arguments
    ///
    /// * `expr` - The member access or call node
    /// * `resolver` - Resolves the receiver of the node
    /// * `suffix` - Sub-field holding the local clock of an offset date-time
    pub fn translate<R: PathResolver + ?Sized>(
        self,
        expr: &Expr,
        resolver: &R,
        suffix: &str,
    ) -> Result<PathExpression> {
        if MemberSignature::of(expr).as_ref() != Some(&self.signature()) {
            return Err(QueryError::unsupported(expr));
        }

        let translated = match (self, expr) {
            (
                Translator::OffsetDateTimeToInstant | Translator::ZonedDateTimeToInstant,
                Expr::Call { target, ty, .. },
            ) => {
                let receiver = resolver.resolve(target)?;
                PathExpression::new(receiver.path, ty.clone())
            }
            (Translator::OffsetDateTimeLocalDateTime, Expr::Member { target, .. }) => {
                let receiver = resolver.resolve(target)?;
                PathExpression::new(join(&receiver.path, suffix), ValueType::LocalDateTime)
            }
            _ => return Err(QueryError::unsupported(expr)),
        };

        debug!(
            translator = ?self,
            expression = %expr,
            path = %translated.path,
            "Translated member access"
        );
        Ok(translated)
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Maps member signatures to the translators that handle them.
#[derive(Debug, Clone, Default)]
pub struct TranslatorRegistry {
    translators: HashMap<MemberSignature, Translator>,
}

impl TranslatorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every time translator.
    pub fn with_time_translators() -> Self {
        let mut registry = Self::new();
        for translator in Translator::ALL {
            registry.register(translator);
        }
        registry
    }

    /// Registers a translator under its signature, replacing any previous one.
    pub fn register(&mut self, translator: Translator) {
        let signature = translator.signature();
        debug!(
            declaring_type = %signature.declaring_type,
            member = %signature.name,
            "Registered translator"
        );
        self.translators.insert(signature, translator);
    }

    /// Finds the translator for the member a node accesses.
    pub fn lookup(&self, expr: &Expr) -> Option<Translator> {
        let signature = MemberSignature::of(expr)?;
        self.translators.get(&signature).copied()
    }

    pub fn len(&self) -> usize {
        self.translators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translators.is_empty()
    }
}
