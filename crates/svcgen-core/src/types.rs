//! Domain types for service extraction and generation.
//!
//! These are the structural facts pulled out of a definition file and
//! the aggregates built from them. Extraction is text-based, so every
//! type here is a plain value; nothing holds file handles or paths.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A role suffix distinguishing a file's purpose.
///
/// Definition files carry the `types` role (`*.types.ts`), generated
/// wrappers carry the `service` role (`*.service.ts`). Validated at
/// construction: lowercase alphanumeric with hyphens, starting with a
/// letter.
///
/// # Examples
///
/// ```
/// use svcgen_core::Role;
///
/// let role: Role = "types".parse().unwrap();
/// assert_eq!(role.file_suffix(), ".types.ts");
/// assert_eq!(role.strip("gateway.types.ts"), Some("gateway"));
/// assert_eq!(role.strip("gateway.service.ts"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    /// Creates a role after validating its format.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if the role is empty,
    /// does not start with a lowercase letter, or contains characters
    /// outside `[a-z0-9-]`.
    pub fn new(role: &str) -> crate::Result<Self> {
        let mut chars = role.chars();
        let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_lowercase());
        let rest_valid = role
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

        if starts_with_letter && rest_valid {
            Ok(Self(role.to_string()))
        } else {
            Err(crate::Error::InvalidArgument(format!(
                "invalid role '{role}' (expected lowercase letters, digits, hyphens; \
                 must start with a letter)"
            )))
        }
    }

    /// Returns the role as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the file suffix this role implies, e.g. `.types.ts`.
    #[must_use]
    pub fn file_suffix(&self) -> String {
        format!(".{}.ts", self.0)
    }

    /// Strips this role's suffix from a file name, yielding the base
    /// identifier.
    ///
    /// Returns `None` if the file does not carry this role, or if
    /// stripping would leave an empty base identifier.
    #[must_use]
    pub fn strip<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        file_name
            .strip_suffix(&self.file_suffix())
            .filter(|base| !base.is_empty())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Role {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// An extracted client method signature.
///
/// Only methods matching the exact three-argument, single-item-stream
/// calling shape are recognized; anything else is skipped during
/// extraction rather than recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodSignature {
    /// Method name as it appears on the client interface.
    pub name: String,

    /// Request type name.
    pub request_type: String,

    /// Response type name (the stream's single item type).
    pub response_type: String,
}

/// The service-name constant a wrapper binds its proxy with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceConstant {
    /// Constant identifier, e.g. `GAME_SERVICE_NAME`.
    pub name: String,

    /// `true` when no matching constant was found in the definition
    /// file and the name was synthesized deterministically. A
    /// low-confidence result, never an error.
    pub synthesized: bool,
}

impl ServiceConstant {
    /// A constant found verbatim in the definition file.
    #[must_use]
    pub const fn found(name: String) -> Self {
        Self {
            name,
            synthesized: false,
        }
    }

    /// The deterministic fallback for a service with no declared
    /// constant: `<SERVICE_NAME_UPPER>_SERVICE_NAME`.
    ///
    /// # Examples
    ///
    /// ```
    /// use svcgen_core::ServiceConstant;
    ///
    /// let constant = ServiceConstant::synthesized_for("GameService");
    /// assert_eq!(constant.name, "GAMESERVICE_SERVICE_NAME");
    /// assert!(constant.synthesized);
    /// ```
    #[must_use]
    pub fn synthesized_for(service_name: &str) -> Self {
        Self {
            name: format!("{}_SERVICE_NAME", service_name.to_uppercase()),
            synthesized: true,
        }
    }
}

/// Structural summary of one definition file, sufficient to synthesize
/// a wrapper class.
///
/// Built once per qualifying definition file and discarded after the
/// wrapper file is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDescriptor {
    /// Service name, derived by stripping `Client` from the interface
    /// name. Source casing is preserved exactly.
    pub service_name: String,

    /// Client interface name, e.g. `GameServiceClient`.
    pub client_interface: String,

    /// Service-name constant, found or synthesized.
    pub constant: ServiceConstant,

    /// Base identifier of the originating file (file name minus role
    /// suffix). Wrapper imports resolve against this, not against the
    /// wrapper's own name.
    pub import_base: String,

    /// Extracted method signatures in source order, deduplicated by
    /// name (first occurrence wins).
    pub methods: Vec<MethodSignature>,

    /// Exported type names referenced by the wrapper's import list,
    /// in discovery order, excluding the client interface itself.
    pub auxiliary_types: Vec<String>,
}

impl ServiceDescriptor {
    /// The wrapper class name: `<serviceName>ClientService`.
    ///
    /// Derived from the interface name as found in the source, never
    /// from the filename.
    #[must_use]
    pub fn class_name(&self) -> String {
        format!("{}ClientService", self.service_name)
    }
}

/// End-of-run counters for a generation batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenerationSummary {
    /// Wrapper files written.
    pub generated: usize,

    /// Candidate files skipped as "not a service file".
    pub skipped: usize,

    /// Files that hit a fatal per-file error (run continues, exit
    /// status turns non-zero).
    pub failed: usize,
}

impl GenerationSummary {
    /// Returns `true` if any batch item failed fatally.
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// End-of-run counters for a migration batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MigrationSummary {
    /// Files migrated to the new role.
    pub migrated: usize,

    /// Files whose migration failed; their originals are left intact.
    pub failed: usize,
}

impl MigrationSummary {
    /// Returns `true` if any file failed to migrate.
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
