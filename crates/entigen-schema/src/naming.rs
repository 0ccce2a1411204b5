//! Canonical name handling.
//!
//! Every case-insensitive comparison in the engine goes through
//! [`normalize`] so that the audit-field check and the duplicate-field
//! check can never disagree on what counts as "the same name".

use convert_case::{Case, Casing};

/// Canonical audit-category names, already normalized.
///
/// One unified list: bookkeeping columns (tenant, creation/modification
/// timestamp and actor, row version, soft-delete marker) in both the
/// Portuguese forms used by the source entities and their English
/// equivalents.
pub const AUDIT_FIELDS: &[&str] = &[
    "tenantid",
    "empresaid",
    "datacriacao",
    "dataalteracao",
    "usuariocriacao",
    "usuarioalteracao",
    "createdat",
    "createdby",
    "updatedat",
    "updatedby",
    "rowversion",
    "excluido",
];

/// Lowercase a name and strip separators.
///
/// `DataCriacao`, `data_criacao`, and `data-criacao` all normalize to
/// `datacriacao`.
#[must_use]
pub fn normalize(name: &str) -> String {
    name.to_case(Case::Flat)
}

/// True if the name is an audit-category property up to normalization.
#[must_use]
pub fn is_audit_field(name: &str) -> bool {
    AUDIT_FIELDS.contains(&normalize(name).as_str())
}

/// True if two names collide under canonical normalization.
#[must_use]
pub fn collides(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Derive a human-readable title from an identifier.
///
/// Used for default grid titles and form labels.
#[must_use]
pub fn humanize(name: &str) -> String {
    name.to_case(Case::Title)
}
