//! The CLI's own user exits.
//!
//! These go through the same boundary as any program using the library, so a
//! script sees `userexit: error: ...` on stderr and a sysexits-style status.

use std::fmt::Display;
use std::path::Path;
use userexit::exit_codes;
use userexit::{UserExit, Variant};

pub static UNKNOWN_VARIANT: Variant = Variant::prefixed(
    "UnknownVariantError",
    exit_codes::USAGE,
    "
    No variant named {!r} in catalog {}. Run `userexit list` to see
    the declared variants.
    ",
);

pub static CATALOG_INVALID: Variant = Variant::prefixed(
    "CatalogInvalidError",
    exit_codes::DATA_ERROR,
    "Catalog {} is invalid: {}",
);

pub static CATALOG_UNREADABLE: Variant = Variant::prefixed(
    "CatalogUnreadableError",
    exit_codes::NO_INPUT,
    "Cannot read catalog {}: {}",
);

pub static RENDER_FAILED: Variant = Variant::prefixed(
    "RenderFailedError",
    exit_codes::USAGE,
    "Cannot render variant {!r} with the given arguments: {}",
);

pub fn unknown_variant(name: &str, catalog: &Path) -> UserExit {
    UNKNOWN_VARIANT.raise().arg(name).arg(catalog.display())
}

pub fn catalog_invalid(catalog: &Path, reason: impl Display) -> UserExit {
    CATALOG_INVALID
        .raise()
        .arg(catalog.display())
        .arg(reason.to_string())
}

pub fn catalog_unreadable(catalog: &Path, reason: impl Display) -> UserExit {
    CATALOG_UNREADABLE
        .raise()
        .arg(catalog.display())
        .arg(reason.to_string())
}

pub fn render_failed(name: &str, reason: impl Display) -> UserExit {
    RENDER_FAILED.raise().arg(name).arg(reason.to_string())
}
