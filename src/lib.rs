//! flwr-manifest: validation and defaulting for `flower.toml` manifests.
//!
//! Load a manifest with [`manifest::load_manifest`], check it with
//! [`manifest::validate_manifest`] against a [`registry::Registry`] of known
//! modules, and fill in missing values with [`manifest::apply_defaults`].

pub mod error;
pub mod exit_codes;
pub mod manifest;
pub mod registry;

#[cfg(test)]
mod test_support;
