//! Shared capability modules for the Aeon vault contract suite.
//!
//! This crate provides:
//! - [`CommonError`] — standardised error codes shared across contracts.
//! - [`ownable`] — single-owner access control with two-phase transfer.
//!
//! Contracts translate [`CommonError`] values into their own error enums at
//! the boundary, so the codes here never surface to external callers.

#![no_std]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod ownable;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Error codes shared by every contract in the suite.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum CommonError {
    Unauthorized = 1,
    NoPendingOwner = 2,
    OwnerNotSet = 3,
}
