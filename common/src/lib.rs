// SPDX-FileCopyrightText: 2026 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Common crate for the vehicle tracker
//!
//! Provides the common data types that are shared across every module.

pub mod position;
pub mod serde;
pub mod snapshot;
pub mod test_helper;
pub mod vehicle;
