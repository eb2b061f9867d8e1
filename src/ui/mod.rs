// SPDX-License-Identifier: MPL-2.0
//! Widgets and visual tokens of the host shell.

pub mod design_tokens;
pub mod toast;
