// ABOUTME: Module containing the WHOOP MCP tool implementations organized by category.
// ABOUTME: Profile tools return JSON; record tools return formatted text.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Implementations
//!
//! - `profile` - `get_user_profile`, `get_body_measurements`
//! - `records` - `get_recent_*` and `*_for_date_range` for cycles, recovery,
//!   sleep, and workouts

/// Profile and body measurement tools
pub mod profile;

/// Cycle, recovery, sleep, and workout tools
pub mod records;
