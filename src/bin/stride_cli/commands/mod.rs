// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for stride-cli
// ABOUTME: Provides the show, ring, and range subcommands

pub mod range;
pub mod ring;
pub mod show;
