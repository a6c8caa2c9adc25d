/*
 * Copyright (C) 2026 Memori Labs <engineering@memorilabs.ai>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

//! Core types for the Memori Cloud SDK: the failure taxonomy, LLM
//! provider selection, and client configuration.

pub mod config;
pub mod error;
pub mod provider;

pub use config::{Config, DEFAULT_API_KEY_VAR};
pub use error::{ErrorKind, MemoriError, Result};
pub use provider::{Provider, UnsupportedProviderError};
