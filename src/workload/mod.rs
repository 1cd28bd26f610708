// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Construction of the Job that copies an ImageSet's images.

pub mod job;
pub mod owner;
pub mod script;

pub use job::build_job;
pub use owner::set_controller_reference;
pub use script::ScriptBuilder;
