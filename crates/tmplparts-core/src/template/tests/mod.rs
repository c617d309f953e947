//! Tests for the template module
//!
//! Organized into focused submodules by concern.

use super::*;

// Test helper functions
mod helpers;




mod cache;
