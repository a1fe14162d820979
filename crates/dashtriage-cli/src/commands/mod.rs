// Copyright 2026 Dropbox (created by Andrew Yates <ayates@dropbox.com>)
pub mod analyze;
pub mod record;
