// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! Connection setup, migrations, PRAGMA configuration, and the
//! `last_insert_rowid()` helper live here. Domain reads and writes use
//! Diesel DSL in `queries/` and `mutations/`.

pub mod sqlite;
