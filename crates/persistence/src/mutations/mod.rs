// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Loader mutations.
//!
//! ## Module Organization
//!
//! - `dimensions` — insert-if-absent loading of station and time dimensions
//! - `facts` — insert-or-replace loading of charging session facts
//!
//! Each public function runs its whole batch in one transaction. Dimensions
//! must be loaded before the facts that reference them; the declared foreign
//! keys reject facts loaded out of order.

pub mod dimensions;
pub mod facts;

pub use dimensions::load_dimensions;
pub use facts::load_facts;
