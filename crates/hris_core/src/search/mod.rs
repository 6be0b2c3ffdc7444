//! Employee search.
//!
//! # Responsibility
//! - Filter loaded employee rows in memory for type-as-you-search UX.
//!
//! # See also
//! - `view::employee_list` for where filtering is recomputed.

pub mod filter;
