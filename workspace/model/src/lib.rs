//! Database entities for the weather dashboard.

pub mod entities;
