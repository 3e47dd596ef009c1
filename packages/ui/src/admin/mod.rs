//! Admin console components for the job console.

pub mod dialogs;
mod error_banner;
mod grid;
pub mod pages;

pub use error_banner::{ErrorBanner, describe_error};
pub use grid::{
    EntityGrid, FieldOf, GridRow, GridToolbar, grid_rows, render_cell, render_grid,
    use_entity_grid, use_session_dialog,
};
pub use pages::{AdminJndiPage, AdminJobDefinitionsPage, AdminQueuesPage};
