//! Command menu - category classification, aggregation and sub-menus

pub mod aggregator;
pub mod classifier;
pub mod submenu;

pub use aggregator::{build_menu, render_menu, category_title, MenuHeader, MenuModel, RenderedMenu};
pub use classifier::{glyph_for, normalize, stylize, DEFAULT_GLYPH};
pub use submenu::build_sub_menu;
