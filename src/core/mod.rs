// src/core/mod.rs
//! Rendering, packaging and extraction services

pub mod config_manager;
pub mod extraction;
pub mod fs_ops;
pub mod packager;
pub mod theme_engine;
pub mod theme_registry;
pub mod themes;

pub use config_manager::ConfigManager;
pub use extraction::{build_gateway, ExtractionGateway, Provider, SourceDocument};
pub use fs_ops::FsOps;
pub use packager::{Destination, PackageResult, ProjectPackager};
pub use theme_engine::{render, render_batch, RenderOutcome};
pub use theme_registry::{get_renderer, list_themes, ThemeInfo, ThemeRenderer, DEFAULT_THEME};
