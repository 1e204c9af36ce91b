//! Platform concerns for LabelDesk: configuration files, sample files and
//! export delivery.

pub mod config_service;
pub mod export_writer;
pub mod paths;
pub mod sample_loader;

pub use config_service::ConfigService;
pub use export_writer::ExportWriter;
pub use paths::LabelDeskPaths;
pub use sample_loader::load_samples;
