pub mod app;
pub mod run;
pub mod ui;

pub use run::run;
