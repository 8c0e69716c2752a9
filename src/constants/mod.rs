pub mod emoji;

pub use emoji::icon;
