pub use ecow::EcoString as ArborStr;
