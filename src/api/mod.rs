// Export submodules
pub mod devices;
