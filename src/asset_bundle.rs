pub mod impl_directory;
#[cfg(test)]
pub mod impl_memory;
pub mod interface;
