pub mod cursor;
pub use cursor::*;
pub mod container;
pub use container::*;
pub mod dex;
pub use dex::*;
pub mod oat;
pub use oat::*;
pub mod vdex;
pub use vdex::*;
pub mod identify;
pub use identify::*;
pub mod checksums;
pub use checksums::*;
pub mod patch;
pub use patch::*;
pub mod dump;

#[cfg(test)]
pub(crate) mod testing;
