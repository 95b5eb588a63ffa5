//! Stub generation for compiled Python extension modules.
//!
//! The pipeline reconciles two descriptions of the same native API surface: a
//! Doxygen-derived metadata index (source-comment documentation) and a
//! reflection snapshot of the already-built extension module. The output is a
//! typed `.pyi`-style interface skeleton with merged documentation.

pub mod cli;
pub mod doxygen;
pub mod emit;
pub mod index;
pub mod proto;
pub mod reflect;
pub mod registry;
pub mod translate;
pub mod utils;
pub mod version;

pub use emit::StubEmitter;
pub use index::{MemberDescriptor, MetadataIndex};
pub use proto::{Prototype, parse_prototype};
pub use reflect::{ExposedMember, MemberShape, ModuleSnapshot};
pub use registry::NameRegistry;
pub use translate::TypeTranslator;
