//! Path handling for editable installs.
//!
//! Two concerns live here:
//!
//! - [`algebra`]: pure computations over `(target, source)` pairs that the
//!   installers use to decide what to link and which folders to expose.
//! - [`normalize`]: making user-supplied paths absolute.
//!
//! # Examples
//!
//! ```
//! use editables::path::{find_outermost_entity, find_parent_folder};
//! use std::path::Path;
//!
//! let (target, source) =
//!     find_outermost_entity("pkg/sub/mod.py", Path::new("/work/src/pkg/sub/mod.py"));
//! assert_eq!(target, "pkg");
//! assert_eq!(source, Path::new("/work/src/pkg"));
//!
//! let folder = find_parent_folder("pkg/sub/mod.py", Path::new("/work/src/pkg/sub/mod.py")).unwrap();
//! assert_eq!(folder, Path::new("/work/src"));
//! ```

pub mod algebra;
pub mod normalize;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use algebra::{
    check_subpath, find_outermost_entity, find_parent_folder, normalize_module_name,
    normalize_package_path, outermost_entities, PACKAGE_MARKER,
};
