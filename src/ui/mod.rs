/// User interface module
///
/// Each submodule renders one part of the window from borrowed state and
/// reports user actions as `Message`s:
/// - `searchbar` - query input and Search button
/// - `gallery` - thumbnail grid
/// - `modal` - lightbox overlay
/// - `toast` - transient notifications

pub mod gallery;
pub mod modal;
pub mod searchbar;
pub mod toast;
