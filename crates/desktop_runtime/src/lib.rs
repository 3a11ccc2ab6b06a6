//! Desktop shell runtime: window manager, virtual file system, and icon selection/drag engine,
//! coordinated by a single reducer and driven by [`host::DesktopHost`].

pub mod appearance;
pub mod apps;
pub mod config;
pub mod explorer;
pub mod host;
pub mod interaction;
pub mod model;
pub mod persistence;
pub mod reducer;
pub mod timers;
pub mod vfs;
pub mod window_manager;

pub use appearance::{color_scheme, color_schemes, Appearance, ColorScheme, WallpaperStyle};
pub use apps::{app_descriptor, app_registry, start_menu_apps, AppDescriptor, AppId};
pub use config::{ConfigError, ConfigLoader, DesktopConfig};
pub use explorer::ExplorerView;
pub use host::{DesktopHost, TickOutcome};
pub use interaction::{DragPayload, PointerTarget, SelectionBox, SelectionEngine};
pub use model::*;
pub use persistence::{load_file_system, persist_file_system, PersistenceError, FILE_SYSTEM_KEY};
pub use reducer::{reduce_desktop, DesktopAction, RuntimeEffect};
pub use timers::{ClockReading, ClockTicker, IdleTimer, ScreenSaverKind};
pub use vfs::VirtualFileSystem;
pub use window_manager::WindowManager;
