use futures::executor::block_on;
use tracing::{info, warn};

use crate::{host::DesktopHost, persistence, reducer::DesktopAction};

pub(super) fn hydrate_file_system(host: &mut DesktopHost) {
    let prefs = host.prefs_store();
    match block_on(persistence::load_file_system(prefs.as_ref())) {
        Ok(Some(items)) => {
            info!(count = items.len(), "restoring persisted file system");
            host.dispatch(DesktopAction::HydrateFileSystem { items });
        }
        Ok(None) => info!("no persisted file system; using seed tree"),
        Err(err) => warn!("file system load failed, using seed tree: {err}"),
    }
}
