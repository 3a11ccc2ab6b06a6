use futures::executor::block_on;
use tracing::{debug, warn};

use crate::{host::DesktopHost, persistence};

pub(super) fn persist_file_system(host: &mut DesktopHost) {
    if let Err(err) = block_on(persistence::persist_file_system(
        host.prefs.as_ref(),
        &host.state.fs,
    )) {
        warn!("persist file system failed: {err}");
    }
}

pub(super) fn queue_sound(host: &mut DesktopHost, name: &'static str) {
    debug!(sound = name, "queueing sound effect");
    host.pending_sounds.push(name);
}
