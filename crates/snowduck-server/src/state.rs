use std::sync::Arc;

use snowduck_emulator::Emulator;

#[derive(Clone)]
pub struct AppState {
    pub emulator: Arc<Emulator>,
}
