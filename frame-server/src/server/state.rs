// App state for Axum server
use frame_message::FrameMessageParser;

#[derive(Clone)]
pub struct AppState {
    pub parser: FrameMessageParser,
}
