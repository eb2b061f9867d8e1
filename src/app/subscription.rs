// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.

use super::Message;
use iced::{event, time, Subscription};
use std::time::Duration;

/// Interval between animation frames while notices are alive.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Forwards window resizes so the stack can be laid out again.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window_id| {
        if let event::Event::Window(iced::window::Event::Resized(size)) = event {
            Some(Message::WindowResized(size))
        } else {
            None
        }
    })
}

/// Creates the animation tick, only while there is something to animate or
/// a lifecycle event pending.
pub fn create_tick_subscription(has_notices: bool) -> Subscription<Message> {
    if has_notices {
        time::every(FRAME_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
