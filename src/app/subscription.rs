// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Routes native events (keyboard, mouse, touch, window) into top-level
//! messages. Keyboard presses already captured by a focused widget (text
//! inputs in particular) arrive with `Status::Captured` and are not
//! forwarded, so gallery shortcuts never fire while the user is typing.

use super::Message;
use iced::{event, keyboard, mouse, window, Subscription};

/// Creates the raw event subscription.
///
/// `lightbox_open` widens the routing: wheel and touch gestures belong to
/// the lightbox image surface only while the overlay is mounted; the
/// gallery scrollable owns the wheel otherwise.
pub fn create_event_subscription(lightbox_open: bool) -> Subscription<Message> {
    // `event::listen_with` takes a plain `fn` pointer, so the routing cannot
    // capture `lightbox_open` in a closure; dispatch to one of two wrappers.
    if lightbox_open {
        event::listen_with(route_lightbox)
    } else {
        event::listen_with(route_gallery)
    }
}

fn route_gallery(
    event: event::Event,
    status: event::Status,
    window_id: window::Id,
) -> Option<Message> {
    route_event(event, status, window_id, false)
}

fn route_lightbox(
    event: event::Event,
    status: event::Status,
    window_id: window::Id,
) -> Option<Message> {
    route_event(event, status, window_id, true)
}

fn route_event(
    event: event::Event,
    status: event::Status,
    _window_id: window::Id,
    lightbox_open: bool,
) -> Option<Message> {
    match event {
        event::Event::Window(window::Event::Resized(size)) => {
            Some(Message::WindowResized(size))
        }
        event::Event::Keyboard(keyboard::Event::ModifiersChanged(modifiers)) => {
            Some(Message::ModifiersChanged(modifiers))
        }
        event::Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            match status {
                event::Status::Ignored => Some(Message::KeyPressed { key, modifiers }),
                event::Status::Captured => None,
            }
        }
        event::Event::Mouse(mouse::Event::CursorMoved { position }) => {
            Some(Message::CursorMoved(position))
        }
        event::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => match status {
            // Captured presses belong to a widget (card, button, image).
            event::Status::Ignored => Some(Message::BackgroundPressed),
            event::Status::Captured => None,
        },
        event::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
            // Releases terminate drags even when a widget captured them.
            Some(Message::PointerReleased)
        }
        event::Event::Mouse(mouse::Event::WheelScrolled { delta }) if lightbox_open => {
            Some(Message::WheelScrolled(wheel_pixels(&delta)))
        }
        event::Event::Touch(touch_event) if lightbox_open => {
            Some(Message::Touch(touch_event))
        }
        _ => None,
    }
}

/// Normalizes a wheel delta to pixels, positive upward.
fn wheel_pixels(delta: &mouse::ScrollDelta) -> f32 {
    match delta {
        mouse::ScrollDelta::Lines { y, .. } => *y * 100.0,
        mouse::ScrollDelta::Pixels { y, .. } => *y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_lines_convert_to_pixels() {
        let lines = mouse::ScrollDelta::Lines { x: 0.0, y: 2.0 };
        assert!((wheel_pixels(&lines) - 200.0).abs() < f32::EPSILON);

        let pixels = mouse::ScrollDelta::Pixels { x: 0.0, y: -35.0 };
        assert!((wheel_pixels(&pixels) + 35.0).abs() < f32::EPSILON);
    }

    #[test]
    fn subscriptions_exist_for_both_routing_modes() {
        let _gallery = create_event_subscription(false);
        let _lightbox = create_event_subscription(true);
    }
}
