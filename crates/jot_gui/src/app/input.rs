//! Keyboard shortcut extraction from egui input.

use crate::session::{EditorCommand, KeyChord};
use eframe::egui;

fn key_char(key: egui::Key) -> Option<char> {
    let mut chars = key.name().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_lowercase()),
        _ => None,
    }
}

/// Build a chord from a key press.
///
/// # Returns
/// `None` for keys that are not single letters.
pub(super) fn chord_for(key: egui::Key, modifiers: egui::Modifiers) -> Option<KeyChord> {
    Some(KeyChord {
        key: key_char(key)?,
        command: modifiers.command,
        shift: modifiers.shift,
        alt: modifiers.alt,
    })
}

/// Remove editor shortcuts from this frame's events so the text widget never
/// sees them.
///
/// # Arguments
/// - `events`: Input events for the current frame.
///
/// # Returns
/// The matched chords in arrival order.
pub(super) fn take_shortcuts(events: &mut Vec<egui::Event>) -> Vec<KeyChord> {
    let mut chords = Vec::new();
    events.retain(|event| {
        let egui::Event::Key {
            key,
            pressed: true,
            repeat: false,
            modifiers,
            ..
        } = event
        else {
            return true;
        };
        match chord_for(*key, *modifiers) {
            Some(chord) if EditorCommand::from_chord(chord).is_some() => {
                chords.push(chord);
                false
            }
            _ => true,
        }
    });
    chords
}
