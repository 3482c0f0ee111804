//! The event-driven field orchestrator.
//!
//! [`EmojiField`] owns the dictionary, the delete guard, and the field
//! options, and drives an attached [`EditSurface`] from host events. All
//! state is per-instance. Every operation degrades to a no-op when no
//! surface is attached; the plain-text value survives detached and is
//! replayed into the next surface.

use crate::delete_guard::{DeleteGuard, DeleteKind};
use crate::mutator::{insert_at_cursor, replace_text, sync_display};
use crate::selection::SelectionSnapshot;
use crate::surface::{EditSurface, surface_snapshot};
use emoji::{EmojiDictionary, EmojiEntry, ShortnameLoader};
use markup::to_plain_text;
use std::time::Instant;

/// Host-configurable field behavior.
#[derive(Clone, Debug, Default)]
pub struct FieldOptions {
    /// Shown by the host while the field is empty.
    pub placeholder: String,
    /// A disabled field ignores all user input events.
    pub disabled: bool,
    /// Touch hosts keep the on-screen keyboard down after picker
    /// insertion, so the field is not refocused.
    pub touch: bool,
}

/// The key classes the field reacts to. Everything else is [`Key::Other`]
/// and passes through untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Backspace,
    Delete,
    /// Virtual keyboards commonly report delete as "Unidentified".
    Unidentified,
    Other,
}

impl Key {
    /// Map a host key name (DOM `KeyboardEvent.key` style) to a key class.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Backspace" => Self::Backspace,
            "Delete" => Self::Delete,
            "Unidentified" => Self::Unidentified,
            _ => Self::Other,
        }
    }
}

struct Progress {
    duration_secs: f32,
    started: Instant,
}

/// An emoji-aware editable text field.
///
/// The field holds the canonical plain-text value; the attached surface
/// holds its rendered form. Host events (`on_*`) keep the two in sync and
/// report value changes through the change listener, which fires at most
/// once per event and only when the plain text actually changed.
pub struct EmojiField<S: EditSurface> {
    surface: Option<S>,
    dictionary: EmojiDictionary,
    guard: DeleteGuard,
    options: FieldOptions,
    saved_selection: Option<SelectionSnapshot>,
    value: String,
    progress: Option<Progress>,
    on_change: Option<Box<dyn FnMut(&str)>>,
    last_width: Option<f32>,
}

impl<S: EditSurface> EmojiField<S> {
    pub fn new(options: FieldOptions) -> Self {
        Self {
            surface: None,
            dictionary: EmojiDictionary::with_builtin(),
            guard: DeleteGuard::new(),
            options,
            saved_selection: None,
            value: String::new(),
            progress: None,
            on_change: None,
            last_width: None,
        }
    }

    /// Attach the editable surface and replay the stored value into it.
    pub fn attach_surface(&mut self, surface: S) {
        self.surface = Some(surface);
        let value = self.value.clone();
        if let Some(s) = self.surface.as_mut() {
            sync_display(s, &self.dictionary, &value);
            self.value = to_plain_text(s.fragment());
        }
    }

    /// Detach and return the surface; the value stays on the field.
    pub fn detach_surface(&mut self) -> Option<S> {
        self.surface.take()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn dictionary(&self) -> &EmojiDictionary {
        &self.dictionary
    }

    /// Current plain-text value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Programmatic value set. Rebuilds the display but never fires the
    /// change listener.
    pub fn set_value(&mut self, text: &str) {
        match self.surface.as_mut() {
            Some(surface) => {
                sync_display(surface, &self.dictionary, text);
                self.value = to_plain_text(surface.fragment());
            }
            None => self.value = text.to_string(),
        }
    }

    pub fn set_change_listener(&mut self, listener: impl FnMut(&str) + 'static) {
        self.on_change = Some(Box::new(listener));
    }

    pub fn is_disabled(&self) -> bool {
        self.options.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.options.disabled = disabled;
    }

    pub fn placeholder(&self) -> &str {
        &self.options.placeholder
    }

    /// The host shows the placeholder while the field is empty.
    pub fn placeholder_visible(&self) -> bool {
        self.value.is_empty()
    }

    // --- Host events ---

    /// Printable character typed.
    pub fn on_char(&mut self, c: char) {
        if self.options.disabled || c.is_control() {
            return;
        }
        let mut buf = [0u8; 4];
        self.insert_internal(c.encode_utf8(&mut buf), false);
    }

    /// Keydown for a delete-class key. The native single-unit delete is
    /// issued here, bracketed by the guard so sentinel-marked clusters go
    /// as one unit.
    pub fn on_key_down(&mut self, key: Key) {
        if self.options.disabled {
            return;
        }
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        match key {
            Key::Backspace => {
                self.guard.on_key_down(DeleteKind::Backward, &*surface);
                surface.delete_backward();
                self.guard.after_native_delete(surface);
            }
            Key::Delete => {
                self.guard.on_key_down(DeleteKind::Forward, &*surface);
                surface.delete_forward();
                self.guard.after_native_delete(surface);
            }
            Key::Unidentified => {
                // Treated as backspace, but only when the caret borders a
                // cluster; anything else is left to the host.
                self.guard.on_key_down(DeleteKind::Unidentified, &*surface);
                if !self.guard.is_pending() {
                    return;
                }
                surface.delete_backward();
                self.guard.after_native_delete(surface);
            }
            Key::Other => return,
        }
        self.finish_edit();
    }

    /// The surface content changed natively (host typing, IME commit).
    /// Re-syncs the display, which is where live shortcode conversion
    /// happens, and reports the new value.
    pub fn on_input(&mut self) {
        self.finish_edit();
    }

    pub fn on_paste(&mut self, text: &str) {
        if self.options.disabled {
            return;
        }
        self.insert_internal(text, false);
    }

    pub fn on_drop(&mut self, text: &str) {
        if self.options.disabled {
            return;
        }
        self.insert_internal(text, false);
    }

    pub fn on_focus(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.focus();
        }
    }

    /// Blur saves the selection so a later picker insertion can land where
    /// the caret was.
    pub fn on_blur(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            self.saved_selection = Some(surface_snapshot(&*surface, false));
            surface.blur();
        }
    }

    /// The emoji picker popup opened or closed. Opening steals focus, so
    /// the selection is saved up front.
    pub fn on_popup_visibility_change(&mut self, visible: bool) {
        if visible {
            if let Some(surface) = self.surface.as_ref() {
                self.saved_selection = Some(surface_snapshot(surface, false));
            }
        }
    }

    /// An emoji was chosen from the picker. Inserts at the saved selection
    /// and, on non-touch hosts, returns focus to the field.
    pub fn on_emoji_selected(&mut self, unicode: &str) {
        if self.options.disabled {
            return;
        }
        self.insert_internal(unicode, true);
        if !self.options.touch {
            if let Some(surface) = self.surface.as_mut() {
                surface.focus();
            }
        }
    }

    pub fn on_resize(&mut self, width: f32) {
        if self.last_width == Some(width) {
            return;
        }
        log::debug!(target: "field", "resized to {width}");
        self.last_width = Some(width);
    }

    // --- Imperative API ---

    /// Insert text at the caret, converting shortcodes on the way in.
    pub fn insert_text_at_cursor_position(&mut self, text: &str) {
        self.insert_internal(text, false);
    }

    /// Replace the first occurrence of `search` with `paste`. Returns
    /// `false` when `search` does not occur or no surface is attached.
    pub fn replace_text(&mut self, search: &str, paste: &str) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        if replace_text(surface, &self.dictionary, search, paste).is_none() {
            return false;
        }
        self.finish_edit();
        true
    }

    pub fn focus(&mut self) {
        self.on_focus();
    }

    pub fn blur(&mut self) {
        self.on_blur();
    }

    /// Merge delivered shortname entries into the dictionary and re-sync,
    /// converting any literal tokens the field could not resolve before.
    pub fn apply_dictionary_update(&mut self, entries: Vec<EmojiEntry>) {
        self.dictionary.extend(entries);
        self.finish_edit();
    }

    /// Drain a loader into the dictionary, one
    /// [`apply_dictionary_update`](Self::apply_dictionary_update) per
    /// delivered batch.
    pub fn load_shortnames(&mut self, loader: &mut dyn ShortnameLoader) {
        let mut batches = Vec::new();
        loader.load(&mut |entries| batches.push(entries));
        for entries in batches {
            self.apply_dictionary_update(entries);
        }
    }

    // --- Progress indication ---

    /// Start (or restart) the determinate progress indicator.
    pub fn start_progress(&mut self, duration_secs: f32) {
        if duration_secs <= 0.0 {
            self.progress = None;
            return;
        }
        self.progress = Some(Progress {
            duration_secs,
            started: Instant::now(),
        });
    }

    pub fn stop_progress(&mut self) {
        self.progress = None;
    }

    pub fn progress_active(&self) -> bool {
        self.progress.is_some()
    }

    /// Elapsed fraction in `[0, 1]`, or `None` when no progress runs.
    pub fn progress_fraction(&self) -> Option<f32> {
        self.progress
            .as_ref()
            .map(|p| (p.started.elapsed().as_secs_f32() / p.duration_secs).min(1.0))
    }

    // --- Internals ---

    fn insert_internal(&mut self, text: &str, use_saved: bool) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let saved = if use_saved {
            self.saved_selection.take()
        } else {
            None
        };
        insert_at_cursor(surface, &self.dictionary, text, saved.as_ref());
        self.finish_edit();
    }

    /// Resync the display from its own plain text, re-derive the value,
    /// and fire the change listener once if it moved.
    fn finish_edit(&mut self) {
        let next = {
            let Some(surface) = self.surface.as_mut() else {
                return;
            };
            let plain = to_plain_text(surface.fragment());
            sync_display(surface, &self.dictionary, &plain);
            to_plain_text(surface.fragment())
        };
        if next == self.value {
            return;
        }
        self.value = next;
        if let Some(listener) = self.on_change.as_mut() {
            listener(&self.value);
        }
    }
}

impl<S: EditSurface> Default for EmojiField<S> {
    fn default() -> Self {
        Self::new(FieldOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::BufferSurface;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn field() -> EmojiField<BufferSurface> {
        let mut field = EmojiField::default();
        field.attach_surface(BufferSurface::new());
        field
    }

    #[test]
    fn key_names_map_to_classes() {
        assert_eq!(Key::from_name("Backspace"), Key::Backspace);
        assert_eq!(Key::from_name("Delete"), Key::Delete);
        assert_eq!(Key::from_name("Unidentified"), Key::Unidentified);
        assert_eq!(Key::from_name("ArrowLeft"), Key::Other);
    }

    #[test]
    fn typing_builds_the_value() {
        let mut field = field();
        for c in "hi".chars() {
            field.on_char(c);
        }
        assert_eq!(field.value(), "hi");
    }

    #[test]
    fn set_value_does_not_fire_the_listener() {
        let fired = Rc::new(RefCell::new(0));
        let counter = fired.clone();
        let mut field = field();
        field.set_change_listener(move |_| *counter.borrow_mut() += 1);

        field.set_value("hello :smile:");
        assert_eq!(field.value(), "hello \u{1F604}");
        assert_eq!(*fired.borrow(), 0);
    }

    #[test]
    fn listener_fires_once_per_edit_with_the_new_value() {
        let seen: Rc<RefCell<Vec<String>>> = Rc::default();
        let sink = seen.clone();
        let mut field = field();
        field.set_change_listener(move |v| sink.borrow_mut().push(v.to_string()));

        field.on_paste("ab");
        field.on_paste(" :fire:");
        assert_eq!(
            seen.borrow().as_slice(),
            ["ab".to_string(), "ab \u{1F525}".to_string()]
        );
    }

    #[test]
    fn disabled_field_ignores_user_input() {
        let fired = Rc::new(RefCell::new(0));
        let counter = fired.clone();
        let mut field = field();
        field.set_value("keep");
        field.set_change_listener(move |_| *counter.borrow_mut() += 1);
        field.set_disabled(true);

        field.on_char('x');
        field.on_paste("nope");
        field.on_drop("nope");
        field.on_key_down(Key::Backspace);
        field.on_emoji_selected("\u{1F604}");

        assert_eq!(field.value(), "keep");
        assert_eq!(*fired.borrow(), 0);
        assert!(field.is_disabled());
    }

    #[test]
    fn no_surface_means_every_event_is_a_no_op() {
        let mut field: EmojiField<BufferSurface> = EmojiField::default();
        field.on_char('x');
        field.on_key_down(Key::Backspace);
        field.on_blur();
        assert!(!field.replace_text("a", "b"));
        assert_eq!(field.value(), "");
    }

    #[test]
    fn value_survives_reattachment() {
        let mut field = field();
        field.on_paste("hi :rocket:");
        let value = field.value().to_string();

        field.detach_surface();
        field.on_char('x'); // dropped, no surface
        assert_eq!(field.value(), value);

        field.attach_surface(BufferSurface::new());
        assert_eq!(field.value(), value);
    }

    #[test]
    fn picker_insertion_uses_the_saved_selection() {
        let mut field = field();
        field.on_paste("ab");
        // Caret sits at the end; move it between 'a' and 'b', then lose
        // focus to the popup.
        field.saved_selection = None;
        if let Some(surface) = field.surface_mut() {
            let pos = crate::selection::position_at(surface.fragment(), 1);
            surface.set_selection(crate::selection::NativeSelection::collapsed(pos));
        }
        field.on_popup_visibility_change(true);
        field.on_emoji_selected("\u{1F604}");

        assert_eq!(field.value(), "a\u{1F604}b");
        assert!(field.surface().is_some_and(|s| s.is_focused()));
    }

    #[test]
    fn touch_hosts_do_not_refocus_after_picker() {
        let mut field: EmojiField<BufferSurface> = EmojiField::new(FieldOptions {
            touch: true,
            ..FieldOptions::default()
        });
        field.attach_surface(BufferSurface::new());
        field.on_emoji_selected("\u{1F604}");
        assert_eq!(field.value(), "\u{1F604}");
        assert!(field.surface().is_some_and(|s| !s.is_focused()));
    }

    #[test]
    fn dictionary_update_converts_stranded_tokens() {
        let seen: Rc<RefCell<Vec<String>>> = Rc::default();
        let sink = seen.clone();
        let mut field = field();
        field.set_value("a :custom: b");
        field.set_change_listener(move |v| sink.borrow_mut().push(v.to_string()));
        assert_eq!(field.value(), "a :custom: b");

        field.apply_dictionary_update(vec![EmojiEntry {
            shortname: "custom".to_string(),
            unicode: "\u{1F916}".to_string(),
        }]);
        assert_eq!(field.value(), "a \u{1F916} b");
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn progress_lifecycle() {
        let mut field = field();
        assert!(!field.progress_active());
        assert_eq!(field.progress_fraction(), None);

        field.start_progress(60.0);
        assert!(field.progress_active());
        let f = field.progress_fraction().unwrap();
        assert!((0.0..=1.0).contains(&f));

        field.stop_progress();
        assert!(!field.progress_active());

        field.start_progress(0.0); // degenerate duration never runs
        assert!(!field.progress_active());
    }

    #[test]
    fn placeholder_tracks_emptiness() {
        let mut field: EmojiField<BufferSurface> = EmojiField::new(FieldOptions {
            placeholder: "type here".to_string(),
            ..FieldOptions::default()
        });
        field.attach_surface(BufferSurface::new());
        assert!(field.placeholder_visible());
        assert_eq!(field.placeholder(), "type here");
        field.on_char('x');
        assert!(!field.placeholder_visible());
    }
}
