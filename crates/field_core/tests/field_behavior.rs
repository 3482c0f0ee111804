//! End-to-end behavior of the field over the in-memory surface.

use field_core::{
    BufferSurface, EditSurface, EmojiField, Key, NativeSelection, NodePosition, SelectionSnapshot,
    position_at, snapshot,
};
use markup::{flattened_len, serialize, to_markup, to_plain_text};
use std::cell::RefCell;
use std::rc::Rc;

fn field_with(value: &str) -> EmojiField<BufferSurface> {
    let mut field = EmojiField::default();
    field.attach_surface(BufferSurface::new());
    field.set_value(value);
    field
}

fn caret_of(field: &EmojiField<BufferSurface>) -> SelectionSnapshot {
    let surface = field.surface().unwrap();
    snapshot(surface.fragment(), &surface.selection(), false)
}

fn place_caret(field: &mut EmojiField<BufferSurface>, at: usize) {
    let surface = field.surface_mut().unwrap();
    let pos = position_at(surface.fragment(), at);
    surface.set_selection(NativeSelection::collapsed(pos));
}

#[test]
fn display_round_trip_is_idempotent() {
    let dict = emoji::EmojiDictionary::with_builtin();
    for text in [
        "plain",
        "nice :smile: day",
        "\u{1F680} liftoff",
        "mixed :fire: and raw \u{1F604}",
        "",
    ] {
        let fragment = to_markup(text, &dict);
        let again = to_markup(&to_plain_text(&fragment), &dict);
        assert_eq!(again, fragment, "input {text:?}");
    }
}

#[test]
fn shortcode_conversion_via_the_field() {
    let field = field_with("nice :smile: day");
    assert_eq!(field.value(), "nice \u{1F604} day");
}

#[test]
fn insertion_lands_at_the_caret() {
    let mut field = field_with("abcdef");
    place_caret(&mut field, 3);
    field.insert_text_at_cursor_position("hello");

    assert_eq!(field.value(), "abchellodef");
    assert_eq!(caret_of(&field), SelectionSnapshot::collapsed(8));
}

#[test]
fn one_backspace_removes_a_whole_cluster() {
    let mut field = field_with("hi :rocket:");
    assert_eq!(field.value(), "hi \u{1F680}");
    let surface_len = flattened_len(field.surface().unwrap().fragment());
    place_caret(&mut field, 4); // just after the emoji

    field.on_key_down(Key::Backspace);

    assert_eq!(field.value(), "hi ");
    let after = flattened_len(field.surface().unwrap().fragment());
    assert_eq!(after, surface_len - 1);
    assert_eq!(caret_of(&field), SelectionSnapshot::collapsed(3));
}

#[test]
fn one_forward_delete_removes_a_whole_cluster() {
    let mut field = field_with(":heart: you");
    assert_eq!(field.value(), "\u{2764}\u{FE0F} you");
    place_caret(&mut field, 0);

    field.on_key_down(Key::Delete);

    assert_eq!(field.value(), " you");
    assert_eq!(caret_of(&field), SelectionSnapshot::collapsed(0));
}

#[test]
fn backspace_with_selection_inside_a_wide_cluster() {
    // A host may report an endpoint inside the rendered unit (node offset
    // 1 of a 5-char ZWJ family). That clamps to the cluster's start
    // boundary; one backspace still removes the whole cluster.
    let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
    let mut field = field_with(&format!("{family}x"));
    {
        let surface = field.surface_mut().unwrap();
        surface.set_selection(NativeSelection::collapsed(NodePosition {
            node: 1,
            offset: 1,
        }));
    }

    field.on_key_down(Key::Backspace);

    assert_eq!(field.value(), "x");
    assert_eq!(caret_of(&field), SelectionSnapshot::collapsed(0));
}

#[test]
fn selection_survives_a_display_resync() {
    // The value change that triggers conversion happens natively; the
    // caret was after the token and must end up after the emoji.
    let mut field = field_with("");
    {
        let dict = emoji::EmojiDictionary::new(); // no conversion yet
        let surface = field.surface_mut().unwrap();
        surface.set_fragment(to_markup("hey :smile:!", &dict));
        let pos = position_at(surface.fragment(), 12);
        surface.set_selection(NativeSelection::collapsed(pos));
    }
    field.on_input();

    assert_eq!(field.value(), "hey \u{1F604}!");
    assert_eq!(caret_of(&field), SelectionSnapshot::collapsed(6));
}

#[test]
fn markup_special_characters_stay_literal() {
    let field = field_with("<b>test</b>");
    assert_eq!(field.value(), "<b>test</b>");

    let serialized = serialize(field.surface().unwrap().fragment());
    assert_eq!(serialized, "&lt;b&gt;test&lt;/b&gt;");
}

#[test]
fn disabled_field_is_inert_and_silent() {
    let fired = Rc::new(RefCell::new(0));
    let counter = fired.clone();
    let mut field = field_with("before");
    field.set_change_listener(move |_| *counter.borrow_mut() += 1);
    field.set_disabled(true);

    field.on_paste("after");
    field.on_char('!');
    field.on_key_down(Key::Backspace);

    assert_eq!(field.value(), "before");
    assert_eq!(*fired.borrow(), 0);
}

#[test]
fn paste_with_shortcodes_converts_inline() {
    let mut field = field_with("go");
    place_caret(&mut field, 2);
    field.on_paste(" :rocket: go");
    assert_eq!(field.value(), "go \u{1F680} go");
}

#[test]
fn replace_positions_the_caret_after_the_replacement() {
    let mut field = field_with("hello world");
    assert!(field.replace_text("world", ":smile:"));
    assert_eq!(field.value(), "hello \u{1F604}");
    assert_eq!(caret_of(&field), SelectionSnapshot::collapsed(7));
    assert!(!field.replace_text("absent", "x"));
}

#[test]
fn loader_entries_enable_future_conversions() {
    let mut field = field_with("soon :shrug:");
    assert_eq!(field.value(), "soon :shrug:");

    let mut loader = emoji::StaticLoader::new(vec![emoji::EmojiEntry {
        shortname: "shrug".to_string(),
        unicode: "\u{1F937}".to_string(),
    }]);
    field.load_shortnames(&mut loader);

    assert_eq!(field.value(), "soon \u{1F937}");
}
