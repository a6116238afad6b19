use super::*;
use crate::keybindings::KeyBindings;
use folio_ui::Key;

#[test]
fn test_navigation_is_cyclic_both_ways() {
    for n in 2..=7 {
        let urls: Vec<String> = (0..n).map(|i| format!("img{}.png", i)).collect();
        let refs: Vec<&str> = urls.iter().map(String::as_str).collect();

        for start in [0, n - 1, n / 2] {
            for direction in [Direction::Next, Direction::Previous] {
                let mut c = controller();
                c.select_project(&project("Cycle", &refs));
                c.load_image(start);

                for _ in 0..n {
                    c.navigate(direction);
                }
                assert_eq!(
                    c.session().current_index(),
                    start,
                    "n={} start={} {:?}",
                    n,
                    start,
                    direction
                );
            }
        }
    }
}

#[test]
fn test_navigate_wraps_at_edges() {
    let mut c = controller();
    c.select_project(&project("P", &["a.png", "b.png", "c.png"]));

    c.navigate(Direction::Previous);
    assert_eq!(c.session().current_index(), 2);
    assert_eq!(last_request(&c).1, "c.png");

    c.navigate(Direction::Next);
    assert_eq!(c.session().current_index(), 0);
    assert_eq!(last_request(&c).1, "a.png");
}

#[test]
fn test_navigate_single_or_empty_is_noop() {
    let mut c = controller();
    c.select_project(&project("One", &["only.png"]));
    let requests = c.loader().requests.len();

    assert!(c.navigate(Direction::Next).is_none());
    assert!(c.navigate(Direction::Previous).is_none());
    assert_eq!(c.loader().requests.len(), requests);
    assert_eq!(c.session().current_index(), 0);

    c.select_project(&project("None", &[]));
    assert!(c.navigate(Direction::Next).is_none());
    assert!(c.loader().requests.len() == requests);
}

#[test]
fn test_arrow_right_twice_shows_third_image() {
    let keys = KeyBindings::default();
    let mut c = controller();
    c.select_project(&project("Three", &["1.png", "2.png", "3.png"]));
    finish_latest(&mut c);

    for _ in 0..2 {
        let action = keys.action_for_key(Key::Right).unwrap();
        c.apply_action(action);
        finish_latest(&mut c);
    }

    assert_eq!(c.session().current_index(), 2);
    assert_eq!(c.session().displayed_image(), "3.png");
    assert_eq!(c.session().displayed_image(), c.session().images()[2]);
    assert!(!c.session().is_loading());
}

#[test]
fn test_arrow_keys_ignored_while_closed() {
    let keys = KeyBindings::default();
    let mut c = controller();
    c.select_project(&project("P", &["a.png", "b.png"]));
    assert!(c.close());
    assert!(!c.close());
    let requests = c.loader().requests.len();

    assert!(!c.apply_action(keys.action_for_key(Key::Right).unwrap()));
    assert!(!c.apply_action(keys.action_for_key(Key::Left).unwrap()));

    assert_eq!(c.loader().requests.len(), requests);
    assert_eq!(c.session().current_index(), 0);
}

#[test]
fn test_escape_closes() {
    let keys = KeyBindings::default();
    let mut c = controller();
    c.select_project(&project("P", &["a.png"]));
    assert!(c.session().is_visible());

    assert!(c.apply_action(keys.action_for_key(Key::Escape).unwrap()));
    assert!(!c.session().is_visible());
    assert!(!c.session().scroll_locked());
}
