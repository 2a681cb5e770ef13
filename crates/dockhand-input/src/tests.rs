#[cfg(test)]
mod tests {
    use crate::{Hotkey, KeybindingMap, KeybindingOverride, PanelHotkey};
    use dockhand_core::{Key, Modifiers};

    fn ctrl() -> Modifiers {
        Modifiers {
            ctrl: true,
            ..Default::default()
        }
    }

    fn ctrl_shift() -> Modifiers {
        Modifiers {
            ctrl: true,
            shift: true,
            ..Default::default()
        }
    }

    fn meta_shift() -> Modifiers {
        Modifiers {
            meta: true,
            shift: true,
            ..Default::default()
        }
    }

    // ── Default bindings ────────────────────────

    #[test]
    fn ctrl_tab_is_next() {
        let map = KeybindingMap::new();
        assert_eq!(map.match_key(Key::Tab, ctrl()), Some(PanelHotkey::NextTab));
    }

    #[test]
    fn ctrl_shift_tab_is_prev_not_next() {
        let map = KeybindingMap::new();
        assert_eq!(
            map.match_key(Key::Tab, ctrl_shift()),
            Some(PanelHotkey::PrevTab)
        );
    }

    #[test]
    fn meta_shift_brackets_cycle() {
        let map = KeybindingMap::new();
        assert_eq!(
            map.match_key(Key::Char(']'), meta_shift()),
            Some(PanelHotkey::NextTab)
        );
        assert_eq!(
            map.match_key(Key::Char('}'), meta_shift()),
            Some(PanelHotkey::NextTab)
        );
        assert_eq!(
            map.match_key(Key::Char('{'), meta_shift()),
            Some(PanelHotkey::PrevTab)
        );
    }

    #[test]
    fn plain_keys_do_not_match() {
        let map = KeybindingMap::new();
        assert_eq!(map.match_key(Key::Tab, Modifiers::default()), None);
        assert_eq!(map.match_key(Key::Char(']'), Modifiers::default()), None);
        assert_eq!(
            map.match_key(
                Key::Tab,
                Modifiers {
                    ctrl: true,
                    alt: true,
                    ..Default::default()
                }
            ),
            None
        );
    }

    // ── Names ───────────────────────────────────

    #[test]
    fn key_names_round_trip_through_settings_form() {
        for name in ["tab", "]", "a", "f5", "pagedown"] {
            let key = Hotkey::key_from_name(name).unwrap();
            let hotkey = Hotkey::new(key, false, false, false, false);
            assert_eq!(hotkey.key_name(), name);
        }
        assert_eq!(Hotkey::key_from_name("TAB"), Some(Key::Tab));
        assert_eq!(Hotkey::key_from_name("nope"), None);
        assert_eq!(Hotkey::key_from_name(""), None);
    }

    #[test]
    fn action_keys() {
        for action in PanelHotkey::all_actions() {
            assert_eq!(PanelHotkey::from_action_key(action.action_key()), Some(action));
        }
        assert_eq!(PanelHotkey::from_action_key("close"), None);
    }

    // ── Overrides ───────────────────────────────

    #[test]
    fn override_replaces_defaults_for_that_action_only() {
        let entries = vec![KeybindingOverride {
            action: "next_tab".into(),
            key: "right".into(),
            shift: false,
            ctrl: false,
            meta: false,
            alt: true,
        }];
        let map = KeybindingMap::from_settings(&entries);
        let alt = Modifiers {
            alt: true,
            ..Default::default()
        };

        assert_eq!(map.match_key(Key::Right, alt), Some(PanelHotkey::NextTab));
        assert_eq!(map.match_key(Key::Tab, ctrl()), None);
        assert_eq!(
            map.match_key(Key::Tab, ctrl_shift()),
            Some(PanelHotkey::PrevTab)
        );
    }

    #[test]
    fn unresolvable_overrides_are_skipped() {
        let entries = vec![
            KeybindingOverride {
                action: "explode".into(),
                key: "x".into(),
                shift: false,
                ctrl: true,
                meta: false,
                alt: false,
            },
            KeybindingOverride {
                action: "prev_tab".into(),
                key: "not-a-key".into(),
                shift: false,
                ctrl: true,
                meta: false,
                alt: false,
            },
        ];
        assert_eq!(KeybindingMap::from_settings(&entries), KeybindingMap::new());
    }

    #[test]
    fn override_serde_defaults_modifiers() {
        let entry: KeybindingOverride =
            serde_json::from_str(r#"{"action":"prev_tab","key":"left","alt":true}"#).unwrap();
        assert!(entry.alt);
        assert!(!entry.ctrl);
        let (hotkey, action) = entry.to_binding().unwrap();
        assert_eq!(action, PanelHotkey::PrevTab);
        assert_eq!(KeybindingOverride::from_binding(&hotkey, &action), entry);
    }

    #[test]
    fn hotkey_for_returns_first_binding() {
        let map = KeybindingMap::new();
        let hotkey = map.hotkey_for(&PanelHotkey::NextTab).unwrap();
        assert_eq!(hotkey.key, Key::Char(']'));
        assert!(hotkey.meta && hotkey.shift);
    }
}
