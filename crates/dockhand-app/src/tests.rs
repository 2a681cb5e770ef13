#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use dockhand_core::{DockContainer, Frame};
    use dockhand_layout::PanelSettings;

    use crate::parse_args;
    use crate::session::{load_session, Command, Session};
    use crate::workspace::Workspace;

    const SESSION: &str = r#"{
        "layout": { "Split": {
            "direction": "horizontal",
            "ratio": 0.5,
            "first": { "Panel": { "id": 1 } },
            "second": { "Panel": { "id": 2 } }
        } },
        "panels": [
            { "id": 1, "frames": [
                { "id": 10, "name": "editor", "width": 300, "height": 400 },
                { "id": 11, "name": "logs", "width": 100, "height": 100 },
                { "id": 12, "name": "shell", "width": 100, "height": 100 }
            ] },
            { "id": 2, "frames": [
                { "id": 20, "name": "outline", "min_width": "250" }
            ] }
        ]
    }"#;

    fn workspace() -> Workspace {
        let session: Session = serde_json::from_str(SESSION).unwrap();
        Workspace::from_session(&session, &PanelSettings::default()).unwrap()
    }

    fn command(json: &str) -> Command {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_arguments() {
        let args: Vec<String> = ["--settings", "s.json", "session.json"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let parsed = parse_args(&args).unwrap();
        assert_eq!(parsed.settings, Some(PathBuf::from("s.json")));
        assert_eq!(parsed.session, PathBuf::from("session.json"));

        assert!(parse_args(&[]).is_none());
        assert!(parse_args(&["--settings".to_string()]).is_none());
        assert!(parse_args(&["a".to_string(), "b".to_string()]).is_none());
    }

    #[test]
    fn builds_panels_from_session() {
        let ws = workspace();
        assert_eq!(ws.tree.panel_ids(), vec![1, 2]);

        let editor = &ws.panels[&1];
        assert_eq!(editor.tab_count(), 3);
        assert_eq!(editor.active_index(), Some(0));
        assert_eq!(editor.frames().filter(|f| f.is_visible()).count(), 1);

        let outline = &ws.panels[&2];
        assert_eq!(outline.style().min_width.px(), Some(250.0));
    }

    #[test]
    fn unknown_direction_is_rejected() {
        let session: Session = serde_json::from_str(
            r#"{ "layout": { "Split": {
                "direction": "diagonal", "ratio": 0.5,
                "first": { "Panel": { "id": 1 } },
                "second": { "Panel": { "id": 2 } }
            } } }"#,
        )
        .unwrap();
        assert!(Workspace::from_session(&session, &PanelSettings::default()).is_none());
    }

    #[test]
    fn key_commands_cycle_tabs() {
        let mut ws = workspace();
        ws.apply(&command(r#"{ "op": "key", "panel": 1, "key": "tab", "ctrl": true }"#));
        assert_eq!(ws.panels[&1].active_index(), Some(1));

        ws.apply(&command(
            r#"{ "op": "key", "panel": 1, "key": "tab", "ctrl": true, "shift": true }"#,
        ));
        ws.apply(&command(
            r#"{ "op": "key", "panel": 1, "key": "tab", "ctrl": true, "shift": true }"#,
        ));
        assert_eq!(ws.panels[&1].active_index(), Some(2));
    }

    #[test]
    fn moving_last_frame_collapses_source() {
        let mut ws = workspace();
        ws.apply(&command(r#"{ "op": "move_frame", "frame": 20, "from": 2, "to": 1 }"#));

        assert_eq!(ws.tree.panel_ids(), vec![1]);
        assert!(!ws.panels.contains_key(&2));

        let panel = &ws.panels[&1];
        assert_eq!(panel.tab_count(), 4);
        assert_eq!(panel.active_frame().map(|f| f.id), Some(20));
        assert!(panel.frame(20).unwrap().visible);
        assert!(!panel.frame(10).unwrap().visible);
    }

    #[test]
    fn moving_within_panel_reorders() {
        let mut ws = workspace();
        ws.apply(&command(
            r#"{ "op": "move_frame", "frame": 12, "from": 1, "to": 1, "before": 10 }"#,
        ));
        let order: Vec<u64> = ws.panels[&1].frames().map(|f| f.id).collect();
        assert_eq!(order, [12, 10, 11]);
    }

    #[test]
    fn closing_last_frame_prunes_panel() {
        let mut ws = workspace();
        ws.apply(&command(r#"{ "op": "close_frame", "panel": 2, "frame": 20 }"#));
        assert_eq!(ws.tree.panel_ids(), vec![1]);
        assert!(!ws.panels.contains_key(&2));
        assert!(ws.render().starts_with("1 panel(s)"));
    }

    #[test]
    fn focus_out_settles_after_wait() {
        let mut ws = workspace();
        ws.apply(&command(r#"{ "op": "focus_in", "panel": 1 }"#));
        ws.apply(&command(r#"{ "op": "focus_out", "panel": 1 }"#));
        ws.apply(&command(r#"{ "op": "wait", "ms": 0 }"#));
        assert!(ws.panels[&1].focused());

        ws.apply(&command(r#"{ "op": "wait", "ms": 1 }"#));
        assert!(!ws.panels[&1].focused());
    }

    #[test]
    fn split_docks_new_panel() {
        let mut ws = workspace();
        ws.apply(&command(
            r#"{ "op": "split", "target": 1, "panel": 3, "direction": "vertical",
                 "frames": [{ "id": 30, "name": "terminal" }] }"#,
        ));
        assert_eq!(ws.tree.panel_ids(), vec![1, 3, 2]);
        assert!(!ws.tree.is_row(3));
        assert_eq!(ws.panels[&3].active_index(), Some(0));

        ws.apply(&command(
            r#"{ "op": "split", "target": 2, "panel": 3, "direction": "vertical" }"#,
        ));
        assert_eq!(ws.tree.panel_ids(), vec![1, 3, 2]);
    }

    #[test]
    fn render_lists_tabs() {
        let mut ws = workspace();
        ws.apply(&command(r#"{ "op": "mark_out_of_date", "panel": 1, "frame": 11 }"#));
        let text = ws.render();
        assert!(text.contains("panel 1 [row] 300px x 400px"));
        assert!(text.contains("* 0 editor"));
        assert!(text.contains("1 logs (hidden) (out of date)"));
    }

    #[test]
    fn session_file_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        assert!(load_session(&path).is_none());

        std::fs::write(&path, SESSION).unwrap();
        let session = load_session(&path).unwrap();
        assert_eq!(session.panels.len(), 2);
        assert!(session.commands.is_empty());

        std::fs::write(&path, "[]").unwrap();
        assert!(load_session(&path).is_none());
    }
}
