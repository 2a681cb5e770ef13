#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{
        parse_px, next_tab_id, EventLog, EventSink, EventTarget, LayoutChangeCounter,
        LayoutPersistence, PanelEvent, SizeValue, SplitDirection, Axis, Tab, Timer, TimerQueue,
    };

    // ── SizeValue parsing ───────────────────────

    #[test]
    fn parse_px_accepts_leading_number() {
        assert_eq!(parse_px("150"), Some(150.0));
        assert_eq!(parse_px("150px"), Some(150.0));
        assert_eq!(parse_px("  42.5 "), Some(42.5));
        assert_eq!(parse_px("-3"), Some(-3.0));
        assert_eq!(parse_px("7."), Some(7.0));
    }

    #[test]
    fn parse_px_rejects_non_numeric() {
        assert_eq!(parse_px("auto"), None);
        assert_eq!(parse_px(""), None);
        assert_eq!(parse_px("px"), None);
        assert_eq!(parse_px("-"), None);
        assert_eq!(parse_px(".px"), None);
    }

    #[test]
    fn size_value_from_str() {
        assert_eq!("auto".parse::<SizeValue>(), Ok(SizeValue::Auto));
        assert_eq!(" AUTO".parse::<SizeValue>(), Ok(SizeValue::Auto));
        assert_eq!("300px".parse::<SizeValue>(), Ok(SizeValue::Px(300.0)));
        assert!("wide".parse::<SizeValue>().is_err());
    }

    #[test]
    fn size_value_display() {
        assert_eq!(SizeValue::Px(200.0).to_string(), "200px");
        assert_eq!(SizeValue::Auto.to_string(), "auto");
    }

    #[test]
    fn size_value_serde_accepts_number_or_keyword() {
        let v: SizeValue = serde_json::from_str("120").unwrap();
        assert_eq!(v, SizeValue::Px(120.0));
        let v: SizeValue = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(v, SizeValue::Auto);
        assert!(serde_json::from_str::<SizeValue>("\"tall\"").is_err());
        assert_eq!(serde_json::to_string(&SizeValue::Auto).unwrap(), "\"auto\"");
    }

    // ── Misc value types ────────────────────────

    #[test]
    fn split_direction_row_and_axis() {
        assert!(SplitDirection::Horizontal.is_row());
        assert!(!SplitDirection::Vertical.is_row());
        assert_eq!(SplitDirection::Horizontal.main_axis(), Axis::Width);
        assert_eq!(SplitDirection::Vertical.main_axis(), Axis::Height);
    }

    #[test]
    fn tab_ids_are_unique() {
        let a = Tab::new("a");
        let b = Tab::new("b");
        assert_ne!(a.id, b.id);
        assert!(next_tab_id() > b.id);
        assert_eq!(a.origin, None);
    }

    // ── Collaborators ───────────────────────────

    #[test]
    fn event_log_records_in_order() {
        let log = EventLog::new();
        log.fire(EventTarget::Frame(1), PanelEvent::PanelHide);
        log.fire(EventTarget::Frame(2), PanelEvent::PanelShow);
        assert_eq!(log.count(EventTarget::Frame(1), PanelEvent::PanelHide), 1);
        assert_eq!(
            log.take(),
            vec![
                (EventTarget::Frame(1), PanelEvent::PanelHide),
                (EventTarget::Frame(2), PanelEvent::PanelShow),
            ]
        );
        assert!(log.events().is_empty());
    }

    #[test]
    fn layout_counter_tracks_dirty_flag() {
        let counter = LayoutChangeCounter::new();
        assert!(!counter.take_dirty());
        counter.layout_changed();
        counter.layout_changed();
        assert_eq!(counter.count(), 2);
        assert!(counter.take_dirty());
        assert!(!counter.take_dirty());
    }

    #[test]
    fn timer_queue_fires_due_tokens_in_order() {
        let timer = TimerQueue::new();
        timer.schedule(Duration::from_millis(5), 10);
        timer.schedule(Duration::from_millis(1), 20);
        timer.schedule(Duration::from_millis(1), 30);

        assert!(timer.advance(Duration::ZERO).is_empty());
        assert_eq!(timer.advance(Duration::from_millis(1)), vec![20, 30]);
        assert_eq!(timer.pending(), 1);
        assert_eq!(timer.advance(Duration::from_millis(10)), vec![10]);
        assert_eq!(timer.now(), Duration::from_millis(11));
    }
}
