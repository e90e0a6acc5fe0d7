//! Navigation controller behaviour against the headless host

mod support;

use loupe_ui::{DomHost, Gallery, Lightbox, LightboxConfig, LightboxState, MemoryHost};
use support::{gallery_page, tracing_init};

const DIALOG: &str = "[role=dialog]";

fn widget(urls: &[&str]) -> (MemoryHost, Lightbox<MemoryHost>) {
    let host = MemoryHost::new();
    let lightbox = Lightbox::new(
        host.clone(),
        Gallery::from_urls(urls.iter().copied()),
        LightboxConfig::default(),
    )
    .unwrap();
    (host, lightbox)
}

#[test]
fn test_open_displays_item_for_every_index() {
    tracing_init();
    for len in 1..=6 {
        let urls: Vec<String> = (0..len).map(|i| format!("photo-{i}.jpg")).collect();
        let refs: Vec<&str> = urls.iter().map(String::as_str).collect();
        let (host, lightbox) = widget(&refs);

        for (index, url) in urls.iter().enumerate() {
            lightbox.open(index).unwrap();
            assert_eq!(lightbox.displayed_url().as_deref(), Some(url.as_str()));
            assert_eq!(lightbox.state(), LightboxState::Open(index));
            assert_eq!(host.count(DIALOG), 1);
        }
    }
}

#[test]
fn test_next_at_last_is_noop() {
    tracing_init();
    let (_host, lightbox) = widget(&["a.jpg", "b.jpg", "c.jpg"]);
    lightbox.open(2).unwrap();

    assert!(!lightbox.next());
    assert_eq!(lightbox.cursor(), Some(2));
    assert_eq!(lightbox.displayed_url().as_deref(), Some("c.jpg"));
}

#[test]
fn test_previous_at_first_is_noop() {
    tracing_init();
    let (_host, lightbox) = widget(&["a.jpg", "b.jpg", "c.jpg"]);
    lightbox.open(0).unwrap();

    assert!(!lightbox.previous());
    assert_eq!(lightbox.cursor(), Some(0));
    assert_eq!(lightbox.displayed_url().as_deref(), Some("a.jpg"));
}

#[test]
fn test_navigation_while_closed_is_noop() {
    tracing_init();
    let (host, lightbox) = widget(&["a.jpg", "b.jpg"]);

    assert!(!lightbox.next());
    assert!(!lightbox.previous());
    assert!(!lightbox.close());
    assert_eq!(lightbox.state(), LightboxState::Closed);
    assert_eq!(host.count(DIALOG), 0);
}

#[test]
fn test_close_twice_is_idempotent() {
    tracing_init();
    let (host, lightbox) = widget(&["a.jpg", "b.jpg"]);
    lightbox.open(1).unwrap();
    host.advance(10);

    assert!(lightbox.close());
    let root = lightbox.overlay().unwrap().root;
    assert!(host.has_class(&root, "fade-out"));
    assert_eq!(host.style(&root, "opacity").as_deref(), Some("0"));
    assert_eq!(host.pending_timers(), 1);

    assert!(!lightbox.close());
    assert_eq!(host.pending_timers(), 1);
    assert_eq!(lightbox.cursor(), None);

    host.advance(300);
    assert_eq!(host.count(DIALOG), 0);
    assert!(!lightbox.close());
    assert_eq!(host.count(DIALOG), 0);
}

#[test]
fn test_overlay_stays_until_transition_ends() {
    tracing_init();
    let (host, lightbox) = widget(&["a.jpg"]);
    lightbox.open(0).unwrap();
    host.advance(10);
    lightbox.close();

    host.advance(299);
    assert_eq!(host.count(DIALOG), 1);
    host.advance(1);
    assert_eq!(host.count(DIALOG), 0);
    assert!(lightbox.overlay().is_none());
}

#[test]
fn test_open_while_open_replaces_overlay() {
    tracing_init();
    let (host, lightbox) = widget(&["a.jpg", "b.jpg", "c.jpg"]);
    lightbox.open(0).unwrap();
    let first = lightbox.overlay().unwrap().root;

    lightbox.open(2).unwrap();
    let second = lightbox.overlay().unwrap().root;

    assert_eq!(host.count(DIALOG), 1);
    assert!(!host.is_attached(&first));
    assert!(host.is_attached(&second));
    assert_eq!(lightbox.displayed_url().as_deref(), Some("c.jpg"));
}

#[test]
fn test_reopen_during_fade_out_survives_stale_removal() {
    tracing_init();
    let (host, lightbox) = widget(&["a.jpg", "b.jpg"]);
    lightbox.open(0).unwrap();
    host.advance(10);
    lightbox.close();

    host.advance(100);
    lightbox.open(1).unwrap();
    host.advance(1000);

    let root = lightbox.overlay().unwrap().root;
    assert!(host.is_attached(&root));
    assert!(!host.has_class(&root, "fade-out"));
    assert_eq!(host.style(&root, "opacity").as_deref(), Some("1"));
    assert_eq!(host.count(DIALOG), 1);
    assert_eq!(lightbox.state(), LightboxState::Open(1));
}

#[test]
fn test_controls_disabled_at_bounds() {
    tracing_init();
    let (host, lightbox) = widget(&["a.jpg", "b.jpg"]);
    lightbox.open(0).unwrap();
    let overlay = lightbox.overlay().unwrap();

    assert!(host.attribute(&overlay.previous, "disabled").is_some());
    assert_eq!(
        host.attribute(&overlay.previous, "aria-disabled").as_deref(),
        Some("true")
    );
    assert!(host.attribute(&overlay.next, "disabled").is_none());

    lightbox.next();
    assert!(host.attribute(&overlay.previous, "disabled").is_none());
    assert!(host.attribute(&overlay.previous, "aria-disabled").is_none());
    assert!(host.attribute(&overlay.next, "disabled").is_some());
}

#[test]
fn test_counter_tracks_cursor() {
    tracing_init();
    let (host, lightbox) = widget(&["a.jpg", "b.jpg", "c.jpg"]);
    lightbox.open(1).unwrap();
    let counter = lightbox.overlay().unwrap().counter.unwrap();
    assert_eq!(host.text(&counter), "2 / 3");

    lightbox.next();
    assert_eq!(host.text(&counter), "3 / 3");
}

#[test]
fn test_alt_text_follows_item() {
    tracing_init();
    let host = MemoryHost::new();
    let lightbox = Lightbox::new(
        host.clone(),
        Gallery::from_entries([("a.jpg", "Lighthouse"), ("b.jpg", "Pier")]),
        LightboxConfig::default(),
    )
    .unwrap();

    lightbox.open(0).unwrap();
    let image = lightbox.overlay().unwrap().image;
    assert_eq!(host.attribute(&image, "alt").as_deref(), Some("Lighthouse"));
    lightbox.next();
    assert_eq!(host.attribute(&image, "alt").as_deref(), Some("Pier"));
}

#[test]
fn test_walkthrough_by_clicks() {
    tracing_init();
    let host = MemoryHost::new();
    let (_section, thumbnails) = gallery_page(&host, &["a.jpg", "b.jpg", "c.jpg"]);
    let lightbox = Lightbox::attach(host.clone(), LightboxConfig::default()).unwrap();

    host.click(&thumbnails[1]);
    assert_eq!(lightbox.displayed_url().as_deref(), Some("b.jpg"));

    let overlay = lightbox.overlay().unwrap();
    host.click(&overlay.next);
    assert_eq!(lightbox.displayed_url().as_deref(), Some("c.jpg"));

    host.click(&overlay.next);
    assert_eq!(lightbox.displayed_url().as_deref(), Some("c.jpg"));
    assert_eq!(lightbox.cursor(), Some(2));

    host.click(&overlay.previous);
    host.click(&overlay.previous);
    assert_eq!(lightbox.displayed_url().as_deref(), Some("a.jpg"));

    host.click(&overlay.close);
    assert_eq!(lightbox.cursor(), None);
    host.flush_timers();
    assert_eq!(host.count(DIALOG), 0);
    assert!(!host.is_attached(&overlay.root));
}

#[test]
fn test_closed_overlays_are_freed() {
    tracing_init();
    let (host, lightbox) = widget(&["a.jpg", "b.jpg"]);
    let baseline = host.node_count();

    for index in [0, 1, 0, 1] {
        lightbox.open(index).unwrap();
        host.advance(10);
        lightbox.close();
        host.advance(300);
    }
    lightbox.open(0).unwrap();
    lightbox.open(1).unwrap();
    drop(lightbox);

    assert_eq!(host.node_count(), baseline);
    assert_eq!(host.listener_count(), 0);
    assert_eq!(host.pending_timers(), 0);
}
